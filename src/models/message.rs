use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    #[default]
    Unread,
    Read,
}

/// A contact-form message left for the front desk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: MessageStatus,
    #[serde(default, with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub read_at: Option<OffsetDateTime>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: MessageStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Marking read stamps `readAt`; marking unread writes it back to null.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadChange {
    pub status: MessageStatus,
    #[serde(with = "time::serde::rfc3339::option")]
    pub read_at: Option<OffsetDateTime>,
}

impl ReadChange {
    pub fn read(now: OffsetDateTime) -> Self {
        Self { status: MessageStatus::Read, read_at: Some(now) }
    }

    pub fn unread() -> Self {
        Self { status: MessageStatus::Unread, read_at: None }
    }
}
