use axum::{debug_handler, extract::{Path, Query, State}, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tower_sessions::Session;

use crate::{
    models::{message::{Message, MessageStatus, ReadChange}, EntityId},
    search::matches_search,
    session::require_admin,
    store::{Collection, SharedStore},
    AppResult, AppState,
};

#[derive(Debug, Deserialize)]
pub(crate) struct MessageQuery {
    status: Option<MessageStatus>,
    q: Option<String>,
}

/// The inbox view. Counts cover the whole inbox, not just the filtered page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Inbox {
    pub messages: Vec<Message>,
    pub unread: usize,
    pub read: usize,
}

#[debug_handler(state = AppState)]
pub(crate) async fn list_messages(
    State(store): State<SharedStore>,
    session: Session,
    Query(MessageQuery { status, q }): Query<MessageQuery>,
) -> AppResult<Json<Inbox>> {
    require_admin(&session).await?;

    let mut messages: Vec<Message> = store.fetch_all(Collection::Messages, &[]).await?;
    let unread = messages.iter().filter(|m| m.status == MessageStatus::Unread).count();
    let read = messages.len() - unread;

    messages.retain(|m| {
        status.is_none_or(|status| m.status == status)
            && matches_search(q.as_deref(), &[m.name.as_str(), m.email.as_str(), m.subject.as_str(), m.message.as_str()])
    });
    messages.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(Json(Inbox { messages, unread, read }))
}

#[debug_handler(state = AppState)]
pub(crate) async fn mark_read(
    State(store): State<SharedStore>,
    session: Session,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Message>> {
    require_admin(&session).await?;
    let message: Message = store
        .update(Collection::Messages, &id, &ReadChange::read(OffsetDateTime::now_utc()))
        .await?;
    Ok(Json(message))
}

#[debug_handler(state = AppState)]
pub(crate) async fn mark_unread(
    State(store): State<SharedStore>,
    session: Session,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Message>> {
    require_admin(&session).await?;
    let message: Message = store.update(Collection::Messages, &id, &ReadChange::unread()).await?;
    Ok(Json(message))
}

#[debug_handler(state = AppState)]
pub(crate) async fn delete_message(
    State(store): State<SharedStore>,
    session: Session,
    Path(id): Path<EntityId>,
) -> AppResult<StatusCode> {
    let admin = require_admin(&session).await?;
    store.delete(Collection::Messages, &id).await?;

    tracing::info!(message = %id, admin = %admin.email, "message deleted");
    Ok(StatusCode::NO_CONTENT)
}
