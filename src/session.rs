use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::{models::{user::{Role, User}, EntityId}, AppError, AppResult};

pub const USER: &str = "user";

/// Who is logged in on this session. Lives server-side; the browser only
/// holds the session cookie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

pub async fn current_user(session: &Session) -> AppResult<Option<SessionUser>> {
    Ok(session.get::<SessionUser>(USER).await?)
}

/// Guest-only pages. Admins and anonymous visitors are sent to `/login`.
pub async fn require_user(session: &Session) -> AppResult<SessionUser> {
    match current_user(session).await? {
        Some(user) if user.role == Role::User => Ok(user),
        _ => Err(AppError::LoginRequired),
    }
}

pub async fn require_admin(session: &Session) -> AppResult<SessionUser> {
    match current_user(session).await? {
        Some(user) if user.role == Role::Admin => Ok(user),
        _ => Err(AppError::AdminRequired),
    }
}
