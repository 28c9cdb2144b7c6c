use axum::{debug_handler, extract::State, Json};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    models::user::{Role, User},
    session::{self, SessionUser, USER},
    store::{SharedStore, Store},
    AppError, AppResult, AppState,
};

use super::{find_by_email, password::verify_password};

const BAD_CREDENTIALS: &str = "Invalid email or password. Please try again.";

#[derive(Deserialize)]
pub(crate) struct LoginForm {
    email: String,
    password: String,
}

async fn authenticate(store: &dyn Store, form: &LoginForm) -> AppResult<User> {
    match find_by_email(store, &form.email).await? {
        Some(user) if verify_password(&form.password, &user.password_hash) => Ok(user),
        _ => Err(AppError::Unauthorized(BAD_CREDENTIALS.to_owned())),
    }
}

async fn start_session(session: &Session, user: &User) -> AppResult<Json<SessionUser>> {
    let session_user = SessionUser::from(user);

    session.cycle_id().await?;
    session.insert(USER, &session_user).await?;

    tracing::info!(user = %user.id, role = ?user.role, "welcome {}", user.name);
    Ok(Json(session_user))
}

#[debug_handler(state = AppState)]
pub(crate) async fn login(
    State(store): State<SharedStore>,
    session: Session,
    Json(form): Json<LoginForm>,
) -> AppResult<Json<SessionUser>> {
    let user = authenticate(&*store, &form).await?;
    start_session(&session, &user).await
}

/// Same credentials check, but only admin accounts get through.
#[debug_handler(state = AppState)]
pub(crate) async fn admin_login(
    State(store): State<SharedStore>,
    session: Session,
    Json(form): Json<LoginForm>,
) -> AppResult<Json<SessionUser>> {
    let user = authenticate(&*store, &form).await?;
    if user.role != Role::Admin {
        tracing::warn!(user = %user.id, "non-admin tried the admin login");
        return Err(AppError::Unauthorized(BAD_CREDENTIALS.to_owned()));
    }
    start_session(&session, &user).await
}

#[debug_handler]
pub(crate) async fn me(session: Session) -> AppResult<Json<SessionUser>> {
    session::current_user(&session)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::Unauthorized("Not logged in".to_owned()))
}
