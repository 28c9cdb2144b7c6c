use axum::{debug_handler, extract::State, http::StatusCode, routing::post, Json, Router};
use serde::Deserialize;
use time::OffsetDateTime;

use crate::{
    models::{message::{Message, MessageStatus, NewMessage}, EntityId},
    store::{Collection, SharedStore},
    AppError, AppResult, AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/contact", post(send_message))
}

#[derive(Debug, Deserialize)]
pub(crate) struct ContactForm {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    subject: String,
    #[serde(default)]
    message: String,
}

#[debug_handler(state = AppState)]
pub(crate) async fn send_message(
    State(store): State<SharedStore>,
    Json(form): Json<ContactForm>,
) -> AppResult<(StatusCode, Json<Message>)> {
    if [&form.name, &form.email, &form.message].iter().any(|field| field.trim().is_empty()) {
        return Err(AppError::validation("Please fill all required fields"));
    }

    let subject = match form.subject.trim() {
        "" => "No subject".to_owned(),
        subject => subject.to_owned(),
    };
    let message = NewMessage {
        id: EntityId::mint(),
        name: form.name.trim().to_owned(),
        email: form.email.trim().to_owned(),
        subject,
        message: form.message,
        status: MessageStatus::Unread,
        created_at: OffsetDateTime::now_utc(),
    };

    let sent: Message = store.insert(Collection::Messages, &message).await?;
    tracing::info!(message = %sent.id, from = %sent.email, "contact message received");
    Ok((StatusCode::CREATED, Json(sent)))
}
