//! Back-office routes. Every handler starts by demanding an admin session.

mod bookings;
mod messages;
mod rooms;
pub mod stats;
mod users;

use axum::{routing::{delete, get, patch, post, put}, Router};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(stats::stats))
        .route("/rooms", get(rooms::list_rooms).post(rooms::create_room))
        .route("/rooms/{id}", put(rooms::update_room).delete(rooms::delete_room))
        .route("/bookings", get(bookings::list_bookings))
        .route("/bookings/{id}", patch(bookings::change_status).delete(bookings::delete_booking))
        .route("/users", get(users::list_users))
        .route("/users/{id}", delete(users::delete_user))
        .route("/messages", get(messages::list_messages))
        .route("/messages/{id}", delete(messages::delete_message))
        .route("/messages/{id}/read", post(messages::mark_read))
        .route("/messages/{id}/unread", post(messages::mark_unread))
}
