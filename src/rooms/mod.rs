mod room;

use axum::{routing::get, Router};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/rooms", get(room::rooms))
        .route("/rooms/{id}", get(room::room))
}
