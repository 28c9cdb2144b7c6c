use axum::{debug_handler, extract::{Query, State}, Json};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    models::booking::{Booking, BookingStatus},
    session::require_user,
    store::{Collection, SharedStore},
    AppResult, AppState,
};

use super::sort_newest_first;

#[derive(Debug, Deserialize)]
pub(crate) struct MineQuery {
    status: Option<BookingStatus>,
}

#[debug_handler(state = AppState)]
pub(crate) async fn my_bookings(
    State(store): State<SharedStore>,
    session: Session,
    Query(MineQuery { status }): Query<MineQuery>,
) -> AppResult<Json<Vec<Booking>>> {
    let user = require_user(&session).await?;
    let user_id = user.id.to_string();

    let mut filter = vec![("userId", user_id.as_str())];
    if let Some(status) = status {
        filter.push(("status", status.as_str()));
    }

    let mut bookings: Vec<Booking> = store.fetch_all(Collection::Bookings, &filter).await?;
    sort_newest_first(&mut bookings);
    Ok(Json(bookings))
}
