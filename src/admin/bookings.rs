use axum::{debug_handler, extract::{Path, Query, State}, http::StatusCode, Json};
use serde::Deserialize;
use time::OffsetDateTime;
use tower_sessions::Session;

use crate::{
    bookings::sort_newest_first,
    models::{booking::{Booking, BookingStatus}, EntityId},
    search::matches_search,
    session::require_admin,
    store::{Collection, SharedStore},
    AppResult, AppState,
};

#[derive(Debug, Deserialize)]
pub(crate) struct BookingQuery {
    status: Option<BookingStatus>,
    q: Option<String>,
}

#[debug_handler(state = AppState)]
pub(crate) async fn list_bookings(
    State(store): State<SharedStore>,
    session: Session,
    Query(BookingQuery { status, q }): Query<BookingQuery>,
) -> AppResult<Json<Vec<Booking>>> {
    require_admin(&session).await?;

    let mut bookings: Vec<Booking> = store.fetch_all(Collection::Bookings, &[]).await?;
    bookings.retain(|b| {
        status.is_none_or(|status| b.status == status)
            && matches_search(q.as_deref(), &[b.name.as_str(), b.room.as_str(), b.phone.as_str()])
    });
    sort_newest_first(&mut bookings);
    Ok(Json(bookings))
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusForm {
    status: BookingStatus,
}

#[debug_handler(state = AppState)]
pub(crate) async fn change_status(
    State(store): State<SharedStore>,
    session: Session,
    Path(id): Path<EntityId>,
    Json(StatusForm { status }): Json<StatusForm>,
) -> AppResult<Json<Booking>> {
    let admin = require_admin(&session).await?;
    let booking: Booking = store.fetch(Collection::Bookings, &id).await?;

    let change = booking.change_status(status, OffsetDateTime::now_utc())?;
    let updated: Booking = store.update(Collection::Bookings, &id, &change).await?;

    tracing::info!(booking = %id, admin = %admin.email, from = %booking.status, to = %status, "booking status changed");
    Ok(Json(updated))
}

#[debug_handler(state = AppState)]
pub(crate) async fn delete_booking(
    State(store): State<SharedStore>,
    session: Session,
    Path(id): Path<EntityId>,
) -> AppResult<StatusCode> {
    let admin = require_admin(&session).await?;
    store.delete(Collection::Bookings, &id).await?;

    tracing::info!(booking = %id, admin = %admin.email, "booking deleted");
    Ok(StatusCode::NO_CONTENT)
}
