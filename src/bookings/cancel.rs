use axum::{debug_handler, extract::{Path, State}, Json};
use time::OffsetDateTime;
use tower_sessions::Session;

use crate::{
    models::{booking::Booking, EntityId},
    session::require_user,
    store::{Collection, SharedStore},
    AppResult, AppState,
};

use super::owned_booking;

#[debug_handler(state = AppState)]
pub(crate) async fn cancel_booking(
    State(store): State<SharedStore>,
    session: Session,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Booking>> {
    let user = require_user(&session).await?;
    let booking = owned_booking(&*store, &user, &id).await?;

    let change = booking.cancel(OffsetDateTime::now_utc())?;
    let cancelled: Booking = store.update(Collection::Bookings, &id, &change).await?;

    tracing::info!(booking = %id, user = %user.id, was = %booking.status, "booking cancelled");
    Ok(Json(cancelled))
}
