use axum::{debug_handler, extract::{Path, State}, Json};
use serde::Deserialize;
use time::OffsetDateTime;
use tower_sessions::Session;

use crate::{
    models::{booking::{Booking, PaymentMethod}, EntityId},
    session::require_user,
    store::{Collection, SharedStore},
    AppResult, AppState,
};

use super::owned_booking;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PaymentForm {
    #[serde(default)]
    payment_method: PaymentMethod,
}

/// Demo gateway: no money moves, the booking is simply confirmed.
#[debug_handler(state = AppState)]
pub(crate) async fn confirm_payment(
    State(store): State<SharedStore>,
    session: Session,
    Path(id): Path<EntityId>,
    Json(form): Json<PaymentForm>,
) -> AppResult<Json<Booking>> {
    let user = require_user(&session).await?;
    let booking = owned_booking(&*store, &user, &id).await?;

    let change = booking.confirm(form.payment_method, OffsetDateTime::now_utc())?;
    let confirmed: Booking = store.update(Collection::Bookings, &id, &change).await?;

    tracing::info!(booking = %id, method = ?form.payment_method, total = confirmed.amount(), "payment confirmed");
    Ok(Json(confirmed))
}
