//! Guest side of the booking lifecycle: quote, book, pay, cancel.

pub mod calc;
mod cancel;
mod mine;
mod new;
mod payment;

use axum::{routing::{get, post}, Router};

use crate::{
    models::{booking::Booking, EntityId},
    session::SessionUser,
    store::{Collection, Store},
    AppError, AppResult, AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/bookings", post(new::create_booking))
        .route("/bookings/quote", get(new::quote))
        .route("/bookings/mine", get(mine::my_bookings))
        .route("/bookings/{id}/pay", post(payment::confirm_payment))
        .route("/bookings/{id}/cancel", post(cancel::cancel_booking))
}

/// Loads a booking the session user is allowed to act on.
async fn owned_booking(store: &dyn Store, user: &SessionUser, id: &EntityId) -> AppResult<Booking> {
    let booking: Booking = store.fetch(Collection::Bookings, id).await?;

    if booking.user_id.as_ref() != Some(&user.id) {
        tracing::warn!(booking = %id, user = %user.id, "refused access to another guest's booking");
        return Err(AppError::Forbidden("This booking belongs to someone else".to_owned()));
    }
    Ok(booking)
}

/// Newest first; bookings without a timestamp sink to the bottom.
pub(crate) fn sort_newest_first(bookings: &mut [Booking]) {
    bookings.sort_by(|a, b| b.booked_at.cmp(&a.booked_at));
}
