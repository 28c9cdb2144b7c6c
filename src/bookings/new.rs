use axum::{debug_handler, extract::{Query, State}, http::StatusCode, Json};
use serde::Deserialize;
use time::{Date, OffsetDateTime};
use tower_sessions::Session;

use crate::{
    auth::valid_phone,
    catalog::load_catalog,
    config::SharedConfig,
    models::{booking::{Booking, BookingStatus, NewBooking}, calendar_date, EntityId},
    session::require_user,
    store::{Collection, SharedStore},
    AppError, AppResult, AppState,
};

use super::calc::{self, Quote};

const MAX_GUESTS: u32 = 10;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookingForm {
    #[serde(default)]
    name: String,
    #[serde(default)]
    room: String,
    #[serde(with = "calendar_date")]
    from_date: Date,
    #[serde(with = "calendar_date")]
    to_date: Date,
    #[serde(default = "one")]
    guests: u32,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    special_requests: String,
}

fn one() -> u32 {
    1
}

impl BookingForm {
    /// Everything but the dates, which need today's date.
    fn validate(&self) -> AppResult<()> {
        if self.room.trim().is_empty() {
            return Err(AppError::validation("Please select a room"));
        }
        if !(1..=MAX_GUESTS).contains(&self.guests) {
            return Err(AppError::validation(format!("Guests must be between 1 and {MAX_GUESTS}")));
        }
        if !valid_phone(self.phone.trim()) {
            return Err(AppError::validation("Please enter a valid 10-digit phone number"));
        }
        Ok(())
    }
}

#[debug_handler(state = AppState)]
pub(crate) async fn create_booking(
    State(store): State<SharedStore>,
    State(config): State<SharedConfig>,
    session: Session,
    Json(form): Json<BookingForm>,
) -> AppResult<(StatusCode, Json<Booking>)> {
    let user = require_user(&session).await?;

    form.validate()?;
    calc::validate_stay(form.from_date, form.to_date, config.today())?;

    let catalog = load_catalog(&*store).await;
    let quote = calc::quote(&catalog, &form.room, form.from_date, form.to_date);

    let name = match form.name.trim() {
        "" => user.name.clone(),
        name => name.to_owned(),
    };
    let booking = NewBooking {
        id: EntityId::mint(),
        user_id: user.id.clone(),
        name,
        room: form.room,
        from_date: form.from_date,
        to_date: form.to_date,
        guests: form.guests,
        phone: form.phone.trim().to_owned(),
        special_requests: form.special_requests,
        price_per_night: quote.price_per_night,
        number_of_nights: quote.number_of_nights,
        total_price: quote.total_price,
        status: BookingStatus::Pending,
        booked_at: OffsetDateTime::now_utc(),
    };

    let created: Booking = store.insert(Collection::Bookings, &booking).await?;
    tracing::info!(
        booking = %created.id,
        user = %user.id,
        room = %created.room,
        nights = created.number_of_nights,
        total = created.amount(),
        "booking created, awaiting payment"
    );

    Ok((StatusCode::CREATED, Json(created)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuoteQuery {
    room: String,
    #[serde(with = "calendar_date")]
    from_date: Date,
    #[serde(with = "calendar_date")]
    to_date: Date,
}

#[debug_handler(state = AppState)]
pub(crate) async fn quote(
    State(store): State<SharedStore>,
    Query(query): Query<QuoteQuery>,
) -> Json<Quote> {
    let catalog = load_catalog(&*store).await;
    Json(calc::quote(&catalog, &query.room, query.from_date, query.to_date))
}
