use serde::Serialize;
use time::Date;

use crate::catalog::Catalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StayError {
    #[error("Check-in date cannot be in the past")]
    CheckInPast,
    #[error("Check-out date must be after check-in date")]
    CheckOutNotAfterCheckIn,
}

/// Price breakdown shown next to the booking form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub price_per_night: f64,
    pub number_of_nights: i64,
    pub total_price: f64,
}

/// Nights between two calendar dates. Negative when `to` comes first.
pub fn nights_between(from: Date, to: Date) -> i64 {
    (to - from).whole_days()
}

/// Checks a requested stay against today's date and returns its length.
pub fn validate_stay(from: Date, to: Date, today: Date) -> Result<i64, StayError> {
    if from < today {
        return Err(StayError::CheckInPast);
    }
    if to <= from {
        return Err(StayError::CheckOutNotAfterCheckIn);
    }
    Ok(nights_between(from, to))
}

/// Prices a stay at the nightly rate of the room with this title. Unknown
/// rooms price at zero and so do empty or reversed ranges.
pub fn quote(catalog: &Catalog, room_title: &str, from: Date, to: Date) -> Quote {
    let price_per_night = catalog.find_by_title(room_title).map_or(0.0, |room| room.price);
    let nights = nights_between(from, to).max(0);

    Quote {
        price_per_night,
        number_of_nights: nights,
        total_price: price_per_night * nights as f64,
    }
}
