use std::fmt;

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use super::{calendar_date, EntityId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

/// Every status change a booking may go through. Anything not listed here is
/// refused before the store is touched.
pub const TRANSITIONS: &[(BookingStatus, BookingStatus)] = &[
    (BookingStatus::Pending, BookingStatus::Confirmed),
    (BookingStatus::Pending, BookingStatus::Cancelled),
    (BookingStatus::Confirmed, BookingStatus::Cancelled),
];

impl BookingStatus {
    pub fn can_become(self, next: BookingStatus) -> bool {
        TRANSITIONS.contains(&(self, next))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Card,
    Upi,
    Netbanking,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("a {from} booking cannot become {to}")]
pub struct IllegalTransition {
    pub from: BookingStatus,
    pub to: BookingStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: EntityId,
    #[serde(default)]
    pub user_id: Option<EntityId>,
    /// Guest name as typed on the form.
    #[serde(default)]
    pub name: String,
    /// Room title at booking time. Not a reference: renaming a room leaves it be.
    #[serde(default)]
    pub room: String,
    #[serde(with = "calendar_date")]
    pub from_date: Date,
    #[serde(with = "calendar_date")]
    pub to_date: Date,
    #[serde(default = "one_guest")]
    pub guests: u32,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub special_requests: String,
    #[serde(default)]
    pub price_per_night: f64,
    #[serde(default)]
    pub number_of_nights: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_price: Option<f64>,
    /// Older documents carry only a flat `price`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub status: BookingStatus,
    #[serde(default, with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub booked_at: Option<OffsetDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default, with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<OffsetDateTime>,
}

fn one_guest() -> u32 {
    1
}

/// Partial update written to the store when a booking changes status.
/// Unset stamps are left out so earlier ones survive the patch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    pub status: BookingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<OffsetDateTime>,
}

impl Booking {
    /// What this booking is worth once confirmed.
    pub fn amount(&self) -> f64 {
        self.total_price
            .filter(|total| *total != 0.0)
            .or(self.price)
            .unwrap_or(0.0)
    }

    /// Mock payment: pending to confirmed.
    pub fn confirm(&self, method: PaymentMethod, now: OffsetDateTime) -> Result<StatusChange, IllegalTransition> {
        let mut change = self.change_status(BookingStatus::Confirmed, now)?;
        change.payment_method = Some(method);
        Ok(change)
    }

    pub fn cancel(&self, now: OffsetDateTime) -> Result<StatusChange, IllegalTransition> {
        self.change_status(BookingStatus::Cancelled, now)
    }

    pub fn change_status(&self, next: BookingStatus, now: OffsetDateTime) -> Result<StatusChange, IllegalTransition> {
        if !self.status.can_become(next) {
            return Err(IllegalTransition { from: self.status, to: next });
        }

        Ok(StatusChange {
            status: next,
            payment_method: None,
            paid_at: (next == BookingStatus::Confirmed).then_some(now),
            cancelled_at: (next == BookingStatus::Cancelled).then_some(now),
        })
    }
}

/// Document written when a guest submits the booking form.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub id: EntityId,
    pub user_id: EntityId,
    pub name: String,
    pub room: String,
    #[serde(with = "calendar_date")]
    pub from_date: Date,
    #[serde(with = "calendar_date")]
    pub to_date: Date,
    pub guests: u32,
    pub phone: String,
    pub special_requests: String,
    pub price_per_night: f64,
    pub number_of_nights: i64,
    pub total_price: f64,
    pub status: BookingStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub booked_at: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::macros::datetime;

    use super::*;

    fn booking(status: BookingStatus) -> Booking {
        serde_json::from_value(json!({
            "id": 1,
            "userId": 4,
            "name": "Asha",
            "room": "Family Room",
            "fromDate": "2030-01-10",
            "toDate": "2030-01-12",
            "status": status,
            "totalPrice": 398.0,
        }))
        .unwrap()
    }

    #[test]
    fn allowed_transitions() {
        use BookingStatus::*;

        assert!(Pending.can_become(Confirmed));
        assert!(Pending.can_become(Cancelled));
        assert!(Confirmed.can_become(Cancelled));

        assert!(!Cancelled.can_become(Cancelled));
        assert!(!Cancelled.can_become(Confirmed));
        assert!(!Confirmed.can_become(Confirmed));
        assert!(!Confirmed.can_become(Pending));
        assert!(!Cancelled.can_become(Pending));
        assert!(!Pending.can_become(Pending));
    }

    #[test]
    fn confirming_stamps_payment() {
        let now = datetime!(2030-01-01 12:00 UTC);
        let change = booking(BookingStatus::Pending).confirm(PaymentMethod::Upi, now).unwrap();

        assert_eq!(change.status, BookingStatus::Confirmed);
        assert_eq!(change.paid_at, Some(now));
        assert_eq!(change.payment_method, Some(PaymentMethod::Upi));
        assert_eq!(change.cancelled_at, None);
    }

    #[test]
    fn cancelling_a_confirmed_booking_leaves_payment_stamp_alone() {
        let now = datetime!(2030-01-02 09:30 UTC);
        let change = booking(BookingStatus::Confirmed).cancel(now).unwrap();
        let patch = serde_json::to_value(&change).unwrap();

        assert_eq!(change.cancelled_at, Some(now));
        assert_eq!(patch["status"], "cancelled");
        assert!(patch.get("paidAt").is_none());
    }

    #[test]
    fn cancelled_bookings_stay_cancelled() {
        let now = datetime!(2030-01-02 09:30 UTC);
        let cancelled = booking(BookingStatus::Cancelled);

        assert_eq!(
            cancelled.cancel(now),
            Err(IllegalTransition { from: BookingStatus::Cancelled, to: BookingStatus::Cancelled }),
        );
        assert!(cancelled.confirm(PaymentMethod::Card, now).is_err());
    }

    #[test]
    fn legacy_price_counts_when_total_is_missing() {
        let mut legacy = booking(BookingStatus::Confirmed);
        legacy.total_price = None;
        legacy.price = Some(120.0);
        assert_eq!(legacy.amount(), 120.0);

        legacy.price = None;
        assert_eq!(legacy.amount(), 0.0);
    }

    #[test]
    fn dates_round_trip_as_calendar_days() {
        let value = serde_json::to_value(booking(BookingStatus::Pending)).unwrap();
        assert_eq!(value["fromDate"], "2030-01-10");
        assert_eq!(value["toDate"], "2030-01-12");
    }
}
