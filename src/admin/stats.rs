use axum::{debug_handler, extract::State, Json};
use futures_util::future::join4;
use serde::Serialize;
use tower_sessions::Session;

use crate::{
    catalog::load_catalog,
    models::{
        booking::{Booking, BookingStatus},
        message::{Message, MessageStatus},
        user::{Role, User},
    },
    session::require_admin,
    store::{Collection, SharedStore},
    AppResult, AppState,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingCounts {
    pub total: usize,
    pub pending: usize,
    pub confirmed: usize,
    pub cancelled: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageCounts {
    pub total: usize,
    pub unread: usize,
    pub read: usize,
}

/// Dashboard numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Guest accounts; admins are not counted.
    pub users: usize,
    pub rooms: usize,
    pub bookings: BookingCounts,
    pub messages: MessageCounts,
    pub revenue: f64,
}

/// Money taken: confirmed bookings only.
pub fn revenue<'a>(bookings: impl IntoIterator<Item = &'a Booking>) -> f64 {
    bookings
        .into_iter()
        .filter(|b| b.status == BookingStatus::Confirmed)
        .map(Booking::amount)
        .sum()
}

impl Stats {
    pub fn compute(users: &[User], rooms: usize, bookings: &[Booking], messages: &[Message]) -> Self {
        let with_status = |status: BookingStatus| bookings.iter().filter(|b| b.status == status).count();
        let unread = messages.iter().filter(|m| m.status == MessageStatus::Unread).count();

        Self {
            users: users.iter().filter(|u| u.role == Role::User).count(),
            rooms,
            bookings: BookingCounts {
                total: bookings.len(),
                pending: with_status(BookingStatus::Pending),
                confirmed: with_status(BookingStatus::Confirmed),
                cancelled: with_status(BookingStatus::Cancelled),
            },
            messages: MessageCounts {
                total: messages.len(),
                unread,
                read: messages.len() - unread,
            },
            revenue: revenue(bookings),
        }
    }
}

#[debug_handler(state = AppState)]
pub(crate) async fn stats(
    State(store): State<SharedStore>,
    session: Session,
) -> AppResult<Json<Stats>> {
    require_admin(&session).await?;

    let (users, catalog, bookings, messages) = join4(
        store.fetch_all::<User>(Collection::Users, &[]),
        load_catalog(&*store),
        store.fetch_all::<Booking>(Collection::Bookings, &[]),
        store.fetch_all::<Message>(Collection::Messages, &[]),
    )
    .await;

    let messages = messages.unwrap_or_else(|err| {
        tracing::warn!(error = %err, "messages unavailable, counting none");
        Vec::new()
    });

    Ok(Json(Stats::compute(&users?, catalog.rooms.len(), &bookings?, &messages)))
}
