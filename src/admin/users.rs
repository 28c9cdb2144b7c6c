use axum::{debug_handler, extract::{Path, Query, State}, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::{
    models::{
        booking::{Booking, BookingStatus},
        user::{Role, User, UserProfile},
        EntityId,
    },
    search::matches_search,
    session::require_admin,
    store::{Collection, SharedStore},
    AppError, AppResult, AppState,
};

use super::stats::revenue;

/// An account with its booking history summed up.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AccountSummary {
    #[serde(flatten)]
    pub profile: UserProfile,
    pub booking_count: usize,
    pub confirmed_bookings: usize,
    pub total_spent: f64,
}

impl AccountSummary {
    fn new(user: &User, bookings: &[Booking]) -> Self {
        let theirs: Vec<&Booking> = bookings
            .iter()
            .filter(|b| b.user_id.as_ref() == Some(&user.id))
            .collect();

        Self {
            profile: UserProfile::from(user),
            booking_count: theirs.len(),
            confirmed_bookings: theirs.iter().filter(|b| b.status == BookingStatus::Confirmed).count(),
            total_spent: revenue(theirs.iter().copied()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum RoleFilter {
    #[default]
    All,
    User,
    Admin,
}

impl RoleFilter {
    fn admits(self, role: Role) -> bool {
        match self {
            RoleFilter::All => true,
            RoleFilter::User => role == Role::User,
            RoleFilter::Admin => role == Role::Admin,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserQuery {
    q: Option<String>,
    #[serde(default)]
    role: RoleFilter,
}

#[debug_handler(state = AppState)]
pub(crate) async fn list_users(
    State(store): State<SharedStore>,
    session: Session,
    Query(UserQuery { q, role }): Query<UserQuery>,
) -> AppResult<Json<Vec<AccountSummary>>> {
    require_admin(&session).await?;

    // Roles are matched here, not in the store query: documents without a
    // role are guests.
    let users: Vec<User> = store.fetch_all(Collection::Users, &[]).await?;
    let bookings: Vec<Booking> = store.fetch_all(Collection::Bookings, &[]).await?;

    let accounts = users
        .iter()
        .filter(|u| role.admits(u.role))
        .filter(|u| matches_search(q.as_deref(), &[u.name.as_str(), u.email.as_str(), u.phone.as_str()]))
        .map(|u| AccountSummary::new(u, &bookings))
        .collect();
    Ok(Json(accounts))
}

/// Removes the account only; its bookings stay on record.
#[debug_handler(state = AppState)]
pub(crate) async fn delete_user(
    State(store): State<SharedStore>,
    session: Session,
    Path(id): Path<EntityId>,
) -> AppResult<StatusCode> {
    let admin = require_admin(&session).await?;

    let user: User = store.fetch(Collection::Users, &id).await?;
    if user.role == Role::Admin {
        return Err(AppError::Forbidden("Admin accounts cannot be deleted here".to_owned()));
    }
    store.delete(Collection::Users, &id).await?;

    tracing::info!(user = %id, email = %user.email, admin = %admin.email, "guest account deleted");
    Ok(StatusCode::NO_CONTENT)
}
