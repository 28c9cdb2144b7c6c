mod login;
mod logout;
pub mod password;
mod register;

use axum::{routing::{get, post}, Router};
use time::OffsetDateTime;

use crate::{
    config::AppConfig,
    models::{user::{NewUser, Role, User}, EntityId},
    store::{Collection, Store},
    AppResult, AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register::register))
        .route("/auth/login", post(login::login))
        .route("/auth/admin/login", post(login::admin_login))
        .route("/auth/logout", post(logout::logout))
        .route("/auth/me", get(login::me))
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Ten digits, nothing else.
pub(crate) fn valid_phone(phone: &str) -> bool {
    phone.len() == 10 && phone.bytes().all(|b| b.is_ascii_digit())
}

/// Accounts created elsewhere may keep their email's original casing, so a
/// miss on the normalized address falls back to a case-insensitive scan.
pub(crate) async fn find_by_email(store: &dyn Store, email: &str) -> AppResult<Option<User>> {
    let email = normalize_email(email);
    let exact: Vec<User> = store.fetch_all(Collection::Users, &[("email", email.as_str())]).await?;
    if let Some(user) = exact.into_iter().next() {
        return Ok(Some(user));
    }

    let users: Vec<User> = store.fetch_all(Collection::Users, &[]).await?;
    Ok(users.into_iter().find(|user| user.email.trim().eq_ignore_ascii_case(&email)))
}

pub(crate) struct Signup<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub password: &'a str,
    pub role: Role,
}

pub(crate) async fn create_user(store: &dyn Store, signup: Signup<'_>, bcrypt_cost: u32) -> AppResult<User> {
    let user = NewUser {
        id: EntityId::mint(),
        name: signup.name.trim().to_owned(),
        email: normalize_email(signup.email),
        phone: signup.phone.trim().to_owned(),
        password_hash: password::hash_password(signup.password, bcrypt_cost)?,
        role: signup.role,
        created_at: OffsetDateTime::now_utc(),
    };

    let created: User = store.insert(Collection::Users, &user).await?;
    tracing::info!(user = %created.id, email = %created.email, role = ?created.role, "account created");
    Ok(created)
}

/// Makes sure the configured admin account exists.
pub async fn bootstrap_admin(store: &dyn Store, config: &AppConfig) -> AppResult<()> {
    let Some(seed) = &config.admin else {
        return Ok(());
    };

    if find_by_email(store, &seed.email).await?.is_some() {
        tracing::debug!(email = %seed.email, "admin account already present");
        return Ok(());
    }

    let signup = Signup {
        name: "Administrator",
        email: &seed.email,
        phone: "",
        password: &seed.password,
        role: Role::Admin,
    };
    create_user(store, signup, config.bcrypt_cost).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_numbers_are_ten_digits() {
        assert!(valid_phone("9876543210"));
        assert!(!valid_phone("987654321"));
        assert!(!valid_phone("98765432100"));
        assert!(!valid_phone("98765-4321"));
    }

    #[test]
    fn emails_compare_case_insensitively() {
        assert_eq!(normalize_email("  Guest@Example.COM "), "guest@example.com");
    }
}
