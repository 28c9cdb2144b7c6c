use std::sync::Arc;

use anyhow::Context;
use time::{Date, OffsetDateTime, UtcOffset};

pub type SharedConfig = Arc<AppConfig>;

#[derive(Clone, Debug)]
pub struct AdminSeed {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_addr: String,
    /// Base URL of the REST data store. Unset runs against an in-memory store.
    pub store_url: Option<String>,
    /// Origin allowed to call the API with credentials.
    pub allowed_origin: Option<String>,
    pub session_minutes: i64,
    /// Offset of the hotel's local time; decides what "today" is.
    pub hotel_offset: UtcOffset,
    pub bcrypt_cost: u32,
    pub admin: Option<AdminSeed>,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_owned(),
            store_url: None,
            allowed_origin: None,
            session_minutes: 60,
            hotel_offset: UtcOffset::UTC,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            admin: None,
            log_level: "info".to_owned(),
        }
    }
}

fn var(key: &str) -> Option<String> {
    dotenv::var(key).ok().filter(|value| !value.trim().is_empty())
}

impl AppConfig {
    /// Reads `.env` and the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let session_minutes = match var("SESSION_MINUTES") {
            Some(v) => v.parse().with_context(|| format!("SESSION_MINUTES must be a number, got {v}"))?,
            None => defaults.session_minutes,
        };
        let hotel_offset = match var("HOTEL_UTC_OFFSET") {
            Some(v) => {
                let hours: i8 = v.parse().with_context(|| format!("HOTEL_UTC_OFFSET must be whole hours, got {v}"))?;
                UtcOffset::from_hms(hours, 0, 0).context("HOTEL_UTC_OFFSET out of range")?
            }
            None => defaults.hotel_offset,
        };
        let bcrypt_cost = match var("BCRYPT_COST") {
            Some(v) => v.parse().with_context(|| format!("BCRYPT_COST must be a number, got {v}"))?,
            None => defaults.bcrypt_cost,
        };
        let admin = match (var("ADMIN_EMAIL"), var("ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(AdminSeed { email, password }),
            _ => None,
        };

        Ok(Self {
            bind_addr: var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            store_url: var("STORE_URL"),
            allowed_origin: var("ALLOWED_ORIGIN"),
            session_minutes,
            hotel_offset,
            bcrypt_cost,
            admin,
            log_level: var("LOG_LEVEL").unwrap_or(defaults.log_level),
        })
    }

    /// The calendar date at the hotel right now.
    pub fn today(&self) -> Date {
        OffsetDateTime::now_utc().to_offset(self.hotel_offset).date()
    }
}
