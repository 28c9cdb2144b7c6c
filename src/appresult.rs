use std::fmt;

use axum::{http::StatusCode, response::{IntoResponse, Redirect, Response}, Json};
use serde_json::json;

use crate::{bookings::calc::StayError, models::booking::IllegalTransition, store::StoreError};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    /// Rejected before any store call.
    Validation(String),
    Unauthorized(String),
    /// No guest session; answered with a redirect to the login page.
    LoginRequired,
    /// No admin session; answered with a redirect to the admin login page.
    AdminRequired,
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    Store(StoreError),
    Internal(anyhow::Error),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Validation(msg)
            | AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg) => f.write_str(msg),
            AppError::LoginRequired => f.write_str("login required"),
            AppError::AdminRequired => f.write_str("admin login required"),
            AppError::Store(err) => err.fmt(f),
            AppError::Internal(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::LoginRequired => return Redirect::to("/login").into_response(),
            AppError::AdminRequired => return Redirect::to("/admin/login").into_response(),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Store(err) => {
                tracing::error!(error = %err, "data store call failed");
                (StatusCode::BAD_GATEWAY, "The data store is unavailable, please try again".to_owned())
            }
            AppError::Internal(err) => {
                tracing::error!("{}\n\n{}", err, err.backtrace());
                (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong".to_owned())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        if err.is_not_found() {
            Self::NotFound(err.to_string())
        } else {
            Self::Store(err)
        }
    }
}

impl From<StayError> for AppError {
    fn from(err: StayError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<IllegalTransition> for AppError {
    fn from(err: IllegalTransition) -> Self {
        Self::Conflict(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

macro_rules! apperr_impl {
    ($($E:ty),* $(,)?) => {
        $(
            impl From<$E> for AppError {
                fn from(err: $E) -> Self {
                    Self::Internal(anyhow::Error::from(err))
                }
            }
        )*
    };
}

apperr_impl!(
    serde_json::Error,
    tower_sessions::session::Error,
    bcrypt::BcryptError,
);
