pub mod admin;
pub mod appresult;
pub mod auth;
pub mod bookings;
pub mod catalog;
pub mod config;
pub mod contact;
pub mod models;
pub mod rooms;
mod search;
pub mod session;
pub mod store;

use axum::{
    extract::FromRef,
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tower_sessions::{cookie::SameSite, Expiry, MemoryStore, SessionManagerLayer};

pub use appresult::{AppError, AppResult};
pub use config::{AppConfig, SharedConfig};
pub use store::SharedStore;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub store: SharedStore,
    pub config: SharedConfig,
}

/// The whole HTTP surface, sessions and CORS included.
pub fn router(state: AppState) -> Router {
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(state.config.session_minutes)));
    let cors = cors_layer(state.config.allowed_origin.as_deref());

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(auth::router())
        .merge(contact::router())
        .merge(rooms::router())
        .merge(bookings::router())
        .nest("/admin", admin::router())
        .with_state(state)
        .layer(session_layer)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let Some(origin) = origin else {
        return CorsLayer::new();
    };
    match HeaderValue::from_str(origin) {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_credentials(true)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE]),
        Err(err) => {
            tracing::warn!(origin, error = %err, "ignoring unusable ALLOWED_ORIGIN");
            CorsLayer::new()
        }
    }
}
