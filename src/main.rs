use std::sync::Arc;

use anyhow::Context;
use hotelier::{
    auth,
    store::{HttpStore, InMemoryStore},
    AppConfig, AppState, SharedStore,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let store: SharedStore = match &config.store_url {
        Some(url) => {
            tracing::info!(%url, "using REST data store");
            Arc::new(HttpStore::new(url.as_str())?)
        }
        None => {
            tracing::warn!("STORE_URL not set, data lives in memory and is lost on exit");
            Arc::new(InMemoryStore::default())
        }
    };

    auth::bootstrap_admin(&*store, &config).await?;

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("could not bind {}", config.bind_addr))?;
    tracing::info!(addr = %config.bind_addr, "hotel service listening");

    let app = hotelier::router(AppState { store, config: Arc::new(config) });
    axum::serve(listener, app).await?;
    Ok(())
}
