use axum::{debug_handler, extract::Query, response::Redirect};
use serde::Deserialize;
use tower_sessions::Session;

use crate::AppResult;

#[derive(Deserialize)]
pub(crate) struct LogoutQuery {
    pub(crate) return_url: Option<String>,
}

/// Only same-site paths; anything else goes home.
fn local_path(return_url: Option<String>) -> String {
    return_url
        .filter(|url| url.starts_with('/') && !url.starts_with("//"))
        .unwrap_or_else(|| "/".to_owned())
}

#[debug_handler]
pub(crate) async fn logout(
    Query(LogoutQuery { return_url }): Query<LogoutQuery>,
    session: Session,
) -> AppResult<Redirect> {
    session.flush().await?;
    Ok(Redirect::to(&local_path(return_url)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn return_url_stays_on_site() {
        assert_eq!(local_path(Some("/rooms".to_owned())), "/rooms");
        assert_eq!(local_path(Some("https://evil.example".to_owned())), "/");
        assert_eq!(local_path(Some("//evil.example".to_owned())), "/");
        assert_eq!(local_path(None), "/");
    }
}
