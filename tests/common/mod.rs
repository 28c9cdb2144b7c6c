#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use hotelier::{
    auth,
    config::AdminSeed,
    store::{Collection, InMemoryStore},
    AppConfig, AppState,
};
use serde_json::{json, Value};
use time::{Date, Duration, OffsetDateTime};
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "admin@hotel.test";
pub const ADMIN_PASSWORD: &str = "admin123";
pub const PASSWORD: &str = "secret1";

pub struct TestApp {
    pub store: Arc<InMemoryStore>,
    router: Router,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Same as [`TestApp::new`], with the config adjusted before the router is built.
    pub async fn with_config(adjust: impl FnOnce(&mut AppConfig)) -> Self {
        let mut config = AppConfig {
            bcrypt_cost: 4,
            admin: Some(AdminSeed {
                email: ADMIN_EMAIL.to_owned(),
                password: ADMIN_PASSWORD.to_owned(),
            }),
            ..AppConfig::default()
        };
        adjust(&mut config);
        let store = Arc::new(InMemoryStore::default());
        auth::bootstrap_admin(&*store, &config).await.unwrap();

        let router = hotelier::router(AppState {
            store: store.clone(),
            config: Arc::new(config),
        });
        Self { store, router }
    }

    /// A browser with its own cookie jar.
    pub fn client(&self) -> Client {
        Client { router: self.router.clone(), cookie: None }
    }

    pub async fn admin(&self) -> Client {
        let mut client = self.client();
        let res = client
            .post("/auth/admin/login", json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }))
            .await;
        assert_eq!(res.status, StatusCode::OK, "{:?}", res.body);
        client
    }

    /// Registers a guest and logs them in. Returns the session user.
    pub async fn guest(&self, name: &str, email: &str) -> (Client, Value) {
        let mut client = self.client();
        let res = client
            .post("/auth/register", json!({
                "name": name,
                "email": email,
                "phone": "9876543210",
                "password": PASSWORD,
                "confirmPassword": PASSWORD,
                "agreedToTerms": true,
            }))
            .await;
        assert_eq!(res.status, StatusCode::CREATED, "{:?}", res.body);

        let res = client.post("/auth/login", json!({ "email": email, "password": PASSWORD })).await;
        assert_eq!(res.status, StatusCode::OK, "{:?}", res.body);
        (client, res.body)
    }

    pub fn documents(&self, collection: Collection) -> Vec<Value> {
        self.store.documents(collection)
    }
}

pub struct Client {
    router: Router,
    cookie: Option<String>,
}

#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers.get(header::LOCATION).and_then(|v| v.to_str().ok())
    }
}

impl Client {
    pub async fn request(&mut self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        self.keep_cookie(response.headers());

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        TestResponse { status, headers, body }
    }

    fn keep_cookie(&mut self, headers: &HeaderMap) {
        let Some(set_cookie) = headers.get(header::SET_COOKIE).and_then(|v| v.to_str().ok()) else {
            return;
        };
        let pair = set_cookie.split(';').next().unwrap_or_default().trim();
        match pair.split_once('=') {
            Some((_, value)) if !value.is_empty() && !set_cookie.contains("Max-Age=0") => {
                self.cookie = Some(pair.to_owned());
            }
            _ => self.cookie = None,
        }
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&mut self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&mut self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn patch(&mut self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::PATCH, uri, Some(body)).await
    }

    pub async fn delete(&mut self, uri: &str) -> TestResponse {
        self.request(Method::DELETE, uri, None).await
    }
}

/// `days` from today, as the booking form sends it.
pub fn day(days: i64) -> String {
    date(days).to_string()
}

pub fn date(days: i64) -> Date {
    OffsetDateTime::now_utc().date() + Duration::days(days)
}
