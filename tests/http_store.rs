use std::collections::HashMap;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use hotelier::{
    catalog::{load_catalog, FALLBACK_NOTICE},
    models::EntityId,
    store::{Collection, HttpStore, Store, StoreError},
};
use serde_json::json;

/// A stand-in for the REST store, served on a random local port.
async fn fake_store() -> String {
    let router = Router::new()
        .route("/rooms", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
        .route("/messages", get(|| async { StatusCode::NOT_FOUND }))
        .route("/bookings", get(|Query(query): Query<HashMap<String, String>>| async move {
            Json(json!([{
                "id": 1,
                "userId": query.get("userId"),
                "status": query.get("status"),
            }]))
        }))
        .route("/users/{id}", get(|Path(id): Path<String>| async move {
            match id.as_str() {
                "7" => Json(json!({ "id": 7, "email": "asha@example.com" })).into_response(),
                _ => StatusCode::NOT_FOUND.into_response(),
            }
        }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
    format!("http://{addr}/")
}

#[tokio::test]
async fn missing_collection_lists_as_empty() {
    let store = HttpStore::new(fake_store().await).unwrap();
    assert!(store.list(Collection::Messages, &[]).await.unwrap().is_empty());
}

#[tokio::test]
async fn server_errors_surface_with_their_status() {
    let store = HttpStore::new(fake_store().await).unwrap();

    let err = store.list(Collection::Rooms, &[]).await.unwrap_err();
    assert!(matches!(err, StoreError::Status { collection: Collection::Rooms, status: 500 }));
}

#[tokio::test]
async fn unreadable_rooms_fall_back_with_a_notice() {
    let store = HttpStore::new(fake_store().await).unwrap();

    let catalog = load_catalog(&store).await;

    assert_eq!(catalog.rooms.len(), 6);
    assert_eq!(catalog.notice.as_deref(), Some(FALLBACK_NOTICE));
}

#[tokio::test]
async fn filters_travel_as_query_parameters() {
    let store = HttpStore::new(fake_store().await).unwrap();

    let docs = store
        .list(Collection::Bookings, &[("userId", "7"), ("status", "pending")])
        .await
        .unwrap();

    assert_eq!(docs, vec![json!({ "id": 1, "userId": "7", "status": "pending" })]);
}

#[tokio::test]
async fn documents_are_fetched_by_id() {
    let store = HttpStore::new(fake_store().await).unwrap();

    let user = store.get(Collection::Users, &EntityId::Number(7)).await.unwrap();
    assert_eq!(user["email"], "asha@example.com");

    let err = store.get(Collection::Users, &EntityId::Number(8)).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn unreachable_store_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let store = HttpStore::new(format!("http://{addr}")).unwrap();
    let err = store.list(Collection::Users, &[]).await.unwrap_err();
    assert!(matches!(err, StoreError::Transport(_)));

    let catalog = load_catalog(&store).await;
    assert_eq!(catalog.notice.as_deref(), Some(FALLBACK_NOTICE));
}
