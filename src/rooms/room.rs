use axum::{debug_handler, extract::{Path, Query, State}, Json};
use serde::Deserialize;

use crate::{
    catalog::{load_catalog, Catalog},
    models::{room::{PriceRange, Room}, EntityId},
    search::matches_search,
    store::SharedStore,
    AppError, AppResult, AppState,
};

#[derive(Debug, Deserialize)]
pub(crate) struct RoomQuery {
    q: Option<String>,
    #[serde(default)]
    price: PriceRange,
}

/// The catalog, narrowed by a title/description search and a price band.
/// The fallback notice survives filtering.
#[debug_handler(state = AppState)]
pub(crate) async fn rooms(
    State(store): State<SharedStore>,
    Query(RoomQuery { q, price }): Query<RoomQuery>,
) -> Json<Catalog> {
    let mut catalog = load_catalog(&*store).await;
    catalog.rooms.retain(|room| {
        price.contains(room.price) && matches_search(q.as_deref(), &[room.title.as_str(), room.description.as_str()])
    });
    Json(catalog)
}

#[debug_handler(state = AppState)]
pub(crate) async fn room(
    State(store): State<SharedStore>,
    Path(room_id): Path<EntityId>,
) -> AppResult<Json<Room>> {
    let catalog = load_catalog(&*store).await;

    let Some(room) = catalog.find(&room_id) else {
        return Err(AppError::NotFound(format!("no room {room_id}")));
    };
    Ok(Json(room.clone()))
}
