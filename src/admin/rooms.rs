use axum::{debug_handler, extract::{Path, State}, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::json;
use tower_sessions::Session;

use crate::{
    catalog::{fallback, load_catalog, Catalog},
    models::{room::Room, EntityId},
    session::require_admin,
    store::{Collection, SharedStore},
    AppError, AppResult, AppState,
};

const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/400x250?text=No+Image";

/// The form sends amenities as one comma-separated string; API callers may
/// send a list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Amenities {
    List(Vec<String>),
    Text(String),
}

impl Default for Amenities {
    fn default() -> Self {
        Amenities::List(Vec::new())
    }
}

impl Amenities {
    fn into_list(self) -> Vec<String> {
        let items = match self {
            Amenities::List(items) => items,
            Amenities::Text(text) => text.split(',').map(str::to_owned).collect(),
        };
        items
            .into_iter()
            .map(|item| item.trim().to_owned())
            .filter(|item| !item.is_empty())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RoomForm {
    #[serde(default)]
    title: String,
    price: Option<f64>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    image: String,
    #[serde(default)]
    amenities: Amenities,
}

impl RoomForm {
    fn into_room(self, id: EntityId) -> AppResult<Room> {
        let price = self.price.filter(|price| *price > 0.0);
        let (Some(price), false, false) = (price, self.title.trim().is_empty(), self.description.trim().is_empty()) else {
            return Err(AppError::validation("Please fill all required fields"));
        };

        let image = match self.image.trim() {
            "" => PLACEHOLDER_IMAGE.to_owned(),
            image => image.to_owned(),
        };
        Ok(Room {
            id,
            title: self.title.trim().to_owned(),
            price,
            description: self.description.trim().to_owned(),
            image,
            amenities: self.amenities.into_list(),
            deleted: false,
        })
    }
}

#[debug_handler(state = AppState)]
pub(crate) async fn list_rooms(
    State(store): State<SharedStore>,
    session: Session,
) -> AppResult<Json<Catalog>> {
    require_admin(&session).await?;
    Ok(Json(load_catalog(&*store).await))
}

#[debug_handler(state = AppState)]
pub(crate) async fn create_room(
    State(store): State<SharedStore>,
    session: Session,
    Json(form): Json<RoomForm>,
) -> AppResult<(StatusCode, Json<Room>)> {
    require_admin(&session).await?;

    let room = form.into_room(EntityId::mint())?;
    let created: Room = store.insert(Collection::Rooms, &room).await?;

    tracing::info!(room = %created.id, title = %created.title, "room added");
    Ok((StatusCode::CREATED, Json(created)))
}

/// Built-in rooms have no store document until their first edit; that edit
/// creates one under the built-in id.
#[debug_handler(state = AppState)]
pub(crate) async fn update_room(
    State(store): State<SharedStore>,
    session: Session,
    Path(id): Path<EntityId>,
    Json(form): Json<RoomForm>,
) -> AppResult<Json<Room>> {
    require_admin(&session).await?;
    let room = form.into_room(id.clone())?;

    let saved: Room = match store.get(Collection::Rooms, &id).await {
        Ok(_) => store.overwrite(Collection::Rooms, &id, &room).await?,
        Err(err) if err.is_not_found() && fallback::find(&id).is_some() => {
            store.insert(Collection::Rooms, &room).await?
        }
        Err(err) => return Err(err.into()),
    };

    tracing::info!(room = %id, title = %saved.title, "room updated");
    Ok(Json(saved))
}

/// Built-in rooms are hidden with a tombstone; store-only rooms are removed.
#[debug_handler(state = AppState)]
pub(crate) async fn delete_room(
    State(store): State<SharedStore>,
    session: Session,
    Path(id): Path<EntityId>,
) -> AppResult<StatusCode> {
    require_admin(&session).await?;

    let Some(builtin) = fallback::find(&id) else {
        store.delete(Collection::Rooms, &id).await?;
        tracing::info!(room = %id, "room deleted");
        return Ok(StatusCode::NO_CONTENT);
    };

    match store.get(Collection::Rooms, &id).await {
        Ok(_) => {
            store.patch(Collection::Rooms, &id, json!({ "deleted": true })).await?;
        }
        Err(err) if err.is_not_found() => {
            let _: Room = store.insert(Collection::Rooms, &builtin.tombstone()).await?;
        }
        Err(err) => return Err(err.into()),
    }

    tracing::info!(room = %id, "built-in room hidden");
    Ok(StatusCode::NO_CONTENT)
}
