//! The room catalog guests see: the built-in rooms overlaid with whatever the
//! store holds.

pub mod fallback;
mod merge;

use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;

use crate::{
    models::{room::Room, EntityId},
    store::{decode_or_skip, Collection, Store},
};

pub use merge::overlay_merge;

pub const FALLBACK_NOTICE: &str = "Using default room list";

#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    pub rooms: Vec<Room>,
    /// Set when the store could not be read and only built-in rooms are shown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl Catalog {
    pub fn find(&self, id: &EntityId) -> Option<&Room> {
        self.rooms.iter().find(|room| &room.id == id)
    }

    pub fn find_by_title(&self, title: &str) -> Option<&Room> {
        self.rooms.iter().find(|room| room.title == title)
    }
}

/// Store rooms override built-in rooms with the same id; store tombstones
/// hide them.
pub fn reconcile(fallback: Vec<Room>, store_rooms: Vec<Room>) -> Vec<Room> {
    let (tombstones, live): (Vec<Room>, Vec<Room>) = store_rooms.into_iter().partition(|room| room.deleted);
    let tombstones: HashSet<EntityId> = tombstones.into_iter().map(|room| room.id).collect();

    overlay_merge(
        fallback.into_iter().map(|room| (room.id.clone(), room)),
        live.into_iter().map(|room| (room.id.clone(), room)),
        &tombstones,
    )
    .into_iter()
    .map(|(_, room)| room)
    .collect()
}

/// A document flagged deleted hides its room even when the rest of it is
/// unreadable.
fn store_room(doc: Value) -> Option<Room> {
    if doc.get("deleted") == Some(&Value::Bool(true)) {
        let id = serde_json::from_value::<EntityId>(doc.get("id")?.clone()).ok()?;
        return Some(Room {
            id,
            title: String::new(),
            price: 0.0,
            description: String::new(),
            image: String::new(),
            amenities: Vec::new(),
            deleted: true,
        });
    }
    decode_or_skip(Collection::Rooms, doc)
}

/// Never fails: an unreadable store degrades to the built-in rooms with a
/// notice attached.
pub async fn load_catalog(store: &dyn Store) -> Catalog {
    match store.list(Collection::Rooms, &[]).await {
        Ok(docs) => Catalog {
            rooms: reconcile(fallback::rooms(), docs.into_iter().filter_map(store_room).collect()),
            notice: None,
        },
        Err(err) => {
            tracing::warn!(error = %err, "room list unavailable, serving built-in rooms");
            Catalog {
                rooms: fallback::rooms(),
                notice: Some(FALLBACK_NOTICE.to_owned()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn room(doc: serde_json::Value) -> Room {
        serde_json::from_value(doc).unwrap()
    }

    #[test]
    fn store_price_overrides_fallback() {
        let merged = reconcile(
            vec![room(json!({ "id": 1, "title": "Luxury Suite", "price": 100 }))],
            vec![room(json!({ "id": 1, "title": "Luxury Suite", "price": 120 }))],
        );

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].price, 120.0);
    }

    #[test]
    fn soft_deleted_rooms_disappear() {
        let merged = reconcile(
            vec![
                room(json!({ "id": 1, "title": "Luxury Suite", "price": 299 })),
                room(json!({ "id": 2, "title": "Family Room", "price": 199 })),
            ],
            vec![room(json!({ "id": 2, "deleted": true }))],
        );

        assert!(merged.iter().all(|r| r.id != EntityId::Number(2)));
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn store_only_rooms_follow_fallback_rooms() {
        let merged = reconcile(
            fallback::rooms(),
            vec![room(json!({ "id": "penthouse", "title": "Penthouse", "price": 999 }))],
        );

        assert_eq!(merged.len(), 7);
        assert_eq!(merged[0].title, "Luxury Suite");
        assert_eq!(merged[6].title, "Penthouse");
    }

    #[tokio::test]
    async fn unreadable_room_documents_are_skipped() {
        let store = crate::store::InMemoryStore::default();
        store.seed(Collection::Rooms, [
            json!({ "id": 2, "deleted": true }),
            json!({ "id": 3, "deleted": true, "price": null }),
            json!({ "id": "loft", "title": "Loft", "price": null }),
            json!({ "id": 4, "title": "Couple Room", "price": 175 }),
        ]);

        let catalog = load_catalog(&store).await;

        let ids: Vec<String> = catalog.rooms.iter().map(|r| r.id.to_string()).collect();
        assert_eq!(ids, ["1", "4", "5", "6"]);
        assert_eq!(catalog.find(&EntityId::Number(4)).map(|r| r.price), Some(175.0));
        assert!(catalog.notice.is_none());
    }

    #[tokio::test]
    async fn empty_store_serves_fallback_without_notice() {
        let store = crate::store::InMemoryStore::default();
        let catalog = load_catalog(&store).await;

        assert_eq!(catalog.rooms, fallback::rooms());
        assert!(catalog.notice.is_none());
        assert_eq!(catalog.find_by_title("Single Room").map(|r| r.price), Some(99.0));
    }
}
