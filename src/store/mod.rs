//! The external REST data store.
//!
//! Everything the service persists lives behind [`Store`]: four collections
//! of JSON documents with list-by-filter, create, partial update, full
//! replace and delete. [`HttpStore`] speaks to a json-server style API;
//! [`InMemoryStore`] stands in when no store URL is configured.

mod http;
mod memory;

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::models::EntityId;

pub use http::HttpStore;
pub use memory::InMemoryStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Rooms,
    Bookings,
    Messages,
}

impl Collection {
    pub fn path(self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Rooms => "rooms",
            Collection::Bookings => "bookings",
            Collection::Messages => "messages",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("store answered {status} on /{collection}")]
    Status { collection: Collection, status: u16 },
    #[error("no {collection} document with id {id}")]
    NotFound { collection: Collection, id: EntityId },
    #[error("malformed {collection} document: {source}")]
    Decode {
        collection: Collection,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not encode {collection} document: {source}")]
    Encode {
        collection: Collection,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// One external store. A list that finds nothing is `Ok(vec![])`, even when
/// the store answers 404 for an empty collection.
#[async_trait]
pub trait Store: Send + Sync {
    async fn list(&self, collection: Collection, filter: &[(&str, &str)]) -> Result<Vec<Value>, StoreError>;

    async fn get(&self, collection: Collection, id: &EntityId) -> Result<Value, StoreError>;

    async fn create(&self, collection: Collection, doc: Value) -> Result<Value, StoreError>;

    /// Merges the given fields into the document.
    async fn patch(&self, collection: Collection, id: &EntityId, fields: Value) -> Result<Value, StoreError>;

    /// Overwrites the whole document.
    async fn replace(&self, collection: Collection, id: &EntityId, doc: Value) -> Result<Value, StoreError>;

    async fn delete(&self, collection: Collection, id: &EntityId) -> Result<(), StoreError>;
}

pub type SharedStore = Arc<dyn Store>;

fn decode<T: DeserializeOwned>(collection: Collection, doc: Value) -> Result<T, StoreError> {
    serde_json::from_value(doc).map_err(|source| StoreError::Decode { collection, source })
}

pub(crate) fn decode_or_skip<T: DeserializeOwned>(collection: Collection, doc: Value) -> Option<T> {
    let id = doc.get("id").cloned().unwrap_or(Value::Null);
    match decode(collection, doc) {
        Ok(item) => Some(item),
        Err(err) => {
            tracing::warn!(%collection, %id, error = %err, "skipping unreadable document");
            None
        }
    }
}

fn encode<T: Serialize + ?Sized>(collection: Collection, doc: &T) -> Result<Value, StoreError> {
    serde_json::to_value(doc).map_err(|source| StoreError::Encode { collection, source })
}

/// Typed access on top of the raw document calls.
impl<'a> dyn Store + 'a {
    /// Documents that do not decode are logged and left out; only a failed
    /// store call fails the list.
    pub async fn fetch_all<T: DeserializeOwned>(
        &self,
        collection: Collection,
        filter: &[(&str, &str)],
    ) -> Result<Vec<T>, StoreError> {
        let docs = self.list(collection, filter).await?;
        Ok(docs.into_iter().filter_map(|doc| decode_or_skip(collection, doc)).collect())
    }

    pub async fn fetch<T: DeserializeOwned>(&self, collection: Collection, id: &EntityId) -> Result<T, StoreError> {
        decode(collection, self.get(collection, id).await?)
    }

    pub async fn insert<T, R>(&self, collection: Collection, doc: &T) -> Result<R, StoreError>
    where
        T: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
    {
        let doc = encode(collection, doc)?;
        decode(collection, self.create(collection, doc).await?)
    }

    pub async fn update<T, R>(&self, collection: Collection, id: &EntityId, fields: &T) -> Result<R, StoreError>
    where
        T: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
    {
        let fields = encode(collection, fields)?;
        decode(collection, self.patch(collection, id, fields).await?)
    }

    pub async fn overwrite<T, R>(&self, collection: Collection, id: &EntityId, doc: &T) -> Result<R, StoreError>
    where
        T: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
    {
        let doc = encode(collection, doc)?;
        decode(collection, self.replace(collection, id, doc).await?)
    }
}
