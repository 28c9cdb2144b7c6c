use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

use async_trait::async_trait;
use serde_json::Value;

use crate::models::EntityId;

use super::{Collection, Store, StoreError};

/// Process-local store with json-server semantics: documents without an id
/// are numbered, filters match on the text form of a field, patches merge
/// top-level fields.
#[derive(Default)]
pub struct InMemoryStore {
    collections: Mutex<HashMap<Collection, Vec<Value>>>,
}

impl InMemoryStore {
    /// Loads documents as they are, numbering the ones without an id.
    pub fn seed(&self, collection: Collection, docs: impl IntoIterator<Item = Value>) {
        let mut collections = self.lock();
        let docs_in = collections.entry(collection).or_default();
        for mut doc in docs {
            assign_id(docs_in, &mut doc);
            docs_in.push(doc);
        }
    }

    pub fn documents(&self, collection: Collection) -> Vec<Value> {
        self.lock().get(&collection).cloned().unwrap_or_default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Collection, Vec<Value>>> {
        self.collections.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn has_id(doc: &Value, id: &EntityId) -> bool {
    doc.get("id").and_then(text_of).is_some_and(|doc_id| doc_id == id.to_string())
}

fn matches(doc: &Value, filter: &[(&str, &str)]) -> bool {
    filter.iter().all(|(field, wanted)| {
        doc.get(*field).and_then(text_of).is_some_and(|have| have == *wanted)
    })
}

fn assign_id(docs: &[Value], doc: &mut Value) {
    let Value::Object(fields) = doc else {
        return;
    };
    if fields.get("id").is_some_and(|id| !id.is_null()) {
        return;
    }

    let next = docs
        .iter()
        .filter_map(|doc| doc.get("id").and_then(Value::as_i64))
        .max()
        .unwrap_or(0)
        + 1;
    fields.insert("id".to_owned(), Value::from(next));
}

#[async_trait]
impl Store for InMemoryStore {
    async fn list(&self, collection: Collection, filter: &[(&str, &str)]) -> Result<Vec<Value>, StoreError> {
        Ok(self.lock()
            .get(&collection)
            .map(|docs| docs.iter().filter(|doc| matches(doc, filter)).cloned().collect())
            .unwrap_or_default())
    }

    async fn get(&self, collection: Collection, id: &EntityId) -> Result<Value, StoreError> {
        self.lock()
            .get(&collection)
            .and_then(|docs| docs.iter().find(|doc| has_id(doc, id)).cloned())
            .ok_or_else(|| StoreError::NotFound { collection, id: id.clone() })
    }

    async fn create(&self, collection: Collection, mut doc: Value) -> Result<Value, StoreError> {
        let mut collections = self.lock();
        let docs = collections.entry(collection).or_default();

        if let Some(id) = doc.get("id").filter(|id| !id.is_null()).and_then(text_of) {
            if docs.iter().any(|existing| existing.get("id").and_then(text_of).as_deref() == Some(id.as_str())) {
                return Err(StoreError::Status { collection, status: 409 });
            }
        }

        assign_id(docs, &mut doc);
        docs.push(doc.clone());
        Ok(doc)
    }

    async fn patch(&self, collection: Collection, id: &EntityId, fields: Value) -> Result<Value, StoreError> {
        let mut collections = self.lock();
        let doc = collections
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|doc| has_id(doc, id)))
            .ok_or_else(|| StoreError::NotFound { collection, id: id.clone() })?;

        if let (Value::Object(target), Value::Object(fields)) = (&mut *doc, fields) {
            for (key, value) in fields {
                if key != "id" {
                    target.insert(key, value);
                }
            }
        }
        Ok(doc.clone())
    }

    async fn replace(&self, collection: Collection, id: &EntityId, mut doc: Value) -> Result<Value, StoreError> {
        let mut collections = self.lock();
        let slot = collections
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|doc| has_id(doc, id)))
            .ok_or_else(|| StoreError::NotFound { collection, id: id.clone() })?;

        if let Value::Object(fields) = &mut doc {
            let id = slot.get("id").cloned().unwrap_or(Value::Null);
            fields.insert("id".to_owned(), id);
        }
        *slot = doc.clone();
        Ok(doc)
    }

    async fn delete(&self, collection: Collection, id: &EntityId) -> Result<(), StoreError> {
        let mut collections = self.lock();
        let docs = collections.entry(collection).or_default();
        let before = docs.len();
        docs.retain(|doc| !has_id(doc, id));

        if docs.len() == before {
            return Err(StoreError::NotFound { collection, id: id.clone() });
        }
        Ok(())
    }
}
