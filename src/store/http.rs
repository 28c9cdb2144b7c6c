use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde_json::Value;

use crate::models::EntityId;

use super::{Collection, Store, StoreError};

/// Client for a json-server style REST store (`/users`, `/rooms`, ...).
#[derive(Clone)]
pub struct HttpStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpStore {
    pub fn new(base_url: impl Into<String>) -> Result<Self, StoreError> {
        let client = reqwest::ClientBuilder::new()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        })
    }

    fn collection_url(&self, collection: Collection) -> String {
        format!("{}/{}", self.base_url, collection.path())
    }

    fn document_url(&self, collection: Collection, id: &EntityId) -> String {
        format!("{}/{}/{}", self.base_url, collection.path(), id)
    }
}

/// Maps a response about one document to its JSON body.
async fn document(collection: Collection, id: &EntityId, response: Response) -> Result<Value, StoreError> {
    match response.status() {
        StatusCode::NOT_FOUND => Err(StoreError::NotFound { collection, id: id.clone() }),
        status if !status.is_success() => Err(StoreError::Status { collection, status: status.as_u16() }),
        _ => Ok(response.json().await?),
    }
}

#[async_trait]
impl Store for HttpStore {
    async fn list(&self, collection: Collection, filter: &[(&str, &str)]) -> Result<Vec<Value>, StoreError> {
        let response = self.client
            .get(self.collection_url(collection))
            .query(filter)
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(Vec::new()),
            status if !status.is_success() => Err(StoreError::Status { collection, status: status.as_u16() }),
            _ => {
                let docs: Vec<Value> = response.json().await?;
                Ok(docs)
            }
        }
    }

    async fn get(&self, collection: Collection, id: &EntityId) -> Result<Value, StoreError> {
        let response = self.client
            .get(self.document_url(collection, id))
            .send()
            .await?;
        document(collection, id, response).await
    }

    async fn create(&self, collection: Collection, doc: Value) -> Result<Value, StoreError> {
        let response = self.client
            .post(self.collection_url(collection))
            .json(&doc)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status { collection, status: status.as_u16() });
        }
        Ok(response.json().await?)
    }

    async fn patch(&self, collection: Collection, id: &EntityId, fields: Value) -> Result<Value, StoreError> {
        let response = self.client
            .patch(self.document_url(collection, id))
            .json(&fields)
            .send()
            .await?;
        document(collection, id, response).await
    }

    async fn replace(&self, collection: Collection, id: &EntityId, doc: Value) -> Result<Value, StoreError> {
        let response = self.client
            .put(self.document_url(collection, id))
            .json(&doc)
            .send()
            .await?;
        document(collection, id, response).await
    }

    async fn delete(&self, collection: Collection, id: &EntityId) -> Result<(), StoreError> {
        let response = self.client
            .delete(self.document_url(collection, id))
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(StoreError::NotFound { collection, id: id.clone() }),
            status if !status.is_success() => Err(StoreError::Status { collection, status: status.as_u16() }),
            _ => Ok(()),
        }
    }
}
