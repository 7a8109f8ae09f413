//! HTTP client for the hosted record-storage API.
//!
//! The record store exposes one REST collection per entity. Every call is
//! issued exactly once per user action; retries are the caller's decision.

use std::time::Duration;

use log::debug;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::StoreError;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Thin typed wrapper over the record-store REST endpoints, shared by the
/// remote repositories of all four entities.
#[derive(Clone)]
pub struct RecordClient {
    client: Client,
    base_url: String,
}

impl RecordClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;
        Ok(RecordClient {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/{}", self.base_url, collection)
    }

    fn record_url(&self, collection: &str, id: i64) -> String {
        format!("{}/{}/{}", self.base_url, collection, id)
    }

    /// Lists a collection, optionally narrowed by exact-match query filters.
    pub async fn list<T: DeserializeOwned>(
        &self,
        collection: &str,
        filters: &[(&str, String)],
    ) -> Result<Vec<T>, StoreError> {
        debug!("record store: list {collection} filters={filters:?}");
        let response = self
            .client
            .get(self.collection_url(collection))
            .query(filters)
            .send()
            .await?;
        Self::ensure_success(collection, &response)?;
        Ok(response.json().await?)
    }

    /// Fetches one record; `None` when the store reports it missing.
    pub async fn get<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: i64,
    ) -> Result<Option<T>, StoreError> {
        let response = self
            .client
            .get(self.record_url(collection, id))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::ensure_success(collection, &response)?;
        Ok(Some(response.json().await?))
    }

    /// Creates a record; the store assigns the id and echoes the full record.
    pub async fn create<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        collection: &str,
        body: &B,
    ) -> Result<T, StoreError> {
        debug!("record store: create in {collection}");
        let response = self
            .client
            .post(self.collection_url(collection))
            .json(body)
            .send()
            .await?;
        Self::ensure_success(collection, &response)?;
        Ok(response.json().await?)
    }

    /// Applies a partial update; `None` when the record is missing.
    pub async fn update<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        collection: &str,
        id: i64,
        body: &B,
    ) -> Result<Option<T>, StoreError> {
        debug!("record store: update {collection}/{id}");
        let response = self
            .client
            .patch(self.record_url(collection, id))
            .json(body)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::ensure_success(collection, &response)?;
        Ok(Some(response.json().await?))
    }

    /// Deletes a record; `false` when the store reports it missing.
    pub async fn delete(&self, collection: &str, id: i64) -> Result<bool, StoreError> {
        debug!("record store: delete {collection}/{id}");
        let response = self
            .client
            .delete(self.record_url(collection, id))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        Self::ensure_success(collection, &response)?;
        Ok(true)
    }

    fn ensure_success(
        collection: &str,
        response: &reqwest::Response,
    ) -> Result<(), StoreError> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(StoreError::Api(format!(
                "{} request failed with status {}",
                collection,
                response.status()
            )))
        }
    }
}
