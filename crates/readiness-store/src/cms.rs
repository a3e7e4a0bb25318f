//! HTTP CMS store.
//!
//! Reads whole collections from a headless CMS exposing
//! `GET {base_url}/collections/{collection}/items` and answering
//! `{ "items": [...] }`.

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::instrument;

use readiness_core::error::StoreError;
use readiness_core::traits::RecordStore;

/// Record store backed by a CMS HTTP API.
///
/// Requests are one-shot: no retry and no client-side timeout.
pub struct CmsStore {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl CmsStore {
    pub fn new(base_url: &str, api_key: Option<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.is_empty()),
            client,
        })
    }
}

#[derive(Deserialize)]
struct CollectionResponse {
    #[serde(default)]
    items: Vec<serde_json::Value>,
}

#[async_trait]
impl RecordStore for CmsStore {
    fn name(&self) -> &str {
        "cms"
    }

    #[instrument(skip(self))]
    async fn get_all(&self, collection: &str) -> anyhow::Result<Vec<serde_json::Value>> {
        let mut req = self
            .client
            .get(format!("{}/collections/{collection}/items", self.base_url))
            .header("accept", "application/json");

        if let Some(key) = &self.api_key {
            req = req.header("Authorization", format!("Bearer {key}"));
        }

        let response = req
            .send()
            .await
            .map_err(|e| StoreError::NetworkError(e.to_string()))?;

        let status = response.status().as_u16();
        if status == 404 {
            return Err(StoreError::CollectionNotFound(collection.to_string()).into());
        }
        if status == 401 || status == 403 {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::AuthenticationFailed(body).into());
        }
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::ApiError {
                status,
                message: body,
            }
            .into());
        }

        let body: CollectionResponse =
            response
                .json()
                .await
                .map_err(|e| StoreError::MalformedRecord {
                    collection: collection.to_string(),
                    message: format!("failed to parse response: {e}"),
                })?;

        tracing::debug!(count = body.items.len(), "fetched collection");
        Ok(body.items)
    }
}
