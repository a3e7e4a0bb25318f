//! Record store trait.
//!
//! The CMS is an external collaborator: a key-value record store reachable
//! by collection name. Implementations live in `readiness-store`.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::StoreError;
use crate::model::{Question, ResultRecord};

/// Collection holding the assessment questions.
pub const QUESTIONS_COLLECTION: &str = "quizquestions";

/// Collection holding the result narratives.
pub const RESULTS_COLLECTION: &str = "quizresults";

/// Trait for backends that return every record of a named collection.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Human-readable store name (e.g. "cms").
    fn name(&self) -> &str;

    /// Fetch all records of a collection. No filtering or pagination.
    async fn get_all(&self, collection: &str) -> anyhow::Result<Vec<serde_json::Value>>;
}

/// Fetch a collection and decode every record as `T`.
///
/// One undecodable record fails the whole fetch.
pub async fn get_all_typed<T: DeserializeOwned>(
    store: &dyn RecordStore,
    collection: &str,
) -> anyhow::Result<Vec<T>> {
    let raw = store.get_all(collection).await?;
    raw.into_iter()
        .map(|value| {
            serde_json::from_value(value).map_err(|e| {
                StoreError::MalformedRecord {
                    collection: collection.to_string(),
                    message: e.to_string(),
                }
                .into()
            })
        })
        .collect()
}

pub async fn fetch_questions(store: &dyn RecordStore) -> anyhow::Result<Vec<Question>> {
    get_all_typed(store, QUESTIONS_COLLECTION).await
}

pub async fn fetch_results(store: &dyn RecordStore) -> anyhow::Result<Vec<ResultRecord>> {
    get_all_typed(store, RESULTS_COLLECTION).await
}
