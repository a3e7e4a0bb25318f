//! In-memory store for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use anyhow::Context;
use async_trait::async_trait;
use serde::Serialize;

use readiness_core::model::{Question, ResultRecord};
use readiness_core::traits::{RecordStore, QUESTIONS_COLLECTION, RESULTS_COLLECTION};

/// A record store backed by in-memory collections.
///
/// Unknown collections read as empty, like an empty CMS collection.
pub struct MemoryStore {
    collections: HashMap<String, Vec<serde_json::Value>>,
    /// When set, every fetch fails with this message.
    failure: Option<String>,
    call_count: AtomicU32,
    last_collection: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            collections: HashMap::new(),
            failure: None,
            call_count: AtomicU32::new(0),
            last_collection: Mutex::new(None),
        }
    }

    /// A store holding the question and result collections.
    pub fn with_records(questions: &[Question], results: &[ResultRecord]) -> anyhow::Result<Self> {
        Self::new()
            .with_collection(QUESTIONS_COLLECTION, questions)?
            .with_collection(RESULTS_COLLECTION, results)
    }

    /// Add (or replace) a collection of serializable records.
    pub fn with_collection<T: Serialize>(
        mut self,
        name: &str,
        records: &[T],
    ) -> anyhow::Result<Self> {
        let values = records
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("failed to serialize collection '{name}'"))?;
        self.collections.insert(name.to_string(), values);
        Ok(self)
    }

    /// Add (or replace) a collection of raw JSON records.
    pub fn with_raw_collection(mut self, name: &str, values: Vec<serde_json::Value>) -> Self {
        self.collections.insert(name.to_string(), values);
        self
    }

    /// A store whose every fetch fails.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new()
        }
    }

    /// Get the number of fetches made against this store.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Get the collection named in the last fetch.
    pub fn last_collection(&self) -> Option<String> {
        self.last_collection.lock().ok().and_then(|guard| guard.clone())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn get_all(&self, collection: &str) -> anyhow::Result<Vec<serde_json::Value>> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut last) = self.last_collection.lock() {
            *last = Some(collection.to_string());
        }

        if let Some(message) = &self.failure {
            anyhow::bail!("{message}");
        }
        Ok(self.collections.get(collection).cloned().unwrap_or_default())
    }
}
