//! Store backed by a local TOML content pack.

use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;

use readiness_core::error::StoreError;
use readiness_core::parser::{parse_pack, ContentPack};
use readiness_core::traits::{RecordStore, QUESTIONS_COLLECTION, RESULTS_COLLECTION};

/// Serves the question and result collections from a parsed content pack.
pub struct PackStore {
    pack: ContentPack,
}

impl PackStore {
    pub fn new(pack: ContentPack) -> Self {
        Self { pack }
    }

    /// Parse the content pack at `path`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let pack = parse_pack(path)?;
        tracing::debug!(
            pack = %pack.id,
            questions = pack.questions.len(),
            results = pack.results.len(),
            "loaded content pack"
        );
        Ok(Self::new(pack))
    }

    pub fn pack(&self) -> &ContentPack {
        &self.pack
    }
}

#[async_trait]
impl RecordStore for PackStore {
    fn name(&self) -> &str {
        "pack"
    }

    async fn get_all(&self, collection: &str) -> anyhow::Result<Vec<serde_json::Value>> {
        let values = match collection {
            QUESTIONS_COLLECTION => self
                .pack
                .questions
                .iter()
                .map(serde_json::to_value)
                .collect::<Result<Vec<_>, _>>(),
            RESULTS_COLLECTION => self
                .pack
                .results
                .iter()
                .map(serde_json::to_value)
                .collect::<Result<Vec<_>, _>>(),
            other => return Err(StoreError::CollectionNotFound(other.to_string()).into()),
        };
        values.with_context(|| format!("failed to encode collection '{collection}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use readiness_core::parser::parse_pack_str;
    use readiness_core::traits::{fetch_questions, fetch_results};
    use std::path::PathBuf;

    const PACK: &str = r#"
[assessment]
id = "mini"
name = "Mini"

[[questions]]
id = "q1"
text = "Question one"
order = 1
category = "A"
mindset = true
options = ["No", "Hardly", "Maybe", "Mostly", "Yes"]

[[results]]
category = "A"
title = "You are A"
"#;

    fn store() -> PackStore {
        PackStore::new(parse_pack_str(PACK, &PathBuf::from("mini.toml")).unwrap())
    }

    #[tokio::test]
    async fn serves_questions_in_cms_shape() {
        let store = store();
        let raw = store.get_all(QUESTIONS_COLLECTION).await.unwrap();
        assert_eq!(raw[0]["_id"], "q1");
        assert_eq!(raw[0]["questionText"], "Question one");
        assert_eq!(raw[0]["isMindsetQuestion"], true);
        assert_eq!(raw[0]["option5Text"], "Yes");

        let questions = fetch_questions(&store).await.unwrap();
        assert_eq!(questions[0].category(), "A");
    }

    #[tokio::test]
    async fn serves_results() {
        let results = fetch_results(&store()).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].result_title.as_deref(), Some("You are A"));
    }

    #[tokio::test]
    async fn unknown_collection_is_not_found() {
        let err = store().get_all("members").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::CollectionNotFound(name)) if name == "members"
        ));
    }

    #[test]
    fn from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mini.toml");
        std::fs::write(&path, PACK).unwrap();
        let store = PackStore::from_path(&path).unwrap();
        assert_eq!(store.pack().name, "Mini");
        assert!(PackStore::from_path(&dir.path().join("missing.toml")).is_err());
    }
}
