//! The handoff from a completed quiz to the results view.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::AnswerRecord;
use crate::scoring::ScoreCard;

/// Transient state carried from the quiz to the results view.
///
/// Only ever produced by completing a flow; a results view without one has
/// nothing to show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsContext {
    /// Nil when the handoff was produced without a session.
    #[serde(default)]
    pub session_id: Uuid,
    #[serde(default = "Utc::now")]
    pub completed_at: DateTime<Utc>,
    /// Winning category, used to look up the result narrative.
    pub category: String,
    pub mindset_score: f64,
    #[serde(default)]
    pub category_scores: IndexMap<String, f64>,
    pub answers: AnswerRecord,
}

impl ResultsContext {
    pub fn new(card: ScoreCard, answers: AnswerRecord) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            completed_at: Utc::now(),
            category: card.category,
            mindset_score: card.mindset_score,
            category_scores: card.category_scores,
            answers,
        }
    }

    /// Save the context as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize outcome")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write outcome to {}", path.display()))?;
        Ok(())
    }

    /// Load a context from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read outcome from {}", path.display()))?;
        let context: ResultsContext =
            serde_json::from_str(&content).context("failed to parse outcome JSON")?;
        Ok(context)
    }
}
