//! Weighted category scoring and the mindset sub-score.
//!
//! Every question contributes `answer × weight` to its category; unanswered
//! questions contribute 0 but are still visited. Questions flagged as mindset
//! questions additionally feed a running mean.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::{AnswerRecord, Likert, Question, DEFAULT_CATEGORY};

/// Outcome of scoring one completed session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreCard {
    /// Winning category.
    pub category: String,
    /// Mean weighted value over mindset questions, 0 when there are none.
    pub mindset_score: f64,
    /// Accumulated score per category, in first-contribution order.
    pub category_scores: IndexMap<String, f64>,
}

/// Score a set of answers against the question metadata.
///
/// Pure and total: missing fields take neutral defaults and the function
/// never fails. Ties go to the category that was inserted first.
pub fn score(questions: &[Question], answers: &AnswerRecord) -> ScoreCard {
    let mut category_scores: IndexMap<String, f64> = IndexMap::new();
    let mut mindset_total = 0.0f64;
    let mut mindset_count = 0u32;

    for question in questions {
        let value = answers
            .get(&question.id)
            .map(|v| f64::from(v.value()))
            .unwrap_or(0.0);
        let contribution = value * question.weight();

        *category_scores
            .entry(question.category().to_string())
            .or_insert(0.0) += contribution;

        if question.is_mindset() {
            mindset_total += contribution;
            mindset_count += 1;
        }
    }

    let mindset_score = if mindset_count == 0 {
        0.0
    } else {
        mindset_total / f64::from(mindset_count)
    };

    ScoreCard {
        category: winning_category(&category_scores).to_string(),
        mindset_score,
        category_scores,
    }
}

/// Entry with the strictly greatest score; the first one wins a tie.
fn winning_category(scores: &IndexMap<String, f64>) -> &str {
    let mut best: Option<(&str, f64)> = None;
    for (category, &total) in scores {
        match best {
            Some((_, top)) if total <= top => {}
            _ => best = Some((category.as_str(), total)),
        }
    }
    best.map(|(c, _)| c).unwrap_or(DEFAULT_CATEGORY)
}

/// Qualitative band for a mindset score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MindsetLevel {
    Strong,
    Developing,
    NeedsWork,
}

impl MindsetLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 4.0 {
            MindsetLevel::Strong
        } else if score >= 3.0 {
            MindsetLevel::Developing
        } else {
            MindsetLevel::NeedsWork
        }
    }
}

impl fmt::Display for MindsetLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MindsetLevel::Strong => write!(f, "Strong"),
            MindsetLevel::Developing => write!(f, "Developing"),
            MindsetLevel::NeedsWork => write!(f, "Needs Work"),
        }
    }
}

/// Mindset score as a fraction of the scale maximum, clamped to [0, 1].
pub fn mindset_fraction(score: f64) -> f64 {
    if !score.is_finite() {
        return 0.0;
    }
    (score / f64::from(Likert::MAX)).clamp(0.0, 1.0)
}
