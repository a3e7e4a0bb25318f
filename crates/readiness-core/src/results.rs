//! Result lookup and the results view.
//!
//! The winning category is matched against the result collection by exact
//! string comparison; the first match wins. A missing match or a failed
//! fetch renders the generic fallback texts instead of failing.

use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::model::ResultRecord;
use crate::outcome::ResultsContext;
use crate::scoring::{mindset_fraction, MindsetLevel};
use crate::traits::{fetch_results, RecordStore};

pub const FALLBACK_TITLE: &str = "Results Ready";
pub const FALLBACK_DESCRIPTION: &str = "Your assessment has been completed.";
pub const FALLBACK_GUIDANCE: &str =
    "Based on your responses, we have identified your current readiness level.";

pub const NO_RESULTS_HEADING: &str = "No Results Available";
pub const NO_RESULTS_MESSAGE: &str = "Please complete the assessment first.";
pub const NO_RESULTS_ACTION: &str = "Take Assessment";

/// First record whose category equals `category` exactly.
pub fn find_result<'a>(records: &'a [ResultRecord], category: &str) -> Option<&'a ResultRecord> {
    records.iter().find(|r| r.category() == Some(category))
}

/// Fetch the result collection and pick the record for `category`.
///
/// Fetch failures are logged and treated like a missing match.
pub async fn lookup_result(store: &dyn RecordStore, category: &str) -> Option<ResultRecord> {
    let records = match fetch_results(store).await {
        Ok(records) => records,
        Err(e) => {
            error!("error loading results from '{}': {e:#}", store.name());
            return None;
        }
    };
    let found = find_result(&records, category).cloned();
    if found.is_none() {
        warn!("no result record for category '{category}'");
    }
    found
}

/// A recommended next step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub url: Option<String>,
}

/// Everything the results screen shows for a completed session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultPage {
    pub category: String,
    pub title: String,
    pub short_description: String,
    pub guidance: String,
    pub recommendation: Option<Recommendation>,
    pub mindset_score: f64,
    pub mindset_level: MindsetLevel,
    /// Mindset score as a fraction of the scale, for a progress bar.
    pub mindset_fraction: f64,
    /// Whether a stored narrative matched the category.
    pub matched: bool,
}

impl ResultPage {
    pub fn compose(context: &ResultsContext, record: Option<&ResultRecord>) -> Self {
        let text = |field: Option<&String>, fallback: &str| {
            field
                .filter(|s| !s.is_empty())
                .cloned()
                .unwrap_or_else(|| fallback.to_string())
        };
        let recommendation = record.and_then(|r| {
            r.recommendation_title
                .as_ref()
                .filter(|t| !t.is_empty())
                .map(|title| Recommendation {
                    title: title.clone(),
                    url: r.recommendation_url.clone().filter(|u| !u.is_empty()),
                })
        });

        Self {
            category: context.category.clone(),
            title: text(record.and_then(|r| r.result_title.as_ref()), FALLBACK_TITLE),
            short_description: text(
                record.and_then(|r| r.short_description.as_ref()),
                FALLBACK_DESCRIPTION,
            ),
            guidance: text(record.and_then(|r| r.guidance_text.as_ref()), FALLBACK_GUIDANCE),
            recommendation,
            mindset_score: context.mindset_score,
            mindset_level: MindsetLevel::from_score(context.mindset_score),
            mindset_fraction: mindset_fraction(context.mindset_score),
            matched: record.is_some(),
        }
    }
}

/// What the results screen renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ResultsView {
    /// Reached without completing the quiz: prompt to take it first.
    NoContext,
    Ready(ResultPage),
}

/// A handoff only counts when it names a category.
fn with_category(context: Option<&ResultsContext>) -> Option<&ResultsContext> {
    context.filter(|c| !c.category.is_empty())
}

impl ResultsView {
    /// Build the view for an optional handoff.
    ///
    /// Without a context, or with an empty category, nothing is fetched.
    pub async fn resolve(store: &dyn RecordStore, context: Option<&ResultsContext>) -> Self {
        let Some(context) = with_category(context) else {
            return ResultsView::NoContext;
        };
        let record = lookup_result(store, &context.category).await;
        ResultsView::Ready(ResultPage::compose(context, record.as_ref()))
    }

    /// Build the view from an already looked-up record.
    pub fn compose(context: Option<&ResultsContext>, record: Option<&ResultRecord>) -> Self {
        match with_category(context) {
            Some(context) => ResultsView::Ready(ResultPage::compose(context, record)),
            None => ResultsView::NoContext,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AnswerRecord;
    use crate::scoring::ScoreCard;
    use crate::traits::RESULTS_COLLECTION;
    use async_trait::async_trait;
    use indexmap::IndexMap;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct ResultsOnly {
        items: Vec<serde_json::Value>,
        fail: bool,
        calls: AtomicU32,
    }

    impl ResultsOnly {
        fn new(items: Vec<serde_json::Value>) -> Self {
            Self {
                items,
                fail: false,
                calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl RecordStore for ResultsOnly {
        fn name(&self) -> &str {
            "results-only"
        }

        async fn get_all(&self, collection: &str) -> anyhow::Result<Vec<serde_json::Value>> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            if self.fail || collection != RESULTS_COLLECTION {
                anyhow::bail!("unavailable");
            }
            Ok(self.items.clone())
        }
    }

    fn record(id: &str, category: &str, title: &str) -> ResultRecord {
        ResultRecord {
            id: id.into(),
            result_category: Some(category.into()),
            result_title: Some(title.into()),
            ..Default::default()
        }
    }

    fn context(category: &str, mindset: f64) -> ResultsContext {
        ResultsContext::new(
            ScoreCard {
                category: category.into(),
                mindset_score: mindset,
                category_scores: IndexMap::new(),
            },
            AnswerRecord::new(),
        )
    }

    #[test]
    fn first_match_wins() {
        let records = vec![
            record("1", "Other", "Other"),
            record("2", "Start", "First"),
            record("3", "Start", "Second"),
        ];
        assert_eq!(find_result(&records, "Start").unwrap().id, "2");
    }

    #[test]
    fn match_is_exact() {
        let records = vec![record("1", "Start Coding Now", "x")];
        assert!(find_result(&records, "start coding now").is_none());
        assert!(find_result(&records, "Start Coding").is_none());
    }

    #[test]
    fn compose_uses_fallbacks_without_record() {
        let page = ResultPage::compose(&context("B", 4.5), None);
        assert_eq!(page.title, FALLBACK_TITLE);
        assert_eq!(page.short_description, FALLBACK_DESCRIPTION);
        assert_eq!(page.guidance, FALLBACK_GUIDANCE);
        assert!(page.recommendation.is_none());
        assert_eq!(page.mindset_level, MindsetLevel::Strong);
        assert_eq!(page.mindset_fraction, 0.9);
        assert!(!page.matched);
    }

    #[test]
    fn recommendation_needs_a_title() {
        let mut r = record("1", "B", "Bee");
        r.recommendation_url = Some("https://example.com".into());
        let page = ResultPage::compose(&context("B", 1.0), Some(&r));
        assert!(page.recommendation.is_none());

        r.recommendation_title = Some("Read this".into());
        let page = ResultPage::compose(&context("B", 1.0), Some(&r));
        let rec = page.recommendation.unwrap();
        assert_eq!(rec.title, "Read this");
        assert_eq!(rec.url.as_deref(), Some("https://example.com"));
        assert_eq!(page.title, "Bee");
        assert_eq!(page.guidance, FALLBACK_GUIDANCE);
    }

    #[tokio::test]
    async fn resolve_without_context_fetches_nothing() {
        let store = ResultsOnly::new(vec![]);
        let view = ResultsView::resolve(&store, None).await;
        assert_eq!(view, ResultsView::NoContext);
        assert_eq!(store.calls.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn resolve_empty_category_is_no_context() {
        let store = ResultsOnly::new(vec![serde_json::json!({
            "_id": "r1",
            "resultCategory": "",
            "resultTitle": "Blank"
        })]);
        let view = ResultsView::resolve(&store, Some(&context("", 4.0))).await;
        assert_eq!(view, ResultsView::NoContext);
        assert_eq!(store.calls.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn compose_without_record_falls_back() {
        assert_eq!(
            ResultsView::compose(Some(&context("", 2.0)), None),
            ResultsView::NoContext
        );
        let ResultsView::Ready(page) = ResultsView::compose(Some(&context("B", 2.0)), None) else {
            panic!("expected a page");
        };
        assert_eq!(page.title, FALLBACK_TITLE);
        assert!(!page.matched);
    }

    #[tokio::test]
    async fn resolve_matches_category() {
        let store = ResultsOnly::new(vec![serde_json::json!({
            "_id": "r1",
            "resultCategory": "B",
            "resultTitle": "You are B",
            "guidanceText": "Do B things."
        })]);
        let view = ResultsView::resolve(&store, Some(&context("B", 3.0))).await;
        let ResultsView::Ready(page) = view else {
            panic!("expected a page");
        };
        assert!(page.matched);
        assert_eq!(page.title, "You are B");
        assert_eq!(page.guidance, "Do B things.");
        assert_eq!(page.mindset_level, MindsetLevel::Developing);
    }

    #[tokio::test]
    async fn resolve_survives_fetch_failure() {
        let mut store = ResultsOnly::new(vec![]);
        store.fail = true;
        let view = ResultsView::resolve(&store, Some(&context("B", 0.0))).await;
        let ResultsView::Ready(page) = view else {
            panic!("expected a page");
        };
        assert!(!page.matched);
        assert_eq!(page.title, FALLBACK_TITLE);
        assert_eq!(store.calls.load(Ordering::Relaxed), 1);
    }
}
