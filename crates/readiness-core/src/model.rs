//! Core data model types for readiness.
//!
//! Questions and result records (de)serialize in the CMS record shape
//! (`_id`, `questionText`, `resultCategory`, ...). Every field other than the
//! id is optional; the accessor methods apply the neutral defaults the
//! scorer and the results view rely on.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::LikertError;

/// Category used when a question has no (or an empty) category label.
pub const DEFAULT_CATEGORY: &str = "general";

/// Number of answer options every question offers.
pub const OPTION_COUNT: usize = 5;

/// A single assessment question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Opaque record identity.
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "questionText", default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Ordering key; ascending, ties keep fetch order.
    #[serde(rename = "questionOrder", default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(rename = "questionCategory", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "questionWeight", default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(rename = "isMindsetQuestion", default, skip_serializing_if = "Option::is_none")]
    pub mindset: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option1_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option2_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option3_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option4_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option5_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_identifier: Option<String>,
}

impl Question {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn with_order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn mindset(mut self) -> Self {
        self.mindset = Some(true);
        self
    }

    pub fn with_options(mut self, labels: [&str; OPTION_COUNT]) -> Self {
        let [a, b, c, d, e] = labels.map(|l| Some(l.to_string()));
        self.option1_text = a;
        self.option2_text = b;
        self.option3_text = c;
        self.option4_text = d;
        self.option5_text = e;
        self
    }

    /// Display text, empty when the record carries none.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }

    /// Ordering key, 0 when missing.
    pub fn order(&self) -> i64 {
        self.order.unwrap_or(0)
    }

    /// Category label, [`DEFAULT_CATEGORY`] when missing or empty.
    pub fn category(&self) -> &str {
        match self.category.as_deref() {
            Some(c) if !c.is_empty() => c,
            _ => DEFAULT_CATEGORY,
        }
    }

    /// Weight multiplier. Missing, zero, or non-finite weights count as 1.
    pub fn weight(&self) -> f64 {
        match self.weight {
            Some(w) if w.is_finite() && w != 0.0 => w,
            _ => 1.0,
        }
    }

    pub fn is_mindset(&self) -> bool {
        self.mindset.unwrap_or(false)
    }

    /// The five Likert options, labelled "Option N" where the record has no text.
    pub fn options(&self) -> [AnswerOption; OPTION_COUNT] {
        let texts = [
            &self.option1_text,
            &self.option2_text,
            &self.option3_text,
            &self.option4_text,
            &self.option5_text,
        ];
        let mut n = 0u8;
        texts.map(|text| {
            n += 1;
            AnswerOption {
                value: Likert(n),
                label: text
                    .as_deref()
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Option {n}")),
            }
        })
    }
}

/// A selectable option of a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOption {
    pub value: Likert,
    pub label: String,
}

/// An answer value on the 1-5 Likert scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Likert(u8);

impl Likert {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self, LikertError> {
        Self::try_from(i64::from(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Likert {
    type Error = LikertError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Likert(value as u8))
        } else {
            Err(LikertError::OutOfRange(value))
        }
    }
}

impl From<Likert> for u8 {
    fn from(value: Likert) -> Self {
        value.0
    }
}

impl FromStr for Likert {
    type Err = LikertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let n: i64 = trimmed
            .parse()
            .map_err(|_| LikertError::NotANumber(trimmed.to_string()))?;
        Self::try_from(n)
    }
}

impl fmt::Display for Likert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Question id -> selected value, in the order questions were first answered.
///
/// Entries are added or overwritten, never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerRecord(IndexMap<String, Likert>);

impl AnswerRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or overwrite) the answer for a question.
    pub fn record(&mut self, question_id: impl Into<String>, value: Likert) {
        self.0.insert(question_id.into(), value);
    }

    pub fn get(&self, question_id: &str) -> Option<Likert> {
        self.0.get(question_id).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Likert)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<K: Into<String>> FromIterator<(K, Likert)> for AnswerRecord {
    fn from_iter<T: IntoIterator<Item = (K, Likert)>>(iter: T) -> Self {
        let mut record = AnswerRecord::new();
        for (k, v) in iter {
            record.record(k, v);
        }
        record
    }
}

/// A stored result narrative, keyed by category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guidance_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation_url: Option<String>,
}

impl ResultRecord {
    pub fn category(&self) -> Option<&str> {
        self.result_category.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn likert_accepts_only_one_to_five() {
        assert_eq!(Likert::new(1).unwrap().value(), 1);
        assert_eq!(Likert::new(5).unwrap().value(), 5);
        assert_eq!(Likert::new(0), Err(LikertError::OutOfRange(0)));
        assert_eq!(Likert::new(6), Err(LikertError::OutOfRange(6)));
        assert_eq!(" 3 ".parse::<Likert>().unwrap().value(), 3);
        assert!(matches!(
            "three".parse::<Likert>(),
            Err(LikertError::NotANumber(_))
        ));
    }

    #[test]
    fn likert_rejects_out_of_range_json() {
        assert!(serde_json::from_str::<Likert>("4").is_ok());
        assert!(serde_json::from_str::<Likert>("9").is_err());
    }

    #[test]
    fn question_defaults() {
        let q: Question = serde_json::from_str(r#"{"_id": "q1"}"#).unwrap();
        assert_eq!(q.order(), 0);
        assert_eq!(q.category(), DEFAULT_CATEGORY);
        assert_eq!(q.weight(), 1.0);
        assert!(!q.is_mindset());
        assert_eq!(q.text(), "");
    }

    #[test]
    fn empty_category_and_zero_weight_fall_back() {
        let q = Question::new("q", "text").with_category("").with_weight(0.0);
        assert_eq!(q.category(), "general");
        assert_eq!(q.weight(), 1.0);
    }

    #[test]
    fn question_reads_cms_shape() {
        let json = r#"{
            "_id": "abc",
            "questionText": "I enjoy debugging",
            "questionOrder": 3,
            "questionCategory": "Start Coding Now",
            "questionWeight": 2,
            "isMindsetQuestion": true,
            "option1Text": "Never",
            "option5Text": "Always",
            "_createdDate": "2025-01-01T00:00:00Z"
        }"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.id, "abc");
        assert_eq!(q.order(), 3);
        assert_eq!(q.category(), "Start Coding Now");
        assert_eq!(q.weight(), 2.0);
        assert!(q.is_mindset());

        let options = q.options();
        assert_eq!(options[0].label, "Never");
        assert_eq!(options[1].label, "Option 2");
        assert_eq!(options[4].label, "Always");
        assert_eq!(options[4].value.value(), 5);
    }

    #[test]
    fn answer_record_overwrites_in_place() {
        let mut answers = AnswerRecord::new();
        answers.record("a", Likert::new(2).unwrap());
        answers.record("b", Likert::new(3).unwrap());
        answers.record("a", Likert::new(5).unwrap());

        assert_eq!(answers.len(), 2);
        assert_eq!(answers.get("a").unwrap().value(), 5);
        let ids: Vec<&str> = answers.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["a", "b"]);

        let json = serde_json::to_string(&answers).unwrap();
        assert_eq!(json, r#"{"a":5,"b":3}"#);
    }

    #[test]
    fn result_record_reads_cms_shape() {
        let json = r#"{
            "_id": "r1",
            "resultCategory": "Learn Tech Thinking First",
            "resultTitle": "Think First",
            "recommendationUrl": "https://example.com"
        }"#;
        let r: ResultRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.category(), Some("Learn Tech Thinking First"));
        assert!(r.guidance_text.is_none());
    }
}
