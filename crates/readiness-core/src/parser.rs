//! TOML content pack parser.
//!
//! Loads assessment content packs (questions + result narratives) from TOML
//! files and directories, and validates them.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Question, ResultRecord, OPTION_COUNT};

/// A parsed content pack.
#[derive(Debug, Clone, Default)]
pub struct ContentPack {
    pub id: String,
    pub name: String,
    pub description: String,
    pub questions: Vec<Question>,
    pub results: Vec<ResultRecord>,
}

/// Intermediate TOML structure for parsing content pack files.
#[derive(Debug, Deserialize)]
struct TomlPackFile {
    assessment: TomlPackHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
    #[serde(default)]
    results: Vec<TomlResult>,
}

#[derive(Debug, Deserialize)]
struct TomlPackHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    text: String,
    #[serde(default)]
    order: Option<i64>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    weight: Option<f64>,
    #[serde(default)]
    mindset: bool,
    #[serde(default)]
    short_identifier: Option<String>,
    #[serde(default)]
    options: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TomlResult {
    #[serde(default)]
    id: Option<String>,
    category: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    short_description: Option<String>,
    #[serde(default)]
    guidance: Option<String>,
    #[serde(default)]
    recommendation_title: Option<String>,
    #[serde(default)]
    recommendation_url: Option<String>,
}

/// Parse a single TOML file into a `ContentPack`.
pub fn parse_pack(path: &Path) -> Result<ContentPack> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read content pack: {}", path.display()))?;

    parse_pack_str(&content, path)
}

/// Parse a TOML string into a `ContentPack` (useful for testing).
pub fn parse_pack_str(content: &str, source_path: &Path) -> Result<ContentPack> {
    let parsed: TomlPackFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(|q| {
            anyhow::ensure!(
                q.options.len() <= OPTION_COUNT,
                "question '{}' has {} options, at most {OPTION_COUNT} allowed",
                q.id,
                q.options.len()
            );
            let mut options = q.options.into_iter();
            let mut next = || options.next();
            Ok(Question {
                id: q.id,
                text: Some(q.text),
                order: q.order,
                category: q.category,
                weight: q.weight,
                mindset: Some(q.mindset),
                option1_text: next(),
                option2_text: next(),
                option3_text: next(),
                option4_text: next(),
                option5_text: next(),
                short_identifier: q.short_identifier,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let results = parsed
        .results
        .into_iter()
        .enumerate()
        .map(|(i, r)| ResultRecord {
            id: r.id.unwrap_or_else(|| format!("result-{}", i + 1)),
            result_category: Some(r.category),
            result_title: r.title,
            short_description: r.short_description,
            guidance_text: r.guidance,
            recommendation_title: r.recommendation_title,
            recommendation_url: r.recommendation_url,
        })
        .collect();

    Ok(ContentPack {
        id: parsed.assessment.id,
        name: parsed.assessment.name,
        description: parsed.assessment.description,
        questions,
        results,
    })
}

/// Recursively load all `.toml` content packs from a directory.
pub fn load_pack_directory(dir: &Path) -> Result<Vec<ContentPack>> {
    let mut packs = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            packs.extend(load_pack_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_pack(&path) {
                Ok(pack) => packs.push(pack),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(packs)
}

/// A warning from content pack validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question or result id (if applicable).
    pub record_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a content pack for common authoring issues.
pub fn validate_pack(pack: &ContentPack) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if pack.questions.is_empty() {
        warnings.push(ValidationWarning {
            record_id: None,
            message: "no questions; the quiz will show as unavailable".into(),
        });
    }

    let mut seen_ids = HashSet::new();
    for q in &pack.questions {
        if !seen_ids.insert(&q.id) {
            warnings.push(ValidationWarning {
                record_id: Some(q.id.clone()),
                message: format!("duplicate question ID: {}", q.id),
            });
        }
    }

    for q in &pack.questions {
        if q.text().trim().is_empty() {
            warnings.push(ValidationWarning {
                record_id: Some(q.id.clone()),
                message: "question text is empty".into(),
            });
        }
        if let Some(w) = q.weight {
            if !(w.is_finite() && w > 0.0) {
                warnings.push(ValidationWarning {
                    record_id: Some(q.id.clone()),
                    message: format!("weight {w} is not positive; scored as {}", q.weight()),
                });
            }
        }
    }

    // Shared ordering keys fall back to file order.
    let mut by_order: HashMap<i64, Vec<&str>> = HashMap::new();
    for q in &pack.questions {
        by_order.entry(q.order()).or_default().push(&q.id);
    }
    let mut shared: Vec<_> = by_order.into_iter().filter(|(_, ids)| ids.len() > 1).collect();
    shared.sort_by_key(|(order, _)| *order);
    for (order, ids) in shared {
        warnings.push(ValidationWarning {
            record_id: None,
            message: format!("order {order} shared by {}; file order decides", ids.join(", ")),
        });
    }

    if !pack.questions.is_empty() && !pack.questions.iter().any(Question::is_mindset) {
        warnings.push(ValidationWarning {
            record_id: None,
            message: "no mindset questions; mindset score will always be 0".into(),
        });
    }

    let mut seen_categories = HashSet::new();
    for r in &pack.results {
        let Some(category) = r.category() else {
            continue;
        };
        if !seen_categories.insert(category) {
            warnings.push(ValidationWarning {
                record_id: Some(r.id.clone()),
                message: format!("duplicate result category '{category}'; the first one wins"),
            });
        }
    }

    let mut question_categories: Vec<&str> = Vec::new();
    for q in &pack.questions {
        if !question_categories.contains(&q.category()) {
            question_categories.push(q.category());
        }
    }
    for category in &question_categories {
        if !seen_categories.contains(category) {
            warnings.push(ValidationWarning {
                record_id: None,
                message: format!(
                    "no result for category '{category}'; the fallback page will be shown"
                ),
            });
        }
    }
    for r in &pack.results {
        if let Some(category) = r.category() {
            if !question_categories.contains(&category) {
                warnings.push(ValidationWarning {
                    record_id: Some(r.id.clone()),
                    message: format!("result category '{category}' is never scored"),
                });
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[assessment]
id = "coding-readiness"
name = "Coding Readiness"
description = "Are you ready to start coding?"

[[questions]]
id = "tinker"
text = "I take things apart to see how they work."
order = 1
category = "Start Coding Now"
options = ["Never", "Rarely", "Sometimes", "Often", "Always"]

[[questions]]
id = "frustration"
text = "I stay calm when something does not work the first time."
order = 2
category = "Learn Tech Thinking First"
weight = 2.0
mindset = true

[[results]]
category = "Start Coding Now"
title = "Start Coding Now"
guidance = "Pick a language and build something small."
recommendation_title = "Intro course"
recommendation_url = "https://example.com/intro"

[[results]]
id = "think"
category = "Learn Tech Thinking First"
title = "Learn Tech Thinking First"
"#;

    #[test]
    fn parse_valid_toml() {
        let pack = parse_pack_str(VALID_TOML, &PathBuf::from("pack.toml")).unwrap();
        assert_eq!(pack.id, "coding-readiness");
        assert_eq!(pack.questions.len(), 2);
        assert_eq!(pack.results.len(), 2);

        let tinker = &pack.questions[0];
        assert_eq!(tinker.options()[0].label, "Never");
        assert_eq!(tinker.options()[4].label, "Always");
        assert!(!tinker.is_mindset());

        let frustration = &pack.questions[1];
        assert_eq!(frustration.weight(), 2.0);
        assert!(frustration.is_mindset());
        assert_eq!(frustration.options()[2].label, "Option 3");

        assert_eq!(pack.results[0].id, "result-1");
        assert_eq!(pack.results[1].id, "think");
    }

    #[test]
    fn valid_pack_has_no_warnings() {
        let pack = parse_pack_str(VALID_TOML, &PathBuf::from("pack.toml")).unwrap();
        let warnings = validate_pack(&pack);
        assert!(warnings.is_empty(), "unexpected: {warnings:?}");
    }

    #[test]
    fn too_many_options_is_an_error() {
        let toml = r#"
[assessment]
id = "x"
name = "X"

[[questions]]
id = "q"
text = "q"
options = ["1", "2", "3", "4", "5", "6"]
"#;
        let err = parse_pack_str(toml, &PathBuf::from("x.toml")).unwrap_err();
        assert!(err.to_string().contains("at most 5"));
    }

    #[test]
    fn validate_flags_authoring_issues() {
        let toml = r#"
[assessment]
id = "messy"
name = "Messy"

[[questions]]
id = "same"
text = "First"
order = 1
category = "A"

[[questions]]
id = "same"
text = "  "
order = 1
category = "B"
weight = -1.0

[[results]]
category = "A"

[[results]]
category = "A"

[[results]]
category = "Z"
"#;
        let pack = parse_pack_str(toml, &PathBuf::from("messy.toml")).unwrap();
        let messages: Vec<String> = validate_pack(&pack).into_iter().map(|w| w.message).collect();
        let has = |needle: &str| messages.iter().any(|m| m.contains(needle));

        assert!(has("duplicate question ID"));
        assert!(has("question text is empty"));
        assert!(has("not positive"));
        assert!(has("order 1 shared"));
        assert!(has("no mindset questions"));
        assert!(has("duplicate result category 'A'"));
        assert!(has("no result for category 'B'"));
        assert!(has("'Z' is never scored"));
    }

    #[test]
    fn empty_pack_warns() {
        let toml = "[assessment]\nid = \"e\"\nname = \"Empty\"\n";
        let pack = parse_pack_str(toml, &PathBuf::from("e.toml")).unwrap();
        let warnings = validate_pack(&pack);
        assert!(warnings.iter().any(|w| w.message.contains("no questions")));
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        assert!(parse_pack_str(bad, &PathBuf::from("bad.toml")).is_err());
    }

    #[test]
    fn load_directory_skips_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("good.toml"), VALID_TOML).unwrap();
        std::fs::write(dir.path().join("bad.toml"), "not = [toml").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let packs = load_pack_directory(dir.path()).unwrap();
        assert_eq!(packs.len(), 1);
        assert_eq!(packs[0].name, "Coding Readiness");
    }
}
