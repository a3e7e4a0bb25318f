//! The `readiness score` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use readiness_core::flow::{FlowState, QuizFlow};
use readiness_core::model::AnswerRecord;
use readiness_core::outcome::ResultsContext;
use readiness_core::scoring::{score, MindsetLevel};

use super::open_store;
use crate::StoreArgs;

pub async fn execute(answers_path: PathBuf, source: StoreArgs, format: String) -> Result<()> {
    let content = std::fs::read_to_string(&answers_path)
        .with_context(|| format!("failed to read answers: {}", answers_path.display()))?;
    let answers: AnswerRecord = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse answers: {}", answers_path.display()))?;

    let (store, _) = open_store(&source)?;
    let Some(store) = store else {
        println!("No questions available.");
        return Ok(());
    };
    let flow = QuizFlow::load(store.as_ref()).await;
    if flow.state() == FlowState::Unavailable {
        println!("No questions available.");
        return Ok(());
    }

    let questions = flow.questions();
    let mut answered = 0;
    for (id, _) in answers.iter() {
        if questions.iter().any(|q| q.id == id) {
            answered += 1;
        } else {
            tracing::warn!("answer for unknown question '{id}' ignored");
        }
    }

    let card = score(questions, &answers);

    match format.as_str() {
        "json" => {
            let context = ResultsContext::new(card, answers);
            println!("{}", serde_json::to_string_pretty(&context)?);
        }
        "text" => print_summary(&card, answered, questions.len()),
        other => anyhow::bail!("unknown format '{other}'; expected text or json"),
    }

    Ok(())
}

fn print_summary(card: &readiness_core::scoring::ScoreCard, answered: usize, total: usize) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Category", "Score", ""]);

    for (category, value) in &card.category_scores {
        let marker = if *category == card.category {
            "winner"
        } else {
            ""
        };
        table.add_row(vec![
            Cell::new(category),
            Cell::new(format!("{value:.1}")),
            Cell::new(marker),
        ]);
    }

    println!("{table}");
    println!("Answered: {answered}/{total}");
    println!("Category: {}", card.category);
    println!(
        "Mindset: {:.2} ({})",
        card.mindset_score,
        MindsetLevel::from_score(card.mindset_score)
    );
}
