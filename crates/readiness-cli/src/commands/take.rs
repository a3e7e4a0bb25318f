//! The `readiness take` command.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;

use readiness_core::flow::{Advance, FlowState, QuizFlow};
use readiness_core::model::Likert;
use readiness_core::outcome::ResultsContext;
use readiness_core::results::ResultsView;
use readiness_report::text::render_text;

use super::open_store;
use crate::StoreArgs;

pub async fn execute(source: StoreArgs, output: Option<PathBuf>) -> Result<()> {
    let (store, config) = open_store(&source)?;
    let Some(store) = store else {
        println!("No questions available.");
        return Ok(());
    };
    let mut flow = QuizFlow::load(store.as_ref()).await;

    if flow.state() == FlowState::Unavailable {
        println!("No questions available.");
        return Ok(());
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let Some(context) = run_session(&mut flow, stdin.lock(), stdout.lock())? else {
        eprintln!("Assessment abandoned; nothing saved.");
        return Ok(());
    };

    let view = ResultsView::resolve(store.as_ref(), Some(&context)).await;
    println!();
    print!("{}", render_text(&view));

    let output = output.unwrap_or(config.output_dir);
    std::fs::create_dir_all(&output)?;
    let timestamp = context.completed_at.format("%Y-%m-%dT%H%M%S");
    let path = output.join(format!("outcome-{timestamp}.json"));
    context.save_json(&path)?;
    eprintln!("Outcome saved to: {}", path.display());

    Ok(())
}

/// Drive the flow from line-oriented input.
///
/// `1`-`5` answers and moves on, an empty line moves on with the current
/// answer, `b` goes back and `q` quits. Returns `None` when the session is
/// abandoned before the last question.
pub fn run_session<R: BufRead, W: Write>(
    flow: &mut QuizFlow,
    mut input: R,
    mut out: W,
) -> Result<Option<ResultsContext>> {
    let mut line = String::new();
    loop {
        let Some(question) = flow.current_question() else {
            return Ok(None);
        };

        writeln!(out)?;
        writeln!(out, "{}", flow.progress_label())?;
        writeln!(out, "{}", question.text())?;
        for option in question.options() {
            let marker = if flow.staged() == Some(option.value) {
                "*"
            } else {
                " "
            };
            writeln!(out, " {marker} {}) {}", option.value, option.label)?;
        }
        let next = if flow.is_last() { "finish" } else { "next" };
        let back = if flow.is_first() { "" } else { ", b = back" };
        write!(out, "Answer 1-5 (enter = {next}{back}, q = quit): ")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(None);
        }

        match line.trim() {
            "q" | "Q" => return Ok(None),
            "b" | "B" => {
                if !flow.retreat() {
                    writeln!(out, "Already at the first question.")?;
                }
            }
            "" => {
                if let Some(context) = step(flow, &mut out)? {
                    return Ok(Some(context));
                }
            }
            answer => match answer.parse::<Likert>() {
                Ok(value) => {
                    flow.select_answer(value);
                    if let Some(context) = step(flow, &mut out)? {
                        return Ok(Some(context));
                    }
                }
                Err(e) => writeln!(out, "{e}")?,
            },
        }
    }
}

fn step<W: Write>(flow: &mut QuizFlow, out: &mut W) -> Result<Option<ResultsContext>> {
    match flow.advance() {
        Advance::Completed(context) => Ok(Some(context)),
        Advance::NothingSelected => {
            writeln!(out, "Please select an answer first.")?;
            Ok(None)
        }
        Advance::Moved(_) => Ok(None),
        Advance::Unavailable | Advance::AlreadyCompleted => {
            anyhow::bail!("assessment is no longer in progress")
        }
    }
}
