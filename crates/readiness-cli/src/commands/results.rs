//! The `readiness results` command.

use std::path::PathBuf;

use anyhow::Result;

use readiness_core::outcome::ResultsContext;
use readiness_core::results::ResultsView;
use readiness_report::html::{generate_html, write_html_report};
use readiness_report::text::{render_text, write_text_report};

use super::open_store;
use crate::StoreArgs;

pub async fn execute(
    outcome: Option<PathBuf>,
    source: StoreArgs,
    format: String,
    output: Option<PathBuf>,
) -> Result<()> {
    anyhow::ensure!(
        matches!(format.as_str(), "text" | "html"),
        "unknown format '{format}'; expected text or html"
    );

    let context = outcome
        .as_deref()
        .map(ResultsContext::load_json)
        .transpose()?;

    // Without a completed session there is nothing to look up.
    let view = match context.as_ref().filter(|c| !c.category.is_empty()) {
        Some(ctx) => match open_store(&source)? {
            (Some(store), _) => ResultsView::resolve(store.as_ref(), Some(ctx)).await,
            (None, _) => ResultsView::compose(Some(ctx), None),
        },
        None => ResultsView::NoContext,
    };

    match (format.as_str(), output) {
        ("html", Some(path)) => {
            write_html_report(&view, context.as_ref(), &path)?;
            eprintln!("Results written to: {}", path.display());
        }
        ("html", None) => print!("{}", generate_html(&view, context.as_ref())),
        (_, Some(path)) => {
            write_text_report(&view, &path)?;
            eprintln!("Results written to: {}", path.display());
        }
        (_, None) => print!("{}", render_text(&view)),
    }

    Ok(())
}
