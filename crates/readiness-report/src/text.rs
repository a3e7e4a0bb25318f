//! Plain-text results rendering for terminals.

use std::path::Path;

use anyhow::Result;
use readiness_core::results::{
    ResultPage, ResultsView, NO_RESULTS_ACTION, NO_RESULTS_HEADING, NO_RESULTS_MESSAGE,
};

const BAR_WIDTH: usize = 20;

pub const REFLECT_TEXT: &str = "Take time to honestly assess whether the results align with your self-perception. Denial is the enemy of growth.";
pub const ACT_TEXT: &str = "Follow the recommended path. Ignore it at your own risk. The assessment is only valuable if you use it.";

/// Render a results view as plain text.
pub fn render_text(view: &ResultsView) -> String {
    match view {
        ResultsView::NoContext => {
            format!("{NO_RESULTS_HEADING}\n\n{NO_RESULTS_MESSAGE}\n\n> {NO_RESULTS_ACTION}\n")
        }
        ResultsView::Ready(page) => render_page(page),
    }
}

fn render_page(page: &ResultPage) -> String {
    let mut out = String::new();

    out.push_str("YOUR ASSESSMENT RESULTS\n\n");
    out.push_str(&format!("{}\n", page.title));
    out.push_str(&format!("{}\n\n", page.short_description));

    out.push_str("MINDSET EVALUATION\n");
    out.push_str(&format!("Current Level: {}\n", page.mindset_level));
    out.push_str(&format!(
        "{} {:.1}/5\n\n",
        progress_bar(page.mindset_fraction),
        page.mindset_score
    ));

    out.push_str("WHAT THIS MEANS\n");
    out.push_str(&format!("{}\n\n", page.guidance));

    if let Some(rec) = &page.recommendation {
        out.push_str("RECOMMENDED PATH\n");
        out.push_str(&format!("{}\n", rec.title));
        if let Some(url) = &rec.url {
            out.push_str(&format!("Explore This Path: {url}\n"));
        }
        out.push('\n');
    }

    out.push_str("NEXT STEPS\n");
    out.push_str(&format!("REFLECT: {REFLECT_TEXT}\n"));
    out.push_str(&format!("ACT: {ACT_TEXT}\n"));
    out
}

/// Write the plain-text results view to a file.
pub fn write_text_report(view: &ResultsView, path: &Path) -> Result<()> {
    crate::write_output(path, &render_text(view))
}

/// `[#####-----]` style bar for a fraction in [0, 1].
pub fn progress_bar(fraction: f64) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}
