//! HTML results page generator.
//!
//! Produces a self-contained HTML file with all CSS inlined.

use anyhow::Result;
use std::path::Path;

use indexmap::IndexMap;
use readiness_core::outcome::ResultsContext;
use readiness_core::results::{
    ResultPage, ResultsView, NO_RESULTS_ACTION, NO_RESULTS_HEADING, NO_RESULTS_MESSAGE,
};

use crate::text::{ACT_TEXT, REFLECT_TEXT};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate the results page.
///
/// `context` adds the session details and the per-category score chart.
pub fn generate_html(view: &ResultsView, context: Option<&ResultsContext>) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let title = match view {
        ResultsView::NoContext => NO_RESULTS_HEADING.to_string(),
        ResultsView::Ready(page) => page.title.clone(),
    };
    html.push_str(&format!(
        "<title>Assessment results: {}</title>\n",
        html_escape(&title)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    match view {
        ResultsView::NoContext => push_no_context(&mut html),
        ResultsView::Ready(page) => push_page(&mut html, page, context),
    }

    html.push_str("</body>\n</html>");
    html
}

fn push_no_context(html: &mut String) {
    html.push_str("<section class=\"empty\">\n");
    html.push_str(&format!("<h1>{NO_RESULTS_HEADING}</h1>\n"));
    html.push_str(&format!("<p>{NO_RESULTS_MESSAGE}</p>\n"));
    html.push_str(&format!(
        "<a class=\"button\" href=\"/quiz\">{NO_RESULTS_ACTION}</a>\n"
    ));
    html.push_str("</section>\n");
}

fn push_page(html: &mut String, page: &ResultPage, context: Option<&ResultsContext>) {
    // Header
    html.push_str("<header>\n");
    html.push_str("<p class=\"eyebrow\">Your Assessment Results</p>\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(&page.title)));
    html.push_str(&format!(
        "<p class=\"lead\">{}</p>\n",
        html_escape(&page.short_description)
    ));
    if let Some(ctx) = context {
        html.push_str(&format!(
            "<p class=\"meta\">Category: <strong>{}</strong> | {} answers | {}</p>\n",
            html_escape(&ctx.category),
            ctx.answers.len(),
            ctx.completed_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }
    html.push_str("</header>\n");

    // Mindset
    html.push_str("<section class=\"mindset\">\n");
    html.push_str("<h2>MINDSET EVALUATION</h2>\n");
    html.push_str(&format!(
        "<p>Current Level: <strong>{}</strong></p>\n",
        page.mindset_level
    ));
    html.push_str(&format!(
        "<div class=\"bar\"><div class=\"fill\" style=\"width: {:.0}%\"></div></div>\n",
        page.mindset_fraction * 100.0
    ));
    html.push_str("</section>\n");

    // Guidance
    html.push_str("<section class=\"guidance\">\n");
    html.push_str("<h2>WHAT THIS MEANS</h2>\n");
    html.push_str(&format!(
        "<div class=\"panel\">{}</div>\n",
        html_escape(&page.guidance)
    ));
    if let Some(rec) = &page.recommendation {
        html.push_str("<div class=\"recommendation\">\n<h3>RECOMMENDED PATH</h3>\n");
        html.push_str(&format!("<p>{}</p>\n", html_escape(&rec.title)));
        if let Some(url) = &rec.url {
            html.push_str(&format!(
                "<a class=\"button\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">Explore This Path</a>\n",
                html_escape(url)
            ));
        }
        html.push_str("</div>\n");
    }
    html.push_str("</section>\n");

    if let Some(ctx) = context.filter(|c| !c.category_scores.is_empty()) {
        html.push_str("<section class=\"scores\">\n<h2>Category Scores</h2>\n");
        html.push_str(&generate_bar_chart(&ctx.category_scores, &ctx.category));
        html.push_str("</section>\n");
    }

    // Next steps
    html.push_str("<section class=\"next\">\n<h2>NEXT STEPS</h2>\n");
    html.push_str(&format!("<div class=\"card\"><h3>REFLECT</h3><p>{REFLECT_TEXT}</p></div>\n"));
    html.push_str(&format!("<div class=\"card\"><h3>ACT</h3><p>{ACT_TEXT}</p></div>\n"));
    html.push_str("<a class=\"button outline\" href=\"/quiz\">Retake Assessment</a>\n");
    html.push_str("</section>\n");
}

/// Write the results page to a file.
pub fn write_html_report(
    view: &ResultsView,
    context: Option<&ResultsContext>,
    path: &Path,
) -> Result<()> {
    crate::write_output(path, &generate_html(view, context))
}

fn generate_bar_chart(scores: &IndexMap<String, f64>, winner: &str) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 260;

    let top = scores.values().copied().fold(0.0f64, f64::max);
    let total_height = scores.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, (category, score)) in scores.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let width = if top > 0.0 {
            (score.max(0.0) / top * max_width as f64) as usize
        } else {
            0
        };
        let color = if category == winner {
            "#22c55e"
        } else {
            "#9ca3af"
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            html_escape(category)
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{:.1}</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            score
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --muted: #6b7280; --border: #e5e7eb; --primary: #2563eb; --panel: #f3f4f6; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --muted: #9ca3af; --border: #374151; --primary: #60a5fa; --panel: #1f2937; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0 auto; padding: 2rem; max-width: 56rem; background: var(--bg); color: var(--fg); }
h1 { font-size: 3rem; margin: 0.5rem 0 1rem; }
h2 { margin-top: 3rem; }
.eyebrow { text-transform: uppercase; letter-spacing: 0.1em; color: var(--muted); font-size: 0.85rem; }
.lead { font-size: 1.25rem; }
.meta { color: var(--muted); }
.bar { width: 100%; height: 0.75rem; background: var(--border); border-radius: 999px; overflow: hidden; }
.fill { height: 100%; background: var(--primary); }
.panel { background: var(--panel); padding: 2rem; border-radius: 8px; white-space: pre-line; line-height: 1.6; }
.recommendation { border-left: 4px solid var(--primary); padding: 1rem 2rem; margin-top: 2rem; }
.card { border: 1px solid var(--border); border-radius: 8px; padding: 1rem 2rem; margin: 1rem 0; }
.button { display: inline-block; padding: 0.75rem 1.5rem; border-radius: 6px; background: var(--primary); color: #fff; text-decoration: none; }
.button.outline { background: transparent; color: var(--fg); border: 2px solid var(--fg); }
.empty { text-align: center; margin-top: 6rem; }
svg { margin: 1rem 0; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use readiness_core::model::AnswerRecord;
    use readiness_core::results::Recommendation;
    use readiness_core::scoring::MindsetLevel;

    fn make_page() -> ResultPage {
        ResultPage {
            category: "Learn Tech Thinking First".into(),
            title: "Learn <Tech> Thinking First".into(),
            short_description: "Foundations before syntax.".into(),
            guidance: "Start with logic puzzles.\nThen flowcharts.".into(),
            recommendation: Some(Recommendation {
                title: "Computational thinking".into(),
                url: Some("https://example.com/ct?a=1&b=2".into()),
            }),
            mindset_score: 3.0,
            mindset_level: MindsetLevel::Developing,
            mindset_fraction: 0.6,
            matched: true,
        }
    }

    fn make_context() -> ResultsContext {
        ResultsContext {
            session_id: uuid::Uuid::nil(),
            completed_at: chrono::Utc::now(),
            category: "Learn Tech Thinking First".into(),
            mindset_score: 3.0,
            category_scores: IndexMap::from([
                ("Start Coding Now".to_string(), 6.0),
                ("Learn Tech Thinking First".to_string(), 10.0),
            ]),
            answers: AnswerRecord::new(),
        }
    }

    #[test]
    fn html_page_contains_required_elements() {
        let context = make_context();
        let html = generate_html(&ResultsView::Ready(make_page()), Some(&context));

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("Learn &lt;Tech&gt; Thinking First"));
        assert!(html.contains("Current Level: <strong>Developing</strong>"));
        assert!(html.contains("width: 60%"));
        assert!(html.contains("https://example.com/ct?a=1&amp;b=2"));
        assert!(html.contains("Category Scores"));
        assert!(html.contains("Start Coding Now"));
    }

    #[test]
    fn html_without_context_skips_chart() {
        let html = generate_html(&ResultsView::Ready(make_page()), None);
        assert!(!html.contains("Category Scores"));
        assert!(html.contains("NEXT STEPS"));
    }

    #[test]
    fn html_no_context_view() {
        let html = generate_html(&ResultsView::NoContext, None);
        assert!(html.contains("No Results Available"));
        assert!(html.contains("Take Assessment"));
        assert!(!html.contains("MINDSET EVALUATION"));
    }

    #[test]
    fn html_report_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("results.html");

        write_html_report(&ResultsView::NoContext, None, &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
    }
}
