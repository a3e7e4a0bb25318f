//! readiness-report: Results view rendering.
//!
//! Renders a `ResultsView` to plain terminal text or to a self-contained
//! HTML page.

pub mod html;
pub mod text;

use std::path::Path;

/// Write a rendered report, creating parent directories as needed.
pub(crate) fn write_output(path: &Path, content: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}
