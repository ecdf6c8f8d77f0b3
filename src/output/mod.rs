//! Report Output
//!
//! Turns an [`EvaluationReport`] into text tables or JSON. Layout only: every
//! number comes from the analysis tables unchanged.

pub mod json;
pub mod text;

pub use json::render_json;
pub use text::render_text;

use anyhow::Result;

use crate::analysis::{EvaluationReport, LoadSummary};
use crate::config::{OutputFormat, ReportSettings};

/// Render a report in the configured format
pub fn render(
    report: &EvaluationReport,
    load: &LoadSummary,
    settings: &ReportSettings,
) -> Result<String> {
    Ok(match settings.format {
        OutputFormat::Text => render_text(report, load, settings),
        OutputFormat::Json => render_json(report, load)?,
    })
}
