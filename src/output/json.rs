//! JSON export of evaluation reports

use serde::Serialize;

use crate::analysis::{Diagnostic, EvaluationReport, LoadSummary};

#[derive(Serialize)]
struct JsonDocument<'a> {
    accepted: usize,
    dropped_empty: usize,
    rejected: usize,
    report: &'a EvaluationReport,
    diagnostics: Vec<Diagnostic>,
}

/// Serialize a report, its load counts and its diagnostics as pretty JSON
pub fn render_json(report: &EvaluationReport, load: &LoadSummary) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonDocument {
        accepted: load.accepted,
        dropped_empty: load.dropped_empty,
        rejected: load.rejected_count(),
        report,
        diagnostics: report.diagnostics(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{evaluate, RecordStore};

    #[test]
    fn test_json_report_valid_json() {
        let report = evaluate(&RecordStore::default());
        let json = render_json(&report, &LoadSummary::default()).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["accepted"], 0);
        assert_eq!(value["report"]["axes"].as_array().map(Vec::len), Some(3));

        let text_axis = &value["report"]["axes"][0];
        assert_eq!(text_axis["axis"], "text");
        assert_eq!(text_axis["histogram"]["rows"][0]["key"], "[0-10)");
        assert_eq!(text_axis["histogram"]["rows"][10]["key"], "Total");
        // undefined percentages become null
        assert!(text_axis["summary"]["rows"][0]["percent_of_total"].is_null());
        assert_eq!(text_axis["automation"]["rows"][0]["automation_percent"], 0.0);
        assert!(!value["diagnostics"].as_array().unwrap().is_empty());
    }
}
