//! Plain-text rendering of evaluation reports

use crate::analysis::{
    AutomationTable, Axis, AxisReport, BucketedTable, EvaluationReport, LoadSummary, OutcomeCategory,
    SummaryTable,
};
use crate::config::ReportSettings;

/// Column-aligned text table; the first column is left-aligned, the rest right-aligned
#[derive(Debug, Default)]
struct TextTable {
    rows: Vec<Vec<String>>,
}

impl TextTable {
    fn with_header<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::default();
        table.push(header);
        table
    }

    fn push<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    fn render(&self) -> String {
        let columns = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut widths = vec![0; columns];
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut output = String::new();
        for (i, row) in self.rows.iter().enumerate() {
            let line: Vec<String> = row
                .iter()
                .zip(&widths)
                .enumerate()
                .map(|(col, (cell, &width))| {
                    if col == 0 {
                        format!("{:<width$}", cell, width = width)
                    } else {
                        format!("{:>width$}", cell, width = width)
                    }
                })
                .collect();
            output.push_str(line.join("  ").trim_end());
            output.push('\n');
            if i == 0 {
                let rule: usize = widths.iter().sum::<usize>() + 2 * columns.saturating_sub(1);
                output.push_str(&"-".repeat(rule));
                output.push('\n');
            }
        }
        output
    }
}

fn summary_table(summary: &SummaryTable) -> String {
    let mut table = TextTable::with_header(["Category", "Count", "%", "Min GC", "Max GC", "Avg GC"]);
    for row in &summary.rows {
        table.push([
            row.category.label(summary.axis).to_string(),
            row.count.to_string(),
            row.percent_of_total.to_string(),
            row.min_confidence.to_string(),
            row.max_confidence.to_string(),
            row.avg_confidence.to_string(),
        ]);
    }
    table.render()
}

fn bucketed_table(bucketed: &BucketedTable) -> String {
    let mut header = vec!["GC Levels"];
    header.extend(bucketed.headers());
    let mut table = TextTable::with_header(header);
    for row in &bucketed.rows {
        let mut cells = vec![row.key.to_string()];
        cells.extend(row.cells().iter().map(ToString::to_string));
        table.push(cells);
    }
    table.render()
}

fn automation_table(inverse: &BucketedTable, automation: &AutomationTable) -> String {
    let axis = inverse.axis;
    let mut table = TextTable::with_header([
        "GC Threshold",
        OutcomeCategory::Success.label(axis),
        OutcomeCategory::Fail.label(axis),
        OutcomeCategory::BothPresentMismatch.label(axis),
        OutcomeCategory::GroundTruthAbsentRecognizedPresent.label(axis),
        OutcomeCategory::GroundTruthPresentRecognizedAbsent.label(axis),
        "# Automation",
        "% Automation",
        "# FP",
        "% FP",
    ]);
    for (row, metrics) in inverse.bucket_rows().iter().zip(&automation.rows) {
        table.push([
            metrics.threshold.to_string(),
            row.count(OutcomeCategory::Success).to_string(),
            row.count(OutcomeCategory::Fail).to_string(),
            row.count(OutcomeCategory::BothPresentMismatch).to_string(),
            row.count(OutcomeCategory::GroundTruthAbsentRecognizedPresent).to_string(),
            row.count(OutcomeCategory::GroundTruthPresentRecognizedAbsent).to_string(),
            metrics.automation_count.to_string(),
            metrics.automation_percent.to_string(),
            metrics.false_positive_count.to_string(),
            metrics.false_positive_percent.to_string(),
        ]);
    }
    table.render()
}

fn automation_notes(axis: Axis) -> String {
    let false_positives = match axis {
        Axis::Combined => format!(
            "{} + {}",
            OutcomeCategory::BothPresentMismatch.label(axis),
            OutcomeCategory::GroundTruthAbsentRecognizedPresent.label(axis)
        ),
        Axis::Text | Axis::Region => OutcomeCategory::Fail.label(axis).to_string(),
    };
    format!(
        "  # Automation = Total - {}\n  % Automation = # Automation / Total\n  # FP = {}\n  % FP = # FP / # Automation\n",
        OutcomeCategory::GroundTruthPresentRecognizedAbsent.label(axis),
        false_positives
    )
}

fn axis_section(report: &AxisReport, settings: &ReportSettings) -> String {
    let mut output = String::new();
    output.push_str(&format!("=== {} ===\n\n", report.axis));

    output.push_str("Evaluation\n");
    output.push_str(&summary_table(&report.summary));

    if settings.include_histogram {
        output.push_str("\nDistribution by confidence level\n");
        output.push_str(&bucketed_table(&report.histogram));
    }
    if settings.include_forward {
        output.push_str("\nSum of images by confidence level\n");
        output.push_str(&bucketed_table(&report.forward));
    }

    output.push_str("\nInverse sum of images by confidence level\n");
    output.push_str(&bucketed_table(&report.inverse));

    output.push_str("\nAutomation and false positives\n");
    output.push_str(&automation_table(&report.inverse, &report.automation));
    output.push_str(&automation_notes(report.axis));
    output
}

/// Render a report as plain-text tables
pub fn render_text(
    report: &EvaluationReport,
    load: &LoadSummary,
    settings: &ReportSettings,
) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "Records evaluated: {} ({} dropped with no values, {} rejected)\n",
        report.record_count,
        load.dropped_empty,
        load.rejected_count()
    ));
    output.push_str("Excludes images where both ground truth and read values are N/A\n\n");

    for axis_report in &report.axes {
        output.push_str(&axis_section(axis_report, settings));
        output.push('\n');
    }
    output
}
