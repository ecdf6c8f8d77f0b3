//! Evaluation engine
//!
//! Classifies every record on each axis and derives the report tables:
//! - Summary (counts, shares, confidence statistics per category)
//! - Confidence histogram
//! - Forward and inverse cumulative distributions
//! - Automation / false-positive rates per threshold
//!
//! Axes are computed independently and nothing here mutates the
//! [`RecordStore`].

pub mod automation;
pub mod axis;
pub mod cumulative;
pub mod histogram;
pub mod outcome;
pub mod record;
pub mod summary;
pub mod values;

pub use automation::{automation, AutomationRow, AutomationTable};
pub use axis::{Axis, AxisFields};
pub use cumulative::{forward_cumulative, inverse_cumulative};
pub use histogram::{
    bucket_counts, histogram, BucketedRow, BucketedTable, Cell, ConfidenceBucket, RowKey,
    TableKind, BUCKET_COUNT,
};
pub use outcome::{classify, count_outcomes, CategoryCounts, Outcome, OutcomeCategory};
pub use record::{LoadSummary, Record, RecordStore};
pub use summary::{summarize, SummaryRow, SummaryTable};
pub use values::{Percent, Stat};

use serde::Serialize;
use std::fmt;
use tracing::{debug, info};

/// Every table derived for one axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisReport {
    /// Axis evaluated
    pub axis: Axis,
    /// Whole-batch summary
    pub summary: SummaryTable,
    /// Outcome counts per confidence bucket
    pub histogram: BucketedTable,
    /// Counts below each bucket's upper bound
    pub forward: BucketedTable,
    /// Counts at or above each bucket's lower bound
    pub inverse: BucketedTable,
    /// Automation / false-positive rates from `inverse`
    pub automation: AutomationTable,
}

impl AxisReport {
    /// Run the whole pipeline for one axis
    pub fn build(store: &RecordStore, axis: Axis) -> Self {
        debug!("Evaluating {} axis over {} records", axis, store.len());
        let summary = summarize(store, axis);
        let histogram = histogram(store, axis);
        let forward = forward_cumulative(&histogram);
        let inverse = inverse_cumulative(&histogram);
        let automation = automation(&inverse);
        Self {
            axis,
            summary,
            histogram,
            forward,
            inverse,
            automation,
        }
    }

    /// Cells that degraded to a marker value
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut out = Vec::new();
        for row in &self.summary.rows {
            if row.percent_of_total.is_undefined() {
                out.push(Diagnostic {
                    axis: self.axis,
                    table: "summary",
                    row: row.category.label(self.axis).to_string(),
                    kind: DiagnosticKind::ZeroDenominator,
                });
            }
            if row.avg_confidence.is_no_data() {
                out.push(Diagnostic {
                    axis: self.axis,
                    table: "summary",
                    row: row.category.label(self.axis).to_string(),
                    kind: DiagnosticKind::EmptyCategoryStatistic,
                });
            }
        }
        // bucketed percentages share the grand total, so one entry per table
        for (name, table) in [
            ("histogram", &self.histogram),
            ("forward", &self.forward),
            ("inverse", &self.inverse),
        ] {
            if table.total_row().percents.iter().any(|p| p.is_undefined()) {
                out.push(Diagnostic {
                    axis: self.axis,
                    table: name,
                    row: "Total".to_string(),
                    kind: DiagnosticKind::ZeroDenominator,
                });
            }
        }
        out
    }
}

/// Full report over a record store
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    /// Records evaluated
    pub record_count: usize,
    /// One report per axis, in [`Axis::ALL`] order
    pub axes: Vec<AxisReport>,
}

impl EvaluationReport {
    /// Report of one axis
    pub fn axis(&self, axis: Axis) -> Option<&AxisReport> {
        self.axes.iter().find(|a| a.axis == axis)
    }

    /// Degraded cells across all axes
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.axes.iter().flat_map(AxisReport::diagnostics).collect()
    }
}

/// Evaluate all axes over a record store
pub fn evaluate(store: &RecordStore) -> EvaluationReport {
    let axes: Vec<AxisReport> = Axis::ALL
        .iter()
        .map(|&axis| AxisReport::build(store, axis))
        .collect();

    for report in &axes {
        let total = report.summary.row(OutcomeCategory::Total).count;
        let success = report.summary.row(OutcomeCategory::Success);
        info!(
            "{}: {} evaluated, {} correct ({})",
            report.axis, total, success.count, success.percent_of_total
        );
    }

    EvaluationReport {
        record_count: store.len(),
        axes,
    }
}

/// Kind of cell-level degradation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiagnosticKind {
    /// Confidence statistic over a category with no records
    EmptyCategoryStatistic,
    /// Percentage over a zero total
    ZeroDenominator,
}

/// A cell that could not be computed and carries a marker instead
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Axis of the table
    pub axis: Axis,
    /// Table name
    pub table: &'static str,
    /// Row label
    pub row: String,
    /// What degraded
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            DiagnosticKind::EmptyCategoryStatistic => "no records for confidence statistics",
            DiagnosticKind::ZeroDenominator => "percentage over a zero total",
        };
        write!(f, "{} {} [{}]: {}", self.axis, self.table, self.row, what)
    }
}
