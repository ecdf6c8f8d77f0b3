//! Whole-batch summary per axis

use serde::Serialize;
use tracing::debug;

use super::axis::Axis;
use super::outcome::{classify, CategoryCounts, Outcome, OutcomeCategory};
use super::record::RecordStore;
use super::values::{round1, Percent, Stat};

/// One category row of a summary table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    /// Category
    pub category: OutcomeCategory,
    /// Records in the category
    pub count: u64,
    /// Share of the `Total` category
    pub percent_of_total: Percent,
    /// Lowest axis confidence in the category
    pub min_confidence: Stat,
    /// Highest axis confidence in the category
    pub max_confidence: Stat,
    /// Mean axis confidence in the category, one decimal
    pub avg_confidence: Stat,
}

/// Counts, shares and confidence statistics for every category of one axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryTable {
    /// Axis evaluated
    pub axis: Axis,
    /// One row per category, in [`OutcomeCategory::ALL`] order
    pub rows: Vec<SummaryRow>,
}

impl SummaryTable {
    /// Row for a category
    pub fn row(&self, category: OutcomeCategory) -> &SummaryRow {
        // rows are built from OutcomeCategory::ALL, so the index always matches
        &self.rows[category_index(category)]
    }

    /// Leaf counts behind the table
    pub fn counts(&self) -> CategoryCounts {
        CategoryCounts {
            success: self.row(OutcomeCategory::Success).count,
            both_present_mismatch: self.row(OutcomeCategory::BothPresentMismatch).count,
            ground_truth_absent: self.row(OutcomeCategory::GroundTruthAbsentRecognizedPresent).count,
            recognized_absent: self.row(OutcomeCategory::GroundTruthPresentRecognizedAbsent).count,
        }
    }
}

pub(crate) fn category_index(category: OutcomeCategory) -> usize {
    OutcomeCategory::ALL
        .iter()
        .position(|&c| c == category)
        .unwrap_or_default()
}

/// Build the summary table of an axis over the whole store
pub fn summarize(store: &RecordStore, axis: Axis) -> SummaryTable {
    let classified: Vec<(Outcome, f64)> = store
        .records()
        .iter()
        .filter_map(|r| classify(r, axis).map(|o| (o, axis.confidence(r))))
        .collect();

    let mut counts = CategoryCounts::default();
    for &(outcome, _) in &classified {
        counts.record(outcome);
    }
    let total = counts.total();

    let rows = OutcomeCategory::ALL
        .iter()
        .map(|&category| {
            let stats = ConfidenceStats::collect(
                classified
                    .iter()
                    .filter(|(outcome, _)| category.contains(*outcome))
                    .map(|&(_, confidence)| confidence),
            );
            let count = counts.get(category);
            SummaryRow {
                category,
                count,
                percent_of_total: Percent::of(count, total),
                min_confidence: stats.min.into(),
                max_confidence: stats.max.into(),
                avg_confidence: stats.mean().map(round1).into(),
            }
        })
        .collect();

    debug!("{} summary: total={}, success={}", axis, total, counts.success);

    SummaryTable { axis, rows }
}

#[derive(Debug, Default)]
struct ConfidenceStats {
    min: Option<f64>,
    max: Option<f64>,
    sum: f64,
    n: usize,
}

impl ConfidenceStats {
    fn collect(values: impl Iterator<Item = f64>) -> Self {
        let mut stats = Self::default();
        for v in values {
            stats.min = Some(stats.min.map_or(v, |m| m.min(v)));
            stats.max = Some(stats.max.map_or(v, |m| m.max(v)));
            stats.sum += v;
            stats.n += 1;
        }
        stats
    }

    fn mean(&self) -> Option<f64> {
        (self.n > 0).then(|| self.sum / self.n as f64)
    }
}
