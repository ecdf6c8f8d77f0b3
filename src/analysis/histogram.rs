//! Confidence buckets and bucketed outcome tables
//!
//! Histogram, forward cumulative and inverse cumulative tables share one
//! shape: ten bucket rows followed by a grand-total row, each row holding the
//! six category counts with a percentage (of the grand `Total`) interleaved
//! after every category except `Total`.

use serde::{Serialize, Serializer};
use std::fmt;
use tracing::debug;

use super::axis::Axis;
use super::outcome::{classify, CategoryCounts, OutcomeCategory};
use super::record::RecordStore;
use super::values::Percent;

/// Number of confidence buckets
pub const BUCKET_COUNT: usize = 10;

/// One 10-point confidence interval; the last one is closed at 100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConfidenceBucket(u8);

impl ConfidenceBucket {
    /// All buckets in ascending order
    pub fn all() -> impl Iterator<Item = ConfidenceBucket> {
        (0..BUCKET_COUNT as u8).map(ConfidenceBucket)
    }

    /// Bucket containing a confidence in [0, 100]
    pub fn of(confidence: f64) -> Self {
        let index = (confidence / 10.0).floor().clamp(0.0, (BUCKET_COUNT - 1) as f64);
        ConfidenceBucket(index as u8)
    }

    /// Position in [`ConfidenceBucket::all`]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Inclusive lower bound, also used as the automation threshold label
    pub fn lower_bound(self) -> u32 {
        u32::from(self.0) * 10
    }

    /// Interval label, e.g. `[20-30)`
    pub fn label(self) -> String {
        let lower = self.lower_bound();
        if self.index() == BUCKET_COUNT - 1 {
            format!("[{}-{}]", lower, lower + 10)
        } else {
            format!("[{}-{})", lower, lower + 10)
        }
    }
}

impl fmt::Display for ConfidenceBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Row key of a bucketed table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKey {
    /// A confidence bucket
    Bucket(ConfidenceBucket),
    /// Column-wise sum of all bucket rows
    Total,
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKey::Bucket(bucket) => fmt::Display::fmt(bucket, f),
            RowKey::Total => f.write_str("Total"),
        }
    }
}

impl Serialize for RowKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A cell of a bucketed row, for renderers
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    /// Record count
    Count(u64),
    /// Share of the grand total
    Percent(Percent),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Count(n) => write!(f, "{}", n),
            Cell::Percent(p) => fmt::Display::fmt(p, f),
        }
    }
}

/// One row of a bucketed table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketedRow {
    /// Bucket or total
    pub key: RowKey,
    /// Category counts
    pub counts: CategoryCounts,
    /// Percent of the grand total for each of [`OutcomeCategory::WITH_PERCENT`]
    pub percents: [Percent; 5],
}

impl BucketedRow {
    pub(crate) fn new(key: RowKey, counts: CategoryCounts, grand_total: u64) -> Self {
        Self {
            key,
            counts,
            percents: OutcomeCategory::WITH_PERCENT.map(|c| Percent::of(counts.get(c), grand_total)),
        }
    }

    /// Count of a category
    pub fn count(&self, category: OutcomeCategory) -> u64 {
        self.counts.get(category)
    }

    /// Percent column following a category, `None` for `Total`
    pub fn percent(&self, category: OutcomeCategory) -> Option<Percent> {
        OutcomeCategory::WITH_PERCENT
            .iter()
            .position(|&c| c == category)
            .map(|i| self.percents[i])
    }

    /// Cells in column order: each category count, followed by its percent
    pub fn cells(&self) -> Vec<Cell> {
        let mut cells = Vec::with_capacity(11);
        for category in OutcomeCategory::ALL {
            cells.push(Cell::Count(self.count(category)));
            if let Some(percent) = self.percent(category) {
                cells.push(Cell::Percent(percent));
            }
        }
        cells
    }
}

/// Which transform produced a bucketed table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    /// Plain per-bucket counts
    Histogram,
    /// Row k sums buckets 0..=k
    ForwardCumulative,
    /// Row k sums buckets k..=9
    InverseCumulative,
}

/// Ten bucket rows plus a grand-total row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketedTable {
    /// Axis evaluated
    pub axis: Axis,
    /// Transform that produced the rows
    pub kind: TableKind,
    /// Bucket rows followed by the total row
    pub rows: Vec<BucketedRow>,
}

impl BucketedTable {
    /// Assemble a table from ten bucket rows and a grand total
    pub(crate) fn from_buckets(
        axis: Axis,
        kind: TableKind,
        buckets: &[CategoryCounts; BUCKET_COUNT],
        grand_total: CategoryCounts,
    ) -> Self {
        let denominator = grand_total.total();
        let mut rows: Vec<BucketedRow> = ConfidenceBucket::all()
            .map(|b| BucketedRow::new(RowKey::Bucket(b), buckets[b.index()], denominator))
            .collect();
        rows.push(BucketedRow::new(RowKey::Total, grand_total, denominator));
        Self { axis, kind, rows }
    }

    /// The ten bucket rows
    pub fn bucket_rows(&self) -> &[BucketedRow] {
        &self.rows[..BUCKET_COUNT]
    }

    /// The appended grand-total row
    pub fn total_row(&self) -> &BucketedRow {
        &self.rows[BUCKET_COUNT]
    }

    /// Bucket row counts as a fixed array
    pub(crate) fn bucket_counts(&self) -> [CategoryCounts; BUCKET_COUNT] {
        let mut counts = [CategoryCounts::default(); BUCKET_COUNT];
        for (slot, row) in counts.iter_mut().zip(self.bucket_rows()) {
            *slot = row.counts;
        }
        counts
    }

    /// Column headers matching [`BucketedRow::cells`]
    pub fn headers(&self) -> Vec<&'static str> {
        let mut headers = Vec::with_capacity(11);
        for category in OutcomeCategory::ALL {
            headers.push(category.label(self.axis));
            if category != OutcomeCategory::Total {
                headers.push("%");
            }
        }
        headers
    }
}

/// Outcome counts per confidence bucket of an axis, in one pass over the store
pub fn bucket_counts(store: &RecordStore, axis: Axis) -> [CategoryCounts; BUCKET_COUNT] {
    let mut buckets = [CategoryCounts::default(); BUCKET_COUNT];
    for record in store.records() {
        if let Some(outcome) = classify(record, axis) {
            buckets[ConfidenceBucket::of(axis.confidence(record)).index()].record(outcome);
        }
    }
    buckets
}

/// Build the confidence histogram of an axis
pub fn histogram(store: &RecordStore, axis: Axis) -> BucketedTable {
    let buckets = bucket_counts(store, axis);
    let total: CategoryCounts = buckets.iter().copied().sum();
    debug!("{} histogram: {} records over {} buckets", axis, total.total(), BUCKET_COUNT);
    BucketedTable::from_buckets(axis, TableKind::Histogram, &buckets, total)
}
