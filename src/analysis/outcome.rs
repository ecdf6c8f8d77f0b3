//! Outcome classification
//!
//! Every record falls into at most one leaf [`Outcome`] per axis. The six
//! reported [`OutcomeCategory`] values are derived from the leaves:
//!
//! - `Total` = every leaf
//! - `Fail` = every leaf except `Success`
//!
//! so the categories cannot drift out of partition.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

use super::axis::Axis;
use super::record::Record;

/// Leaf outcome of one record on one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Ground truth and recognized value present and equal
    Success,
    /// Both present, different.
    /// On the combined axis: text and region both failed.
    BothPresentMismatch,
    /// Ground truth absent, recognized value present.
    /// On the combined axis: region matched, text failed.
    GroundTruthAbsentRecognizedPresent,
    /// Ground truth present, recognized value absent.
    /// On the combined axis: text matched, region failed.
    GroundTruthPresentRecognizedAbsent,
}

/// Reported outcome category, in fixed report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutcomeCategory {
    /// Records with at least one value on the axis
    Total,
    /// Correct reads
    Success,
    /// Union of the three mismatch categories
    Fail,
    /// See [`Outcome::BothPresentMismatch`]
    BothPresentMismatch,
    /// See [`Outcome::GroundTruthAbsentRecognizedPresent`]
    GroundTruthAbsentRecognizedPresent,
    /// See [`Outcome::GroundTruthPresentRecognizedAbsent`]
    GroundTruthPresentRecognizedAbsent,
}

impl OutcomeCategory {
    /// All categories in report order
    pub const ALL: [OutcomeCategory; 6] = [
        OutcomeCategory::Total,
        OutcomeCategory::Success,
        OutcomeCategory::Fail,
        OutcomeCategory::BothPresentMismatch,
        OutcomeCategory::GroundTruthAbsentRecognizedPresent,
        OutcomeCategory::GroundTruthPresentRecognizedAbsent,
    ];

    /// Categories that carry a percentage column in bucketed tables
    pub const WITH_PERCENT: [OutcomeCategory; 5] = [
        OutcomeCategory::Success,
        OutcomeCategory::Fail,
        OutcomeCategory::BothPresentMismatch,
        OutcomeCategory::GroundTruthAbsentRecognizedPresent,
        OutcomeCategory::GroundTruthPresentRecognizedAbsent,
    ];

    /// Whether a record with the given leaf outcome belongs to this category
    pub fn contains(self, outcome: Outcome) -> bool {
        match self {
            OutcomeCategory::Total => true,
            OutcomeCategory::Success => outcome == Outcome::Success,
            OutcomeCategory::Fail => outcome != Outcome::Success,
            OutcomeCategory::BothPresentMismatch => outcome == Outcome::BothPresentMismatch,
            OutcomeCategory::GroundTruthAbsentRecognizedPresent => {
                outcome == Outcome::GroundTruthAbsentRecognizedPresent
            }
            OutcomeCategory::GroundTruthPresentRecognizedAbsent => {
                outcome == Outcome::GroundTruthPresentRecognizedAbsent
            }
        }
    }

    /// Column label, specific to the axis for the mismatch categories
    pub fn label(self, axis: Axis) -> &'static str {
        match (self, axis) {
            (OutcomeCategory::Total, _) => "Total",
            (OutcomeCategory::Success, _) => "Success",
            (OutcomeCategory::Fail, _) => "Fail",
            (OutcomeCategory::BothPresentMismatch, Axis::Combined) => "Both failed",
            (OutcomeCategory::GroundTruthAbsentRecognizedPresent, Axis::Combined) => "Text failed",
            (OutcomeCategory::GroundTruthPresentRecognizedAbsent, Axis::Combined) => {
                "Region failed"
            }
            (OutcomeCategory::BothPresentMismatch, _) => "GT!=NA & REC!=NA",
            (OutcomeCategory::GroundTruthAbsentRecognizedPresent, _) => "GT=NA & REC!=NA",
            (OutcomeCategory::GroundTruthPresentRecognizedAbsent, _) => "GT!=NA & REC=NA",
        }
    }
}

/// Classify a ground-truth / recognized pair.
///
/// Absence never equals absence: two missing values yield `None`, not `Success`.
pub fn classify_pair(ground_truth: Option<&str>, recognized: Option<&str>) -> Option<Outcome> {
    match (ground_truth, recognized) {
        (None, None) => None,
        (Some(g), Some(r)) if g == r => Some(Outcome::Success),
        (Some(_), Some(_)) => Some(Outcome::BothPresentMismatch),
        (None, Some(_)) => Some(Outcome::GroundTruthAbsentRecognizedPresent),
        (Some(_), None) => Some(Outcome::GroundTruthPresentRecognizedAbsent),
    }
}

/// Classify a record on an axis; `None` when the record is outside `Total`.
pub fn classify(record: &Record, axis: Axis) -> Option<Outcome> {
    match axis.fields() {
        Some(fields) => {
            let (ground_truth, recognized) = fields.pair(record);
            classify_pair(ground_truth, recognized)
        }
        None => {
            let text = classify(record, Axis::Text)?;
            let region = classify(record, Axis::Region)?;
            Some(
                match (text == Outcome::Success, region == Outcome::Success) {
                    (true, true) => Outcome::Success,
                    (false, false) => Outcome::BothPresentMismatch,
                    (false, true) => Outcome::GroundTruthAbsentRecognizedPresent,
                    (true, false) => Outcome::GroundTruthPresentRecognizedAbsent,
                },
            )
        }
    }
}

/// Per-leaf record counts; `Total` and `Fail` are derived
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    /// Correct reads
    pub success: u64,
    /// Both present, different
    pub both_present_mismatch: u64,
    /// Ground truth absent, recognized present
    pub ground_truth_absent: u64,
    /// Ground truth present, recognized absent
    pub recognized_absent: u64,
}

impl CategoryCounts {
    /// Count one record
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Success => self.success += 1,
            Outcome::BothPresentMismatch => self.both_present_mismatch += 1,
            Outcome::GroundTruthAbsentRecognizedPresent => self.ground_truth_absent += 1,
            Outcome::GroundTruthPresentRecognizedAbsent => self.recognized_absent += 1,
        }
    }

    /// Records in the `Total` category
    pub fn total(&self) -> u64 {
        self.success + self.fail()
    }

    /// Records in the `Fail` category
    pub fn fail(&self) -> u64 {
        self.both_present_mismatch + self.ground_truth_absent + self.recognized_absent
    }

    /// Count for any reported category
    pub fn get(&self, category: OutcomeCategory) -> u64 {
        match category {
            OutcomeCategory::Total => self.total(),
            OutcomeCategory::Success => self.success,
            OutcomeCategory::Fail => self.fail(),
            OutcomeCategory::BothPresentMismatch => self.both_present_mismatch,
            OutcomeCategory::GroundTruthAbsentRecognizedPresent => self.ground_truth_absent,
            OutcomeCategory::GroundTruthPresentRecognizedAbsent => self.recognized_absent,
        }
    }

    /// Counts in report order
    pub fn as_row(&self) -> [u64; 6] {
        OutcomeCategory::ALL.map(|c| self.get(c))
    }
}

impl Add for CategoryCounts {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            success: self.success + rhs.success,
            both_present_mismatch: self.both_present_mismatch + rhs.both_present_mismatch,
            ground_truth_absent: self.ground_truth_absent + rhs.ground_truth_absent,
            recognized_absent: self.recognized_absent + rhs.recognized_absent,
        }
    }
}

impl AddAssign for CategoryCounts {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::iter::Sum for CategoryCounts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// Count outcomes of a set of records on an axis in one pass
pub fn count_outcomes<'a, I>(records: I, axis: Axis) -> CategoryCounts
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut counts = CategoryCounts::default();
    for outcome in records.into_iter().filter_map(|r| classify(r, axis)) {
        counts.record(outcome);
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::record::record;

    #[test]
    fn test_classify_pair_taxonomy() {
        assert_eq!(classify_pair(None, None), None);
        assert_eq!(classify_pair(Some("A1"), Some("A1")), Some(Outcome::Success));
        assert_eq!(
            classify_pair(Some("A1"), Some("B2")),
            Some(Outcome::BothPresentMismatch)
        );
        assert_eq!(
            classify_pair(None, Some("B2")),
            Some(Outcome::GroundTruthAbsentRecognizedPresent)
        );
        assert_eq!(
            classify_pair(Some("A1"), None),
            Some(Outcome::GroundTruthPresentRecognizedAbsent)
        );
    }

    #[test]
    fn test_classify_single_axes_independent() {
        let r = record(Some("ABC123"), Some("ABC123"), Some("SP"), None, 50.0);
        assert_eq!(classify(&r, Axis::Text), Some(Outcome::Success));
        assert_eq!(
            classify(&r, Axis::Region),
            Some(Outcome::GroundTruthPresentRecognizedAbsent)
        );
    }

    #[test]
    fn test_classify_combined() {
        let both_ok = record(Some("A"), Some("A"), Some("SP"), Some("SP"), 50.0);
        let text_failed = record(Some("A"), Some("B"), Some("SP"), Some("SP"), 50.0);
        let region_failed = record(Some("A"), Some("A"), Some("SP"), None, 50.0);
        let both_failed = record(None, Some("B"), Some("SP"), Some("RJ"), 50.0);
        let no_region = record(Some("A"), Some("A"), None, None, 50.0);

        assert_eq!(classify(&both_ok, Axis::Combined), Some(Outcome::Success));
        assert_eq!(
            classify(&text_failed, Axis::Combined),
            Some(Outcome::GroundTruthAbsentRecognizedPresent)
        );
        assert_eq!(
            classify(&region_failed, Axis::Combined),
            Some(Outcome::GroundTruthPresentRecognizedAbsent)
        );
        assert_eq!(
            classify(&both_failed, Axis::Combined),
            Some(Outcome::BothPresentMismatch)
        );
        // Outside Total: the region axis has no value at all
        assert_eq!(classify(&no_region, Axis::Combined), None);
    }

    #[test]
    fn test_counts_partition_total() {
        let records = vec![
            record(Some("A"), Some("A"), None, None, 50.0),
            record(Some("A"), Some("B"), None, None, 50.0),
            record(None, Some("B"), None, None, 50.0),
            record(Some("A"), None, None, None, 50.0),
            record(Some("A"), None, None, None, 50.0),
            record(None, None, Some("SP"), Some("SP"), 50.0),
        ];

        let counts = count_outcomes(&records, Axis::Text);
        assert_eq!(counts.as_row(), [5, 1, 4, 1, 1, 2]);
        assert_eq!(counts.total(), counts.success + counts.fail());
    }

    #[test]
    fn test_category_contains_matches_counts() {
        for outcome in [
            Outcome::Success,
            Outcome::BothPresentMismatch,
            Outcome::GroundTruthAbsentRecognizedPresent,
            Outcome::GroundTruthPresentRecognizedAbsent,
        ] {
            let mut counts = CategoryCounts::default();
            counts.record(outcome);
            for category in OutcomeCategory::ALL {
                assert_eq!(counts.get(category) == 1, category.contains(outcome));
            }
        }
    }

    #[test]
    fn test_combined_labels() {
        assert_eq!(
            OutcomeCategory::GroundTruthAbsentRecognizedPresent.label(Axis::Combined),
            "Text failed"
        );
        assert_eq!(
            OutcomeCategory::GroundTruthAbsentRecognizedPresent.label(Axis::Text),
            "GT=NA & REC!=NA"
        );
    }
}
