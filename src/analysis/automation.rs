//! Automation and false-positive rates per confidence threshold
//!
//! A record is automated when the recognizer produced something at or above
//! the threshold; a false positive is an automated record that was wrong.

use serde::Serialize;

use super::axis::Axis;
use super::histogram::{BucketedRow, BucketedTable, ConfidenceBucket, TableKind};
use super::outcome::OutcomeCategory;
use super::values::Percent;

/// Automation metrics at one confidence threshold
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AutomationRow {
    /// Lower confidence bound (0, 10, ..., 90)
    pub threshold: u32,
    /// Records with a recognized value at or above the threshold
    pub automation_count: u64,
    /// `automation_count` over the grand total
    pub automation_percent: Percent,
    /// Automated records that were wrong
    pub false_positive_count: u64,
    /// `false_positive_count` over `automation_count`
    pub false_positive_percent: Percent,
}

/// Automation metrics for every threshold of one axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AutomationTable {
    /// Axis evaluated
    pub axis: Axis,
    /// One row per bucket lower bound
    pub rows: Vec<AutomationRow>,
}

fn false_positives(axis: Axis, row: &BucketedRow) -> u64 {
    match axis {
        Axis::Combined => {
            row.count(OutcomeCategory::BothPresentMismatch)
                + row.count(OutcomeCategory::GroundTruthAbsentRecognizedPresent)
        }
        Axis::Text | Axis::Region => row.count(OutcomeCategory::Fail),
    }
}

/// Derive automation metrics from an inverse cumulative table
pub fn automation(inverse: &BucketedTable) -> AutomationTable {
    debug_assert_eq!(inverse.kind, TableKind::InverseCumulative);

    let grand_total = inverse.total_row().count(OutcomeCategory::Total);
    let rows = ConfidenceBucket::all()
        .zip(inverse.bucket_rows())
        .map(|(bucket, row)| {
            let automation_count = row.count(OutcomeCategory::Total)
                - row.count(OutcomeCategory::GroundTruthPresentRecognizedAbsent);
            let false_positive_count = false_positives(inverse.axis, row);
            AutomationRow {
                threshold: bucket.lower_bound(),
                automation_count,
                automation_percent: Percent::or_zero(automation_count, grand_total),
                false_positive_count,
                false_positive_percent: Percent::or_zero(false_positive_count, automation_count),
            }
        })
        .collect();

    AutomationTable {
        axis: inverse.axis,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::cumulative::inverse_cumulative;
    use crate::analysis::histogram::histogram;
    use crate::analysis::record::{record, RecordStore};

    fn table_for(records: Vec<crate::analysis::record::Record>, axis: Axis) -> AutomationTable {
        let (store, _) = RecordStore::from_records(records);
        automation(&inverse_cumulative(&histogram(&store, axis)))
    }

    #[test]
    fn test_text_automation() {
        let table = table_for(
            vec![
                record(Some("A"), Some("A"), None, None, 95.0),
                record(Some("A"), Some("B"), None, None, 55.0),
                record(None, Some("B"), None, None, 35.0),
                record(Some("A"), None, None, None, 5.0),
            ],
            Axis::Text,
        );

        assert_eq!(table.rows.len(), 10);
        let thresholds: Vec<u32> = table.rows.iter().map(|r| r.threshold).collect();
        assert_eq!(thresholds, vec![0, 10, 20, 30, 40, 50, 60, 70, 80, 90]);

        // At threshold 0: 4 records, one not read -> 3 automated, 2 wrong
        let row = &table.rows[0];
        assert_eq!(row.automation_count, 3);
        assert_eq!(row.automation_percent, Percent::Value(75.0));
        // Fail also counts the unread record at threshold 0
        assert_eq!(row.false_positive_count, 3);
        assert_eq!(row.false_positive_percent, Percent::Value(100.0));

        let row = &table.rows[5];
        assert_eq!(row.automation_count, 2);
        assert_eq!(row.automation_percent, Percent::Value(50.0));
        assert_eq!(row.false_positive_count, 1);
        assert_eq!(row.false_positive_percent, Percent::Value(50.0));

        let row = &table.rows[9];
        assert_eq!(row.automation_count, 1);
        assert_eq!(row.false_positive_count, 0);
        assert_eq!(row.false_positive_percent, Percent::Value(0.0));
    }

    #[test]
    fn test_combined_false_positives() {
        let table = table_for(
            vec![
                // both failed
                record(Some("A"), Some("B"), Some("SP"), Some("RJ"), 50.0),
                // text failed, region matched
                record(Some("A"), Some("B"), Some("SP"), Some("SP"), 50.0),
                // text matched, region failed
                record(Some("A"), Some("A"), Some("SP"), Some("RJ"), 50.0),
                record(Some("A"), Some("A"), Some("SP"), Some("SP"), 50.0),
            ],
            Axis::Combined,
        );

        let row = &table.rows[0];
        assert_eq!(row.automation_count, 3);
        assert_eq!(row.false_positive_count, 2);
        assert_eq!(row.false_positive_percent, Percent::Value(66.7));
    }

    #[test]
    fn test_single_axis_false_positives_can_exceed_automation() {
        let table = table_for(
            vec![
                record(None, Some("B"), None, None, 50.0),
                record(Some("A"), None, None, None, 50.0),
            ],
            Axis::Text,
        );

        // the unread record is a Fail but not automated
        let row = &table.rows[0];
        assert_eq!(row.automation_count, 1);
        assert_eq!(row.false_positive_count, 2);
        assert_eq!(row.false_positive_percent, Percent::Value(200.0));
    }

    #[test]
    fn test_empty_automation_is_zero_not_undefined() {
        let table = table_for(Vec::new(), Axis::Region);
        for row in &table.rows {
            assert_eq!(row.automation_count, 0);
            assert_eq!(row.automation_percent, Percent::Value(0.0));
            assert_eq!(row.false_positive_percent, Percent::Value(0.0));
        }
    }
}
