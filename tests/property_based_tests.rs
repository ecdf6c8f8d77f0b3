//! Property-Based Tests
//!
//! Invariants of the evaluation tables over arbitrary batches:
//! - Leaf outcomes partition `Total`; mismatches sum to `Fail`
//! - Histogram totals equal whole-batch counts
//! - Cumulative tables agree at their endpoints and are monotonic
//! - Reports are deterministic

use plate_accuracy::analysis::{
    count_outcomes, evaluate, forward_cumulative, histogram, inverse_cumulative, summarize,
    Axis, OutcomeCategory, Record, RecordStore, BUCKET_COUNT,
};
use proptest::prelude::*;

fn label() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop::sample::select(vec!["ABC123", "ABC128", "SP", "RJ"]))
        .prop_map(|v| v.map(str::to_string))
}

fn confidence() -> impl Strategy<Value = f64> {
    prop_oneof![0.0..=100.0f64, Just(0.0), Just(10.0), Just(90.0), Just(100.0)]
}

fn record() -> impl Strategy<Value = Record> {
    (
        (label(), label(), label(), label()),
        (confidence(), confidence(), confidence()),
        any::<bool>(),
    )
        .prop_map(
            |((gt_text, rec_text, gt_region, rec_region), (conf_text, conf_region, conf_combined), readable)| {
                Record {
                    image: "img.jpg".to_string(),
                    ground_truth_text: gt_text,
                    ground_truth_region: gt_region,
                    recognized_text: rec_text,
                    recognized_region: rec_region,
                    confidence_text: conf_text,
                    confidence_region: conf_region,
                    confidence_combined: conf_combined,
                    is_expected_readable: readable,
                }
            },
        )
}

fn store() -> impl Strategy<Value = RecordStore> {
    prop::collection::vec(record(), 0..60).prop_map(|records| RecordStore::from_records(records).0)
}

// ============================================================================
// Classification Properties
// ============================================================================

/// Property: Success plus the three mismatch categories partition Total
#[test]
fn proptest_outcomes_partition_total() {
    proptest!(|(store in store())| {
        for axis in Axis::ALL {
            let counts = count_outcomes(store.records(), axis);
            let leaves = counts.get(OutcomeCategory::Success)
                + counts.get(OutcomeCategory::BothPresentMismatch)
                + counts.get(OutcomeCategory::GroundTruthAbsentRecognizedPresent)
                + counts.get(OutcomeCategory::GroundTruthPresentRecognizedAbsent);
            prop_assert_eq!(leaves, counts.get(OutcomeCategory::Total));

            let mismatches = leaves - counts.get(OutcomeCategory::Success);
            prop_assert_eq!(mismatches, counts.get(OutcomeCategory::Fail));
        }
    });
}

/// Property: Summary counts equal single-pass classifier counts
#[test]
fn proptest_summary_matches_classifier() {
    proptest!(|(store in store())| {
        for axis in Axis::ALL {
            let summary = summarize(&store, axis);
            prop_assert_eq!(summary.counts(), count_outcomes(store.records(), axis));
        }
    });
}

// ============================================================================
// Bucketed Table Properties
// ============================================================================

/// Property: Histogram total row equals the whole-batch counts
#[test]
fn proptest_histogram_total_matches_summary() {
    proptest!(|(store in store())| {
        for axis in Axis::ALL {
            let hist = histogram(&store, axis);
            let summary = summarize(&store, axis);
            for category in OutcomeCategory::ALL {
                prop_assert_eq!(
                    hist.total_row().count(category),
                    summary.row(category).count
                );
            }
        }
    });
}

/// Property: Forward row 9, inverse row 0 and the grand total coincide
#[test]
fn proptest_cumulative_endpoints() {
    proptest!(|(store in store())| {
        for axis in Axis::ALL {
            let hist = histogram(&store, axis);
            let forward = forward_cumulative(&hist);
            let inverse = inverse_cumulative(&hist);

            prop_assert_eq!(forward.rows[BUCKET_COUNT - 1].counts, inverse.rows[0].counts);
            prop_assert_eq!(inverse.rows[0].counts, hist.total_row().counts);
            prop_assert_eq!(forward.total_row(), inverse.total_row());
        }
    });
}

/// Property: Forward columns never decrease, inverse columns never increase
#[test]
fn proptest_cumulative_monotonic() {
    proptest!(|(store in store())| {
        for axis in Axis::ALL {
            let hist = histogram(&store, axis);
            let forward = forward_cumulative(&hist);
            let inverse = inverse_cumulative(&hist);

            for k in 1..BUCKET_COUNT {
                for category in OutcomeCategory::ALL {
                    prop_assert!(forward.rows[k].count(category) >= forward.rows[k - 1].count(category));
                    prop_assert!(inverse.rows[k].count(category) <= inverse.rows[k - 1].count(category));
                }
            }
        }
    });
}

// ============================================================================
// Report Properties
// ============================================================================

/// Property: Automation never exceeds the grand total and rates are never negative
#[test]
fn proptest_automation_bounds() {
    proptest!(|(store in store())| {
        let report = evaluate(&store);
        for axis_report in &report.axes {
            let total = axis_report.inverse.total_row().count(OutcomeCategory::Total);
            for row in &axis_report.automation.rows {
                prop_assert!(row.automation_count <= total);
                if let Some(percent) = row.automation_percent.value() {
                    prop_assert!((0.0..=100.0).contains(&percent));
                }
                if let Some(percent) = row.false_positive_percent.value() {
                    prop_assert!(percent >= 0.0);
                }
            }
        }
    });
}

/// Property: Evaluating the same batch twice yields identical output
#[test]
fn proptest_report_idempotent() {
    proptest!(|(store in store())| {
        let first = serde_json::to_string(&evaluate(&store)).unwrap();
        let second = serde_json::to_string(&evaluate(&store)).unwrap();
        prop_assert_eq!(first, second);
    });
}
