//! Evaluation axes and the record fields each one pairs up

use serde::{Deserialize, Serialize};
use std::fmt;

use super::record::Record;

/// One of the three evaluation dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Plate text
    Text,
    /// Region / state label
    Region,
    /// Text and region together
    Combined,
}

impl Axis {
    /// All axes in report order
    pub const ALL: [Axis; 3] = [Axis::Text, Axis::Region, Axis::Combined];

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Axis::Text => "Text",
            Axis::Region => "Region",
            Axis::Combined => "Combined",
        }
    }

    /// Confidence score the axis is bucketed and summarized by
    pub fn confidence(self, record: &Record) -> f64 {
        match self {
            Axis::Text => record.confidence_text,
            Axis::Region => record.confidence_region,
            Axis::Combined => record.confidence_combined,
        }
    }

    /// Field pairing for a single-field axis, `None` for [`Axis::Combined`]
    pub fn fields(self) -> Option<AxisFields> {
        match self {
            Axis::Text => Some(AxisFields {
                ground_truth: |r| r.ground_truth_text.as_deref(),
                recognized: |r| r.recognized_text.as_deref(),
            }),
            Axis::Region => Some(AxisFields {
                ground_truth: |r| r.ground_truth_region.as_deref(),
                recognized: |r| r.recognized_region.as_deref(),
            }),
            Axis::Combined => None,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accessors for the ground-truth / recognized pair of a single-field axis
#[derive(Clone, Copy)]
pub struct AxisFields {
    /// Ground-truth value
    pub ground_truth: fn(&Record) -> Option<&str>,
    /// Recognized value
    pub recognized: fn(&Record) -> Option<&str>,
}

impl AxisFields {
    /// `(ground truth, recognized)` for a record
    pub fn pair<'a>(&self, record: &'a Record) -> (Option<&'a str>, Option<&'a str>) {
        ((self.ground_truth)(record), (self.recognized)(record))
    }
}

impl fmt::Debug for AxisFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AxisFields").finish_non_exhaustive()
    }
}
