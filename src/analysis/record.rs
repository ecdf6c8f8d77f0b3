//! Evaluated records and the record store

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{InvalidRecord, RecordError};

/// One evaluated image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Image name
    pub image: String,
    /// Ground-truth plate text
    pub ground_truth_text: Option<String>,
    /// Ground-truth region / state
    pub ground_truth_region: Option<String>,
    /// Plate text read by the recognizer
    pub recognized_text: Option<String>,
    /// Region / state read by the recognizer
    pub recognized_region: Option<String>,
    /// Text confidence (0-100)
    pub confidence_text: f64,
    /// Region confidence (0-100)
    pub confidence_region: f64,
    /// Combined confidence (0-100)
    pub confidence_combined: f64,
    /// Whether the image quality allows a read at all
    pub is_expected_readable: bool,
}

impl Record {
    /// True when none of the four label fields carries a value
    pub fn is_all_absent(&self) -> bool {
        self.ground_truth_text.is_none()
            && self.ground_truth_region.is_none()
            && self.recognized_text.is_none()
            && self.recognized_region.is_none()
    }

    /// Check the confidence fields are within [0, 100]
    pub fn validate(&self) -> Result<(), RecordError> {
        for (field, value) in [
            ("text", self.confidence_text),
            ("region", self.confidence_region),
            ("combined", self.confidence_combined),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(RecordError::ConfidenceOutOfRange { field, value });
            }
        }
        Ok(())
    }
}

/// Outcome of loading a batch into a [`RecordStore`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadSummary {
    /// Records kept in the store
    pub accepted: usize,
    /// Records without any label value, dropped silently
    pub dropped_empty: usize,
    /// Records that failed validation
    #[serde(skip)]
    pub rejected: Vec<InvalidRecord>,
}

impl LoadSummary {
    /// Number of rejected records
    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }

    /// Record a rejection found before a [`Record`] could be built
    pub fn reject(&mut self, invalid: InvalidRecord) {
        warn!("{}", invalid);
        self.rejected.push(invalid);
    }
}

/// Immutable batch of validated records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    /// Build a store from raw records.
    ///
    /// Records absent in all four label fields are dropped; records failing
    /// validation are rejected and reported in the returned [`LoadSummary`].
    pub fn from_records<I>(records: I) -> (Self, LoadSummary)
    where
        I: IntoIterator<Item = Record>,
    {
        let mut summary = LoadSummary::default();
        let store = Self::collect(records.into_iter().enumerate(), &mut summary);
        (store, summary)
    }

    /// Build a store from `(row, record)` pairs, accumulating into an existing summary.
    ///
    /// Used by ingestion, which rejects some rows before a record exists and
    /// needs the original row numbers preserved.
    pub fn collect<I>(rows: I, summary: &mut LoadSummary) -> Self
    where
        I: IntoIterator<Item = (usize, Record)>,
    {
        let mut records = Vec::new();
        for (row, record) in rows {
            if record.is_all_absent() {
                summary.dropped_empty += 1;
                continue;
            }
            if let Err(source) = record.validate() {
                summary.reject(InvalidRecord {
                    row,
                    image: record.image.clone(),
                    source,
                });
                continue;
            }
            records.push(record);
        }
        summary.accepted = records.len();
        debug!(
            "Record store built: {} accepted, {} dropped, {} rejected",
            summary.accepted,
            summary.dropped_empty,
            summary.rejected_count()
        );
        Self { records }
    }

    /// New store holding only records expected to be readable
    pub fn expected_readable_only(&self) -> Self {
        Self {
            records: self
                .records
                .iter()
                .filter(|r| r.is_expected_readable)
                .cloned()
                .collect(),
        }
    }

    /// All records in load order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the store holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn record(
    gt_text: Option<&str>,
    rec_text: Option<&str>,
    gt_region: Option<&str>,
    rec_region: Option<&str>,
    confidence: f64,
) -> Record {
    Record {
        image: "img.jpg".to_string(),
        ground_truth_text: gt_text.map(str::to_string),
        ground_truth_region: gt_region.map(str::to_string),
        recognized_text: rec_text.map(str::to_string),
        recognized_region: rec_region.map(str::to_string),
        confidence_text: confidence,
        confidence_region: confidence,
        confidence_combined: confidence,
        is_expected_readable: true,
    }
}
