//! Error types for record validation and batch ingestion

use std::path::PathBuf;
use thiserror::Error;

/// Why a single record failed validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    /// Confidence value outside the closed range [0, 100] (or NaN)
    #[error("{field} confidence {value} is outside [0, 100]")]
    ConfidenceOutOfRange {
        /// Name of the confidence field
        field: &'static str,
        /// Offending value
        value: f64,
    },

    /// Confidence cell is empty or marked as unknown
    #[error("{field} confidence is missing")]
    MissingConfidence {
        /// Name of the confidence field
        field: &'static str,
    },

    /// Confidence cell could not be parsed as a number
    #[error("{field} confidence {raw:?} is not a number")]
    UnparseableConfidence {
        /// Name of the confidence field
        field: &'static str,
        /// Raw cell content
        raw: String,
    },

    /// A cell is not valid UTF-8
    #[error("column {field} is not valid UTF-8")]
    InvalidEncoding {
        /// Zero-based column index of the offending cell
        field: usize,
    },

    /// Row is shorter than the configured column layout
    #[error("row has {found} columns, layout needs column {needed}")]
    MissingColumn {
        /// Zero-based column index required by the layout
        needed: usize,
        /// Number of columns actually present
        found: usize,
    },
}

/// A record rejected from the batch, with its position in the input
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid record at row {row} ({image}): {source}")]
pub struct InvalidRecord {
    /// Zero-based position of the record in the input batch
    pub row: usize,
    /// Image name, or `?` when unknown
    pub image: String,
    /// Validation failure
    #[source]
    pub source: RecordError,
}

/// Failures that abort ingestion of a whole batch file
#[derive(Debug, Error)]
pub enum IngestError {
    /// Input file could not be opened
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        /// Input path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// CSV read failure (I/O while reading rows)
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Delimiter is not a single-byte character
    #[error("delimiter {0:?} is not a single ASCII character")]
    InvalidDelimiter(char),
}
