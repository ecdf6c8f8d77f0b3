//! # plate-accuracy
//!
//! Accuracy reports for licence-plate recognition batches: every image's
//! recognized plate text and region are compared with ground truth, and the
//! outcomes are summarized per axis (text, region, combined) and distributed
//! over ten confidence buckets.
//!
//! ```no_run
//! use plate_accuracy::analysis::evaluate;
//! use plate_accuracy::config::IngestSettings;
//! use plate_accuracy::storage::load_records;
//! use std::path::Path;
//!
//! let (store, load) = load_records(Path::new("batch.csv"), &IngestSettings::default())?;
//! let report = evaluate(&store);
//! println!("{} records, {} rejected", report.record_count, load.rejected_count());
//! # Ok::<(), plate_accuracy::error::IngestError>(())
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod output;
pub mod storage;

pub use analysis::{evaluate, Axis, EvaluationReport, Record, RecordStore};
pub use config::AppConfig;
pub use error::{IngestError, InvalidRecord, RecordError};
