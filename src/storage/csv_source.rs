//! Delimited-text ingestion of evaluation batches
//!
//! One row per image. Cells matching an absent marker become `None`; rows that
//! cannot be turned into a valid [`Record`] are rejected individually and the
//! rest of the batch is still loaded.

use csv::{ByteRecord, ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::analysis::record::{LoadSummary, Record, RecordStore};
use crate::config::IngestSettings;
use crate::error::{IngestError, InvalidRecord, RecordError};

/// Read a batch file into a record store
pub fn load_records(
    path: &Path,
    settings: &IngestSettings,
) -> Result<(RecordStore, LoadSummary), IngestError> {
    let file = File::open(path).map_err(|source| IngestError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let (store, summary) = read_records(file, settings)?;
    info!(
        "Loaded {} records from {} ({} dropped as empty, {} rejected)",
        summary.accepted,
        path.display(),
        summary.dropped_empty,
        summary.rejected_count()
    );
    Ok((store, summary))
}

/// Read a batch from any reader into a record store
pub fn read_records<R: Read>(
    reader: R,
    settings: &IngestSettings,
) -> Result<(RecordStore, LoadSummary), IngestError> {
    if !settings.delimiter.is_ascii() {
        return Err(IngestError::InvalidDelimiter(settings.delimiter));
    }

    let mut csv_reader = ReaderBuilder::new()
        .delimiter(settings.delimiter as u8)
        .has_headers(settings.has_header)
        .flexible(true)
        .from_reader(reader);

    let parser = RowParser { settings };
    let mut summary = LoadSummary::default();
    let mut parsed = Vec::new();

    for (row, result) in csv_reader.byte_records().enumerate() {
        let raw = match StringRecord::from_byte_record(result?) {
            Ok(raw) => raw,
            Err(err) => {
                let field = err.utf8_error().field();
                summary.reject(InvalidRecord {
                    row,
                    image: parser.lossy_image(&err.into_byte_record()),
                    source: RecordError::InvalidEncoding { field },
                });
                continue;
            }
        };
        if parser.labels_absent(&raw) {
            summary.dropped_empty += 1;
            continue;
        }
        match parser.parse(&raw) {
            Ok(record) => parsed.push((row, record)),
            Err(source) => summary.reject(InvalidRecord {
                row,
                image: parser.image(&raw),
                source,
            }),
        }
    }
    debug!("Parsed {} rows", parsed.len() + summary.rejected_count());

    let store = RecordStore::collect(parsed, &mut summary);
    Ok((store, summary))
}

struct RowParser<'a> {
    settings: &'a IngestSettings,
}

impl RowParser<'_> {
    fn cell<'r>(&self, raw: &'r StringRecord, index: usize) -> Option<&'r str> {
        let value = raw.get(index)?.trim();
        let absent = self
            .settings
            .absent_markers
            .iter()
            .any(|marker| marker.trim() == value);
        (!absent).then_some(value)
    }

    fn label(&self, raw: &StringRecord, index: usize) -> Option<String> {
        self.cell(raw, index).map(str::to_string)
    }

    // Unusable rows are dropped before their confidences are looked at
    fn labels_absent(&self, raw: &StringRecord) -> bool {
        let columns = &self.settings.columns;
        [
            columns.ground_truth_text,
            columns.ground_truth_region,
            columns.recognized_text,
            columns.recognized_region,
        ]
        .into_iter()
        .all(|index| self.cell(raw, index).is_none())
    }

    fn image(&self, raw: &StringRecord) -> String {
        self.label(raw, self.settings.columns.image)
            .unwrap_or_else(|| "?".to_string())
    }

    fn lossy_image(&self, raw: &ByteRecord) -> String {
        raw.get(self.settings.columns.image)
            .map(|value| String::from_utf8_lossy(value).trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| "?".to_string())
    }

    fn confidence(
        &self,
        raw: &StringRecord,
        index: usize,
        field: &'static str,
    ) -> Result<f64, RecordError> {
        let value = self
            .cell(raw, index)
            .ok_or(RecordError::MissingConfidence { field })?;
        value
            .parse::<f64>()
            .map_err(|_| RecordError::UnparseableConfidence {
                field,
                raw: value.to_string(),
            })
    }

    fn readable(&self, raw: &StringRecord, index: usize) -> bool {
        self.cell(raw, index).is_some_and(|value| {
            self.settings
                .readable_markers
                .iter()
                .any(|marker| marker.eq_ignore_ascii_case(value))
        })
    }

    fn parse(&self, raw: &StringRecord) -> Result<Record, RecordError> {
        let columns = &self.settings.columns;
        let needed = columns.max_index();
        if raw.len() <= needed {
            return Err(RecordError::MissingColumn {
                needed,
                found: raw.len(),
            });
        }

        Ok(Record {
            image: self.image(raw),
            ground_truth_text: self.label(raw, columns.ground_truth_text),
            ground_truth_region: self.label(raw, columns.ground_truth_region),
            recognized_text: self.label(raw, columns.recognized_text),
            recognized_region: self.label(raw, columns.recognized_region),
            confidence_text: self.confidence(raw, columns.confidence_text, "text")?,
            confidence_region: self.confidence(raw, columns.confidence_region, "region")?,
            confidence_combined: self.confidence(raw, columns.confidence_combined, "combined")?,
            is_expected_readable: self.readable(raw, columns.expected_readable),
        })
    }
}
