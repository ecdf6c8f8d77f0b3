//! Application Configuration
//!
//! Ingestion layout and report settings stored in TOML format.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Input file settings
    pub ingest: IngestSettings,
    /// Report settings
    pub report: ReportSettings,
}

/// How the input batch file is read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestSettings {
    /// Field delimiter
    pub delimiter: char,
    /// First row holds column names
    pub has_header: bool,
    /// Cell values meaning "no value" (compared after trimming)
    pub absent_markers: Vec<String>,
    /// Values of the expected-readable column read as `true` (case-insensitive)
    pub readable_markers: Vec<String>,
    /// Column positions
    pub columns: ColumnLayout,
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            delimiter: ';',
            has_header: true,
            absent_markers: vec!["UNK".to_string(), "N/A".to_string(), String::new()],
            readable_markers: vec![
                "1".to_string(),
                "true".to_string(),
                "yes".to_string(),
                "y".to_string(),
            ],
            columns: ColumnLayout::default(),
        }
    }
}

/// Zero-based column index of every record field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnLayout {
    /// Image name
    pub image: usize,
    /// Ground-truth plate text
    pub ground_truth_text: usize,
    /// Ground-truth region / state
    pub ground_truth_region: usize,
    /// Whether the image is expected to be readable
    pub expected_readable: usize,
    /// Recognized plate text
    pub recognized_text: usize,
    /// Recognized region / state
    pub recognized_region: usize,
    /// Combined confidence
    pub confidence_combined: usize,
    /// Text confidence
    pub confidence_text: usize,
    /// Region confidence
    pub confidence_region: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            image: 0,
            ground_truth_text: 1,
            ground_truth_region: 2,
            expected_readable: 3,
            recognized_text: 4,
            recognized_region: 5,
            confidence_combined: 6,
            confidence_text: 7,
            confidence_region: 8,
        }
    }
}

impl ColumnLayout {
    /// Highest column index the layout reads
    pub fn max_index(&self) -> usize {
        [
            self.image,
            self.ground_truth_text,
            self.ground_truth_region,
            self.expected_readable,
            self.recognized_text,
            self.recognized_region,
            self.confidence_combined,
            self.confidence_text,
            self.confidence_region,
        ]
        .into_iter()
        .max()
        .unwrap_or_default()
    }
}

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Aligned plain-text tables
    #[default]
    Text,
    /// The full report as JSON
    Json,
}

/// What the report contains
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Output format
    pub format: OutputFormat,
    /// Evaluate only records expected to be readable
    pub expected_readable_only: bool,
    /// Print the per-bucket histogram tables (text format)
    pub include_histogram: bool,
    /// Print the forward cumulative tables (text format)
    pub include_forward: bool,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            expected_readable_only: false,
            include_histogram: true,
            include_forward: true,
        }
    }
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    Ok(config)
}

/// Save configuration to file
pub fn save_config(config: &AppConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory {}", parent.display()))?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_app_config() {
        let config = AppConfig::default();

        // Check ingest defaults
        assert_eq!(config.ingest.delimiter, ';');
        assert!(config.ingest.has_header);
        assert!(config.ingest.absent_markers.contains(&"UNK".to_string()));
        assert!(config.ingest.absent_markers.contains(&"N/A".to_string()));
        assert_eq!(config.ingest.columns.confidence_text, 7);
        assert_eq!(config.ingest.columns.max_index(), 8);

        // Check report defaults
        assert_eq!(config.report.format, OutputFormat::Text);
        assert!(!config.report.expected_readable_only);
        assert!(config.report.include_histogram);
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = AppConfig::default();

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: AppConfig = toml::from_str(
            r#"
            [ingest]
            delimiter = ","

            [report]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(parsed.ingest.delimiter, ',');
        assert!(parsed.ingest.has_header);
        assert_eq!(parsed.ingest.columns, ColumnLayout::default());
        assert_eq!(parsed.report.format, OutputFormat::Json);
        assert!(parsed.report.include_forward);
    }

    #[test]
    fn test_save_and_load_config() {
        let mut config = AppConfig::default();
        config.report.expected_readable_only = true;
        config.ingest.columns.image = 9;

        let temp_file = NamedTempFile::new().unwrap();
        save_config(&config, temp_file.path()).unwrap();
        let loaded = load_config(temp_file.path()).unwrap();

        assert!(loaded.report.expected_readable_only);
        assert_eq!(loaded.ingest.columns.image, 9);
        assert_eq!(loaded.ingest.columns.max_index(), 9);
    }

    #[test]
    fn test_save_config_creates_missing_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("plate-accuracy").join("config.toml");

        save_config(&AppConfig::default(), &path).unwrap();
        assert_eq!(load_config(&path).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/path/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "this is not valid toml {{{{").unwrap();

        let result = load_config(temp_file.path());
        assert!(result.is_err());
    }
}
