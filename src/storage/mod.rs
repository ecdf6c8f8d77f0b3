//! Storage Layer
//!
//! Locates the configuration directory and reads record batches from disk.

pub mod csv_source;

pub use csv_source::{load_records, read_records};

use anyhow::Result;
use std::path::PathBuf;

/// Get the configuration directory (not created here)
pub fn get_config_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "plateaccuracy", "plate-accuracy")
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

    Ok(proj_dirs.config_dir().to_path_buf())
}

/// Default configuration file path
pub fn default_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.toml"))
}
