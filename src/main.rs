//! plate-accuracy - recognition accuracy reports for licence-plate batches
//!
//! Reads a batch file of ground-truth / recognized values with confidences and
//! prints the evaluation, confidence distribution and automation tables.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{info, warn, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use plate_accuracy::analysis::evaluate;
use plate_accuracy::config::{self, AppConfig, OutputFormat};
use plate_accuracy::{output, storage};

/// plate-accuracy - licence-plate recognition accuracy report
#[derive(Parser, Debug)]
#[command(name = "plate-accuracy")]
#[command(about = "Compares recognized plates with ground truth and reports accuracy by confidence level")]
struct Args {
    /// Batch file to evaluate (one row per image)
    #[arg(required_unless_present = "write_default_config")]
    input: Option<PathBuf>,

    /// Configuration file (defaults to config.toml in the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format, overriding the configuration
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Evaluate only images expected to be readable
    #[arg(long)]
    readable_only: bool,

    /// Write the default configuration to this path and exit
    #[arg(long, value_name = "PATH")]
    write_default_config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose)?;

    if let Some(path) = &args.write_default_config {
        config::save_config(&AppConfig::default(), path)?;
        info!("Wrote default configuration to {:?}", path);
        return Ok(());
    }

    let mut config = load_or_default_config(args.config.as_deref())?;
    if let Some(format) = args.format {
        config.report.format = format;
    }
    if args.readable_only {
        config.report.expected_readable_only = true;
    }

    let Some(input) = args.input.as_deref() else {
        anyhow::bail!("No input file given");
    };

    let (mut store, load) = storage::load_records(input, &config.ingest)
        .with_context(|| format!("Failed to load {}", input.display()))?;
    if config.report.expected_readable_only {
        store = store.expected_readable_only();
        info!("Restricted to {} records expected to be readable", store.len());
    }

    let report = evaluate(&store);
    for diagnostic in report.diagnostics() {
        warn!("{}", diagnostic);
    }

    let rendered = output::render(&report, &load, &config.report)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            info!("Report written to {:?}", path);
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

/// Install the global tracing subscriber; `RUST_LOG` overrides `--verbose`
fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let builder = FmtSubscriber::builder().with_writer(std::io::stderr);

    if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
        let subscriber = builder.with_env_filter(EnvFilter::from_default_env()).finish();
        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        let subscriber = builder.with_max_level(level).finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }
    Ok(())
}

/// Load configuration from the given file, the default location, or defaults
fn load_or_default_config(explicit: Option<&Path>) -> Result<AppConfig> {
    if let Some(path) = explicit {
        let config = config::load_config(path)?;
        info!("Loaded configuration from {:?}", path);
        return Ok(config);
    }

    if let Ok(config_path) = storage::default_config_path() {
        if config_path.exists() {
            match config::load_config(&config_path) {
                Ok(config) => {
                    info!("Loaded configuration from {:?}", config_path);
                    return Ok(config);
                }
                Err(e) => warn!("Ignoring unreadable configuration: {:#}", e),
            }
        }
    }
    info!("Using default configuration");
    Ok(AppConfig::default())
}
