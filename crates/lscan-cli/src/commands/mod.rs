//! CLI subcommands and the helpers they share.

pub mod config;
pub mod export;
pub mod history;
pub mod parse;
pub mod scan;

use std::path::{Path, PathBuf};

use console::style;
use tracing::debug;

use lscan_core::models::config::LscanConfig;
use lscan_core::models::label::{Confidence, ExtractedRecord};
use lscan_core::store::JsonFileStore;

/// Output format for parsed records.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lscan")
        .join("config.json")
}

/// Resolve the configuration file: the `--config` flag wins over the default.
pub fn config_file(config_path: Option<&str>) -> PathBuf {
    config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path)
}

/// Load configuration, falling back to defaults when no file exists.
///
/// An explicitly given file must exist.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<LscanConfig> {
    let path = config_file(config_path);

    if path.exists() {
        debug!("Loading config from {}", path.display());
        return Ok(LscanConfig::from_file(&path)?);
    }

    if config_path.is_some() {
        anyhow::bail!("Config file not found: {}", path.display());
    }

    Ok(LscanConfig::default())
}

/// Open the scan database named by configuration.
pub fn open_store(config: &LscanConfig) -> anyhow::Result<JsonFileStore> {
    let path = config.storage.path.clone().unwrap_or_else(default_store_path);
    Ok(JsonFileStore::open(path)?)
}

fn default_store_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lscan")
        .join("scans.json")
}

/// Render a record in the chosen format.
pub fn format_record(record: &ExtractedRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Text => Ok(format_record_text(record)),
    }
}

fn format_record_text(record: &ExtractedRecord) -> String {
    let c = &record.confidence;
    let rows = [
        ("Batch", record.batch_number.clone(), Some(c.batch_number)),
        (
            "Mfg",
            record.manufacturing_date.map(|d| d.to_string()),
            Some(c.manufacturing_date),
        ),
        ("Expiry", record.expiry_date.map(|d| d.to_string()), Some(c.expiry_date)),
        ("Flavour", record.flavour.clone(), None),
    ];

    rows.iter()
        .map(|(label, value, confidence)| {
            let value = value.as_deref().unwrap_or("-");
            match confidence.map(confidence_tag) {
                Some(tag) if !tag.is_empty() => format!("{:<8} {} {}", label, value, tag),
                _ => format!("{:<8} {}", label, value),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn confidence_tag(confidence: Confidence) -> String {
    match confidence {
        Confidence::Unset => String::new(),
        Confidence::High => style("(high)").green().to_string(),
        Confidence::Low => style("(low)").yellow().to_string(),
        Confidence::Swapped => style("(swapped)").yellow().to_string(),
    }
}

/// Write output to a file or stdout.
pub fn write_output(output: &str, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, output)?;
            println!("{} Output written to {}", style("✓").green(), path.display());
        }
        None => println!("{}", output),
    }
    Ok(())
}
