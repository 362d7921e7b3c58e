//! Export command - write saved scans as CSV or item-tracking XML.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use console::style;
use tracing::info;

use lscan_core::export::{scans_to_csv, scans_to_xml, ExportFormat};
use lscan_core::store::ScanStore;

use super::{load_config, open_store};

/// Arguments for the export command.
#[derive(Args)]
pub struct ExportArgs {
    /// Export format
    #[arg(value_enum)]
    format: FormatArg,

    /// Output file ("-" for stdout; default: dated file in the current directory)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    /// Flat CSV sheet
    Csv,
    /// Item-tracking XML for ERP import
    Xml,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Xml => ExportFormat::Xml,
        }
    }
}

pub fn run(args: ExportArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let store = open_store(&config)?;
    let scans = store.get_all()?;

    if scans.is_empty() {
        println!("{} No scans to export.", style("ℹ").blue());
        return Ok(());
    }

    let now = chrono::Utc::now();
    let format = ExportFormat::from(args.format);
    let content = match format {
        ExportFormat::Csv => scans_to_csv(&scans)?,
        ExportFormat::Xml => scans_to_xml(&scans, now)?,
    };

    let path = args
        .output
        .unwrap_or_else(|| PathBuf::from(format.file_name(now.date_naive())));

    if path.as_os_str() == "-" {
        print!("{}", content);
        return Ok(());
    }

    std::fs::write(&path, content)?;
    info!("Wrote {} scans to {}", scans.len(), path.display());
    println!(
        "{} Exported {} scans to {}",
        style("✓").green(),
        scans.len(),
        path.display()
    );

    Ok(())
}
