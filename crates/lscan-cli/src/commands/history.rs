//! History command - list and remove saved scans.

use clap::{Args, Subcommand};
use console::style;

use lscan_core::models::scan::ScanRecord;
use lscan_core::store::ScanStore;

use super::{load_config, open_store, OutputFormat};

/// Arguments for the history command.
#[derive(Args)]
pub struct HistoryArgs {
    #[command(subcommand)]
    command: HistoryCommand,
}

#[derive(Subcommand)]
enum HistoryCommand {
    /// List saved scans, most recent first
    List {
        /// Show at most this many scans
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Delete one scan
    Delete {
        /// Scan id
        id: u64,
    },

    /// Delete every saved scan
    Clear {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn run(args: HistoryArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let mut store = open_store(&config)?;

    match args.command {
        HistoryCommand::List { limit, format } => {
            let mut scans = store.get_all()?;
            if let Some(limit) = limit {
                scans.truncate(limit);
            }
            list(&scans, format)
        }
        HistoryCommand::Delete { id } => {
            if store.get(id)?.is_none() {
                println!("{} No scan #{}", style("ℹ").blue(), id);
                return Ok(());
            }
            store.delete(id)?;
            println!("{} Deleted scan #{}", style("✓").green(), id);
            Ok(())
        }
        HistoryCommand::Clear { yes } => {
            let count = store.get_all()?.len();
            if !yes && !confirm(&format!("Delete all {} saved scans?", count))? {
                println!("Aborted.");
                return Ok(());
            }
            store.clear()?;
            println!("{} Deleted {} scans", style("✓").green(), count);
            Ok(())
        }
    }
}

fn list(scans: &[ScanRecord], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(scans)?),
        OutputFormat::Text => {
            if scans.is_empty() {
                println!("{} No saved scans.", style("ℹ").blue());
                return Ok(());
            }
            for scan in scans {
                let f = &scan.fields;
                println!(
                    "{:>4}  {}  {:<14} {:<10} {:<10} {:<14} {}",
                    style(format!("#{}", scan.id)).bold(),
                    scan.timestamp.format("%Y-%m-%d %H:%M"),
                    f.batch_number.as_deref().unwrap_or("-"),
                    f.manufacturing_date.map(|d| d.to_string()).unwrap_or_else(|| "-".into()),
                    f.expiry_date.map(|d| d.to_string()).unwrap_or_else(|| "-".into()),
                    f.flavour.as_deref().unwrap_or("-"),
                    scan.location.as_deref().unwrap_or(""),
                );
            }
        }
    }
    Ok(())
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    let term = console::Term::stderr();
    if !term.is_term() {
        anyhow::bail!("Refusing to clear history without a terminal; pass --yes");
    }
    term.write_str(&format!("{} [y/N] ", prompt))?;
    let answer = term.read_line()?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
