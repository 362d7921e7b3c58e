//! CLI application for product label scanning.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{config, export, history, parse, scan};

/// Label scanner - read batch numbers, dates and flavours from product labels
#[derive(Parser)]
#[command(name = "lscan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse label fields from OCR text
    Parse(parse::ParseArgs),

    /// OCR a label photo and parse its fields
    Scan(scan::ScanArgs),

    /// List or remove saved scans
    History(history::HistoryArgs),

    /// Export saved scans
    Export(export::ExportArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Parse(args) => parse::run(args, config_path),
        Commands::Scan(args) => scan::run(args, config_path).await,
        Commands::History(args) => history::run(args, config_path),
        Commands::Export(args) => export::run(args, config_path),
        Commands::Config(args) => config::run(args, config_path),
    }
}
