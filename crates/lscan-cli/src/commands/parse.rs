//! Parse command - extract label fields from OCR text.

use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use tracing::info;

use lscan_core::label::{LabelExtractor, LabelParser};

use super::{format_record, load_config, write_output, OutputFormat};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Text file with the OCR transcription ("-" or omitted reads stdin)
    input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Keep dates whose day or month is out of range
    #[arg(long)]
    lenient_dates: bool,
}

pub fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let text = match &args.input {
        Some(path) if path.as_os_str() != "-" => {
            if !path.exists() {
                anyhow::bail!("Input file not found: {}", path.display());
            }
            info!("Reading text from {}", path.display());
            std::fs::read_to_string(path)?
        }
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let mut parser = LabelParser::with_config(&config.extraction);
    if args.lenient_dates {
        parser = parser.with_strict_dates(false);
    }

    let record = parser.parse(&text);
    let output = format_record(&record, args.format)?;

    write_output(&output, args.output.as_deref())
}
