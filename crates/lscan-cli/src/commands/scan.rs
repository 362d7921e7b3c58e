//! Scan command - OCR a label photo, parse it, optionally save it.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use lscan_core::label::{LabelExtractor, LabelParser};
use lscan_core::models::config::EngineChoice;
use lscan_core::models::scan::ScanRecord;
use lscan_core::ocr::{build_engines, fetch_best_transcription, prepare_image};
use lscan_core::store::ScanStore;

use super::{format_record, load_config, open_store, OutputFormat};

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// Label photo (PNG, JPEG, ...)
    #[arg(required = true)]
    image: PathBuf,

    /// OCR engine (default: from config)
    #[arg(short, long, value_enum)]
    engine: Option<EngineArg>,

    /// Save the scan to history
    #[arg(long)]
    save: bool,

    /// Warehouse location code stored with the scan
    #[arg(short, long)]
    location: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Send the image as-is, without preprocessing
    #[arg(long)]
    raw: bool,

    /// Print the OCR transcription
    #[arg(long)]
    show_text: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum EngineArg {
    /// OCR.space hosted API
    OcrSpace,
    /// Google Cloud Vision
    GoogleVision,
    /// Local ONNX models
    Local,
    /// Every configured engine, best transcription wins
    Best,
}

impl From<EngineArg> for EngineChoice {
    fn from(arg: EngineArg) -> Self {
        match arg {
            EngineArg::OcrSpace => EngineChoice::OcrSpace,
            EngineArg::GoogleVision => EngineChoice::GoogleVision,
            EngineArg::Local => EngineChoice::Local,
            EngineArg::Best => EngineChoice::Best,
        }
    }
}

pub async fn run(args: ScanArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.image.exists() {
        anyhow::bail!("Input file not found: {}", args.image.display());
    }

    let choice = args.engine.map(EngineChoice::from).unwrap_or(config.ocr.engine);
    let engines = build_engines(&config.ocr, choice)?;

    info!("Scanning {} with {:?}", args.image.display(), choice);

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));

    pb.set_message("Preparing image...");
    let bytes = std::fs::read(&args.image)?;
    let image = if config.ocr.preprocess && !args.raw {
        prepare_image(&bytes, config.ocr.max_image_width)?
    } else {
        bytes
    };

    pb.set_message(format!("Running {} OCR engine(s)...", engines.len()));
    let transcription = match fetch_best_transcription(&engines, &image).await {
        Ok(t) => t,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e.into());
        }
    };
    pb.finish_and_clear();

    let record = LabelParser::with_config(&config.extraction).parse(&transcription.text);

    if args.show_text {
        println!("{}", style("Transcription:").bold());
        println!("{}", transcription.text.trim_end());
        println!();
    }

    println!("{}", format_record(&record, args.format)?);

    eprintln!(
        "{} {} (score {:.1}) in {}ms",
        style("ℹ").blue(),
        transcription.engine,
        transcription.score,
        start.elapsed().as_millis()
    );

    if record.is_empty() {
        eprintln!(
            "{} No fields recognized. Try a sharper photo or another engine.",
            style("!").yellow()
        );
    }

    if args.save {
        let mut store = open_store(&config)?;
        let scan = ScanRecord::new(transcription.text, record).with_location(args.location);
        let id = store.save(scan)?;
        println!("{} Saved scan #{}", style("✓").green(), id);
    }

    Ok(())
}
