//! Config command - manage configuration.

use std::fs;
use std::path::Path;

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use lscan_core::models::config::LscanConfig;

use super::config_file;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current configuration (API keys masked)
    Show {
        /// Print API keys in clear text
        #[arg(long)]
        reveal: bool,
    },

    /// Write a configuration file with default values
    Init {
        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },

    /// Get a value by dotted key (e.g. "ocr.engine")
    Get {
        /// Configuration key
        key: String,

        /// Print API keys in clear text
        #[arg(long)]
        reveal: bool,
    },

    /// Set a value by dotted key; the value is parsed as JSON when possible
    Set {
        /// Configuration key (e.g. "ocr.google_vision.api_key")
        key: String,
        /// New value
        value: String,
    },

    /// Show configuration file path
    Path,
}

pub fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = config_file(config_path);

    match args.command {
        ConfigCommand::Show { reveal } => {
            if !path.exists() {
                eprintln!("{} No config file found, showing defaults.", style("ℹ").blue());
            }
            let config = visible(read_or_default(&path)?, reveal);
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
        ConfigCommand::Init { force } => init(&path, force),
        ConfigCommand::Get { key, reveal } => {
            let json = serde_json::to_value(visible(read_or_default(&path)?, reveal))?;
            let value = lookup(&json, &key)
                .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;
            println!("{}", serde_json::to_string_pretty(value)?);
            Ok(())
        }
        ConfigCommand::Set { key, value } => set(&path, &key, &value),
        ConfigCommand::Path => {
            println!("Configuration file: {}", path.display());
            if path.exists() {
                println!("Status: {}", style("exists").green());
            } else {
                println!("Status: {}", style("not created").yellow());
                println!();
                println!("Run 'lscan config init' to create a configuration file.");
            }
            Ok(())
        }
    }
}

fn read_or_default(path: &Path) -> anyhow::Result<LscanConfig> {
    if path.exists() {
        Ok(LscanConfig::from_file(path)?)
    } else {
        Ok(LscanConfig::default())
    }
}

fn visible(config: LscanConfig, reveal: bool) -> LscanConfig {
    if reveal { config } else { config.redacted() }
}

fn init(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    ensure_parent(path)?;
    LscanConfig::default().save(path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        path.display()
    );
    Ok(())
}

fn set(path: &Path, key: &str, raw: &str) -> anyhow::Result<()> {
    let config = read_or_default(path)?;
    let mut json = serde_json::to_value(&config)?;

    let new_value: Value =
        serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));

    // Only existing keys can be set; `storage.path` is absent until first set.
    if key == "storage.path" && lookup(&json, key).is_none() {
        json["storage"]["path"] = Value::Null;
    }
    let slot = lookup_mut(&mut json, key)
        .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;
    if slot.is_object() {
        anyhow::bail!("{} is a section; set one of its keys instead", key);
    }
    *slot = new_value.clone();

    let config: LscanConfig = serde_json::from_value(json)
        .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e))?;

    ensure_parent(path)?;
    config.save(path)?;

    let shown = if key.ends_with("api_key") {
        "\"********\"".to_string()
    } else {
        serde_json::to_string(&new_value)?
    };
    println!("{} Set {} = {}", style("✓").green(), key, shown);
    Ok(())
}

fn lookup<'a>(json: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(json, |node, part| node.get(part))
}

fn lookup_mut<'a>(json: &'a mut Value, key: &str) -> Option<&'a mut Value> {
    key.split('.').try_fold(json, |node, part| node.get_mut(part))
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;

    #[test]
    fn test_lookup_nested() {
        let json = json!({ "ocr": { "engine": "best", "ocr_space": { "engines": [1, 2] } } });
        assert_eq!(lookup(&json, "ocr.engine"), Some(&json!("best")));
        assert_eq!(lookup(&json, "ocr.ocr_space.engines"), Some(&json!([1, 2])));
        assert_eq!(lookup(&json, "ocr.missing"), None);
    }

    #[test]
    fn test_set_rejects_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        assert!(set(&path, "ocr.nonsense", "1").is_err());
        assert!(set(&path, "ocr", "1").is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_set_validates_types() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        assert!(set(&path, "ocr.engine", "sideways").is_err());

        set(&path, "ocr.engine", "google-vision").unwrap();
        set(&path, "extraction.strict_dates", "false").unwrap();
        set(&path, "storage.path", "/tmp/scans.json").unwrap();

        let config = LscanConfig::from_file(&path).unwrap();
        assert_eq!(config.ocr.engine, lscan_core::EngineChoice::GoogleVision);
        assert!(!config.extraction.strict_dates);
        assert_eq!(config.storage.path, Some(PathBuf::from("/tmp/scans.json")));
    }
}
