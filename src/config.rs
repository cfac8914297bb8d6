//! Launcher configuration.
//!
//! Precedence, highest first: CLI flags, optional `config.json` in the data
//! directory, built-in defaults. The config file is optional; a missing file
//! is not an error, a malformed one is.
use crate::cli::RootArgs;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

pub const CONFIG_FILE: &str = "config.json";
pub const DEFAULT_CURRENCY: &str = "Rs.";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub receipt_dir: PathBuf,
    pub currency: String,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    receipt_dir: Option<PathBuf>,
    currency: Option<String>,
}

pub fn load(args: &RootArgs) -> Result<AppConfig> {
    let data_dir = args.data_dir.clone().unwrap_or_else(|| PathBuf::from("."));
    let file = load_file_optional(&data_dir)?.unwrap_or_default();

    let receipt_dir = args
        .receipt_dir
        .clone()
        .or(file.receipt_dir)
        .unwrap_or_else(|| data_dir.clone());
    let currency = file
        .currency
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
    if currency.trim().is_empty() {
        bail!("config currency must not be empty");
    }

    Ok(AppConfig {
        data_dir,
        receipt_dir,
        currency,
    })
}

fn load_file_optional(data_dir: &std::path::Path) -> Result<Option<ConfigFile>> {
    let path = data_dir.join(CONFIG_FILE);
    if !path.is_file() {
        return Ok(None);
    }
    let content =
        fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let file =
        serde_json::from_str(&content).with_context(|| format!("parse {}", path.display()))?;
    Ok(Some(file))
}
