//! Runtime configuration.
//!
//! A small JSON file with per-field defaults; every field may be omitted.
//! CLI flags override individual fields after loading.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::render::DEFAULT_RECEIPT_WIDTH;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// SQLite database for submitted orders.
    pub db_path: PathBuf,
    /// Spool file rendered receipts are appended to.
    pub print_spool: PathBuf,
    /// Diagnostics log (the terminal itself belongs to the UI).
    pub log_file: PathBuf,
    /// Receipt column width.
    pub receipt_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("data/receipt.db"),
            print_spool: PathBuf::from("data/receipts.txt"),
            log_file: std::env::temp_dir().join("receipt-order.log"),
            receipt_width: DEFAULT_RECEIPT_WIDTH,
        }
    }
}

impl Config {
    /// Load from an explicit path, or fall back to defaults when none is
    /// given. An explicitly named file that is missing or malformed is an
    /// error, not a silent fallback.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}
