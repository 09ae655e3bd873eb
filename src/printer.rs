//! The printing collaborator seam.
//!
//! The core produces formatted receipt text; getting it onto paper is an
//! external concern behind `ReceiptPrinter`. The stock implementation
//! appends to a spool file (handy for development and for feeding a real
//! thermal-printer driver out of band); tests substitute failing fakes.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::PrintError;

/// Where a rendered receipt goes after submit.
pub trait ReceiptPrinter {
    fn print(&mut self, text: &str) -> Result<(), PrintError>;
}

/// Form-feed between receipts in the spool file, mirroring the paper cut.
const RECEIPT_SEPARATOR: char = '\u{c}';

/// Appends each receipt to a spool file.
pub struct FilePrinter {
    path: PathBuf,
}

impl FilePrinter {
    pub fn new(path: &Path) -> Self {
        Self { path: path.to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReceiptPrinter for FilePrinter {
    fn print(&mut self, text: &str) -> Result<(), PrintError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| PrintError(format!("creating {}: {e}", parent.display())))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| PrintError(format!("opening {}: {e}", self.path.display())))?;
        file.write_all(text.as_bytes())
            .and_then(|_| writeln!(file, "{RECEIPT_SEPARATOR}"))
            .map_err(|e| PrintError(format!("writing {}: {e}", self.path.display())))?;
        Ok(())
    }
}
