//! JSON side-report output

use crate::error::CleanError;

use eyre::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Write a serializable report as pretty-printed JSON
pub struct JsonReportWriter {
    path: PathBuf,
}

impl JsonReportWriter {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write<T: Serialize>(&self, report: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(report)
            .with_context(|| format!("Failed to serialize report: {}", self.path.display()))?;

        std::fs::write(&self.path, format!("{}\n", json)).map_err(|source| CleanError::Write {
            path: self.path.clone(),
            source,
        })?;

        Ok(())
    }
}
