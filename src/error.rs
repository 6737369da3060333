//! Error kinds raised while cleaning
//!
//! Fatal conditions (`FileAccess`, `Schema`) abort the run and are surfaced
//! through `eyre`. Field-level problems are collected as [`FieldParseError`]
//! values on the affected record and never abort anything.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal pipeline errors
#[derive(Error, Debug)]
pub enum CleanError {
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("schema mismatch in {}: {reason}", .path.display())]
    Schema { path: PathBuf, reason: String },
}

impl CleanError {
    pub fn schema(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Schema {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True for source-unreadable and destination-unwritable errors
    pub fn is_file_access(&self) -> bool {
        matches!(self, Self::Read { .. } | Self::Write { .. })
    }
}

/// The biography field a parse problem was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Name,
    BornDate,
    BornPlace,
    DiedDate,
    DiedPlace,
    Height,
    Weight,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Name => "name",
            FieldKind::BornDate => "born_date",
            FieldKind::BornPlace => "born_place",
            FieldKind::DiedDate => "died_date",
            FieldKind::DiedPlace => "died_place",
            FieldKind::Height => "height",
            FieldKind::Weight => "weight",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-fatal parse failure on one field of one record
///
/// The field itself is left at its explicit missing value; this only keeps
/// the raw text around for reporting.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unparseable {field}: {raw:?}")]
pub struct FieldParseError {
    pub field: FieldKind,
    pub raw: String,
}

impl FieldParseError {
    pub fn new(field: FieldKind, raw: impl Into<String>) -> Self {
        Self {
            field,
            raw: raw.into(),
        }
    }
}
