//! Olympics Cleaner
//!
//! A field-extraction and normalization pipeline for the Olympedia athlete
//! biographies and results tables

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod etl;
pub mod olympics;
pub mod storage;
pub mod transform;

// Re-exports for convenience
pub use analysis::{CountryMismatch, CrossReferenceAnalyzer, CrossReferenceReport};
pub use config::CleaningConfig;
pub use error::{CleanError, FieldKind, FieldParseError};
pub use etl::{Extractor, Filter, Loader, Pipeline, Transformer};
pub use olympics::{BiographyCleaner, BiographyRecord, ResultCleaner, ResultRecord};
pub use storage::{CsvReader, CsvWriter, JsonReportWriter};
