//! File system storage operations
//!
//! This module handles all file I/O:
//! - Delimited table reading with schema checks
//! - Delimited table writing with a fixed header
//! - JSON report writing

mod csv_table;
mod report;

pub use csv_table::{CsvReader, CsvRecord, CsvWriter, DELIMITER, SourceRow};
pub use report::JsonReportWriter;
