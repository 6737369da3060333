//! Olympedia tables
//!
//! Raw rows as scraped, the cleaned records derived from them, and the
//! transformers between the two.

pub mod bios;
pub mod results;

pub use bios::{BiographyCleaner, BiographyRecord, BiographyRow, RawBiography};
pub use results::{RawResult, ResultCleaner, ResultRecord, ResultRow};

/// Trim a text field, treating blank text as absent
pub(crate) fn clean_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
