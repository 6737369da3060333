//! Extractor trait for reading source tables

use eyre::Result;

/// Extractor trait for extracting rows from a source
///
/// Implementors define how to extract items from sources like:
/// - Delimited text files
/// - In-memory fixtures
///
/// # Example
/// ```no_run
/// use olympics_cleaner::etl::Extractor;
/// use eyre::Result;
/// use std::path::PathBuf;
///
/// struct LineExtractor {
///     path: PathBuf,
/// }
///
/// impl Extractor for LineExtractor {
///     type Item = String;
///
///     fn extract(&self) -> Result<Vec<Self::Item>> {
///         let content = std::fs::read_to_string(&self.path)?;
///         Ok(content.lines().map(str::to_string).collect())
///     }
/// }
/// ```
pub trait Extractor {
    /// The type of items extracted
    type Item;

    /// Extract every item from the source, in source order
    ///
    /// # Errors
    /// Returns an error if extraction fails (missing file, malformed table, etc.)
    fn extract(&self) -> Result<Vec<Self::Item>>;
}
