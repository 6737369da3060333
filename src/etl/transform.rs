//! Transformer trait for data transformation

use eyre::Result;

/// Transformer trait for transforming data items
///
/// Implementors define how to transform items:
/// - Field extraction (splitting compound text into typed columns)
/// - Column selection and renaming
/// - Format normalization
///
/// # Example
/// ```
/// use olympics_cleaner::etl::Transformer;
/// use eyre::Result;
///
/// struct Trimmer;
///
/// impl Transformer for Trimmer {
///     type Input = String;
///     type Output = String;
///
///     fn transform(&self, input: Self::Input) -> Result<Self::Output> {
///         Ok(input.trim().to_string())
///     }
/// }
///
/// assert_eq!(Trimmer.transform("  Paris ".to_string()).unwrap(), "Paris");
/// ```
pub trait Transformer {
    /// Input item type
    type Input;

    /// Output item type after transformation
    type Output;

    /// Transform a single item
    ///
    /// # Errors
    /// Returns an error if transformation fails. Field-level parse failures
    /// are not errors; they are recorded on the record instead.
    fn transform(&self, input: Self::Input) -> Result<Self::Output>;

    /// Transform multiple items (default batch implementation)
    fn transform_many(&self, inputs: Vec<Self::Input>) -> Result<Vec<Self::Output>> {
        inputs.into_iter().map(|i| self.transform(i)).collect()
    }
}
