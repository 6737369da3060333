//! Pipeline orchestration for ETL operations

use super::{Extractor, Filter, Loader, Transformer};
use eyre::Result;

/// Outcome of a pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineRun<T> {
    /// Number of items read from the source, before filtering
    pub extracted: usize,
    /// Items written by the loader, in source order
    pub loaded: Vec<T>,
}

/// ETL Pipeline that orchestrates Extract, Transform, Filter and Load operations
///
/// # Type Parameters
/// - `E`: Extractor type
/// - `T`: Transformer type (must transform from E::Item)
/// - `L`: Loader type (must load T::Output)
///
/// # Example
/// ```
/// use olympics_cleaner::etl::Pipeline;
/// # use olympics_cleaner::etl::{Extractor, Filter, Loader, Transformer};
/// # use eyre::Result;
/// # struct MyExtractor;
/// # impl Extractor for MyExtractor {
/// #     type Item = i32;
/// #     fn extract(&self) -> Result<Vec<Self::Item>> { Ok(vec![1, 2, 3]) }
/// # }
/// # struct MyTransformer;
/// # impl Transformer for MyTransformer {
/// #     type Input = i32;
/// #     type Output = i32;
/// #     fn transform(&self, input: Self::Input) -> Result<Self::Output> { Ok(input) }
/// # }
/// # struct OddOnly;
/// # impl Filter for OddOnly {
/// #     type Item = i32;
/// #     fn keep(&self, item: &i32) -> bool { item % 2 == 1 }
/// # }
/// # struct MyLoader;
/// # impl Loader for MyLoader {
/// #     type Item = i32;
/// #     fn load(&self, items: &[Self::Item]) -> Result<usize> { Ok(items.len()) }
/// # }
///
/// # fn example() -> Result<()> {
/// let pipeline = Pipeline::new(MyExtractor, MyTransformer, MyLoader).with_filter(OddOnly);
///
/// let run = pipeline.run()?;
/// assert_eq!(run.extracted, 3);
/// assert_eq!(run.loaded, vec![1, 3]);
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
pub struct Pipeline<E, T, L>
where
    T: Transformer,
{
    extractor: E,
    transformer: T,
    filters: Vec<Box<dyn Filter<Item = T::Output>>>,
    loader: L,
}

impl<E, T, L> Pipeline<E, T, L>
where
    E: Extractor,
    T: Transformer<Input = E::Item>,
    L: Loader<Item = T::Output>,
{
    /// Create a new pipeline
    pub fn new(extractor: E, transformer: T, loader: L) -> Self {
        Self {
            extractor,
            transformer,
            filters: Vec::new(),
            loader,
        }
    }

    /// Add a filter stage, applied after transformation in insertion order
    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: Filter<Item = T::Output> + 'static,
    {
        self.filters.push(Box::new(filter));
        self
    }

    /// Run the complete ETL pipeline
    ///
    /// Steps:
    /// 1. Extract items from source
    /// 2. Transform each item
    /// 3. Apply each filter
    /// 4. Load items to destination
    ///
    /// Returns the loaded items so later stages can read them
    ///
    /// # Errors
    /// Returns an error if any stage fails
    pub fn run(&self) -> Result<PipelineRun<T::Output>> {
        let staged = self.stage()?;
        self.finish(staged)
    }

    /// Extract, transform and filter without touching the destination
    ///
    /// Callers combining several pipelines can stage all of them before
    /// any loader runs, so a failing source leaves no partial output.
    pub fn stage(&self) -> Result<PipelineRun<T::Output>> {
        log::info!("Starting ETL pipeline");

        // Extract
        log::debug!("Extracting from source...");
        let items = self.extractor.extract()?;
        let extracted = items.len();
        log::info!("Extracted {} items", extracted);

        if items.is_empty() {
            log::warn!("No items extracted, writing an empty table");
        }

        // Transform
        log::debug!("Transforming items...");
        let mut transformed = self.transformer.transform_many(items)?;
        log::info!("Transformed {} items", transformed.len());

        // Filter
        for filter in &self.filters {
            let before = transformed.len();
            transformed = filter.filter_many(transformed);
            log::info!(
                "Filter retained {} of {} items",
                transformed.len(),
                before
            );
        }

        Ok(PipelineRun {
            extracted,
            loaded: transformed,
        })
    }

    /// Load previously staged items to the destination
    pub fn finish(&self, staged: PipelineRun<T::Output>) -> Result<PipelineRun<T::Output>> {
        log::debug!("Loading to destination...");
        let count = self.loader.load(&staged.loaded)?;
        log::info!("Loaded {} items", count);

        Ok(staged)
    }
}
