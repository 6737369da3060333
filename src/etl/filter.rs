//! Filter trait for dropping rows between transform and load

/// Filter trait for keeping a subset of items
///
/// Filters are pure and order-preserving: they only remove items, never add
/// or reorder them.
///
/// # Example
/// ```
/// use olympics_cleaner::etl::Filter;
///
/// struct EvenOnly;
///
/// impl Filter for EvenOnly {
///     type Item = i32;
///
///     fn keep(&self, item: &Self::Item) -> bool {
///         item % 2 == 0
///     }
/// }
///
/// assert_eq!(EvenOnly.filter_many(vec![1, 2, 3, 4]), vec![2, 4]);
/// ```
pub trait Filter {
    /// The type of items being filtered
    type Item;

    /// Whether an item is retained
    fn keep(&self, item: &Self::Item) -> bool;

    /// Retain the matching items, preserving their relative order
    fn filter_many(&self, items: Vec<Self::Item>) -> Vec<Self::Item> {
        items.into_iter().filter(|item| self.keep(item)).collect()
    }
}
