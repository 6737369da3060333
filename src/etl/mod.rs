//! Core ETL (Extract, Transform, Load) abstractions
//!
//! This module provides trait definitions for building the cleaning pipeline:
//! tables are extracted from delimited files, transformed record by record,
//! filtered, and loaded back into delimited files.

mod extract;
mod filter;
mod load;
mod pipeline;
mod transform;

pub use extract::Extractor;
pub use filter::Filter;
pub use load::Loader;
pub use pipeline::{Pipeline, PipelineRun};
pub use transform::Transformer;
