//! Read-only analysis over the cleaned tables

mod crossref;

pub use crossref::{CountryMismatch, CrossReferenceAnalyzer, CrossReferenceReport};
