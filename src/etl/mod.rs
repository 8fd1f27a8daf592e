//! Core ETL (Extract, Transform, Load) abstractions
//!
//! This module provides trait definitions for building data pipelines
//! that extract data from sources, transform it, and load it to destinations.
//! All stages are synchronous and run to completion one after another.

mod extract;
mod load;
mod pipeline;
mod transform;

pub use extract::Extractor;
pub use load::Loader;
pub use pipeline::{Pipeline, RunReport};
pub use transform::Transformer;

use crate::table::Table;

/// Number of records in a batch passed between stages
pub trait RecordCount {
    fn record_count(&self) -> usize;
}

impl RecordCount for Table {
    fn record_count(&self) -> usize {
        self.len()
    }
}

impl<T> RecordCount for Vec<T> {
    fn record_count(&self) -> usize {
        self.len()
    }
}
