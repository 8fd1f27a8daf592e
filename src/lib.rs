//! Payroll ETL
//!
//! Reads employee compensation records from a delimited file, drops rows
//! without a salary, derives `tax` and `net_salary`, and writes the result.

pub mod cli;
pub mod error;
pub mod etl;
pub mod payroll;
pub mod storage;
pub mod table;
pub mod transform;

// Re-exports for convenience
pub use error::{ErrorKind, EtlError};
pub use etl::{Extractor, Loader, Pipeline, RunReport, Transformer};
pub use payroll::{extract, load, run, run_with_delimiter, transform};
pub use storage::{CsvReader, CsvWriter};
pub use table::{Cell, Table};
pub use transform::SalaryTransformer;
