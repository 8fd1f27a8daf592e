//! Payroll ETL entry points
//!
//! Plain functions over the concrete stages, for callers that do not need to
//! assemble a [`Pipeline`] themselves.

use crate::error::Result;
use crate::etl::{Extractor, Loader, Pipeline, RunReport, Transformer};
use crate::storage::{CsvReader, CsvWriter};
use crate::table::Table;
use crate::transform::SalaryTransformer;

use owo_colors::OwoColorize;
use std::path::Path;

/// Read a comma-separated file into a table
///
/// # Errors
/// [`EtlError::FileAccess`](crate::error::EtlError::FileAccess) if the file
/// cannot be opened or read,
/// [`EtlError::Parse`](crate::error::EtlError::Parse) if it is not valid
/// delimited text.
pub fn extract(source: impl AsRef<Path>) -> Result<Table> {
    CsvReader::new(source).extract()
}

/// Drop rows without a salary and add `tax` and `net_salary`
///
/// # Errors
/// [`EtlError::Schema`](crate::error::EtlError::Schema) if the table has no
/// `salary` column.
pub fn transform(table: &Table) -> Result<Table> {
    SalaryTransformer::new().transform(table)
}

/// Write a table as a comma-separated file, replacing any existing file
///
/// # Errors
/// [`EtlError::FileAccess`](crate::error::EtlError::FileAccess) if the
/// destination cannot be created or written.
pub fn load(table: &Table, destination: impl AsRef<Path>) -> Result<()> {
    CsvWriter::new(destination).load(table).map(|_| ())
}

/// Extract from `source`, transform, and load to `destination`
///
/// Returns after the destination file has been written. Stage errors are
/// returned unchanged.
///
/// # Example
/// ```no_run
/// # fn example() -> payroll_etl::error::Result<()> {
/// let report = payroll_etl::run("data/input.csv", "data/output.csv")?;
/// println!("{} rows written", report.loaded);
/// # Ok(())
/// # }
/// ```
pub fn run(source: impl AsRef<Path>, destination: impl AsRef<Path>) -> Result<RunReport> {
    run_with_delimiter(source, destination, crate::storage::DEFAULT_DELIMITER)
}

/// [`run`] with a field delimiter other than `,`
pub fn run_with_delimiter(
    source: impl AsRef<Path>,
    destination: impl AsRef<Path>,
    delimiter: u8,
) -> Result<RunReport> {
    let source = source.as_ref();
    let destination = destination.as_ref();

    log::info!(
        "Running payroll ETL: {} -> {}",
        source.display().bright_black(),
        destination.display().bright_black()
    );

    let pipeline = Pipeline::new(
        CsvReader::new(source).with_delimiter(delimiter),
        SalaryTransformer::new(),
        CsvWriter::new(destination).with_delimiter(delimiter),
    );

    pipeline.run()
}
