//! Pipeline orchestration for ETL operations

use super::{Extractor, Loader, RecordCount, Transformer};
use crate::error::Result;
use owo_colors::OwoColorize;
use serde::Serialize;

/// Record counts observed during one pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Records read from the source
    pub extracted: usize,
    /// Records left after the transform
    pub transformed: usize,
    /// Records written to the destination
    pub loaded: usize,
}

impl RunReport {
    /// Records the transform removed
    pub fn dropped(&self) -> usize {
        self.extracted.saturating_sub(self.transformed)
    }
}

/// ETL Pipeline that runs Extract, Transform and Load in sequence
///
/// # Type Parameters
/// - `E`: Extractor type
/// - `T`: Transformer type (must accept E::Output)
/// - `L`: Loader type (must accept T::Output)
///
/// # Example
/// ```no_run
/// use payroll_etl::etl::Pipeline;
/// use payroll_etl::storage::{CsvReader, CsvWriter};
/// use payroll_etl::transform::SalaryTransformer;
///
/// # fn example() -> payroll_etl::error::Result<()> {
/// let pipeline = Pipeline::new(
///     CsvReader::new("input.csv"),
///     SalaryTransformer::new(),
///     CsvWriter::new("output.csv"),
/// );
///
/// let report = pipeline.run()?;
/// println!("Loaded {} rows", report.loaded);
/// # Ok(())
/// # }
/// ```
pub struct Pipeline<E, T, L> {
    extractor: E,
    transformer: T,
    loader: L,
}

impl<E, T, L> Pipeline<E, T, L>
where
    E: Extractor,
    E::Output: RecordCount,
    T: Transformer<Input = E::Output>,
    T::Output: RecordCount,
    L: Loader<Input = T::Output>,
{
    /// Create a new pipeline
    pub fn new(extractor: E, transformer: T, loader: L) -> Self {
        Self {
            extractor,
            transformer,
            loader,
        }
    }

    /// Run the complete ETL pipeline
    ///
    /// Steps:
    /// 1. Extract a batch from the source
    /// 2. Transform it into a new batch
    /// 3. Load that batch to the destination
    ///
    /// Returns once the loader has finished writing. An empty extraction still
    /// goes through transform and load so the destination is always written.
    ///
    /// # Errors
    /// Returns the first stage error unchanged
    pub fn run(&self) -> Result<RunReport> {
        log::info!("Starting ETL pipeline");

        log::debug!("Extracting from source...");
        let extracted = self.extractor.extract()?;
        let extracted_count = extracted.record_count();
        log::info!("Extracted {} records", extracted_count.cyan());

        if extracted_count == 0 {
            log::warn!("No records extracted, writing an empty result");
        }

        log::debug!("Transforming records...");
        let transformed = self.transformer.transform(&extracted)?;
        let transformed_count = transformed.record_count();
        log::info!("Transformed {} records", transformed_count.cyan());

        log::debug!("Loading to destination...");
        let loaded = self.loader.load(&transformed)?;
        log::info!("Loaded {} records", loaded.cyan());

        Ok(RunReport {
            extracted: extracted_count,
            transformed: transformed_count,
            loaded,
        })
    }
}
