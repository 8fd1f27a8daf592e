//! Extractor trait for reading data from a source

use crate::error::Result;

/// Extractor trait for extracting a batch from a source
///
/// # Example
/// ```no_run
/// use payroll_etl::etl::Extractor;
/// use payroll_etl::error::Result;
/// use payroll_etl::table::Table;
///
/// struct EmptySource;
///
/// impl Extractor for EmptySource {
///     type Output = Table;
///
///     fn extract(&self) -> Result<Self::Output> {
///         Ok(Table::empty(vec!["employee_id".into(), "salary".into()]))
///     }
/// }
/// ```
pub trait Extractor {
    /// The batch type produced
    type Output;

    /// Extract a batch from the source
    ///
    /// # Errors
    /// Returns an error if the source cannot be read or parsed
    fn extract(&self) -> Result<Self::Output>;
}
