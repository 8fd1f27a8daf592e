//! Loader trait for writing data to destinations

use crate::error::Result;

/// Loader trait for loading a batch to a destination
///
/// Returns the number of records written.
///
/// # Example
/// ```no_run
/// use payroll_etl::etl::Loader;
/// use payroll_etl::error::Result;
/// use payroll_etl::table::Table;
///
/// struct Discard;
///
/// impl Loader for Discard {
///     type Input = Table;
///
///     fn load(&self, input: &Self::Input) -> Result<usize> {
///         Ok(input.len())
///     }
/// }
/// ```
pub trait Loader {
    /// The batch type accepted
    type Input;

    /// Load a batch to the destination
    ///
    /// # Errors
    /// Returns an error if the destination cannot be written
    fn load(&self, input: &Self::Input) -> Result<usize>;
}
