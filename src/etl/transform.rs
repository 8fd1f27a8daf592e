//! Transformer trait for data transformation

use crate::error::Result;

/// Transformer trait for turning one batch into a new one
///
/// Implementors take the input by reference and build a fresh output, so the
/// input batch is left untouched.
///
/// # Example
/// ```
/// use payroll_etl::etl::Transformer;
/// use payroll_etl::error::Result;
///
/// struct Doubler;
///
/// impl Transformer for Doubler {
///     type Input = Vec<i32>;
///     type Output = Vec<i32>;
///
///     fn transform(&self, input: &Self::Input) -> Result<Self::Output> {
///         Ok(input.iter().map(|i| i * 2).collect())
///     }
/// }
///
/// assert_eq!(Doubler.transform(&vec![1, 2]).unwrap(), vec![2, 4]);
/// ```
pub trait Transformer {
    /// Input batch type
    type Input;

    /// Output batch type after transformation
    type Output;

    /// Transform a batch
    ///
    /// # Errors
    /// Returns an error if the input does not have the expected shape
    fn transform(&self, input: &Self::Input) -> Result<Self::Output>;
}
