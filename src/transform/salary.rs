//! Salary transformer
//!
//! Drops rows without a salary and derives `tax` and `net_salary` for the rest.

use crate::error::{EtlError, Result};
use crate::etl::Transformer;
use crate::table::{Cell, Table};

/// Flat tax rate applied to every salary
pub const TAX_RATE: f64 = 0.1;

pub const SALARY_COLUMN: &str = "salary";
pub const TAX_COLUMN: &str = "tax";
pub const NET_SALARY_COLUMN: &str = "net_salary";

/// Transformer that filters out rows with a null `salary` and appends
/// `tax = salary * 0.1` and `net_salary = salary - tax`
///
/// Retained rows keep their order. Only `salary` nullity drops a row; nulls in
/// other columns are carried through. If the input already has a `tax` or
/// `net_salary` column, its values are replaced in place.
///
/// # Example
/// ```
/// use payroll_etl::etl::Transformer;
/// use payroll_etl::table::{Cell, Table};
/// use payroll_etl::transform::SalaryTransformer;
///
/// let input = Table::new(
///     vec!["employee_id".into(), "salary".into()],
///     vec![
///         vec![Cell::Int(1), Cell::Float(3000.0)],
///         vec![Cell::Int(2), Cell::Null],
///     ],
/// )
/// .unwrap();
///
/// let output = SalaryTransformer::new().transform(&input).unwrap();
/// assert_eq!(output.columns(), ["employee_id", "salary", "tax", "net_salary"]);
/// assert_eq!(output.len(), 1);
/// assert_eq!(output.get(0, "tax"), Some(&Cell::Float(300.0)));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SalaryTransformer;

impl SalaryTransformer {
    pub fn new() -> Self {
        Self
    }

    /// Tax owed on a gross salary
    pub fn tax(salary: f64) -> f64 {
        salary * TAX_RATE
    }
}

impl Transformer for SalaryTransformer {
    type Input = Table;
    type Output = Table;

    fn transform(&self, input: &Self::Input) -> Result<Self::Output> {
        let salary_col = input
            .column_index(SALARY_COLUMN)
            .ok_or_else(|| EtlError::missing_column(SALARY_COLUMN))?;

        let mut columns = input.columns().to_vec();
        let tax_col = slot(&mut columns, TAX_COLUMN);
        let net_col = slot(&mut columns, NET_SALARY_COLUMN);

        let mut rows = Vec::with_capacity(input.len());
        for (index, cells) in input.rows().iter().enumerate() {
            let cell = &cells[salary_col];
            if cell.is_null() {
                continue;
            }

            let salary = cell.as_f64().ok_or_else(|| EtlError::Schema {
                column: SALARY_COLUMN.to_string(),
                reason: format!("holds non-numeric value '{}' in row {}", cell, index + 1),
            })?;
            if !salary.is_finite() {
                return Err(EtlError::Schema {
                    column: SALARY_COLUMN.to_string(),
                    reason: format!("holds non-finite value '{}' in row {}", cell, index + 1),
                });
            }
            let tax = Self::tax(salary);

            let mut row = cells.clone();
            row.resize(columns.len(), Cell::Null);
            row[tax_col] = Cell::from(tax);
            row[net_col] = Cell::from(salary - tax);
            rows.push(row);
        }

        let dropped = input.len() - rows.len();
        if dropped > 0 {
            log::warn!("Dropped {} rows without a salary", dropped);
        }

        Table::new(columns, rows).map_err(|e| EtlError::Schema {
            column: SALARY_COLUMN.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Index of `name` in `columns`, appending it if absent
fn slot(columns: &mut Vec<String>, name: &str) -> usize {
    match columns.iter().position(|c| c == name) {
        Some(index) => index,
        None => {
            columns.push(name.to_string());
            columns.len() - 1
        }
    }
}
