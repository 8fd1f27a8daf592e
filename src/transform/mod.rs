//! Transform implementations for payroll tables

mod salary;

pub use salary::{NET_SALARY_COLUMN, SALARY_COLUMN, SalaryTransformer, TAX_COLUMN, TAX_RATE};
