//! CLI helper functions

use crate::{
    etl::{Extractor, RunReport},
    payroll,
    storage::CsvReader,
    transform::SALARY_COLUMN,
};
use eyre::{Context, Result, eyre};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::path::PathBuf;

pub const SOURCE_VAR: &str = "PAYROLL_SOURCE";
pub const DESTINATION_VAR: &str = "PAYROLL_DESTINATION";

/// Resolve a path from an argument, falling back to an environment variable
///
/// Expected environment variables:
/// - PAYROLL_SOURCE: input CSV path (used when no source argument is given)
/// - PAYROLL_DESTINATION: output CSV path (used when no destination argument is given)
pub fn resolve_path(arg: Option<String>, var: &str) -> Result<PathBuf> {
    match arg {
        Some(path) => Ok(PathBuf::from(path)),
        None => std::env::var(var)
            .map(PathBuf::from)
            .with_context(|| format!("No path given and {} environment variable not set", var)),
    }
}

/// Convert a delimiter character to the single byte the CSV reader expects
pub fn parse_delimiter(delimiter: char) -> Result<u8> {
    u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| eyre!("Delimiter must be a single ASCII character, got '{}'", delimiter))
}

/// Run the payroll pipeline from `source` to `destination`
///
/// Pipeline: CsvReader → SalaryTransformer → CsvWriter
pub fn run_payroll(
    source: Option<String>,
    destination: Option<String>,
    delimiter: char,
) -> Result<RunReport> {
    let source = resolve_path(source, SOURCE_VAR)?;
    let destination = resolve_path(destination, DESTINATION_VAR)?;
    let delimiter = parse_delimiter(delimiter)?;

    let report = payroll::run_with_delimiter(&source, &destination, delimiter)
        .wrap_err_with(|| format!("Payroll ETL failed for {}", source.display()))?;

    log::info!(
        "✓ Wrote {} row(s) to {}",
        report.loaded,
        destination.display()
    );

    Ok(report)
}

/// Summary of a source file, produced without transforming or writing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inspection {
    pub path: PathBuf,
    pub columns: Vec<String>,
    pub rows: usize,
    /// Rows the transform would drop, or `None` when there is no salary column
    pub null_salaries: Option<usize>,
}

/// Extract `source` and summarize its shape
pub fn inspect(source: Option<String>, delimiter: char) -> Result<Inspection> {
    let source = resolve_path(source, SOURCE_VAR)?;
    let reader = CsvReader::new(&source).with_delimiter(parse_delimiter(delimiter)?);

    log::info!("Inspecting {}", source.display().bright_black());
    let table = reader
        .extract()
        .wrap_err_with(|| format!("Failed to inspect {}", source.display()))?;

    let null_salaries = table
        .column(SALARY_COLUMN)
        .map(|cells| cells.iter().filter(|c| c.is_null()).count());

    if null_salaries.is_none() {
        log::warn!("{} has no '{}' column", source.display(), SALARY_COLUMN);
    }

    Ok(Inspection {
        path: source,
        columns: table.columns().to_vec(),
        rows: table.len(),
        null_salaries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EtlError, ErrorKind};
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(',').unwrap(), b',');
        assert_eq!(parse_delimiter('\t').unwrap(), b'\t');
        assert!(parse_delimiter('é').is_err());
        assert!(parse_delimiter('€').is_err());
    }

    #[test]
    #[serial]
    fn test_resolve_path_prefers_argument() {
        unsafe { std::env::set_var(SOURCE_VAR, "from-env.csv") };
        let path = resolve_path(Some("from-arg.csv".into()), SOURCE_VAR).unwrap();
        assert_eq!(path, PathBuf::from("from-arg.csv"));
        unsafe { std::env::remove_var(SOURCE_VAR) };
    }

    #[test]
    #[serial]
    fn test_resolve_path_from_env() {
        unsafe { std::env::set_var(DESTINATION_VAR, "out/payroll.csv") };
        let path = resolve_path(None, DESTINATION_VAR).unwrap();
        assert_eq!(path, PathBuf::from("out/payroll.csv"));
        unsafe { std::env::remove_var(DESTINATION_VAR) };
    }

    #[test]
    #[serial]
    fn test_resolve_path_missing() {
        unsafe { std::env::remove_var(SOURCE_VAR) };
        let err = resolve_path(None, SOURCE_VAR).unwrap_err();
        assert!(err.to_string().contains(SOURCE_VAR));
    }

    #[test]
    fn test_run_payroll_keeps_stage_error() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("in.csv");
        std::fs::write(&source, "employee_id,wage\n1,10\n").unwrap();

        let err = run_payroll(
            Some(source.display().to_string()),
            Some(temp.path().join("out.csv").display().to_string()),
            ',',
        )
        .unwrap_err();

        let etl = err.downcast_ref::<EtlError>().expect("stage error in chain");
        assert_eq!(etl.kind(), ErrorKind::Schema);
    }

    #[test]
    fn test_inspect() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("in.csv");
        std::fs::write(&source, "employee_id,salary\n1,3000.0\n2,\n3,NA\n").unwrap();

        let inspection = inspect(Some(source.display().to_string()), ',').unwrap();
        assert_eq!(inspection.columns, ["employee_id", "salary"]);
        assert_eq!(inspection.rows, 3);
        assert_eq!(inspection.null_salaries, Some(2));
    }

    #[test]
    fn test_inspect_without_salary() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("in.csv");
        std::fs::write(&source, "employee_id\n1\n").unwrap();

        let inspection = inspect(Some(source.display().to_string()), ',').unwrap();
        assert_eq!(inspection.null_salaries, None);
    }
}
