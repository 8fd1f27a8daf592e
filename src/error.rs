//! Error types for the payroll ETL stages
//!
//! Every stage reports failures through [`EtlError`]. The variant tells the
//! caller which kind of failure happened:
//!
//! - [`EtlError::FileAccess`] - a path is missing, unreadable or unwritable
//! - [`EtlError::Parse`] - the delimited content is malformed
//! - [`EtlError::Schema`] - a required column is absent or holds the wrong type

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the extract, transform and load stages
#[derive(Debug, Error)]
pub enum EtlError {
    /// The file could not be opened, read, created or written
    #[error("cannot access {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid delimited text
    #[error("{}{}: {message}", .path.display(), line_suffix(.line))]
    Parse {
        path: PathBuf,
        line: Option<u64>,
        message: String,
    },

    /// The table does not have the shape the transform needs
    #[error("column '{column}' {reason}")]
    Schema { column: String, reason: String },
}

fn line_suffix(line: &Option<u64>) -> String {
    line.map(|l| format!(" (line {l})")).unwrap_or_default()
}

/// Kind of an [`EtlError`], for callers that only branch on the category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    FileAccess,
    Parse,
    Schema,
}

impl EtlError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EtlError::FileAccess { .. } => ErrorKind::FileAccess,
            EtlError::Parse { .. } => ErrorKind::Parse,
            EtlError::Schema { .. } => ErrorKind::Schema,
        }
    }

    pub(crate) fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EtlError::FileAccess {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(
        path: impl Into<PathBuf>,
        line: Option<u64>,
        message: impl Into<String>,
    ) -> Self {
        EtlError::Parse {
            path: path.into(),
            line,
            message: message.into(),
        }
    }

    pub(crate) fn missing_column(column: impl Into<String>) -> Self {
        EtlError::Schema {
            column: column.into(),
            reason: "is missing".to_string(),
        }
    }
}

/// Result alias for the ETL stages
pub type Result<T> = std::result::Result<T, EtlError>;
