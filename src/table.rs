//! In-memory record table
//!
//! A [`Table`] is an ordered list of column names plus an ordered list of rows.
//! Every row has exactly one [`Cell`] per column. Stages never mutate a table
//! they receive; they build a new one.

use std::fmt;

/// Markers read as a missing value
const NULL_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A single table value
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Int(i64),
    Float(f64),
    /// Text other than a missing-value marker; `""` or `"NA"` here would be
    /// written as-is and read back as [`Cell::Null`]
    Text(String),
}

impl Cell {
    /// Parse a raw delimited field
    ///
    /// Missing-value markers become [`Cell::Null`], integers [`Cell::Int`],
    /// other numbers [`Cell::Float`] and everything else [`Cell::Text`].
    ///
    /// # Example
    /// ```
    /// use payroll_etl::table::Cell;
    ///
    /// assert_eq!(Cell::parse(""), Cell::Null);
    /// assert_eq!(Cell::parse("42"), Cell::Int(42));
    /// assert_eq!(Cell::parse("3000.0"), Cell::Float(3000.0));
    /// assert_eq!(Cell::parse("Alice"), Cell::Text("Alice".into()));
    /// ```
    pub fn parse(raw: &str) -> Self {
        if NULL_MARKERS.contains(&raw) {
            return Cell::Null;
        }
        if let Ok(i) = raw.parse::<i64>() {
            return Cell::Int(i);
        }
        match raw.parse::<f64>() {
            Ok(f) if f.is_nan() => Cell::Null,
            Ok(f) => Cell::Float(f),
            Err(_) => Cell::Text(raw.to_string()),
        }
    }

    /// True for [`Cell::Null`] and for a NaN float
    pub fn is_null(&self) -> bool {
        match self {
            Cell::Null => true,
            Cell::Float(f) => f.is_nan(),
            _ => false,
        }
    }

    /// Numeric value, if the cell holds a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Int(i) => Some(*i as f64),
            Cell::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => Ok(()),
            Cell::Int(i) => write!(f, "{i}"),
            // Integral floats keep a trailing ".0" so they read back as floats
            Cell::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{v:.1}"),
            Cell::Float(v) => write!(f, "{v}"),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        if value.is_nan() {
            Cell::Null
        } else {
            Cell::Float(value)
        }
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        if NULL_MARKERS.contains(&value) {
            Cell::Null
        } else {
            Cell::Text(value.to_string())
        }
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Cell::Null)
    }
}

/// Returned by [`Table::new`] when a row does not match the column count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowWidthError {
    /// Zero-based index of the offending row
    pub row: usize,
    pub expected: usize,
    pub found: usize,
}

impl fmt::Display for RowWidthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row {} has {} fields, expected {}",
            self.row, self.found, self.expected
        )
    }
}

impl std::error::Error for RowWidthError {}

/// Ordered rows sharing one ordered set of columns
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Build a table, checking that every row has one cell per column
    pub fn new(
        columns: Vec<String>,
        rows: Vec<Vec<Cell>>,
    ) -> std::result::Result<Self, RowWidthError> {
        if let Some((row, cells)) = rows
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != columns.len())
        {
            return Err(RowWidthError {
                row,
                expected: columns.len(),
                found: cells.len(),
            });
        }
        Ok(Self { columns, rows })
    }

    /// A table with columns and no rows
    pub fn empty(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell at `row` in the named column
    pub fn get(&self, row: usize, column: &str) -> Option<&Cell> {
        let col = self.column_index(column)?;
        self.rows.get(row).map(|cells| &cells[col])
    }

    /// All cells of the named column, in row order
    pub fn column(&self, name: &str) -> Option<Vec<&Cell>> {
        let col = self.column_index(name)?;
        Some(self.rows.iter().map(|cells| &cells[col]).collect())
    }
}
