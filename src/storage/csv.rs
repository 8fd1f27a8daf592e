//! Delimited text (CSV) file operations

use crate::error::{EtlError, Result};
use crate::etl::{Extractor, Loader};
use crate::table::{Cell, Table};

use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Default field delimiter
pub const DEFAULT_DELIMITER: u8 = b',';

/// Read a delimited file with a header row into a [`Table`]
pub struct CsvReader {
    path: PathBuf,
    delimiter: u8,
}

impl CsvReader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            delimiter: DEFAULT_DELIMITER,
        }
    }

    /// Use a field delimiter other than `,`
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole file
    ///
    /// Column names and row order follow the file exactly. Each field is
    /// parsed with [`Cell::parse`].
    pub fn read(&self) -> Result<Table> {
        let data = std::fs::read(&self.path).map_err(|e| EtlError::file_access(&self.path, e))?;

        // The csv reader folds an unterminated quoted field into the rest of the file
        if let Some(line) = unclosed_quote(&data, self.delimiter) {
            return Err(EtlError::parse(
                &self.path,
                Some(line),
                "quoted field is never closed",
            ));
        }

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(false)
            .from_reader(data.as_slice());

        let columns: Vec<String> = reader
            .headers()
            .map_err(|e| self.csv_error(e))?
            .iter()
            .map(str::to_string)
            .collect();

        if columns.is_empty() {
            return Err(EtlError::parse(&self.path, None, "no header row"));
        }

        let mut seen = HashSet::new();
        if let Some(dup) = columns.iter().find(|c| !seen.insert(c.as_str())) {
            return Err(EtlError::parse(
                &self.path,
                Some(1),
                format!("duplicate column name '{}'", dup),
            ));
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| self.csv_error(e))?;
            rows.push(record.iter().map(Cell::parse).collect());
        }

        log::debug!(
            "Read {} rows with columns [{}] from {}",
            rows.len(),
            columns.join(", "),
            self.path.display()
        );

        // The csv reader already enforces a constant field count
        Table::new(columns, rows).map_err(|e| EtlError::parse(&self.path, None, e.to_string()))
    }

    fn csv_error(&self, err: csv::Error) -> EtlError {
        let line = err.position().map(|p| p.line());
        match err.into_kind() {
            csv::ErrorKind::Io(e) => EtlError::file_access(&self.path, e),
            csv::ErrorKind::UnequalLengths {
                expected_len, len, ..
            } => EtlError::parse(
                &self.path,
                line,
                format!("expected {} fields, found {}", expected_len, len),
            ),
            csv::ErrorKind::Utf8 { err, .. } => {
                EtlError::parse(&self.path, line, format!("invalid UTF-8: {}", err))
            }
            other => EtlError::parse(&self.path, line, format!("{:?}", other)),
        }
    }
}

/// Line on which a quoted field opens without a closing quote, if any
///
/// Quotes only open a field when they are its first byte, and `""` inside a
/// quoted field is an escaped quote.
fn unclosed_quote(data: &[u8], delimiter: u8) -> Option<u64> {
    let mut line = 1;
    let mut field_start = true;
    let mut open_at = None;
    let mut bytes = data.iter().peekable();

    while let Some(&b) = bytes.next() {
        if open_at.is_some() {
            if b == b'"' {
                if bytes.peek() == Some(&&b'"') {
                    bytes.next();
                } else {
                    open_at = None;
                    field_start = false;
                }
            }
        } else {
            if b == b'"' && field_start {
                open_at = Some(line);
            }
            field_start = b == delimiter || b == b'\n' || b == b'\r';
        }
        if b == b'\n' {
            line += 1;
        }
    }

    open_at
}

impl Extractor for CsvReader {
    type Output = Table;

    fn extract(&self) -> Result<Self::Output> {
        self.read()
    }
}

/// Write a [`Table`] as a delimited file with a header row
pub struct CsvWriter {
    path: PathBuf,
    delimiter: u8,
}

impl CsvWriter {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            delimiter: DEFAULT_DELIMITER,
        }
    }

    /// Use a field delimiter other than `,`
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the table, replacing any existing file
    ///
    /// Nothing is cleaned up on failure, so a failed write may leave a partial
    /// file behind.
    pub fn write(&self, table: &Table) -> Result<()> {
        let file = File::create(&self.path).map_err(|e| EtlError::file_access(&self.path, e))?;

        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(file);

        writer
            .write_record(table.columns())
            .map_err(|e| self.csv_error(e))?;

        for row in table.rows() {
            writer
                .write_record(row.iter().map(|cell| cell.to_string()))
                .map_err(|e| self.csv_error(e))?;
        }

        writer
            .flush()
            .map_err(|e| EtlError::file_access(&self.path, e))?;

        log::debug!("Wrote {} rows to {}", table.len(), self.path.display());
        Ok(())
    }

    fn csv_error(&self, err: csv::Error) -> EtlError {
        match err.into_kind() {
            csv::ErrorKind::Io(e) => EtlError::file_access(&self.path, e),
            other => {
                let err = std::io::Error::other(format!("{:?}", other));
                EtlError::file_access(&self.path, err)
            }
        }
    }
}

impl Loader for CsvWriter {
    type Input = Table;

    fn load(&self, input: &Self::Input) -> Result<usize> {
        self.write(input)?;
        Ok(input.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tempfile::TempDir;

    fn table() -> Table {
        Table::new(
            vec!["employee_id".into(), "name".into(), "salary".into()],
            vec![
                vec![Cell::Int(1), Cell::from("Smith, Ann"), Cell::Float(3000.0)],
                vec![Cell::Int(2), Cell::from("Bo \"B\" Lee"), Cell::Null],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_read_write() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("people.csv");

        CsvWriter::new(&path).write(&table()).unwrap();
        let read = CsvReader::new(&path).read().unwrap();

        assert_eq!(read, table());
    }

    #[test]
    fn test_written_text() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("people.csv");

        CsvWriter::new(&path).write(&table()).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();

        assert_eq!(
            content,
            "employee_id,name,salary\n1,\"Smith, Ann\",3000.0\n2,\"Bo \"\"B\"\" Lee\",\n"
        );
    }

    #[test]
    fn test_custom_delimiter() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("people.tsv");
        std::fs::write(&path, "employee_id;salary\n7;1200.5\n").unwrap();

        let read = CsvReader::new(&path).with_delimiter(b';').read().unwrap();
        assert_eq!(read.columns(), ["employee_id", "salary"]);
        assert_eq!(read.get(0, "salary"), Some(&Cell::Float(1200.5)));
    }

    #[test]
    fn test_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = CsvReader::new(temp.path().join("nope.csv"))
            .read()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileAccess);
    }

    #[test]
    fn test_ragged_rows() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.csv");
        std::fs::write(&path, "employee_id,salary\n1,100.0\n2,200.0,extra\n").unwrap();

        let err = CsvReader::new(&path).read().unwrap_err();
        match err {
            EtlError::Parse { line, message, .. } => {
                assert_eq!(line, Some(3));
                assert!(message.contains("expected 2 fields, found 3"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unclosed_quote() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("quote.csv");
        std::fs::write(&path, "employee_id,salary,note\n1,3000.0,\"oops\n2,4000.0,ok\n").unwrap();

        let err = CsvReader::new(&path).read().unwrap_err();
        match err {
            EtlError::Parse { line, message, .. } => {
                assert_eq!(line, Some(2));
                assert!(message.contains("never closed"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unclosed_quote_in_salary() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("quote.csv");
        std::fs::write(&path, "employee_id,salary\n1,\"3000.0\n2,4000.0\n").unwrap();

        let err = CsvReader::new(&path).read().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_quotes_that_are_valid() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("quote.csv");
        std::fs::write(
            &path,
            "employee_id,note\n1,\"multi\nline, \"\"quoted\"\"\"\n2,5\" tall\n",
        )
        .unwrap();

        let table = CsvReader::new(&path).read().unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.get(0, "note"),
            Some(&Cell::from("multi\nline, \"quoted\""))
        );
        assert_eq!(table.get(1, "note"), Some(&Cell::from("5\" tall")));
    }

    #[test]
    fn test_empty_file_has_no_header() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("empty.csv");
        std::fs::write(&path, "").unwrap();

        let err = CsvReader::new(&path).read().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_duplicate_header() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("dup.csv");
        std::fs::write(&path, "salary,salary\n1,2\n").unwrap();

        let err = CsvReader::new(&path).read().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.to_string().contains("duplicate column name 'salary'"));
    }

    #[test]
    fn test_invalid_utf8() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("latin1.csv");
        std::fs::write(&path, b"employee_id,name\n1,Jos\xe9\n").unwrap();

        let err = CsvReader::new(&path).read().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_overwrites_existing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.csv");
        std::fs::write(&path, "old,content\nthat,is\nlonger,than\nthe,new\n").unwrap();

        let table = Table::empty(vec!["a".into()]);
        CsvWriter::new(&path).write(&table).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a\n");
    }

    #[test]
    fn test_write_into_missing_directory() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing").join("out.csv");

        let err = CsvWriter::new(&path).write(&table()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileAccess);
    }
}
