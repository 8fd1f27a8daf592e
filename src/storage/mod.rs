//! File system storage operations
//!
//! This module handles reading and writing delimited text files.

mod csv;

pub use self::csv::{CsvReader, CsvWriter, DEFAULT_DELIMITER};
