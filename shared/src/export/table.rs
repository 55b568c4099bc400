//! Samsung Health CSV table reader.
//!
//! Every CSV file in the export starts with a metadata line (the data type
//! name and version) before the actual header row. Rows are frequently
//! shorter or longer than the header, so the reader is flexible.

use super::ExportError;
use csv::{ReaderBuilder, StringRecord};
use std::path::{Path, PathBuf};

/// An in-memory CSV table with named columns.
#[derive(Debug, Clone)]
pub struct CsvTable {
    path: PathBuf,
    headers: Vec<String>,
    rows: Vec<StringRecord>,
}

impl CsvTable {
    /// Reads a CSV file, skipping its metadata line.
    ///
    /// `strip_prefix` is removed from the start of every header name.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid CSV.
    pub fn read(path: &Path, strip_prefix: &str) -> Result<Self, ExportError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &contents, strip_prefix)
    }

    /// Parses CSV text, skipping its metadata line.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid CSV.
    pub fn parse(path: &Path, contents: &str, strip_prefix: &str) -> Result<Self, ExportError> {
        let body = contents.split_once('\n').map_or("", |(_, rest)| rest);
        let csv_error = |source| ExportError::Csv {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .from_reader(body.as_bytes());
        let headers = reader
            .headers()
            .map_err(csv_error)?
            .iter()
            .map(|h| h.trim().strip_prefix(strip_prefix).unwrap_or(h.trim()).to_string())
            .collect();
        let rows = reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .map_err(csv_error)?;

        Ok(Self {
            path: path.to_path_buf(),
            headers,
            rows,
        })
    }

    /// Returns the source path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the header names.
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Returns the number of data rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table has no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the index of a column.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::MissingColumn`] if the header has no such column.
    pub fn column(&self, name: &str) -> Result<usize, ExportError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| ExportError::MissingColumn {
                path: self.path.clone(),
                column: name.to_string(),
            })
    }

    /// Iterates over the data rows.
    pub fn rows(&self) -> impl Iterator<Item = &StringRecord> {
        self.rows.iter()
    }

    /// Returns a cell value, or an empty string for short rows.
    #[must_use]
    pub fn cell<'a>(row: &'a StringRecord, column: usize) -> &'a str {
        row.get(column).map_or("", str::trim)
    }

    /// Parses a numeric cell.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::MalformedField`] if the cell is not a number.
    pub fn number(&self, row: &StringRecord, column: usize) -> Result<f64, ExportError> {
        let value = Self::cell(row, column);
        value.parse::<f64>().map_err(|_| ExportError::MalformedField {
            path: self.path.clone(),
            column: self.headers.get(column).cloned().unwrap_or_default(),
            value: value.to_string(),
        })
    }
}
