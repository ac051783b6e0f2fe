//! CSV reading
//!
//! A [`CsvSource`] holds an open CSV reader and its cleaned header row. Rows
//! are produced lazily by [`CsvSource::rows`], so callers consume the file
//! with ordinary iteration and input order is preserved.

use std::io::{Cursor, Read};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use crate::app::models::SourceRow;
use crate::{Error, Result};

/// UTF-8 byte order mark written by Excel and some Jira exports
const BYTE_ORDER_MARK: char = '\u{feff}';

/// An open CSV file with a parsed header row
pub struct CsvSource<R: Read = Cursor<Vec<u8>>> {
    label: String,
    headers: Arc<[String]>,
    reader: csv::Reader<R>,
}

impl CsvSource {
    /// Read a CSV file into memory and parse its header row
    ///
    /// # Errors
    /// * `Error::FileNotFound` if the file does not exist
    /// * `Error::Io` for other read failures
    /// * `Error::CsvParsing` if the header row is missing or unreadable
    pub async fn load(path: &Path) -> Result<Self> {
        info!("Reading CSV file: {}", path.display());

        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::file_not_found(path.display().to_string()));
            }
            Err(e) => {
                return Err(Error::io(
                    format!("Failed to read file {}", path.display()),
                    e,
                ));
            }
        };

        debug!("Read {} bytes from {}", bytes.len(), path.display());
        Self::from_reader(path.display().to_string(), Cursor::new(bytes))
    }
}

impl<R: Read> CsvSource<R> {
    /// Parse the header row from any reader
    ///
    /// `label` names the source in error messages.
    pub fn from_reader(label: impl Into<String>, reader: R) -> Result<Self> {
        let label = label.into();
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(reader);

        let raw_headers = reader
            .headers()
            .map_err(|e| Error::csv_parsing(&label, "Failed to read CSV header row", Some(e)))?;

        let headers: Arc<[String]> = raw_headers
            .iter()
            .enumerate()
            .map(|(index, header)| {
                let header = if index == 0 {
                    header.trim_start_matches(BYTE_ORDER_MARK)
                } else {
                    header
                };
                header.trim().to_string()
            })
            .collect();

        if headers.iter().all(|header| header.is_empty()) {
            return Err(Error::csv_parsing(&label, "Missing CSV header row", None));
        }

        debug!("{}: {} columns: {}", label, headers.len(), headers.join(", "));

        Ok(Self {
            label,
            headers,
            reader,
        })
    }

    /// Cleaned header names in column order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Name of the source used in messages
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether a column with exactly this name exists
    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|header| header == column)
    }

    /// Lazily iterate over the data rows
    pub fn rows(self) -> SourceRows<R> {
        SourceRows {
            headers: self.headers,
            records: self.reader.into_records(),
        }
    }
}

/// Iterator over the data rows of a [`CsvSource`]
///
/// A record that cannot be read, such as one with a different number of
/// fields than the header, is yielded as `Error::MalformedRow` and iteration
/// continues with the next record.
pub struct SourceRows<R: Read> {
    headers: Arc<[String]>,
    records: csv::StringRecordsIntoIter<R>,
}

impl<R: Read> Iterator for SourceRows<R> {
    type Item = Result<SourceRow>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.records.next()?;

        Some(match result {
            Ok(record) => {
                let line = record.position().map(|p| p.line()).unwrap_or(0);
                let values = record.iter().map(str::to_string).collect();
                Ok(SourceRow::new(Arc::clone(&self.headers), values, line))
            }
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                Err(Error::malformed_row(line, e.to_string()))
            }
        })
    }
}
