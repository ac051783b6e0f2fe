//! Jira to Azure DevOps Migrator Library
//!
//! A Rust library for converting Jira CSV exports into the CSV import format
//! accepted by Azure DevOps work item tracking.
//!
//! This library provides tools for:
//! - Reading Jira "all fields" and "default fields" CSV exports
//! - Normalizing Jira wiki markup into Markdown-flavoured text
//! - Extracting attachment URLs from one or many attachment columns
//! - Joining both exports by issue key into Azure DevOps work items
//! - Mapping priorities and normalizing timestamps
//! - Writing output files atomically so failed runs never leave partial files

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod attachment_extractor;
        pub mod csv_io;
        pub mod enrichment_loader;
        pub mod markup_normalizer;
        pub mod work_item_builder;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{EnrichmentRecord, SourceRow, WorkItem};
pub use config::Config;

/// Result type alias for the migrator
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for migration operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing error affecting a whole file
    #[error("CSV parsing error in file '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// A single CSV record could not be read
    #[error("Malformed row at line {line}: {message}")]
    MalformedRow { line: u64, message: String },

    /// Input file not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Output file could not be written
    #[error("Failed to write output '{path}': {message}")]
    OutputWrite {
        path: String,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Data validation error
    #[error("Data validation error: {message}")]
    DataValidation { message: String },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a malformed row error
    pub fn malformed_row(line: u64, message: impl Into<String>) -> Self {
        Self::MalformedRow {
            line,
            message: message.into(),
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an output write error
    pub fn output_write(
        path: impl Into<String>,
        message: impl Into<String>,
        source: Option<std::io::Error>,
    ) -> Self {
        Self::OutputWrite {
            path: path.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }

    /// Whether the error only affects a single row and processing may continue
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::MalformedRow { .. })
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV processing failed".to_string(),
            source: Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_includes_context() {
        let error = Error::file_not_found("all_fields.csv");
        assert_eq!(error.to_string(), "File not found: all_fields.csv");

        let error = Error::malformed_row(12, "found record with 3 fields");
        assert_eq!(
            error.to_string(),
            "Malformed row at line 12: found record with 3 fields"
        );
    }

    #[test]
    fn test_only_row_errors_are_recoverable() {
        assert!(Error::malformed_row(2, "bad").is_recoverable());
        assert!(!Error::configuration("missing base url").is_recoverable());
        assert!(!Error::file_not_found("x.csv").is_recoverable());
        assert!(!Error::output_write("out.csv", "disk full", None).is_recoverable());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error: Error = io_error.into();
        assert!(matches!(error, Error::Io { .. }));
    }
}
