//! CSV input and output for Jira exports and Azure DevOps import files
//!
//! This module is the only place that touches CSV syntax. Everything else in
//! the pipeline works on [`SourceRow`](crate::app::models::SourceRow) values
//! and serde-serializable records.
//!
//! ## Architecture
//!
//! - [`reader`] - Loads a whole file and yields rows lazily, in input order
//! - [`writer`] - Encodes a header plus records and replaces the destination
//!   file atomically
//!
//! ## Usage
//!
//! ```rust,no_run
//! use jira_devops_migrator::app::services::csv_io::{CsvSource, write_table};
//!
//! # async fn example() -> jira_devops_migrator::Result<()> {
//! let source = CsvSource::load(std::path::Path::new("default_fields.csv")).await?;
//! let headers = source.headers().to_vec();
//! let rows: Vec<Vec<String>> = source
//!     .rows()
//!     .filter_map(|row| row.ok())
//!     .map(|row| row.into_values())
//!     .collect();
//! write_table(std::path::Path::new("copy.csv"), &headers, &rows).await?;
//! # Ok(())
//! # }
//! ```

pub mod reader;
pub mod writer;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use reader::{CsvSource, SourceRows};
pub use writer::{encode_table, persist_atomically, write_lines, write_table};
