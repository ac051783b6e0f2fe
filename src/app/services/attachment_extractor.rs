//! Attachment URL extraction
//!
//! Finds attachment URLs in Jira export rows. Two choices are configurable:
//! which columns are scanned ([`AttachmentSource`]) and how a cell is split
//! into URLs ([`UrlMatching`]). URLs are returned in column order, then in
//! the order they appear inside a cell, duplicates included.

use crate::app::models::SourceRow;
use crate::config::AttachmentConfig;
use clap::ValueEnum;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Maximal non-whitespace run starting with an HTTP(S) scheme
static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").expect("valid regex"));

/// Which columns of a row are scanned for URLs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum AttachmentSource {
    /// Columns whose header contains the attachment pattern (case-insensitive)
    AttachmentColumns,
    /// Every column of the row
    AllColumns,
}

/// How URLs are recognised inside a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum UrlMatching {
    /// Split on the delimiter, then scan each trimmed segment for URLs
    Auto,
    /// Scan the whole cell for `http://` / `https://` runs
    Inline,
    /// Split on the delimiter and keep trimmed segments starting with `http`
    Delimited,
}

/// Extract every `http(s)://` run from free text
pub fn extract_inline(cell: &str) -> Vec<String> {
    URL.find_iter(cell).map(|m| m.as_str().to_string()).collect()
}

/// Extract delimiter-separated segments that start with `http`
///
/// Line breaks separate segments as well as the delimiter, so every result is
/// a single line. Segments are passed through verbatim apart from trimming;
/// no further URL validation happens.
pub fn extract_delimited(cell: &str, delimiter: char) -> Vec<String> {
    cell.split(|c: char| c == delimiter || c == '\n' || c == '\r')
        .map(str::trim)
        .filter(|segment| segment.starts_with("http"))
        .map(str::to_string)
        .collect()
}

/// Extract URLs from a single cell using the given matching mode
pub fn extract_urls(cell: &str, matching: UrlMatching, delimiter: char) -> Vec<String> {
    if cell.trim().is_empty() {
        return Vec::new();
    }

    match matching {
        UrlMatching::Inline => extract_inline(cell),
        UrlMatching::Delimited => extract_delimited(cell, delimiter),
        UrlMatching::Auto => cell
            .split(delimiter)
            .flat_map(|segment| extract_inline(segment.trim()))
            .collect(),
    }
}

/// Row-level attachment extractor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentExtractor {
    source: AttachmentSource,
    matching: UrlMatching,
    delimiter: char,
    column_pattern: String,
}

impl AttachmentExtractor {
    /// Create an extractor
    pub fn new(
        source: AttachmentSource,
        matching: UrlMatching,
        delimiter: char,
        column_pattern: &str,
    ) -> Self {
        Self {
            source,
            matching,
            delimiter,
            column_pattern: column_pattern.to_lowercase(),
        }
    }

    /// Create an extractor from the attachment configuration section
    pub fn from_config(config: &AttachmentConfig) -> Self {
        Self::new(
            config.source,
            config.matching,
            config.delimiter,
            &config.column_pattern,
        )
    }

    /// Whether a column with this header is scanned
    pub fn scans_column(&self, header: &str) -> bool {
        match self.source {
            AttachmentSource::AllColumns => true,
            AttachmentSource::AttachmentColumns => {
                header.to_lowercase().contains(&self.column_pattern)
            }
        }
    }

    /// Headers that will be scanned, in column order
    pub fn scanned_columns<'a>(&self, headers: &'a [String]) -> Vec<&'a str> {
        headers
            .iter()
            .map(String::as_str)
            .filter(|header| self.scans_column(header))
            .collect()
    }

    /// Extract all URLs from a row in column order, then in-cell order
    pub fn extract_row(&self, row: &SourceRow) -> Vec<String> {
        row.fields()
            .filter(|(header, _)| self.scans_column(header))
            .flat_map(|(_, value)| extract_urls(value, self.matching, self.delimiter))
            .collect()
    }
}

impl Default for AttachmentExtractor {
    fn default() -> Self {
        Self::from_config(&AttachmentConfig::default())
    }
}
