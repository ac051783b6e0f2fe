//! All fields export loading

use std::collections::HashMap;
use tracing::{debug, info, warn};

use super::stats::{LoadResult, LoadStats};
use crate::app::models::{ColumnNames, EnrichmentRecord, SourceRow};
use crate::app::services::attachment_extractor::AttachmentExtractor;
use crate::app::services::markup_normalizer::{MissingText, normalize_or_default};
use crate::config::Config;
use crate::constants::NOT_PROVIDED;
use crate::{Error, Result};

/// Enrichment records keyed by issue key
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrichmentIndex {
    records: HashMap<String, EnrichmentRecord>,
}

impl EnrichmentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, returning the one it replaced
    pub fn insert(&mut self, issue_key: String, record: EnrichmentRecord) -> Option<EnrichmentRecord> {
        self.records.insert(issue_key, record)
    }

    pub fn get(&self, issue_key: &str) -> Option<&EnrichmentRecord> {
        self.records.get(issue_key)
    }

    pub fn contains_key(&self, issue_key: &str) -> bool {
        self.records.contains_key(issue_key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Settings for loading the all fields export
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichmentOptions {
    /// Jira column names
    pub columns: ColumnNames,
    /// Attachment URL extraction
    pub extractor: AttachmentExtractor,
    /// Text stored for empty descriptions
    pub missing_description: MissingText,
}

impl EnrichmentOptions {
    /// Derive loading settings from the configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            columns: config.columns.clone(),
            extractor: AttachmentExtractor::from_config(&config.attachments),
            missing_description: config
                .description
                .missing
                .unwrap_or(MissingText::Placeholder),
        }
    }
}

impl Default for EnrichmentOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Build the enrichment record for one all fields row
pub fn build_record(row: &SourceRow, options: &EnrichmentOptions) -> EnrichmentRecord {
    let environment = row.get(&options.columns.environment);

    EnrichmentRecord {
        description: normalize_or_default(
            row.get(&options.columns.description),
            options.missing_description,
        ),
        environment: if environment.trim().is_empty() {
            NOT_PROVIDED.to_string()
        } else {
            environment.to_string()
        },
        attachments: options.extractor.extract_row(row),
    }
}

/// Load every row into an index
///
/// Rows with an empty issue key and malformed rows are logged, counted and
/// skipped. For duplicate keys the last row wins. Any other error ends the
/// load.
pub fn load_enrichment<I>(rows: I, options: &EnrichmentOptions) -> Result<LoadResult>
where
    I: IntoIterator<Item = Result<SourceRow>>,
{
    let mut index = EnrichmentIndex::new();
    let mut stats = LoadStats::default();

    for row in rows {
        stats.rows_read += 1;

        let row = match row {
            Ok(row) => row,
            Err(e) if e.is_recoverable() => {
                warn!("Skipping row: {}", e);
                stats.add_error(e.to_string());
                continue;
            }
            Err(e) => return Err(e),
        };

        let Some(issue_key) = row.issue_key(&options.columns.issue_key) else {
            debug!("Skipping row at line {}: missing issue key", row.line());
            stats.skipped_missing_key += 1;
            continue;
        };

        let record = build_record(&row, options);
        stats.attachments_found += record.attachments.len();
        stats.records_loaded += 1;

        if index.insert(issue_key.to_string(), record).is_some() {
            debug!("{}: replaced earlier record with the same key", issue_key);
            stats.duplicate_keys += 1;
        }
    }

    info!("{}", stats.summary());
    Ok(LoadResult { index, stats })
}

/// Check that the all fields export can be joined
pub fn check_columns(headers: &[String], options: &EnrichmentOptions) -> Result<()> {
    if !headers.iter().any(|header| header == &options.columns.issue_key) {
        return Err(Error::data_validation(format!(
            "All fields export has no '{}' column",
            options.columns.issue_key
        )));
    }

    let scanned = options.extractor.scanned_columns(headers);
    if scanned.is_empty() {
        warn!("All fields export has no attachment columns");
    } else {
        debug!("Scanning {} columns for attachments", scanned.len());
    }

    Ok(())
}
