//! Loading statistics

use super::loader::EnrichmentIndex;
use serde::Serialize;

/// Counters collected while loading the all fields export
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadStats {
    /// Data rows read, malformed ones included
    pub rows_read: usize,
    /// Records inserted into the index, replacements included
    pub records_loaded: usize,
    /// Rows skipped because the issue key was empty
    pub skipped_missing_key: usize,
    /// Rows that could not be parsed and were skipped
    pub malformed_rows: usize,
    /// Records that replaced an earlier record with the same key
    pub duplicate_keys: usize,
    /// Attachment URLs found across all loaded rows
    pub attachments_found: usize,
    /// Messages for skipped malformed rows
    pub error_messages: Vec<String>,
}

impl LoadStats {
    /// Record a malformed row
    pub fn add_error(&mut self, message: String) {
        self.malformed_rows += 1;
        self.error_messages.push(message);
    }

    /// One-line summary
    pub fn summary(&self) -> String {
        format!(
            "Load Summary: {} rows -> {} records | Skipped: {} missing key, {} malformed | \
             Duplicate keys: {} | Attachments: {}",
            self.rows_read,
            self.records_loaded,
            self.skipped_missing_key,
            self.malformed_rows,
            self.duplicate_keys,
            self.attachments_found
        )
    }
}

/// The finished index together with the statistics of the load
#[derive(Debug, Clone)]
pub struct LoadResult {
    pub index: EnrichmentIndex,
    pub stats: LoadStats,
}
