//! Merge statistics and result structures

use crate::app::models::WorkItem;
use serde::Serialize;

/// Counters collected while building work items
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeStats {
    /// Data rows read from the default fields export, malformed ones included
    pub rows_read: usize,
    /// Work items emitted
    pub work_items: usize,
    /// Rows skipped because the issue key was empty
    pub skipped_missing_key: usize,
    /// Rows that could not be parsed and were skipped
    pub malformed_rows: usize,
    /// Work items that found an enrichment record
    pub enrichment_matches: usize,
    /// Work items built without an enrichment record
    pub enrichment_misses: usize,
    /// Non-empty priority labels not present in the priority table
    pub unmapped_priorities: usize,
    /// Non-empty date values that could not be parsed
    pub invalid_dates: usize,
    /// Messages for skipped malformed rows
    pub error_messages: Vec<String>,
}

impl MergeStats {
    /// Create empty statistics
    pub fn new() -> Self {
        Self {
            rows_read: 0,
            work_items: 0,
            skipped_missing_key: 0,
            malformed_rows: 0,
            enrichment_matches: 0,
            enrichment_misses: 0,
            unmapped_priorities: 0,
            invalid_dates: 0,
            error_messages: Vec::new(),
        }
    }

    /// Record a malformed row
    pub fn add_error(&mut self, message: String) {
        self.malformed_rows += 1;
        self.error_messages.push(message);
    }

    /// Rows that produced no work item
    pub fn rows_skipped(&self) -> usize {
        self.skipped_missing_key + self.malformed_rows
    }

    /// Percentage of rows that became work items
    pub fn success_rate(&self) -> f64 {
        if self.rows_read == 0 {
            100.0
        } else {
            (self.work_items as f64 / self.rows_read as f64) * 100.0
        }
    }

    /// Percentage of work items that were enriched
    pub fn enrichment_rate(&self) -> f64 {
        if self.work_items == 0 {
            0.0
        } else {
            (self.enrichment_matches as f64 / self.work_items as f64) * 100.0
        }
    }

    /// One-line summary
    pub fn summary(&self) -> String {
        format!(
            "Merge Summary: {} rows -> {} work items ({:.1}% success) | \
             Enriched: {:.1}% | Skipped: {} missing key, {} malformed | \
             Unmapped priorities: {} | Invalid dates: {}",
            self.rows_read,
            self.work_items,
            self.success_rate(),
            self.enrichment_rate(),
            self.skipped_missing_key,
            self.malformed_rows,
            self.unmapped_priorities,
            self.invalid_dates
        )
    }
}

impl Default for MergeStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Work items in input order together with the statistics of the merge
#[derive(Debug, Clone)]
pub struct MergeResult {
    pub work_items: Vec<WorkItem>,
    pub stats: MergeStats,
}

impl MergeResult {
    /// Number of work items built
    pub fn work_item_count(&self) -> usize {
        self.work_items.len()
    }

    /// Whether every row produced a work item
    pub fn is_complete(&self) -> bool {
        self.stats.rows_skipped() == 0
    }
}
