//! Data models for Jira to Azure DevOps migration
//!
//! This module contains the core data structures flowing through the pipeline:
//! rows read from a Jira CSV export, the enrichment data derived from the
//! "all fields" export, and the Azure DevOps work items that are written out.

use crate::constants::{NO_ATTACHMENTS, jira_columns};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// =============================================================================
// Source Rows
// =============================================================================

/// One data row of a Jira CSV export
///
/// Values are kept in column order next to a shared copy of the header row, so
/// exports with repeated column names (Jira writes one `Attachment` column per
/// attachment) lose nothing. Absent columns read as empty strings.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRow {
    headers: Arc<[String]>,
    values: Vec<String>,
    line: u64,
}

impl SourceRow {
    /// Create a row from its header row, values and 1-based source line
    pub fn new(headers: Arc<[String]>, values: Vec<String>, line: u64) -> Self {
        Self {
            headers,
            values,
            line,
        }
    }

    /// Value of the first column named `column`, or `""` when absent
    pub fn get(&self, column: &str) -> &str {
        self.headers
            .iter()
            .position(|header| header == column)
            .and_then(|index| self.values.get(index))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Trimmed issue key, `None` when the key column is missing or blank
    pub fn issue_key(&self, column: &str) -> Option<&str> {
        let key = self.get(column).trim();
        (!key.is_empty()).then_some(key)
    }

    /// Iterate over `(header, value)` pairs in column order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(String::as_str))
    }

    /// Replace the value of the first column named `column`
    ///
    /// Returns false when the row has no such column.
    pub fn set(&mut self, column: &str, value: String) -> bool {
        match self.headers.iter().position(|header| header == column) {
            Some(index) if index < self.values.len() => {
                self.values[index] = value;
                true
            }
            _ => false,
        }
    }

    /// Header row shared by all rows of the same file
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Values in column order
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Consume the row, returning its values in column order
    pub fn into_values(self) -> Vec<String> {
        self.values
    }

    /// 1-based line number of the record in its source file
    pub fn line(&self) -> u64 {
        self.line
    }
}

// =============================================================================
// Enrichment Data
// =============================================================================

/// Supplementary issue data taken from the "all fields" export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentRecord {
    /// Normalized description text
    pub description: String,

    /// Environment text, `Not Provided` when the export had none
    pub environment: String,

    /// Attachment URLs in column order, then in-cell order
    pub attachments: Vec<String>,
}

/// Render attachment URLs one per line, or the `No Attachments` sentinel
pub fn render_attachments(attachments: &[String]) -> String {
    if attachments.is_empty() {
        NO_ATTACHMENTS.to_string()
    } else {
        attachments.join("\n")
    }
}

// =============================================================================
// Azure DevOps Work Items
// =============================================================================

/// One row of the Azure DevOps import file
///
/// Field order matches [`crate::constants::OUTPUT_COLUMNS`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    #[serde(rename = "Work Item Type")]
    pub work_item_type: String,

    #[serde(rename = "Title")]
    pub title: String,

    #[serde(rename = "Assigned To")]
    pub assigned_to: String,

    #[serde(rename = "Created By")]
    pub created_by: String,

    /// Azure DevOps priority code `1` to `4`, direction set by the priority scheme
    #[serde(rename = "Priority")]
    pub priority: String,

    #[serde(rename = "State")]
    pub state: String,

    /// ISO-8601 UTC timestamp or empty
    #[serde(rename = "Created Date")]
    pub created_date: String,

    /// ISO-8601 UTC timestamp or empty
    #[serde(rename = "Changed Date")]
    pub changed_date: String,

    /// Composite Markdown description
    #[serde(rename = "Description")]
    pub description: String,
}

/// Names of the Jira columns read by the pipeline
///
/// Every name can be overridden for exports produced with a different column
/// layout or language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub issue_key: String,
    pub summary: String,
    pub assignee: String,
    pub reporter: String,
    pub priority: String,
    pub status: String,
    pub created: String,
    pub updated: String,
    pub description: String,
    pub environment: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            issue_key: jira_columns::ISSUE_KEY.to_string(),
            summary: jira_columns::SUMMARY.to_string(),
            assignee: jira_columns::ASSIGNEE.to_string(),
            reporter: jira_columns::REPORTER.to_string(),
            priority: jira_columns::PRIORITY.to_string(),
            status: jira_columns::STATUS.to_string(),
            created: jira_columns::CREATED.to_string(),
            updated: jira_columns::UPDATED.to_string(),
            description: jira_columns::DESCRIPTION.to_string(),
            environment: jira_columns::ENVIRONMENT.to_string(),
        }
    }
}

impl ColumnNames {
    /// All configured names with their setting names, for validation
    pub fn entries(&self) -> [(&'static str, &str); 10] {
        [
            ("issue_key", self.issue_key.as_str()),
            ("summary", self.summary.as_str()),
            ("assignee", self.assignee.as_str()),
            ("reporter", self.reporter.as_str()),
            ("priority", self.priority.as_str()),
            ("status", self.status.as_str()),
            ("created", self.created.as_str()),
            ("updated", self.updated.as_str()),
            ("description", self.description.as_str()),
            ("environment", self.environment.as_str()),
        ]
    }
}
