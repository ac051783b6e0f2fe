//! Row-to-work-item mapping and the merge loop

use tracing::{debug, info, warn};

use super::description::IssueDescription;
use super::priority::PriorityTable;
use super::stats::{MergeResult, MergeStats};
use super::timestamps::normalize_timestamp;
use crate::app::models::{ColumnNames, SourceRow, WorkItem};
use crate::app::services::enrichment_loader::EnrichmentIndex;
use crate::app::services::markup_normalizer::MissingText;
use crate::config::Config;
use crate::{Error, Result};

/// Settings for building work items
#[derive(Debug, Clone, PartialEq)]
pub struct BuilderOptions {
    /// Jira column names
    pub columns: ColumnNames,
    /// Priority label to code table
    pub priorities: PriorityTable,
    /// Issue link prefix, ending in `/`
    pub issue_base_url: String,
    /// Work item type written for every row
    pub work_item_type: String,
    /// Description rendered for issues without an enrichment record
    pub missing_description: MissingText,
}

impl BuilderOptions {
    /// Derive builder settings from the configuration
    ///
    /// Fails when no issue base URL is configured.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            columns: config.columns.clone(),
            priorities: config.priority.table(),
            issue_base_url: config.issue_base_url()?,
            work_item_type: config.migration.work_item_type.clone(),
            missing_description: config
                .description
                .missing
                .unwrap_or(MissingText::Placeholder),
        })
    }
}

/// Builds work items from default fields rows and a finished enrichment index
pub struct WorkItemBuilder<'a> {
    index: &'a EnrichmentIndex,
    options: &'a BuilderOptions,
}

impl<'a> WorkItemBuilder<'a> {
    pub fn new(index: &'a EnrichmentIndex, options: &'a BuilderOptions) -> Self {
        Self { index, options }
    }

    /// Build the work item for one row
    ///
    /// Returns `None` and counts the row when its issue key is empty.
    pub fn build_row(&self, row: &SourceRow, stats: &mut MergeStats) -> Option<WorkItem> {
        let columns = &self.options.columns;

        let Some(issue_key) = row.issue_key(&columns.issue_key) else {
            debug!("Skipping row at line {}: missing issue key", row.line());
            stats.skipped_missing_key += 1;
            return None;
        };

        let (description, environment, attachments) = match self.index.get(issue_key) {
            Some(record) => {
                stats.enrichment_matches += 1;
                (
                    record.description.clone(),
                    record.environment.clone(),
                    record.attachments.clone(),
                )
            }
            None => {
                debug!("{}: no enrichment record", issue_key);
                stats.enrichment_misses += 1;
                (
                    self.options.missing_description.text().to_string(),
                    String::new(),
                    Vec::new(),
                )
            }
        };

        let priority_label = row.get(&columns.priority);
        let priority = match self.options.priorities.lookup(priority_label) {
            Some(code) => code.to_string(),
            None => {
                if !priority_label.trim().is_empty() {
                    debug!("{}: unmapped priority '{}'", issue_key, priority_label);
                    stats.unmapped_priorities += 1;
                }
                self.options.priorities.default_code().to_string()
            }
        };

        let created_date = self.timestamp(issue_key, row.get(&columns.created), stats);
        let changed_date = self.timestamp(issue_key, row.get(&columns.updated), stats);

        let description = IssueDescription {
            description,
            environment,
            issue_url: format!("{}{}", self.options.issue_base_url, issue_key),
            attachments,
        };

        stats.work_items += 1;
        Some(WorkItem {
            work_item_type: self.options.work_item_type.clone(),
            title: row.get(&columns.summary).to_string(),
            assigned_to: row.get(&columns.assignee).to_string(),
            created_by: row.get(&columns.reporter).to_string(),
            priority,
            state: row.get(&columns.status).to_string(),
            created_date,
            changed_date,
            description: description.render(),
        })
    }

    /// Build work items for every row, in input order
    ///
    /// Malformed rows are logged, counted and skipped. Any other error ends
    /// the merge.
    pub fn build_all<I>(&self, rows: I) -> Result<MergeResult>
    where
        I: IntoIterator<Item = Result<SourceRow>>,
    {
        let mut stats = MergeStats::new();
        let mut work_items = Vec::new();

        for row in rows {
            stats.rows_read += 1;
            match row {
                Ok(row) => {
                    if let Some(work_item) = self.build_row(&row, &mut stats) {
                        work_items.push(work_item);
                    }
                }
                Err(e) if e.is_recoverable() => {
                    warn!("Skipping row: {}", e);
                    stats.add_error(e.to_string());
                }
                Err(e) => return Err(e),
            }
        }

        info!("{}", stats.summary());
        Ok(MergeResult { work_items, stats })
    }

    fn timestamp(&self, issue_key: &str, value: &str, stats: &mut MergeStats) -> String {
        match normalize_timestamp(value) {
            Some(timestamp) => timestamp,
            None => {
                if !value.trim().is_empty() {
                    debug!("{}: invalid date '{}'", issue_key, value);
                    stats.invalid_dates += 1;
                }
                String::new()
            }
        }
    }
}

/// Check that the required default fields columns are present
///
/// A missing issue key column is fatal; other missing columns are only
/// reported since they read as empty values.
pub fn check_columns(headers: &[String], columns: &ColumnNames) -> Result<()> {
    let has = |name: &str| headers.iter().any(|header| header == name);

    if !has(&columns.issue_key) {
        return Err(Error::data_validation(format!(
            "Default fields export has no '{}' column",
            columns.issue_key
        )));
    }

    for name in [
        &columns.summary,
        &columns.assignee,
        &columns.reporter,
        &columns.priority,
        &columns.status,
        &columns.created,
        &columns.updated,
    ] {
        if !has(name) {
            warn!("Default fields export has no '{}' column", name);
        }
    }

    Ok(())
}
