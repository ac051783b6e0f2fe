//! Tests for work item construction

pub mod builder_tests;
pub mod description_tests;

use crate::app::models::{EnrichmentRecord, SourceRow};
use crate::app::services::enrichment_loader::EnrichmentIndex;
use crate::app::services::work_item_builder::BuilderOptions;
use crate::config::Config;
use std::sync::Arc;

pub const BASE_URL: &str = "https://jira.example.com/browse/";

/// Header row of a typical default fields export
pub fn default_headers() -> Arc<[String]> {
    [
        "Issue key",
        "Summary",
        "Assignee",
        "Reporter",
        "Priority",
        "Status",
        "Created",
        "Updated",
    ]
    .iter()
    .map(|h| h.to_string())
    .collect()
}

/// Create a default fields row from `(column, value)` pairs; other columns are empty
pub fn create_default_row(values: &[(&str, &str)]) -> SourceRow {
    let headers = default_headers();
    let row_values = headers
        .iter()
        .map(|header| {
            values
                .iter()
                .find(|(column, _)| *column == header.as_str())
                .map(|(_, value)| value.to_string())
                .unwrap_or_default()
        })
        .collect();
    SourceRow::new(headers, row_values, 2)
}

/// Builder options with the default configuration and the test base URL
pub fn create_test_options() -> BuilderOptions {
    let mut config = Config::default();
    config.migration.issue_base_url = Some(BASE_URL.to_string());
    BuilderOptions::from_config(&config).expect("valid test configuration")
}

/// Index holding one enriched issue
pub fn create_test_index() -> EnrichmentIndex {
    let mut index = EnrichmentIndex::new();
    index.insert(
        "BUG-7".to_string(),
        EnrichmentRecord {
            description: "**Steps:**\nDo X".to_string(),
            environment: "Windows 11".to_string(),
            attachments: vec![
                "https://x/a.png".to_string(),
                "https://x/b.png".to_string(),
            ],
        },
    );
    index
}
