//! Tests for the work item builder and merge loop

use super::*;
use crate::Error;
use crate::app::services::markup_normalizer::MissingText;
use crate::app::services::work_item_builder::{
    IssueDescription, MergeStats, WorkItemBuilder, check_columns,
};

#[test]
fn test_row_without_enrichment_record() {
    let index = EnrichmentIndex::new();
    let options = create_test_options();
    let builder = WorkItemBuilder::new(&index, &options);
    let mut stats = MergeStats::new();

    let row = create_default_row(&[
        ("Issue key", "BUG-1"),
        ("Summary", "Crash on save"),
        ("Priority", "High"),
        ("Created", "2024-01-02"),
    ]);
    let item = builder.build_row(&row, &mut stats).unwrap();

    assert_eq!(item.work_item_type, "Bug");
    assert_eq!(item.title, "Crash on save");
    assert_eq!(item.priority, "2");
    assert_eq!(item.created_date, "2024-01-02T00:00:00.000Z");
    assert_eq!(item.changed_date, "");
    assert!(item.description.contains("No description available."));
    assert!(item.description.contains("No Attachments"));
    assert!(
        item.description
            .contains("[View in Jira](https://jira.example.com/browse/BUG-1)")
    );

    let parsed = IssueDescription::parse(&item.description).unwrap();
    assert_eq!(parsed.environment, "");

    assert_eq!(stats.enrichment_misses, 1);
    assert_eq!(stats.work_items, 1);
}

#[test]
fn test_row_with_enrichment_record() {
    let index = create_test_index();
    let options = create_test_options();
    let builder = WorkItemBuilder::new(&index, &options);
    let mut stats = MergeStats::new();

    let row = create_default_row(&[
        ("Issue key", "BUG-7"),
        ("Summary", "Broken link"),
        ("Assignee", "Ann"),
        ("Reporter", "Bob"),
        ("Priority", "Highest"),
        ("Status", "In Progress"),
        ("Updated", "2024-01-03 10:00"),
    ]);
    let item = builder.build_row(&row, &mut stats).unwrap();

    assert_eq!(item.assigned_to, "Ann");
    assert_eq!(item.created_by, "Bob");
    assert_eq!(item.state, "In Progress");
    assert_eq!(item.priority, "1");
    assert_eq!(item.changed_date, "2024-01-03T10:00:00.000Z");

    let parsed = IssueDescription::parse(&item.description).unwrap();
    assert_eq!(parsed.description, "**Steps:**\nDo X");
    assert_eq!(parsed.environment, "Windows 11");
    assert_eq!(parsed.issue_key(BASE_URL), Some("BUG-7"));
    assert_eq!(parsed.attachments, vec!["https://x/a.png", "https://x/b.png"]);
    assert_eq!(stats.enrichment_matches, 1);
}

#[test]
fn test_missing_key_is_skipped_and_counted() {
    let index = EnrichmentIndex::new();
    let options = create_test_options();
    let builder = WorkItemBuilder::new(&index, &options);
    let mut stats = MergeStats::new();

    let row = create_default_row(&[("Issue key", "  "), ("Summary", "orphan")]);
    assert!(builder.build_row(&row, &mut stats).is_none());
    assert_eq!(stats.skipped_missing_key, 1);
    assert_eq!(stats.work_items, 0);
}

#[test]
fn test_unmapped_priority_and_invalid_dates_counted() {
    let index = EnrichmentIndex::new();
    let options = create_test_options();
    let builder = WorkItemBuilder::new(&index, &options);
    let mut stats = MergeStats::new();

    let row = create_default_row(&[
        ("Issue key", "BUG-2"),
        ("Priority", "Blocker"),
        ("Created", "not a date"),
        ("Updated", ""),
    ]);
    let item = builder.build_row(&row, &mut stats).unwrap();

    assert_eq!(item.priority, "3");
    assert_eq!(item.created_date, "");
    assert_eq!(stats.unmapped_priorities, 1);
    assert_eq!(stats.invalid_dates, 1);

    // Empty priority falls back silently
    let row = create_default_row(&[("Issue key", "BUG-3")]);
    let item = builder.build_row(&row, &mut stats).unwrap();
    assert_eq!(item.priority, "3");
    assert_eq!(stats.unmapped_priorities, 1);
}

#[test]
fn test_empty_missing_text_policy() {
    let index = EnrichmentIndex::new();
    let mut options = create_test_options();
    options.missing_description = MissingText::Empty;
    let builder = WorkItemBuilder::new(&index, &options);

    let row = create_default_row(&[("Issue key", "BUG-1")]);
    let item = builder.build_row(&row, &mut MergeStats::new()).unwrap();
    assert!(item.description.starts_with("### Description\n\n\n### Environment"));
}

#[test]
fn test_build_all_preserves_order_and_skips_bad_rows() {
    let index = create_test_index();
    let options = create_test_options();
    let builder = WorkItemBuilder::new(&index, &options);

    let rows = vec![
        Ok(create_default_row(&[("Issue key", "BUG-9"), ("Summary", "first")])),
        Err(Error::malformed_row(3, "found record with 3 fields")),
        Ok(create_default_row(&[("Summary", "no key")])),
        Ok(create_default_row(&[("Issue key", "BUG-7"), ("Summary", "second")])),
    ];
    let result = builder.build_all(rows).unwrap();

    let titles: Vec<_> = result.work_items.iter().map(|w| w.title.as_str()).collect();
    assert_eq!(titles, vec!["first", "second"]);
    assert_eq!(result.stats.rows_read, 4);
    assert_eq!(result.stats.malformed_rows, 1);
    assert_eq!(result.stats.skipped_missing_key, 1);
    assert_eq!(result.stats.rows_skipped(), 2);
    assert_eq!(result.stats.enrichment_matches, 1);
    assert!(!result.is_complete());
    assert_eq!(result.work_item_count(), 2);
}

#[test]
fn test_build_all_stops_on_fatal_error() {
    let index = EnrichmentIndex::new();
    let options = create_test_options();
    let builder = WorkItemBuilder::new(&index, &options);

    let rows = vec![
        Ok(create_default_row(&[("Issue key", "BUG-1")])),
        Err(Error::processing_interrupted("stopped")),
    ];
    assert!(matches!(
        builder.build_all(rows),
        Err(Error::ProcessingInterrupted { .. })
    ));
}

#[test]
fn test_options_require_base_url() {
    let config = Config::default();
    assert!(matches!(
        BuilderOptions::from_config(&config),
        Err(Error::Configuration { .. })
    ));
}

#[test]
fn test_custom_work_item_type_and_columns() {
    let mut config = Config::default();
    config.migration.issue_base_url = Some("https://j/browse/".to_string());
    config.migration.work_item_type = "Issue".to_string();
    config.columns.summary = "Title".to_string();
    let options = BuilderOptions::from_config(&config).unwrap();
    assert_eq!(options.issue_base_url, "https://j/browse/");

    let index = EnrichmentIndex::new();
    let builder = WorkItemBuilder::new(&index, &options);
    let row = SourceRow::new(
        ["Issue key", "Title"].iter().map(|h| h.to_string()).collect(),
        vec!["X-1".to_string(), "Renamed column".to_string()],
        2,
    );
    let item = builder.build_row(&row, &mut MergeStats::new()).unwrap();
    assert_eq!(item.work_item_type, "Issue");
    assert_eq!(item.title, "Renamed column");
}

#[test]
fn test_check_columns() {
    let columns = crate::app::models::ColumnNames::default();
    assert!(check_columns(&default_headers(), &columns).is_ok());

    let headers: Vec<String> = vec!["Summary".to_string()];
    assert!(matches!(
        check_columns(&headers, &columns),
        Err(Error::DataValidation { .. })
    ));
}

#[test]
fn test_stats_summary() {
    let stats = MergeStats {
        rows_read: 4,
        work_items: 2,
        enrichment_matches: 1,
        ..MergeStats::default()
    };
    assert_eq!(stats.success_rate(), 50.0);
    assert_eq!(stats.enrichment_rate(), 50.0);
    assert!(stats.summary().contains("4 rows -> 2 work items"));
}

#[test]
fn test_issue_link_appends_key_to_base_url_verbatim() {
    let mut config = Config::default();
    config.migration.issue_base_url =
        Some("https://jira.example.com/secure/QuickSearch.jspa?searchString=".to_string());
    let options = BuilderOptions::from_config(&config).unwrap();

    let index = EnrichmentIndex::new();
    let builder = WorkItemBuilder::new(&index, &options);
    let row = SourceRow::new(
        ["Issue key", "Summary"].iter().map(|h| h.to_string()).collect(),
        vec!["BUG-1".to_string(), "Crash".to_string()],
        2,
    );
    let item = builder.build_row(&row, &mut MergeStats::new()).unwrap();

    assert!(item.description.contains(
        "[View in Jira](https://jira.example.com/secure/QuickSearch.jspa?searchString=BUG-1)"
    ));
    let description = IssueDescription::parse(&item.description).unwrap();
    assert_eq!(
        description.issue_key("https://jira.example.com/secure/QuickSearch.jspa?searchString="),
        Some("BUG-1")
    );
}
