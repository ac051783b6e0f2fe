//! Tests for enrichment loading


use crate::app::models::SourceRow;

/// Create an all fields row
pub fn create_all_fields_row(headers: &[&str], values: &[&str]) -> SourceRow {
    SourceRow::new(
        headers.iter().map(|h| h.to_string()).collect(),
        values.iter().map(|v| v.to_string()).collect(),
        2,
    )
}
