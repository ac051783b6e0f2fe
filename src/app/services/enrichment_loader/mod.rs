//! Enrichment index loading
//!
//! Reads the Jira "all fields" export into an [`EnrichmentIndex`] keyed by
//! issue key. Each entry holds the normalized description, the environment
//! text and the attachment URLs of one issue. The index is returned as a
//! plain value and passed to the work item builder.

pub mod loader;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use loader::{EnrichmentIndex, EnrichmentOptions, build_record, check_columns, load_enrichment};
pub use stats::{LoadResult, LoadStats};
