//! Azure DevOps work item construction
//!
//! Joins rows of the Jira "default fields" export with the enrichment index
//! built from the "all fields" export and maps every row to a [`WorkItem`].
//!
//! # Architecture
//!
//! - [`builder`] - Row mapping and the merge loop
//! - [`priority`] - Jira priority label to Azure DevOps code tables
//! - [`timestamps`] - Date parsing and canonical UTC formatting
//! - [`description`] - The four-section work item description
//! - [`stats`] - Merge statistics and results
//!
//! The enrichment index must be complete before merging starts; the builder
//! only borrows it and never mutates it.
//!
//! # Example Usage
//!
//! ```rust
//! use jira_devops_migrator::app::services::enrichment_loader::EnrichmentIndex;
//! use jira_devops_migrator::app::services::work_item_builder::{BuilderOptions, WorkItemBuilder};
//! use jira_devops_migrator::config::Config;
//!
//! # fn example(rows: Vec<jira_devops_migrator::SourceRow>) -> jira_devops_migrator::Result<()> {
//! let mut config = Config::default();
//! config.migration.issue_base_url = Some("https://jira.example.com/browse/".to_string());
//!
//! let index = EnrichmentIndex::new();
//! let options = BuilderOptions::from_config(&config)?;
//! let builder = WorkItemBuilder::new(&index, &options);
//!
//! let result = builder.build_all(rows.into_iter().map(Ok))?;
//! println!("{}", result.stats.summary());
//! # Ok(())
//! # }
//! ```
//!
//! [`WorkItem`]: crate::app::models::WorkItem

pub mod builder;
pub mod description;
pub mod priority;
pub mod stats;
pub mod timestamps;

#[cfg(test)]
pub mod tests;

pub use builder::{BuilderOptions, WorkItemBuilder, check_columns};
pub use description::IssueDescription;
pub use priority::{PriorityScheme, PriorityTable};
pub use stats::{MergeResult, MergeStats};
pub use timestamps::{normalize_timestamp, parse_timestamp};
