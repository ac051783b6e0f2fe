//! Application constants for the Jira to Azure DevOps migrator
//!
//! This module contains the fixed strings, default values and column names
//! used throughout the migration pipeline.

// =============================================================================
// Default File Locations
// =============================================================================

/// Default path of the Jira "all fields" export
pub const DEFAULT_ALL_FIELDS_FILE: &str = "all_fields.csv";

/// Default path of the Jira "default fields" export
pub const DEFAULT_DEFAULT_FIELDS_FILE: &str = "default_fields.csv";

/// Default path of the generated Azure DevOps import file
pub const DEFAULT_OUTPUT_FILE: &str = "azure_output.csv";

/// Default path of the attachment link list
pub const DEFAULT_ATTACHMENT_LINKS_FILE: &str = "attachment-links.txt";

/// Directory name used below the platform config directory
pub const CONFIG_DIR_NAME: &str = "jira-devops-migrator";

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

// =============================================================================
// Sentinel Values
// =============================================================================

/// Rendered when an issue has no usable description
pub const NO_DESCRIPTION: &str = "No description available.";

/// Rendered when an issue has no environment value
pub const NOT_PROVIDED: &str = "Not Provided";

/// Rendered when no attachment URLs were found
pub const NO_ATTACHMENTS: &str = "No Attachments";

/// Link text for the back-reference to the original issue
pub const ORIGINAL_ISSUE_LINK_TEXT: &str = "View in Jira";

/// Default Azure DevOps work item type
pub const DEFAULT_WORK_ITEM_TYPE: &str = "Bug";

// =============================================================================
// Jira Column Names
// =============================================================================

/// Default Jira column names
pub mod jira_columns {
    pub const ISSUE_KEY: &str = "Issue key";
    pub const SUMMARY: &str = "Summary";
    pub const ASSIGNEE: &str = "Assignee";
    pub const REPORTER: &str = "Reporter";
    pub const PRIORITY: &str = "Priority";
    pub const STATUS: &str = "Status";
    pub const CREATED: &str = "Created";
    pub const UPDATED: &str = "Updated";
    pub const DESCRIPTION: &str = "Description";
    pub const ENVIRONMENT: &str = "Environment";
}

/// Case-insensitive header fragment identifying attachment columns
pub const DEFAULT_ATTACHMENT_COLUMN_PATTERN: &str = "attachment";

/// Separator between entries of a multi-valued attachment cell
pub const DEFAULT_ATTACHMENT_DELIMITER: char = ';';

// =============================================================================
// Azure DevOps Output
// =============================================================================

/// Output column order of the Azure DevOps import file
pub const OUTPUT_COLUMNS: [&str; 9] = [
    "Work Item Type",
    "Title",
    "Assigned To",
    "Created By",
    "Priority",
    "State",
    "Created Date",
    "Changed Date",
    "Description",
];

/// Description section headings, in rendering order
pub mod sections {
    pub const DESCRIPTION: &str = "### Description";
    pub const ENVIRONMENT: &str = "### Environment";
    pub const ORIGINAL_ISSUE: &str = "### Original Issue";
    pub const ATTACHMENTS: &str = "### Attachments";
}

/// Priority codes accepted by Azure DevOps
///
/// Which end of the scale is most urgent depends on the priority scheme.
pub mod priority_codes {
    pub const CODE_1: &str = "1";
    pub const CODE_2: &str = "2";
    pub const CODE_3: &str = "3";
    pub const CODE_4: &str = "4";
}

// =============================================================================
// Logging
// =============================================================================

/// Default log level when no verbosity flags are given
pub const DEFAULT_LOG_LEVEL: &str = "warn";
