//! Command-line argument definitions for the Jira to Azure DevOps migrator
//!
//! This module defines the CLI interface using the clap derive API. Every
//! option that also exists in the configuration file is optional here and
//! overrides the file value only when given.

use crate::app::services::attachment_extractor::{AttachmentSource, UrlMatching};
use crate::app::services::markup_normalizer::MissingText;
use crate::app::services::work_item_builder::PriorityScheme;
use crate::constants::DEFAULT_LOG_LEVEL;
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the Jira to Azure DevOps migrator
///
/// Converts Jira CSV exports into the CSV import format of Azure DevOps work
/// item tracking.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "jira-devops-migrator",
    version,
    about = "Convert Jira CSV exports into Azure DevOps work item import files",
    long_about = "Joins the Jira \"all fields\" and \"default fields\" CSV exports by issue key, \
                  converts Jira wiki markup to Markdown, collects attachment links, maps \
                  priorities and dates, and writes a CSV file ready for the Azure DevOps \
                  work item import."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Convert Jira exports into an Azure DevOps import file (main command)
    Convert(ConvertArgs),
    /// Normalize the description column of a single Jira export
    Clean(CleanArgs),
    /// Write every attachment link of a Jira export to a text file
    ExtractAttachments(ExtractArgs),
}

/// Options shared by all commands
#[derive(Debug, Clone, Parser)]
pub struct CommonArgs {
    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, looks for
    /// <config dir>/jira-devops-migrator/config.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings and hides progress.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Output format for the end-of-run report
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,
}

/// Attachment extraction overrides
#[derive(Debug, Clone, Default, Parser)]
pub struct AttachmentArgs {
    /// Which columns are scanned for attachment links
    #[arg(long = "attachment-source", value_enum, value_name = "SOURCE")]
    pub attachment_source: Option<AttachmentSource>,

    /// How links are recognised inside a cell
    #[arg(long = "url-matching", value_enum, value_name = "MODE")]
    pub url_matching: Option<UrlMatching>,
}

/// Arguments for the convert command
#[derive(Debug, Clone, Parser)]
pub struct ConvertArgs {
    /// Jira export with all fields (description, environment, attachments)
    #[arg(short = 'a', long = "all-fields", value_name = "FILE")]
    pub all_fields: Option<PathBuf>,

    /// Jira export with the default fields
    #[arg(short = 'd', long = "default-fields", value_name = "FILE")]
    pub default_fields: Option<PathBuf>,

    /// Azure DevOps import file to write
    ///
    /// Replaced atomically; a failed run leaves any previous file in place.
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Jira issue browser URL used for the "Original Issue" link
    ///
    /// For example https://example.atlassian.net/browse/. Required unless set
    /// in the configuration file.
    #[arg(short = 'b', long = "base-url", value_name = "URL")]
    pub base_url: Option<String>,

    /// Built-in priority table
    #[arg(long = "priority-scheme", value_enum, value_name = "SCHEME")]
    pub priority_scheme: Option<PriorityScheme>,

    /// Description used for issues without one
    #[arg(long = "missing-description", value_enum, value_name = "POLICY")]
    pub missing_description: Option<MissingText>,

    /// Azure DevOps work item type
    #[arg(long = "work-item-type", value_name = "TYPE")]
    pub work_item_type: Option<String>,

    /// Process both files and report without writing the output
    #[arg(
        long = "dry-run",
        help = "Show what would be converted without creating the output file"
    )]
    pub dry_run: bool,

    #[command(flatten)]
    pub attachments: AttachmentArgs,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the clean command
#[derive(Debug, Clone, Parser)]
pub struct CleanArgs {
    /// Jira CSV export to clean
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Cleaned file to write, defaults to <input stem>_cleaned.csv
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Text used for empty descriptions, `empty` unless configured
    #[arg(long = "missing-description", value_enum, value_name = "POLICY")]
    pub missing_description: Option<MissingText>,

    /// Process the file and report without writing the output
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the extract-attachments command
#[derive(Debug, Clone, Parser)]
pub struct ExtractArgs {
    /// Jira CSV export to scan, defaults to the configured all fields file
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Text file to write, one link per line
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        default_value = crate::constants::DEFAULT_ATTACHMENT_LINKS_FILE
    )]
    pub output: PathBuf,

    /// Scan the file and report without writing the output
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    #[command(flatten)]
    pub attachments: AttachmentArgs,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Output format options for the end-of-run report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON format for scripting
    Json,
}

impl CommonArgs {
    /// Validate options shared by all commands
    pub fn validate(&self) -> Result<()> {
        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }
        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => DEFAULT_LOG_LEVEL,
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress spinners (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl Default for CommonArgs {
    fn default() -> Self {
        Self {
            config_file: None,
            verbose: 0,
            quiet: false,
            output_format: OutputFormat::Human,
        }
    }
}

impl ConvertArgs {
    /// Validate argument values that clap cannot check
    pub fn validate(&self) -> Result<()> {
        self.common.validate()?;

        if let Some(base_url) = &self.base_url {
            if base_url.trim().is_empty() {
                return Err(Error::configuration("Base URL cannot be empty"));
            }
        }

        if let Some(work_item_type) = &self.work_item_type {
            if work_item_type.trim().is_empty() {
                return Err(Error::configuration("Work item type cannot be empty"));
            }
        }

        Ok(())
    }
}

impl CleanArgs {
    /// Output path, derived from the input name when not given
    pub fn get_output_path(&self) -> PathBuf {
        match &self.output {
            Some(output) => output.clone(),
            None => {
                let stem = self
                    .input
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "output".to_string());
                self.input.with_file_name(format!("{}_cleaned.csv", stem))
            }
        }
    }
}
