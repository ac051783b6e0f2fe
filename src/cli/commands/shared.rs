//! Shared components for CLI commands
//!
//! This module contains the run summary, logging setup, configuration
//! loading and progress display used by every command.

use crate::app::services::enrichment_loader::LoadStats;
use crate::app::services::work_item_builder::MergeStats;
use crate::cli::args::{AttachmentArgs, CommonArgs, OutputFormat};
use crate::config::Config;
use crate::{Error, Result};
use colored::*;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// End-of-run statistics reported by every command
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Command that produced the summary
    pub command: String,
    /// Data rows read across all input files
    pub rows_read: usize,
    /// Records written (work items, cleaned rows or links)
    pub records_written: usize,
    /// Rows skipped for a missing issue key
    pub skipped_missing_key: usize,
    /// Rows skipped because they could not be parsed
    pub malformed_rows: usize,
    /// Loading statistics of the all fields export
    pub load_stats: Option<LoadStats>,
    /// Merge statistics of the default fields export
    pub merge_stats: Option<MergeStats>,
    /// Whether writing was skipped
    pub dry_run: bool,
    /// Total processing time
    pub processing_time: Duration,
    /// Output file sizes in bytes
    pub output_sizes: Vec<(String, u64)>,
}

impl RunSummary {
    /// Create an empty summary for a command
    pub fn new(command: &str) -> Self {
        Self {
            command: command.to_string(),
            ..Default::default()
        }
    }

    /// Rows that produced no output
    pub fn rows_skipped(&self) -> usize {
        self.skipped_missing_key + self.malformed_rows
    }

    /// Calculate total output size in bytes
    pub fn total_output_size(&self) -> u64 {
        self.output_sizes.iter().map(|(_, size)| size).sum()
    }

    /// Format output size in human-readable format
    pub fn format_size(bytes: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = bytes as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", bytes, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }

    /// Summary as a JSON value
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "command": self.command,
            "rows_read": self.rows_read,
            "records_written": self.records_written,
            "rows_skipped": self.rows_skipped(),
            "skipped_missing_key": self.skipped_missing_key,
            "malformed_rows": self.malformed_rows,
            "dry_run": self.dry_run,
            "processing_time_seconds": self.processing_time.as_secs_f64(),
            "total_output_size_bytes": self.total_output_size(),
            "load": self.load_stats,
            "merge": self.merge_stats,
            "output_files": self.output_sizes.iter().map(|(name, size)| {
                serde_json::json!({
                    "filename": name,
                    "size_bytes": size
                })
            }).collect::<Vec<_>>()
        })
    }

    /// Print the report in the requested format
    pub fn print_report(&self, format: OutputFormat) -> Result<()> {
        info!("Generating final report");

        match format {
            OutputFormat::Human => self.print_human_report(),
            OutputFormat::Json => self.print_json_report(),
        }
    }

    fn print_human_report(&self) -> Result<()> {
        let duration = HumanDuration(self.processing_time);

        if self.dry_run {
            println!("\n{}", "🔍 Dry run complete, nothing written".bold().yellow());
        } else {
            println!("\n{}", "🎉 Migration step complete!".bold().green());
        }
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!("📊 {} summary:", self.command.bold());
        println!("   • Rows read: {}", self.rows_read);
        println!("   • Records written: {}", self.records_written);

        if let Some(load) = &self.load_stats {
            println!(
                "   • Enrichment records: {} ({} attachment links)",
                load.records_loaded, load.attachments_found
            );
            if load.duplicate_keys > 0 {
                println!(
                    "   • Duplicate issue keys replaced: {}",
                    load.duplicate_keys.to_string().yellow()
                );
            }
        }

        if let Some(merge) = &self.merge_stats {
            println!(
                "   • Enriched work items: {} of {} ({:.1}%)",
                merge.enrichment_matches,
                merge.work_items,
                merge.enrichment_rate()
            );
            if merge.unmapped_priorities > 0 {
                println!(
                    "   • Unmapped priorities (default applied): {}",
                    merge.unmapped_priorities.to_string().yellow()
                );
            }
            if merge.invalid_dates > 0 {
                println!(
                    "   • Invalid dates (left empty): {}",
                    merge.invalid_dates.to_string().yellow()
                );
            }
        }

        println!("   • Processing time: {}", duration);

        if self.rows_skipped() > 0 {
            println!(
                "{}",
                format!(
                    "⚠️  Rows skipped: {} ({} missing issue key, {} malformed)",
                    self.rows_skipped(),
                    self.skipped_missing_key,
                    self.malformed_rows
                )
                .yellow()
            );
        }

        if !self.output_sizes.is_empty() {
            println!("\n📁 Output Files:");
            for (filename, size) in &self.output_sizes {
                println!("   • {}: {}", filename, Self::format_size(*size));
            }
        }

        println!();
        Ok(())
    }

    fn print_json_report(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.to_json()).map_err(|e| {
            Error::io(
                "Failed to encode JSON report",
                std::io::Error::new(std::io::ErrorKind::InvalidData, e),
            )
        })?;
        println!("{}", json);
        Ok(())
    }
}

/// Set up structured logging on stderr
pub fn setup_logging(args: &CommonArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("jira_devops_migrator={}", log_level)));

    let result = if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    // A subscriber installed earlier in the process stays in place
    if result.is_ok() {
        debug!("Logging initialized at level: {}", log_level);
    }
    Ok(())
}

/// Load configuration using the layered approach (defaults -> file)
///
/// Command-specific overrides are applied by each command afterwards.
pub fn load_configuration(args: &CommonArgs) -> Result<Config> {
    info!("Loading configuration");

    let default_config_path = if args.config_file.is_none() {
        Config::default_config_path().ok()
    } else {
        None
    };

    let config_file = match &args.config_file {
        Some(path) => Some(path.as_path()),
        None => default_config_path
            .as_deref()
            .filter(|path| path.exists()),
    };

    if let Some(config_path) = config_file {
        info!("Using config file: {}", config_path.display());
    } else {
        info!("No config file found, using defaults");
    }

    Config::load_layered(config_file)
}

/// Apply attachment extraction overrides
pub fn apply_attachment_overrides(config: &mut Config, args: &AttachmentArgs) {
    if let Some(source) = args.attachment_source {
        config.attachments.source = source;
    }
    if let Some(matching) = args.url_matching {
        config.attachments.matching = matching;
    }
}

/// Create a row counting spinner, or nothing in quiet mode
pub fn create_spinner(show: bool, message: &str) -> Option<ProgressBar> {
    if !show {
        return None;
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) =
        ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg} {pos} rows")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Some(pb)
}

/// Advance a spinner by one row
pub fn tick(progress: &Option<ProgressBar>) {
    if let Some(pb) = progress {
        pb.inc(1);
    }
}

/// Finish a spinner with a message
pub fn finish(progress: Option<ProgressBar>, message: String) {
    if let Some(pb) = progress {
        pb.finish_with_message(message);
    }
}

/// Display name of an output file for reports
pub fn display_name(path: &Path) -> String {
    path.display().to_string()
}
