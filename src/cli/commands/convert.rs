//! Convert command implementation
//!
//! Loads the all fields export into an enrichment index, merges the default
//! fields export against it and writes the Azure DevOps import file.

use super::shared::{
    RunSummary, apply_attachment_overrides, create_spinner, display_name, finish,
    load_configuration, setup_logging, tick,
};
use crate::Result;
use crate::app::services::csv_io::{CsvSource, write_table};
use crate::app::services::enrichment_loader::{self, EnrichmentOptions, load_enrichment};
use crate::app::services::work_item_builder::{self, BuilderOptions, WorkItemBuilder};
use crate::cli::args::ConvertArgs;
use crate::config::Config;
use crate::constants::OUTPUT_COLUMNS;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Convert command runner
///
/// 1. Set up logging and configuration
/// 2. Load the all fields export into the enrichment index
/// 3. Merge the default fields export into work items
/// 4. Write the import file and report
pub async fn run_convert(args: ConvertArgs) -> Result<RunSummary> {
    setup_logging(&args.common)?;

    info!("Starting Jira to Azure DevOps conversion");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;

    let mut config = load_configuration(&args.common)?;
    apply_cli_overrides(&mut config, &args);
    config.validate()?;
    debug!("Loaded configuration: {:?}", config);

    let summary = convert(&config, args.dry_run, args.common.show_progress()).await?;
    summary.print_report(args.common.output_format)?;

    Ok(summary)
}

/// Apply convert arguments on top of the loaded configuration
pub fn apply_cli_overrides(config: &mut Config, args: &ConvertArgs) {
    if let Some(all_fields) = &args.all_fields {
        config.paths.all_fields = all_fields.clone();
    }
    if let Some(default_fields) = &args.default_fields {
        config.paths.default_fields = default_fields.clone();
    }
    if let Some(output) = &args.output {
        config.paths.output = output.clone();
    }
    if let Some(base_url) = &args.base_url {
        config.migration.issue_base_url = Some(base_url.clone());
    }
    if let Some(work_item_type) = &args.work_item_type {
        config.migration.work_item_type = work_item_type.clone();
    }
    if let Some(scheme) = args.priority_scheme {
        config.priority.scheme = scheme;
    }
    if let Some(missing) = args.missing_description {
        config.description.missing = Some(missing);
    }
    apply_attachment_overrides(config, &args.attachments);
}

/// Run the conversion pipeline for a validated configuration
///
/// Both inputs are read completely before anything is written. Without
/// `dry_run` the output file is replaced atomically.
pub async fn convert(config: &Config, dry_run: bool, show_progress: bool) -> Result<RunSummary> {
    let start_time = Instant::now();

    let enrichment_options = EnrichmentOptions::from_config(config);
    let builder_options = BuilderOptions::from_config(config)?;

    // Stage 1: all fields export -> enrichment index
    let all_fields = CsvSource::load(&config.paths.all_fields).await?;
    enrichment_loader::check_columns(all_fields.headers(), &enrichment_options)?;

    let progress = create_spinner(show_progress, "Loading all fields export");
    let loaded = load_enrichment(
        all_fields.rows().inspect(|_| tick(&progress)),
        &enrichment_options,
    )?;
    finish(
        progress,
        format!("Loaded {} enrichment records", loaded.index.len()),
    );

    // Stage 2: default fields export -> work items
    let default_fields = CsvSource::load(&config.paths.default_fields).await?;
    work_item_builder::check_columns(default_fields.headers(), &builder_options.columns)?;

    let progress = create_spinner(show_progress, "Building work items");
    let builder = WorkItemBuilder::new(&loaded.index, &builder_options);
    let merged = builder.build_all(default_fields.rows().inspect(|_| tick(&progress)))?;
    finish(
        progress,
        format!("Built {} work items", merged.work_item_count()),
    );
    if !merged.is_complete() {
        warn!(
            "{} default fields rows produced no work item",
            merged.stats.rows_skipped()
        );
    }

    let mut summary = RunSummary::new("convert");
    summary.dry_run = dry_run;
    summary.rows_read = loaded.stats.rows_read + merged.stats.rows_read;
    summary.skipped_missing_key =
        loaded.stats.skipped_missing_key + merged.stats.skipped_missing_key;
    summary.malformed_rows = loaded.stats.malformed_rows + merged.stats.malformed_rows;

    // Stage 3: write
    if dry_run {
        info!(
            "Dry run: {} work items would be written to {}",
            merged.work_item_count(),
            config.paths.output.display()
        );
    } else {
        let size = write_table(&config.paths.output, &OUTPUT_COLUMNS, &merged.work_items).await?;
        summary.records_written = merged.work_item_count();
        summary
            .output_sizes
            .push((display_name(&config.paths.output), size));
    }

    summary.load_stats = Some(loaded.stats);
    summary.merge_stats = Some(merged.stats);
    summary.processing_time = start_time.elapsed();

    info!(
        "Conversion completed in {:.2}s",
        summary.processing_time.as_secs_f64()
    );

    Ok(summary)
}
