//! Extract-attachments command implementation
//!
//! Collects every attachment link of a Jira export into a text file, one link
//! per line, in row order.

use super::shared::{
    RunSummary, apply_attachment_overrides, create_spinner, display_name, finish,
    load_configuration, setup_logging, tick,
};
use crate::Result;
use crate::app::models::SourceRow;
use crate::app::services::attachment_extractor::AttachmentExtractor;
use crate::app::services::csv_io::{CsvSource, write_lines};
use crate::cli::args::ExtractArgs;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Links found in an export
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkCollection {
    pub links: Vec<String>,
    pub rows_read: usize,
    pub malformed_rows: usize,
}

/// Extract-attachments command runner
pub async fn run_extract(args: ExtractArgs) -> Result<RunSummary> {
    let start_time = Instant::now();

    setup_logging(&args.common)?;
    info!("Extracting attachment links");
    debug!("Command line arguments: {:?}", args);

    args.common.validate()?;
    let mut config = load_configuration(&args.common)?;
    apply_attachment_overrides(&mut config, &args.attachments);
    config.validate()?;

    let input = args
        .input
        .clone()
        .unwrap_or_else(|| config.paths.all_fields.clone());
    let extractor = AttachmentExtractor::from_config(&config.attachments);

    let source = CsvSource::load(&input).await?;
    let scanned = extractor.scanned_columns(source.headers());
    if scanned.is_empty() {
        warn!("{} has no attachment columns", source.label());
    } else {
        info!("Scanning columns: {}", scanned.join(", "));
    }

    let progress = create_spinner(args.common.show_progress(), "Scanning rows");
    let collection = collect_links(source.rows().inspect(|_| tick(&progress)), &extractor)?;
    finish(progress, format!("Found {} links", collection.links.len()));

    let mut summary = RunSummary::new("extract-attachments");
    summary.dry_run = args.dry_run;
    summary.rows_read = collection.rows_read;
    summary.malformed_rows = collection.malformed_rows;

    if args.dry_run {
        info!(
            "Dry run: {} links would be written to {}",
            collection.links.len(),
            args.output.display()
        );
    } else {
        let size = write_lines(&args.output, &collection.links).await?;
        summary.records_written = collection.links.len();
        summary.output_sizes.push((display_name(&args.output), size));
    }

    summary.processing_time = start_time.elapsed();
    summary.print_report(args.common.output_format)?;

    Ok(summary)
}

/// Collect links from every row, in row order
///
/// Malformed rows are logged, counted and skipped.
pub fn collect_links<I>(rows: I, extractor: &AttachmentExtractor) -> Result<LinkCollection>
where
    I: IntoIterator<Item = Result<SourceRow>>,
{
    let mut collection = LinkCollection::default();

    for row in rows {
        collection.rows_read += 1;
        match row {
            Ok(row) => collection.links.extend(extractor.extract_row(&row)),
            Err(e) if e.is_recoverable() => {
                warn!("Skipping row: {}", e);
                collection.malformed_rows += 1;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(collection)
}
