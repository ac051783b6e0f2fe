//! Clean command implementation
//!
//! Rewrites the description column of a single Jira export from wiki markup
//! to Markdown and writes every column back in its original order.

use super::shared::{
    RunSummary, create_spinner, display_name, finish, load_configuration, setup_logging, tick,
};
use crate::app::models::SourceRow;
use crate::app::services::csv_io::{CsvSource, write_table};
use crate::app::services::markup_normalizer::{MissingText, normalize_or_default};
use crate::cli::args::CleanArgs;
use crate::Result;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Cleaned rows and counters
#[derive(Debug, Clone, Default)]
pub struct CleanResult {
    pub records: Vec<Vec<String>>,
    pub rows_read: usize,
    pub malformed_rows: usize,
}

/// Clean command runner
pub async fn run_clean(args: CleanArgs) -> Result<RunSummary> {
    let start_time = Instant::now();

    setup_logging(&args.common)?;
    info!("Cleaning descriptions in {}", args.input.display());
    debug!("Command line arguments: {:?}", args);

    args.common.validate()?;
    let mut config = load_configuration(&args.common)?;
    if let Some(missing) = args.missing_description {
        config.description.missing = Some(missing);
    }
    config.validate()?;

    let missing = config.description.missing.unwrap_or(MissingText::Empty);
    let column = config.columns.description.clone();

    let source = CsvSource::load(&args.input).await?;
    let headers = source.headers().to_vec();
    if !source.has_column(&column) {
        warn!(
            "{} has no '{}' column, rows are copied unchanged",
            source.label(),
            column
        );
    }

    let progress = create_spinner(args.common.show_progress(), "Cleaning rows");
    let cleaned = clean_rows(source.rows().inspect(|_| tick(&progress)), &column, missing)?;
    finish(progress, format!("Cleaned {} rows", cleaned.records.len()));

    let mut summary = RunSummary::new("clean");
    summary.dry_run = args.dry_run;
    summary.rows_read = cleaned.rows_read;
    summary.malformed_rows = cleaned.malformed_rows;

    let output = args.get_output_path();
    if args.dry_run {
        info!(
            "Dry run: {} rows would be written to {}",
            cleaned.records.len(),
            output.display()
        );
    } else {
        let size = write_table(&output, &headers, &cleaned.records).await?;
        summary.records_written = cleaned.records.len();
        summary.output_sizes.push((display_name(&output), size));
    }

    summary.processing_time = start_time.elapsed();
    summary.print_report(args.common.output_format)?;

    Ok(summary)
}

/// Normalize the description column of every row
///
/// Rows without the column are kept unchanged. Malformed rows are logged,
/// counted and dropped.
pub fn clean_rows<I>(rows: I, column: &str, missing: MissingText) -> Result<CleanResult>
where
    I: IntoIterator<Item = Result<SourceRow>>,
{
    let mut result = CleanResult::default();

    for row in rows {
        result.rows_read += 1;
        match row {
            Ok(mut row) => {
                let description = normalize_or_default(row.get(column), missing);
                row.set(column, description);
                result.records.push(row.into_values());
            }
            Err(e) if e.is_recoverable() => {
                warn!("Skipping row: {}", e);
                result.malformed_rows += 1;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(result)
}
