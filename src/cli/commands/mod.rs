//! Command implementations for the migrator CLI
//!
//! Each command lives in its own module; shared reporting, logging and
//! configuration helpers are in [`shared`].

pub mod clean;
pub mod convert;
pub mod extract;
pub mod shared;

pub use shared::RunSummary;

use crate::Result;
use crate::cli::args::Commands;

/// Main command runner
///
/// Dispatches to the handler for the given subcommand:
/// - `convert`: join both Jira exports into an Azure DevOps import file
/// - `clean`: normalize the description column of one export
/// - `extract-attachments`: collect attachment links into a text file
pub async fn run(command: Commands) -> Result<RunSummary> {
    match command {
        Commands::Convert(convert_args) => convert::run_convert(convert_args).await,
        Commands::Clean(clean_args) => clean::run_clean(clean_args).await,
        Commands::ExtractAttachments(extract_args) => extract::run_extract(extract_args).await,
    }
}
