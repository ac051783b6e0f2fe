use clap::Parser;
use jira_devops_migrator::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    let Some(command) = args.command else {
        show_help_and_commands();
        process::exit(0);
    };

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        // Output files are replaced atomically, so dropping the command
        // future on Ctrl-C leaves no partial file behind
        tokio::select! {
            result = commands::run(command) => result,
            signal = tokio::signal::ctrl_c() => {
                if let Err(e) = signal {
                    eprintln!("Failed to listen for CTRL+C: {}", e);
                }
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(jira_devops_migrator::Error::processing_interrupted(
                    "Processing interrupted by user",
                ))
            }
        }
    });

    match result {
        Ok(_summary) => {
            // Success - the summary has already been reported by the command
            process::exit(0);
        }
        Err(error) => {
            // Print the error with its full source chain
            eprintln!("Error: {:#}", anyhow::Error::new(error));
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Jira to Azure DevOps Migrator");
    println!("=============================");
    println!();
    println!("Convert Jira CSV exports into the CSV import format of Azure DevOps");
    println!("work item tracking.");
    println!();
    println!("USAGE:");
    println!("    jira-devops-migrator <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    convert                Join both Jira exports into an import file (main command)");
    println!("    clean                  Convert the description column of one export to Markdown");
    println!("    extract-attachments    Write every attachment link of an export to a text file");
    println!("    help                   Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Convert all_fields.csv and default_fields.csv in the current directory:");
    println!("    jira-devops-migrator convert --base-url https://example.atlassian.net/browse/");
    println!();
    println!("    # Convert with custom paths and the ascending priority scale:");
    println!(
        "    jira-devops-migrator convert -a export/all.csv -d export/default.csv -o azure.csv \\"
    );
    println!("                                 --priority-scheme ascending");
    println!();
    println!("    # Clean descriptions of a single export:");
    println!("    jira-devops-migrator clean 1000.csv");
    println!();
    println!("    # Collect attachment links:");
    println!("    jira-devops-migrator extract-attachments all_fields.csv -o attachment-links.txt");
    println!();
    println!("For detailed help on any command, use:");
    println!("    jira-devops-migrator <COMMAND> --help");
}
