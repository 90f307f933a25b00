use std::path::PathBuf;

use clap::{Parser, Subcommand};
use takeoff_export::document::JsonDocument;
use takeoff_export::export;
use takeoff_export::{ExportError, Result};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_logging()?;
    match cli.command {
        Command::Export(args) => execute_export(args),
    }
}

fn execute_export(args: ExportArgs) -> Result<()> {
    if !args.document.exists() {
        return Err(ExportError::MissingInput(args.document));
    }

    let document = JsonDocument::open(&args.document)?;
    let report = export::export_document(&document)?;
    println!(
        "finished: {} ({} sheets) in {} seconds",
        report.workbook_path.display(),
        report.sheet_count,
        report.elapsed.as_secs()
    );
    Ok(())
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| ExportError::Logging(error.to_string()))
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Consolidate a modeling document's schedule views into one Excel workbook."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Export every schedule view of a document into a timestamped workbook.
    Export(ExportArgs),
}

#[derive(clap::Args)]
struct ExportArgs {
    /// Path of the document manifest to export.
    #[arg(long)]
    document: PathBuf,
}
