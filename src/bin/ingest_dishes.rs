use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use dish_catalog::config::{self, DATABASE_URL};
use dish_catalog::ingest::{self, IngestReport};
use dish_catalog::pdf::PdfDocument;
use dish_catalog::store;
use tracing::info;

/// Load dish names from a "count name" table PDF into the catalog
#[derive(Parser)]
#[command(name = "ingest-dishes")]
struct Cli {
    /// PDF to read
    input: PathBuf,

    /// Catalog location (SQLite path, sqlite://path or :memory:)
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let database_url = match config::require(DATABASE_URL, cli.database_url) {
        Ok(url) => url,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(2);
        }
    };

    match run(&cli.input, &database_url) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(input: &std::path::Path, database_url: &str) -> anyhow::Result<()> {
    let doc = PdfDocument::open(input)?;
    info!("Read {} pages from {}", doc.page_count(), input.display());

    let names = ingest::extract_names(&doc);
    if names.is_empty() {
        println!("No dish names extracted; nothing to insert.");
        return Ok(());
    }

    let conn = store::connect(database_url)?;
    let report: IngestReport = ingest::store_names(&conn, &names)?;
    report.print();
    Ok(())
}
