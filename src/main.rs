use chrono::NaiveDate;
use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use storeview::application::engine::DashboardEngine;
use storeview::domain::ports::TableSourceBox;
use storeview::infrastructure::http::HttpTableSource;
use storeview::infrastructure::local::FileTableSource;
use storeview::interfaces::json::view_writer::ViewWriter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Local transactions CSV (fetched from the upstream URL when omitted)
    #[arg(long, requires = "geo_csv")]
    main_csv: Option<PathBuf>,

    /// Local geolocation CSV
    #[arg(long, requires = "main_csv")]
    geo_csv: Option<PathBuf>,

    /// Start of the date window (YYYY-MM-DD), clamped to the data bounds
    #[arg(long)]
    from: Option<NaiveDate>,

    /// End of the date window (YYYY-MM-DD), clamped to the data bounds
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Write the view document here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let (source, background_url): (TableSourceBox, Option<String>) =
        match (cli.main_csv, cli.geo_csv) {
            (Some(main_path), Some(geo_path)) => {
                (Box::new(FileTableSource::new(main_path, geo_path)), None)
            }
            _ => {
                let http = HttpTableSource::new();
                let url = http.background_url().to_string();
                (Box::new(http), Some(url))
            }
        };

    let transactions = source.fetch_transactions().await.into_diagnostic()?;
    let geolocation = source.fetch_geolocation().await.into_diagnostic()?;
    log::info!(
        "materialized {} transaction rows, {} geo points",
        transactions.len(),
        geolocation.len()
    );

    // Probe the map backdrop separately from view assembly; the overlay
    // degrades to points-only when it is unreachable.
    let background = match background_url {
        Some(url) => match source.fetch_map_background().await {
            Ok(_) => Some(url),
            Err(e) => {
                log::warn!("map background unavailable: {e}");
                None
            }
        },
        None => None,
    };

    let engine = DashboardEngine::new(transactions, geolocation);
    let range = engine.resolve_range(cli.from, cli.to);
    let view = engine.view(range, background);

    match cli.output {
        Some(path) => {
            let file = File::create(path).into_diagnostic()?;
            ViewWriter::new(file).write_view(&view).into_diagnostic()?;
        }
        None => {
            let stdout = io::stdout();
            ViewWriter::new(stdout.lock())
                .write_view(&view)
                .into_diagnostic()?;
        }
    }

    Ok(())
}
