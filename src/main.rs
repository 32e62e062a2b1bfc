//! # Ticker Sentiment
//!
//! Scrapes the news-headline table from the Finviz quote page of a fixed set
//! of tickers, scores every headline with VADER, and charts the average
//! sentiment per ticker and day.
//!
//! ## Usage
//!
//! ```sh
//! ticker_sentiment
//! ticker_sentiment --format json --date-fill carry-forward
//! RUST_LOG=debug ticker_sentiment --no-color
//! ```
//!
//! ## Architecture
//!
//! The application is a linear pipeline, run once per invocation:
//! 1. **Fetching**: Download each ticker's quote page, one at a time
//! 2. **Extraction**: Pull headline rows out of the `news-table` element
//! 3. **Normalization**: Resolve each row's date against the run's fixed "today"
//! 4. **Scoring**: Attach a VADER compound score to every headline
//! 5. **Aggregation**: Average scores per (ticker, date)
//! 6. **Output**: Print a bar chart or JSON, or a notice when nothing was scraped
//!
//! Logs go to stderr; stdout only carries the result.

use clap::Parser;
use std::error::Error;
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod aggregate;
mod cli;
mod config;
mod models;
mod normalize;
mod outputs;
mod pipeline;
mod scrapers;
mod sentiment;
mod utils;

use cli::Cli;
use config::Settings;
use models::{TICKERS, TickerOutcome};
use normalize::{Normalizer, RunContext};
use pipeline::Pipeline;
use scrapers::finviz::FinvizFetcher;
use sentiment::VaderScorer;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("ticker_sentiment starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let settings = Settings::from_cli(&args).await?;
    info!(
        base_url = %settings.base_url,
        user_agent = %settings.user_agent,
        format = ?settings.format,
        date_fill = ?settings.date_fill,
        year_assumption = ?settings.year_assumption,
        "Resolved settings"
    );

    let ctx = RunContext::capture(settings.date_fill, settings.year_assumption);
    let fetcher = FinvizFetcher::new(&settings.base_url, &settings.user_agent)?;
    let pipeline = Pipeline::new(fetcher, VaderScorer::new(), Normalizer::new(ctx));

    let report = pipeline.run(&TICKERS).await;

    for (ticker, outcome) in &report.outcomes {
        match outcome {
            TickerOutcome::Fetched { .. } => info!(%ticker, %outcome, "Ticker done"),
            TickerOutcome::NoTable | TickerOutcome::FetchFailed { .. } => {
                warn!(%ticker, %outcome, "Ticker contributed no headlines")
            }
        }
    }

    let rendered = outputs::render(&report.aggregate, &settings, ctx.today)?;
    println!("{rendered}");

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        headlines = report.records.len(),
        groups = report.aggregate.group_count(),
        "Execution complete"
    );

    Ok(())
}
