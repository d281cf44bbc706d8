//! # Stroke Dashboard
//!
//! A read-only analytics dashboard over a MongoDB collection of scraped
//! Indonesian health articles about stroke symptoms.
//!
//! ## Features
//!
//! - Summary metrics: total articles and distinct source domains
//! - Articles per month as a line chart
//! - The five domains with the most articles as a bar chart
//! - A word cloud of article titles with Indonesian stopwords removed
//! - Case-insensitive title search
//! - A fixed listing of every article mentioning "stroke"
//!
//! ## Usage
//!
//! ```sh
//! stroke_dashboard --mongo-uri mongodb://localhost:27017/ -b 127.0.0.1:8501
//! ```
//!
//! ## Architecture
//!
//! Every page request is one full pass:
//! 1. **Load**: Fetch all documents from the article collection
//! 2. **Normalize**: Parse release dates and derive each URL's domain
//! 3. **Aggregate**: Summary, monthly series, top domains, title word cloud
//! 4. **Filter**: Title search and the fixed "stroke" keyword listing
//! 5. **Render**: One HTML page with inline SVG charts

use clap::Parser;
use std::error::Error;
use tracing::{debug, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod aggregate;
mod cli;
mod config;
mod dashboard;
mod error;
mod models;
mod normalize;
mod outputs;
mod search;
mod store;
mod text;
mod utils;
mod web;
mod wordcloud;

use cli::Cli;
use config::DashboardConfig;
use store::MongoSource;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("stroke_dashboard starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.config, "Parsed CLI arguments");

    // ---- Load config ----
    let config = DashboardConfig::load(&args).await?;
    info!(
        database = %config.database,
        collection = %config.collection,
        bind = %config.bind,
        "Loaded configuration"
    );

    // ---- Store client ----
    let source = MongoSource::connect(&config).await?;

    // ---- Serve ----
    web::serve(&config, source).await?;

    let elapsed = start_time.elapsed();
    info!(?elapsed, secs = elapsed.as_secs(), "Execution complete");

    Ok(())
}
