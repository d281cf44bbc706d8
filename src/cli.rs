//! Command-line interface definitions for the stroke article dashboard.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Every store and listener setting can also come from an environment
//! variable or from a YAML file passed with `--config`.

use clap::Parser;

/// Command-line arguments for the dashboard server.
///
/// Unset options fall back to the YAML file (if any) and then to the
/// built-in defaults in [`crate::config::DashboardConfig`].
///
/// # Examples
///
/// ```sh
/// # Local MongoDB with the default database and collection
/// stroke_dashboard
///
/// # Remote store, custom listener
/// stroke_dashboard --mongo-uri mongodb://db.internal:27017/ --bind 0.0.0.0:8080
///
/// # Everything from a file
/// stroke_dashboard --config dashboard.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// MongoDB connection string
    #[arg(long, env = "MONGO_URI")]
    pub mongo_uri: Option<String>,

    /// Database holding the article collection
    #[arg(short, long, env = "MONGO_DATABASE")]
    pub database: Option<String>,

    /// Collection of scraped articles
    #[arg(long, env = "MONGO_COLLECTION")]
    pub collection: Option<String>,

    /// Address the HTTP server listens on
    #[arg(short, long, env = "DASHBOARD_BIND")]
    pub bind: Option<String>,
}
