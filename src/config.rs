//! Runtime configuration for the store connection and the HTTP listener.
//!
//! Settings are layered, later layers winning:
//! 1. Built-in defaults matching the production deployment
//! 2. An optional YAML file (`--config dashboard.yaml`)
//! 3. CLI flags and their environment variables
//!
//! # File Format
//!
//! ```yaml
//! mongo_uri: mongodb://localhost:27017/
//! database: stroke_app
//! collection: crawling
//! bind: 127.0.0.1:8501
//! ```
//!
//! Every key is optional; unknown keys are rejected so typos surface at start-up.

use crate::cli::Cli;
use crate::error::DashboardError;
use serde::Deserialize;
use std::net::SocketAddr;
use tokio::fs;
use tracing::{debug, info, instrument};

pub const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017/";
pub const DEFAULT_DATABASE: &str = "stroke_app";
pub const DEFAULT_COLLECTION: &str = "crawling";
pub const DEFAULT_BIND: &str = "127.0.0.1:8501";

/// Partial configuration as read from a YAML file.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub mongo_uri: Option<String>,
    pub database: Option<String>,
    pub collection: Option<String>,
    pub bind: Option<String>,
}

impl FileConfig {
    /// Parse a YAML document. An empty document is an empty configuration.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, DashboardError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// MongoDB connection string.
    pub mongo_uri: String,
    /// Database holding the article collection.
    pub database: String,
    /// Collection of scraped articles.
    pub collection: String,
    /// Socket address for the HTTP server.
    pub bind: SocketAddr,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            mongo_uri: DEFAULT_MONGO_URI.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            bind: SocketAddr::from(([127, 0, 0, 1], 8501)),
        }
    }
}

impl DashboardConfig {
    /// Resolve the configuration from the CLI, reading the YAML file it names.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid YAML, or if
    /// the resulting bind address is not a socket address.
    #[instrument(level = "info", skip_all, fields(config = ?cli.config))]
    pub async fn load(cli: &Cli) -> Result<Self, DashboardError> {
        let file = match &cli.config {
            Some(path) => {
                let yaml = fs::read_to_string(path).await?;
                info!(%path, "Loaded configuration file");
                FileConfig::from_yaml_str(&yaml)?
            }
            None => FileConfig::default(),
        };
        let config = Self::merge(file, cli)?;
        debug!(?config, "Resolved configuration");
        Ok(config)
    }

    /// Layer a file configuration and CLI overrides on top of the defaults.
    pub fn merge(file: FileConfig, cli: &Cli) -> Result<Self, DashboardError> {
        let bind = cli
            .bind
            .clone()
            .or(file.bind)
            .unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind.parse::<SocketAddr>().map_err(|_| {
            DashboardError::Config(format!("bind address `{bind}` is not a socket address"))
        })?;

        Ok(Self {
            mongo_uri: cli
                .mongo_uri
                .clone()
                .or(file.mongo_uri)
                .unwrap_or_else(|| DEFAULT_MONGO_URI.to_string()),
            database: cli
                .database
                .clone()
                .or(file.database)
                .unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            collection: cli
                .collection
                .clone()
                .or(file.collection)
                .unwrap_or_else(|| DEFAULT_COLLECTION.to_string()),
            bind,
        })
    }
}
