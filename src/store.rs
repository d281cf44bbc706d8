//! Article loading from the document store.
//!
//! The dashboard reads the whole collection on every render: no filter, no
//! sort, no pagination, documents in store-native order. An empty collection
//! is a normal result, not an error.
//!
//! # Architecture
//!
//! - [`ArticleSource`]: the seam the web layer depends on
//! - [`MongoSource`]: the production implementation backed by MongoDB
//!
//! Connection pooling, reconnects and server selection belong to the
//! `mongodb` driver; faults are surfaced unchanged as
//! [`DashboardError::Store`].

use crate::config::DashboardConfig;
use crate::error::DashboardError;
use crate::models::RawArticle;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::{Client, Collection};
use std::future::Future;
use tracing::{debug, info, instrument};

/// Anything that can hand over the full article collection.
pub trait ArticleSource: Send + Sync + 'static {
    /// Fetch every stored article.
    ///
    /// Returns an empty vector for an empty collection.
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<RawArticle>, DashboardError>> + Send;
}

/// MongoDB-backed article source.
#[derive(Clone)]
pub struct MongoSource {
    collection: Collection<RawArticle>,
}

impl MongoSource {
    /// Create a source for the configured database and collection.
    ///
    /// The driver connects lazily, so this succeeds without a reachable
    /// server as long as the connection string is valid.
    #[instrument(level = "info", skip_all, fields(database = %config.database, collection = %config.collection))]
    pub async fn connect(config: &DashboardConfig) -> Result<Self, DashboardError> {
        let client = Client::with_uri_str(&config.mongo_uri).await?;
        let collection = client
            .database(&config.database)
            .collection::<RawArticle>(&config.collection);
        info!("Article store client ready");
        Ok(Self { collection })
    }
}

impl ArticleSource for MongoSource {
    #[instrument(level = "info", skip_all, fields(collection = %self.collection.name()))]
    async fn fetch_all(&self) -> Result<Vec<RawArticle>, DashboardError> {
        let cursor = self.collection.find(doc! {}).await?;
        let articles: Vec<RawArticle> = cursor.try_collect().await?;
        debug!(count = articles.len(), "Fetched articles");
        Ok(articles)
    }
}

#[cfg(test)]
pub mod memory {
    //! In-memory source for exercising the web layer without a server.

    use super::*;

    #[derive(Clone, Debug, Default)]
    pub struct MemorySource {
        pub articles: Vec<RawArticle>,
    }

    impl ArticleSource for MemorySource {
        async fn fetch_all(&self) -> Result<Vec<RawArticle>, DashboardError> {
            Ok(self.articles.clone())
        }
    }
}
