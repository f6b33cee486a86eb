//! Page fetchers
//!
//! A [`Fetcher`] returns the raw records of one page of one category.
//! Its errors are opaque to the cursor and are passed through unchanged.

use super::types::{Category, FeedPage, RawRecord};
use crate::config::FeedConfig;
use crate::error::Result;
use crate::http::HttpClient;
use async_trait::async_trait;
use tracing::debug;

/// Source of feed pages
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch the records of `page` for `category`
    async fn fetch(&self, category: Category, page: u32) -> Result<Vec<RawRecord>>;
}

/// Fetches pages over HTTP as `GET {base}/{category}/{page}?json=true`
#[derive(Debug)]
pub struct HttpFetcher {
    client: HttpClient,
}

impl HttpFetcher {
    /// Create a fetcher on top of an existing client; the client's base URL
    /// must point at the feed host
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Create a fetcher from a validated feed configuration
    pub fn from_config(config: &FeedConfig) -> Result<Self> {
        config.validate()?;
        let client = HttpClient::new(&config.base_url, &config.http)?;
        Ok(Self::new(client))
    }

    /// Path of a page relative to the base URL
    pub fn page_path(category: Category, page: u32) -> String {
        format!("{}/{}", category.path_segment(), page)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, category: Category, page: u32) -> Result<Vec<RawRecord>> {
        let path = Self::page_path(category, page);
        debug!(%category, page, "Requesting feed page");

        let body: FeedPage = self.client.get_json(&path, &[("json", "true")]).await?;

        let total = body.total_count;
        let records = body.into_records();
        debug!(%category, page, records = records.len(), total = ?total, "Feed page received");
        Ok(records)
    }
}
