//! Paginated cursor implementation

use crate::error::{Error, Result};
use crate::feed::{Category, Fetcher, Item};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Cursor tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorConfig {
    /// Consecutive empty pages skipped by one `advance` before it gives up
    #[serde(default = "default_max_empty_pages")]
    pub max_empty_pages: u32,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            max_empty_pages: default_max_empty_pages(),
        }
    }
}

fn default_max_empty_pages() -> u32 {
    3
}

/// Read position over a lazily grown, append-only list of items of one
/// category.
///
/// State is only written once a fetch has returned, so dropping an
/// `advance` future part way through (cancellation) leaves the cursor
/// exactly as it was.
pub struct PaginatedCursor {
    category: Category,
    fetcher: Arc<dyn Fetcher>,
    config: CursorConfig,
    items: Vec<Item>,
    /// `None` until the first item is shown, then always `< items.len()`
    current_index: Option<usize>,
    /// Highest page successfully fetched
    last_fetched_page: Option<u32>,
}

impl PaginatedCursor {
    /// Create an empty cursor
    pub fn new(category: Category, fetcher: Arc<dyn Fetcher>) -> Self {
        Self::with_config(category, fetcher, CursorConfig::default())
    }

    /// Create an empty cursor with custom tuning
    pub fn with_config(category: Category, fetcher: Arc<dyn Fetcher>, config: CursorConfig) -> Self {
        Self {
            category,
            fetcher,
            config,
            items: Vec::new(),
            current_index: None,
            last_fetched_page: None,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn last_fetched_page(&self) -> Option<u32> {
        self.last_fetched_page
    }

    /// True iff there is an item before the current one
    pub fn can_go_back(&self) -> bool {
        self.current_index.is_some_and(|i| i > 0)
    }

    /// Item under the cursor, fetching the first page if nothing is cached
    pub async fn current(&mut self) -> Result<Item> {
        match self.current_index {
            Some(index) => Ok(self.items[index].clone()),
            None => self.advance().await,
        }
    }

    /// Move forward one item, fetching the next page when the cursor sits on
    /// the last cached item
    pub async fn advance(&mut self) -> Result<Item> {
        let next = self.current_index.map_or(0, |i| i + 1);
        if next < self.items.len() {
            debug!(category = %self.category, index = next, "Serving cached item");
            self.current_index = Some(next);
            return Ok(self.items[next].clone());
        }

        let (page, fetched) = self.fetch_next_page().await?;

        info!(
            category = %self.category,
            page,
            appended = fetched.len(),
            "Appended feed page"
        );
        self.items.extend(fetched);
        self.last_fetched_page = Some(page);
        self.current_index = Some(next);
        Ok(self.items[next].clone())
    }

    /// Move back one item. Never fetches.
    pub fn go_back(&mut self) -> Result<Item> {
        match self.current_index {
            Some(index) if index > 0 => {
                self.current_index = Some(index - 1);
                Ok(self.items[index - 1].clone())
            }
            _ => Err(Error::NoPreviousItem),
        }
    }

    /// Retry after a failure, or move forward when the last call succeeded
    pub async fn reload(&mut self) -> Result<Item> {
        self.advance().await
    }

    /// Fetch pages after `last_fetched_page` until one is non-empty.
    ///
    /// Returns the page number and its items without touching `self`.
    async fn fetch_next_page(&self) -> Result<(u32, Vec<Item>)> {
        let first_page = self.last_fetched_page.map_or(0, |p| p + 1);
        let mut page = first_page;
        let mut empty_pages = 0;

        loop {
            debug!(category = %self.category, page, "Fetching page");
            let records = self
                .fetcher
                .fetch(self.category, page)
                .await
                .map_err(|e| {
                    warn!(category = %self.category, page, error = %e, "Page fetch failed");
                    Error::fetch(self.category, page, e)
                })?;

            if !records.is_empty() {
                return Ok((page, records.into_iter().map(Item::from).collect()));
            }

            empty_pages += 1;
            warn!(category = %self.category, page, "Feed returned an empty page");
            if empty_pages > self.config.max_empty_pages {
                return Err(Error::EmptyFeed {
                    category: self.category,
                    first_page,
                    pages: empty_pages,
                });
            }
            page += 1;
        }
    }
}

impl std::fmt::Debug for PaginatedCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginatedCursor")
            .field("category", &self.category)
            .field("items", &self.items.len())
            .field("current_index", &self.current_index)
            .field("last_fetched_page", &self.last_fetched_page)
            .finish_non_exhaustive()
    }
}
