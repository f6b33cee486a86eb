//! Category to cursor table

use crate::cursor::{CursorConfig, PaginatedCursor};
use crate::feed::{Category, Fetcher};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared handle to one category's cursor
pub type SharedCursor = Arc<Mutex<PaginatedCursor>>;

/// One independent cursor per category, all pulling from the same fetcher
#[derive(Debug, Clone)]
pub struct FeedRegistry {
    cursors: HashMap<Category, SharedCursor>,
}

impl FeedRegistry {
    /// Create a cursor for every category
    pub fn new(fetcher: Arc<dyn Fetcher>, config: CursorConfig) -> Self {
        let cursors = Category::ALL
            .into_iter()
            .map(|category| {
                let cursor = PaginatedCursor::with_config(category, fetcher.clone(), config);
                (category, Arc::new(Mutex::new(cursor)))
            })
            .collect();

        Self { cursors }
    }

    /// Cursor of `category`
    pub fn cursor(&self, category: Category) -> SharedCursor {
        // every category is inserted in `new`
        self.cursors[&category].clone()
    }

    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.cursors.keys().copied()
    }
}
