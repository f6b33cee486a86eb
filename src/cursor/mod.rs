//! Cursor module
//!
//! Sequential forward/backward navigation over a lazily fetched cache.
//!
//! # Overview
//!
//! A [`PaginatedCursor`] is either empty (nothing shown yet) or positioned on
//! a cached item. Moving forward past the last cached item fetches the next
//! page; moving back is always served from the cache.
//!
//! - A failed or cancelled fetch leaves the cursor untouched, so retrying
//!   requests the same page again.
//! - An empty page is skipped and the following page is requested, up to
//!   [`CursorConfig::max_empty_pages`] in a row.

mod paginated;

pub use paginated::{CursorConfig, PaginatedCursor};
