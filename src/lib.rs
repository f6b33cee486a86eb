// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # feed-cursor
//!
//! Sequential forward/backward navigation over paginated remote feeds,
//! backed by a lazily grown in-memory cache.
//!
//! ## Features
//!
//! - **Lazy Paging**: pages are fetched only when forward navigation runs past the cache
//! - **Free Backtracking**: going back never touches the network
//! - **Failure Safety**: a failed or cancelled fetch leaves the cursor untouched; retrying asks for the same page
//! - **Single Flight**: a new navigation supersedes the one in flight
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use feed_cursor::{Category, FeedConfig, FeedRegistry, HttpFetcher, Navigator};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> feed_cursor::Result<()> {
//!     let config = FeedConfig::from_file("feed.yaml")?;
//!     feed_cursor::logging::init_tracing(config.log_level);
//!
//!     let fetcher = Arc::new(HttpFetcher::from_config(&config)?);
//!     let registry = FeedRegistry::new(fetcher, config.cursor);
//!     let mut navigator = Navigator::new(registry, config.default_category);
//!
//!     navigator.show_current();
//!     navigator.settle().await;
//!     println!("{:?}", navigator.view());
//!
//!     navigator.forward();
//!     navigator.select(Category::Top);
//!     navigator.settle().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │  Navigator   select() forward() back() reload() → ViewState│
//! └──────────────────────────────┬────────────────────────────┘
//!                                │ single flight
//! ┌──────────────────────────────┴────────────────────────────┐
//! │  FeedRegistry      Latest │ Hot │ Top → PaginatedCursor    │
//! └──────────────────────────────┬────────────────────────────┘
//!                                │ Fetcher
//! ┌──────────────────────────────┴────────────────────────────┐
//! │  HttpFetcher  →  HttpClient (retry, backoff, rate limit)   │
//! └───────────────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types
pub mod types;

/// Session configuration
pub mod config;

/// Tracing setup
pub mod logging;

/// HTTP client with retry and rate limiting
pub mod http;

/// Feed items, categories and fetchers
pub mod feed;

/// Paginated cursor
pub mod cursor;

/// Category registry and single-flight navigation
pub mod session;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::FeedConfig;
pub use cursor::{CursorConfig, PaginatedCursor};
pub use error::{Error, Result};
pub use feed::{Category, Fetcher, HttpFetcher, Item};
pub use session::{FeedRegistry, Navigator, ViewState};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
