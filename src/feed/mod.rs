//! Feed module
//!
//! Domain types for a paginated feed and the [`Fetcher`] seam the cursor
//! pulls pages through.
//!
//! # Overview
//!
//! - [`Category`] - the fixed set of feed partitions, each with its own backend path
//! - [`Item`] - an immutable entry shown to the user
//! - [`RawRecord`] / [`FeedPage`] - the wire format; missing fields map to empty strings
//! - [`HttpFetcher`] - the production fetcher on top of [`crate::http::HttpClient`]

mod fetcher;
mod types;

pub use fetcher::{Fetcher, HttpFetcher};
pub use types::{Category, FeedPage, Item, RawRecord};

#[cfg(test)]
pub(crate) mod testing;
