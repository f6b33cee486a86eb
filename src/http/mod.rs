//! HTTP transport under [`crate::feed::HttpFetcher`]
//!
//! One GET-JSON path with retries on transient failures, configurable
//! backoff and optional request pacing.

mod client;
mod rate_limit;

pub use client::HttpClient;
