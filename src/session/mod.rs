//! Session module
//!
//! Glue between the per-category cursors and a presentation layer.
//!
//! - [`FeedRegistry`] - category to cursor table, one independent cursor each
//! - [`Navigator`] - at most one navigation in flight; a new request
//!   supersedes the previous one and results are published as [`ViewState`]

mod navigator;
mod registry;

pub use navigator::{Navigator, ViewState};
pub use registry::{FeedRegistry, SharedCursor};

#[cfg(test)]
mod tests;
