//! Request pacing for the feed host
//!
//! Holding the forward button issues page requests back to back. One
//! governor bucket per client keeps them within the configured quota.

use crate::config::RateLimitConfig;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;

type DirectLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Token bucket shared by every request of one [`super::HttpClient`]
pub(crate) struct RequestPacer {
    bucket: DirectLimiter,
}

impl RequestPacer {
    /// Zero rate or burst is treated as one
    pub(crate) fn new(limit: &RateLimitConfig) -> Self {
        let clamp = |n| NonZeroU32::new(n).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::per_second(clamp(limit.requests_per_second))
            .allow_burst(clamp(limit.burst_size));
        Self {
            bucket: RateLimiter::direct(quota),
        }
    }

    /// Wait for a token
    pub(crate) async fn ready(&self) {
        self.bucket.until_ready().await;
    }

    #[cfg(test)]
    fn try_ready(&self) -> bool {
        self.bucket.check().is_ok()
    }
}

impl std::fmt::Debug for RequestPacer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestPacer").finish_non_exhaustive()
    }
}
