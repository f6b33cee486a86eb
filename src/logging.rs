//! Tracing setup for embedders

use crate::types::LogLevel;
use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber honouring `RUST_LOG`, with `level` as the
/// default directive.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_tracing(level: LogLevel) -> bool {
    let level: tracing::Level = level.into();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_is_idempotent() {
        init_tracing(LogLevel::Debug);
        assert!(!init_tracing(LogLevel::Info));
    }
}
