//! Structured log output.
//!
//! Installs a `tracing` subscriber that prints MatchForge events
//! (`scorer_registered`, `engine_ready`, `parallel_batch`, ...) with their
//! fields. `RUST_LOG` overrides the default filter.

use std::sync::OnceLock;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: OnceLock<()> = OnceLock::new();

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str =
    "matchforge=info,matchforge_scoring=info,matchforge_config=info";

/// Initializes console logging.
///
/// Safe to call multiple times - only the first call has effect. If the host
/// already installed a global subscriber, that one is kept.
pub fn init() {
    INIT.get_or_init(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
        assert!(INIT.get().is_some());
    }

    #[test]
    fn test_default_filter_parses() {
        assert!(DEFAULT_FILTER
            .split(',')
            .all(|d| d.parse::<tracing_subscriber::filter::Directive>().is_ok()));
    }
}
