pub mod config;
pub mod error;
pub mod hashing;
pub mod model;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter applied when neither `RUST_LOG` nor the configured level parses.
const FALLBACK_FILTER: &str = "info";

/// Install the global subscriber. `RUST_LOG` wins over `default_level` when set.
pub fn init_tracing(default_level: &str, json: bool) {
    let (filter_layer, fell_back) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, false),
        Err(_) => level_filter(default_level),
    };

    let registry = tracing_subscriber::registry().with(filter_layer);

    // Reports go to stdout; logs stay on stderr.
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    if fell_back {
        tracing::warn!(
            filter = default_level,
            fallback = FALLBACK_FILTER,
            "invalid log filter, using fallback"
        );
    }
}

/// Parse `level`; on failure return the fallback filter and `true`.
fn level_filter(level: &str) -> (EnvFilter, bool) {
    match EnvFilter::try_new(level) {
        Ok(filter) => (filter, false),
        Err(_) => (EnvFilter::new(FALLBACK_FILTER), true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn valid_level_is_used_as_is() {
        let (filter, fell_back) = level_filter("debug,shopgraph_storage=trace");
        assert!(!fell_back);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
    }

    #[test]
    fn invalid_level_reports_fallback() {
        let (filter, fell_back) = level_filter("shopgraph_storage=loud");
        assert!(fell_back);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
    }
}
