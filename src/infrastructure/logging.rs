//! Tracing subscriber setup driven by [`LoggingConfig`].
//!
//! `RUST_LOG` always wins; the configured level is the default filter
//! when it is unset. Output goes to stderr so command output on
//! stdout stays machine-readable.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::domain::models::LoggingConfig;

/// Install the global subscriber.
pub fn init(logging: &LoggingConfig) {
    let filter = build_filter(std::env::var("RUST_LOG").ok().as_deref(), &logging.level);
    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// `RUST_LOG` directives when present and non-empty, otherwise the
/// configured level.
fn build_filter(env_directives: Option<&str>, level: &str) -> EnvFilter {
    match env_directives {
        Some(directives) if !directives.is_empty() => EnvFilter::new(directives),
        _ => EnvFilter::new(level),
    }
}
