//! Subscriber setup for hosts that run the provider as its own process.
//!
//! Logs go to stderr, filtered by `RUST_LOG`. The core crate only emits
//! events, so nothing is printed until one of these is called. Set
//! `RUST_LOG=terratowns_core=debug` in the host's environment to see each
//! request and response status.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the stderr subscriber at `info` unless `RUST_LOG` says otherwise.
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
pub fn init_logging() {
    init_logging_with_default("info");
}

/// Like [`init_logging`] with a different fallback level.
pub fn init_logging_with_default(default_level: &str) {
    tracing_subscriber::registry()
        .with(env_filter(default_level))
        .with(stderr_layer())
        .init();
}

/// Returns false if a subscriber was already set.
pub fn try_init_logging() -> bool {
    tracing_subscriber::registry()
        .with(env_filter("info"))
        .with(stderr_layer())
        .try_init()
        .is_ok()
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

fn stderr_layer<S>() -> impl tracing_subscriber::Layer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_directives_parse() {
        assert!(EnvFilter::try_new("info").is_ok());
        assert!(EnvFilter::try_new("terratowns_core=debug").is_ok());
        assert!(EnvFilter::try_new("warn,terratowns_provider=trace").is_ok());
    }

    #[test]
    fn second_init_reports_false() {
        // Whichever call lands first wins; the other must not panic.
        let first = try_init_logging();
        let second = try_init_logging();
        assert!(!(first && second));
        assert!(!second);
    }
}
