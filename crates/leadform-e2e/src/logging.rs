//! Logging for scenario runs.
//!
//! Scenarios log through `tracing`. Call [`init_test_logging`] at the top of a
//! test (fixtures already do) and raise verbosity with `RUST_LOG`:
//!
//! ```text
//! RUST_LOG=leadform_browser=debug cargo test -p leadform-e2e -- --ignored
//! ```

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "leadform_browser=info,leadform_e2e=info";

/// Installs the global subscriber if none is installed yet.
///
/// Output goes through the test writer so `cargo test` captures it per test.
/// Safe to call from every test; only the first call takes effect.
pub fn init_test_logging() {
    let _ = init_with_filter(default_filter());
}

/// Installs the global subscriber with an explicit filter.
///
/// # Errors
///
/// Returns an error if a global subscriber is already set.
pub fn init_with_filter(
    filter: EnvFilter,
) -> Result<(), tracing_subscriber::util::TryInitError> {
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_test_writer()
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
}

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_initialization_is_harmless() {
        init_test_logging();
        init_test_logging();
        assert!(init_with_filter(EnvFilter::new("off")).is_err());
    }

    #[test]
    fn default_filter_parses() {
        let _filter = EnvFilter::try_new(DEFAULT_FILTER).unwrap();
    }
}
