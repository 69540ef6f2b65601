//! Telemetry logic.
//! Logs go to stderr, so that stdout only carries URLs.

use tracing_subscriber::EnvFilter;

const FALLBACK_LEVEL: &str = "info";

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// `RUST_LOG` wins over the configured level.
fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|err| {
            eprintln!("invalid log level {level:?}: {err}");
            EnvFilter::new(FALLBACK_LEVEL)
        })
}

/// Install the global `tracing` subscriber.
pub fn setup_logging(level: &str) -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(filter(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
}
