//! Logging configuration using tracing
//!
//! Logs go to stderr so that JSON printed on stdout stays machine-readable.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter for a given `-v` count
///
/// 0 → warn, 1 → info, 2 or more → debug.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Initialize the tracing subscriber
///
/// `RUST_LOG` wins when set (e.g. `RUST_LOG=devdash=debug`); otherwise the
/// level follows `verbosity`.
///
/// # Errors
/// Returns an error if a global subscriber is already installed
pub fn init(verbosity: u8) -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .try_init()
}
