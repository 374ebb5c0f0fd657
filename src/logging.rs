//! Logging configuration using tracing.

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the logging subsystem.
///
/// Log level is controlled by the `PARLO_LOG` environment variable and
/// defaults to `info` for this crate. Output goes to stderr so the host
/// platform's console captures it. Safe to call more than once; later calls
/// are no-ops.
pub fn init() {
    let env_filter =
        EnvFilter::try_from_env("PARLO_LOG").unwrap_or_else(|_| EnvFilter::new("parlo=info,warn"));

    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}
