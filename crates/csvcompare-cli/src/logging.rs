//! Logging setup using `tracing-subscriber`.
//!
//! Logs go to stderr so reports on stdout stay machine-readable. Without
//! `-v`, `RUST_LOG` is honored and the default level is `warn`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter directive for a `-v` count.
pub fn directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber.
pub fn init(verbosity: u8) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = if verbosity == 0 {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive(0)))
    } else {
        EnvFilter::new(directive(verbosity))
    };

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry().with(filter).with(layer).try_init()
}
