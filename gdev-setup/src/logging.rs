//! Diagnostic tracing for setup runs.
//!
//! Progress events are the product output and go to stdout through `render`.
//! Tracing is diagnostics only: stderr, never persisted, and silent at the
//! default level unless a step is exhausted or a command times out.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter directive for a `-v` count when `RUST_LOG` is unset.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "gdev_setup=info,warn",
        _ => "gdev_setup=debug,warn",
    }
}

/// Install the stderr subscriber. `RUST_LOG` wins over `verbosity`.
///
/// ```bash
/// RUST_LOG=gdev_setup=debug gdev-setup --work-dir ~/src/app
/// ```
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
