//! Diagnostic tracing
//!
//! Written to stderr so it never mixes with rendered stacks on stdout.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter for a `-v` count, used when `RUST_LOG` is unset
fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "stackline=info",
        _ => "stackline=debug",
    }
}

/// Initialize the tracing subscriber
///
/// `RUST_LOG` takes precedence over `verbosity`.
///
/// # Example
/// ```bash
/// RUST_LOG=stackline=trace stackline show
/// ```
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
