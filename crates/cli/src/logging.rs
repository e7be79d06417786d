//! Diagnostic tracing for the validator.
//!
//! Output goes to stderr so it never interleaves with the report on stdout.
//! Verbosity comes from `RUST_LOG`; defaults to `warn` if unset.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global stderr subscriber. Call once, before any logging.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
