//! Diagnostic logging setup.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static TRACING_INIT: Once = Once::new();

/// Installs the stderr diagnostics subscriber.
///
/// Defaults to `warn`; override with `RUST_LOG`, e.g.
/// `RUST_LOG=scripted_test_runner=debug`. Safe to call multiple times.
pub fn init() {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_level(true),
            )
            .with(filter)
            .init();
    });
}
