//! Internal tracing for the action binary.
//!
//! Stdout belongs to the runner's workflow command protocol, so tracing
//! always writes to stderr. `RUST_LOG` selects the filter; without it the
//! level is `warn`, or `debug` when the runner has step debugging enabled.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
