//! Logging setup for binaries that embed the paginator.

/// Initializes the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `level` applies to the paginator crates.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("helios_paginator={level},paginate={level}")));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
