//! Logging setup.
//!
//! Diagnostics go to stderr so they never mix with the token listing on
//! stdout. `RUST_LOG` overrides the level chosen with `-v`.

use std::io;
use tracing_subscriber::{EnvFilter, fmt};

fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    // A subscriber may already be installed when embedded; keep it.
    let _ = fmt()
        .compact()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .try_init();
}
