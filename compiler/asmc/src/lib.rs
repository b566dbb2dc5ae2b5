//! Driver for the assembler input layer.
//!
//! The `asmc` binary is a thin shell over [`commands`]; the library half
//! exists so the commands can be run against in-memory writers in tests.

pub mod commands;
pub mod options;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a tracing subscriber, once, when `RUST_LOG` is set.
///
/// ```bash
/// RUST_LOG=asm_input=debug asmc cat foo.s
/// ```
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
