//! Logging setup for hosts embedding the engine.
//!
//! The engine only emits `tracing` events; installing a subscriber is left to the
//! host. [`init`] is a convenience for hosts that have no subscriber of their own.

use tracing_subscriber::EnvFilter;

/// Install a `fmt` subscriber filtered by `RUST_LOG` (default `info`).
///
/// Returns `false` when a global subscriber was already installed.
pub fn init() -> bool {
    init_with_default("info")
}

/// Like [`init`], with `default_directive` used when `RUST_LOG` is unset or invalid.
pub fn init_with_default(default_directive: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
