//! Tracing initialization shared by the CLI binary.

use tracing_subscriber::EnvFilter;

/// Install a `tracing-subscriber` formatter honoring `RUST_LOG`, defaulting
/// to `wiregen=info,warn` when unset. Call once, from `main`.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wiregen=info,warn"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
