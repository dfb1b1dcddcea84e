pub mod client;
pub mod config;
pub mod dispatch;
pub mod message;
pub mod picker;

use tracing_subscriber::EnvFilter;

/// Log to stderr, filtered by `RUST_LOG`; stdout is reserved for results.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}
