//! Tracing setup shared by `build-sitemap` and `build-state-json`.
//!
//! Two output channels, kept apart:
//!
//! - **Tracing (this module)**: `debug!`/`info!` events from dataset loading,
//!   shard writes and sitemap rendering. Filtered by `RUST_LOG`, stderr only.
//! - **Operator output**: the `sitemap:`/`split:`/`summary:` report lines on
//!   stdout and the per-record `warning: invalid region ...` lines on stderr.
//!   Printed by the binaries on every run regardless of `RUST_LOG`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the stderr subscriber. Quiet (`warn`) unless `RUST_LOG` says otherwise.
///
/// ```bash
/// RUST_LOG=sitebuild=debug build-state-json --root ./site
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact().with_target(false))
        .init();
}
