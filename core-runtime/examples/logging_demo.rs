//! Logging system demonstration
//!
//! Shows the logging bootstrap in its different output formats.
//!
//! Run with:
//! ```bash
//! # Pretty format (default in debug builds)
//! cargo run --example logging_demo --package core-runtime
//!
//! # JSON format
//! cargo run --example logging_demo --package core-runtime -- json
//!
//! # Compact format with a custom filter
//! cargo run --example logging_demo --package core-runtime -- compact "core_sync=debug"
//! ```

use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};
use std::env;
use tracing::{debug, info, instrument, warn};

#[tokio::main]
async fn main() {
    let args: Vec<String> = env::args().collect();

    let format = match args.get(1).map(String::as_str) {
        Some("json") => LogFormat::Json,
        Some("compact") => LogFormat::Compact,
        _ => LogFormat::Pretty,
    };

    let mut config = LoggingConfig::default().with_format(format);
    if let Some(directive) = args.get(2) {
        config = config.with_default_directive(directive.clone());
    }

    init_logging(config).expect("failed to initialize logging");

    info!(format = ?format, "logging initialized");

    demo_sync_cycle().await;
    demo_playback_events();

    info!("demo complete");
}

/// The field style the sync engine uses for its per-cycle summary.
#[instrument]
async fn demo_sync_cycle() {
    info!("sync cycle started");

    debug!(name = "a.jpg", bytes = 48_211, "downloaded");
    warn!(
        name = "b.mp4",
        error = "status 500",
        "download failed, continuing with remaining files"
    );
    debug!(name = "c.jpg", "removed");

    info!(downloaded = 1, deleted = 1, failed = 1, "sync cycle finished");
}

fn demo_playback_events() {
    info!(items = 3, "starting playback");
    info!(name = "a.jpg", index = 0, "showing media item");
    info!("playback stopped");
}
