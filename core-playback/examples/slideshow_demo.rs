//! # Slideshow Demo
//!
//! Wires the full viewer core together against a live catalog service: HTTP
//! catalog client, media store, sync orchestrator and playback scheduler,
//! with a console-printing stand-in for the rendering surface.
//!
//! Run with a catalog service listening on the base address:
//! ```bash
//! cargo run --example slideshow_demo --package core-playback -- http://127.0.0.1:5000
//! ```

use async_trait::async_trait;
use bridge_traits::error::Result;
use bridge_traits::surface::MediaSurface;
use core_playback::{PlaybackConfig, PlaybackScheduler};
use core_runtime::events::EventBus;
use core_runtime::logging::{init_logging, LoggingConfig};
use core_runtime::CoreConfig;
use core_store::MediaStore;
use core_sync::SyncOrchestrator;
use provider_catalog::HttpCatalog;
use std::path::Path;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tracing::info;

/// Rendering surface that narrates to stdout instead of drawing.
struct ConsoleSurface;

#[async_trait]
impl MediaSurface for ConsoleSurface {
    async fn show_image(&self, path: &Path) -> Result<()> {
        println!(">> showing image {}", path.display());
        Ok(())
    }

    async fn start_video(&self, path: &Path) -> Result<()> {
        println!(">> playing video {}", path.display());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        println!(">> screen cleared");
        Ok(())
    }
}

#[tokio::main]
async fn main() {
    init_logging(LoggingConfig::default()).expect("failed to initialize logging");

    let base_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://127.0.0.1:5000".to_string());
    let media_root = std::env::temp_dir().join("slideshow-demo-media");

    let config = CoreConfig::new(&base_url, &media_root);
    config.validate().expect("invalid configuration");
    info!(base_url = %config.base_url, root = %media_root.display(), "demo starting");

    let catalog = Arc::new(HttpCatalog::with_timeout(
        config.base_url.as_str(),
        config.request_timeout,
    ));
    let store = MediaStore::new(&config.media_root);
    let event_bus = Arc::new(EventBus::default());
    let sync = Arc::new(SyncOrchestrator::new(
        catalog,
        store.clone(),
        event_bus.clone(),
    ));

    let surface: Arc<dyn MediaSurface> = Arc::new(ConsoleSurface);
    let weak_surface: Weak<dyn MediaSurface> = Arc::downgrade(&surface);
    let scheduler = PlaybackScheduler::new(
        weak_surface,
        sync,
        store,
        event_bus.clone(),
        PlaybackConfig::default()
            .with_slide_duration_input("3")
            .with_poll_interval(config.poll_interval),
    );

    // Narrate core events the way a host application would surface them.
    let mut events = event_bus.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            println!("event: {event}");
        }
    });

    // Sync once, then play whatever arrived (or poll if nothing did).
    scheduler.resync_and_start().await;

    tokio::time::sleep(Duration::from_secs(30)).await;

    scheduler.stop().await;
    info!("demo finished");
}
