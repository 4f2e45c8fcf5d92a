//! Rendering Surface Abstraction
//!
//! The playback scheduler decides *what* to show and *when* to move on; the
//! host owns the actual widgets. A [`MediaSurface`] is the host's rendering
//! collaborator: it displays an image, starts a video, or goes blank.
//!
//! The scheduler holds the surface only through a `Weak` reference and
//! upgrades it before every call, so a torn-down host is observed as an
//! absent surface rather than a dangling one. Video completion flows the
//! other way: the host signals it to the scheduler when its player finishes
//! (there is no wall-clock timer for videos).

use async_trait::async_trait;
use std::path::Path;

use crate::error::Result;

/// Host-owned rendering collaborator.
#[async_trait]
pub trait MediaSurface: Send + Sync {
    /// Display a still image from a local file.
    ///
    /// The image stays up until the next `show_image`/`start_video` call or
    /// until [`clear`](MediaSurface::clear).
    async fn show_image(&self, path: &Path) -> Result<()>;

    /// Begin playing a video from a local file.
    ///
    /// The host must report natural completion back to the scheduler via
    /// `PlaybackScheduler::video_finished`.
    async fn start_video(&self, path: &Path) -> Result<()>;

    /// Stop any active rendering and release the display.
    async fn clear(&self) -> Result<()>;
}
