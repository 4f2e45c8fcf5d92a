//! Playback configuration.
//!
//! The slide duration comes from the host as raw user input; a value that is
//! not a positive number of seconds silently falls back to the default. The
//! show must go on, so a typo in the duration field is never an error.

use std::time::Duration;
use tracing::debug;

/// Default seconds an image stays on screen.
pub const DEFAULT_SLIDE_SECS: u64 = 5;

/// Default delay between empty-inventory resync polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Settings consumed by the playback scheduler.
#[derive(Debug, Clone)]
pub struct PlaybackConfig {
    /// How long each image stays on screen. Videos ignore this and run to
    /// natural completion.
    pub slide_duration: Duration,

    /// Cadence of the retry poll while the inventory is empty.
    pub poll_interval: Duration,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            slide_duration: Duration::from_secs(DEFAULT_SLIDE_SECS),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl PlaybackConfig {
    /// Set the slide duration from raw host input.
    ///
    /// Anything that does not parse as a positive whole number of seconds
    /// keeps the default of [`DEFAULT_SLIDE_SECS`].
    pub fn with_slide_duration_input(mut self, input: &str) -> Self {
        self.slide_duration = parse_slide_duration(input);
        self
    }

    pub fn with_slide_duration(mut self, duration: Duration) -> Self {
        self.slide_duration = duration;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

/// Parse a per-slide duration in seconds from user input.
///
/// Non-positive and unparsable values fall back to the default.
fn parse_slide_duration(input: &str) -> Duration {
    match input.trim().parse::<i64>() {
        Ok(secs) if secs > 0 => Duration::from_secs(secs as u64),
        _ => {
            debug!(input, "invalid slide duration input, using default");
            Duration::from_secs(DEFAULT_SLIDE_SECS)
        }
    }
}
