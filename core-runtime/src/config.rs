//! # Core Configuration Module
//!
//! Host-supplied settings for the viewer core.
//!
//! ## Overview
//!
//! [`CoreConfig`] carries everything the host decides and the core consumes:
//! the remote catalog address, the managed media directory, the bounded
//! network timeout, and the empty-inventory poll cadence. Values are set
//! through builder-style `with_*` methods and checked by
//! [`validate`](CoreConfig::validate) before the core is wired up.
//!
//! ## Usage
//!
//! ```
//! use core_runtime::config::CoreConfig;
//! use std::time::Duration;
//!
//! let config = CoreConfig::new("http://192.168.0.10:5000", "/var/lib/viewer/media")
//!     .with_request_timeout(Duration::from_secs(10));
//!
//! config.validate().expect("invalid configuration");
//! ```

use crate::error::{Error, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Default timeout applied to each catalog request.
///
/// The wire protocol itself imposes none; an unreachable peer would
/// otherwise hang a sync cycle indefinitely.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default delay between empty-inventory resync polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Core configuration for the media viewer.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Base address of the remote catalog service, scheme included.
    pub base_url: String,

    /// Managed media directory (a single flat directory, no subdirectories).
    pub media_root: PathBuf,

    /// Timeout for each catalog and file request.
    pub request_timeout: Duration,

    /// Cadence of the empty-inventory retry poll.
    pub poll_interval: Duration,
}

impl CoreConfig {
    /// Create a configuration with default timeout and poll cadence.
    pub fn new(base_url: impl Into<String>, media_root: impl Into<PathBuf>) -> Self {
        Self {
            base_url: base_url.into(),
            media_root: media_root.into(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Fail fast on settings the core cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(Error::Config("base_url must not be empty".to_string()));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(Error::Config(format!(
                "base_url must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        if self.media_root.as_os_str().is_empty() {
            return Err(Error::Config("media_root must not be empty".to_string()));
        }
        if self.poll_interval.is_zero() {
            return Err(Error::Config("poll_interval must be positive".to_string()));
        }
        Ok(())
    }
}
