//! # Core Runtime
//!
//! Ambient infrastructure shared by every crate in the viewer core:
//!
//! - **Logging** (`logging`): `tracing-subscriber` bootstrap with env-filter
//!   and selectable output format
//! - **Configuration** (`config`): host-supplied settings with fail-fast
//!   validation
//! - **Events** (`events`): typed broadcast bus connecting the sync engine
//!   and playback scheduler to the host

pub mod config;
pub mod error;
pub mod events;
pub mod logging;

pub use config::CoreConfig;
pub use error::{Error, Result};
pub use events::{CoreEvent, EventBus, PlaybackEvent, SyncEvent};
pub use logging::{init_logging, LogFormat, LoggingConfig};
