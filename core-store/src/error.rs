use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid media file name: {name}")]
    InvalidName { name: String },

    #[error("Failed to create media root {path}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to list media root {path}")]
    List {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write media file {name}")]
    Write {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to delete media file {name}")]
    Delete {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, StoreError>;
