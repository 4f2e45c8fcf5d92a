//! Error types for the HTTP catalog provider

use thiserror::Error;

/// Catalog provider errors
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The changes request returned a non-success status
    #[error("Catalog request failed with status {status}")]
    FetchStatus { status: u16 },

    /// The changes payload was missing a required field or not valid JSON
    #[error("Catalog response malformed: {0}")]
    MalformedChanges(String),

    /// The catalog service could not be reached
    #[error("Catalog unreachable: {0}")]
    Network(String),

    /// A single file download failed; other files are unaffected
    #[error("Transfer failed for {name}: {reason}")]
    Transfer { name: String, reason: String },
}

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

impl From<CatalogError> for bridge_traits::error::BridgeError {
    fn from(error: CatalogError) -> Self {
        bridge_traits::error::BridgeError::OperationFailed(error.to_string())
    }
}
