//! HTTP catalog client implementation
//!
//! Implements the `CatalogSource` trait against the catalog wire protocol:
//! `GET /changes` for the change descriptor and `GET /file?filename=` for
//! individual file bodies.

use async_trait::async_trait;
use bridge_traits::catalog::{CatalogSource, ChangeSet};
use bridge_traits::error::Result;
use futures_util::TryStreamExt;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::error::CatalogError;
use crate::types::ChangesPayload;

/// Default timeout for each catalog request.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Reqwest-based catalog client
///
/// Provides the two remote capabilities the sync engine needs:
///
/// - Fetching the change descriptor, decoded into a strongly-typed
///   [`ChangeSet`] with required-field validation at the boundary
/// - Streaming file downloads, bounded by the I/O buffer rather than the
///   file size
///
/// # Example
///
/// ```no_run
/// use provider_catalog::HttpCatalog;
/// use bridge_traits::catalog::CatalogSource;
///
/// # async fn example() -> bridge_traits::error::Result<()> {
/// let catalog = HttpCatalog::new("http://192.168.0.10:5000");
/// let changes = catalog.fetch_changes().await?;
/// # Ok(())
/// # }
/// ```
pub struct HttpCatalog {
    client: Client,
    base_url: String,
}

impl HttpCatalog {
    /// Create a client with the default request timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent("media-viewer-core/0.1.0")
            .build()
            .expect("Failed to build HTTP client");

        Self::with_client(client, base_url)
    }

    /// Create a client from a pre-configured reqwest `Client`.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn changes_url(&self) -> String {
        format!("{}/changes", self.base_url)
    }

    fn file_url(&self, name: &str) -> String {
        format!(
            "{}/file?filename={}",
            self.base_url,
            urlencoding::encode(name)
        )
    }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    #[instrument(skip(self))]
    async fn fetch_changes(&self) -> Result<ChangeSet> {
        let url = self.changes_url();
        debug!(url = %url, "fetching change descriptor");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "changes request failed");
            return Err(CatalogError::FetchStatus {
                status: status.as_u16(),
            }
            .into());
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let payload: ChangesPayload = serde_json::from_slice(&body)
            .map_err(|e| CatalogError::MalformedChanges(e.to_string()))?;

        let changes: ChangeSet = payload.into();
        debug!(
            changed = changes.changed.len(),
            deleted = changes.deleted.len(),
            "change descriptor fetched"
        );
        Ok(changes)
    }

    #[instrument(skip(self), fields(name = %name))]
    async fn open_file(&self, name: &str) -> Result<Box<dyn tokio::io::AsyncRead + Send + Unpin>> {
        let url = self.file_url(name);
        debug!(url = %url, "opening file download");

        let response = self.client.get(&url).send().await.map_err(|e| {
            CatalogError::Transfer {
                name: name.to_string(),
                reason: e.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), name, "file request failed");
            return Err(CatalogError::Transfer {
                name: name.to_string(),
                reason: format!("status {}", status.as_u16()),
            }
            .into());
        }

        let stream = response.bytes_stream().map_err(std::io::Error::other);
        let reader = tokio_util::io::StreamReader::new(stream);

        Ok(Box::new(reader))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn changes_url_strips_trailing_slash() {
        let catalog = HttpCatalog::new("http://localhost:5000/");
        assert_eq!(catalog.changes_url(), "http://localhost:5000/changes");
    }

    #[test]
    fn file_url_percent_encodes_name() {
        let catalog = HttpCatalog::new("http://localhost:5000");
        assert_eq!(
            catalog.file_url("my photo #1.jpg"),
            "http://localhost:5000/file?filename=my%20photo%20%231.jpg"
        );
    }

    #[test]
    fn file_url_passes_plain_names_through() {
        let catalog = HttpCatalog::new("http://localhost:5000");
        assert_eq!(
            catalog.file_url("clip.mp4"),
            "http://localhost:5000/file?filename=clip.mp4"
        );
    }
}
