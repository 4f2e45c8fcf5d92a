//! Managed media directory.
//!
//! The store owns a single flat directory. Downloads are streamed into a
//! `.part` staging file and renamed into place, so a partially written file
//! is never observable under its final name; listings skip staging files and
//! anything that is not a plain file.

use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncRead, AsyncWriteExt};
use tracing::{debug, warn};

use crate::error::{Result, StoreError};
use crate::media::{MediaItem, MediaKind};

/// Suffix of in-progress download staging files.
const STAGING_SUFFIX: &str = ".part";

/// Flat-directory media store.
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the media root if it does not exist yet. Idempotent.
    pub async fn ensure_root(&self) -> Result<()> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|source| StoreError::Directory {
                path: self.root.clone(),
                source,
            })?;
        Ok(())
    }

    /// Enumerate the current inventory.
    ///
    /// Immediate children only; subdirectories, hidden entries and `.part`
    /// staging files are skipped. A missing root yields an empty inventory.
    /// The result is sorted by file name so playback order is stable across
    /// runs.
    pub async fn list(&self) -> Result<Vec<MediaItem>> {
        let mut read_dir = match fs::read_dir(&self.root).await {
            Ok(rd) => rd,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(root = %self.root.display(), "media root missing, inventory empty");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StoreError::List {
                    path: self.root.clone(),
                    source,
                })
            }
        };

        let mut items = Vec::new();
        while let Some(entry) = read_dir.next_entry().await.map_err(|source| StoreError::List {
            path: self.root.clone(),
            source,
        })? {
            let file_type = entry.file_type().await.map_err(|source| StoreError::List {
                path: self.root.clone(),
                source,
            })?;
            if !file_type.is_file() {
                continue;
            }

            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    warn!(name = ?raw, "skipping non-UTF-8 media file name");
                    continue;
                }
            };
            if name.starts_with('.') || name.ends_with(STAGING_SUFFIX) {
                continue;
            }

            let kind = MediaKind::from_name(&name);
            items.push(MediaItem {
                path: entry.path(),
                name,
                kind,
            });
        }

        items.sort_by(|a, b| a.name.cmp(&b.name));
        debug!(root = %self.root.display(), count = items.len(), "listed media inventory");
        Ok(items)
    }

    /// Stream `reader` into `name`, atomically from the reader's perspective.
    ///
    /// Bytes are copied into a staging file and renamed over the final name
    /// only once the stream is exhausted. Returns the number of bytes
    /// written.
    pub async fn write(
        &self,
        name: &str,
        mut reader: Box<dyn AsyncRead + Send + Unpin>,
    ) -> Result<u64> {
        let final_path = self.entry_path(name)?;
        let staging_path = self.root.join(format!("{name}{STAGING_SUFFIX}"));

        let map_write = |source: std::io::Error| StoreError::Write {
            name: name.to_string(),
            source,
        };

        let mut file = fs::File::create(&staging_path).await.map_err(map_write)?;

        let copied = match tokio::io::copy(&mut reader, &mut file).await {
            Ok(n) => n,
            Err(source) => {
                drop(file);
                let _ = fs::remove_file(&staging_path).await;
                return Err(map_write(source));
            }
        };

        if let Err(source) = file.flush().await {
            drop(file);
            let _ = fs::remove_file(&staging_path).await;
            return Err(map_write(source));
        }
        drop(file);

        if let Err(source) = fs::rename(&staging_path, &final_path).await {
            let _ = fs::remove_file(&staging_path).await;
            return Err(map_write(source));
        }

        debug!(name, bytes = copied, "wrote media file");
        Ok(copied)
    }

    /// Remove `name` if present. Deleting an absent file is a successful
    /// no-op: the caller wants the file gone, and it is.
    pub async fn delete(&self, name: &str) -> Result<()> {
        let path = self.entry_path(name)?;

        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(name, "deleted media file");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(name, "delete target already absent");
                Ok(())
            }
            Err(source) => Err(StoreError::Delete {
                name: name.to_string(),
                source,
            }),
        }
    }

    /// Resolve `name` inside the root, rejecting anything that is not a
    /// plain leaf name. Names arrive from the wire and are joined onto the
    /// root path, so separators and parent components are refused outright.
    fn entry_path(&self, name: &str) -> Result<PathBuf> {
        let invalid = name.is_empty()
            || name == "."
            || name == ".."
            || name.contains('/')
            || name.contains('\\')
            || name.ends_with(STAGING_SUFFIX);

        if invalid {
            return Err(StoreError::InvalidName {
                name: name.to_string(),
            });
        }
        Ok(self.root.join(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::pin::Pin;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::task::{Context, Poll};

    static DIR_SEQ: AtomicU32 = AtomicU32::new(0);

    fn temp_store() -> MediaStore {
        let dir = std::env::temp_dir().join(format!(
            "media-store-test-{}-{}",
            std::process::id(),
            DIR_SEQ.fetch_add(1, Ordering::Relaxed)
        ));
        MediaStore::new(dir)
    }

    fn reader(data: &'static [u8]) -> Box<dyn AsyncRead + Send + Unpin> {
        Box::new(data)
    }

    /// Yields a few bytes, then fails, to simulate a dropped connection.
    struct FailingReader {
        fed: bool,
    }

    impl AsyncRead for FailingReader {
        fn poll_read(
            mut self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &mut tokio::io::ReadBuf<'_>,
        ) -> Poll<std::io::Result<()>> {
            if !self.fed {
                self.fed = true;
                buf.put_slice(b"partial");
                Poll::Ready(Ok(()))
            } else {
                Poll::Ready(Err(std::io::Error::other("connection reset")))
            }
        }
    }

    #[tokio::test]
    async fn write_list_delete_round_trip() {
        let store = temp_store();
        store.ensure_root().await.unwrap();

        store.write("b.jpg", reader(b"jpeg-bytes")).await.unwrap();
        store.write("a.mp4", reader(b"mp4-bytes")).await.unwrap();

        let items = store.list().await.unwrap();
        assert_eq!(items.len(), 2);
        // Sorted by name
        assert_eq!(items[0].name, "a.mp4");
        assert_eq!(items[0].kind, MediaKind::Video);
        assert_eq!(items[1].name, "b.jpg");
        assert_eq!(items[1].kind, MediaKind::Image);

        store.delete("a.mp4").await.unwrap();
        let items = store.list().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "b.jpg");

        fs::remove_dir_all(store.root()).await.unwrap();
    }

    #[tokio::test]
    async fn delete_is_convergent() {
        let store = temp_store();
        store.ensure_root().await.unwrap();

        // Never written, deleted twice: both succeed.
        store.delete("missing.jpg").await.unwrap();
        store.delete("missing.jpg").await.unwrap();

        fs::remove_dir_all(store.root()).await.unwrap();
    }

    #[tokio::test]
    async fn missing_root_lists_empty() {
        let store = temp_store();
        let items = store.list().await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn failed_write_leaves_no_visible_file() {
        let store = temp_store();
        store.ensure_root().await.unwrap();

        let result = store
            .write("movie.mp4", Box::new(FailingReader { fed: false }))
            .await;
        assert!(matches!(result, Err(StoreError::Write { .. })));

        let items = store.list().await.unwrap();
        assert!(items.is_empty());
        assert!(!store.root().join("movie.mp4").exists());

        fs::remove_dir_all(store.root()).await.unwrap();
    }

    #[tokio::test]
    async fn staging_files_and_directories_are_not_listed() {
        let store = temp_store();
        store.ensure_root().await.unwrap();

        fs::write(store.root().join("photo.jpg"), b"ok").await.unwrap();
        fs::write(store.root().join("pending.jpg.part"), b"half").await.unwrap();
        fs::write(store.root().join(".hidden"), b"x").await.unwrap();
        fs::create_dir(store.root().join("nested")).await.unwrap();

        let items = store.list().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "photo.jpg");

        fs::remove_dir_all(store.root()).await.unwrap();
    }

    #[tokio::test]
    async fn traversal_names_are_rejected() {
        let store = temp_store();
        store.ensure_root().await.unwrap();

        for name in ["../escape.jpg", "a/b.jpg", "a\\b.jpg", "", "..", "x.part"] {
            let write = store.write(name, reader(b"data")).await;
            assert!(matches!(write, Err(StoreError::InvalidName { .. })), "{name}");

            let delete = store.delete(name).await;
            assert!(matches!(delete, Err(StoreError::InvalidName { .. })), "{name}");
        }

        fs::remove_dir_all(store.root()).await.unwrap();
    }
}
