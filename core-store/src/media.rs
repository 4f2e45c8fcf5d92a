//! Media inventory model.
//!
//! [`MediaItem`] is a view over the store's current directory listing; it is
//! never persisted independently. The kind is derived purely from the file
//! name suffix: `.mp4` plays as video, everything else displays as an image.

use std::path::PathBuf;

/// How an item is presented by the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Derive the kind from a file name. `.mp4` means video; anything else
    /// is treated as an image.
    pub fn from_name(name: &str) -> Self {
        if name.ends_with(".mp4") {
            MediaKind::Video
        } else {
            MediaKind::Image
        }
    }
}

/// One entry of the media inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    /// Leaf file name within the media root.
    pub name: String,
    /// Absolute path to the file.
    pub path: PathBuf,
    /// Presentation kind derived from the name.
    pub kind: MediaKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mp4_suffix_is_video() {
        assert_eq!(MediaKind::from_name("clip.mp4"), MediaKind::Video);
    }

    #[test]
    fn everything_else_is_image() {
        assert_eq!(MediaKind::from_name("photo.jpg"), MediaKind::Image);
        assert_eq!(MediaKind::from_name("scan.png"), MediaKind::Image);
        assert_eq!(MediaKind::from_name("noext"), MediaKind::Image);
        assert_eq!(MediaKind::from_name("archive.mp4.bak"), MediaKind::Image);
    }
}
