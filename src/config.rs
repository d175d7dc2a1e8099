//! Conversion settings.
//!
//! [`ConvertConfig`] carries everything the converter needs beyond the
//! archive itself: where to write files, and how to spell the references
//! to exported photos, media and stickers in the rendered Markdown.
//!
//! # Example
//!
//! ```rust
//! use tgmark::config::ConvertConfig;
//!
//! let config = ConvertConfig::new()
//!     .with_out_dir("notes/channel")
//!     .with_photo_dir("attachments/photos")
//!     .with_anchor_channel_links(true);
//!
//! assert_eq!(config.photo_ref("photos/photo_1.jpg"), "attachments/photos/photo_1.jpg");
//! assert_eq!(config.media_ref("files/doc.pdf"), "files/doc.pdf");
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default output directory for rendered posts.
pub const DEFAULT_OUT_DIR: &str = "formatted_posts";

/// Configuration for converting an archive into Markdown posts.
///
/// The `*_dir` prefixes only change the text of the emitted references; no
/// files are copied or moved. When a prefix is unset the reference from the
/// export is used verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertConfig {
    /// Directory that receives one `.md` file per post (default: `formatted_posts`)
    pub out_dir: PathBuf,

    /// Prefix for photo references
    pub photo_dir: Option<String>,

    /// Prefix for generic media references
    pub media_dir: Option<String>,

    /// Prefix for custom emoji / sticker references
    pub stickers_dir: Option<String>,

    /// Rewrite `https://t.me/c/...` links into local `#id` anchors (default: false)
    pub anchor_channel_links: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            photo_dir: None,
            media_dir: None,
            stickers_dir: None,
            anchor_channel_links: false,
        }
    }
}

impl ConvertConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the output directory.
    #[must_use]
    pub fn with_out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = dir.into();
        self
    }

    /// Sets the prefix used for photo references.
    #[must_use]
    pub fn with_photo_dir(mut self, dir: impl Into<String>) -> Self {
        self.photo_dir = Some(dir.into());
        self
    }

    /// Sets the prefix used for media references.
    #[must_use]
    pub fn with_media_dir(mut self, dir: impl Into<String>) -> Self {
        self.media_dir = Some(dir.into());
        self
    }

    /// Sets the prefix used for sticker references.
    #[must_use]
    pub fn with_stickers_dir(mut self, dir: impl Into<String>) -> Self {
        self.stickers_dir = Some(dir.into());
        self
    }

    /// Enables or disables the channel link anchor rewrite.
    #[must_use]
    pub fn with_anchor_channel_links(mut self, enabled: bool) -> Self {
        self.anchor_channel_links = enabled;
        self
    }

    /// Returns the reference to emit for an exported photo path.
    pub fn photo_ref(&self, exported: &str) -> String {
        rebase(self.photo_dir.as_deref(), exported)
    }

    /// Returns the reference to emit for an exported media path.
    pub fn media_ref(&self, exported: &str) -> String {
        rebase(self.media_dir.as_deref(), exported)
    }

    /// Returns the reference to emit for an exported sticker path.
    pub fn sticker_ref(&self, exported: &str) -> String {
        rebase(self.stickers_dir.as_deref(), exported)
    }
}

/// Joins the file name of `exported` under `prefix`.
fn rebase(prefix: Option<&str>, exported: &str) -> String {
    let Some(prefix) = prefix else {
        return exported.to_string();
    };
    let file_name = exported.rsplit('/').next().unwrap_or(exported);
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        file_name.to_string()
    } else {
        format!("{}/{}", prefix, file_name)
    }
}
