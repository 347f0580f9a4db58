//! File-share component settings.

use std::path::PathBuf;

use dcshare_protocol::DEFAULT_IMAGE_EXTENSIONS;
use serde::{Deserialize, Serialize};

/// Settings for a [`FileShare`](crate::FileShare) endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileShareConfig {
    /// Fixed stream id. When set the endpoint starts in manual mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_id: Option<String>,

    /// Extensions rendered as image previews.
    #[serde(default = "default_image_extensions")]
    pub image_extensions: Vec<String>,

    /// Where downloaded files are saved.
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,

    /// Keep sent text messages in the message log.
    #[serde(default = "default_true")]
    pub display_sent_messages: bool,
}

fn default_image_extensions() -> Vec<String> {
    DEFAULT_IMAGE_EXTENSIONS
        .iter()
        .map(|ext| (*ext).to_string())
        .collect()
}

fn default_download_dir() -> PathBuf {
    let home = std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir);
    home.join("Downloads")
}

fn default_true() -> bool {
    true
}

impl Default for FileShareConfig {
    fn default() -> Self {
        Self {
            stream_id: None,
            image_extensions: default_image_extensions(),
            download_dir: default_download_dir(),
            display_sent_messages: default_true(),
        }
    }
}
