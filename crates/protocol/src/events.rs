//! Events flowing into and out of the file-share component.

use serde::{Deserialize, Serialize};

/// Which side of the session a lifecycle notification refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelRole {
    Publish,
    Play,
}

/// Notification delivered by the transport adaptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    /// A publish or play session started on `stream_id`.
    ChannelOpened { role: ChannelRole, stream_id: String },
    /// A publish or play session finished. Some adaptors omit the id.
    ChannelClosed {
        role: ChannelRole,
        stream_id: Option<String>,
    },
    /// A raw data-channel message arrived from `stream_id`.
    MessageReceived { stream_id: String, data: Vec<u8> },
}

impl ChannelEvent {
    /// The stream id carried by the event, if any.
    pub fn stream_id(&self) -> Option<&str> {
        match self {
            Self::ChannelOpened { stream_id, .. } | Self::MessageReceived { stream_id, .. } => {
                Some(stream_id)
            }
            Self::ChannelClosed { stream_id, .. } => stream_id.as_deref(),
        }
    }
}

/// Category of a reported failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// An inbound packet could not be decoded.
    ProcessingError,
    /// A local file could not be read.
    ReadError,
    /// The transport rejected or failed a send.
    SendError,
    /// A received file could not be saved.
    DownloadError,
}

/// Event emitted by the file-share component to its host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FileShareEvent {
    FileReceived {
        id: u64,
        filename: String,
        size: usize,
        is_image: bool,
    },
    Error {
        kind: ErrorKind,
        message: String,
    },
}
