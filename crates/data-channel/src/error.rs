//! Error types for the data channel.

use dcshare_protocol::{ErrorKind, PacketError};

/// Errors produced by the file-share data channel.
#[derive(Debug, thiserror::Error)]
pub enum DataChannelError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed packet: {0}")]
    Packet(#[from] PacketError),

    #[error("read failed: {0}")]
    Read(String),

    #[error("send failed: {0}")]
    Send(String),

    #[error("transport closed")]
    Closed,

    #[error("invalid file name: {0}")]
    InvalidPath(String),

    #[error("unknown record: {0}")]
    UnknownRecord(u64),
}

impl DataChannelError {
    /// The event category this error is reported under.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Packet(_) => ErrorKind::ProcessingError,
            Self::Read(_) => ErrorKind::ReadError,
            Self::Send(_) | Self::Closed => ErrorKind::SendError,
            Self::Io(_) | Self::InvalidPath(_) | Self::UnknownRecord(_) => {
                ErrorKind::DownloadError
            }
        }
    }

    /// Text shown to the user in an `Error` event.
    pub fn user_message(&self) -> String {
        match self {
            Self::Packet(e) => crate::inbound::processing_error_message(e),
            Self::Read(msg) | Self::Send(msg) => msg.clone(),
            other => format!("Failed to download file: {other}"),
        }
    }
}
