//! Seams to the host environment: the transport send primitive and
//! local file access.
//!
//! The host implements [`Transport`] on top of its real data-channel
//! adaptor. Keeping it a trait lets the pipelines run against mocks and
//! the in-process loopback.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use crate::error::DataChannelError;

/// Boxed future returned by the host seams.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Send side of the data channel.
pub trait Transport: Send + Sync {
    /// Sends one binary message to `stream_id`.
    ///
    /// `Ok(false)` means the adaptor refused the message without an error.
    fn send_data<'a>(
        &'a self,
        stream_id: &'a str,
        data: Vec<u8>,
    ) -> BoxFuture<'a, Result<bool, DataChannelError>>;
}

/// A file selected by the user for sending.
pub trait LocalFile: Send + Sync {
    /// Name sent to the peer.
    fn name(&self) -> &str;

    /// Reads the whole file.
    fn read_all(&self) -> BoxFuture<'_, std::io::Result<Vec<u8>>>;
}

/// A file on the local filesystem.
#[derive(Debug, Clone)]
pub struct DiskFile {
    path: PathBuf,
    name: String,
}

impl DiskFile {
    /// Wraps `path`, naming it after its final component.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self { path, name }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl LocalFile for DiskFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_all(&self) -> BoxFuture<'_, std::io::Result<Vec<u8>>> {
        Box::pin(tokio::fs::read(&self.path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disk_file_reads_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"some notes").unwrap();

        let file = DiskFile::new(&path);
        assert_eq!(file.name(), "notes.txt");
        assert_eq!(file.path(), path);
        assert_eq!(file.read_all().await.unwrap(), b"some notes");
    }

    #[tokio::test]
    async fn disk_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let file = DiskFile::new(dir.path().join("missing.bin"));
        assert!(file.read_all().await.is_err());
    }
}
