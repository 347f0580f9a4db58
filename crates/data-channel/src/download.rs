//! Re-exposing received files as user downloads.
//!
//! A record is handed to the host as a [`BlobUrl`]: a transient, revocable
//! reference that borrows the record's bytes. The blob is revoked as soon as
//! the save completes, so the host can never hold on to it.

use std::path::{Component, Path, PathBuf};

use tracing::{debug, info};

use crate::error::DataChannelError;
use crate::registry::TransferredFile;
use crate::transport::BoxFuture;

/// Transient reference to a record's content, tagged with its filename.
#[derive(Debug)]
pub struct BlobUrl<'a> {
    url: String,
    filename: &'a str,
    content: &'a [u8],
}

impl<'a> BlobUrl<'a> {
    fn new(record: &'a TransferredFile) -> Self {
        let url = format!("blob:dcshare/{}", uuid::Uuid::new_v4());
        debug!(%url, filename = record.filename(), "blob created");
        Self {
            url,
            filename: record.filename(),
            content: record.content(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn filename(&self) -> &'a str {
        self.filename
    }

    pub fn content(&self) -> &'a [u8] {
        self.content
    }
}

impl Drop for BlobUrl<'_> {
    fn drop(&mut self) {
        debug!(url = %self.url, "blob revoked");
    }
}

/// Host-side "save as" action.
pub trait DownloadHost: Send + Sync {
    /// Saves the blob, returning where it ended up.
    fn save_as<'a>(
        &'a self,
        blob: &'a BlobUrl<'a>,
    ) -> BoxFuture<'a, Result<PathBuf, DataChannelError>>;
}

/// Creates a blob for `record`, lets `host` save it, then revokes the blob.
pub async fn materialize_download(
    record: &TransferredFile,
    host: &dyn DownloadHost,
) -> Result<PathBuf, DataChannelError> {
    let blob = BlobUrl::new(record);
    let saved = host.save_as(&blob).await;
    drop(blob);
    saved
}

/// Saves downloads into a directory, never overwriting existing files.
#[derive(Debug, Clone)]
pub struct DirectoryDownloadHost {
    dir: PathBuf,
}

impl DirectoryDownloadHost {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn save(&self, blob: &BlobUrl<'_>) -> Result<PathBuf, DataChannelError> {
        let name = safe_file_name(blob.filename())?;
        tokio::fs::create_dir_all(&self.dir).await?;

        let mut attempt = 0u32;
        loop {
            let path = self.dir.join(numbered_name(&name, attempt));
            // create_new: an existing file is never overwritten.
            match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(mut file) => {
                    tokio::io::AsyncWriteExt::write_all(&mut file, blob.content()).await?;
                    tokio::io::AsyncWriteExt::flush(&mut file).await?;
                    info!(path = %path.display(), size = blob.content().len(), "download saved");
                    return Ok(path);
                }
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => attempt += 1,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl DownloadHost for DirectoryDownloadHost {
    fn save_as<'a>(
        &'a self,
        blob: &'a BlobUrl<'a>,
    ) -> BoxFuture<'a, Result<PathBuf, DataChannelError>> {
        Box::pin(self.save(blob))
    }
}

/// Validates a peer-supplied filename and reduces it to a bare file name.
fn safe_file_name(name: &str) -> Result<String, DataChannelError> {
    if name.is_empty() {
        return Err(DataChannelError::InvalidPath("empty file name".into()));
    }

    if Path::new(name).is_absolute() || name.starts_with('/') {
        return Err(DataChannelError::InvalidPath(format!(
            "absolute path not allowed: {name}"
        )));
    }

    // Reject Windows-style prefixes.
    if name.len() >= 2 && name.as_bytes()[1] == b':' {
        return Err(DataChannelError::InvalidPath(format!(
            "Windows drive prefix not allowed: {name}"
        )));
    }
    if name.starts_with("\\\\") {
        return Err(DataChannelError::InvalidPath(format!(
            "UNC path not allowed: {name}"
        )));
    }

    let normalized = name.replace('\\', "/");
    let path = Path::new(&normalized);
    if path.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(DataChannelError::InvalidPath(format!(
            "parent traversal not allowed: {name}"
        )));
    }

    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| DataChannelError::InvalidPath(format!("no file name in: {name}")))
}

/// `report.pdf` -> `report (2).pdf` for attempt 2; attempt 0 is unchanged.
fn numbered_name(name: &str, attempt: u32) -> String {
    if attempt == 0 {
        return name.to_owned();
    }
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem} ({attempt}).{ext}"),
        _ => format!("{name} ({attempt})"),
    }
}
