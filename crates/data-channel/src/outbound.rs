//! Outbound transfer: local file -> packet -> transport.

use dcshare_protocol::packet;
use tracing::{debug, warn};

use crate::error::DataChannelError;
use crate::transport::{LocalFile, Transport};

/// Message prefix for local read failures.
pub const READ_ERROR_MESSAGE: &str = "Failed to read file";

/// Message prefix for transport failures.
pub const SEND_ERROR_MESSAGE: &str = "Failed to send file";

/// Reads `file`, encodes it and sends it to `stream_id`.
///
/// Returns the packet size on success. Read failures come back as
/// [`DataChannelError::Read`], transport failures (including a refused
/// send) as [`DataChannelError::Send`]. Nothing is retried.
pub async fn transfer(
    transport: &dyn Transport,
    stream_id: &str,
    file: &dyn LocalFile,
) -> Result<usize, DataChannelError> {
    let name = file.name();

    let content = file.read_all().await.map_err(|e| {
        warn!(file = %name, error = %e, "could not read file");
        DataChannelError::Read(format!("{READ_ERROR_MESSAGE} {name}: {e}"))
    })?;

    let packet = packet::encode(name, &content)?;
    let packet_len = packet.len();

    match transport.send_data(stream_id, packet).await {
        Ok(true) => {
            debug!(
                stream_id,
                file = %name,
                size = content.len(),
                packet_len,
                "file sent"
            );
            Ok(packet_len)
        }
        Ok(false) => {
            warn!(stream_id, file = %name, "transport refused file");
            Err(DataChannelError::Send(format!(
                "{SEND_ERROR_MESSAGE} {name}: transport refused the message"
            )))
        }
        Err(e) => {
            warn!(stream_id, file = %name, error = %e, "transport send failed");
            Err(DataChannelError::Send(format!("{SEND_ERROR_MESSAGE} {name}: {e}")))
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::transport::BoxFuture;
    use std::sync::Mutex;

    /// Mock transport that records sends and answers with a fixed result.
    pub(crate) struct MockTransport {
        pub(crate) sent: Mutex<Vec<(String, Vec<u8>)>>,
        pub(crate) reply: Mutex<Option<bool>>,
    }

    impl MockTransport {
        pub(crate) fn accepting() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                reply: Mutex::new(Some(true)),
            }
        }

        pub(crate) fn refusing() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                reply: Mutex::new(Some(false)),
            }
        }

        /// Every send fails with `Closed`.
        pub(crate) fn failing() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                reply: Mutex::new(None),
            }
        }

        pub(crate) fn sent_count(&self) -> usize {
            self.sent.lock().unwrap().len()
        }
    }

    impl Transport for MockTransport {
        fn send_data<'a>(
            &'a self,
            stream_id: &'a str,
            data: Vec<u8>,
        ) -> BoxFuture<'a, Result<bool, DataChannelError>> {
            self.sent
                .lock()
                .unwrap()
                .push((stream_id.to_string(), data));
            let reply = *self.reply.lock().unwrap();
            Box::pin(async move { reply.ok_or(DataChannelError::Closed) })
        }
    }

    /// In-memory file; `None` contents make every read fail.
    pub(crate) struct MemoryFile {
        pub(crate) name: String,
        pub(crate) contents: Option<Vec<u8>>,
    }

    impl MemoryFile {
        pub(crate) fn new(name: &str, contents: &[u8]) -> Self {
            Self {
                name: name.into(),
                contents: Some(contents.to_vec()),
            }
        }

        pub(crate) fn unreadable(name: &str) -> Self {
            Self {
                name: name.into(),
                contents: None,
            }
        }
    }

    impl LocalFile for MemoryFile {
        fn name(&self) -> &str {
            &self.name
        }

        fn read_all(&self) -> BoxFuture<'_, std::io::Result<Vec<u8>>> {
            let contents = self.contents.clone();
            Box::pin(async move {
                contents.ok_or_else(|| std::io::Error::other("Mock file read error"))
            })
        }
    }

    #[tokio::test]
    async fn sends_encoded_packet() {
        let transport = MockTransport::accepting();
        let file = MemoryFile::new("test.txt", b"test");

        let len = transfer(&transport, "test-stream", &file).await.unwrap();

        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "test-stream");
        assert_eq!(sent[0].1.len(), len);
        let decoded = packet::decode(&sent[0].1).unwrap();
        assert_eq!(decoded.filename, "test.txt");
        assert_eq!(decoded.content, b"test");
    }

    #[tokio::test]
    async fn read_failure_sends_nothing() {
        let transport = MockTransport::accepting();
        let file = MemoryFile::unreadable("test.txt");

        let err = transfer(&transport, "s", &file).await.unwrap_err();
        assert!(matches!(err, DataChannelError::Read(_)));
        assert!(err.to_string().contains("Failed to read file"));
        assert_eq!(transport.sent_count(), 0);
    }

    #[tokio::test]
    async fn refused_send_is_send_error() {
        let transport = MockTransport::refusing();
        let file = MemoryFile::new("a.bin", b"a");

        let err = transfer(&transport, "s", &file).await.unwrap_err();
        assert!(matches!(err, DataChannelError::Send(_)));
        assert_eq!(transport.sent_count(), 1);
    }

    #[tokio::test]
    async fn transport_error_is_send_error() {
        let transport = MockTransport::failing();
        let file = MemoryFile::new("a.bin", b"a");

        let err = transfer(&transport, "s", &file).await.unwrap_err();
        assert!(err.to_string().contains("Failed to send file"));
    }
}
