//! In-process transport joining two endpoints.
//!
//! A message sent on one side arrives as
//! [`ChannelEvent::MessageReceived`] on the other. Lifecycle notifications
//! are injected with [`LoopbackTransport::announce`].

use dcshare_protocol::ChannelEvent;
use tokio::sync::mpsc;
use tracing::debug;

use crate::error::DataChannelError;
use crate::transport::{BoxFuture, Transport};

/// Send half of one loopback endpoint.
#[derive(Debug, Clone)]
pub struct LoopbackTransport {
    local_tx: mpsc::Sender<ChannelEvent>,
    peer_tx: mpsc::Sender<ChannelEvent>,
}

/// One side of a loopback link: its transport and its event stream.
#[derive(Debug)]
pub struct LoopbackEndpoint {
    pub transport: LoopbackTransport,
    pub events: mpsc::Receiver<ChannelEvent>,
}

/// Creates two connected endpoints with `capacity` queued events each.
pub fn pair(capacity: usize) -> (LoopbackEndpoint, LoopbackEndpoint) {
    let (a_tx, a_rx) = mpsc::channel(capacity);
    let (b_tx, b_rx) = mpsc::channel(capacity);

    let a = LoopbackEndpoint {
        transport: LoopbackTransport {
            local_tx: a_tx.clone(),
            peer_tx: b_tx.clone(),
        },
        events: a_rx,
    };
    let b = LoopbackEndpoint {
        transport: LoopbackTransport {
            local_tx: b_tx,
            peer_tx: a_tx,
        },
        events: b_rx,
    };
    (a, b)
}

impl LoopbackTransport {
    /// Delivers a lifecycle notification to this endpoint's own event stream.
    pub async fn announce(&self, event: ChannelEvent) -> Result<(), DataChannelError> {
        self.local_tx
            .send(event)
            .await
            .map_err(|_| DataChannelError::Closed)
    }

    /// Delivers a notification to the peer's event stream.
    pub async fn announce_to_peer(&self, event: ChannelEvent) -> Result<(), DataChannelError> {
        self.peer_tx
            .send(event)
            .await
            .map_err(|_| DataChannelError::Closed)
    }
}

impl Transport for LoopbackTransport {
    fn send_data<'a>(
        &'a self,
        stream_id: &'a str,
        data: Vec<u8>,
    ) -> BoxFuture<'a, Result<bool, DataChannelError>> {
        Box::pin(async move {
            let len = data.len();
            self.peer_tx
                .send(ChannelEvent::MessageReceived {
                    stream_id: stream_id.to_owned(),
                    data,
                })
                .await
                .map_err(|_| DataChannelError::Closed)?;
            debug!(stream_id, len, "loopback message delivered");
            Ok(true)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcshare_protocol::ChannelRole;

    #[tokio::test]
    async fn send_reaches_peer() {
        let (a, mut b) = pair(4);
        assert!(a.transport.send_data("s1", b"ping".to_vec()).await.unwrap());

        let event = b.events.recv().await.unwrap();
        assert_eq!(
            event,
            ChannelEvent::MessageReceived {
                stream_id: "s1".into(),
                data: b"ping".to_vec(),
            }
        );
    }

    #[tokio::test]
    async fn announce_is_local_only() {
        let (mut a, mut b) = pair(4);
        let opened = ChannelEvent::ChannelOpened {
            role: ChannelRole::Publish,
            stream_id: "s1".into(),
        };
        a.transport.announce(opened.clone()).await.unwrap();

        assert_eq!(a.events.recv().await.unwrap(), opened);
        assert!(b.events.try_recv().is_err());
    }

    #[tokio::test]
    async fn send_to_dropped_peer_fails() {
        let (a, b) = pair(4);
        drop(b);
        let result = a.transport.send_data("s1", vec![1]).await;
        assert!(matches!(result, Err(DataChannelError::Closed)));
    }
}
