//! The file-share component.
//!
//! Owns the availability tracker and the file registry, dispatches transport
//! notifications to the inbound pipeline, and exposes send/download
//! operations to the host. Every mutation takes `&mut self`; the component
//! is meant to be driven from a single task.

use std::path::PathBuf;

use dcshare_protocol::{ChannelEvent, ErrorKind, FileShareEvent};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::availability::AvailabilityTracker;
use crate::config::FileShareConfig;
use crate::download::{DownloadHost, materialize_download};
use crate::error::DataChannelError;
use crate::inbound::{self, IngestOutcome};
use crate::outbound;
use crate::registry::FileRegistry;
use crate::transport::{LocalFile, Transport};

/// Result of a send attempt that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// The packet of `bytes` bytes was handed to the transport.
    Sent { bytes: usize },
    /// The channel is offline; nothing was attempted.
    Offline,
}

/// Data-channel file sharing endpoint.
pub struct FileShare<T: Transport> {
    transport: T,
    tracker: AvailabilityTracker,
    registry: FileRegistry,
    image_extensions: Vec<String>,
    events_tx: mpsc::UnboundedSender<FileShareEvent>,
    events_rx: Option<mpsc::UnboundedReceiver<FileShareEvent>>,
}

impl<T: Transport> FileShare<T> {
    /// Creates an endpoint. A configured stream id selects manual mode.
    pub fn new(transport: T, config: &FileShareConfig) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let mut tracker = AvailabilityTracker::new();
        tracker.configure(config.stream_id.clone());

        Self {
            transport,
            tracker,
            registry: FileRegistry::new(),
            image_extensions: config.image_extensions.clone(),
            events_tx,
            events_rx: Some(events_rx),
        }
    }

    /// Takes the host event receiver. Can only be called once.
    pub fn take_events(&mut self) -> Option<mpsc::UnboundedReceiver<FileShareEvent>> {
        self.events_rx.take()
    }

    /// Setup-time stream configuration; `Some` switches to manual mode.
    pub fn configure(&mut self, stream_id: Option<String>) {
        self.tracker.configure(stream_id);
    }

    /// Fixes the stream id (manual mode).
    pub fn set_stream_id(&mut self, stream_id: impl Into<String>) {
        self.tracker.set_stream_id(stream_id);
    }

    /// Whether files can be sent right now.
    pub fn is_active(&self) -> bool {
        self.tracker.is_active()
    }

    pub fn stream_id(&self) -> Option<&str> {
        self.tracker.stream_id()
    }

    pub fn tracker(&self) -> &AvailabilityTracker {
        &self.tracker
    }

    pub fn registry(&self) -> &FileRegistry {
        &self.registry
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Applies one transport notification.
    pub fn handle_event(&mut self, event: ChannelEvent) {
        match event {
            ChannelEvent::ChannelOpened { role, stream_id } => {
                debug!(?role, stream_id = %stream_id, "channel opened");
                self.tracker.on_channel_opened(&stream_id);
            }
            ChannelEvent::ChannelClosed { role, stream_id } => {
                debug!(?role, ?stream_id, "channel closed");
                self.tracker.on_channel_closed(stream_id.as_deref());
            }
            ChannelEvent::MessageReceived { stream_id, data } => {
                let outcome = inbound::ingest(
                    self.tracker.association(),
                    &mut self.registry,
                    &self.image_extensions,
                    &stream_id,
                    &data,
                );
                match outcome {
                    IngestOutcome::Stored(event) => self.emit(event),
                    IngestOutcome::Dropped => {}
                    IngestOutcome::Failed(e) => self.emit(FileShareEvent::Error {
                        kind: ErrorKind::ProcessingError,
                        message: inbound::processing_error_message(&e),
                    }),
                }
            }
        }
    }

    /// Processes notifications in delivery order until the channel closes
    /// or `cancel` fires.
    pub async fn run(
        &mut self,
        events: &mut mpsc::Receiver<ChannelEvent>,
        cancel: CancellationToken,
    ) {
        loop {
            let event = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!("file share event loop cancelled");
                    break;
                }
                event = events.recv() => match event {
                    Some(e) => e,
                    None => {
                        debug!("transport event stream closed");
                        break;
                    }
                },
            };
            self.handle_event(event);
        }
    }

    /// Sends a local file to the associated stream.
    ///
    /// While offline nothing is attempted and `SendOutcome::Offline` is
    /// returned. Failures are both returned and emitted as `Error` events.
    pub async fn send_file(&self, file: &dyn LocalFile) -> Result<SendOutcome, DataChannelError> {
        let stream_id = match (self.tracker.is_active(), self.tracker.stream_id()) {
            (true, Some(id)) => id,
            _ => {
                debug!(file = %file.name(), "channel offline, send skipped");
                return Ok(SendOutcome::Offline);
            }
        };

        match outbound::transfer(&self.transport, stream_id, file).await {
            Ok(bytes) => {
                info!(stream_id, file = %file.name(), bytes, "file sent");
                Ok(SendOutcome::Sent { bytes })
            }
            Err(e) => {
                self.report(&e);
                Err(e)
            }
        }
    }

    /// Saves a received file through `host`.
    pub async fn download_record(
        &self,
        id: u64,
        host: &dyn DownloadHost,
    ) -> Result<PathBuf, DataChannelError> {
        let result = match self.registry.get(id) {
            Some(record) => materialize_download(record, host).await,
            None => Err(DataChannelError::UnknownRecord(id)),
        };
        if let Err(e) = &result {
            self.report(e);
        }
        result
    }

    fn report(&self, err: &DataChannelError) {
        self.emit(FileShareEvent::Error {
            kind: err.kind(),
            message: err.user_message(),
        });
    }

    fn emit(&self, event: FileShareEvent) {
        // Nobody listening is fine; the registry still holds the state.
        let _ = self.events_tx.send(event);
    }
}
