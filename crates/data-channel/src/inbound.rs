//! Inbound ingestion: raw channel message -> stored file record.

use dcshare_protocol::{FileShareEvent, PacketError, classify, packet};
use tracing::{debug, warn};

use crate::availability::StreamAssociation;
use crate::registry::FileRegistry;

/// Message prefix for inbound decode failures.
pub const PROCESSING_ERROR_MESSAGE: &str = "Failed to process received file";

/// What happened to one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    /// The file was stored; carries the `FileReceived` notification.
    Stored(FileShareEvent),
    /// The sender's stream did not match the manual association.
    Dropped,
    /// The packet was malformed.
    Failed(PacketError),
}

/// Validates, decodes and stores one inbound message.
pub fn ingest<S: AsRef<str>>(
    association: &StreamAssociation,
    registry: &mut FileRegistry,
    image_extensions: &[S],
    stream_id: &str,
    data: &[u8],
) -> IngestOutcome {
    if !association.accepts(stream_id) {
        debug!(
            stream_id,
            expected = ?association.stream_id(),
            "dropping message from unassociated stream"
        );
        return IngestOutcome::Dropped;
    }

    let decoded = match packet::decode(data) {
        Ok(d) => d,
        Err(e) => {
            warn!(stream_id, len = data.len(), error = %e, "malformed file packet");
            return IngestOutcome::Failed(e);
        }
    };

    let is_image = classify::is_image(&decoded.filename, image_extensions);
    let record = registry.add(decoded.filename, decoded.content, is_image);

    debug!(
        stream_id,
        id = record.id(),
        filename = %record.filename(),
        size = record.size_bytes(),
        is_image,
        "file received"
    );

    IngestOutcome::Stored(FileShareEvent::FileReceived {
        id: record.id(),
        filename: record.filename().to_owned(),
        size: record.size_bytes(),
        is_image,
    })
}

/// Builds the user-facing message for a decode failure.
pub fn processing_error_message(err: &PacketError) -> String {
    format!("{PROCESSING_ERROR_MESSAGE}: {err}")
}
