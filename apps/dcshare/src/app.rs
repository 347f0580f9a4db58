//! Loopback session: one endpoint publishes files, the other plays the
//! stream, stores what arrives and saves it to disk.

use std::path::PathBuf;
use std::time::Duration;

use dcshare_data_channel::loopback;
use dcshare_data_channel::{DirectoryDownloadHost, DiskFile, FileShare, SendOutcome};
use dcshare_protocol::{ChannelEvent, ChannelRole, FileShareEvent};
use tokio_util::sync::CancellationToken;

use crate::config::Config;

/// How long to wait for the receiving side to report each file.
const RECEIVE_TIMEOUT: Duration = Duration::from_secs(10);

/// Stream used when neither the CLI nor the config names one.
pub const DEFAULT_STREAM_ID: &str = "dcshare-loopback";

/// Outcome of a session.
#[derive(Debug, Default)]
pub struct SessionReport {
    pub sent: usize,
    pub failed: usize,
    pub saved: Vec<PathBuf>,
}

/// Sends `files` across a loopback link and saves them into `download_dir`.
pub async fn run(
    config: &Config,
    stream_id: String,
    files: &[PathBuf],
    download_dir: PathBuf,
) -> anyhow::Result<SessionReport> {
    let (sender_end, receiver_end) = loopback::pair(config.channel_capacity.max(1));

    let mut sender = FileShare::new(sender_end.transport.clone(), &config.file_share);
    let mut receiver = FileShare::new(receiver_end.transport.clone(), &config.file_share);
    let mut received = receiver
        .take_events()
        .ok_or_else(|| anyhow::anyhow!("receiver events already taken"))?;
    let mut sender_events = sender
        .take_events()
        .ok_or_else(|| anyhow::anyhow!("sender events already taken"))?;

    sender.handle_event(ChannelEvent::ChannelOpened {
        role: ChannelRole::Publish,
        stream_id: stream_id.clone(),
    });
    receiver_end
        .transport
        .announce(ChannelEvent::ChannelOpened {
            role: ChannelRole::Play,
            stream_id: stream_id.clone(),
        })
        .await?;

    let cancel = CancellationToken::new();
    let receiver_cancel = cancel.clone();
    let mut receiver_events = receiver_end.events;
    let receiver_task = tokio::spawn(async move {
        receiver.run(&mut receiver_events, receiver_cancel).await;
        receiver
    });

    let mut report = SessionReport::default();
    for path in files {
        let file = DiskFile::new(path);
        match sender.send_file(&file).await {
            Ok(SendOutcome::Sent { bytes }) => {
                tracing::info!(file = %file.path().display(), bytes, "sent");
                report.sent += 1;
            }
            Ok(SendOutcome::Offline) => {
                tracing::warn!(file = %file.path().display(), "channel offline, not sent");
                report.failed += 1;
            }
            Err(e) => {
                tracing::error!(file = %file.path().display(), error = %e, "send failed");
                report.failed += 1;
            }
        }
    }
    while let Ok(event) = sender_events.try_recv() {
        tracing::debug!(?event, "sender event");
    }

    for _ in 0..report.sent {
        match tokio::time::timeout(RECEIVE_TIMEOUT, received.recv()).await {
            Ok(Some(FileShareEvent::FileReceived {
                filename,
                size,
                is_image,
                ..
            })) => {
                tracing::info!(%filename, size, is_image, "received");
            }
            Ok(Some(FileShareEvent::Error { kind, message })) => {
                tracing::warn!(?kind, %message, "receiver error");
            }
            Ok(None) => break,
            Err(_) => {
                tracing::warn!("timed out waiting for the receiving side");
                break;
            }
        }
    }

    cancel.cancel();
    let receiver = receiver_task.await?;

    let host = DirectoryDownloadHost::new(download_dir);
    for record in receiver.registry().iter() {
        match receiver.download_record(record.id(), &host).await {
            Ok(path) => report.saved.push(path),
            Err(e) => tracing::error!(file = %record.filename(), error = %e, "save failed"),
        }
    }

    Ok(report)
}
