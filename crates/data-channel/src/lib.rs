//! File sharing over a generic data channel.
//!
//! Turns local files into single-message packets for the transport,
//! rebuilds received packets into an in-memory registry, and tracks when
//! the channel is usable. The transport itself is supplied by the host
//! through the [`Transport`] trait.
//!
//! # Wire format
//!
//! See [`dcshare_protocol::encode`] and [`dcshare_protocol::decode`].

pub mod availability;
pub mod config;
pub mod download;
pub mod error;
pub mod file_share;
pub mod inbound;
pub mod loopback;
pub mod messaging;
pub mod outbound;
pub mod registry;
pub mod transport;

pub use availability::{AvailabilityTracker, StreamAssociation};
pub use config::FileShareConfig;
pub use download::{BlobUrl, DirectoryDownloadHost, DownloadHost, materialize_download};
pub use error::DataChannelError;
pub use file_share::{FileShare, SendOutcome};
pub use messaging::{ChatEntry, Direction, Interceptor, TextMessaging};
pub use registry::{FileRegistry, TransferredFile};
pub use transport::{BoxFuture, DiskFile, LocalFile, Transport};
