//! Wire-level types for data-channel file sharing.
//!
//! Holds the binary packet codec, filename classification and the event
//! types exchanged between the transport adaptor, the file-share component
//! and its host.

pub mod classify;
pub mod events;
pub mod packet;

pub use classify::{DEFAULT_IMAGE_EXTENSIONS, is_image};
pub use events::{ChannelEvent, ChannelRole, ErrorKind, FileShareEvent};
pub use packet::{DecodedPacket, PacketError, decode, encode};
