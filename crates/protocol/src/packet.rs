//! Binary file packet: one file per channel message.
//!
//! # Wire format
//!
//! ```text
//! [4 bytes LE: filename_len]
//! [filename_len bytes: filename UTF-8]
//! [rest: file content]
//! ```
//!
//! There is no version byte, magic number or checksum. Anything that needs
//! forward compatibility has to wrap its own envelope around this layer.

/// Size of the little-endian filename length prefix.
pub const LENGTH_PREFIX_LEN: usize = 4;

/// A decoded file packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPacket {
    pub filename: String,
    pub content: Vec<u8>,
}

/// Errors from packet encoding and decoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PacketError {
    #[error("packet too short: need at least {LENGTH_PREFIX_LEN} bytes, got {got}")]
    TooShort { got: usize },

    #[error("filename truncated: declared {declared} bytes, only {available} available")]
    FilenameTruncated { declared: usize, available: usize },

    #[error("filename too long: {0} bytes")]
    FilenameTooLong(usize),
}

/// Encodes a filename and its content into a single packet.
pub fn encode(filename: &str, content: &[u8]) -> Result<Vec<u8>, PacketError> {
    let name = filename.as_bytes();
    let name_len =
        u32::try_from(name.len()).map_err(|_| PacketError::FilenameTooLong(name.len()))?;

    let mut buf = Vec::with_capacity(LENGTH_PREFIX_LEN + name.len() + content.len());
    buf.extend_from_slice(&name_len.to_le_bytes());
    buf.extend_from_slice(name);
    buf.extend_from_slice(content);
    Ok(buf)
}

/// Decodes a packet received from the channel.
///
/// Never reads past the end of `data`, whatever the declared filename
/// length says. Invalid UTF-8 in the filename is replaced with U+FFFD.
pub fn decode(data: &[u8]) -> Result<DecodedPacket, PacketError> {
    let Some((prefix, rest)) = data.split_first_chunk::<LENGTH_PREFIX_LEN>() else {
        return Err(PacketError::TooShort { got: data.len() });
    };

    let declared = u32::from_le_bytes(*prefix) as usize;
    if declared > rest.len() {
        return Err(PacketError::FilenameTruncated {
            declared,
            available: rest.len(),
        });
    }

    let (name, content) = rest.split_at(declared);
    let filename = String::from_utf8_lossy(name).into_owned();

    Ok(DecodedPacket {
        filename,
        content: content.to_vec(),
    })
}
