fn main() {
    println!("Run `cargo test -p wire-compat` to execute wire compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use dcshare_protocol::{PacketError, decode, encode};
    use serde::Deserialize;

    /// Packets captured from the browser-side packet builder.
    #[derive(Deserialize)]
    struct Fixtures {
        valid: Vec<ValidPacket>,
        malformed: Vec<MalformedPacket>,
        lossy: Vec<LossyPacket>,
    }

    #[derive(Deserialize)]
    struct ValidPacket {
        filename: String,
        content: String,
        packet: String,
    }

    #[derive(Deserialize)]
    struct MalformedPacket {
        name: String,
        packet: String,
        error: String,
    }

    /// Structurally valid packets whose filename bytes are not UTF-8.
    #[derive(Deserialize)]
    struct LossyPacket {
        name: String,
        packet: String,
        filename: String,
        content: String,
    }

    /// Returns the path to the fixtures directory.
    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    fn load_fixtures() -> Fixtures {
        let path = fixtures_dir().join("file_packets.json");
        let data = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
        serde_json::from_str(&data)
            .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()))
    }

    fn error_name(err: &PacketError) -> &'static str {
        match err {
            PacketError::TooShort { .. } => "too_short",
            PacketError::FilenameTruncated { .. } => "filename_truncated",
            PacketError::FilenameTooLong(_) => "filename_too_long",
        }
    }

    #[test]
    fn encode_matches_browser_packets() {
        for fixture in load_fixtures().valid {
            let ours = encode(&fixture.filename, fixture.content.as_bytes()).unwrap();
            assert_eq!(
                hex::encode(&ours),
                fixture.packet,
                "encoding mismatch for {}",
                fixture.filename
            );
        }
    }

    #[test]
    fn decode_browser_packets() {
        for fixture in load_fixtures().valid {
            let bytes = hex::decode(&fixture.packet).unwrap();
            let decoded = decode(&bytes)
                .unwrap_or_else(|e| panic!("failed to decode {}: {e}", fixture.filename));
            assert_eq!(decoded.filename, fixture.filename);
            assert_eq!(decoded.content, fixture.content.as_bytes());
        }
    }

    #[test]
    fn malformed_packets_rejected() {
        for fixture in load_fixtures().malformed {
            let bytes = hex::decode(&fixture.packet).unwrap();
            let err = decode(&bytes)
                .err()
                .unwrap_or_else(|| panic!("{} decoded unexpectedly", fixture.name));
            assert_eq!(error_name(&err), fixture.error, "fixture {}", fixture.name);
        }
    }

    #[test]
    fn non_utf8_filenames_decoded_lossily() {
        for fixture in load_fixtures().lossy {
            let bytes = hex::decode(&fixture.packet).unwrap();
            let decoded = decode(&bytes)
                .unwrap_or_else(|e| panic!("{} rejected: {e}", fixture.name));
            assert_eq!(decoded.filename, fixture.filename, "fixture {}", fixture.name);
            assert_eq!(decoded.content, fixture.content.as_bytes());
        }
    }
}
