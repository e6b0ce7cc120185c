//! CRC-32 (IEEE) of the uncompressed payload, as required by the gzip
//! trailer (RFC 1952 §2.3.1).
//!
//! The table-driven computation itself is `crc32fast`'s job; this module
//! exists so the rest of the crate depends on a narrow, crate-local name
//! rather than reaching into a third-party API directly, and so a streaming
//! accumulator is available to both the encoder (fed one byte/run at a time
//! as tokens are produced) and any future verifying decoder.

use crc32fast::Hasher;

/// Streaming CRC-32 accumulator, seeded the same way on every instance so
/// two codec runs over the same bytes always agree.
#[derive(Default)]
pub struct Crc32 {
    hasher: Hasher,
}

impl Crc32 {
    pub fn new() -> Self {
        Self { hasher: Hasher::new() }
    }

    pub fn update(&mut self, bytes: &[u8]) {
        self.hasher.update(bytes);
    }

    pub fn finalize(self) -> u32 {
        self.hasher.finalize()
    }
}

/// One-shot CRC-32 of a complete buffer.
pub fn checksum(bytes: &[u8]) -> u32 {
    crc32fast::hash(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_crc_is_zero() {
        assert_eq!(checksum(b""), 0);
    }

    #[test]
    fn test_known_vector() {
        // Standard CRC-32/IEEE check value for the ASCII string "123456789".
        assert_eq!(checksum(b"123456789"), 0xCBF4_3926);
    }

    #[test]
    fn test_streaming_matches_one_shot() {
        let mut crc = Crc32::new();
        crc.update(b"hello, ");
        crc.update(b"world");
        assert_eq!(crc.finalize(), checksum(b"hello, world"));
    }
}
