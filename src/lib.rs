//! A minimal gzip compressor/decompressor pair implementing the core of
//! RFC 1952 (gzip container) wrapping RFC 1951 (DEFLATE).
//!
//! The decoder runs a 32 KiB sliding window and reads any conformant
//! DEFLATE stream (stored, fixed-Huffman, or dynamic-Huffman blocks). The
//! encoder runs a 4 KiB hashed match finder and always emits a single
//! final fixed-Huffman block; it never builds a dynamic block, negotiates
//! zlib/raw framing, or splits output across multiple members.

pub mod bits;
pub mod crc;
pub mod decoder;
pub mod deflate;
pub mod encoder;
pub mod error;
pub mod gzip;
pub mod huffman;

pub use deflate::LZ77Token;
pub use error::{Error, Result};

use bits::BitReader;
use decoder::BlockDecoder;
use gzip::{write_header, write_trailer, GzipHeader};
use huffman::HuffmanEncoder;
use log::{debug, info};
use std::io::{Read, Write};

/// Outcome of a single `compress`/`decompress` call: the ambient counters a
/// CLI or test wants to report, not part of the wire format itself.
#[derive(Clone, Debug, Default)]
pub struct Stats {
    pub input_bytes: u64,
    pub output_bytes: u64,
    pub literal_count: u64,
    pub match_count: u64,
}

/// Consume all of `source`, writing one complete gzip member to `sink`.
/// `basename` populates the header's FNAME field.
///
/// Always emits a single final fixed-Huffman block; never attempts stored
/// or dynamic encoding, and never negotiates block type adaptively.
pub fn compress<R: Read, W: Write>(source: R, mut sink: W, basename: &str) -> Result<Stats> {
    info!("compress: starting stream, basename={:?}", basename);

    let stream = encoder::tokenize(source)?;

    let mut literal_count = 0u64;
    let mut match_count = 0u64;
    for token in &stream.tokens {
        match token {
            LZ77Token::Literal(_) => literal_count += 1,
            LZ77Token::Copy { .. } => match_count += 1,
            LZ77Token::EndOfBlock => {}
        }
    }

    let body = HuffmanEncoder::new().encode(&stream.tokens)?;

    let mtime = current_mtime();
    let header = write_header(basename, mtime);
    let trailer = write_trailer(stream.crc32, stream.input_len as u32);

    sink.write_all(&header)?;
    sink.write_all(&body)?;
    sink.write_all(&trailer)?;

    let output_bytes = (header.len() + body.len() + trailer.len()) as u64;
    debug!(
        "compress: done, input_bytes={} output_bytes={} literals={} matches={}",
        stream.input_len, output_bytes, literal_count, match_count
    );

    Ok(Stats { input_bytes: stream.input_len, output_bytes, literal_count, match_count })
}

/// Consume one gzip member from `source`, writing its decompressed payload
/// to `sink`. When `verify` is set, also checks the trailer's CRC-32 and
/// ISIZE against the bytes actually produced, returning `CrcMismatch` or
/// `SizeMismatch` on disagreement. Verification is opt-in on this driver
/// call rather than always-on, mirroring `gunzip -t`-style explicit checks
/// rather than silently making every decode pay for a comparison most
/// callers don't need.
pub fn decompress<R: Read, W: Write>(mut source: R, mut sink: W, verify: bool) -> Result<Stats> {
    info!("decompress: starting stream, verify={}", verify);

    let header = GzipHeader::read(&mut source)?;
    debug!("decompress: header filename={:?}", header.filename);

    let mut checksumming = ChecksummingWriter::new(&mut sink);
    let mut decoder = BlockDecoder::new(BitReader::new(source));
    decoder.decode_all(&mut checksumming)?;

    let output_bytes = decoder.total_written();
    let actual_crc = checksumming.finish();

    if verify {
        let trailer = decoder.read_trailer()?;
        if trailer.crc32 != actual_crc {
            return Err(Error::CrcMismatch { expected: trailer.crc32, found: actual_crc });
        }
        if trailer.isize != (output_bytes as u32) {
            return Err(Error::SizeMismatch { expected: trailer.isize, found: output_bytes as u32 });
        }
    }

    debug!("decompress: done, output_bytes={}", output_bytes);

    Ok(Stats { input_bytes: 0, output_bytes, literal_count: 0, match_count: 0 })
}

/// Tees every written byte through a running CRC-32, so `decompress` can
/// offer trailer verification without buffering the decompressed payload
/// separately from the caller's sink.
struct ChecksummingWriter<W: Write> {
    inner: W,
    crc: crc::Crc32,
}

impl<W: Write> ChecksummingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, crc: crc::Crc32::new() }
    }

    fn finish(self) -> u32 {
        self.crc.finalize()
    }
}

impl<W: Write> Write for ChecksummingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.crc.update(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

/// Wall-clock MTIME for the gzip header, truncated to the field's 32 bits
/// (RFC 1952 permits 0 when the time is unknown; we always have it, so we
/// always send it).
fn current_mtime() -> u32 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs() as u32).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_roundtrip_empty() {
        let mut out = Vec::new();
        let stats = compress(Cursor::new(Vec::new()), &mut out, "empty.txt").unwrap();
        assert_eq!(stats.input_bytes, 0);

        let mut decompressed = Vec::new();
        decompress(Cursor::new(out), &mut decompressed, true).unwrap();
        assert_eq!(decompressed, Vec::<u8>::new());
    }

    #[test]
    fn test_roundtrip_aaaaaaaa() {
        let original = b"AAAAAAAA".to_vec();
        let mut out = Vec::new();
        compress(Cursor::new(original.clone()), &mut out, "a.txt").unwrap();

        let mut decompressed = Vec::new();
        decompress(Cursor::new(out), &mut decompressed, true).unwrap();
        assert_eq!(decompressed, original);
    }

    #[test]
    fn test_roundtrip_with_verify_catches_truncated_trailer() {
        let original = b"abcabcabcabc".to_vec();
        let mut out = Vec::new();
        compress(Cursor::new(original), &mut out, "r.txt").unwrap();

        // Corrupt the trailer's CRC bytes.
        let len = out.len();
        out[len - 8] ^= 0xFF;

        let mut decompressed = Vec::new();
        assert!(matches!(
            decompress(Cursor::new(out), &mut decompressed, true),
            Err(Error::CrcMismatch { .. })
        ));
    }

    #[test]
    fn test_roundtrip_text_and_binary() {
        let mut original = Vec::new();
        for i in 0..5000u32 {
            original.extend_from_slice(format!("line {} with some text\n", i).as_bytes());
        }
        let mut out = Vec::new();
        compress(Cursor::new(original.clone()), &mut out, "big.txt").unwrap();

        let mut decompressed = Vec::new();
        decompress(Cursor::new(out), &mut decompressed, true).unwrap();
        assert_eq!(decompressed, original);
    }

    #[test]
    fn test_roundtrip_exceeds_window() {
        // Forces at least one 4 KiB slide in the encoder's window.
        let mut original = Vec::with_capacity(20_000);
        for i in 0..20_000u32 {
            original.push((i % 251) as u8);
        }
        let mut out = Vec::new();
        compress(Cursor::new(original.clone()), &mut out, "w.bin").unwrap();

        let mut decompressed = Vec::new();
        decompress(Cursor::new(out), &mut decompressed, true).unwrap();
        assert_eq!(decompressed, original);
    }

    #[test]
    fn test_decompress_rejects_bad_stored_block() {
        // Header, then a hand-crafted stored block with LEN != !NLEN.
        let mut data = write_header("x", 0);
        data.push(0b0000_0001); // BFINAL=1, BTYPE=00
        data.extend_from_slice(&5u16.to_le_bytes());
        data.extend_from_slice(&5u16.to_le_bytes()); // wrong NLEN
        data.extend_from_slice(b"hello");
        data.extend_from_slice(&write_trailer(0, 5));

        let mut out = Vec::new();
        assert!(decompress(Cursor::new(data), &mut out, false).is_err());
    }

    #[test]
    fn test_decompress_rejects_bad_magic() {
        let data = vec![0u8; 20];
        let mut out = Vec::new();
        assert!(matches!(decompress(Cursor::new(data), &mut out, false), Err(Error::BadMagic(_))));
    }
}
