//! Gzip container: header and trailer read/write (RFC 1952).
//!
//! The header carries enough information to locate the start of the DEFLATE
//! payload; everything after the ten fixed bytes is optional and, on read,
//! skipped rather than interpreted, per spec. On write we always emit a
//! single optional field (FNAME) since that's the only one this crate's
//! writer ever populates.

use crate::error::{Error, Result};
use std::io::Read;

const MAGIC1: u8 = 0x1f;
const MAGIC2: u8 = 0x8b;
const CM_DEFLATE: u8 = 8;

const FTEXT: u8 = 1 << 0;
const FHCRC: u8 = 1 << 1;
const FEXTRA: u8 = 1 << 2;
const FNAME: u8 = 1 << 3;
const FCOMMENT: u8 = 1 << 4;

/// XFL = 4 ("fastest algorithm"); this encoder never tries harder than a
/// single hashed pass, so the flag is always honest.
const XFL_FASTEST: u8 = 4;
/// OS = 3 (Unix), matching the original source's hardcoded value.
const OS_UNIX: u8 = 3;

/// Parsed gzip member header, up through whatever optional fields the
/// sender included. Fields the decoder doesn't need to act on (mtime, OS,
/// the `extra` payload, free-text comment) are kept only for callers that
/// want to inspect them; the codec itself only consults `flags` while
/// skipping past them.
#[derive(Debug, Clone)]
pub struct GzipHeader {
    pub flags: u8,
    pub mtime: u32,
    pub extra_flags: u8,
    pub os: u8,
    pub extra: Option<Vec<u8>>,
    pub filename: Option<String>,
    pub comment: Option<String>,
    pub header_crc: Option<u16>,
}

impl GzipHeader {
    /// Read and validate the ten fixed bytes, then skip FEXTRA/FNAME/
    /// FCOMMENT/FHCRC as flagged, leaving `reader` positioned at the first
    /// byte of the DEFLATE bitstream.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut fixed = [0u8; 10];
        read_exact(reader, &mut fixed)?;

        if fixed[0] != MAGIC1 || fixed[1] != MAGIC2 {
            return Err(Error::BadMagic(u16::from_le_bytes([fixed[0], fixed[1]])));
        }
        if fixed[2] != CM_DEFLATE {
            return Err(Error::UnsupportedMethod(fixed[2]));
        }

        let flags = fixed[3];
        let mtime = u32::from_le_bytes([fixed[4], fixed[5], fixed[6], fixed[7]]);
        let extra_flags = fixed[8];
        let os = fixed[9];

        let extra = if flags & FEXTRA != 0 {
            let mut xlen_buf = [0u8; 2];
            read_exact(reader, &mut xlen_buf)?;
            let xlen = u16::from_le_bytes(xlen_buf) as usize;
            let mut data = vec![0u8; xlen];
            read_exact(reader, &mut data)?;
            Some(data)
        } else {
            None
        };

        let filename = if flags & FNAME != 0 { Some(read_cstr(reader)?) } else { None };
        let comment = if flags & FCOMMENT != 0 { Some(read_cstr(reader)?) } else { None };

        let header_crc = if flags & FHCRC != 0 {
            let mut buf = [0u8; 2];
            read_exact(reader, &mut buf)?;
            Some(u16::from_le_bytes(buf))
        } else {
            None
        };

        Ok(Self { flags, mtime, extra_flags, os, extra, filename, comment, header_crc })
    }

    pub fn is_text(&self) -> bool {
        self.flags & FTEXT != 0
    }
}

/// Build a ten-fixed-byte-plus-FNAME header for `basename`: `FLG = FNAME`,
/// `XFL = 4`, `OS = 3`, `MTIME` as the wall-clock time of writing.
pub fn write_header(basename: &str, mtime: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity(10 + basename.len() + 1);
    out.push(MAGIC1);
    out.push(MAGIC2);
    out.push(CM_DEFLATE);
    out.push(FNAME);
    out.extend_from_slice(&mtime.to_le_bytes());
    out.push(XFL_FASTEST);
    out.push(OS_UNIX);
    out.extend_from_slice(basename.as_bytes());
    out.push(0);
    out
}

/// Build the eight-byte gzip trailer: CRC-32 then ISIZE, both little-endian.
pub fn write_trailer(crc32: u32, isize: u32) -> [u8; 8] {
    let mut out = [0u8; 8];
    out[0..4].copy_from_slice(&crc32.to_le_bytes());
    out[4..8].copy_from_slice(&isize.to_le_bytes());
    out
}

/// The eight-byte trailer, parsed back out for verification.
#[derive(Debug, Clone, Copy)]
pub struct GzipTrailer {
    pub crc32: u32,
    pub isize: u32,
}

impl GzipTrailer {
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut buf = [0u8; 8];
        read_exact(reader, &mut buf)?;
        Ok(Self {
            crc32: u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]),
            isize: u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]),
        })
    }
}

fn read_exact<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<()> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        std::io::ErrorKind::UnexpectedEof => Error::TruncatedInput,
        _ => Error::IoError(e),
    })
}

fn read_cstr<R: Read>(reader: &mut R) -> Result<String> {
    let mut bytes = Vec::new();
    let mut byte = [0u8; 1];
    loop {
        read_exact(reader, &mut byte)?;
        if byte[0] == 0 {
            break;
        }
        bytes.push(byte[0]);
    }
    // Gzip text fields are ISO-8859-1; every byte value is a valid Latin-1
    // scalar, so this conversion cannot fail the way UTF-8 could.
    Ok(bytes.iter().map(|&b| b as char).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_roundtrip_header_without_name() {
        let written = write_header("", 0);
        let mut cursor = Cursor::new(written);
        let header = GzipHeader::read(&mut cursor).unwrap();
        assert_eq!(header.filename.as_deref(), Some(""));
        assert_eq!(header.os, OS_UNIX);
        assert_eq!(header.extra_flags, XFL_FASTEST);
    }

    #[test]
    fn test_roundtrip_header_with_name() {
        let written = write_header("data.txt", 1_700_000_000);
        let mut cursor = Cursor::new(written);
        let header = GzipHeader::read(&mut cursor).unwrap();
        assert_eq!(header.filename.as_deref(), Some("data.txt"));
        assert_eq!(header.mtime, 1_700_000_000);
    }

    #[test]
    fn test_bad_magic() {
        let data = vec![0x00, 0x00, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xff];
        let mut cursor = Cursor::new(data);
        assert!(matches!(GzipHeader::read(&mut cursor), Err(Error::BadMagic(_))));
    }

    #[test]
    fn test_unsupported_method() {
        let data = vec![0x1f, 0x8b, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03];
        let mut cursor = Cursor::new(data);
        assert!(matches!(GzipHeader::read(&mut cursor), Err(Error::UnsupportedMethod(1))));
    }

    #[test]
    fn test_header_with_fextra_fcomment_fhcrc_skipped() {
        let mut data = vec![
            0x1f, 0x8b, 0x08, FEXTRA | FNAME | FCOMMENT | FHCRC, 0, 0, 0, 0, 0, 0x03,
        ];
        data.extend_from_slice(&3u16.to_le_bytes()); // XLEN
        data.extend_from_slice(&[1, 2, 3]); // extra payload
        data.extend_from_slice(b"name.txt\0");
        data.extend_from_slice(b"a comment\0");
        data.extend_from_slice(&[0xAB, 0xCD]); // header CRC

        let mut cursor = Cursor::new(data);
        let header = GzipHeader::read(&mut cursor).unwrap();
        assert_eq!(header.extra, Some(vec![1, 2, 3]));
        assert_eq!(header.filename.as_deref(), Some("name.txt"));
        assert_eq!(header.comment.as_deref(), Some("a comment"));
        assert_eq!(header.header_crc, Some(u16::from_le_bytes([0xAB, 0xCD])));
    }

    #[test]
    fn test_trailer_roundtrip() {
        let bytes = write_trailer(0xDEADBEEF, 42);
        let mut cursor = Cursor::new(bytes);
        let trailer = GzipTrailer::read(&mut cursor).unwrap();
        assert_eq!(trailer.crc32, 0xDEADBEEF);
        assert_eq!(trailer.isize, 42);
    }
}
