use thiserror::Error;

/// Errors produced by the gzip/DEFLATE codec.
///
/// All variants are fatal to the current stream: decoding or encoding stops
/// at the first error and no partial recovery is attempted within a member.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("truncated input: byte source ended mid-field or mid-bitstream")]
    TruncatedInput,

    #[error("bad gzip magic: expected 0x1f8b, got 0x{0:04x}")]
    BadMagic(u16),

    #[error("unsupported compression method: {0} (only DEFLATE/8 is supported)")]
    UnsupportedMethod(u8),

    #[error("bad block: {0}")]
    BadBlock(&'static str),

    #[error("bad code: {0}")]
    BadCode(&'static str),

    #[error("bad stored block: LEN={len:#06x}, NLEN={nlen:#06x} (expected LEN == !NLEN)")]
    BadStored { len: u16, nlen: u16 },

    #[error("bad back-reference: distance {distance} exceeds {available} bytes output so far")]
    BadReference { distance: u16, available: u64 },

    #[error("CRC32 mismatch: expected 0x{expected:08x}, found 0x{found:08x}")]
    CrcMismatch { expected: u32, found: u32 },

    #[error("size mismatch: expected {expected} bytes, found {found}")]
    SizeMismatch { expected: u32, found: u32 },
}

pub type Result<T> = std::result::Result<T, Error>;
