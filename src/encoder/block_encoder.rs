use super::window::{EncoderWindow, MIN_MATCH};
use crate::crc::Crc32;
use crate::deflate::LZ77Token;
use crate::error::Result;
use std::io::Read;

/// Result of tokenizing a whole byte source into a single LZ77 stream.
pub struct Lz77Stream {
    pub tokens: Vec<LZ77Token>,
    pub crc32: u32,
    pub input_len: u64,
}

/// Drives the match finder over `source` end to end, producing the LZ77
/// token stream for a single final block. This crate's encoder never emits
/// more than one block and never chooses a dynamic code, so there is
/// exactly one call site for this function per stream.
pub fn tokenize<R: Read>(source: R) -> Result<Lz77Stream> {
    let mut window = EncoderWindow::new(source);
    let mut crc = Crc32::new();
    let mut input_len: u64 = 0;
    let mut tokens = Vec::new();

    window.fill_window()?;

    while window.lookahead() > 0 {
        if window.find_match() && window.match_length() >= MIN_MATCH {
            let length = window.match_length();
            let distance = window.wpos() - window.match_start();
            tokens.push(LZ77Token::Copy { length: length as u16, distance: distance as u16 });

            for i in 0..length {
                crc.update(&[window.current_byte()]);
                input_len += 1;
                if window.lookahead() >= MIN_MATCH {
                    window.insert_string();
                }
                window.advance();
                if window.lookahead() > 0 && i < length - 1 {
                    window.fill_window()?;
                }
            }
        } else {
            let byte = window.current_byte();
            tokens.push(LZ77Token::Literal(byte));
            crc.update(&[byte]);
            input_len += 1;
            window.insert_string();
            window.advance();
            window.fill_window()?;
        }
    }

    tokens.push(LZ77Token::EndOfBlock);

    Ok(Lz77Stream { tokens, crc32: crc.finalize(), input_len })
}
