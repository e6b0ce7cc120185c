use crate::bits::BitReader;
use crate::decoder::window::SlidingWindow;
use crate::deflate::tables::{decode_distance, decode_length, CODE_LENGTH_ORDER};
use crate::error::{Error, Result};
use crate::huffman::HuffmanDecoder;
use std::io::{Read, Write};

/// Streaming DEFLATE block decoder.
///
/// Reads one gzip member's compressed payload block by block and writes
/// decoded bytes directly through a [`SlidingWindow`] into the caller's
/// sink; it never buffers a whole block's worth of tokens, matching the
/// byte-at-a-time `output_byte` contract a back-reference copy requires.
pub struct BlockDecoder<R: Read> {
    bits: BitReader<R>,
    window: SlidingWindow,
    finished: bool,
}

impl<R: Read> BlockDecoder<R> {
    pub fn new(reader: BitReader<R>) -> Self {
        Self { bits: reader, window: SlidingWindow::new(), finished: false }
    }

    /// Decode every block of the DEFLATE stream into `sink`, stopping after
    /// the final block (BFINAL=1).
    pub fn decode_all<W: Write>(&mut self, sink: &mut W) -> Result<()> {
        while !self.finished {
            self.decode_one_block(sink)?;
        }
        Ok(())
    }

    pub fn total_written(&self) -> u64 {
        self.window.total_written()
    }

    /// Read the eight-byte gzip trailer (CRC-32, ISIZE) through the same bit
    /// reader used for the DEFLATE stream, so any bytes the reader's bulk
    /// refill already pulled past the final block boundary are consumed
    /// from its internal buffer rather than silently dropped.
    pub fn read_trailer(&mut self) -> Result<crate::gzip::GzipTrailer> {
        self.bits.align_to_byte();
        let crc32 = self.bits.read_u32_le()?;
        let isize = self.bits.read_u32_le()?;
        Ok(crate::gzip::GzipTrailer { crc32, isize })
    }

    pub fn into_inner(self) -> R {
        self.bits.into_inner()
    }

    fn decode_one_block<W: Write>(&mut self, sink: &mut W) -> Result<()> {
        let is_final = self.bits.read_bit()?;
        let block_type = self.bits.read_bits(2)?;

        match block_type {
            0 => self.decode_stored_block(sink)?,
            1 => {
                let lit = HuffmanDecoder::fixed_literal_length();
                let dist = HuffmanDecoder::fixed_distance();
                self.decode_symbols(sink, &lit, Some(&dist))?;
            }
            2 => self.decode_dynamic_block(sink)?,
            _ => return Err(Error::BadBlock("invalid BTYPE 11")),
        }

        if is_final {
            self.finished = true;
        }
        Ok(())
    }

    fn decode_stored_block<W: Write>(&mut self, sink: &mut W) -> Result<()> {
        self.bits.align_to_byte();
        let len = self.bits.read_u16_le()?;
        let nlen = self.bits.read_u16_le()?;
        if len != !nlen {
            return Err(Error::BadStored { len, nlen });
        }

        for _ in 0..len {
            let byte = self.bits.read_byte()?;
            self.window.output_byte(byte, sink)?;
        }
        Ok(())
    }

    fn decode_dynamic_block<W: Write>(&mut self, sink: &mut W) -> Result<()> {
        let hlit = self.bits.read_bits(5)? as usize + 257;
        let hdist = self.bits.read_bits(5)? as usize + 1;
        let hclen = self.bits.read_bits(4)? as usize + 4;

        if hlit > 286 {
            return Err(Error::BadBlock("HLIT exceeds 286"));
        }
        if hdist > 32 {
            return Err(Error::BadBlock("HDIST exceeds 32"));
        }

        let mut cl_lengths = [0u8; 19];
        for &order_idx in CODE_LENGTH_ORDER.iter().take(hclen) {
            cl_lengths[order_idx] = self.bits.read_bits(3)? as u8;
        }
        let cl_decoder = HuffmanDecoder::from_code_lengths(&cl_lengths)?;

        let total_codes = hlit + hdist;
        let mut all_lengths: Vec<u8> = Vec::with_capacity(total_codes);

        while all_lengths.len() < total_codes {
            let symbol = cl_decoder.decode(&mut self.bits)?;
            match symbol {
                0..=15 => all_lengths.push(symbol as u8),
                16 => {
                    let &prev = all_lengths
                        .last()
                        .ok_or(Error::BadBlock("repeat-previous code-length with no previous code"))?;
                    let repeat = 3 + self.bits.read_bits(2)? as usize;
                    if all_lengths.len() + repeat > total_codes {
                        return Err(Error::BadBlock("code-length run overshoots HLIT+HDIST"));
                    }
                    all_lengths.resize(all_lengths.len() + repeat, prev);
                }
                17 => {
                    let repeat = 3 + self.bits.read_bits(3)? as usize;
                    if all_lengths.len() + repeat > total_codes {
                        return Err(Error::BadBlock("code-length run overshoots HLIT+HDIST"));
                    }
                    all_lengths.resize(all_lengths.len() + repeat, 0);
                }
                18 => {
                    let repeat = 11 + self.bits.read_bits(7)? as usize;
                    if all_lengths.len() + repeat > total_codes {
                        return Err(Error::BadBlock("code-length run overshoots HLIT+HDIST"));
                    }
                    all_lengths.resize(all_lengths.len() + repeat, 0);
                }
                _ => return Err(Error::BadCode("code-length symbol out of range")),
            }
        }

        let literal_lengths = &all_lengths[..hlit];
        let distance_lengths = &all_lengths[hlit..];

        let lit_decoder = HuffmanDecoder::from_code_lengths(literal_lengths)?;
        let dist_decoder = if distance_lengths.iter().all(|&l| l == 0) {
            None
        } else {
            Some(HuffmanDecoder::from_code_lengths(distance_lengths)?)
        };

        self.decode_symbols(sink, &lit_decoder, dist_decoder.as_ref())
    }

    /// The common inflate loop shared by fixed and dynamic blocks: decode
    /// literal/length symbols until EOB, resolving each length/distance
    /// pair into a window copy as soon as it is decoded.
    fn decode_symbols<W: Write>(
        &mut self,
        sink: &mut W,
        lit_decoder: &HuffmanDecoder,
        dist_decoder: Option<&HuffmanDecoder>,
    ) -> Result<()> {
        loop {
            let symbol = lit_decoder.decode(&mut self.bits)?;
            match symbol {
                0..=255 => {
                    self.window.output_byte(symbol as u8, sink)?;
                }
                256 => return Ok(()),
                257..=285 => {
                    let (_, extra_bits) = crate::deflate::tables::LENGTH_TABLE[symbol as usize - 257];
                    let extra = self.bits.read_bits(extra_bits)?;
                    let length = decode_length(symbol, extra)
                        .ok_or(Error::BadCode("length symbol out of range"))?;

                    let dist_decoder =
                        dist_decoder.ok_or(Error::BadCode("length code with no distance code present"))?;
                    let dist_symbol = dist_decoder.decode(&mut self.bits)?;
                    if dist_symbol > 29 {
                        return Err(Error::BadCode("distance symbol out of range"));
                    }
                    let (_, dist_extra_bits) =
                        crate::deflate::tables::DISTANCE_TABLE[dist_symbol as usize];
                    let dist_extra = self.bits.read_bits(dist_extra_bits)?;
                    let distance = decode_distance(dist_symbol, dist_extra)
                        .ok_or(Error::BadCode("distance symbol out of range"))?;

                    self.window.copy(length, distance, sink)?;
                }
                _ => return Err(Error::BadCode("literal/length symbol out of range")),
            }
        }
    }
}
