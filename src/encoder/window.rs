use crate::error::Result;
use std::io::Read;

/// Window size: 4 KiB, half of the buffer the match finder searches.
pub const WSIZE: usize = 4096;
/// Hash table size: 2^11 buckets over a 3-byte hash.
const HASH_SIZE: usize = 2048;
const HASH_MASK: u32 = (HASH_SIZE as u32) - 1;

pub const MIN_MATCH: usize = 3;
pub const MAX_MATCH: usize = 258;
/// Refill once free lookahead drops below this; guarantees a full
/// `MAX_MATCH`-byte scan is always possible plus one byte of slack.
const MIN_LOOKAHEAD: usize = MAX_MATCH + MIN_MATCH + 1;
/// Longest hash chain the match finder will walk before giving up on a
/// better match; a throughput/ratio knob, not a correctness one.
const CHAIN_LENGTH: u32 = 128;

/// 4 KiB sliding window plus hashed match finder, faithful to the
/// 2.11BSD `gzip.c` encoder's `longest_match`/`fill_window`: `window` is
/// `2*WSIZE` bytes so a full window of history remains behind the
/// lookahead after a slide, `hash_head`/`prev` form a singly linked
/// chain per 3-byte hash bucket (most recent insertion first).
pub struct EncoderWindow<R: Read> {
    reader: R,
    window: Box<[u8]>,
    wpos: usize,
    lookahead: usize,
    match_start: usize,
    match_length: usize,
    hash_head: Box<[u32; HASH_SIZE]>,
    prev: Box<[u32; WSIZE]>,
    eof: bool,
}

impl<R: Read> EncoderWindow<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            window: vec![0u8; WSIZE * 2].into_boxed_slice(),
            wpos: 0,
            lookahead: 0,
            match_start: 0,
            match_length: 0,
            hash_head: Box::new([0u32; HASH_SIZE]),
            prev: Box::new([0u32; WSIZE]),
            eof: false,
        }
    }

    /// Current match length found by the last successful [`find_match`] call.
    pub fn match_length(&self) -> usize {
        self.match_length
    }

    /// Byte at the current window position, valid whenever `lookahead > 0`.
    pub fn current_byte(&self) -> u8 {
        self.window[self.wpos]
    }

    pub fn lookahead(&self) -> usize {
        self.lookahead
    }

    pub fn wpos(&self) -> usize {
        self.wpos
    }

    pub fn match_start(&self) -> usize {
        self.match_start
    }

    fn hash(&self, pos: usize) -> usize {
        let p = &self.window[pos..pos + 3];
        (((p[0] as u32) << 10) ^ ((p[1] as u32) << 5) ^ (p[2] as u32)) as usize & HASH_MASK as usize
    }

    /// Insert the 3-byte string at `wpos` into the hash chain, if there's
    /// enough lookahead left to hash it.
    pub fn insert_string(&mut self) {
        if self.lookahead < MIN_MATCH {
            return;
        }
        let h = self.hash(self.wpos);
        self.prev[self.wpos % WSIZE] = self.hash_head[h];
        self.hash_head[h] = self.wpos as u32;
    }

    /// Search the hash chain at `wpos` for the longest match. Returns
    /// `true` iff the best match is at least `MIN_MATCH` long; the match
    /// itself is left in `match_start`/`match_length`.
    pub fn find_match(&mut self) -> bool {
        self.match_length = 0;
        if self.lookahead < MIN_MATCH {
            return false;
        }

        let wpos = self.wpos;
        let limit = wpos.saturating_sub(WSIZE);
        let max_len = self.lookahead.min(MAX_MATCH);

        let mut best_len = 0usize;
        let mut cur_match = self.hash_head[self.hash(wpos)] as usize;
        let mut chain_length = CHAIN_LENGTH;

        while cur_match as i64 >= limit as i64 && chain_length > 0 {
            chain_length -= 1;

            if cur_match >= wpos {
                cur_match = self.prev[cur_match % WSIZE] as usize;
                continue;
            }

            let fast_reject = self.window[cur_match + best_len] != self.window[wpos + best_len]
                || self.window[cur_match] != self.window[wpos];

            if !fast_reject {
                let mut len = 0;
                while len < max_len && self.window[wpos + len] == self.window[cur_match + len] {
                    len += 1;
                }

                if len > best_len {
                    best_len = len;
                    self.match_start = cur_match;
                    if len >= MAX_MATCH {
                        break;
                    }
                }
            }

            cur_match = self.prev[cur_match % WSIZE] as usize;
        }

        self.match_length = best_len;
        best_len >= MIN_MATCH
    }

    /// Advance the window by one byte: drop it from the lookahead, move
    /// `wpos` forward. Does not touch the hash table; callers insert
    /// explicitly via [`insert_string`] so literals and the interior of a
    /// match can choose when to pay that cost, matching the original's
    /// per-step insert-then-advance loop.
    pub fn advance(&mut self) {
        self.wpos += 1;
        self.lookahead -= 1;
    }

    /// Top up the lookahead buffer, sliding the window down by `WSIZE` and
    /// clearing the hash table when the upper half fills up. Clearing on
    /// slide (rather than rewriting every stored position by `-WSIZE`) is
    /// a deliberate ratio/throughput tradeoff.
    pub fn fill_window(&mut self) -> Result<()> {
        loop {
            let mut more = (WSIZE * 2).saturating_sub(self.lookahead + self.wpos);

            if more == 0 && self.wpos >= WSIZE {
                self.window.copy_within(WSIZE..WSIZE * 2, 0);
                self.match_start = self.match_start.saturating_sub(WSIZE);
                self.wpos -= WSIZE;
                self.hash_head.fill(0);
                more = (WSIZE * 2).saturating_sub(self.lookahead + self.wpos);
            }

            if more == 0 {
                break;
            }

            if self.eof {
                break;
            }

            let n = self.reader.read(&mut self.window[self.wpos + self.lookahead..][..more])?;
            if n == 0 {
                self.eof = true;
                break;
            }
            self.lookahead += n;

            if self.lookahead >= MIN_LOOKAHEAD {
                break;
            }
        }
        Ok(())
    }
}
