#![no_main]

use libfuzzer_sys::fuzz_target;
use mgzip::decompress;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    // Only proceed if it looks like it might be gzip.
    if data.len() < 10 || data[0] != 0x1f || data[1] != 0x8b {
        return;
    }

    let mut output = Vec::new();
    // Decoding arbitrary bytes may fail - that's fine. We're looking for
    // panics, not errors, especially in the sliding-window back-reference
    // path where a bad distance must become BadReference, never a crash.
    let _ = decompress(Cursor::new(data), &mut output, true);
});
