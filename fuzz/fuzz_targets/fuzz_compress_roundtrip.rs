#![no_main]

use libfuzzer_sys::fuzz_target;
use mgzip::{compress, decompress};
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    let mut compressed = Vec::new();
    if compress(Cursor::new(data), &mut compressed, "fuzz").is_err() {
        return;
    }

    let mut decompressed = Vec::new();
    decompress(Cursor::new(compressed), &mut decompressed, true)
        .expect("our own output must always decode");
    assert_eq!(decompressed, data, "round-trip mismatch");
});
