#![no_main]

use flate2::write::GzEncoder;
use flate2::Compression;
use libfuzzer_sys::fuzz_target;
use mgzip::decompress;
use std::io::{Cursor, Write};

fuzz_target!(|data: &[u8]| {
    // Compress arbitrary data with an external reference encoder, then feed
    // the result through our own decoder: it must accept every block type
    // flate2 might choose (stored, fixed, or dynamic) and reproduce the
    // input exactly.
    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    if encoder.write_all(data).is_err() {
        return;
    }
    let Ok(gzip_data) = encoder.finish() else { return };

    let mut decompressed = Vec::new();
    decompress(Cursor::new(gzip_data), &mut decompressed, true)
        .expect("must decode flate2-produced gzip");
    assert_eq!(decompressed, data);
});
