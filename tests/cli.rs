//! End-to-end tests for the `mgzip`/`mgunzip` binaries, spawned as separate
//! processes against real files in an isolated, self-cleaning directory.

use std::fs;
use std::process::Command;

#[test]
fn test_mgzip_then_mgunzip_roundtrip() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let input_path = dir.path().join("input.txt");
    let original = b"the quick brown fox jumps over the lazy dog\n".repeat(200);
    fs::write(&input_path, &original).unwrap();

    let gzip_status = Command::new(env!("CARGO_BIN_EXE_mgzip"))
        .arg(&input_path)
        .status()
        .expect("failed to run mgzip");
    assert!(gzip_status.success(), "mgzip should exit 0 on success");

    let gz_path = dir.path().join("input.txt.gz");
    assert!(gz_path.exists(), "mgzip should write a .gz file alongside the input");

    let compressed = fs::read(&gz_path).unwrap();
    assert_eq!(&compressed[0..2], &[0x1f, 0x8b], "output must start with the gzip magic");

    fs::remove_file(&input_path).unwrap();

    let gunzip_status = Command::new(env!("CARGO_BIN_EXE_mgunzip"))
        .arg("--verify")
        .arg(&gz_path)
        .status()
        .expect("failed to run mgunzip");
    assert!(gunzip_status.success(), "mgunzip --verify should exit 0 on a well-formed member");

    let decompressed_path = dir.path().join("input.txt");
    let decompressed = fs::read(&decompressed_path).unwrap();
    assert_eq!(decompressed, original);
}

#[test]
fn test_mgunzip_rejects_non_gzip_input() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let bogus_path = dir.path().join("not_a_gzip_file");
    fs::write(&bogus_path, b"this is definitely not a gzip member").unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_mgunzip"))
        .arg(&bogus_path)
        .status()
        .expect("failed to run mgunzip");
    assert!(!status.success(), "mgunzip should exit non-zero on a bad magic number");
}

#[test]
fn test_mgunzip_derives_dot_out_suffix_without_gz_extension() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let input_path = dir.path().join("renamed_member");
    fs::write(&input_path, b"small payload").unwrap();

    // Produce a real gzip member first, then rename it away from `.gz` so
    // mgunzip has to fall back to appending `.out`.
    let gzip_status = Command::new(env!("CARGO_BIN_EXE_mgzip"))
        .arg(&input_path)
        .status()
        .unwrap();
    assert!(gzip_status.success());

    let gz_path = dir.path().join("renamed_member.gz");
    let renamed_path = dir.path().join("renamed_member_nogz");
    fs::rename(&gz_path, &renamed_path).unwrap();

    let gunzip_status =
        Command::new(env!("CARGO_BIN_EXE_mgunzip")).arg(&renamed_path).status().unwrap();
    assert!(gunzip_status.success());

    let out_path = dir.path().join("renamed_member_nogz.out");
    assert!(out_path.exists());
    assert_eq!(fs::read(&out_path).unwrap(), b"small payload");
}
