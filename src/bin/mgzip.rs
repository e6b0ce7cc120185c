//! `mgzip` — compress a single file into a gzip member.
//!
//! Mirrors the original `gzip(1)`'s single-purpose compressor rather than
//! a one-binary-many-modes layout: the 2.11BSD source ships `gzip.c` and
//! `gunzip.c` as two programs, so this crate does too.

use clap::Parser;
use log::{error, info};
use mgzip::compress;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "mgzip", about = "Compress a file with a minimal gzip encoder")]
struct Args {
    /// File to compress. Output is written alongside it with a `.gz` suffix.
    input: PathBuf,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("mgzip: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> mgzip::Result<()> {
    let basename = args
        .input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let output_path = {
        let mut p = args.input.clone().into_os_string();
        p.push(".gz");
        PathBuf::from(p)
    };

    let input = BufReader::new(File::open(&args.input)?);
    let output = BufWriter::new(File::create(&output_path)?);

    let stats = compress(input, output, &basename)?;
    info!(
        "mgzip: wrote {} ({} -> {} bytes)",
        output_path.display(),
        stats.input_bytes,
        stats.output_bytes
    );
    Ok(())
}
