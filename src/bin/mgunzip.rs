//! `mgunzip` — decompress a single gzip member back to its original bytes.

use clap::Parser;
use log::{error, info};
use mgzip::decompress;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "mgunzip", about = "Decompress a file written by a minimal gzip encoder")]
struct Args {
    /// File to decompress, typically ending in `.gz`.
    input: PathBuf,

    /// Verify the trailer's CRC-32 and ISIZE against the decompressed bytes.
    #[arg(long)]
    verify: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("mgunzip: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> mgzip::Result<()> {
    let output_path = match args.input.extension().and_then(|e| e.to_str()) {
        Some("gz") => args.input.with_extension(""),
        _ => {
            let mut p = args.input.clone().into_os_string();
            p.push(".out");
            PathBuf::from(p)
        }
    };

    let input = BufReader::new(File::open(&args.input)?);
    let output = BufWriter::new(File::create(&output_path)?);

    let stats = decompress(input, output, args.verify)?;
    info!("mgunzip: wrote {} ({} bytes)", output_path.display(), stats.output_bytes);
    Ok(())
}
