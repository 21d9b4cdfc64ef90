use clap::Parser;
use std::fs::File;
use std::path::PathBuf;

use phicodec::{
    decode_structure,
    io_utils::{codec_cli_error, extension_error, has_extension, io_cli_error},
    read_container,
    series::write_series_csv,
};

/// Decode a .phic container back into a CSV sequence.
#[derive(Parser)]
struct Args {
    /// Input .phic file
    input: PathBuf,
    /// Output CSV file
    output: PathBuf,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    if !has_extension(&args.input, "phic") {
        return Err(extension_error(&args.input, "phic").into());
    }
    let data =
        std::fs::read(&args.input).map_err(|e| io_cli_error("reading input file", &args.input, e))?;
    let encoded = read_container(&data).map_err(|e| codec_cli_error("decoding failed", e))?;
    let samples = decode_structure(&encoded);
    let file = File::create(&args.output)
        .map_err(|e| io_cli_error("writing output file", &args.output, e))?;
    write_series_csv(file, &samples).map_err(|e| codec_cli_error("writing samples", e))?;
    Ok(())
}
