use clap::Parser;
use std::fs::File;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use phicodec::{
    container::{payload_digest, write_container},
    encode,
    io_utils::{codec_cli_error, io_cli_error, simple_cli_error},
    series::read_series_csv,
    CodecConfig, EncodeOutcome,
};

/// Encode a CSV sequence into a .phic container.
#[derive(Parser)]
struct Args {
    /// Input CSV file, one sample per row
    input: PathBuf,
    /// Output .phic file
    output: PathBuf,
    /// JSON file overriding codec parameters
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    init_tracing();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

fn run() -> Result<i32, Box<dyn std::error::Error>> {
    let args = Args::parse();
    let cfg = match &args.config {
        Some(path) => CodecConfig::from_json_file(path)
            .map_err(|e| codec_cli_error("loading config", e))?,
        None => CodecConfig::default(),
    };

    let file = File::open(&args.input)
        .map_err(|e| io_cli_error("reading input file", &args.input, e))?;
    let samples = read_series_csv(file).map_err(|e| codec_cli_error("parsing input", e))?;
    let outcome = encode(&samples, &cfg).map_err(|e| codec_cli_error("encoding failed", e))?;

    let encoding = match outcome {
        EncodeOutcome::Encoded(encoding) => encoding,
        EncodeOutcome::NoPattern(report) => {
            eprintln!("{}; nothing written", report.message);
            return Ok(2);
        }
    };

    let bytes = write_container(&encoding.encoded).map_err(|e| codec_cli_error("serializing", e))?;
    std::fs::write(&args.output, &bytes)
        .map_err(|e| io_cli_error("writing output file", &args.output, e))?;

    if args.json {
        let out_json = serde_json::json!({
            "samples": samples.len(),
            "original_size": encoding.original_size,
            "compressed_size": encoding.compressed_size,
            "container_bytes": bytes.len(),
            "compression_ratio": encoding.compression_ratio,
            "patterns_found": encoding.patterns_found,
            "selected_scale": encoding.selected_scale,
            "processing_time_ms": encoding.processing_time_ms,
            "payload_sha256": payload_digest(&bytes),
        });
        let text = serde_json::to_string_pretty(&out_json)
            .map_err(|e| simple_cli_error(&format!("json output failed: {e}")))?;
        println!("{text}");
    } else {
        println!(
            "Encoded {} samples at scale {} (segment {}): {} masters, {} references, {} residuals",
            samples.len(),
            encoding.selected_scale,
            encoding.encoded.header.segment_size,
            encoding.encoded.masters.len(),
            encoding.encoded.references.len(),
            encoding.encoded.residuals.len(),
        );
        println!(
            "Estimated ratio {:.2}% | {} -> {} bytes | {} patterns | {:.2} ms",
            encoding.compression_ratio * 100.0,
            encoding.original_size,
            encoding.compressed_size,
            encoding.patterns_found,
            encoding.processing_time_ms,
        );
        println!("payload sha256 {}", payload_digest(&bytes));
    }
    Ok(0)
}
