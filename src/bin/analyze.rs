use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use phicodec::{
    analyze, encode,
    io_utils::{codec_cli_error, io_cli_error, simple_cli_error},
    series::read_series_csv,
    CodecConfig, EncodeOutcome,
};

/// Encode each CSV sequence and report reconstruction quality.
#[derive(Parser)]
struct Args {
    /// Input CSV files, one sample per row
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
    /// JSON file overriding codec parameters
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print one JSON object per input
    #[arg(long)]
    json: bool,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let cfg = match &args.config {
        Some(path) => CodecConfig::from_json_file(path)
            .map_err(|e| codec_cli_error("loading config", e))?,
        None => CodecConfig::default(),
    };

    let pb = ProgressBar::new(args.inputs.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
            .map_err(|e| simple_cli_error(&format!("progress style: {e}")))?,
    );

    for path in &args.inputs {
        pb.set_message(path.display().to_string());
        let file = File::open(path).map_err(|e| io_cli_error("reading input file", path, e))?;
        let samples = read_series_csv(file).map_err(|e| codec_cli_error("parsing input", e))?;
        let outcome = encode(&samples, &cfg).map_err(|e| codec_cli_error("encoding failed", e))?;

        match &outcome {
            EncodeOutcome::NoPattern(report) => {
                pb.suspend(|| println!("{}: {}", path.display(), report.message));
            }
            EncodeOutcome::Encoded(_) => {
                let report =
                    analyze(&samples, &outcome).map_err(|e| codec_cli_error("analysis failed", e))?;
                let line = if args.json {
                    let mut value = serde_json::to_value(&report)
                        .map_err(|e| simple_cli_error(&format!("json output failed: {e}")))?;
                    value["input"] = serde_json::Value::String(path.display().to_string());
                    value.to_string()
                } else {
                    format!(
                        "{}: scale {} | saving {:.2}% | MSE {:.6} | PSNR {:.2} dB | {} patterns \
                         | {:.2} ms",
                        path.display(),
                        report.selected_scale,
                        report.size_saving_percent,
                        report.mean_squared_error,
                        report.peak_signal_to_noise_ratio_db,
                        report.patterns_found,
                        report.processing_time_ms,
                    )
                };
                pb.suspend(|| println!("{line}"));
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();
    Ok(())
}
