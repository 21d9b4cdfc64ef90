//! Reconstruction quality metrics.
//!
//! - Mean squared error between the original and the decoded sequence
//! - Peak signal-to-noise ratio in decibels, infinite for a perfect decode

use serde::Serialize;

use crate::decode::decode;
use crate::encode::EncodeOutcome;
use crate::CodecError;

/// Quality summary of one encode/decode round trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityReport {
    pub compression_ratio: f64,
    /// `compression_ratio` expressed in percent.
    pub size_saving_percent: f64,
    pub mean_squared_error: f64,
    /// Serialized as `null` when infinite.
    pub peak_signal_to_noise_ratio_db: f64,
    pub selected_scale: usize,
    pub processing_time_ms: f64,
    pub patterns_found: usize,
}

/// MSE = (1/n) * Σ(original_i - decoded_i)²
///
/// Both slices must have the same length.
pub fn mean_squared_error(original: &[f64], decoded: &[f64]) -> f64 {
    debug_assert_eq!(original.len(), decoded.len());
    if original.is_empty() {
        return 0.0;
    }
    original
        .iter()
        .zip(decoded)
        .map(|(o, d)| (o - d).powi(2))
        .sum::<f64>()
        / original.len() as f64
}

/// PSNR = 20 * log10(peak / sqrt(mse)), with `peak` the maximum sample of
/// the original. An original with no positive sample falls back to its
/// largest magnitude. Infinite when `mse` is exactly zero.
pub fn peak_signal_to_noise_ratio(original: &[f64], mse: f64) -> f64 {
    if mse == 0.0 {
        return f64::INFINITY;
    }
    let max = original.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let peak = if max > 0.0 {
        max
    } else {
        original.iter().fold(0.0f64, |acc, v| acc.max(v.abs()))
    };
    20.0 * (peak / mse.sqrt()).log10()
}

/// Decode `outcome` and measure it against `original`.
///
/// `original` must be the sequence that was encoded; a length different
/// from the encoding's declared length is rejected.
pub fn analyze(original: &[f64], outcome: &EncodeOutcome) -> Result<QualityReport, CodecError> {
    let encoding = outcome.encoding().ok_or(CodecError::InvalidDecodeInput)?;
    let expected = encoding.encoded.header.original_length;
    if original.len() != expected {
        return Err(CodecError::LengthMismatch {
            expected,
            actual: original.len(),
        });
    }

    let decoded = decode(outcome)?;
    let mse = mean_squared_error(original, &decoded);
    let psnr = peak_signal_to_noise_ratio(original, mse);
    tracing::debug!(mse, psnr, scale = encoding.selected_scale, "analyzed reconstruction");

    Ok(QualityReport {
        compression_ratio: encoding.compression_ratio,
        size_saving_percent: encoding.compression_ratio * 100.0,
        mean_squared_error: mse,
        peak_signal_to_noise_ratio_db: psnr,
        selected_scale: encoding.selected_scale,
        processing_time_ms: encoding.processing_time_ms,
        patterns_found: encoding.patterns_found,
    })
}
