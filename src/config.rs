use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::CodecError;

/// Inverse of the golden ratio, `1 / φ`.
pub const INV_PHI: f64 = 0.618_033_988_749_894_9;
/// Upper bound on `max_scales`; `ratio^k` shrinks any realistic input
/// below the minimum segment size long before this.
pub const MAX_SCALES: usize = 64;

/// Runtime parameters for every stage of the codec.
///
/// Passed by reference into each call; nothing in the crate reads
/// process-wide constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Geometric ratio used both for scale sizes and window steps.
    pub ratio: f64,
    /// Two segments match when their correlation exceeds `1 - correlation_threshold`.
    pub correlation_threshold: f64,
    /// Maximum number of scales sampled.
    pub max_scales: usize,
    /// Smallest segment size worth correlating.
    pub min_segment_size: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            ratio: INV_PHI,
            correlation_threshold: 0.01,
            max_scales: 8,
            min_segment_size: 4,
        }
    }
}

impl CodecConfig {
    /// Minimum correlation a pair must strictly exceed to be recorded as a match.
    pub fn match_floor(&self) -> f64 {
        1.0 - self.correlation_threshold
    }

    pub fn validate(&self) -> Result<(), CodecError> {
        if !(self.ratio > 0.0 && self.ratio < 1.0) {
            return Err(CodecError::Config(format!(
                "ratio must lie in (0, 1), got {}",
                self.ratio
            )));
        }
        if !(0.0..1.0).contains(&self.correlation_threshold) {
            return Err(CodecError::Config(format!(
                "correlation_threshold must lie in [0, 1), got {}",
                self.correlation_threshold
            )));
        }
        if self.max_scales == 0 || self.max_scales > MAX_SCALES {
            return Err(CodecError::Config(format!(
                "max_scales must lie in 1..={MAX_SCALES}, got {}",
                self.max_scales
            )));
        }
        if self.min_segment_size < 2 {
            return Err(CodecError::Config(format!(
                "min_segment_size must be at least 2, got {}",
                self.min_segment_size
            )));
        }
        Ok(())
    }

    /// Load a JSON config file. Missing fields take their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, CodecError> {
        let text = fs::read_to_string(path)?;
        let cfg: CodecConfig =
            serde_json::from_str(&text).map_err(|e| CodecError::Serialization(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = CodecConfig::default();
        assert!(cfg.validate().is_ok());
        assert!((cfg.match_floor() - 0.99).abs() < 1e-12);
    }

    #[test]
    fn rejects_out_of_range_ratio() {
        let cfg = CodecConfig { ratio: 1.0, ..CodecConfig::default() };
        assert!(matches!(cfg.validate(), Err(CodecError::Config(_))));
    }

    #[test]
    fn rejects_unbounded_max_scales() {
        let cfg: CodecConfig =
            serde_json::from_str(r#"{"max_scales": 18446744073709551615}"#).unwrap();
        assert!(matches!(cfg.validate(), Err(CodecError::Config(_))));
        let cfg = CodecConfig { max_scales: MAX_SCALES, ..CodecConfig::default() };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_json_uses_defaults() {
        let cfg: CodecConfig = serde_json::from_str(r#"{"max_scales": 3}"#).unwrap();
        assert_eq!(cfg.max_scales, 3);
        assert_eq!(cfg.min_segment_size, 4);
    }
}
