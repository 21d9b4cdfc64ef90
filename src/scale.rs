use crate::config::{CodecConfig, MAX_SCALES};

/// One candidate segment size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleDescriptor {
    /// 1-based scale index; segment size is `len * ratio^scale_index`.
    pub scale_index: usize,
    pub segment_size: usize,
}

/// Enumerate candidate scales for an input of `len` samples.
///
/// Stops at the first scale whose segment size drops below
/// `min_segment_size`, so the list may be shorter than `max_scales`
/// or empty. Never yields more than [`MAX_SCALES`] entries.
pub fn sample_scales(len: usize, cfg: &CodecConfig) -> Vec<ScaleDescriptor> {
    let mut scales = Vec::new();
    let mut factor = 1.0f64;
    for scale_index in 1..=cfg.max_scales.min(MAX_SCALES) {
        factor *= cfg.ratio;
        let segment_size = (len as f64 * factor).floor() as usize;
        if segment_size < cfg.min_segment_size {
            break;
        }
        scales.push(ScaleDescriptor {
            scale_index,
            segment_size,
        });
    }
    scales
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn golden_scales_for_100_samples() {
        let sizes: Vec<usize> = sample_scales(100, &CodecConfig::default())
            .iter()
            .map(|s| s.segment_size)
            .collect();
        assert_eq!(sizes, vec![61, 38, 23, 14, 9, 5]);
    }

    #[test]
    fn too_short_yields_nothing() {
        assert!(sample_scales(6, &CodecConfig::default()).is_empty());
        assert!(sample_scales(0, &CodecConfig::default()).is_empty());
    }

    #[test]
    fn oversized_max_scales_does_not_panic() {
        let cfg = CodecConfig { max_scales: usize::MAX, ..CodecConfig::default() };
        let scales = sample_scales(1_000_000, &cfg);
        assert!(scales.len() <= MAX_SCALES);
        assert!(scales.iter().all(|s| s.segment_size >= cfg.min_segment_size));
    }

    #[test]
    fn capped_at_max_scales() {
        let scales = sample_scales(1_000_000, &CodecConfig::default());
        assert_eq!(scales.len(), 8);
        assert_eq!(scales.last().unwrap().scale_index, 8);
    }
}
