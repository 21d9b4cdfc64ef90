use serde::{Deserialize, Serialize};

use crate::config::CodecConfig;

/// Value-owning window of the input sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Starting offset in the source sequence.
    pub offset: usize,
    /// Copy of `data[offset..offset + len]`.
    pub values: Vec<f64>,
}

impl Segment {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Window advance for a segment size: `floor(size * ratio)`, never zero.
pub fn window_step(segment_size: usize, cfg: &CodecConfig) -> usize {
    ((segment_size as f64 * cfg.ratio).floor() as usize).max(1)
}

/// Slice `data` into overlapping windows of `segment_size` samples.
///
/// Windows start at `0, step, 2 * step, ...` and only full windows are
/// emitted.
pub fn segment(data: &[f64], segment_size: usize, cfg: &CodecConfig) -> Vec<Segment> {
    if segment_size == 0 || segment_size > data.len() {
        return Vec::new();
    }
    let step = window_step(segment_size, cfg);
    (0..=data.len() - segment_size)
        .step_by(step)
        .map(|offset| Segment {
            offset,
            values: data[offset..offset + segment_size].to_vec(),
        })
        .collect()
}
