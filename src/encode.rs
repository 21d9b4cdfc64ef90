use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::config::CodecConfig;
use crate::ratio::REFERENCE_COST;
use crate::select::{select_patterns_with_stats, ScaleResult};
use crate::CodecError;

/// Bytes charged per stored numeric field or sample.
pub const FIELD_COST: usize = 4;
/// Header: segment size, scale index, original length.
pub const HEADER_COST: usize = 3 * FIELD_COST;
/// Residual: offset and raw value.
pub const RESIDUAL_COST: usize = 2 * FIELD_COST;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedHeader {
    pub segment_size: usize,
    pub scale_index: usize,
    pub original_length: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasterRecord {
    /// Index of the cluster this master came from.
    pub cluster_index: usize,
    pub offset: usize,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRecord {
    /// Index into [`EncodedStructure::masters`].
    pub master_index: usize,
    /// Target offset receiving a copy of the master's values.
    pub offset: usize,
    pub correlation: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResidualRecord {
    pub offset: usize,
    pub value: f64,
}

/// Compact representation of one encoded sequence.
///
/// Every offset below `header.original_length` is reachable from at least
/// one master, reference or residual. Overlaps resolve in decode order:
/// masters, then references, then residuals, later writes winning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedStructure {
    pub header: EncodedHeader,
    pub masters: Vec<MasterRecord>,
    pub references: Vec<ReferenceRecord>,
    pub residuals: Vec<ResidualRecord>,
}

impl EncodedStructure {
    /// Estimated persisted size in bytes.
    pub fn encoded_size(&self) -> usize {
        HEADER_COST
            + self
                .masters
                .iter()
                .map(|m| 2 * FIELD_COST + m.values.len() * FIELD_COST)
                .sum::<usize>()
            + self.references.len() * REFERENCE_COST
            + self.residuals.len() * RESIDUAL_COST
    }
}

/// Successful encode.
#[derive(Debug, Clone, PartialEq)]
pub struct Encoding {
    pub encoded: EncodedStructure,
    /// Input size in bytes, `FIELD_COST` per sample.
    pub original_size: usize,
    /// Estimated encoded size in bytes.
    pub compressed_size: usize,
    /// Estimated ratio of the selected scale at selection time.
    pub compression_ratio: f64,
    /// Number of scales that produced at least one cluster.
    pub patterns_found: usize,
    pub selected_scale: usize,
    pub processing_time_ms: f64,
}

/// Encode result when no scale produced a cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct NoPatternReport {
    pub message: String,
    pub original_size: usize,
    /// Always equal to `original_size`.
    pub compressed_size: usize,
    /// Always 0.0.
    pub compression_ratio: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EncodeOutcome {
    Encoded(Encoding),
    NoPattern(NoPatternReport),
}

impl EncodeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, EncodeOutcome::Encoded(_))
    }

    pub fn encoding(&self) -> Option<&Encoding> {
        match self {
            EncodeOutcome::Encoded(e) => Some(e),
            EncodeOutcome::NoPattern(_) => None,
        }
    }

    pub fn original_size(&self) -> usize {
        match self {
            EncodeOutcome::Encoded(e) => e.original_size,
            EncodeOutcome::NoPattern(r) => r.original_size,
        }
    }

    pub fn compressed_size(&self) -> usize {
        match self {
            EncodeOutcome::Encoded(e) => e.compressed_size,
            EncodeOutcome::NoPattern(r) => r.compressed_size,
        }
    }

    pub fn compression_ratio(&self) -> f64 {
        match self {
            EncodeOutcome::Encoded(e) => e.compression_ratio,
            EncodeOutcome::NoPattern(r) => r.compression_ratio,
        }
    }
}

/// Reject inputs the correlation math cannot handle.
pub fn validate_input(data: &[f64], cfg: &CodecConfig) -> Result<(), CodecError> {
    cfg.validate()?;
    if data.len() < cfg.min_segment_size {
        return Err(CodecError::InvalidInput(format!(
            "sequence of {} samples is shorter than the minimum segment size {}",
            data.len(),
            cfg.min_segment_size
        )));
    }
    if let Some(pos) = data.iter().position(|v| !v.is_finite()) {
        return Err(CodecError::InvalidInput(format!(
            "non-finite sample {} at offset {}",
            data[pos], pos
        )));
    }
    Ok(())
}

/// Materialize a scale's clusters into an [`EncodedStructure`].
pub fn build_structure(data: &[f64], chosen: &ScaleResult) -> EncodedStructure {
    let len = data.len();
    let mut covered = vec![false; len];
    let mut mark = |offset: usize, width: usize| {
        let end = offset.saturating_add(width).min(len);
        if offset < end {
            covered[offset..end].iter_mut().for_each(|c| *c = true);
        }
    };

    let mut masters = Vec::with_capacity(chosen.clusters.len());
    let mut references = Vec::new();
    for (cluster_index, cluster) in chosen.clusters.iter().enumerate() {
        let master_index = masters.len();
        mark(cluster.master.offset, cluster.master.len());
        masters.push(MasterRecord {
            cluster_index,
            offset: cluster.master.offset,
            values: cluster.master.values.clone(),
        });
        for m in &cluster.matches {
            mark(m.offset, cluster.master.len());
            references.push(ReferenceRecord {
                master_index,
                offset: m.offset,
                correlation: m.correlation,
            });
        }
    }

    let residuals = covered
        .iter()
        .enumerate()
        .filter(|&(_, &c)| !c)
        .map(|(offset, _)| ResidualRecord {
            offset,
            value: data[offset],
        })
        .collect();

    EncodedStructure {
        header: EncodedHeader {
            segment_size: chosen.segment_size,
            scale_index: chosen.scale_index,
            original_length: len,
        },
        masters,
        references,
        residuals,
    }
}

/// Encode a sequence with the best-ranked self-similar scale.
///
/// Returns `Ok(EncodeOutcome::NoPattern(_))` when no scale yields a
/// cluster; errors are reserved for invalid input or configuration.
#[tracing::instrument(level = "debug", skip(data, cfg), fields(len = data.len()))]
pub fn encode(data: &[f64], cfg: &CodecConfig) -> Result<EncodeOutcome, CodecError> {
    let start = Instant::now();
    validate_input(data, cfg)?;
    let original_size = data.len() * FIELD_COST;

    let (ranked, _stats) = select_patterns_with_stats(data, cfg)?;
    let ranked = match ranked {
        Some(r) => r,
        None => {
            tracing::warn!(len = data.len(), "no self-similar pattern found");
            return Ok(EncodeOutcome::NoPattern(NoPatternReport {
                message: "no suitable pattern found at any sampled scale".into(),
                original_size,
                compressed_size: original_size,
                compression_ratio: 0.0,
            }));
        }
    };

    let chosen = &ranked[0];
    let encoded = build_structure(data, chosen);
    let compressed_size = encoded.encoded_size();
    let processing_time_ms = start.elapsed().as_secs_f64() * 1000.0;

    tracing::info!(
        ratio = chosen.estimated_ratio,
        patterns = ranked.len(),
        scale = chosen.scale_index,
        masters = encoded.masters.len(),
        references = encoded.references.len(),
        residuals = encoded.residuals.len(),
        elapsed_ms = processing_time_ms,
        "encode complete"
    );

    Ok(EncodeOutcome::Encoded(Encoding {
        original_size,
        compressed_size,
        compression_ratio: chosen.estimated_ratio,
        patterns_found: ranked.len(),
        selected_scale: chosen.scale_index,
        processing_time_ms,
        encoded,
    }))
}
