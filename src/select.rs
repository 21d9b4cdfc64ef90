use crate::config::CodecConfig;
use crate::ratio::estimate_ratio;
use crate::scale::{sample_scales, ScaleDescriptor};
use crate::segment::segment;
use crate::similarity::{find_clusters_counted, Cluster};
use crate::stats::SelectionStats;
use crate::CodecError;

/// Pipeline output for one candidate scale.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleResult {
    pub scale_index: usize,
    pub segment_size: usize,
    /// Ordered by ascending master offset.
    pub clusters: Vec<Cluster>,
    pub estimated_ratio: f64,
}

struct ScaleRun {
    result: ScaleResult,
    segments: usize,
    comparisons: u64,
}

fn run_scale(data: &[f64], scale: ScaleDescriptor, cfg: &CodecConfig) -> ScaleRun {
    let segments = segment(data, scale.segment_size, cfg);
    let (clusters, comparisons) = find_clusters_counted(&segments, cfg);
    let estimated_ratio = estimate_ratio(&clusters, scale.segment_size);
    tracing::debug!(
        scale = scale.scale_index,
        segment_size = scale.segment_size,
        segments = segments.len(),
        clusters = clusters.len(),
        ratio = estimated_ratio,
        "evaluated scale"
    );
    ScaleRun {
        result: ScaleResult {
            scale_index: scale.scale_index,
            segment_size: scale.segment_size,
            clusters,
            estimated_ratio,
        },
        segments: segments.len(),
        comparisons,
    }
}

#[cfg(feature = "parallel")]
fn run_scales(data: &[f64], scales: &[ScaleDescriptor], cfg: &CodecConfig) -> Vec<ScaleRun> {
    use rayon::prelude::*;
    // Indexed collect keeps scale order.
    scales.par_iter().map(|&s| run_scale(data, s, cfg)).collect()
}

#[cfg(not(feature = "parallel"))]
fn run_scales(data: &[f64], scales: &[ScaleDescriptor], cfg: &CodecConfig) -> Vec<ScaleRun> {
    scales.iter().map(|&s| run_scale(data, s, cfg)).collect()
}

/// Rank every scale that produced at least one cluster, best estimated
/// ratio first. Equal ratios keep ascending scale order.
///
/// Returns `Ok(None)` when no scale yields a cluster and an error when
/// `cfg` is invalid.
pub fn select_patterns(
    data: &[f64],
    cfg: &CodecConfig,
) -> Result<Option<Vec<ScaleResult>>, CodecError> {
    Ok(select_patterns_with_stats(data, cfg)?.0)
}

/// Same as [`select_patterns`], also returning the run's counters.
pub fn select_patterns_with_stats(
    data: &[f64],
    cfg: &CodecConfig,
) -> Result<(Option<Vec<ScaleResult>>, SelectionStats), CodecError> {
    cfg.validate()?;
    let mut stats = SelectionStats::new();
    let scales = sample_scales(data.len(), cfg);

    let mut ranked = Vec::new();
    for run in run_scales(data, &scales, cfg) {
        stats.log_scale(run.segments, run.comparisons, run.result.clusters.len());
        if !run.result.clusters.is_empty() {
            ranked.push(run.result);
        }
    }
    ranked.sort_by(|a, b| {
        b.estimated_ratio
            .partial_cmp(&a.estimated_ratio)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    stats.report();

    if ranked.is_empty() {
        Ok((None, stats))
    } else {
        Ok((Some(ranked), stats))
    }
}
