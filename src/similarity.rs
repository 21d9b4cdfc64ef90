use serde::{Deserialize, Serialize};

use crate::config::CodecConfig;
use crate::segment::Segment;

/// A later window whose content correlates with a cluster master.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub offset: usize,
    /// Pearson correlation with the master, in `(1 - threshold, 1.0]`.
    pub correlation: f64,
}

/// One master segment plus every later segment that correlates with it.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    pub master: Segment,
    /// Ordered by ascending offset. Never contains the master's own offset.
    pub matches: Vec<Match>,
}

impl Cluster {
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }
}

/// Pearson correlation coefficient of two equal-length vectors.
///
/// Returns 0.0 when either side has zero variance or the lengths differ.
/// The result is clamped to `[-1, 1]` so rounding never reports a
/// correlation above one.
pub fn pearson_correlation(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let n = a.len() as f64;
    let mean_a = a.iter().sum::<f64>() / n;
    let mean_b = b.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (x, y) in a.iter().zip(b) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    let denom = (var_a * var_b).sqrt();
    if denom == 0.0 || !denom.is_finite() {
        return 0.0;
    }
    (cov / denom).clamp(-1.0, 1.0)
}

/// Group segments into clusters by pairwise correlation.
///
/// Each segment is compared only against later segments. A segment
/// becomes a master when at least one later segment correlates above
/// the configured floor; clusters come out ordered by master offset.
pub fn find_clusters(segments: &[Segment], cfg: &CodecConfig) -> Vec<Cluster> {
    find_clusters_counted(segments, cfg).0
}

/// Same as [`find_clusters`], also returning the number of correlations computed.
pub fn find_clusters_counted(segments: &[Segment], cfg: &CodecConfig) -> (Vec<Cluster>, u64) {
    let floor = cfg.match_floor();
    let mut clusters = Vec::new();
    let mut comparisons = 0u64;

    for (i, master) in segments.iter().enumerate() {
        let mut matches = Vec::new();
        for candidate in &segments[i + 1..] {
            comparisons += 1;
            let correlation = pearson_correlation(&master.values, &candidate.values);
            if correlation > floor {
                matches.push(Match {
                    offset: candidate.offset,
                    correlation,
                });
            }
        }
        if !matches.is_empty() {
            clusters.push(Cluster {
                master: master.clone(),
                matches,
            });
        }
    }

    (clusters, comparisons)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_vectors_correlate_fully() {
        let a = [1.0, 2.0, 4.0, 8.0];
        assert!((pearson_correlation(&a, &a) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn affine_copies_correlate_fully() {
        let a = [1.0, 2.0, 4.0, 8.0];
        let b: Vec<f64> = a.iter().map(|v| 3.0 * v - 7.0).collect();
        assert!(pearson_correlation(&a, &b) > 0.999_999);
    }

    #[test]
    fn inverted_vectors_anticorrelate() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [4.0, 3.0, 2.0, 1.0];
        assert!((pearson_correlation(&a, &b) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn flat_vector_is_zero_not_nan() {
        let flat = [5.0; 6];
        let ramp = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        assert_eq!(pearson_correlation(&flat, &ramp), 0.0);
        assert_eq!(pearson_correlation(&flat, &flat), 0.0);
    }

    #[test]
    fn mismatched_lengths_are_zero() {
        assert_eq!(pearson_correlation(&[1.0, 2.0], &[1.0, 2.0, 3.0]), 0.0);
    }

    #[test]
    fn master_never_matches_itself() {
        let seg = |offset| Segment {
            offset,
            values: vec![1.0, 3.0, 2.0, 5.0],
        };
        let clusters = find_clusters(&[seg(0), seg(2), seg(4)], &CodecConfig::default());
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].master.offset, 0);
        let offsets: Vec<usize> = clusters[0].matches.iter().map(|m| m.offset).collect();
        assert_eq!(offsets, vec![2, 4]);
        assert_eq!(clusters[1].master.offset, 2);
        assert!(clusters
            .iter()
            .all(|c| c.matches.iter().all(|m| m.offset != c.master.offset)));
    }
}
