use crate::similarity::Cluster;

/// Cost of one reference record: master index, offset and correlation,
/// four bytes each.
pub const REFERENCE_COST: usize = 12;

/// Estimate the fraction of the covered data saved by replacing every
/// match with a reference to its master.
///
/// For each cluster the covered size is `S * (1 + matches)` and the stored
/// size is `S + matches * REFERENCE_COST`. The result is derived purely from
/// cluster statistics and is never reconciled with the encoded size.
/// Negative savings are reported as 0.0.
pub fn estimate_ratio(clusters: &[Cluster], segment_size: usize) -> f64 {
    if clusters.is_empty() {
        return 0.0;
    }
    let mut total_original = 0.0f64;
    let mut total_saved = 0.0f64;
    for cluster in clusters {
        let matches = cluster.match_count();
        let original = (segment_size * (1 + matches)) as f64;
        let compressed = (segment_size + matches * REFERENCE_COST) as f64;
        total_original += original;
        total_saved += original - compressed;
    }
    if total_original <= 0.0 {
        return 0.0;
    }
    (total_saved / total_original).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::Segment;
    use crate::similarity::Match;

    fn cluster(size: usize, matches: usize) -> Cluster {
        Cluster {
            master: Segment {
                offset: 0,
                values: vec![0.0; size],
            },
            matches: (0..matches)
                .map(|i| Match {
                    offset: (i + 1) * size,
                    correlation: 1.0,
                })
                .collect(),
        }
    }

    #[test]
    fn empty_is_zero() {
        assert_eq!(estimate_ratio(&[], 40), 0.0);
    }

    #[test]
    fn large_segments_save_space() {
        // 2 * 40 covered, 40 + 12 stored: 28 / 80.
        let r = estimate_ratio(&[cluster(40, 1)], 40);
        assert!((r - 0.35).abs() < 1e-12);
    }

    #[test]
    fn accumulates_across_clusters() {
        // (40*2 - 52) + (40*3 - 64) = 28 + 56 over 80 + 120.
        let r = estimate_ratio(&[cluster(40, 1), cluster(40, 2)], 40);
        assert!((r - 84.0 / 200.0).abs() < 1e-12);
    }

    #[test]
    fn small_segments_never_go_negative() {
        assert_eq!(estimate_ratio(&[cluster(4, 3)], 4), 0.0);
    }
}
