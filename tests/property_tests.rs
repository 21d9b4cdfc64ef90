use phicodec::{
    analyze, encode, estimate_ratio, find_clusters, pearson_correlation, sample_scales, segment,
    select_patterns, CodecConfig,
};
use proptest::prelude::*;
use quickcheck::quickcheck;

fn periodic(period: usize, len: usize, amplitude: f64, noise: &[f64]) -> Vec<f64> {
    (0..len)
        .map(|i| {
            let phase = 2.0 * std::f64::consts::PI * (i % period) as f64 / period as f64;
            amplitude * phase.sin() + noise[i % noise.len()]
        })
        .collect()
}

proptest! {
    #[test]
    fn match_correlations_within_bound(
        period in 5usize..20,
        len in 40usize..160,
        noise in proptest::collection::vec(-0.2f64..0.2, 1..9),
    ) {
        let cfg = CodecConfig::default();
        let data = periodic(period, len, 10.0, &noise);
        for scale in sample_scales(data.len(), &cfg) {
            let segs = segment(&data, scale.segment_size, &cfg);
            for cluster in find_clusters(&segs, &cfg) {
                prop_assert!(!cluster.matches.is_empty());
                for m in &cluster.matches {
                    prop_assert!(m.correlation > 0.99 && m.correlation <= 1.0);
                    prop_assert!(m.offset > cluster.master.offset);
                }
            }
        }
    }

    #[test]
    fn ranked_ratios_non_negative_and_sorted(
        period in 5usize..20,
        len in 40usize..160,
        noise in proptest::collection::vec(-0.2f64..0.2, 1..9),
    ) {
        let data = periodic(period, len, 10.0, &noise);
        if let Some(ranked) = select_patterns(&data, &CodecConfig::default()).unwrap() {
            prop_assert!(!ranked.is_empty());
            for pair in ranked.windows(2) {
                prop_assert!(pair[0].estimated_ratio >= pair[1].estimated_ratio);
            }
            for r in &ranked {
                prop_assert!(r.estimated_ratio >= 0.0);
                prop_assert!(!r.clusters.is_empty());
                prop_assert_eq!(estimate_ratio(&r.clusters, r.segment_size), r.estimated_ratio);
            }
        }
    }

    #[test]
    fn psnr_follows_mse(
        period in 6usize..16,
        len in 60usize..140,
        noise in proptest::collection::vec(-0.3f64..0.3, 2..9),
        alt_ratio in 0.3f64..0.7,
    ) {
        let data = periodic(period, len, 10.0, &noise);
        let a = encode(&data, &CodecConfig::default()).unwrap();
        let b = encode(&data, &CodecConfig { ratio: alt_ratio, ..CodecConfig::default() }).unwrap();
        if a.is_success() && b.is_success() {
            let ra = analyze(&data, &a).unwrap();
            let rb = analyze(&data, &b).unwrap();
            if ra.mean_squared_error < rb.mean_squared_error {
                prop_assert!(ra.peak_signal_to_noise_ratio_db >= rb.peak_signal_to_noise_ratio_db);
            } else if rb.mean_squared_error < ra.mean_squared_error {
                prop_assert!(rb.peak_signal_to_noise_ratio_db >= ra.peak_signal_to_noise_ratio_db);
            }
        }
    }

    #[test]
    fn scales_shrink_and_respect_minimum(len in 0usize..5000) {
        let cfg = CodecConfig::default();
        let scales = sample_scales(len, &cfg);
        prop_assert!(scales.len() <= cfg.max_scales);
        for (i, s) in scales.iter().enumerate() {
            prop_assert_eq!(s.scale_index, i + 1);
            prop_assert!(s.segment_size >= cfg.min_segment_size);
        }
        for pair in scales.windows(2) {
            prop_assert!(pair[1].segment_size < pair[0].segment_size);
        }
    }

    #[test]
    fn segments_are_full_windows(
        data in proptest::collection::vec(-10.0f64..10.0, 0..120),
        size in 1usize..40,
    ) {
        let cfg = CodecConfig::default();
        for seg in segment(&data, size, &cfg) {
            prop_assert_eq!(seg.len(), size);
            prop_assert!(seg.offset + size <= data.len());
            prop_assert_eq!(&seg.values[..], &data[seg.offset..seg.offset + size]);
        }
    }
}

quickcheck! {
    fn correlation_is_symmetric(a: Vec<i16>, b: Vec<i16>) -> bool {
        let n = a.len().min(b.len());
        let x: Vec<f64> = a[..n].iter().map(|&v| v as f64).collect();
        let y: Vec<f64> = b[..n].iter().map(|&v| v as f64).collect();
        let r1 = pearson_correlation(&x, &y);
        let r2 = pearson_correlation(&y, &x);
        (r1 - r2).abs() < 1e-9 && (-1.0..=1.0).contains(&r1) && !r1.is_nan()
    }
}
