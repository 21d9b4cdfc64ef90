use std::time::{Duration, Instant};

/// Counters gathered during one pattern selection run.
#[derive(Debug, Clone)]
pub struct SelectionStats {
    start_time: Instant,
    pub scales_sampled: usize,
    pub scales_with_clusters: usize,
    pub segments: usize,
    pub comparisons: u64,
    pub clusters: usize,
}

impl SelectionStats {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            scales_sampled: 0,
            scales_with_clusters: 0,
            segments: 0,
            comparisons: 0,
            clusters: 0,
        }
    }

    pub fn log_scale(&mut self, segments: usize, comparisons: u64, clusters: usize) {
        self.scales_sampled += 1;
        self.segments += segments;
        self.comparisons += comparisons;
        self.clusters += clusters;
        if clusters > 0 {
            self.scales_with_clusters += 1;
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn report(&self) {
        tracing::info!(
            elapsed_ms = self.elapsed().as_secs_f64() * 1000.0,
            scales = self.scales_sampled,
            scales_with_clusters = self.scales_with_clusters,
            segments = self.segments,
            comparisons = self.comparisons,
            clusters = self.clusters,
            "pattern selection finished"
        );
    }
}

impl Default for SelectionStats {
    fn default() -> Self {
        Self::new()
    }
}
