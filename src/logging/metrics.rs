//! Frame timing statistics
//!
//! Lightweight counters kept by the viewer loop and logged when a session ends.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Redraw count and render durations of one viewing session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameStats {
    pub redraws: usize,
    pub total_ms: f64,
    pub min_ms: Option<f64>,
    pub max_ms: f64,
}

impl FrameStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, duration: Duration) {
        let ms = duration.as_secs_f64() * 1000.0;
        self.redraws += 1;
        self.total_ms += ms;
        self.min_ms = Some(self.min_ms.map_or(ms, |min| min.min(ms)));
        self.max_ms = self.max_ms.max(ms);
    }

    pub fn mean_ms(&self) -> f64 {
        if self.redraws == 0 {
            0.0
        } else {
            self.total_ms / self.redraws as f64
        }
    }

    pub fn log_summary(&self) {
        tracing::info!(
            redraws = self.redraws,
            mean_ms = self.mean_ms(),
            min_ms = self.min_ms.unwrap_or(0.0),
            max_ms = self.max_ms,
            "Viewer session finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stats() {
        let stats = FrameStats::new();
        assert_eq!(stats.redraws, 0);
        assert_eq!(stats.mean_ms(), 0.0);
        assert!(stats.min_ms.is_none());
    }

    #[test]
    fn test_record_updates_extremes() {
        let mut stats = FrameStats::new();
        stats.record(Duration::from_millis(4));
        stats.record(Duration::from_millis(2));
        stats.record(Duration::from_millis(6));

        assert_eq!(stats.redraws, 3);
        assert!((stats.mean_ms() - 4.0).abs() < 1e-9);
        assert!((stats.min_ms.unwrap() - 2.0).abs() < 1e-9);
        assert!((stats.max_ms - 6.0).abs() < 1e-9);
    }
}
