//! Per-run counters and stage timings

use log::info;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Stage-level counters collected during one locate run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocateTelemetry {
    /// Rectangles received from the region detector
    pub raw_rects: usize,
    /// Rectangles surviving normalization
    pub normalized: usize,
    /// Rectangles left after adjacency merging
    pub merged: usize,
    /// Orientation clusters extracted from the histogram
    pub clusters: usize,
    /// Candidates examined across all clusters
    pub candidates: usize,
    /// Barcode rectangles reported
    pub barcodes: usize,
}

/// Elapsed time of a single stage
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    /// Stage name
    pub label: String,
    /// Wall time spent in the stage
    pub elapsed_ms: f64,
}

/// Timing trace of one run
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunTimings {
    /// Sum of all stages
    pub total_ms: f64,
    /// Stages in execution order
    pub stages: Vec<StageTiming>,
}

impl RunTimings {
    /// Elapsed time of the named stage, if it ran
    pub fn stage(&self, label: &str) -> Option<f64> {
        self.stages
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.elapsed_ms)
    }
}

/// Lap timer scoped to one run.
///
/// Each `lap` records the time since the previous lap. With reporting on,
/// the lap is also logged at info level.
#[derive(Debug)]
pub(crate) struct StageClock {
    last: Instant,
    reporting: bool,
    timings: RunTimings,
}

impl StageClock {
    pub(crate) fn start(reporting: bool) -> Self {
        Self {
            last: Instant::now(),
            reporting,
            timings: RunTimings::default(),
        }
    }

    pub(crate) fn lap(&mut self, label: &str) {
        let now = Instant::now();
        let elapsed_ms = now.duration_since(self.last).as_secs_f64() * 1000.0;
        self.last = now;
        if self.reporting {
            info!("{label} runtime: {elapsed_ms:.2} ms");
        }
        self.timings.total_ms += elapsed_ms;
        self.timings.stages.push(StageTiming {
            label: label.to_string(),
            elapsed_ms,
        });
    }

    pub(crate) fn finish(self) -> RunTimings {
        if self.reporting {
            info!("total runtime: {:.2} ms", self.timings.total_ms);
        }
        self.timings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_laps_accumulate() {
        let mut clock = StageClock::start(false);
        clock.lap("normalization");
        clock.lap("clustering");
        let timings = clock.finish();
        assert_eq!(timings.stages.len(), 2);
        assert!(timings.stage("clustering").is_some());
        assert!(timings.stage("decoding").is_none());
        let sum: f64 = timings.stages.iter().map(|s| s.elapsed_ms).sum();
        assert!((sum - timings.total_ms).abs() < 1e-9);
    }

    #[test]
    fn test_timings_serialize_camel_case() {
        let timings = RunTimings {
            total_ms: 1.5,
            stages: vec![StageTiming {
                label: "merging".into(),
                elapsed_ms: 1.5,
            }],
        };
        let json = serde_json::to_string(&timings).unwrap();
        assert!(json.contains("totalMs"));
        assert!(json.contains("elapsedMs"));
    }
}
