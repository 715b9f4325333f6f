// Performance history: snapshots grouped into server lifespans.

use crate::error::ChartError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One performance sample covering `[start, end]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub start: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub end: DateTime<Utc>,
    pub players: u32,
    pub fxs_memory: f64,
    pub node_memory: f64,
    /// Load fraction per time bucket, indexed like the chart's boundaries.
    pub weighted_perf: Vec<f64>,
}

impl Snapshot {
    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Players => self.players as f64,
            Metric::FxsMemory => self.fxs_memory,
            Metric::NodeMemory => self.node_memory,
        }
    }

    pub fn start_ms(&self) -> f64 {
        self.start.timestamp_millis() as f64
    }

    pub fn end_ms(&self) -> f64 {
        self.end.timestamp_millis() as f64
    }
}

/// One continuous server run. Missing boot/close times mean unknown or still running.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lifespan {
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub boot_time: Option<DateTime<Utc>>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub close_time: Option<DateTime<Utc>>,
    pub log: Vec<Snapshot>,
}

impl Lifespan {
    /// `bootTime`, else the first snapshot's start. None only for an empty log without a boot time.
    pub fn effective_start(&self) -> Option<DateTime<Utc>> {
        self.boot_time.or_else(|| self.log.first().map(|s| s.start))
    }

    /// `closeTime`, else the last snapshot's end.
    pub fn effective_end(&self) -> Option<DateTime<Utc>> {
        self.close_time.or_else(|| self.log.last().map(|s| s.end))
    }
}

/// Line metric plotted by the overlay and the left axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    #[default]
    Players,
    FxsMemory,
    NodeMemory,
}

/// Everything the chart renders: immutable for the chart's lifetime.
#[derive(Debug, Clone)]
pub struct ChartData {
    pub boundaries: Vec<String>,
    pub data_start: DateTime<Utc>,
    pub data_end: DateTime<Utc>,
    pub lifespans: Vec<Lifespan>,
}

impl ChartData {
    /// Largest observed value of `metric` over all snapshots; 0 when there are none.
    pub fn max_metric(&self, metric: Metric) -> f64 {
        self.snapshots()
            .map(|s| s.metric(metric))
            .filter(|v| v.is_finite())
            .fold(0.0, f64::max)
    }

    pub fn snapshots(&self) -> impl Iterator<Item = &Snapshot> {
        self.lifespans.iter().flat_map(|l| l.log.iter())
    }

    /// Every snapshot must carry exactly one `weightedPerf` entry per boundary.
    pub fn validate(&self) -> Result<(), ChartError> {
        let expected = self.boundaries.len();
        for (li, lifespan) in self.lifespans.iter().enumerate() {
            for (si, snap) in lifespan.log.iter().enumerate() {
                if snap.weighted_perf.len() != expected {
                    return Err(ChartError::BucketMismatch {
                        lifespan: li,
                        snapshot: si,
                        expected,
                        found: snap.weighted_perf.len(),
                    });
                }
            }
        }
        Ok(())
    }
}
