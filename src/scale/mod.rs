// Domain <-> pixel mappings for time, bucket rows and metric magnitudes.
// Only the time scale's pixel range changes after construction (zoom/pan).

pub mod ticks;

use crate::models::{ChartData, Layout, Metric};
use chrono::{DateTime, Utc};

/// Continuous time scale over epoch milliseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl TimeScale {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, range: (f64, f64)) -> Self {
        Self {
            domain: (
                start.timestamp_millis() as f64,
                end.timestamp_millis() as f64,
            ),
            range,
        }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn set_range(&mut self, range: (f64, f64)) {
        self.range = range;
    }

    /// Epoch milliseconds to pixel. A zero-length domain maps everything to the range start.
    pub fn to_pixel(&self, ms: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return r0;
        }
        r0 + (ms - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Pixel to epoch milliseconds.
    pub fn to_value(&self, px: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r1 == r0 {
            return d0;
        }
        d0 + (px - r0) / (r1 - r0) * (d1 - d0)
    }

    pub fn instant_to_pixel(&self, t: DateTime<Utc>) -> f64 {
        self.to_pixel(t.timestamp_millis() as f64)
    }

    pub fn instant_at(&self, px: f64) -> Option<DateTime<Utc>> {
        let ms = self.to_value(px);
        if !ms.is_finite() {
            return None;
        }
        DateTime::from_timestamp_millis(ms.round() as i64)
    }
}

/// Discrete scale with one equal-height slot per label, no padding.
/// With a reversed range (bottom to top) the first label sits at the bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    labels: Vec<String>,
    range: (f64, f64),
}

impl BandScale {
    pub fn new(labels: Vec<String>, range: (f64, f64)) -> Self {
        Self { labels, range }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    fn bounds(&self) -> (f64, f64, bool) {
        let (r0, r1) = self.range;
        if r1 < r0 { (r1, r0, true) } else { (r0, r1, false) }
    }

    pub fn bandwidth(&self) -> f64 {
        if self.labels.is_empty() {
            return 0.0;
        }
        let (start, stop, _) = self.bounds();
        (stop - start) / self.labels.len() as f64
    }

    /// Top edge of slot `index`.
    pub fn position(&self, index: usize) -> Option<f64> {
        let n = self.labels.len();
        if index >= n {
            return None;
        }
        let (start, _, reverse) = self.bounds();
        let slot = if reverse { n - 1 - index } else { index };
        Some(start + self.bandwidth() * slot as f64)
    }

    pub fn center(&self, index: usize) -> Option<f64> {
        self.position(index).map(|p| p + self.bandwidth() / 2.0)
    }
}

/// Linear scale with domain `[0, upper]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn to_pixel(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (v - d0) / (d1 - d0) * (r1 - r0)
    }

    pub fn to_value(&self, px: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r1 == r0 {
            return d0;
        }
        d0 + (px - r0) / (r1 - r0) * (d1 - d0)
    }

    pub fn ticks(&self, count: f64) -> Vec<f64> {
        ticks::linear_ticks(self.domain.0, self.domain.1, count)
    }
}

/// Smallest multiple of `step` strictly greater than `max`, leaving headroom above the peak.
pub fn headroom_upper(max: f64, step: f64) -> f64 {
    ((max / step).floor() + 1.0) * step
}

/// Metric scales plus the observed maxima they were built from.
#[derive(Debug, Clone)]
pub struct MetricScales {
    players: (LinearScale, f64),
    fxs_memory: (LinearScale, f64),
    node_memory: (LinearScale, f64),
}

impl MetricScales {
    pub fn new(data: &ChartData, step: f64, range: (f64, f64)) -> Self {
        let build = |metric: Metric| {
            let max = data.max_metric(metric);
            (
                LinearScale::new((0.0, headroom_upper(max, step)), range),
                max,
            )
        };
        Self {
            players: build(Metric::Players),
            fxs_memory: build(Metric::FxsMemory),
            node_memory: build(Metric::NodeMemory),
        }
    }

    fn entry(&self, metric: Metric) -> &(LinearScale, f64) {
        match metric {
            Metric::Players => &self.players,
            Metric::FxsMemory => &self.fxs_memory,
            Metric::NodeMemory => &self.node_memory,
        }
    }

    pub fn get(&self, metric: Metric) -> &LinearScale {
        &self.entry(metric).0
    }

    /// Largest observed value (not the rounded domain upper bound).
    pub fn max(&self, metric: Metric) -> f64 {
        self.entry(metric).1
    }
}

/// All scales of one chart instance.
#[derive(Debug, Clone)]
pub struct Scales {
    pub time: TimeScale,
    pub buckets: BandScale,
    pub metrics: MetricScales,
}

impl Scales {
    pub fn new(data: &ChartData, layout: &Layout, metric_step: f64) -> Self {
        let vertical = layout.vertical_range();
        Self {
            time: TimeScale::new(
                data.data_start,
                data.data_end,
                (0.0, layout.drawable_width()),
            ),
            buckets: BandScale::new(data.boundaries.clone(), vertical),
            metrics: MetricScales::new(data, metric_step, vertical),
        }
    }
}
