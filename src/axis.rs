// Axes: bottom time axis, right bucket axis, left metric axis.
// Built once; the time axis is re-invoked on every transform change.

use crate::models::{Layout, Point};
use crate::scale::ticks::{format_number, format_time_tick, time_ticks};
use crate::scale::{BandScale, LinearScale, Scales, TimeScale};
use crate::surface::{AxisElement, AxisKind, Tick, VectorSurface};
use chrono::FixedOffset;

/// Metric maxima at or below this get integer-only ticks.
pub const INTEGER_TICKS_MAX: f64 = 7.0;

const DEFAULT_METRIC_TICKS: f64 = 10.0;

/// Time tick count at zoom 1 grows linearly with chart width: 7 ticks at 382px, 16 at 1350px.
pub fn base_time_ticks(width: f64) -> f64 {
    7.0 + (width - 382.0) * (16.0 - 7.0) / (1350.0 - 382.0)
}

/// How the metric axis picks its tick values.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricTicks {
    /// Exactly these values; used for small maxima so a count axis never shows fractions.
    Fixed(Vec<f64>),
    /// Nice ticks over the scale's domain.
    Auto,
}

impl MetricTicks {
    pub fn for_max(max: f64) -> Self {
        if max <= INTEGER_TICKS_MAX {
            let last = ((max + 1.0).ceil() as u32).saturating_sub(1);
            MetricTicks::Fixed((0..=last).map(f64::from).collect())
        } else {
            MetricTicks::Auto
        }
    }
}

pub struct AxisRenderer {
    layout: Layout,
    base_time_ticks: f64,
    metric_ticks: MetricTicks,
    utc_offset: FixedOffset,
}

impl AxisRenderer {
    pub fn new(layout: Layout, metric_max: f64, utc_offset: FixedOffset) -> Self {
        Self {
            layout,
            base_time_ticks: base_time_ticks(layout.width),
            metric_ticks: MetricTicks::for_max(metric_max),
            utc_offset,
        }
    }

    pub fn metric_ticks(&self) -> &MetricTicks {
        &self.metric_ticks
    }

    /// Requested time tick count at zoom `k`.
    pub fn time_tick_count(&self, k: f64) -> f64 {
        self.base_time_ticks * k
    }

    pub fn time_axis(&self, time: &TimeScale, k: f64) -> AxisElement {
        // Ticks span the whole domain, so density follows k; off-screen ones are dropped.
        let (d0, d1) = time.domain();
        let visible = 0.0..=self.layout.drawable_width();
        let ticks = time_ticks(d0, d1, self.time_tick_count(k), self.utc_offset)
            .into_iter()
            .filter_map(|ms| {
                let position = time.to_pixel(ms);
                visible.contains(&position).then(|| Tick {
                    position,
                    label: format_time_tick(ms, self.utc_offset),
                })
            })
            .collect();
        AxisElement {
            kind: AxisKind::Time,
            origin: Point::new(0.0, self.layout.height - self.layout.margins.bottom),
            ticks,
        }
    }

    pub fn bucket_axis(&self, buckets: &BandScale) -> AxisElement {
        let m = &self.layout.margins;
        let ticks = buckets
            .labels()
            .iter()
            .enumerate()
            .filter_map(|(i, label)| {
                Some(Tick {
                    position: buckets.center(i)?,
                    label: label.clone(),
                })
            })
            .collect();
        AxisElement {
            kind: AxisKind::Buckets,
            origin: Point::new(self.layout.width - m.right + m.axis - m.left, 0.0),
            ticks,
        }
    }

    pub fn metric_axis(&self, scale: &LinearScale) -> AxisElement {
        let values = match &self.metric_ticks {
            MetricTicks::Fixed(values) => values.clone(),
            MetricTicks::Auto => scale.ticks(DEFAULT_METRIC_TICKS),
        };
        AxisElement {
            kind: AxisKind::Metric,
            origin: Point::new(-self.layout.margins.axis, 0.0),
            ticks: values
                .into_iter()
                .map(|v| Tick {
                    position: scale.to_pixel(v),
                    label: format_number(v),
                })
                .collect(),
        }
    }

    /// Draw all three axes.
    pub fn render_all<V: VectorSurface>(
        &self,
        surface: &mut V,
        scales: &Scales,
        metric: &LinearScale,
        k: f64,
    ) {
        surface.update_axis(&self.time_axis(&scales.time, k));
        surface.update_axis(&self.bucket_axis(&scales.buckets));
        surface.update_axis(&self.metric_axis(metric));
    }

    /// Update the time axis after the time range or zoom factor changed.
    pub fn refresh_time<V: VectorSurface>(&self, surface: &mut V, time: &TimeScale, k: f64) {
        let axis = self.time_axis(time, k);
        tracing::trace!(
            operation = "refresh_time_axis",
            ticks = axis.ticks.len(),
            k,
            "time axis updated"
        );
        surface.update_axis(&axis);
    }
}
