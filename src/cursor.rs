// Cursor inspection: pointer x -> nearest sample -> crosshair, label and marker dot.

use crate::config::CursorConfig;
use crate::models::{ChartData, Layout, Metric, Point};
use crate::scale::{LinearScale, TimeScale, ticks::format_number};
use crate::surface::{CursorElement, Line, VectorSurface};
use crate::throttle::Throttle;
use std::time::{Duration, Instant};

/// A flattened snapshot reference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub lifespan: usize,
    pub snapshot: usize,
    pub end_ms: f64,
    pub value: f64,
}

/// Every snapshot of every lifespan, in input order.
///
/// The history is expected to be globally sorted by `end` across lifespans; this is
/// not re-checked per lookup.
#[derive(Debug, Clone, Default)]
pub struct SampleIndex {
    samples: Vec<Sample>,
}

impl SampleIndex {
    pub fn build(data: &ChartData, metric: Metric) -> Self {
        let samples = data
            .lifespans
            .iter()
            .enumerate()
            .flat_map(|(li, lifespan)| {
                lifespan.log.iter().enumerate().map(move |(si, snap)| Sample {
                    lifespan: li,
                    snapshot: si,
                    end_ms: snap.end_ms(),
                    value: snap.metric(metric),
                })
            })
            .collect();
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Sample> {
        self.samples.get(index)
    }

    /// Index of the sample whose `end` is closest to `ms`. On an exact tie between two
    /// neighbours the later one wins.
    pub fn nearest(&self, ms: f64) -> Option<usize> {
        if self.samples.is_empty() || ms.is_nan() {
            return None;
        }
        let hi = self.samples.len() - 1;
        let i = self.samples[..hi].partition_point(|s| s.end_ms < ms);
        if i > 0 && ms - self.samples[i - 1].end_ms < self.samples[i].end_ms - ms {
            Some(i - 1)
        } else {
            Some(i)
        }
    }

    /// Nearest sample, unless it is more than `max_gap_ms` away.
    pub fn resolve(&self, ms: f64, max_gap_ms: f64) -> Option<&Sample> {
        let sample = self.get(self.nearest(ms)?)?;
        ((sample.end_ms - ms).abs() <= max_gap_ms).then_some(sample)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CursorState {
    Idle,
    Active { sample: Sample, at: Point },
}

pub struct CursorTracker {
    index: SampleIndex,
    max_gap_ms: f64,
    leave_delay: Duration,
    drawable_width: f64,
    drawable_height: f64,
    state: CursorState,
    throttle: Throttle<Point>,
    hide_at: Option<Instant>,
}

impl CursorTracker {
    pub fn new(
        index: SampleIndex,
        config: &CursorConfig,
        layout: &Layout,
        cooldown: Duration,
    ) -> Self {
        Self {
            index,
            max_gap_ms: (config.max_gap_secs * 1000) as f64,
            leave_delay: Duration::from_millis(config.leave_delay_ms),
            drawable_width: layout.drawable_width(),
            drawable_height: layout.drawable_height(),
            state: CursorState::Idle,
            throttle: Throttle::new(cooldown),
            hide_at: None,
        }
    }

    pub fn state(&self) -> &CursorState {
        &self.state
    }

    pub fn index(&self) -> &SampleIndex {
        &self.index
    }

    /// Rate-limited pointer move. Returns whether the overlay was redrawn now.
    pub fn pointer_moved<V: VectorSurface>(
        &mut self,
        now: Instant,
        pointer: Point,
        surface: &mut V,
        time: &TimeScale,
        metric: &LinearScale,
    ) -> bool {
        self.hide_at = None;
        match self.throttle.schedule(now, pointer) {
            Some(pointer) => {
                self.redraw(pointer, surface, time, metric);
                true
            }
            None => false,
        }
    }

    /// Pointer left the chart: hide after the leave delay.
    pub fn pointer_left(&mut self, now: Instant) {
        self.hide_at = Some(now + self.leave_delay);
    }

    /// Fire whatever came due by `now`. Returns whether the overlay changed.
    pub fn poll<V: VectorSurface>(
        &mut self,
        now: Instant,
        surface: &mut V,
        time: &TimeScale,
        metric: &LinearScale,
    ) -> bool {
        let mut changed = false;
        if let Some(pointer) = self.throttle.poll(now) {
            self.redraw(pointer, surface, time, metric);
            changed = true;
        }
        if self.hide_at.is_some_and(|at| now >= at) {
            self.hide_at = None;
            self.reset(surface);
            changed = true;
        }
        changed
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.throttle.deadline(), self.hide_at) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Back to idle: everything moved off-canvas.
    pub fn reset<V: VectorSurface>(&mut self, surface: &mut V) {
        self.state = CursorState::Idle;
        surface.update_cursor(&CursorElement::hidden());
    }

    fn redraw<V: VectorSurface>(
        &mut self,
        pointer: Point,
        surface: &mut V,
        time: &TimeScale,
        metric: &LinearScale,
    ) {
        let Some(sample) = self
            .index
            .resolve(time.to_value(pointer.x), self.max_gap_ms)
            .copied()
        else {
            self.reset(surface);
            return;
        };
        let at = Point::new(time.to_pixel(sample.end_ms), metric.to_pixel(sample.value));
        if !at.is_finite() {
            self.reset(surface);
            return;
        }
        surface.update_cursor(&self.overlay(at, sample.value));
        self.state = CursorState::Active { sample, at };
    }

    fn overlay(&self, at: Point, value: f64) -> CursorElement {
        // keep the label inside the plot: below the point in the upper half, above it otherwise
        let label_y = if at.y < self.drawable_height / 2.0 {
            at.y + 20.0
        } else {
            at.y - 10.0
        };
        CursorElement {
            vertical: Line {
                from: Point::new(at.x, 0.0),
                to: Point::new(at.x, self.drawable_height),
            },
            horizontal: Line {
                from: Point::new(0.0, at.y),
                to: Point::new(self.drawable_width, at.y),
            },
            label_at: Point::new(5.0, label_y),
            label: format_number(value),
            dot: at,
        }
    }
}
