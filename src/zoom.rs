// Zoom/pan: owns the transform, clamps it, rate-limits changes and turns accepted ones
// into a new time scale range.

use crate::config::ZoomConfig;
use crate::models::{Layout, Point, Transform};
use crate::throttle::Throttle;
use std::time::{Duration, Instant};

/// Wheel delta to scale exponent: `k' = k * 2^(-delta_y * WHEEL_FACTOR)`.
const WHEEL_FACTOR: f64 = 0.002;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoomInput {
    Wheel { at: Point, delta_y: f64 },
    Pan { dx: f64, dy: f64 },
    ScaleTo { k: f64, anchor: Point },
}

/// Axis-aligned box `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min: Point,
    pub max: Point,
}

/// Rounds to 6 decimals so repeated incremental transforms do not accumulate float noise.
pub fn round6(v: f64) -> f64 {
    (v * 1e6).round() / 1e6
}

pub struct ZoomController {
    transform: Transform,
    scale_extent: (f64, f64),
    /// Viewport extent; also the translate extent, so the data can never be panned away.
    extent: Extent,
    drawable_width: f64,
    throttle: Throttle<Transform>,
    was_zoomed: bool,
}

impl ZoomController {
    pub fn new(config: &ZoomConfig, layout: &Layout, cooldown: Duration) -> Self {
        let m = &layout.margins;
        Self {
            transform: Transform::IDENTITY,
            scale_extent: (config.min_scale, config.max_scale),
            extent: Extent {
                min: Point::new(0.0, m.top),
                max: Point::new(layout.drawable_width(), layout.height - m.top),
            },
            drawable_width: layout.drawable_width(),
            throttle: Throttle::new(cooldown),
            was_zoomed: false,
        }
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    fn clamp_scale(&self, k: f64) -> f64 {
        k.clamp(self.scale_extent.0, self.scale_extent.1)
    }

    /// Shift `t` so the viewport extent stays inside the translate extent.
    pub fn constrain(&self, t: Transform) -> Transform {
        let e = self.extent;
        let dx0 = t.invert_x(e.min.x) - e.min.x;
        let dx1 = t.invert_x(e.max.x) - e.max.x;
        let dy0 = t.invert_y(e.min.y) - e.min.y;
        let dy1 = t.invert_y(e.max.y) - e.max.y;
        t.translate(shift(dx0, dx1), shift(dy0, dy1))
    }

    /// Transform `input` leads to from the current state, clamped.
    pub fn target(&self, input: ZoomInput) -> Transform {
        let t = self.transform;
        let next = match input {
            ZoomInput::Wheel { at, delta_y } => {
                self.scale_about(t, t.k * 2f64.powf(-delta_y * WHEEL_FACTOR), at)
            }
            ZoomInput::Pan { dx, dy } => Transform::new(t.k, t.x + dx, t.y + dy),
            ZoomInput::ScaleTo { k, anchor } => self.scale_about(t, k, anchor),
        };
        self.constrain(next)
    }

    /// Rescale keeping the content under `anchor` fixed on screen.
    fn scale_about(&self, t: Transform, k: f64, anchor: Point) -> Transform {
        let k = self.clamp_scale(k);
        let p = t.invert(anchor);
        Transform::new(k, anchor.x - p.x * k, anchor.y - p.y * k)
    }

    /// Apply an input. The new transform is held immediately; the returned value (if any)
    /// is what should be rendered now, otherwise `poll` releases it after the cooldown.
    pub fn input(&mut self, now: Instant, input: ZoomInput) -> Option<Transform> {
        self.transform = self.target(input);
        self.throttle.schedule(now, self.transform)
    }

    pub fn poll(&mut self, now: Instant) -> Option<Transform> {
        self.throttle.poll(now)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.throttle.deadline()
    }

    /// Set the transform without rate limiting (initial zoom).
    pub fn set_transform(&mut self, t: Transform) -> Transform {
        self.transform = self.constrain(Transform::new(self.clamp_scale(t.k), t.x, t.y));
        self.transform
    }

    /// Decide whether `t` needs a re-render; if so return the new time scale range.
    /// Identity after identity is skipped so a gesture ending at rest does not flood renders.
    pub fn accept(&mut self, t: Transform) -> Option<(f64, f64)> {
        if t.is_identity() {
            if !self.was_zoomed {
                return None;
            }
            self.was_zoomed = false;
        } else {
            self.was_zoomed = true;
        }
        Some((round6(t.apply_x(0.0)), round6(t.apply_x(self.drawable_width))))
    }
}

fn shift(d0: f64, d1: f64) -> f64 {
    if d1 > d0 {
        (d0 + d1) / 2.0
    } else {
        let toward_min = d0.min(0.0);
        if toward_min != 0.0 {
            toward_min
        } else {
            d1.max(0.0)
        }
    }
}
