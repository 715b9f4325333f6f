// Screen geometry shared by both drawing layers.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Pixel margins around the plot area. `axis` is the gap between the plot edge and the side axes.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
    pub axis: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 10.0,
            right: 60.0,
            bottom: 30.0,
            left: 40.0,
            axis: 2.0,
        }
    }
}

/// Full chart size plus margins.
///
/// Chart space: x is measured from the plot's left edge (`margins.left` in the full
/// chart), y from the top of the full chart. Both surfaces draw in chart space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
}

impl Layout {
    pub fn drawable_width(&self) -> f64 {
        self.width - self.margins.left - self.margins.right
    }

    pub fn drawable_height(&self) -> f64 {
        self.height - self.margins.top - self.margins.bottom
    }

    /// Vertical pixel range of the plot, bottom to top (scales grow upwards).
    pub fn vertical_range(&self) -> (f64, f64) {
        (self.height - self.margins.bottom, self.margins.top)
    }
}

/// Zoom/pan state: `screen = value * k + translation`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub k: f64,
    pub x: f64,
    pub y: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        k: 1.0,
        x: 0.0,
        y: 0.0,
    };

    pub fn new(k: f64, x: f64, y: f64) -> Self {
        Self { k, x, y }
    }

    pub fn is_identity(&self) -> bool {
        self.k == 1.0 && self.x == 0.0
    }

    pub fn apply_x(&self, x: f64) -> f64 {
        x * self.k + self.x
    }

    pub fn invert_x(&self, x: f64) -> f64 {
        (x - self.x) / self.k
    }

    pub fn invert_y(&self, y: f64) -> f64 {
        (y - self.y) / self.k
    }

    pub fn invert(&self, p: Point) -> Point {
        Point::new(self.invert_x(p.x), self.invert_y(p.y))
    }

    /// Shift by `(dx, dy)` in pre-scale units.
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.k, self.x + self.k * dx, self.y + self.k * dy)
    }
}
