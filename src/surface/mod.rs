// Drawing surfaces provided by the host. Both share chart space (see `Layout`).
// The raster layer is repainted wholesale; the vector layer is a retained scene whose
// keyed elements are rebound in place.

mod pixel_buffer;
mod scene;

pub use pixel_buffer::PixelBuffer;
pub use scene::Scene;

use crate::models::{Point, Rgb};

pub trait RasterSurface {
    /// Size in pixels. A zero dimension means no usable drawing context.
    fn size(&self) -> (u32, u32);

    /// Fill the whole surface.
    fn fill(&mut self, color: Rgb);

    /// Fill a rectangle; parts outside the surface are clipped.
    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Rgb);

    /// Release drawn content on teardown.
    fn clear(&mut self);
}

pub trait VectorSurface {
    /// Replace every path bound to `lifespan`. An empty vec removes them.
    fn bind_paths(&mut self, lifespan: usize, paths: Vec<PathElement>);

    /// Create or update the axis identified by `axis.kind`.
    fn update_axis(&mut self, axis: &AxisElement);

    fn update_cursor(&mut self, cursor: &CursorElement);

    fn clear(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Rgb,
    pub width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClass {
    /// Wide dark stroke drawn under the line for contrast with the heatmap.
    Halo,
    Line,
}

/// Unfilled polyline with round joins and caps.
#[derive(Debug, Clone, PartialEq)]
pub struct PathElement {
    pub class: PathClass,
    pub stroke: Stroke,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AxisKind {
    /// Bottom, continuous time.
    Time,
    /// Right, one tick per bucket label.
    Buckets,
    /// Left, line metric.
    Metric,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Offset along the axis line.
    pub position: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisElement {
    pub kind: AxisKind,
    /// Axis origin in chart space.
    pub origin: Point,
    pub ticks: Vec<Tick>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub from: Point,
    pub to: Point,
}

impl Line {
    pub const COLLAPSED: Line = Line {
        from: Point::new(0.0, 0.0),
        to: Point::new(0.0, 0.0),
    };
}

/// Crosshair, value label and marker dot.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorElement {
    pub vertical: Line,
    pub horizontal: Line,
    pub label_at: Point,
    pub label: String,
    pub dot: Point,
}

impl CursorElement {
    const OFF_CANVAS: Point = Point::new(-99.0, -99.0);

    /// Every part moved off-canvas.
    pub fn hidden() -> Self {
        Self {
            vertical: Line::COLLAPSED,
            horizontal: Line::COLLAPSED,
            label_at: Self::OFF_CANVAS,
            label: String::new(),
            dot: Self::OFF_CANVAS,
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.dot == Self::OFF_CANVAS
    }
}
