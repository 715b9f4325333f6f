// Reject-before-draw filtering shared by the heatmap and the vector overlay.

use crate::models::Lifespan;
use crate::scale::TimeScale;

/// Horizontal pixel extent of a lifespan under the current time scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelExtent {
    pub start: f64,
    pub end: f64,
}

impl PixelExtent {
    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Extent of `lifespan` when it is worth drawing: finite, at least `min_width` pixels wide
/// and overlapping `[0, drawable_width]`. None for empty logs.
pub fn visible_extent(
    lifespan: &Lifespan,
    time: &TimeScale,
    drawable_width: f64,
    min_width: f64,
) -> Option<PixelExtent> {
    let start = time.instant_to_pixel(lifespan.effective_start()?);
    let end = time.instant_to_pixel(lifespan.effective_end()?);
    if !start.is_finite() || !end.is_finite() {
        return None;
    }
    let extent = PixelExtent { start, end };
    if end < 0.0 || start > drawable_width || extent.width() < min_width {
        return None;
    }
    Some(extent)
}
