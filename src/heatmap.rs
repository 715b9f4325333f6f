// Raster heatmap: one row per bucket boundary, one column run per snapshot.
// Every paint repaints the whole surface; cost is bounded by visible pixels once culled.

use crate::config::HeatmapConfig;
use crate::cull::visible_extent;
use crate::models::{ChartData, ColorMap, Rgb};
use crate::scale::Scales;
use crate::surface::RasterSurface;

/// How much darker than the color map's zero the empty-cell color is.
const EMPTY_DARKEN: f64 = 1.15;

/// Work done by one paint pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaintStats {
    pub lifespans: usize,
    pub cells: usize,
}

pub struct HeatmapRasterizer {
    color_map: Box<dyn ColorMap>,
    background: Rgb,
    empty_color: Rgb,
    empty_threshold: f64,
    min_lifespan_width: f64,
}

impl HeatmapRasterizer {
    pub fn new(color_map: Box<dyn ColorMap>, background: Rgb, config: &HeatmapConfig) -> Self {
        let empty_color = color_map.color(0.0).darker(EMPTY_DARKEN);
        Self {
            color_map,
            background,
            empty_color,
            empty_threshold: config.empty_threshold,
            min_lifespan_width: config.min_lifespan_width,
        }
    }

    pub fn empty_color(&self) -> Rgb {
        self.empty_color
    }

    /// Color for one cell. Values at or below the threshold get the muted empty color so
    /// that "no load" does not read as a low value.
    pub fn cell_color(&self, perf: f64) -> Rgb {
        if perf > self.empty_threshold {
            self.color_map.color(perf)
        } else {
            self.empty_color
        }
    }

    pub fn paint<R: RasterSurface>(
        &self,
        surface: &mut R,
        data: &ChartData,
        scales: &Scales,
        drawable_width: f64,
    ) -> PaintStats {
        surface.fill(self.background);

        let buckets = &scales.buckets;
        let row_height = buckets.bandwidth().ceil() as i32;
        let rows: Vec<i32> = (0..buckets.len())
            .filter_map(|i| buckets.position(i))
            .map(|y| y.floor() as i32)
            .collect();

        let mut stats = PaintStats::default();
        for lifespan in &data.lifespans {
            if visible_extent(lifespan, &scales.time, drawable_width, self.min_lifespan_width)
                .is_none()
            {
                continue;
            }
            stats.lifespans += 1;

            for snap in &lifespan.log {
                let x1 = scales.time.to_pixel(snap.start_ms()).floor();
                let x2 = scales.time.to_pixel(snap.end_ms()).floor();
                let width = x2 - x1;
                // sub-pixel snapshots would be wasted draw calls
                if !(width >= 1.0) {
                    continue;
                }
                for (perf, y) in snap.weighted_perf.iter().zip(&rows) {
                    surface.fill_rect(
                        x1 as i32,
                        *y,
                        width as i32,
                        row_height,
                        self.cell_color(*perf),
                    );
                    stats.cells += 1;
                }
            }
        }
        tracing::trace!(
            operation = "paint_heatmap",
            lifespans = stats.lifespans,
            cells = stats.cells,
            "heatmap painted"
        );
        stats
    }
}
