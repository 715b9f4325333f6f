// Vector overlay: one metric polyline per lifespan, a dark halo under a bright line.

use crate::config::OverlayConfig;
use crate::cull::visible_extent;
use crate::models::{ChartData, Lifespan, Metric, Point, Rgb};
use crate::scale::Scales;
use crate::surface::{PathClass, PathElement, Stroke, VectorSurface};

pub struct OverlayRenderer {
    metric: Metric,
    min_lifespan_width: f64,
    halo: Stroke,
    line: Stroke,
}

impl OverlayRenderer {
    pub fn new(config: &OverlayConfig, line_color: Rgb, min_lifespan_width: f64) -> Self {
        Self {
            metric: config.metric,
            min_lifespan_width,
            halo: Stroke {
                color: Rgb::BLACK,
                width: config.halo_width,
            },
            line: Stroke {
                color: line_color,
                width: config.line_width,
            },
        }
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// Paths for one lifespan: empty when culled, else halo then line.
    pub fn geometry(
        &self,
        lifespan: &Lifespan,
        scales: &Scales,
        drawable_width: f64,
    ) -> Vec<PathElement> {
        if visible_extent(lifespan, &scales.time, drawable_width, self.min_lifespan_width)
            .is_none()
        {
            return Vec::new();
        }
        let metric_scale = scales.metrics.get(self.metric);
        let points: Vec<Point> = lifespan
            .log
            .iter()
            .map(|snap| {
                Point::new(
                    scales.time.to_pixel(snap.end_ms()),
                    metric_scale.to_pixel(snap.metric(self.metric)),
                )
            })
            .filter(Point::is_finite)
            .collect();
        if points.is_empty() {
            return Vec::new();
        }
        vec![
            PathElement {
                class: PathClass::Halo,
                stroke: self.halo,
                points: points.clone(),
            },
            PathElement {
                class: PathClass::Line,
                stroke: self.line,
                points,
            },
        ]
    }

    /// Rebind every lifespan's paths. Returns how many lifespans got geometry.
    pub fn render<V: VectorSurface>(
        &self,
        surface: &mut V,
        data: &ChartData,
        scales: &Scales,
        drawable_width: f64,
    ) -> usize {
        let mut drawn = 0;
        for (index, lifespan) in data.lifespans.iter().enumerate() {
            let paths = self.geometry(lifespan, scales, drawable_width);
            if !paths.is_empty() {
                drawn += 1;
            }
            surface.bind_paths(index, paths);
        }
        tracing::trace!(operation = "render_overlay", lifespans = drawn, "overlay rebound");
        drawn
    }
}
