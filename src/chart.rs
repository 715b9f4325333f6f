// One chart instance: owns the data, scales, surfaces and every renderer.
// Pointer input only reaches the cursor; zoom input fans out through REFRESH_ORDER.

use crate::axis::AxisRenderer;
use crate::config::AppConfig;
use crate::cursor::{CursorState, CursorTracker, SampleIndex};
use crate::error::ChartError;
use crate::heatmap::{HeatmapRasterizer, PaintStats};
use crate::models::{ChartData, ColorMap, InputEvent, Layout, Point, Transform};
use crate::overlay::OverlayRenderer;
use crate::scale::Scales;
use crate::surface::{RasterSurface, VectorSurface};
use crate::zoom::{ZoomController, ZoomInput};
use std::time::Instant;

/// Components refreshed after an accepted transform change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    Axes,
    Overlay,
    Cursor,
    Heatmap,
}

/// Heatmap last: it is the most expensive step.
pub const REFRESH_ORDER: [Refresh; 4] = [
    Refresh::Axes,
    Refresh::Overlay,
    Refresh::Cursor,
    Refresh::Heatmap,
];

/// Render work done since construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderCounters {
    pub heatmap_paints: usize,
    pub overlay_renders: usize,
    pub axis_refreshes: usize,
    pub cursor_redraws: usize,
    pub cursor_resets: usize,
    pub transforms_applied: usize,
}

pub struct Chart<R: RasterSurface, V: VectorSurface> {
    data: ChartData,
    layout: Layout,
    scales: Scales,
    heatmap: HeatmapRasterizer,
    overlay: OverlayRenderer,
    axes: AxisRenderer,
    cursor: CursorTracker,
    zoom: ZoomController,
    raster: R,
    vector: V,
    last_paint: PaintStats,
    counters: RenderCounters,
}

impl<R: RasterSurface, V: VectorSurface> Chart<R, V> {
    /// Validate inputs, build scales and draw everything once.
    pub fn new(
        data: ChartData,
        config: &AppConfig,
        raster: R,
        vector: V,
        color_map: Box<dyn ColorMap>,
    ) -> anyhow::Result<Self> {
        let layout = config.layout();
        if !(layout.drawable_width() > 0.0 && layout.drawable_height() > 0.0) {
            return Err(ChartError::InvalidSize {
                width: layout.drawable_width(),
                height: layout.drawable_height(),
            }
            .into());
        }
        let (width, height) = raster.size();
        if width == 0 || height == 0 {
            return Err(ChartError::RasterUnavailable { width, height }.into());
        }
        data.validate()?;

        let scales = Scales::new(&data, &layout, config.scales.metric_step);
        let metric = config.overlay.metric;
        let heatmap = HeatmapRasterizer::new(color_map, config.background()?, &config.heatmap);
        let overlay = OverlayRenderer::new(
            &config.overlay,
            config.line_color()?,
            config.heatmap.min_lifespan_width,
        );
        let axes = AxisRenderer::new(layout, scales.metrics.max(metric), config.utc_offset()?);
        let cursor = CursorTracker::new(
            SampleIndex::build(&data, metric),
            &config.cursor,
            &layout,
            config.cursor_cooldown(),
        );
        let zoom = ZoomController::new(&config.zoom, &layout, config.zoom_cooldown());

        let mut chart = Self {
            data,
            layout,
            scales,
            heatmap,
            overlay,
            axes,
            cursor,
            zoom,
            raster,
            vector,
            last_paint: PaintStats::default(),
            counters: RenderCounters::default(),
        };
        chart.render_all();
        tracing::debug!(
            operation = "chart_init",
            lifespans = chart.data.lifespans.len(),
            samples = chart.cursor.index().len(),
            buckets = chart.data.boundaries.len(),
            "chart rendered"
        );

        if config.zoom.initial_scale != 1.0 {
            let anchor = Point::new(
                chart.scales.time.instant_to_pixel(chart.data.data_end),
                0.0,
            );
            let initial = chart.zoom.target(ZoomInput::ScaleTo {
                k: config.zoom.initial_scale,
                anchor,
            });
            let applied = chart.zoom.set_transform(initial);
            chart.apply_transform(applied);
        }
        Ok(chart)
    }

    /// Initial render: heatmap, overlay, axes, idle cursor.
    fn render_all(&mut self) {
        let k = self.zoom.transform().k;
        self.paint_heatmap();
        self.render_overlay();
        let metric = self.scales.metrics.get(self.overlay.metric());
        self.axes
            .render_all(&mut self.vector, &self.scales, metric, k);
        self.counters.axis_refreshes += 1;
        self.cursor.reset(&mut self.vector);
        self.counters.cursor_resets += 1;
    }

    fn paint_heatmap(&mut self) {
        self.last_paint = self.heatmap.paint(
            &mut self.raster,
            &self.data,
            &self.scales,
            self.layout.drawable_width(),
        );
        self.counters.heatmap_paints += 1;
    }

    fn render_overlay(&mut self) {
        self.overlay.render(
            &mut self.vector,
            &self.data,
            &self.scales,
            self.layout.drawable_width(),
        );
        self.counters.overlay_renders += 1;
    }

    fn refresh(&mut self, step: Refresh) {
        match step {
            Refresh::Axes => {
                let k = self.zoom.transform().k;
                self.axes.refresh_time(&mut self.vector, &self.scales.time, k);
                self.counters.axis_refreshes += 1;
            }
            Refresh::Overlay => self.render_overlay(),
            Refresh::Cursor => {
                self.cursor.reset(&mut self.vector);
                self.counters.cursor_resets += 1;
            }
            Refresh::Heatmap => self.paint_heatmap(),
        }
    }

    /// Throttled zoom handler body. Returns whether anything was re-rendered.
    fn apply_transform(&mut self, t: Transform) -> bool {
        let Some(range) = self.zoom.accept(t) else {
            return false;
        };
        self.scales.time.set_range(range);
        for step in REFRESH_ORDER {
            self.refresh(step);
        }
        self.counters.transforms_applied += 1;
        tracing::debug!(
            operation = "apply_transform",
            k = t.k,
            x = t.x,
            range_start = range.0,
            range_end = range.1,
            lifespans = self.last_paint.lifespans,
            cells = self.last_paint.cells,
            "transform applied"
        );
        true
    }

    pub fn pointer_moved(&mut self, now: Instant, pointer: Point) {
        let metric = self.scales.metrics.get(self.overlay.metric());
        if self
            .cursor
            .pointer_moved(now, pointer, &mut self.vector, &self.scales.time, metric)
        {
            self.counters.cursor_redraws += 1;
        }
    }

    pub fn pointer_left(&mut self, now: Instant) {
        self.cursor.pointer_left(now);
    }

    pub fn zoom(&mut self, now: Instant, input: ZoomInput) {
        if let Some(t) = self.zoom.input(now, input) {
            self.apply_transform(t);
        }
    }

    pub fn handle(&mut self, now: Instant, event: InputEvent) {
        match event {
            InputEvent::PointerMove { x, y } => self.pointer_moved(now, Point::new(x, y)),
            InputEvent::PointerLeave => self.pointer_left(now),
            InputEvent::Wheel { x, y, delta_y } => self.zoom(
                now,
                ZoomInput::Wheel {
                    at: Point::new(x, y),
                    delta_y,
                },
            ),
            InputEvent::Pan { dx, dy } => self.zoom(now, ZoomInput::Pan { dx, dy }),
            InputEvent::ScaleTo { k, x, y } => self.zoom(
                now,
                ZoomInput::ScaleTo {
                    k,
                    anchor: Point::new(x, y),
                },
            ),
        }
    }

    /// Run rate-limited work that came due by `now`: zoom first, so a pending cursor
    /// redraw resolves against the new time scale.
    pub fn poll(&mut self, now: Instant) {
        if let Some(t) = self.zoom.poll(now) {
            self.apply_transform(t);
        }
        let metric = self.scales.metrics.get(self.overlay.metric());
        if self
            .cursor
            .poll(now, &mut self.vector, &self.scales.time, metric)
        {
            self.counters.cursor_redraws += 1;
        }
    }

    /// Earliest instant at which `poll` has work.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.zoom.next_deadline(), self.cursor.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn data(&self) -> &ChartData {
        &self.data
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn scales(&self) -> &Scales {
        &self.scales
    }

    pub fn transform(&self) -> Transform {
        self.zoom.transform()
    }

    pub fn cursor_state(&self) -> &CursorState {
        self.cursor.state()
    }

    pub fn last_paint(&self) -> PaintStats {
        self.last_paint
    }

    pub fn counters(&self) -> RenderCounters {
        self.counters
    }

    pub fn raster(&self) -> &R {
        &self.raster
    }

    pub fn vector(&self) -> &V {
        &self.vector
    }

    /// Clear both surfaces and hand them back.
    pub fn teardown(mut self) -> (R, V) {
        self.raster.clear();
        self.vector.clear();
        (self.raster, self.vector)
    }
}
