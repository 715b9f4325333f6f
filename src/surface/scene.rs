// Retained vector scene: lifespan paths, three axes and the cursor overlay. Exports SVG.

use super::{AxisElement, AxisKind, CursorElement, PathElement, VectorSurface};
use crate::models::{Layout, Point};
use std::collections::BTreeMap;
use std::fmt::Write;

#[derive(Debug, Clone, Default)]
pub struct Scene {
    paths: BTreeMap<usize, Vec<PathElement>>,
    axes: BTreeMap<AxisKind, AxisElement>,
    cursor: Option<CursorElement>,
}

impl Scene {
    pub fn paths(&self, lifespan: usize) -> &[PathElement] {
        self.paths.get(&lifespan).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total bound path elements across all lifespans.
    pub fn path_count(&self) -> usize {
        self.paths.values().map(Vec::len).sum()
    }

    pub fn axis(&self, kind: AxisKind) -> Option<&AxisElement> {
        self.axes.get(&kind)
    }

    pub fn cursor(&self) -> Option<&CursorElement> {
        self.cursor.as_ref()
    }

    /// Render the scene as a standalone SVG document of `layout`'s size.
    pub fn to_svg(&self, layout: &Layout) -> String {
        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = layout.width,
            h = layout.height
        );
        let _ = writeln!(
            svg,
            r#"<clipPath id="plot-clip"><rect x="0" y="{}" width="{}" height="{}"/></clipPath>"#,
            layout.margins.top,
            layout.drawable_width(),
            layout.height
        );
        let _ = writeln!(
            svg,
            r#"<g transform="translate({}, 0)">"#,
            layout.margins.left
        );
        let _ = writeln!(svg, r#"<g clip-path="url(#plot-clip)">"#);
        for (lifespan, paths) in &self.paths {
            let _ = writeln!(svg, r#"<g class="lifespan" data-index="{lifespan}">"#);
            for path in paths {
                let _ = writeln!(
                    svg,
                    r#"<polyline fill="none" stroke="{}" stroke-width="{}" stroke-linejoin="round" stroke-linecap="round" points="{}"/>"#,
                    path.stroke.color,
                    path.stroke.width,
                    points_attr(&path.points)
                );
            }
            svg.push_str("</g>\n");
        }
        if let Some(cursor) = self.cursor.as_ref().filter(|c| !c.is_hidden()) {
            write_cursor(&mut svg, cursor);
        }
        svg.push_str("</g>\n");
        for axis in self.axes.values() {
            write_axis(&mut svg, axis);
        }
        svg.push_str("</g>\n</svg>\n");
        svg
    }
}

fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{:.2},{:.2}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn write_cursor(svg: &mut String, cursor: &CursorElement) {
    const COLOR: &str = "rgba(216, 245, 19, 0.75)";
    for line in [cursor.vertical, cursor.horizontal] {
        let _ = writeln!(
            svg,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{COLOR}" stroke-width="1" stroke-dasharray="3,3"/>"#,
            line.from.x, line.from.y, line.to.x, line.to.y
        );
    }
    let _ = writeln!(
        svg,
        r#"<text x="{}" y="{}" fill="rgb(216, 245, 19)" font-size="12">{}</text>"#,
        cursor.label_at.x,
        cursor.label_at.y,
        escape(&cursor.label)
    );
    let _ = writeln!(
        svg,
        r#"<circle cx="{}" cy="{}" r="4" fill="red"/>"#,
        cursor.dot.x, cursor.dot.y
    );
}

fn write_axis(svg: &mut String, axis: &AxisElement) {
    const TICK: f64 = 6.0;
    let _ = writeln!(
        svg,
        r#"<g class="axis-{:?}" transform="translate({}, {})" font-size="10" fill="currentColor">"#,
        axis.kind, axis.origin.x, axis.origin.y
    );
    for tick in &axis.ticks {
        let (line, text) = match axis.kind {
            AxisKind::Time => (
                format!(r#"x1="{p}" y1="0" x2="{p}" y2="{TICK}""#, p = tick.position),
                format!(
                    r#"x="{}" y="{}" text-anchor="middle""#,
                    tick.position,
                    TICK + 12.0
                ),
            ),
            AxisKind::Buckets => (
                format!(r#"x1="0" y1="{p}" x2="{TICK}" y2="{p}""#, p = tick.position),
                format!(r#"x="{}" y="{}" dy="0.32em""#, TICK + 3.0, tick.position),
            ),
            AxisKind::Metric => (
                format!(r#"x1="-{TICK}" y1="{p}" x2="0" y2="{p}""#, p = tick.position),
                format!(
                    r#"x="-{}" y="{}" dy="0.32em" text-anchor="end""#,
                    TICK + 3.0,
                    tick.position
                ),
            ),
        };
        let _ = writeln!(
            svg,
            r#"<line {line} stroke="currentColor"/><text {text}>{}</text>"#,
            escape(&tick.label)
        );
    }
    svg.push_str("</g>\n");
}

impl VectorSurface for Scene {
    fn bind_paths(&mut self, lifespan: usize, paths: Vec<PathElement>) {
        if paths.is_empty() {
            self.paths.remove(&lifespan);
        } else {
            self.paths.insert(lifespan, paths);
        }
    }

    fn update_axis(&mut self, axis: &AxisElement) {
        self.axes.insert(axis.kind, axis.clone());
    }

    fn update_cursor(&mut self, cursor: &CursorElement) {
        self.cursor = Some(cursor.clone());
    }

    fn clear(&mut self) {
        self.paths.clear();
        self.axes.clear();
        self.cursor = None;
    }
}
