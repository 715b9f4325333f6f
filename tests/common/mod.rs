// Shared test helpers
#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use perfchart::config::AppConfig;
use perfchart::models::*;
use perfchart::surface::{
    AxisElement, AxisKind, CursorElement, PathElement, RasterSurface, VectorSurface,
};
use std::cell::RefCell;
use std::rc::Rc;

/// 2024-01-01T00:00:00Z
pub fn t0() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(1_704_067_200_000).unwrap()
}

pub fn boundaries(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("{}%", (i + 1) * 100 / n)).collect()
}

pub fn snapshot(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    players: u32,
    weighted_perf: Vec<f64>,
) -> Snapshot {
    Snapshot {
        start,
        end,
        players,
        fxs_memory: 100.0 + players as f64,
        node_memory: 50.0,
        weighted_perf,
    }
}

/// `count` back-to-back snapshots of `step` each, starting at `start`.
/// Players cycle 0..=9; every snapshot puts all load in bucket 0.
pub fn lifespan(start: DateTime<Utc>, step: Duration, count: usize, buckets: usize) -> Lifespan {
    let log = (0..count)
        .map(|i| {
            let s = start + step * i as i32;
            let mut perf = vec![0.0; buckets];
            if buckets > 0 {
                perf[0] = 0.5;
            }
            snapshot(s, s + step, (i % 10) as u32, perf)
        })
        .collect();
    Lifespan {
        boot_time: None,
        close_time: None,
        log,
    }
}

/// Three hours of range: a 1h lifespan with 10 snapshots at t0 and a 5s lifespan at t0+2h.
pub fn two_lifespans() -> ChartData {
    ChartData {
        boundaries: boundaries(4),
        data_start: t0(),
        data_end: t0() + Duration::hours(3),
        lifespans: vec![
            lifespan(t0(), Duration::minutes(6), 10, 4),
            lifespan(t0() + Duration::hours(2), Duration::seconds(5), 1, 4),
        ],
    }
}

/// Default layout: 1350x400, drawable 1250x360, vertical range (370, 10).
/// Defaults, but starting unzoomed so the full range maps to the drawable width.
pub fn config() -> AppConfig {
    AppConfig::load_from_str("[zoom]\ninitial_scale = 1").unwrap()
}

/// One drawing call seen by a recording surface.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Fill(Rgb),
    Rect {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: Rgb,
    },
    ClearRaster,
    Paths {
        lifespan: usize,
        paths: Vec<PathElement>,
    },
    Axis(AxisElement),
    Cursor(CursorElement),
    ClearVector,
}

impl Op {
    /// Coarse layer name for ordering checks.
    pub fn layer(&self) -> &'static str {
        match self {
            Op::Fill(_) | Op::Rect { .. } | Op::ClearRaster => "heatmap",
            Op::Paths { .. } => "overlay",
            Op::Axis(_) => "axis",
            Op::Cursor(_) => "cursor",
            Op::ClearVector => "clear",
        }
    }
}

pub type OpLog = Rc<RefCell<Vec<Op>>>;

pub struct RecordingRaster {
    pub width: u32,
    pub height: u32,
    pub log: OpLog,
}

impl RasterSurface for RecordingRaster {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill(&mut self, color: Rgb) {
        self.log.borrow_mut().push(Op::Fill(color));
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Rgb) {
        self.log.borrow_mut().push(Op::Rect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn clear(&mut self) {
        self.log.borrow_mut().push(Op::ClearRaster);
    }
}

pub struct RecordingVector {
    pub log: OpLog,
}

impl VectorSurface for RecordingVector {
    fn bind_paths(&mut self, lifespan: usize, paths: Vec<PathElement>) {
        self.log.borrow_mut().push(Op::Paths { lifespan, paths });
    }

    fn update_axis(&mut self, axis: &AxisElement) {
        self.log.borrow_mut().push(Op::Axis(axis.clone()));
    }

    fn update_cursor(&mut self, cursor: &CursorElement) {
        self.log.borrow_mut().push(Op::Cursor(cursor.clone()));
    }

    fn clear(&mut self) {
        self.log.borrow_mut().push(Op::ClearVector);
    }
}

/// A raster/vector pair writing into one shared log.
pub fn recording_surfaces(width: u32, height: u32) -> (RecordingRaster, RecordingVector, OpLog) {
    let log: OpLog = Rc::new(RefCell::new(Vec::new()));
    (
        RecordingRaster {
            width,
            height,
            log: log.clone(),
        },
        RecordingVector { log: log.clone() },
        log,
    )
}

/// Layers in the order they were first touched, consecutive repeats collapsed.
pub fn layer_sequence(ops: &[Op]) -> Vec<&'static str> {
    let mut seq: Vec<&'static str> = Vec::new();
    for op in ops {
        if seq.last() != Some(&op.layer()) {
            seq.push(op.layer());
        }
    }
    seq
}

pub fn axis_updates(ops: &[Op], kind: AxisKind) -> Vec<AxisElement> {
    ops.iter()
        .filter_map(|op| match op {
            Op::Axis(axis) if axis.kind == kind => Some(axis.clone()),
            _ => None,
        })
        .collect()
}
