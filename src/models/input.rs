// Host input events in chart-space pixels.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InputEvent {
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerLeave,
    /// Wheel zoom about `(x, y)`; positive `delta_y` zooms out.
    #[serde(rename_all = "camelCase")]
    Wheel {
        x: f64,
        y: f64,
        delta_y: f64,
    },
    /// Drag pan by a pixel delta.
    Pan {
        dx: f64,
        dy: f64,
    },
    /// Programmatic zoom to scale `k`, keeping `(x, y)` fixed on screen.
    ScaleTo {
        k: f64,
        x: f64,
        y: f64,
    },
}

/// An input event replayed `after_ms` milliseconds after the previous one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedEvent {
    #[serde(default)]
    pub after_ms: u64,
    pub event: InputEvent,
}
