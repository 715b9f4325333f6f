// Chart domain models: performance history, layout geometry, colors, input events.

mod color;
mod geometry;
mod input;
mod lifespan;

pub use color::{ColorMap, Rgb, Viridis};
pub use geometry::{Layout, Margins, Point, Transform};
pub use input::{InputEvent, TimedEvent};
pub use lifespan::{ChartData, Lifespan, Metric, Snapshot};
