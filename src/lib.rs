// Library for the binary and tests

pub mod axis;
pub mod chart;
pub mod config;
pub mod cull;
pub mod cursor;
pub mod error;
pub mod heatmap;
pub mod history;
pub mod host;
pub mod models;
pub mod overlay;
pub mod scale;
pub mod surface;
pub mod throttle;
pub mod zoom;
