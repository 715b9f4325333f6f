use crate::models::{Layout, Margins, Metric, Rgb};
use chrono::FixedOffset;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub chart: ChartConfig,
    #[serde(default)]
    pub margins: Margins,
    #[serde(default)]
    pub heatmap: HeatmapConfig,
    #[serde(default)]
    pub overlay: OverlayConfig,
    #[serde(default)]
    pub cursor: CursorConfig,
    #[serde(default)]
    pub zoom: ZoomConfig,
    #[serde(default)]
    pub scales: ScalesConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    /// Fixed offset used for time axis labels and calendar-aligned ticks.
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

fn default_width() -> f64 {
    1350.0
}

fn default_height() -> f64 {
    400.0
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            utc_offset_minutes: 0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    /// Lifespans narrower than this (px) are not drawn at all, on either layer.
    pub min_lifespan_width: f64,
    /// Bucket values at or below this are painted with the muted empty color.
    pub empty_threshold: f64,
    pub background: String,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            min_lifespan_width: 5.0,
            empty_threshold: 0.001,
            background: "#15171c".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub metric: Metric,
    pub halo_width: f64,
    pub line_width: f64,
    pub line_color: String,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            metric: Metric::Players,
            halo_width: 6.0,
            line_width: 2.0,
            line_color: "#cccbcb".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    pub cooldown_ms: u64,
    /// Samples further than this from the pointer's instant are not shown.
    pub max_gap_secs: u64,
    /// Delay between the pointer leaving the chart and the cursor being hidden.
    pub leave_delay_ms: u64,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: 20,
            max_gap_secs: 20 * 60,
            leave_delay_ms: 150,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    pub cooldown_ms: u64,
    /// Zoom applied at construction, anchored at the data end. 1 leaves the chart unzoomed.
    pub initial_scale: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min_scale: 1.0,
            max_scale: 12.0,
            cooldown_ms: 20,
            initial_scale: 2.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScalesConfig {
    /// Metric axis upper bounds are rounded up past the maximum to a multiple of this.
    pub metric_step: f64,
}

impl Default for ScalesConfig {
    fn default() -> Self {
        Self { metric_step: 5.0 }
    }
}

impl AppConfig {
    /// Reads `CONFIG_FILE` (default `config.toml`). Without `CONFIG_FILE` a missing file
    /// means built-in defaults.
    pub fn load() -> anyhow::Result<Self> {
        let explicit = std::env::var("CONFIG_FILE").ok();
        let path = explicit.clone().unwrap_or_else(|| "config.toml".into());
        match std::fs::read_to_string(&path) {
            Ok(s) => Self::load_from_str(&s),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && explicit.is_none() => {
                tracing::debug!(path = %path, "no config file, using defaults");
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
            Err(e) => Err(anyhow::anyhow!("reading config {}: {}", path, e)),
        }
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn layout(&self) -> Layout {
        Layout {
            width: self.chart.width,
            height: self.chart.height,
            margins: self.margins,
        }
    }

    pub fn utc_offset(&self) -> anyhow::Result<FixedOffset> {
        FixedOffset::east_opt(self.chart.utc_offset_minutes * 60).ok_or_else(|| {
            anyhow::anyhow!(
                "chart.utc_offset_minutes out of range: {}",
                self.chart.utc_offset_minutes
            )
        })
    }

    pub fn background(&self) -> anyhow::Result<Rgb> {
        parse_color("heatmap.background", &self.heatmap.background)
    }

    pub fn line_color(&self) -> anyhow::Result<Rgb> {
        parse_color("overlay.line_color", &self.overlay.line_color)
    }

    pub fn cursor_cooldown(&self) -> Duration {
        Duration::from_millis(self.cursor.cooldown_ms)
    }

    pub fn zoom_cooldown(&self) -> Duration {
        Duration::from_millis(self.zoom.cooldown_ms)
    }

    fn validate(&self) -> anyhow::Result<()> {
        let layout = self.layout();
        anyhow::ensure!(
            layout.drawable_width() > 0.0,
            "chart.width must exceed margins.left + margins.right, got width {}",
            self.chart.width
        );
        anyhow::ensure!(
            layout.drawable_height() > 0.0,
            "chart.height must exceed margins.top + margins.bottom, got height {}",
            self.chart.height
        );
        let margins = &self.margins;
        anyhow::ensure!(
            [
                margins.top,
                margins.right,
                margins.bottom,
                margins.left,
                margins.axis
            ]
            .iter()
            .all(|m| m.is_finite() && *m >= 0.0),
            "margins must be finite and >= 0"
        );
        self.utc_offset()?;
        anyhow::ensure!(
            self.heatmap.min_lifespan_width >= 0.0,
            "heatmap.min_lifespan_width must be >= 0, got {}",
            self.heatmap.min_lifespan_width
        );
        anyhow::ensure!(
            (0.0..1.0).contains(&self.heatmap.empty_threshold),
            "heatmap.empty_threshold must be in [0, 1), got {}",
            self.heatmap.empty_threshold
        );
        self.background()?;
        self.line_color()?;
        anyhow::ensure!(
            self.overlay.halo_width > 0.0 && self.overlay.line_width > 0.0,
            "overlay.halo_width and overlay.line_width must be > 0"
        );
        anyhow::ensure!(
            self.cursor.cooldown_ms > 0,
            "cursor.cooldown_ms must be > 0, got {}",
            self.cursor.cooldown_ms
        );
        anyhow::ensure!(
            self.cursor.max_gap_secs > 0,
            "cursor.max_gap_secs must be > 0, got {}",
            self.cursor.max_gap_secs
        );
        anyhow::ensure!(
            self.zoom.min_scale > 0.0 && self.zoom.min_scale <= self.zoom.max_scale,
            "zoom.min_scale must be > 0 and <= zoom.max_scale, got [{}, {}]",
            self.zoom.min_scale,
            self.zoom.max_scale
        );
        anyhow::ensure!(
            self.zoom.cooldown_ms > 0,
            "zoom.cooldown_ms must be > 0, got {}",
            self.zoom.cooldown_ms
        );
        anyhow::ensure!(
            self.zoom.initial_scale > 0.0,
            "zoom.initial_scale must be > 0, got {}",
            self.zoom.initial_scale
        );
        anyhow::ensure!(
            self.scales.metric_step > 0.0,
            "scales.metric_step must be > 0, got {}",
            self.scales.metric_step
        );
        Ok(())
    }
}

fn parse_color(field: &str, value: &str) -> anyhow::Result<Rgb> {
    Rgb::from_hex(value).ok_or_else(|| anyhow::anyhow!("{} must be #rrggbb, got {:?}", field, value))
}
