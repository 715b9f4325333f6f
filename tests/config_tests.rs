// Config loading and validation tests

use perfchart::config::AppConfig;
use perfchart::models::{Metric, Rgb};
use std::time::Duration;

const VALID_CONFIG: &str = r##"
[chart]
width = 960
height = 320
utc_offset_minutes = 120

[margins]
top = 12
left = 48

[heatmap]
min_lifespan_width = 4
empty_threshold = 0.002
background = "#101010"

[overlay]
metric = "fxsMemory"
line_color = "#ffffff"

[cursor]
cooldown_ms = 16
max_gap_secs = 600
leave_delay_ms = 200

[zoom]
min_scale = 1
max_scale = 24
cooldown_ms = 16
initial_scale = 3

[scales]
metric_step = 10
"##;

#[test]
fn test_config_loads_from_str() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("load_from_str");
    assert_eq!(config.chart.width, 960.0);
    assert_eq!(config.chart.height, 320.0);
    assert_eq!(config.margins.top, 12.0);
    assert_eq!(config.margins.left, 48.0);
    // unset margins keep their defaults
    assert_eq!(config.margins.right, 60.0);
    assert_eq!(config.heatmap.empty_threshold, 0.002);
    assert_eq!(config.background().unwrap(), Rgb::new(0x10, 0x10, 0x10));
    assert_eq!(config.overlay.metric, Metric::FxsMemory);
    assert_eq!(config.overlay.halo_width, 6.0);
    assert_eq!(config.line_color().unwrap(), Rgb::new(255, 255, 255));
    assert_eq!(config.cursor_cooldown(), Duration::from_millis(16));
    assert_eq!(config.cursor.max_gap_secs, 600);
    assert_eq!(config.zoom.max_scale, 24.0);
    assert_eq!(config.zoom_cooldown(), Duration::from_millis(16));
    assert_eq!(config.zoom.initial_scale, 3.0);
    assert_eq!(config.scales.metric_step, 10.0);
    assert_eq!(config.utc_offset().unwrap().local_minus_utc(), 7200);
}

#[test]
fn test_config_defaults_when_empty() {
    let config = AppConfig::load_from_str("").expect("empty config");
    assert_eq!(config.chart.width, 1350.0);
    assert_eq!(config.chart.height, 400.0);
    let layout = config.layout();
    assert_eq!(layout.drawable_width(), 1250.0);
    assert_eq!(layout.drawable_height(), 360.0);
    assert_eq!(config.heatmap.min_lifespan_width, 5.0);
    assert_eq!(config.heatmap.empty_threshold, 0.001);
    assert_eq!(config.overlay.metric, Metric::Players);
    assert_eq!(config.line_color().unwrap(), Rgb::new(204, 203, 203));
    assert_eq!(config.cursor.cooldown_ms, 20);
    assert_eq!(config.cursor.max_gap_secs, 1200);
    assert_eq!(config.cursor.leave_delay_ms, 150);
    assert_eq!((config.zoom.min_scale, config.zoom.max_scale), (1.0, 12.0));
    assert_eq!(config.zoom.initial_scale, 2.0);
    assert_eq!(config.scales.metric_step, 5.0);
}

#[test]
fn test_config_validation_rejects_margins_wider_than_chart() {
    let bad = VALID_CONFIG.replace("width = 960", "width = 100");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("chart.width"));
}

#[test]
fn test_config_validation_rejects_margins_taller_than_chart() {
    let bad = VALID_CONFIG.replace("height = 320", "height = 40");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("chart.height"));
}

#[test]
fn test_config_validation_rejects_negative_margin() {
    let bad = VALID_CONFIG.replace("top = 12", "top = -1");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("margins"));
}

#[test]
fn test_config_validation_rejects_utc_offset_out_of_range() {
    let bad = VALID_CONFIG.replace("utc_offset_minutes = 120", "utc_offset_minutes = 2000");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("utc_offset_minutes"));
}

#[test]
fn test_config_validation_rejects_empty_threshold_out_of_range() {
    let bad = VALID_CONFIG.replace("empty_threshold = 0.002", "empty_threshold = 1.5");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("heatmap.empty_threshold"));
}

#[test]
fn test_config_validation_rejects_bad_color() {
    let bad = VALID_CONFIG.replace("background = \"#101010\"", "background = \"red\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("heatmap.background"));

    let bad = VALID_CONFIG.replace("line_color = \"#ffffff\"", "line_color = \"#fff\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("overlay.line_color"));
}

#[test]
fn test_config_validation_rejects_cursor_cooldown_zero() {
    let bad = VALID_CONFIG.replacen("cooldown_ms = 16", "cooldown_ms = 0", 1);
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("cursor.cooldown_ms"));
}

#[test]
fn test_config_validation_rejects_max_gap_zero() {
    let bad = VALID_CONFIG.replace("max_gap_secs = 600", "max_gap_secs = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("cursor.max_gap_secs"));
}

#[test]
fn test_config_validation_rejects_inverted_scale_extent() {
    let bad = VALID_CONFIG.replace("max_scale = 24", "max_scale = 0.5");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("zoom.min_scale"));
}

#[test]
fn test_config_validation_rejects_zoom_cooldown_zero() {
    let bad = VALID_CONFIG.replace(
        "max_scale = 24\ncooldown_ms = 16",
        "max_scale = 24\ncooldown_ms = 0",
    );
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("zoom.cooldown_ms"));
}

#[test]
fn test_config_validation_rejects_initial_scale_zero() {
    let bad = VALID_CONFIG.replace("initial_scale = 3", "initial_scale = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("zoom.initial_scale"));
}

#[test]
fn test_config_validation_rejects_metric_step_zero() {
    let bad = VALID_CONFIG.replace("metric_step = 10", "metric_step = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("scales.metric_step"));
}

#[test]
fn test_config_validation_rejects_unknown_metric() {
    let bad = VALID_CONFIG.replace("metric = \"fxsMemory\"", "metric = \"cpu\"");
    assert!(AppConfig::load_from_str(&bad).is_err());
}

#[test]
fn test_config_validation_rejects_invalid_toml() {
    let err = AppConfig::load_from_str("not valid toml [[[").unwrap_err();
    assert!(!err.to_string().is_empty());
}

#[test]
fn test_config_load_from_file_via_env() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, VALID_CONFIG).unwrap();
    unsafe { std::env::set_var("CONFIG_FILE", path.to_str().unwrap()) };
    let result = AppConfig::load();
    // an explicitly named file must exist
    unsafe { std::env::set_var("CONFIG_FILE", dir.path().join("missing.toml")) };
    let missing = AppConfig::load();
    unsafe { std::env::remove_var("CONFIG_FILE") };

    let config = result.expect("load from CONFIG_FILE");
    assert_eq!(config.chart.width, 960.0);
    assert_eq!(config.overlay.metric, Metric::FxsMemory);
    assert!(missing.unwrap_err().to_string().contains("missing.toml"));
}
