use anyhow::{Context, Result};
use perfchart::chart::Chart;
use perfchart::models::Viridis;
use perfchart::surface::{PixelBuffer, Scene};
use perfchart::{config, history, host};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

const USAGE: &str = "usage: perfchart <history.json> <out-prefix> [trace.json]";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let mut args = std::env::args_os().skip(1);
    let history_path = PathBuf::from(args.next().context(USAGE)?);
    let out_prefix = PathBuf::from(args.next().context(USAGE)?);
    let trace_path = args.next().map(PathBuf::from);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "perfchart starting");
    let app_config = config::AppConfig::load()?;
    let layout = app_config.layout();
    let data = history::load_history(&history_path)?;

    // the raster layer sits inside the left/right margins, full chart height
    let raster = PixelBuffer::new(
        layout.drawable_width().ceil() as u32,
        layout.height.ceil() as u32,
    );
    let mut chart = Chart::new(data, &app_config, raster, Scene::default(), Box::new(Viridis))?;

    if let Some(path) = trace_path {
        let trace = host::load_trace(&path)?;
        let events = trace.len();
        let handled = host::replay(&mut chart, trace).await?;
        tracing::info!(events, handled, "trace replayed");
    }

    let counters = chart.counters();
    let paint = chart.last_paint();
    tracing::info!(
        heatmap_paints = counters.heatmap_paints,
        transforms = counters.transforms_applied,
        lifespans = paint.lifespans,
        cells = paint.cells,
        "render finished"
    );

    write_outputs(&chart, &out_prefix)?;
    Ok(())
}

fn write_outputs(chart: &Chart<PixelBuffer, Scene>, prefix: &Path) -> Result<()> {
    let png = prefix.with_extension("png");
    chart.raster().save(&png)?;

    let svg = prefix.with_extension("svg");
    std::fs::write(&svg, chart.vector().to_svg(chart.layout()))
        .with_context(|| format!("writing {}", svg.display()))?;
    tracing::info!(raster = %png.display(), vector = %svg.display(), "outputs written");
    Ok(())
}
