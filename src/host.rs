// Host event loop: feeds input events into a chart and fires its rate-limit deadlines.
// Runs on a single-threaded runtime; the chart itself is never shared.

use crate::chart::Chart;
use crate::models::{InputEvent, TimedEvent};
use crate::surface::{RasterSurface, VectorSurface};
use anyhow::Context;
use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep, sleep_until};

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Placeholder sleep target when nothing is pending; the branch is disabled then.
const IDLE_WAIT: Duration = Duration::from_secs(3600);

/// Drive `chart` until `events` closes, then let pending deadlines fire.
/// Returns the number of events handled.
pub async fn run<R, V>(chart: &mut Chart<R, V>, mut events: mpsc::Receiver<InputEvent>) -> usize
where
    R: RasterSurface,
    V: VectorSurface,
{
    let mut handled = 0;
    loop {
        let deadline = chart.next_deadline().map(Instant::from_std);
        let wake = deadline.unwrap_or_else(|| Instant::now() + IDLE_WAIT);
        tokio::select! {
            event = events.recv() => match event {
                Some(event) => {
                    tracing::trace!(?event, "input");
                    chart.handle(Instant::now().into_std(), event);
                    handled += 1;
                }
                None => break,
            },
            _ = sleep_until(wake), if deadline.is_some() => {
                chart.poll(Instant::now().into_std());
            }
        }
    }

    while let Some(deadline) = chart.next_deadline() {
        sleep_until(Instant::from_std(deadline)).await;
        chart.poll(Instant::now().into_std());
    }
    tracing::debug!(operation = "host_run", handled, "input closed");
    handled
}

pub fn load_trace(path: &Path) -> anyhow::Result<Vec<TimedEvent>> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("reading trace {}", path.display()))?;
    serde_json::from_str(&s).with_context(|| format!("parsing trace {}", path.display()))
}

/// Replay a recorded trace through `run`, honouring each event's delay.
pub async fn replay<R, V>(chart: &mut Chart<R, V>, trace: Vec<TimedEvent>) -> anyhow::Result<usize>
where
    R: RasterSurface,
    V: VectorSurface,
{
    let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
    let producer = tokio::spawn(async move {
        for timed in trace {
            if timed.after_ms > 0 {
                sleep(Duration::from_millis(timed.after_ms)).await;
            }
            if tx.send(timed.event).await.is_err() {
                break;
            }
        }
    });
    let handled = run(chart, rx).await;
    producer.await.context("trace producer")?;
    Ok(handled)
}
