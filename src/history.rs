// History file loading: the JSON data-source contract for one server's full history.

use crate::models::{ChartData, Lifespan};
use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HistoryFile {
    boundaries: Vec<String>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    data_start: Option<DateTime<Utc>>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    data_end: Option<DateTime<Utc>>,
    lifespans: Vec<Lifespan>,
}

/// Parse history JSON. A missing `dataStart`/`dataEnd` defaults to the earliest
/// effective start / latest effective end over all lifespans.
pub fn parse_history(s: &str) -> anyhow::Result<ChartData> {
    let file: HistoryFile = serde_json::from_str(s).context("parsing history")?;

    let mut previous_end: Option<DateTime<Utc>> = None;
    for (index, lifespan) in file.lifespans.iter().enumerate() {
        if lifespan.log.is_empty() {
            tracing::warn!(lifespan = index, "lifespan has no snapshots");
        }
        for snap in &lifespan.log {
            if previous_end.is_some_and(|prev| snap.end < prev) {
                tracing::warn!(
                    lifespan = index,
                    end = %snap.end,
                    "snapshot ends before its predecessor; cursor lookup assumes ascending order"
                );
            }
            previous_end = Some(snap.end);
        }
    }

    let data_start = file
        .data_start
        .or_else(|| file.lifespans.iter().filter_map(Lifespan::effective_start).min());
    let data_end = file
        .data_end
        .or_else(|| file.lifespans.iter().filter_map(Lifespan::effective_end).max());
    let (Some(data_start), Some(data_end)) = (data_start, data_end) else {
        anyhow::bail!("history has no dataStart/dataEnd and no lifespan to derive them from");
    };
    anyhow::ensure!(
        data_start <= data_end,
        "history dataStart {} is after dataEnd {}",
        data_start,
        data_end
    );

    let data = ChartData {
        boundaries: file.boundaries,
        data_start,
        data_end,
        lifespans: file.lifespans,
    };
    data.validate()?;
    Ok(data)
}

pub fn load_history(path: &Path) -> anyhow::Result<ChartData> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("reading history {}", path.display()))?;
    let data = parse_history(&s)?;
    tracing::info!(
        path = %path.display(),
        lifespans = data.lifespans.len(),
        snapshots = data.snapshots().count(),
        buckets = data.boundaries.len(),
        "history loaded"
    );
    Ok(data)
}
