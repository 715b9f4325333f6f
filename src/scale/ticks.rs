// Tick generation: "nice" linear ticks (1/2/5 x 10^n steps) and calendar-aware time ticks.

use chrono::{Datelike, FixedOffset, NaiveDate, TimeZone, Timelike, Weekday};

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Upper bound on generated ticks, whatever the requested count.
const MAX_TICKS: usize = 2000;

/// Returns `(i1, i2, inc)`: ticks are `i * inc` for `i in i1..=i2`, or `i / -inc` when `inc < 0`
/// (division keeps fractional ticks free of accumulated float error).
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let inv = 10f64.powf(-power) / factor;
        i1 = (start * inv).round();
        i2 = (stop * inv).round();
        if i1 / inv < start {
            i1 += 1.0;
        }
        if i2 / inv > stop {
            i2 -= 1.0;
        }
        inc = -inv;
    } else {
        let step = 10f64.powf(power) * factor;
        i1 = (start / step).round();
        i2 = (stop / step).round();
        if i1 * step < start {
            i1 += 1.0;
        }
        if i2 * step > stop {
            i2 -= 1.0;
        }
        inc = step;
    }
    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

/// Step between nice ticks for roughly `count` ticks over `[start, stop]`.
pub fn tick_step(start: f64, stop: f64, count: f64) -> f64 {
    let (lo, hi) = if stop < start { (stop, start) } else { (start, stop) };
    let (_, _, inc) = tick_spec(lo, hi, count);
    if inc < 0.0 { 1.0 / -inc } else { inc }
}

/// Roughly `count` evenly spaced round values within `[start, stop]`.
pub fn linear_ticks(start: f64, stop: f64, count: f64) -> Vec<f64> {
    if !(count > 0.0) || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let (i1, i2, inc) = tick_spec(lo, hi, count);
    if !(i2 >= i1) {
        return Vec::new();
    }
    let n = ((i2 - i1 + 1.0) as usize).min(MAX_TICKS);
    let mut ticks: Vec<f64> = (0..n)
        .map(|i| {
            let i = i1 + i as f64;
            if inc < 0.0 { i / -inc } else { i * inc }
        })
        .collect();
    if reverse {
        ticks.reverse();
    }
    ticks
}

/// Plain number label: integers without a fractional part.
pub fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

const SECOND: i64 = 1000;
const MINUTE: i64 = 60 * SECOND;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;
/// 1970-01-04, the first Sunday after the epoch.
const SUNDAY_PHASE: i64 = 3 * DAY;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimeInterval {
    Fixed { step: i64, phase: i64 },
    Months(u32),
    Years(i32),
}

const fn fixed(step: i64) -> TimeInterval {
    TimeInterval::Fixed { step, phase: 0 }
}

/// Candidate intervals with their approximate duration.
const INTERVALS: [(TimeInterval, i64); 18] = [
    (fixed(SECOND), SECOND),
    (fixed(5 * SECOND), 5 * SECOND),
    (fixed(15 * SECOND), 15 * SECOND),
    (fixed(30 * SECOND), 30 * SECOND),
    (fixed(MINUTE), MINUTE),
    (fixed(5 * MINUTE), 5 * MINUTE),
    (fixed(15 * MINUTE), 15 * MINUTE),
    (fixed(30 * MINUTE), 30 * MINUTE),
    (fixed(HOUR), HOUR),
    (fixed(3 * HOUR), 3 * HOUR),
    (fixed(6 * HOUR), 6 * HOUR),
    (fixed(12 * HOUR), 12 * HOUR),
    (fixed(DAY), DAY),
    (fixed(2 * DAY), 2 * DAY),
    (
        TimeInterval::Fixed {
            step: WEEK,
            phase: SUNDAY_PHASE,
        },
        WEEK,
    ),
    (TimeInterval::Months(1), MONTH),
    (TimeInterval::Months(3), 3 * MONTH),
    (TimeInterval::Years(1), YEAR),
];

fn pick_interval(start: f64, stop: f64, count: f64) -> TimeInterval {
    let target = (stop - start).abs() / count;
    let i = INTERVALS.partition_point(|(_, duration)| (*duration as f64) <= target);
    if i == INTERVALS.len() {
        let step = tick_step(start / YEAR as f64, stop / YEAR as f64, count);
        return TimeInterval::Years((step.floor() as i32).max(1));
    }
    if i == 0 {
        let step = tick_step(start, stop, count).max(1.0);
        return fixed(step.round() as i64);
    }
    let (below, below_ms) = INTERVALS[i - 1];
    let (above, above_ms) = INTERVALS[i];
    if target / (below_ms as f64) < (above_ms as f64) / target {
        below
    } else {
        above
    }
}

/// Around `count` ticks on calendar boundaries of `offset` local time, in epoch milliseconds.
pub fn time_ticks(start: f64, stop: f64, count: f64, offset: FixedOffset) -> Vec<f64> {
    if !(count > 0.0) || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    let (lo, hi) = if stop < start { (stop, start) } else { (start, stop) };
    if lo == hi {
        return vec![lo];
    }
    let offset_ms = offset.local_minus_utc() as f64 * 1000.0;
    match pick_interval(lo, hi, count) {
        TimeInterval::Fixed { step, phase } => {
            let step = step as f64;
            let shift = offset_ms - phase as f64;
            let first = ((lo + shift) / step).ceil() * step;
            (0..MAX_TICKS)
                .map(|i| first + step * i as f64 - shift)
                .take_while(|t| *t <= hi)
                .collect()
        }
        TimeInterval::Months(n) => month_starts(lo, hi, offset, |_, m| (m - 1) % n == 0),
        TimeInterval::Years(n) => month_starts(lo, hi, offset, |y, m| m == 1 && y % n == 0),
    }
}

fn local_month_start(offset: FixedOffset, year: i32, month: u32) -> Option<f64> {
    let midnight = NaiveDate::from_ymd_opt(year, month, 1)?.and_hms_opt(0, 0, 0)?;
    let local = offset.from_local_datetime(&midnight).single()?;
    Some(local.timestamp_millis() as f64)
}

fn month_starts(
    lo: f64,
    hi: f64,
    offset: FixedOffset,
    keep: impl Fn(i32, u32) -> bool,
) -> Vec<f64> {
    let Some(first) = offset.timestamp_millis_opt(lo as i64).single() else {
        return Vec::new();
    };
    let (mut year, mut month) = (first.year(), first.month());
    let mut ticks = Vec::new();
    while ticks.len() < MAX_TICKS {
        let Some(ms) = local_month_start(offset, year, month) else {
            break;
        };
        if ms > hi {
            break;
        }
        if ms >= lo && keep(year, month) {
            ticks.push(ms);
        }
        month += 1;
        if month > 12 {
            month = 1;
            year += 1;
        }
    }
    ticks
}

/// Label at the coarsest calendar unit the tick falls on.
pub fn format_time_tick(ms: f64, offset: FixedOffset) -> String {
    let Some(dt) = offset.timestamp_millis_opt(ms.round() as i64).single() else {
        return String::new();
    };
    let pattern = if dt.nanosecond() != 0 {
        "%.3f"
    } else if dt.second() != 0 {
        ":%S"
    } else if dt.minute() != 0 {
        "%H:%M"
    } else if dt.hour() != 0 {
        "%H:00"
    } else if dt.day() != 1 {
        if dt.weekday() == Weekday::Sun {
            "%b %d"
        } else {
            "%a %d"
        }
    } else if dt.month() != 1 {
        "%B"
    } else {
        "%Y"
    };
    dt.format(pattern).to_string()
}
