// History file parsing tests

mod common;

use chrono::Duration;
use common::*;
use perfchart::error::ChartError;
use perfchart::history::{load_history, parse_history};

const HISTORY: &str = r#"{
  "boundaries": ["5ms", "10ms", "25ms", "+Inf"],
  "dataStart": 1704067200000,
  "dataEnd": 1704078000000,
  "lifespans": [
    {
      "bootTime": 1704067200000,
      "closeTime": 1704070800000,
      "log": [
        {"start": 1704067200000, "end": 1704067500000, "players": 3, "fxsMemory": 120.5, "nodeMemory": 40, "weightedPerf": [0.9, 0.1, 0, 0]},
        {"start": 1704067500000, "end": 1704067800000, "players": 5, "fxsMemory": 130, "nodeMemory": 42.25, "weightedPerf": [0.7, 0.2, 0.1, 0]}
      ]
    },
    {
      "log": [
        {"start": 1704074400000, "end": 1704074700000, "players": 1, "fxsMemory": 90, "nodeMemory": 30, "weightedPerf": [1, 0, 0, 0]}
      ]
    }
  ]
}"#;

#[test]
fn test_parse_history_reads_camel_case_fields() {
    let data = parse_history(HISTORY).expect("valid history");
    assert_eq!(data.boundaries, ["5ms", "10ms", "25ms", "+Inf"]);
    assert_eq!(data.data_start, t0());
    assert_eq!(data.data_end, t0() + Duration::hours(3));
    assert_eq!(data.lifespans.len(), 2);

    let first = &data.lifespans[0];
    assert_eq!(first.boot_time, Some(t0()));
    assert_eq!(first.close_time, Some(t0() + Duration::hours(1)));
    assert_eq!(first.log[1].players, 5);
    assert_eq!(first.log[0].fxs_memory, 120.5);
    assert_eq!(first.log[1].node_memory, 42.25);
    assert_eq!(first.log[1].weighted_perf, [0.7, 0.2, 0.1, 0.0]);
    assert_eq!(first.log[0].end, t0() + Duration::minutes(5));

    let second = &data.lifespans[1];
    assert_eq!(second.boot_time, None);
    assert_eq!(second.effective_start(), Some(t0() + Duration::hours(2)));
    assert_eq!(
        second.effective_end(),
        Some(t0() + Duration::hours(2) + Duration::minutes(5))
    );
}

#[test]
fn test_effective_bounds_prefer_boot_and_close_time() {
    let data = parse_history(HISTORY).unwrap();
    let first = &data.lifespans[0];
    // closeTime is well after the last snapshot's end
    assert_eq!(first.effective_end(), Some(t0() + Duration::hours(1)));
    assert_eq!(first.effective_start(), Some(t0()));
}

#[test]
fn test_missing_range_is_derived_from_lifespans() {
    let mut value: serde_json::Value = serde_json::from_str(HISTORY).unwrap();
    let object = value.as_object_mut().unwrap();
    object.remove("dataStart");
    object.remove("dataEnd");
    let data = parse_history(&value.to_string()).unwrap();
    assert_eq!(data.data_start, t0());
    assert_eq!(
        data.data_end,
        t0() + Duration::hours(2) + Duration::minutes(5)
    );
}

#[test]
fn test_history_without_lifespans_needs_explicit_range() {
    let err = parse_history(r#"{"boundaries": [], "lifespans": []}"#).unwrap_err();
    assert!(err.to_string().contains("dataStart"));

    let data = parse_history(
        r#"{"boundaries": [], "dataStart": 0, "dataEnd": 1000, "lifespans": []}"#,
    )
    .unwrap();
    assert!(data.lifespans.is_empty());
}

#[test]
fn test_inverted_range_is_rejected() {
    let bad = HISTORY.replace("\"dataEnd\": 1704078000000", "\"dataEnd\": 1704000000000");
    let err = parse_history(&bad).unwrap_err();
    assert!(err.to_string().contains("after dataEnd"));
}

#[test]
fn test_bucket_count_mismatch_is_rejected() {
    let bad = HISTORY.replace("[1, 0, 0, 0]", "[1, 0, 0]");
    let err = parse_history(&bad).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ChartError>(),
        Some(ChartError::BucketMismatch {
            lifespan: 1,
            snapshot: 0,
            expected: 4,
            found: 3
        })
    ));
}

#[test]
fn test_empty_log_is_kept() {
    let with_empty = HISTORY.replace(
        "\"lifespans\": [",
        "\"lifespans\": [{\"bootTime\": 1704067200000, \"log\": []},",
    );
    let data = parse_history(&with_empty).unwrap();
    assert_eq!(data.lifespans.len(), 3);
    assert!(data.lifespans[0].log.is_empty());
    assert_eq!(data.lifespans[0].effective_end(), None);
}

#[test]
fn test_load_history_from_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("history.json");
    std::fs::write(&path, HISTORY).unwrap();
    let data = load_history(&path).unwrap();
    assert_eq!(data.snapshots().count(), 3);

    let err = load_history(&dir.path().join("nope.json")).unwrap_err();
    assert!(err.to_string().contains("nope.json"));
}
