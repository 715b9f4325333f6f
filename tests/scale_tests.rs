// Scale engine tests

mod common;

use chrono::Duration;
use common::*;
use perfchart::models::Metric;
use perfchart::scale::{BandScale, LinearScale, Scales, TimeScale};

#[test]
fn test_time_scale_round_trips_within_tolerance() {
    let mut scale = TimeScale::new(t0(), t0() + Duration::days(30), (0.0, 1250.0));
    for range in [(0.0, 1250.0), (-3750.0, 11250.0), (-1234.567891, 4321.0)] {
        scale.set_range(range);
        for px in [-500.0, 0.0, 0.5, 333.3, 1249.999, 2000.0] {
            let back = scale.to_pixel(scale.to_value(px));
            assert!((back - px).abs() < 1e-6, "px {px} came back as {back}");
        }
    }
}

#[test]
fn test_time_scale_maps_domain_ends_to_range_ends() {
    let scale = TimeScale::new(t0(), t0() + Duration::hours(3), (0.0, 1250.0));
    assert_eq!(scale.instant_to_pixel(t0()), 0.0);
    assert_eq!(scale.instant_to_pixel(t0() + Duration::hours(3)), 1250.0);
    assert_eq!(scale.instant_at(0.0), Some(t0()));
    let one = scale.instant_to_pixel(t0() + Duration::hours(1));
    let two = scale.instant_to_pixel(t0() + Duration::hours(2));
    assert!(one < two);
}

#[test]
fn test_time_scale_degenerate_domain_maps_to_range_start() {
    let scale = TimeScale::new(t0(), t0(), (10.0, 500.0));
    assert_eq!(scale.instant_to_pixel(t0() + Duration::hours(1)), 10.0);
    assert_eq!(scale.instant_to_pixel(t0()), 10.0);
}

#[test]
fn test_linear_scale_round_trips() {
    let scale = LinearScale::new((0.0, 15.0), (370.0, 10.0));
    for v in [0.0, 1.0, 7.5, 14.999, 15.0] {
        assert!((scale.to_value(scale.to_pixel(v)) - v).abs() < 1e-9);
    }
}

#[test]
fn test_band_scale_covers_vertical_range() {
    let band = BandScale::new(boundaries(4), (370.0, 10.0));
    assert_eq!(band.bandwidth(), 90.0);
    assert_eq!(band.position(0), Some(280.0));
    assert_eq!(band.position(3), Some(10.0));
    assert_eq!(band.center(0), Some(325.0));
}

#[test]
fn test_scales_use_layout_and_headroom() {
    let data = two_lifespans();
    let config = config();
    let scales = Scales::new(&data, &config.layout(), config.scales.metric_step);
    assert_eq!(scales.time.range(), (0.0, 1250.0));
    assert_eq!(scales.buckets.len(), 4);
    // players peak at 9 -> next multiple of 5 above it
    assert_eq!(scales.metrics.max(Metric::Players), 9.0);
    assert_eq!(scales.metrics.get(Metric::Players).domain(), (0.0, 10.0));
    assert_eq!(scales.metrics.get(Metric::Players).range(), (370.0, 10.0));
    // fxsMemory peaks at 109 -> 110
    assert_eq!(scales.metrics.get(Metric::FxsMemory).domain(), (0.0, 110.0));
    // exact multiple still gets headroom
    assert_eq!(scales.metrics.get(Metric::NodeMemory).domain(), (0.0, 55.0));
}

#[test]
fn test_metric_scale_without_snapshots() {
    let mut data = two_lifespans();
    data.lifespans.clear();
    let config = config();
    let scales = Scales::new(&data, &config.layout(), config.scales.metric_step);
    assert_eq!(scales.metrics.get(Metric::Players).domain(), (0.0, 5.0));
}
