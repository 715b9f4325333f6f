// Chart construction errors. Per-frame rendering never fails; bad records are culled instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    /// A snapshot's `weightedPerf` does not line up with the bucket boundaries.
    /// This is an upstream data-contract mismatch, not a per-record anomaly.
    #[error(
        "lifespan {lifespan} snapshot {snapshot}: weightedPerf has {found} entries, expected {expected} (one per bucket boundary)"
    )]
    BucketMismatch {
        lifespan: usize,
        snapshot: usize,
        expected: usize,
        found: usize,
    },

    #[error("raster surface unavailable (reported size {width}x{height})")]
    RasterUnavailable { width: u32, height: u32 },

    #[error("drawable area is empty: {width}x{height} after margins")]
    InvalidSize { width: f64, height: f64 },
}
