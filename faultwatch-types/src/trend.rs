//! Fixed-width time buckets for fault trends.

/// Width of a fault-trend bucket in seconds (15 minutes).
pub const BUCKET_WIDTH_SECS: u64 = 900;

/// Number of fault records whose timestamps fall in one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FaultBucket {
    /// Bucket start, seconds since the Unix epoch. Always a multiple of the width.
    pub start: u64,
    /// Fault records in `[start, start + width)`.
    pub count: usize,
}

impl FaultBucket {
    /// Start of the bucket enclosing `timestamp`, anchored to the epoch.
    pub const fn start_of(timestamp: u64) -> u64 {
        timestamp / BUCKET_WIDTH_SECS * BUCKET_WIDTH_SECS
    }
}
