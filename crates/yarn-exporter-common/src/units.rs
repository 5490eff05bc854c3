use chrono::{DateTime, Utc};

const BYTES_PER_MEGABYTE: i64 = 1_048_576;

/// Converts binary megabytes, as reported by the resource manager, to bytes.
/// Negative inputs are kept: an over-allocated cluster reports negative
/// available memory.
pub fn megabytes_to_bytes(megabytes: i64) -> i64 {
    megabytes.saturating_mul(BYTES_PER_MEGABYTE)
}

pub fn to_epoch_millis(timestamp: DateTime<Utc>) -> i64 {
    timestamp.timestamp_millis()
}
