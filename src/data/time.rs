//! Clock and timestamp formatting helpers.

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};

/// Current wall-clock time in whole seconds since the Unix epoch.
pub fn now_epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Format epoch seconds as a UTC timestamp, e.g. "2023-11-14 22:13:20+00:00".
pub fn format_utc(timestamp: u64) -> String {
    i64::try_from(timestamp)
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S+00:00").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}

/// Short clock label for chart axes, e.g. "22:13".
pub fn format_clock(timestamp: u64) -> String {
    i64::try_from(timestamp)
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}

/// How long ago `timestamp` was, relative to `now`.
pub fn format_age(timestamp: u64, now: u64) -> String {
    let Some(secs) = now.checked_sub(timestamp) else {
        return "in the future".to_string();
    };
    if secs < 60 {
        format!("{}s ago", secs)
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else if secs < 86_400 {
        format!("{}h {}m ago", secs / 3600, (secs % 3600) / 60)
    } else {
        format!("{}d ago", secs / 86_400)
    }
}
