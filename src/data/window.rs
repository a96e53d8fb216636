//! Trailing time-window filtering.

use std::collections::BTreeSet;

use faultwatch_types::{TelemetryRecord, WindowMinutes};

/// Earliest timestamp still inside `window` when the clock reads `now`.
pub fn cutoff(now: u64, window: WindowMinutes) -> u64 {
    now.saturating_sub(window.as_secs())
}

/// Whether a record taken at `timestamp` falls inside the window.
///
/// Records stamped after `now` (clock skew between producers) count as
/// inside.
pub fn within_window(timestamp: u64, now: u64, window: WindowMinutes) -> bool {
    timestamp >= cutoff(now, window)
}

/// Every record inside the window, for all devices.
pub fn filter_window<'a>(
    records: &'a [TelemetryRecord],
    now: u64,
    window: WindowMinutes,
) -> Vec<&'a TelemetryRecord> {
    records
        .iter()
        .filter(|r| within_window(r.timestamp, now, window))
        .collect()
}

/// Distinct device ids, sorted.
pub fn device_ids<'a, I>(records: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a TelemetryRecord>,
{
    records
        .into_iter()
        .map(|r| r.device_id.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Which measurement a chart series plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measurement {
    Temperature,
    Vibration,
}

impl Measurement {
    fn read(self, record: &TelemetryRecord) -> f64 {
        match self {
            Measurement::Temperature => record.temperature,
            Measurement::Vibration => record.vibration,
        }
    }
}

/// One device's records inside the trailing window, newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredWindow {
    pub device_id: String,
    pub window: WindowMinutes,
    pub records: Vec<TelemetryRecord>,
}

impl FilteredWindow {
    /// Select `device_id`'s records inside the window ending at `now`.
    pub fn for_device(
        records: &[TelemetryRecord],
        device_id: &str,
        now: u64,
        window: WindowMinutes,
    ) -> Self {
        let mut selected: Vec<TelemetryRecord> = records
            .iter()
            .filter(|r| r.device_id == device_id && within_window(r.timestamp, now, window))
            .cloned()
            .collect();
        selected.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        Self {
            device_id: device_id.to_string(),
            window,
            records: selected,
        }
    }

    /// The most recent record, if any.
    pub fn latest(&self) -> Option<&TelemetryRecord> {
        self.records.first()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// `(timestamp, value)` points in ascending time order.
    pub fn series(&self, measurement: Measurement) -> Vec<(f64, f64)> {
        self.records
            .iter()
            .rev()
            .map(|r| (r.timestamp as f64, measurement.read(r)))
            .collect()
    }
}
