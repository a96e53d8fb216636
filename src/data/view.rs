//! The per-refresh dashboard view.
//!
//! [`build_view`] is the whole pipeline after normalization: window filter,
//! device selection, status summary and fault trend. It is a pure function
//! of its inputs, so a refresh cycle can be tested without a timer or a
//! terminal.

use faultwatch_types::{FaultBucket, TelemetryRecord, WindowMinutes};

use super::summary::StatusSummary;
use super::trend::fault_buckets;
use super::window::{device_ids, filter_window, FilteredWindow};

/// What the operator has selected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub window: WindowMinutes,
    /// Preferred device. Falls back to the first observed device when absent
    /// from the current window.
    pub device: Option<String>,
}

impl Selection {
    pub fn new(window: WindowMinutes, device: Option<String>) -> Self {
        Self { window, device }
    }
}

/// Everything derived for the selected device.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceView {
    pub window: FilteredWindow,
    pub summary: StatusSummary,
    pub buckets: Vec<FaultBucket>,
}

impl DeviceView {
    pub fn device_id(&self) -> &str {
        &self.window.device_id
    }

    /// The device's most recent reading; the inference input.
    pub fn latest(&self) -> Option<&TelemetryRecord> {
        self.window.latest()
    }
}

/// A consistent snapshot of the dashboard for one refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    /// Reference time the window was computed against.
    pub now: u64,
    pub window: WindowMinutes,
    /// Devices with at least one record in the window, sorted.
    pub devices: Vec<String>,
    /// Records in the window across all devices.
    pub in_window: usize,
    /// `None` when the window holds no records.
    pub device: Option<DeviceView>,
}

impl DashboardView {
    pub fn is_empty(&self) -> bool {
        self.in_window == 0
    }

    /// Index of the selected device in `devices`.
    pub fn selected_index(&self) -> Option<usize> {
        let device = self.device.as_ref()?;
        self.devices.iter().position(|d| d == device.device_id())
    }
}

/// Build the dashboard view for `selection` at time `now`.
pub fn build_view(records: &[TelemetryRecord], now: u64, selection: &Selection) -> DashboardView {
    let in_window = filter_window(records, now, selection.window);
    let devices = device_ids(in_window.iter().copied());

    let chosen = selection
        .device
        .as_ref()
        .filter(|d| devices.contains(d))
        .or_else(|| devices.first());

    let device = chosen.map(|device_id| {
        let window = FilteredWindow::for_device(records, device_id, now, selection.window);
        let summary = StatusSummary::from_window(&window);
        let buckets = fault_buckets(&window.records);
        DeviceView {
            window,
            summary,
            buckets,
        }
    });

    DashboardView {
        now,
        window: selection.window,
        in_window: in_window.len(),
        devices,
        device,
    }
}
