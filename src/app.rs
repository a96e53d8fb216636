//! Application state and the refresh cycle.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::{debug, info, warn};

use faultwatch_types::TelemetryRecord;

use crate::data::time::now_epoch_secs;
use crate::data::{build_view, export, normalize, DashboardView, DeviceView, Selection};
use crate::inference::{InferenceClient, InferenceResult};
use crate::source::{scan_all, EventStore};
use crate::ui::Theme;

/// Step used by the window selector keys, in minutes.
pub const WINDOW_STEP: u32 = 5;

/// The chart shown in the main panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartKind {
    #[default]
    Temperature,
    Vibration,
    FaultTrend,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [
        ChartKind::Temperature,
        ChartKind::Vibration,
        ChartKind::FaultTrend,
    ];

    /// Cycle to the next chart.
    pub fn next(self) -> Self {
        match self {
            ChartKind::Temperature => ChartKind::Vibration,
            ChartKind::Vibration => ChartKind::FaultTrend,
            ChartKind::FaultTrend => ChartKind::Temperature,
        }
    }

    /// Cycle to the previous chart.
    pub fn prev(self) -> Self {
        match self {
            ChartKind::Temperature => ChartKind::FaultTrend,
            ChartKind::Vibration => ChartKind::Temperature,
            ChartKind::FaultTrend => ChartKind::Vibration,
        }
    }

    /// Returns the display label for this chart.
    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::Temperature => "Temperature",
            ChartKind::Vibration => "Vibration",
            ChartKind::FaultTrend => "Fault Trend",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            ChartKind::Temperature => 0,
            ChartKind::Vibration => 1,
            ChartKind::FaultTrend => 2,
        }
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub show_help: bool,
    pub chart: ChartKind,

    // Collaborators
    store: Box<dyn EventStore>,
    inference: Option<InferenceClient>,
    clock: fn() -> u64,

    // Operator selection
    pub selection: Selection,
    page_limit: usize,
    export_dir: PathBuf,

    // Results of the last refresh
    pub records: Vec<TelemetryRecord>,
    pub view: Option<DashboardView>,
    pub dropped: usize,
    pub truncated: bool,
    pub load_error: Option<String>,
    pub inference_result: Option<InferenceResult>,
    pub last_refresh: Option<u64>,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App reading from `store`.
    pub fn new(store: Box<dyn EventStore>, selection: Selection, page_limit: usize) -> Self {
        Self {
            running: true,
            show_help: false,
            chart: ChartKind::default(),
            store,
            inference: None,
            clock: now_epoch_secs,
            selection,
            page_limit,
            export_dir: PathBuf::from("."),
            records: Vec::new(),
            view: None,
            dropped: 0,
            truncated: false,
            load_error: None,
            inference_result: None,
            last_refresh: None,
            theme: Theme::dark(),
            status_message: None,
        }
    }

    pub fn with_inference(mut self, client: Option<InferenceClient>) -> Self {
        self.inference = client;
        self
    }

    pub fn with_export_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = dir.into();
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Replace the wall clock, for deterministic refreshes.
    pub fn with_clock(mut self, clock: fn() -> u64) -> Self {
        self.clock = clock;
        self
    }

    /// Current time according to the app clock.
    pub fn now(&self) -> u64 {
        (self.clock)()
    }

    /// Returns a description of the current event store.
    pub fn source_description(&self) -> &str {
        self.store.description()
    }

    pub fn inference_enabled(&self) -> bool {
        self.inference.is_some()
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    /// The selected device's view, when the window holds any records.
    pub fn device_view(&self) -> Option<&DeviceView> {
        self.view.as_ref()?.device.as_ref()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Run one full refresh cycle against the wall clock.
    pub fn refresh(&mut self) {
        self.refresh_at(self.now());
    }

    /// Run one full refresh cycle: scan, normalize, window, summarize and,
    /// when configured, ask for a prediction on the latest reading.
    ///
    /// A store failure is kept in `load_error` and the cycle carries on
    /// with no records, so the rest of the dashboard still renders.
    pub fn refresh_at(&mut self, now: u64) {
        match scan_all(self.store.as_mut(), self.page_limit) {
            Ok(scan) => {
                let report = normalize(&scan.items);
                self.dropped = report.dropped_count();
                self.truncated = scan.truncated;
                self.records = report.records;
                self.load_error = None;
            }
            Err(e) => {
                warn!(store = self.store.description(), error = %e, "store scan failed");
                self.records.clear();
                self.dropped = 0;
                self.truncated = false;
                self.load_error = Some(e.to_string());
            }
        }

        self.rebuild_view(now);
        self.run_inference();
        self.last_refresh = Some(now);

        debug!(
            records = self.records.len(),
            dropped = self.dropped,
            device = self.selection.device.as_deref().unwrap_or("-"),
            "refresh complete"
        );
    }

    fn rebuild_view(&mut self, now: u64) {
        let view = build_view(&self.records, now, &self.selection);
        if let Some(device) = &view.device {
            self.selection.device = Some(device.device_id().to_string());
        }
        self.view = Some(view);
    }

    fn run_inference(&mut self) {
        let latest = self.device_view().and_then(|d| d.latest()).cloned();
        self.inference_result = match (&self.inference, latest) {
            (Some(client), Some(record)) => Some(client.predict(&record)),
            _ => None,
        };
    }

    /// Ask for a new prediction without rescanning the store.
    pub fn rerun_inference(&mut self) {
        if self.inference.is_none() {
            self.set_status_message("Inference endpoint not configured".to_string());
            return;
        }
        self.run_inference();
    }

    /// Select the next device in the list and refresh.
    pub fn select_next_device(&mut self) {
        self.step_device(1);
    }

    /// Select the previous device in the list and refresh.
    pub fn select_prev_device(&mut self) {
        self.step_device(-1);
    }

    fn step_device(&mut self, delta: isize) {
        let Some(view) = &self.view else {
            return;
        };
        if view.devices.is_empty() {
            return;
        }

        let last = view.devices.len() - 1;
        let current = view.selected_index().unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(last);
        if next == current {
            return;
        }

        self.selection.device = Some(view.devices[next].clone());
        self.refresh();
    }

    /// Grow the time window by one step and refresh.
    pub fn widen_window(&mut self) {
        self.set_window(self.selection.window.widen(WINDOW_STEP));
    }

    /// Shrink the time window by one step and refresh.
    pub fn narrow_window(&mut self) {
        self.set_window(self.selection.window.narrow(WINDOW_STEP));
    }

    fn set_window(&mut self, window: faultwatch_types::WindowMinutes) {
        if window == self.selection.window {
            return;
        }
        self.selection.window = window;
        self.refresh();
    }

    /// Switch to the next chart. Charts only re-render; no rescan.
    pub fn next_chart(&mut self) {
        self.chart = self.chart.next();
    }

    pub fn prev_chart(&mut self) {
        self.chart = self.chart.prev();
    }

    pub fn set_chart(&mut self, chart: ChartKind) {
        self.chart = chart;
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Write the selected device's window as CSV into the export directory.
    pub fn export_csv(&self) -> Result<PathBuf> {
        let Some(device) = self.device_view() else {
            anyhow::bail!("No telemetry in the selected window to export");
        };
        let path = export::write_csv(&device.window, &self.export_dir)?;
        info!(device = device.device_id(), path = %path.display(), "csv export");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::InferenceSettings;
    use crate::source::MemoryStore;
    use faultwatch_types::{DeviceStatus, WindowMinutes};
    use serde_json::{json, Value};

    const NOW: u64 = 1_700_003_600;

    fn fixed_clock() -> u64 {
        NOW
    }

    fn item(device: &str, age: u64, status: &str) -> Value {
        json!({
            "device_id": device,
            "payload": {
                "timestamp": (NOW - age).to_string(),
                "temperature": "70.5",
                "vibration": 0.03,
                "status": status
            }
        })
    }

    fn app_with(items: Vec<Value>) -> App {
        let store = MemoryStore::from_items("test", items, 100);
        App::new(Box::new(store), Selection::default(), 10).with_clock(fixed_clock)
    }

    #[test]
    fn test_chart_cycle() {
        assert_eq!(ChartKind::Temperature.next(), ChartKind::Vibration);
        assert_eq!(ChartKind::Temperature.prev(), ChartKind::FaultTrend);
        for chart in ChartKind::ALL {
            assert_eq!(chart.next().prev(), chart);
            assert_eq!(ChartKind::ALL[chart.index()], chart);
        }
    }

    #[test]
    fn test_refresh_builds_view() {
        let mut app = app_with(vec![
            item("press-04", 60, "OK"),
            item("press-04", 120, "FAULT"),
            item("lathe-01", 30, "OK"),
            json!({"device_id": "broken"}),
        ]);
        app.refresh();

        assert_eq!(app.records.len(), 3);
        assert_eq!(app.dropped, 1);
        assert!(app.load_error.is_none());
        assert_eq!(app.last_refresh, Some(NOW));

        let device = app.device_view().unwrap();
        assert_eq!(device.device_id(), "lathe-01");
        assert_eq!(app.selection.device.as_deref(), Some("lathe-01"));
        assert!(app.inference_result.is_none());
    }

    #[test]
    fn test_device_navigation_keeps_selection() {
        let mut app = app_with(vec![item("a", 10, "OK"), item("b", 10, "OK"), item("c", 10, "OK")]);
        app.refresh();

        app.select_next_device();
        app.select_next_device();
        app.select_next_device();
        assert_eq!(app.selection.device.as_deref(), Some("c"));

        app.refresh();
        assert_eq!(app.device_view().unwrap().device_id(), "c");

        app.select_prev_device();
        assert_eq!(app.device_view().unwrap().device_id(), "b");
    }

    #[test]
    fn test_window_keys_refilter() {
        let mut app = app_with(vec![item("a", 60, "OK"), item("a", 30 * 60, "OK")]);
        app.selection.window = WindowMinutes::new(10).unwrap();
        app.refresh();
        assert_eq!(app.device_view().unwrap().window.len(), 1);

        for _ in 0..5 {
            app.widen_window();
        }
        assert_eq!(app.selection.window.minutes(), 35);
        assert_eq!(app.device_view().unwrap().window.len(), 2);

        for _ in 0..20 {
            app.narrow_window();
        }
        assert_eq!(app.selection.window.minutes(), WindowMinutes::MIN);
    }

    #[test]
    fn test_store_error_is_inline() {
        let mut app = App::new(
            Box::new(crate::source::FileStore::new("/nonexistent/events.json")),
            Selection::default(),
            10,
        )
        .with_clock(fixed_clock);
        app.refresh();

        assert!(app.load_error.as_deref().unwrap().contains("Read error"));
        assert!(app.records.is_empty());
        assert!(app.view.as_ref().unwrap().is_empty());
    }

    #[test]
    fn test_chart_change_does_not_rescan() {
        let (tx, store) = MemoryStore::create("test", 100);
        tx.send(vec![item("a", 10, "OK")]).unwrap();
        let mut app = App::new(Box::new(store), Selection::default(), 10).with_clock(fixed_clock);
        app.refresh();

        tx.send(vec![item("a", 10, "OK"), item("a", 20, "OK")]).unwrap();
        app.next_chart();
        assert_eq!(app.chart, ChartKind::Vibration);
        assert_eq!(app.records.len(), 1);

        app.refresh();
        assert_eq!(app.records.len(), 2);
    }

    #[test]
    fn test_export_csv() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with(vec![item("press-04", 60, "FAULT")]).with_export_dir(dir.path());
        app.refresh();

        let path = app.export_csv().unwrap();
        assert_eq!(path, dir.path().join("press-04_telemetry.csv"));
        let csv = std::fs::read_to_string(path).unwrap();
        assert!(csv.lines().nth(1).unwrap().ends_with(",70.5,0.03,FAULT"));
    }

    #[test]
    fn test_export_without_data_fails() {
        let mut app = app_with(vec![]);
        app.refresh();
        assert!(app.export_csv().is_err());
    }

    #[test]
    fn test_rerun_inference_without_endpoint() {
        let mut app = app_with(vec![item("a", 10, "OK")]);
        app.refresh();
        app.rerun_inference();
        assert!(app.inference_result.is_none());
        assert_eq!(app.get_status_message(), Some("Inference endpoint not configured"));
        assert!(!app.inference_enabled());
        assert_eq!(app.records[0].status, DeviceStatus::Ok);
    }

    #[test]
    fn test_inference_failure_leaves_dashboard_intact() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        // Bind then drop to get a port nothing listens on.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let settings = InferenceSettings {
            endpoint: Some(format!("http://127.0.0.1:{}/", port)),
            timeout_secs: Some(2),
        };
        let client = InferenceClient::from_settings(&settings, runtime.handle().clone()).unwrap();

        let mut app = app_with(vec![item("press-04", 60, "FAULT"), item("press-04", 120, "OK")])
            .with_inference(client);
        app.refresh();

        assert!(app.inference_enabled());
        let err = app.inference_result.as_ref().unwrap().as_ref().unwrap_err();
        assert_eq!(err.tag(), "HTTP error");
        assert!(err.raw().is_none());

        assert!(app.load_error.is_none());
        let device = app.device_view().unwrap();
        assert_eq!(device.device_id(), "press-04");
        assert_eq!((device.summary.ok, device.summary.fault), (1, 1));
        assert_eq!(device.buckets.len(), 1);
    }
}
