//! End-to-end refresh cycles: store scan through to the rendered view model
//! and CSV export.

use std::fs;

use serde_json::{json, Value};

use faultwatch::data::{normalize, Selection};
use faultwatch::{build_view, App, FileStore, MemoryStore};
use faultwatch_types::{DeviceStatus, FaultBucket, WindowMinutes};

const NOW: u64 = 1_700_003_600;

fn fixed_clock() -> u64 {
    NOW
}

/// A scan page as exported from the event table, mixing plain, payload
/// and attribute-wrapped items.
fn export_page() -> Value {
    json!({
        "Items": [
            {
                "device_id": {"S": "press-04"},
                "payload": {"M": {
                    "timestamp": {"N": (NOW - 60).to_string()},
                    "temperature": {"N": "71.5"},
                    "vibration": {"N": "0.031"},
                    "status": {"S": "FAULT"}
                }}
            },
            {
                "device_id": "press-04",
                "payload": {
                    "timestamp": (NOW - 120).to_string(),
                    "temperature": "70.0",
                    "vibration": 0.029,
                    "status": "OK"
                }
            },
            {
                "device_id": "press-04",
                "timestamp": NOW - 2000,
                "temperature": 69.0,
                "vibration": 0.02,
                "status": "FAULT"
            },
            {
                "device_id": "lathe-01",
                "timestamp": NOW - 30,
                "temperature": 40.0,
                "vibration": 0.01,
                "status": "WARNING"
            },
            {
                "device_id": "lathe-01",
                "timestamp": NOW - 7200,
                "temperature": 41.0,
                "vibration": 0.01
            },
            {"device_id": "press-04", "timestamp": "yesterday", "temperature": 1, "vibration": 1},
            {"timestamp": NOW, "temperature": 1, "vibration": 1}
        ],
        "LastEvaluatedKey": null
    })
}

#[test]
fn test_file_store_refresh_cycle() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.json");
    fs::write(&path, export_page().to_string()).unwrap();

    let selection = Selection::new(WindowMinutes::DEFAULT, Some("press-04".to_string()));
    let mut app = App::new(Box::new(FileStore::new(&path)), selection, 10)
        .with_clock(fixed_clock)
        .with_export_dir(dir.path().join("out"));
    app.refresh();

    assert!(app.load_error.is_none());
    assert_eq!(app.records.len(), 5);
    assert_eq!(app.dropped, 2);
    assert!(!app.truncated);

    let view = app.view.as_ref().unwrap();
    assert_eq!(view.devices, vec!["lathe-01", "press-04"]);
    assert_eq!(view.in_window, 4);

    let device = app.device_view().unwrap();
    assert_eq!(device.device_id(), "press-04");
    assert_eq!(device.window.len(), 3);
    assert_eq!(device.latest().unwrap().timestamp, NOW - 60);

    let summary = &device.summary;
    assert_eq!((summary.ok, summary.warning, summary.fault), (1, 0, 2));
    assert_eq!(summary.actual, 3);
    assert_eq!(summary.expected, 60);
    assert!(summary.is_incomplete());
    assert_eq!(summary.caption(), "Received 3 out of 60 expected entries");

    let fault_total: usize = device.buckets.iter().map(|b| b.count).sum();
    assert_eq!(fault_total, 2);
    assert!(device
        .buckets
        .iter()
        .all(|b| b.start == FaultBucket::start_of(b.start)));

    let csv_path = app.export_csv().unwrap();
    assert_eq!(csv_path.file_name().unwrap(), "press-04_telemetry.csv");
    let csv = fs::read_to_string(csv_path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "timestamp,temperature,vibration,status");
    assert_eq!(lines[1], "2023-11-14 23:12:20+00:00,71.5,0.031,FAULT");
}

#[test]
fn test_window_change_moves_records_in_and_out() {
    let items = export_page()["Items"].as_array().unwrap().clone();
    let store = MemoryStore::from_items("test", items, 2);
    let mut app = App::new(Box::new(store), Selection::default(), 10).with_clock(fixed_clock);
    app.refresh();

    // First device alphabetically; its older reading is outside 60 minutes
    assert_eq!(app.selection.device.as_deref(), Some("lathe-01"));
    assert_eq!(app.device_view().unwrap().window.len(), 1);

    for _ in 0..40 {
        app.widen_window();
    }
    assert_eq!(app.selection.window.minutes(), WindowMinutes::MAX);

    let device = app.device_view().unwrap();
    assert_eq!(device.window.len(), 2);
    assert_eq!(device.summary.count(&DeviceStatus::Unknown), 1);
    assert_eq!(device.summary.expected, 240);
}

#[test]
fn test_memory_store_updates_are_seen_on_next_refresh() {
    let (tx, store) = MemoryStore::create("live", 100);
    let mut app = App::new(Box::new(store), Selection::default(), 10).with_clock(fixed_clock);

    app.refresh();
    assert!(app.view.as_ref().unwrap().is_empty());
    assert!(app.device_view().is_none());
    assert!(app.export_csv().is_err());

    tx.send(vec![json!({
        "device_id": "pump-7",
        "timestamp": NOW - 10,
        "temperature": 55.0,
        "vibration": 0.04,
        "status": "OK"
    })])
    .unwrap();

    app.refresh();
    let device = app.device_view().unwrap();
    assert_eq!(device.device_id(), "pump-7");
    assert_eq!(device.summary.ok, 1);
    assert!(device.buckets.is_empty());
}

#[test]
fn test_unreadable_file_keeps_dashboard_alive() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.json");

    let mut app =
        App::new(Box::new(FileStore::new(&path)), Selection::default(), 10).with_clock(fixed_clock);
    app.refresh();

    assert!(app.load_error.as_deref().unwrap().starts_with("Read error"));
    assert!(app.records.is_empty());
    assert!(app.view.as_ref().unwrap().is_empty());

    fs::write(&path, "[]").unwrap();
    app.refresh();
    assert!(app.load_error.is_none());
}

#[test]
fn test_build_view_is_pure() {
    let items = export_page()["Items"].as_array().unwrap().clone();
    let report = normalize(&items);
    let selection = Selection::new(WindowMinutes::new(5).unwrap(), Some("press-04".to_string()));

    let first = build_view(&report.records, NOW, &selection);
    let second = build_view(&report.records, NOW, &selection);
    assert_eq!(first, second);

    let device = first.device.unwrap();
    assert_eq!(device.window.len(), 2);
    assert_eq!(device.summary.expected, 5);
    assert_eq!(device.summary.completeness, Some(40.0));
}
