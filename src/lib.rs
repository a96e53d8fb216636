//! # faultwatch
//!
//! A terminal dashboard and library for monitoring industrial equipment
//! telemetry.
//!
//! faultwatch scans a fault-event log, normalizes the heterogeneous records
//! it finds there, and shows a time-windowed view per device: status counts,
//! data completeness, measurement charts, a fault trend, and a predictive
//! risk assessment from a remote inference service.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │(pipeline)│    │(render) │    │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │                                                     │
//! │       ├──▶ source    ◀── FileStore | ApiStore | MemoryStore │
//! │       └──▶ inference ◀── faultwatch-adapters                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state and the refresh cycle
//! - **[`source`]**: Event store abstraction ([`EventStore`] trait) with
//!   file, in-memory and scan-API implementations
//! - **[`data`]**: The pipeline: normalize, window, summarize, bucket, export
//! - **[`inference`]**: Blocking client for the predictive-inference endpoint
//! - **[`settings`]**: Startup settings from a secrets file and environment
//! - **[`ui`]**: Terminal rendering using ratatui
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Watch a JSON export of the event table
//! faultwatch --file events.json
//!
//! # Use the store and inference settings from a secrets file
//! faultwatch --secrets secrets.toml
//!
//! # Write one device's window to press-04_telemetry.csv and exit
//! faultwatch --secrets secrets.toml --device press-04 --export-csv out/
//! ```
//!
//! ### As a library
//!
//! ```
//! use faultwatch::data::{build_view, normalize, Selection};
//! use serde_json::json;
//!
//! let items = vec![
//!     json!({"device_id": "press-04", "payload": {"timestamp": "1700000000", "temperature": "71.5", "vibration": 0.031, "status": "FAULT"}}),
//!     json!({"device_id": "press-04", "timestamp": 1699999940, "temperature": 70.9, "vibration": 0.030}),
//! ];
//!
//! let report = normalize(&items);
//! let view = build_view(&report.records, 1_700_000_030, &Selection::default());
//!
//! let device = view.device.unwrap();
//! assert_eq!(device.summary.fault, 1);
//! assert_eq!(device.buckets.len(), 1);
//! ```

pub mod app;
pub mod data;
pub mod events;
pub mod inference;
pub mod settings;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, ChartKind};
pub use data::{build_view, DashboardView, Selection};
pub use inference::InferenceClient;
pub use settings::Settings;
pub use source::{EventStore, FileStore, MemoryStore, ScanPage};
