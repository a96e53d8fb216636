//! Telemetry processing pipeline.
//!
//! Turns raw store items into the per-device view shown by the dashboard.
//!
//! ## Submodules
//!
//! - [`coerce`]: Typed parsing of loosely typed numeric values
//! - [`normalize`]: Raw items to [`TelemetryRecord`]s, with drop reporting
//! - [`window`]: Trailing time-window filter and per-device selection
//! - [`summary`]: Status counts and data completeness
//! - [`trend`]: Fault counts per 15-minute bucket
//! - [`view`]: The pure refresh step, [`build_view`]
//! - [`export`]: CSV export of a device window
//! - [`time`]: Clock and timestamp formatting helpers
//!
//! ## Data Flow
//!
//! ```text
//! scan items (raw JSON)
//!        │
//!        ▼
//! normalize()  ──▶ dropped items (logged, counted)
//!        │
//!        ▼
//! build_view(records, now, &Selection)
//!        │
//!        ├──▶ FilteredWindow (selected device, newest first)
//!        ├──▶ StatusSummary
//!        └──▶ FaultBucket series
//! ```
//!
//! [`TelemetryRecord`]: faultwatch_types::TelemetryRecord

pub mod coerce;
pub mod export;
pub mod normalize;
pub mod summary;
pub mod time;
pub mod trend;
pub mod view;
pub mod window;

pub use coerce::CoerceError;
pub use normalize::{
    normalize, normalize_item, DropReason, DroppedItem, NormalizeReport, Normalized, RawItem,
};
pub use summary::{completeness_pct, StatusSummary};
pub use trend::fault_buckets;
pub use view::{build_view, DashboardView, DeviceView, Selection};
pub use window::{FilteredWindow, Measurement};
