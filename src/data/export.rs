//! CSV export of a device window.
//!
//! Columns are `timestamp,temperature,vibration,status`, newest row first,
//! with timestamps rendered in UTC.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use super::time::format_utc;
use super::window::FilteredWindow;

const HEADER: &str = "timestamp,temperature,vibration,status";

/// File name for a device's export, e.g. `press-04_telemetry.csv`.
pub fn file_name(device_id: &str) -> String {
    let safe: String = device_id
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '\0' => '_',
            c => c,
        })
        .collect();
    format!("{}_telemetry.csv", safe)
}

/// Render the window as CSV text.
pub fn to_csv(window: &FilteredWindow) -> String {
    let mut out = String::with_capacity(64 * (window.len() + 1));
    out.push_str(HEADER);
    out.push('\n');

    for record in &window.records {
        out.push_str(&format_utc(record.timestamp));
        out.push(',');
        out.push_str(&record.temperature.to_string());
        out.push(',');
        out.push_str(&record.vibration.to_string());
        out.push(',');
        out.push_str(&escape(record.status.as_str()));
        out.push('\n');
    }

    out
}

/// Write the window into `dir`, returning the path written.
pub fn write_csv(window: &FilteredWindow, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;

    let path = dir.join(file_name(&window.device_id));
    fs::write(&path, to_csv(window))
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!(path = %path.display(), rows = window.len(), "exported telemetry");
    Ok(path)
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
