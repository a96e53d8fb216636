//! Status counts and data completeness.
//!
//! Completeness compares the records actually received against a nominal
//! cadence of one record per minute, so `expected` equals the window length
//! in minutes. Devices reporting at a different cadence will show a
//! misleading percentage.

use faultwatch_types::DeviceStatus;

use super::window::FilteredWindow;

/// Per-status counts and completeness for one device window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusSummary {
    pub ok: usize,
    pub warning: usize,
    pub fault: usize,
    /// Records received in the window.
    pub actual: usize,
    /// Records expected at one per minute.
    pub expected: u32,
    /// `None` only when nothing is expected.
    pub completeness: Option<f64>,
}

impl StatusSummary {
    pub fn from_window(window: &FilteredWindow) -> Self {
        let (mut ok, mut warning, mut fault) = (0, 0, 0);
        for record in &window.records {
            match record.status {
                DeviceStatus::Ok => ok += 1,
                DeviceStatus::Warning => warning += 1,
                DeviceStatus::Fault => fault += 1,
                _ => {}
            }
        }

        let actual = window.len();
        let expected = window.window.minutes();

        Self {
            ok,
            warning,
            fault,
            actual,
            expected,
            completeness: completeness_pct(actual, expected),
        }
    }

    /// Count for one of the summarized statuses; zero for anything else.
    pub fn count(&self, status: &DeviceStatus) -> usize {
        match status {
            DeviceStatus::Ok => self.ok,
            DeviceStatus::Warning => self.warning,
            DeviceStatus::Fault => self.fault,
            _ => 0,
        }
    }

    /// True when fewer records arrived than the nominal cadence predicts.
    pub fn is_incomplete(&self) -> bool {
        self.completeness.is_some_and(|pct| pct < 100.0)
    }

    /// Human-readable caption, e.g. "Received 45 out of 60 expected entries".
    pub fn caption(&self) -> String {
        format!(
            "Received {} out of {} expected entries",
            self.actual, self.expected
        )
    }
}

/// `100 * actual / expected`, rounded to one decimal place with ties to even.
pub fn completeness_pct(actual: usize, expected: u32) -> Option<f64> {
    if expected == 0 {
        return None;
    }
    let pct = actual as f64 / f64::from(expected) * 100.0;
    Some((pct * 10.0).round_ties_even() / 10.0)
}
