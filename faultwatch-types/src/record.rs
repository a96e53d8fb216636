//! Normalized telemetry records.

use alloc::string::{String, ToString};
use core::fmt;

/// Operational status reported by a device.
///
/// Only `Ok`, `Warning` and `Fault` take part in status summaries.
/// Anything the device reports that is not one of the known labels is
/// kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum DeviceStatus {
    Ok,
    Warning,
    Fault,
    #[default]
    Unknown,
    Other(String),
}

impl DeviceStatus {
    /// The statuses counted by a status summary, in display order.
    pub const SUMMARIZED: [DeviceStatus; 3] =
        [DeviceStatus::Ok, DeviceStatus::Warning, DeviceStatus::Fault];

    /// Parse a status label. Matching is exact; unknown labels become `Other`.
    pub fn parse(label: &str) -> Self {
        match label {
            "OK" => DeviceStatus::Ok,
            "WARNING" => DeviceStatus::Warning,
            "FAULT" => DeviceStatus::Fault,
            "UNKNOWN" => DeviceStatus::Unknown,
            other => DeviceStatus::Other(other.to_string()),
        }
    }

    /// The wire label for this status.
    pub fn as_str(&self) -> &str {
        match self {
            DeviceStatus::Ok => "OK",
            DeviceStatus::Warning => "WARNING",
            DeviceStatus::Fault => "FAULT",
            DeviceStatus::Unknown => "UNKNOWN",
            DeviceStatus::Other(label) => label,
        }
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for DeviceStatus {
    fn from(label: String) -> Self {
        DeviceStatus::parse(&label)
    }
}

impl From<&str> for DeviceStatus {
    fn from(label: &str) -> Self {
        DeviceStatus::parse(label)
    }
}

impl From<DeviceStatus> for String {
    fn from(status: DeviceStatus) -> Self {
        match status {
            DeviceStatus::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

/// A single, fully typed telemetry reading.
///
/// Records only exist once every required field has been coerced
/// successfully; there is no partially populated form.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TelemetryRecord {
    /// Identifier of the reporting device.
    pub device_id: String,
    /// Seconds since the Unix epoch.
    pub timestamp: u64,
    /// Temperature in degrees Celsius.
    pub temperature: f64,
    /// Vibration velocity in mm/s.
    pub vibration: f64,
    /// Reported device status.
    pub status: DeviceStatus,
}

impl TelemetryRecord {
    /// Create a record.
    pub fn new(
        device_id: impl Into<String>,
        timestamp: u64,
        temperature: f64,
        vibration: f64,
        status: DeviceStatus,
    ) -> Self {
        Self {
            device_id: device_id.into(),
            timestamp,
            temperature,
            vibration,
            status,
        }
    }

    /// Whether this record reports a fault.
    pub fn is_fault(&self) -> bool {
        self.status == DeviceStatus::Fault
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_statuses() {
        assert_eq!(DeviceStatus::parse("OK"), DeviceStatus::Ok);
        assert_eq!(DeviceStatus::parse("WARNING"), DeviceStatus::Warning);
        assert_eq!(DeviceStatus::parse("FAULT"), DeviceStatus::Fault);
        assert_eq!(DeviceStatus::parse("UNKNOWN"), DeviceStatus::Unknown);
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(
            DeviceStatus::parse("fault"),
            DeviceStatus::Other("fault".to_string())
        );
        assert_eq!(DeviceStatus::parse("OFFLINE").as_str(), "OFFLINE");
    }

    #[test]
    fn test_default_status_is_unknown() {
        assert_eq!(DeviceStatus::default(), DeviceStatus::Unknown);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_status_serializes_as_label() {
        let record = TelemetryRecord::new("dev-1", 10, 20.0, 0.01, DeviceStatus::Warning);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["status"], "WARNING");

        let other: DeviceStatus = serde_json::from_str("\"OFFLINE\"").unwrap();
        assert_eq!(other, DeviceStatus::Other("OFFLINE".to_string()));
    }
}
