//! Record normalization.
//!
//! Turns raw store items into [`TelemetryRecord`]s. Fields may live under a
//! nested `payload` object or at the top level of the item; the payload value
//! wins whenever it is present and not null. Items that cannot produce a
//! timestamp, temperature and vibration are dropped whole, never kept as
//! partial records.

use std::fmt;

use serde_json::{Map, Value};
use tracing::warn;

use faultwatch_types::{DeviceStatus, TelemetryRecord};

use super::coerce::{parse_measurement, parse_timestamp, unwrap_attribute, CoerceError};

/// A raw item as returned by a store scan.
pub type RawItem = Value;

/// Why an item was dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum DropReason {
    /// The item is not a JSON object.
    NotAnObject,
    /// A required field is absent from both the payload and the item.
    Missing(&'static str),
    /// A required field is present but could not be parsed.
    Invalid {
        field: &'static str,
        error: CoerceError,
    },
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::NotAnObject => write!(f, "item is not an object"),
            DropReason::Missing(field) => write!(f, "missing field '{}'", field),
            DropReason::Invalid { field, error } => write!(f, "invalid '{}': {}", field, error),
        }
    }
}

/// Outcome of normalizing one item.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    Valid(TelemetryRecord),
    Dropped(DropReason),
}

/// A dropped item and its position in the scan.
#[derive(Debug, Clone, PartialEq)]
pub struct DroppedItem {
    pub index: usize,
    pub reason: DropReason,
}

/// Result of normalizing a whole scan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizeReport {
    pub records: Vec<TelemetryRecord>,
    pub dropped: Vec<DroppedItem>,
}

impl NormalizeReport {
    pub fn dropped_count(&self) -> usize {
        self.dropped.len()
    }
}

/// Field lookup with payload-over-top-level precedence.
struct Fields<'a> {
    item: &'a Map<String, Value>,
    payload: Option<&'a Map<String, Value>>,
}

impl<'a> Fields<'a> {
    fn new(item: &'a Map<String, Value>) -> Self {
        let payload = item
            .get("payload")
            .map(unwrap_attribute)
            .and_then(Value::as_object);
        Self { item, payload }
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        let present = |v: &&'a Value| !unwrap_attribute(v).is_null();
        self.payload
            .and_then(|p| p.get(key))
            .filter(present)
            .or_else(|| self.item.get(key).filter(present))
    }
}

/// Normalize a single item.
pub fn normalize_item(item: &RawItem) -> Normalized {
    match try_normalize(item) {
        Ok(record) => Normalized::Valid(record),
        Err(reason) => Normalized::Dropped(reason),
    }
}

fn try_normalize(item: &RawItem) -> Result<TelemetryRecord, DropReason> {
    let Value::Object(map) = unwrap_attribute(item) else {
        return Err(DropReason::NotAnObject);
    };
    let fields = Fields::new(map);

    let device_id = device_id(&fields)?;
    let timestamp = required(&fields, "timestamp", parse_timestamp)?;
    let temperature = required(&fields, "temperature", parse_measurement)?;
    let vibration = required(&fields, "vibration", parse_measurement)?;

    let status = match fields.get("status").map(unwrap_attribute) {
        Some(Value::String(s)) => DeviceStatus::parse(s),
        _ => DeviceStatus::Unknown,
    };

    Ok(TelemetryRecord {
        device_id,
        timestamp,
        temperature,
        vibration,
        status,
    })
}

fn device_id(fields: &Fields<'_>) -> Result<String, DropReason> {
    let id = match fields.get("device_id").map(unwrap_attribute) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(_) => {
            return Err(DropReason::Invalid {
                field: "device_id",
                error: CoerceError::WrongType("a non-string identifier"),
            })
        }
        None => String::new(),
    };
    if id.is_empty() {
        return Err(DropReason::Missing("device_id"));
    }
    Ok(id)
}

fn required<T>(
    fields: &Fields<'_>,
    field: &'static str,
    parse: fn(&Value) -> Result<T, CoerceError>,
) -> Result<T, DropReason> {
    let value = fields.get(field).ok_or(DropReason::Missing(field))?;
    parse(value).map_err(|error| DropReason::Invalid { field, error })
}

/// Normalize every item of a scan, logging each drop.
pub fn normalize(items: &[RawItem]) -> NormalizeReport {
    let mut report = NormalizeReport::default();

    for (index, item) in items.iter().enumerate() {
        match normalize_item(item) {
            Normalized::Valid(record) => report.records.push(record),
            Normalized::Dropped(reason) => {
                warn!(index, reason = %reason, "dropping malformed item");
                report.dropped.push(DroppedItem { index, reason });
            }
        }
    }

    report
}
