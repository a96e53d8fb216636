//! Typed parsing of loosely typed store values.
//!
//! Store items carry numbers in several shapes: native JSON numbers,
//! numeric strings such as `"1700000000"` or `"23.5"`, and attribute-value
//! wrappers such as `{"N": "23.5"}`. Every conversion here returns a
//! [`CoerceError`] instead of guessing.

use serde_json::Value;
use thiserror::Error;

/// Why a value could not be converted to the required type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoerceError {
    #[error("value is null")]
    Null,

    #[error("expected a number, found {0}")]
    WrongType(&'static str),

    #[error("'{0}' is not a number")]
    NotNumeric(String),

    #[error("'{0}' is not an integer")]
    NotInteger(String),

    #[error("{0} is negative")]
    Negative(String),

    #[error("'{0}' is not finite")]
    NotFinite(String),
}

static NULL: Value = Value::Null;

/// Strip an attribute-value wrapper (`{"N": ...}`, `{"S": ...}`, `{"M": ...}`,
/// `{"BOOL": ...}`, `{"L": ...}`, `{"NULL": true}`), returning the inner value.
///
/// Anything that is not a single-key wrapper is returned unchanged.
pub fn unwrap_attribute(value: &Value) -> &Value {
    let Value::Object(map) = value else {
        return value;
    };
    if map.len() != 1 {
        return value;
    }
    match map.iter().next() {
        Some((key, inner)) => match key.as_str() {
            "N" | "S" | "M" | "L" | "BOOL" => inner,
            "NULL" => &NULL,
            _ => value,
        },
        None => value,
    }
}

/// Parse a timestamp in whole seconds since the Unix epoch.
///
/// Accepts non-negative integers, non-negative finite floats (truncated),
/// and strings holding an integer.
pub fn parse_timestamp(value: &Value) -> Result<u64, CoerceError> {
    match unwrap_attribute(value) {
        Value::Number(n) => {
            if let Some(secs) = n.as_u64() {
                Ok(secs)
            } else if n.as_i64().is_some() {
                Err(CoerceError::Negative(n.to_string()))
            } else {
                match n.as_f64() {
                    Some(f) if f.is_finite() && f >= 0.0 => Ok(f.trunc() as u64),
                    Some(f) if f.is_finite() => Err(CoerceError::Negative(n.to_string())),
                    _ => Err(CoerceError::NotFinite(n.to_string())),
                }
            }
        }
        Value::String(s) => {
            let trimmed = s.trim();
            if let Ok(secs) = trimmed.parse::<u64>() {
                Ok(secs)
            } else if trimmed.parse::<i64>().is_ok() {
                Err(CoerceError::Negative(trimmed.to_string()))
            } else {
                Err(CoerceError::NotInteger(s.clone()))
            }
        }
        other => Err(type_error(other)),
    }
}

/// Parse a floating-point measurement such as a temperature or vibration.
///
/// Accepts JSON numbers and numeric strings. NaN and infinities are rejected.
pub fn parse_measurement(value: &Value) -> Result<f64, CoerceError> {
    match unwrap_attribute(value) {
        Value::Number(n) => n
            .as_f64()
            .filter(|f| f.is_finite())
            .ok_or_else(|| CoerceError::NotFinite(n.to_string())),
        Value::String(s) => {
            let parsed: f64 = s
                .trim()
                .parse()
                .map_err(|_| CoerceError::NotNumeric(s.clone()))?;
            if parsed.is_finite() {
                Ok(parsed)
            } else {
                Err(CoerceError::NotFinite(s.clone()))
            }
        }
        other => Err(type_error(other)),
    }
}

fn type_error(value: &Value) -> CoerceError {
    match value {
        Value::Null => CoerceError::Null,
        Value::Bool(_) => CoerceError::WrongType("a boolean"),
        Value::Array(_) => CoerceError::WrongType("an array"),
        Value::Object(_) => CoerceError::WrongType("an object"),
        Value::Number(_) => CoerceError::WrongType("a number"),
        Value::String(_) => CoerceError::WrongType("a string"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_timestamp_shapes() {
        assert_eq!(parse_timestamp(&json!(1_700_000_000)), Ok(1_700_000_000));
        assert_eq!(parse_timestamp(&json!("1700000000")), Ok(1_700_000_000));
        assert_eq!(parse_timestamp(&json!(" 42 ")), Ok(42));
        assert_eq!(parse_timestamp(&json!(1_700_000_000.9)), Ok(1_700_000_000));
        assert_eq!(parse_timestamp(&json!({"N": "1700000000"})), Ok(1_700_000_000));
    }

    #[test]
    fn test_timestamp_rejects() {
        assert!(matches!(parse_timestamp(&json!(-5)), Err(CoerceError::Negative(_))));
        assert!(matches!(parse_timestamp(&json!("-5")), Err(CoerceError::Negative(_))));
        assert!(matches!(parse_timestamp(&json!(-1.5)), Err(CoerceError::Negative(_))));
        assert!(matches!(
            parse_timestamp(&json!("1700000000.5")),
            Err(CoerceError::NotInteger(_))
        ));
        assert!(matches!(parse_timestamp(&json!("soon")), Err(CoerceError::NotInteger(_))));
        assert_eq!(parse_timestamp(&json!(true)), Err(CoerceError::WrongType("a boolean")));
        assert_eq!(parse_timestamp(&Value::Null), Err(CoerceError::Null));
        assert_eq!(parse_timestamp(&json!({"NULL": true})), Err(CoerceError::Null));
    }

    #[test]
    fn test_measurement_shapes() {
        assert_eq!(parse_measurement(&json!(23.5)), Ok(23.5));
        assert_eq!(parse_measurement(&json!(70)), Ok(70.0));
        assert_eq!(parse_measurement(&json!("0.031")), Ok(0.031));
        assert_eq!(parse_measurement(&json!("12")), Ok(12.0));
        assert_eq!(parse_measurement(&json!({"N": "-4.25"})), Ok(-4.25));
    }

    #[test]
    fn test_measurement_rejects() {
        assert!(matches!(parse_measurement(&json!("hot")), Err(CoerceError::NotNumeric(_))));
        assert!(matches!(parse_measurement(&json!("NaN")), Err(CoerceError::NotFinite(_))));
        assert!(matches!(parse_measurement(&json!("inf")), Err(CoerceError::NotFinite(_))));
        assert_eq!(parse_measurement(&json!([1.0])), Err(CoerceError::WrongType("an array")));
    }

    #[test]
    fn test_unwrap_attribute_leaves_plain_objects() {
        let plain = json!({"N": "1", "S": "x"});
        assert_eq!(unwrap_attribute(&plain), &plain);
        let map = json!({"M": {"temperature": {"N": "20"}}});
        assert_eq!(unwrap_attribute(&map), &json!({"temperature": {"N": "20"}}));
    }
}
