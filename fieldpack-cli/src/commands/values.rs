//! JSON <-> dynamic value conversion for the CLI surface
//!
//! Byte strings are not representable in JSON directly; they appear as
//! `{"hex": "..."}` objects on output, and are accepted on input either in
//! that form or as plain strings (taken as UTF-8 bytes).

use anyhow::{anyhow, bail, Context, Result};
use bytes::Bytes;
use fieldpack_core::Value;

/// Convert one JSON value to a codec value
pub fn value_from_json(json: &serde_json::Value) -> Result<Value> {
    match json {
        serde_json::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Int(i))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Uint(u))
            } else {
                n.as_f64()
                    .map(Value::Float)
                    .ok_or_else(|| anyhow!("unrepresentable number: {}", n))
            }
        }
        serde_json::Value::String(s) => Ok(Value::Bytes(Bytes::copy_from_slice(s.as_bytes()))),
        serde_json::Value::Object(map) => {
            let hex_str = map
                .get("hex")
                .and_then(|v| v.as_str())
                .ok_or_else(|| anyhow!("objects must have the form {{\"hex\": \"...\"}}"))?;
            let raw = hex::decode(hex_str).context("invalid hex in value object")?;
            Ok(Value::Bytes(Bytes::from(raw)))
        }
        other => bail!("unsupported JSON value: {}", other),
    }
}

/// Convert a whole JSON array to codec values
pub fn values_from_json(json: &serde_json::Value) -> Result<Vec<Value>> {
    let items = json
        .as_array()
        .ok_or_else(|| anyhow!("input must be a JSON array of values"))?;
    items.iter().map(value_from_json).collect()
}

/// Convert one codec value to JSON
///
/// Non-finite floats have no JSON number form and come out as strings
/// ("NaN", "inf", "-inf").
pub fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Int(i) => serde_json::json!(i),
        Value::Uint(u) => serde_json::json!(u),
        Value::Float(f) => match serde_json::Number::from_f64(*f) {
            Some(n) => serde_json::Value::Number(n),
            None => serde_json::json!(format!("{f}")),
        },
        Value::Bool(b) => serde_json::json!(b),
        Value::Bytes(data) => serde_json::json!({ "hex": hex::encode(data) }),
    }
}

/// Convert a decoded record to a JSON array
pub fn values_to_json(values: &[Value]) -> serde_json::Value {
    serde_json::Value::Array(values.iter().map(value_to_json).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_map_by_shape() {
        assert_eq!(
            value_from_json(&serde_json::json!(-3)).unwrap(),
            Value::Int(-3)
        );
        assert_eq!(
            value_from_json(&serde_json::json!(u64::MAX)).unwrap(),
            Value::Uint(u64::MAX)
        );
        assert_eq!(
            value_from_json(&serde_json::json!(1.5)).unwrap(),
            Value::Float(1.5)
        );
    }

    #[test]
    fn test_bytes_round_trip_through_hex_object() {
        let value = Value::Bytes(Bytes::from_static(b"\x00\xff"));
        let json = value_to_json(&value);
        assert_eq!(json, serde_json::json!({ "hex": "00ff" }));
        assert_eq!(value_from_json(&json).unwrap(), value);
    }

    #[test]
    fn test_plain_strings_become_utf8_bytes() {
        assert_eq!(
            value_from_json(&serde_json::json!("abc")).unwrap(),
            Value::Bytes(Bytes::from_static(b"abc"))
        );
    }

    #[test]
    fn test_non_finite_floats_become_strings() {
        assert_eq!(
            value_to_json(&Value::Float(f64::NAN)),
            serde_json::json!("NaN")
        );
        assert_eq!(
            value_to_json(&Value::Float(f64::INFINITY)),
            serde_json::json!("inf")
        );
    }

    #[test]
    fn test_arrays_and_null_rejected() {
        assert!(value_from_json(&serde_json::json!(null)).is_err());
        assert!(value_from_json(&serde_json::json!([1, 2])).is_err());
    }
}
