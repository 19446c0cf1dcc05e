//! Conversions between [`Value`] and [`serde_json::Value`].
//!
//! Most callers already hold their data as `serde_json::Value`; these `From`
//! impls let it flow through the engines without hand-rolling a tree walk:
//!
//! ```rust
//! use flattener::{flatten, Value};
//!
//! let json = serde_json::json!({ "user": { "name": "John" } });
//! let flat = flatten(&Value::from(json)).unwrap();
//! assert_eq!(flat.get("user.name").and_then(|v| v.as_str()), Some("John"));
//! ```
//!
//! The JSON-bound direction is lossy for the payload-only variants:
//!
//! - `Date` becomes an RFC 3339 string
//! - `BigInt` becomes its decimal string
//! - `Infinity`, `-Infinity`, and `NaN` become JSON null (as `JSON.stringify`
//!   would produce)

use crate::{Number, Value, ValueMap};

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Number(Number::Integer(i))
                } else {
                    // u64 beyond i64 range, or a float
                    Value::Number(Number::Float(n.as_f64().unwrap_or(f64::NAN)))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(fields) => {
                let mut map = ValueMap::with_capacity(fields.len());
                for (key, value) in fields {
                    map.insert(key, Value::from(value));
                }
                Value::Object(map)
            }
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Number(Number::Integer(i)) => serde_json::Value::from(i),
            Value::Number(Number::Float(f)) => {
                // from_f64 is None for non-finite floats
                serde_json::Number::from_f64(f)
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null)
            }
            Value::Number(_) => serde_json::Value::Null,
            Value::String(s) => serde_json::Value::String(s),
            Value::Array(items) => {
                serde_json::Value::Array(items.into_iter().map(serde_json::Value::from).collect())
            }
            Value::Object(fields) => {
                let mut map = serde_json::Map::with_capacity(fields.len());
                for (key, value) in fields {
                    map.insert(key, serde_json::Value::from(value));
                }
                serde_json::Value::Object(map)
            }
            Value::Date(dt) => serde_json::Value::String(dt.to_rfc3339()),
            Value::BigInt(bi) => serde_json::Value::String(bi.to_string()),
        }
    }
}
