//! # flattener
//!
//! Convert nested, tree-shaped data (objects and arrays, arbitrarily deep)
//! into a flat mapping whose keys encode the original path with a delimiter,
//! and reconstruct the nesting from such a mapping.
//!
//! ## Where is this useful?
//!
//! Anywhere nested structures must live as flat key/value pairs: form fields,
//! query strings, environment-style config stores, key/value databases. The
//! flat form round-trips back to the nested form losslessly, subject to the
//! configured policy.
//!
//! ## Key Features
//!
//! - **Pure and stateless**: both directions are pure functions over an
//!   immutable input; no I/O, no shared state, safe to call concurrently
//! - **Configurable policy**: delimiters, depth limits, safe keys/arrays,
//!   key transforms, overwrite semantics, array-vs-object inference
//! - **Total over valid input**: no structurally valid payload makes the
//!   engines fail; every edge case resolves by policy
//! - **Serde Compatible**: any `T: Serialize` converts into the dynamic
//!   [`Value`] model via [`to_value`]; `serde_json::Value` converts via `From`
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! flattener = "0.1"
//! ```
//!
//! ### Flattening and unflattening
//!
//! ```rust
//! use flattener::{flatten, payload, unflatten, Value};
//!
//! let nested = payload!({
//!     "user": {
//!         "name": "John",
//!         "address": { "city": "NYC" }
//!     }
//! });
//!
//! let flat = flatten(&nested).unwrap();
//! assert_eq!(flat.get("user.name"), Some(&Value::from("John")));
//! assert_eq!(flat.get("user.address.city"), Some(&Value::from("NYC")));
//!
//! let back = unflatten(&flat).unwrap();
//! assert_eq!(back, nested);
//! ```
//!
//! ### Custom policy
//!
//! ```rust
//! use flattener::{flatten_with_options, payload, FlattenOptions};
//!
//! let nested = payload!({ "items": [1, 2, 3] });
//!
//! // Keep arrays as-is instead of exploding them into indexed keys
//! let options = FlattenOptions::new().with_safe(true);
//! let flat = flatten_with_options(&nested, &options).unwrap();
//! assert_eq!(flat.get("items"), Some(&payload!([1, 2, 3])));
//! ```
//!
//! ### Typed data via serde
//!
//! ```rust
//! use flattener::{flatten, to_value};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct User {
//!     name: String,
//!     active: bool,
//! }
//!
//! let user = User { name: "Alice".to_string(), active: true };
//! let flat = flatten(&to_value(&user).unwrap()).unwrap();
//! assert_eq!(flat.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```
//!
//! ## Performance Characteristics
//!
//! - **Flatten**: O(n) in the number of nodes; recursion bounded by
//!   `min(structural depth, configured depth)`
//! - **Unflatten**: O(total segments) across all flat keys
//! - **Memory**: output is freshly allocated; the input is never mutated
//!
//! Very deep unbounded input can exhaust the call stack during flatten; that
//! is a resource limit, not a recoverable error. Callers needing a bound
//! should set [`FlattenOptions::with_depth`].
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - No panics in the public API for structurally valid input
//! - Proper error propagation with `Result` types (the only engine
//!   precondition is a non-empty delimiter)
//!
//! ## Examples
//!
//! See the `demos/` directory for focused examples:
//!
//! - **`basic.rs`** - flatten and unflatten round trip
//! - **`custom_options.rs`** - delimiters, depth limits, safe keys
//! - **`dynamic_values.rs`** - building payloads with `payload!` and serde
//!
//! Run any of them with: `cargo run --example <name>`

pub mod error;
mod flatten;
pub mod json;
pub mod macros;
pub mod map;
pub mod options;
pub mod ser;
mod unflatten;
pub mod value;

pub use error::{Error, Result};
pub use map::ValueMap;
pub use options::{FlattenOptions, KeyTransform, UnflattenOptions};
pub use ser::ValueSerializer;
pub use value::{Number, Value};

use serde::Serialize;

/// Flattens a nested payload into a flat mapping with default options.
///
/// # Examples
///
/// ```rust
/// use flattener::{flatten, payload, Value};
///
/// let flat = flatten(&payload!({ "a": { "b": 1 } })).unwrap();
/// assert_eq!(flat.get("a.b"), Some(&Value::from(1)));
/// ```
///
/// # Errors
///
/// Never fails with the default options; see [`flatten_with_options`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn flatten(payload: &Value) -> Result<ValueMap> {
    flatten_with_options(payload, &FlattenOptions::default())
}

/// Flattens a nested payload into a flat mapping with custom options.
///
/// Policy precedence at each node: safes match, safe arrays, depth limit,
/// then ordinary descent. Subtrees cut off by a preservation policy are
/// emitted verbatim as leaf values.
///
/// # Examples
///
/// ```rust
/// use flattener::{flatten_with_options, payload, FlattenOptions};
///
/// let nested = payload!({ "a": { "b": { "c": 1 } } });
/// let options = FlattenOptions::new().with_depth(2);
/// let flat = flatten_with_options(&nested, &options).unwrap();
/// assert_eq!(flat.get("a.b"), Some(&payload!({ "c": 1 })));
/// ```
///
/// # Errors
///
/// Returns [`Error::EmptyDelimiter`] if the configured delimiter is empty.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn flatten_with_options(payload: &Value, options: &FlattenOptions) -> Result<ValueMap> {
    flatten::flatten_value(payload, options)
}

/// Rebuilds a nested structure from a flat mapping with default options.
///
/// # Examples
///
/// ```rust
/// use flattener::{payload, unflatten, Value, ValueMap};
///
/// let mut flat = ValueMap::new();
/// flat.insert("user.name".to_string(), Value::from("John"));
/// let nested = unflatten(&flat).unwrap();
/// assert_eq!(nested, payload!({ "user": { "name": "John" } }));
/// ```
///
/// # Errors
///
/// Never fails with the default options; see [`unflatten_with_options`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn unflatten(flat: &ValueMap) -> Result<Value> {
    unflatten_with_options(flat, &UnflattenOptions::default())
}

/// Rebuilds a nested structure from a flat mapping with custom options.
///
/// Entries are processed in the mapping's enumeration order; with `overwrite`
/// off, the first entry to claim a terminal slot with a scalar wins and later
/// entries targeting the same path are dropped.
///
/// # Examples
///
/// ```rust
/// use flattener::{payload, unflatten_with_options, UnflattenOptions, Value, ValueMap};
///
/// let mut flat = ValueMap::new();
/// flat.insert("user__name".to_string(), Value::from("John"));
/// let options = UnflattenOptions::new().with_delimiter("__");
/// let nested = unflatten_with_options(&flat, &options).unwrap();
/// assert_eq!(nested, payload!({ "user": { "name": "John" } }));
/// ```
///
/// # Errors
///
/// Returns [`Error::EmptyDelimiter`] if the configured delimiter is empty.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn unflatten_with_options(flat: &ValueMap, options: &UnflattenOptions) -> Result<Value> {
    unflatten::unflatten_map(flat, options)
}

/// Converts any `T: Serialize` to a [`Value`].
///
/// Useful for feeding typed Rust data through the engines when the structure
/// isn't known at compile time on the consuming side.
///
/// # Examples
///
/// ```rust
/// use flattener::{to_value, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value: Value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_object());
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented (e.g., a map with
/// non-string keys).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

/// A payload holder exposing flatten and unflatten as instance methods.
///
/// Mirrors the two free-function forms for callers that prefer to bind the
/// payload once and derive both representations from it. The `Flattener`
/// itself is stateless beyond the payload it holds.
///
/// # Examples
///
/// ```rust
/// use flattener::{payload, Flattener, Value};
///
/// let flattener = Flattener::new(payload!({ "a": { "b": 1 } }));
/// let flat = flattener.flatten().unwrap();
/// assert_eq!(flat.get("a.b"), Some(&Value::from(1)));
/// ```
#[derive(Debug, Clone)]
pub struct Flattener {
    payload: Value,
}

impl Flattener {
    /// Wraps a payload value.
    #[must_use]
    pub fn new(payload: Value) -> Self {
        Flattener { payload }
    }

    /// Returns the held payload.
    #[must_use]
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// Flattens the held payload with default options.
    ///
    /// # Errors
    ///
    /// See [`flatten_with_options`].
    pub fn flatten(&self) -> Result<ValueMap> {
        flatten(&self.payload)
    }

    /// Flattens the held payload with custom options.
    ///
    /// # Errors
    ///
    /// See [`flatten_with_options`].
    pub fn flatten_with_options(&self, options: &FlattenOptions) -> Result<ValueMap> {
        flatten_with_options(&self.payload, options)
    }

    /// Unflattens the held payload with default options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ExpectedObject`] if the payload is not an object of
    /// flat path keys; see also [`unflatten_with_options`].
    pub fn unflatten(&self) -> Result<Value> {
        self.unflatten_with_options(&UnflattenOptions::default())
    }

    /// Unflattens the held payload with custom options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ExpectedObject`] if the payload is not an object of
    /// flat path keys; see also [`unflatten_with_options`].
    pub fn unflatten_with_options(&self, options: &UnflattenOptions) -> Result<Value> {
        match &self.payload {
            Value::Object(flat) => unflatten_with_options(flat, options),
            other => Err(Error::expected_object(value_kind(other))),
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
        Value::Date(_) => "a date",
        Value::BigInt(_) => "a bigint",
    }
}
