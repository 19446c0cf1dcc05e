//! Error types for flatten and unflatten operations.
//!
//! The engines themselves are total over structurally valid input: empty
//! containers, key collisions, non-numeric-looking segments, and overwrite
//! conflicts are all resolved by policy rather than by raising an error. The
//! errors here cover the boundaries around the engines:
//!
//! - **Configuration**: an empty delimiter is rejected up front, because
//!   splitting a key by an empty string is ambiguous
//! - **Facade**: unflattening a payload that is not an object
//! - **Serde bridge**: unsupported types and non-string map keys in
//!   [`to_value`](crate::to_value)
//!
//! Stack exhaustion on pathologically deep input is a resource limit, not a
//! recoverable error; callers needing a bound should set
//! [`FlattenOptions::with_depth`](crate::FlattenOptions::with_depth).
//!
//! ## Examples
//!
//! ```rust
//! use flattener::{flatten_with_options, FlattenOptions, Value, ValueMap};
//!
//! let options = FlattenOptions::new().with_delimiter("");
//! let result = flatten_with_options(&Value::Object(ValueMap::new()), &options);
//! assert!(result.is_err());
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur around the flatten/unflatten core.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// The configured delimiter is the empty string
    #[error("delimiter must not be empty: splitting by an empty string is ambiguous")]
    EmptyDelimiter,

    /// Unflatten was invoked on a payload that is not an object
    #[error("expected an object of flat path keys, found {0}")]
    ExpectedObject(String),

    /// Unsupported type for conversion to a dynamic value
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// Custom error
    #[error("error: {0}")]
    Custom(String),

    /// Generic message
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Creates an error for a facade unflatten call on a non-object payload.
    ///
    /// The argument names the kind of value that was found.
    pub fn expected_object(found: &str) -> Self {
        Error::ExpectedObject(found.to_string())
    }

    /// Creates an unsupported type error for types that cannot be converted to a value.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flattener::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
