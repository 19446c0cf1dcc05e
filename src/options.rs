//! Configuration options for flatten and unflatten.
//!
//! This module provides the two option records that parameterize the engines:
//!
//! - [`FlattenOptions`]: delimiter, safe arrays, safe paths, depth limit, key transform
//! - [`UnflattenOptions`]: delimiter, overwrite policy, object mode, key transform
//!
//! Both follow the builder style: start from [`FlattenOptions::new`] /
//! [`UnflattenOptions::new`] (the documented defaults) and override individual
//! fields with `with_*` methods. Merging with defaults is shallow, field by
//! field; no field is itself partially overridable.
//!
//! ## Examples
//!
//! ```rust
//! use flattener::{FlattenOptions, UnflattenOptions};
//!
//! // Flatten with a custom delimiter and a depth cap
//! let options = FlattenOptions::new().with_delimiter("__").with_depth(2);
//!
//! // Unflatten allowing later entries to replace earlier scalars
//! let options = UnflattenOptions::new().with_overwrite(true);
//!
//! // Uppercase every emitted key
//! let options = FlattenOptions::new().with_transform_key(|k| k.to_uppercase());
//! ```

use std::fmt;
use std::sync::Arc;

/// A key transformation applied to emitted keys.
///
/// During flatten the transform is applied to every fully joined key at
/// emission time (including the `"array"`/`"root"` fallback keys), never to
/// path segments before joining. During unflatten it is applied to each
/// segment independently, after splitting. The asymmetry is part of the
/// documented behavior.
pub type KeyTransform = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Configuration for the flatten engine.
///
/// # Defaults
///
/// | field           | default       |
/// |-----------------|---------------|
/// | `delimiter`     | `"."`         |
/// | `safe`          | `false`       |
/// | `safes`         | empty         |
/// | `depth`         | unbounded     |
/// | `transform_key` | identity      |
///
/// # Examples
///
/// ```rust
/// use flattener::FlattenOptions;
///
/// let options = FlattenOptions::new()
///     .with_safe(true)
///     .with_safes(["user.tags"])
///     .with_depth(3);
/// assert_eq!(options.delimiter, ".");
/// assert!(options.safe);
/// ```
#[derive(Clone)]
pub struct FlattenOptions {
    /// String joining path segments in emitted keys.
    pub delimiter: String,
    /// When `true`, arrays are emitted verbatim instead of being descended into.
    pub safe: bool,
    /// Exact path strings exempted from flattening; matching subtrees are
    /// emitted verbatim.
    pub safes: Vec<String>,
    /// Maximum recursion steps before the remaining structure is emitted as a
    /// single leaf. `None` means unbounded. `Some(0)` truncates everything,
    /// including the root, into one `"root"`-keyed entry.
    pub depth: Option<usize>,
    /// Transform applied to every emitted key; `None` is the identity.
    pub transform_key: Option<KeyTransform>,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        FlattenOptions {
            delimiter: ".".to_string(),
            safe: false,
            safes: Vec::new(),
            depth: None,
            transform_key: None,
        }
    }
}

impl FlattenOptions {
    /// Creates the default options (dot delimiter, no preservation, unbounded depth).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the delimiter joining path segments.
    ///
    /// The engines reject an empty delimiter at call time.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Keeps arrays as-is instead of flattening their elements.
    ///
    /// An array at the root is emitted under the literal key `"array"`.
    #[must_use]
    pub fn with_safe(mut self, safe: bool) -> Self {
        self.safe = safe;
        self
    }

    /// Sets the exact path strings to exempt from flattening.
    ///
    /// Paths are compared against the raw (untransformed) joined prefix.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flattener::FlattenOptions;
    ///
    /// let options = FlattenOptions::new().with_safes(["user.tags", "meta"]);
    /// assert_eq!(options.safes.len(), 2);
    /// ```
    #[must_use]
    pub fn with_safes<I, S>(mut self, safes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.safes = safes.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the maximum number of recursion steps.
    ///
    /// Structure below the limit is emitted untouched as a single leaf value.
    #[must_use]
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = Some(depth);
        self
    }

    /// Sets a transform applied to every emitted key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flattener::FlattenOptions;
    ///
    /// let options = FlattenOptions::new().with_transform_key(str::to_uppercase);
    /// ```
    #[must_use]
    pub fn with_transform_key<F>(mut self, transform: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.transform_key = Some(Arc::new(transform));
        self
    }

    pub(crate) fn apply_transform(&self, key: &str) -> String {
        match &self.transform_key {
            Some(f) => f(key),
            None => key.to_string(),
        }
    }
}

impl fmt::Debug for FlattenOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlattenOptions")
            .field("delimiter", &self.delimiter)
            .field("safe", &self.safe)
            .field("safes", &self.safes)
            .field("depth", &self.depth)
            .field(
                "transform_key",
                &self.transform_key.as_ref().map(|_| "<fn>"),
            )
            .finish()
    }
}

/// Configuration for the unflatten engine.
///
/// # Defaults
///
/// | field           | default  |
/// |-----------------|----------|
/// | `delimiter`     | `"."`    |
/// | `overwrite`     | `false`  |
/// | `object`        | `false`  |
/// | `transform_key` | identity |
///
/// # Examples
///
/// ```rust
/// use flattener::UnflattenOptions;
///
/// let options = UnflattenOptions::new().with_overwrite(true).with_object(true);
/// assert!(options.overwrite);
/// assert!(options.object);
/// ```
#[derive(Clone)]
pub struct UnflattenOptions {
    /// String splitting flat keys into path segments.
    pub delimiter: String,
    /// When `true`, a later entry may replace an already-assigned scalar slot;
    /// when `false`, the existing scalar wins and the entry is dropped.
    pub overwrite: bool,
    /// When `true`, numeric-looking segments build objects instead of arrays.
    pub object: bool,
    /// Transform applied to each segment after splitting; `None` is the identity.
    pub transform_key: Option<KeyTransform>,
}

impl Default for UnflattenOptions {
    fn default() -> Self {
        UnflattenOptions {
            delimiter: ".".to_string(),
            overwrite: false,
            object: false,
            transform_key: None,
        }
    }
}

impl UnflattenOptions {
    /// Creates the default options (dot delimiter, no overwrite, array inference on).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the delimiter splitting flat keys into segments.
    ///
    /// The engines reject an empty delimiter at call time.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Allows later entries to replace already-assigned scalar slots.
    #[must_use]
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Forces numeric-looking segments to build objects instead of arrays.
    #[must_use]
    pub fn with_object(mut self, object: bool) -> Self {
        self.object = object;
        self
    }

    /// Sets a transform applied to each segment after splitting.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flattener::UnflattenOptions;
    ///
    /// let options = UnflattenOptions::new().with_transform_key(str::to_uppercase);
    /// ```
    #[must_use]
    pub fn with_transform_key<F>(mut self, transform: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.transform_key = Some(Arc::new(transform));
        self
    }

    pub(crate) fn apply_transform(&self, key: &str) -> String {
        match &self.transform_key {
            Some(f) => f(key),
            None => key.to_string(),
        }
    }
}

impl fmt::Debug for UnflattenOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnflattenOptions")
            .field("delimiter", &self.delimiter)
            .field("overwrite", &self.overwrite)
            .field("object", &self.object)
            .field(
                "transform_key",
                &self.transform_key.as_ref().map(|_| "<fn>"),
            )
            .finish()
    }
}
