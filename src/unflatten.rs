//! The unflatten engine: iterative reconstruction of a nested structure from a
//! flat mapping.
//!
//! Entries are processed in the flat map's enumeration order. Each key is
//! split by the delimiter, the key transform is applied per segment (after
//! splitting — the asymmetry with flatten is deliberate and documented), and
//! the segments are walked from the root, materializing intermediate
//! containers on demand. Container shape is decided by peeking at the next
//! segment: index-looking segments build arrays unless `object` mode is set.
//!
//! ## Overwrite policy
//!
//! With `overwrite` false, a scalar already occupying a slot wins: a later
//! entry targeting the same final slot is dropped, and a later entry needing
//! to descend *through* the scalar abandons the rest of its path without
//! rolling back prefix containers it already created. With `overwrite` true,
//! scalars are replaced as needed. A composite in a *final* slot is replaced
//! in either mode; a composite in an intermediate slot is descended into
//! unchanged, whatever shape the peek decided.
//!
//! ## Index classification quirk
//!
//! Whether a segment counts as an array index is decided by
//! [`classify_segment`]: it must parse as a non-negative integer and must not
//! contain a literal `.` character. The dot check is independent of the
//! configured delimiter; this is preserved legacy behavior, not an oversight.

use crate::{Error, Result, UnflattenOptions, Value, ValueMap};

/// How a path segment addresses its container.
///
/// `Index` canonicalizes the segment (`"01"` becomes index 1); when an index
/// segment addresses an object instead of an array, the canonical decimal
/// string is used as the field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SegmentKey {
    Index(usize),
    Field(String),
}

impl SegmentKey {
    fn into_field(self) -> String {
        match self {
            SegmentKey::Index(index) => index.to_string(),
            SegmentKey::Field(field) => field,
        }
    }
}

/// Classifies a path segment as an array index or an object field.
///
/// A segment is an index iff `object_mode` is off, the segment contains no
/// literal `.`, and it parses as a non-negative integer.
pub(crate) fn classify_segment(segment: &str, object_mode: bool) -> SegmentKey {
    if !object_mode {
        if let Some(index) = parse_index(segment) {
            return SegmentKey::Index(index);
        }
    }
    SegmentKey::Field(segment.to_string())
}

fn parse_index(segment: &str) -> Option<usize> {
    // Literal '.' disqualifies a segment regardless of the configured
    // delimiter (legacy rule)
    if segment.contains('.') {
        return None;
    }
    segment.parse::<usize>().ok()
}

/// Rebuilds a nested structure from a flat mapping of delimiter-joined keys.
///
/// Always produces a `Value::Object` root. Fails only when the configured
/// delimiter is empty.
pub(crate) fn unflatten_map(flat: &ValueMap, options: &UnflattenOptions) -> Result<Value> {
    if options.delimiter.is_empty() {
        return Err(Error::EmptyDelimiter);
    }

    let mut root = Value::Object(ValueMap::new());
    for (flat_key, value) in flat.iter() {
        let segments: Vec<String> = flat_key
            .split(options.delimiter.as_str())
            .map(|segment| options.apply_transform(segment))
            .collect();
        write_path(&mut root, &segments, value, options);
    }
    Ok(root)
}

fn write_path(root: &mut Value, segments: &[String], value: &Value, options: &UnflattenOptions) {
    let mut current = root;

    for (i, segment) in segments.iter().enumerate() {
        let key = classify_segment(segment, options.object);
        let is_last = i + 1 == segments.len();

        if is_last {
            assign_final(current, key, value, options.overwrite);
            return;
        }

        let next_is_index = !options.object && parse_index(&segments[i + 1]).is_some();

        current = match current {
            Value::Object(map) => {
                let slot = map.entry(key.into_field()).or_insert(Value::Null);
                if !materialize(slot, next_is_index, options.overwrite) {
                    return;
                }
                slot
            }
            Value::Array(items) => {
                let SegmentKey::Index(index) = key else {
                    // A field segment cannot address an array slot
                    return;
                };
                if index >= items.len() {
                    items.resize(index + 1, Value::Null);
                }
                let slot = &mut items[index];
                if !materialize(slot, next_is_index, options.overwrite) {
                    return;
                }
                slot
            }
            // Only composites are ever descended into
            _ => return,
        };
    }
}

/// Ensures `slot` holds a container to descend into, creating the decided
/// shape over unset/null slots and over scalars when overwriting is allowed.
///
/// Returns `false` when the slot holds a scalar that may not be replaced; the
/// caller then abandons the rest of the entry's path. An existing composite is
/// kept as-is regardless of the decided shape.
fn materialize(slot: &mut Value, next_is_index: bool, overwrite: bool) -> bool {
    if slot.is_null() {
        *slot = new_container(next_is_index);
    } else if !slot.is_composite() {
        if !overwrite {
            return false;
        }
        *slot = new_container(next_is_index);
    }
    true
}

fn new_container(as_array: bool) -> Value {
    if as_array {
        Value::Array(Vec::new())
    } else {
        Value::Object(ValueMap::new())
    }
}

fn assign_final(container: &mut Value, key: SegmentKey, value: &Value, overwrite: bool) {
    match container {
        Value::Object(map) => {
            let field = key.into_field();
            // An existing scalar (null included) wins without overwrite; an
            // existing composite is replaced in either mode
            let blocked = !overwrite
                && map
                    .get(&field)
                    .is_some_and(|existing| !existing.is_composite());
            if !blocked {
                map.insert(field, value.clone());
            }
        }
        Value::Array(items) => {
            let SegmentKey::Index(index) = key else {
                return;
            };
            if index < items.len() {
                // Null elements are padding holes, always assignable
                let existing = &items[index];
                let blocked = !overwrite && !existing.is_null() && !existing.is_composite();
                if !blocked {
                    items[index] = value.clone();
                }
            } else {
                items.resize(index, Value::Null);
                items.push(value.clone());
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload;

    fn unflat(flat: &ValueMap, options: &UnflattenOptions) -> Value {
        unflatten_map(flat, options).unwrap()
    }

    fn flat_map(entries: &[(&str, Value)]) -> ValueMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_classify_plain_indices() {
        assert_eq!(classify_segment("0", false), SegmentKey::Index(0));
        assert_eq!(classify_segment("12", false), SegmentKey::Index(12));
    }

    #[test]
    fn test_classify_canonicalizes_leading_zeros() {
        assert_eq!(classify_segment("01", false), SegmentKey::Index(1));
    }

    #[test]
    fn test_classify_fields() {
        assert_eq!(
            classify_segment("name", false),
            SegmentKey::Field("name".to_string())
        );
        assert_eq!(
            classify_segment("a1", false),
            SegmentKey::Field("a1".to_string())
        );
        assert_eq!(classify_segment("", false), SegmentKey::Field(String::new()));
        assert_eq!(
            classify_segment("-1", false),
            SegmentKey::Field("-1".to_string())
        );
    }

    #[test]
    fn test_classify_dotted_segments_are_fields() {
        // The '.' rule holds even when the delimiter is something else
        assert_eq!(
            classify_segment("1.5", false),
            SegmentKey::Field("1.5".to_string())
        );
    }

    #[test]
    fn test_classify_object_mode_forces_fields() {
        assert_eq!(
            classify_segment("0", true),
            SegmentKey::Field("0".to_string())
        );
    }

    #[test]
    fn test_rebuilds_nested_object() {
        let flat = flat_map(&[
            ("user.name", Value::from("John")),
            ("user.age", Value::from(30)),
            ("user.address.city", Value::from("NYC")),
        ]);
        let out = unflat(&flat, &UnflattenOptions::new());

        assert_eq!(
            out,
            payload!({
                "user": { "name": "John", "age": 30, "address": { "city": "NYC" } }
            })
        );
    }

    #[test]
    fn test_numeric_segments_build_arrays() {
        let flat = flat_map(&[
            ("tags.0", Value::from("admin")),
            ("tags.1", Value::from("dev")),
        ]);
        let out = unflat(&flat, &UnflattenOptions::new());

        assert_eq!(out, payload!({ "tags": ["admin", "dev"] }));
    }

    #[test]
    fn test_sparse_indices_pad_with_null() {
        let flat = flat_map(&[("a.2", Value::from("x"))]);
        let out = unflat(&flat, &UnflattenOptions::new());

        assert_eq!(out, payload!({ "a": [null, null, "x"] }));
    }

    #[test]
    fn test_null_array_elements_are_assignable_holes() {
        let flat = flat_map(&[("a.2", Value::from("x")), ("a.0", Value::from("y"))]);
        let out = unflat(&flat, &UnflattenOptions::new());

        assert_eq!(out, payload!({ "a": ["y", null, "x"] }));
    }

    #[test]
    fn test_object_mode_builds_objects_for_numeric_segments() {
        let flat = flat_map(&[("a.0", Value::from("x"))]);
        let options = UnflattenOptions::new().with_object(true);
        let out = unflat(&flat, &options);

        assert_eq!(out, payload!({ "a": { "0": "x" } }));
    }

    #[test]
    fn test_custom_delimiter() {
        let flat = flat_map(&[("user__name", Value::from("John"))]);
        let options = UnflattenOptions::new().with_delimiter("__");
        let out = unflat(&flat, &options);

        assert_eq!(out, payload!({ "user": { "name": "John" } }));
    }

    #[test]
    fn test_dotted_segment_with_custom_delimiter_stays_a_field() {
        let flat = flat_map(&[("a__1.5", Value::from("x"))]);
        let options = UnflattenOptions::new().with_delimiter("__");
        let out = unflat(&flat, &options);

        assert_eq!(out, payload!({ "a": { "1.5": "x" } }));
    }

    #[test]
    fn test_scalar_claim_beats_nested_path_without_overwrite() {
        // "user.name" runs first, building an object; the later "user" entry
        // replaces the composite (only scalars are protected)
        let flat = flat_map(&[("user.name", Value::from("John")), ("user", Value::from("flat"))]);
        let out = unflat(&flat, &UnflattenOptions::new());

        assert_eq!(out, payload!({ "user": "flat" }));
    }

    #[test]
    fn test_existing_scalar_wins_without_overwrite() {
        let flat = flat_map(&[("user", Value::from("flat")), ("user.name", Value::from("John"))]);
        let out = unflat(&flat, &UnflattenOptions::new());

        assert_eq!(out, payload!({ "user": "flat" }));
    }

    #[test]
    fn test_overwrite_replaces_scalar_with_container() {
        let flat = flat_map(&[("user", Value::from("flat")), ("user.name", Value::from("John"))]);
        let options = UnflattenOptions::new().with_overwrite(true);
        let out = unflat(&flat, &options);

        assert_eq!(out, payload!({ "user": { "name": "John" } }));
    }

    #[test]
    fn test_abandoned_entry_keeps_partial_prefix_writes() {
        // "a.b.c.d" materializes a.b before hitting the scalar at a.b.c; the
        // abandoned entry leaves those containers in place
        let flat = flat_map(&[
            ("a.b.c", Value::from(1)),
            ("a.b.c.d", Value::from(2)),
            ("x", Value::from(3)),
        ]);
        let out = unflat(&flat, &UnflattenOptions::new());

        assert_eq!(out, payload!({ "a": { "b": { "c": 1 } }, "x": 3 }));
    }

    #[test]
    fn test_diverging_paths_still_populate_after_conflict() {
        let flat = flat_map(&[
            ("a", Value::from("scalar")),
            ("a.b", Value::from(1)),
            ("c.d", Value::from(2)),
        ]);
        let out = unflat(&flat, &UnflattenOptions::new());

        assert_eq!(out, payload!({ "a": "scalar", "c": { "d": 2 } }));
    }

    #[test]
    fn test_null_intermediate_materializes_into_container() {
        let flat = flat_map(&[("a.b", Value::Null), ("a.b.c", Value::from(1))]);
        let out = unflat(&flat, &UnflattenOptions::new());

        // A null slot is treated like an unset one on descent, even without
        // overwrite
        assert_eq!(out, payload!({ "a": { "b": { "c": 1 } } }));
    }

    #[test]
    fn test_explicit_null_object_slot_blocks_later_entry() {
        // "01" and "1" both canonicalize to field "1" of the root object, so
        // the two entries target the same slot; the null written first counts
        // as present and blocks the later scalar without overwrite
        let flat = flat_map(&[("01", Value::Null), ("1", Value::from(9))]);
        let out = unflat(&flat, &UnflattenOptions::new());

        assert_eq!(out, payload!({ "1": null }));
    }

    #[test]
    fn test_existing_composite_is_descended_regardless_of_decided_shape() {
        // "a.b" decides Object for slot "a"; "a.0" later decides Array but the
        // existing object is kept and indexed as a field
        let flat = flat_map(&[("a.b", Value::from(1)), ("a.0", Value::from(2))]);
        let out = unflat(&flat, &UnflattenOptions::new());

        assert_eq!(out, payload!({ "a": { "b": 1, "0": 2 } }));
    }

    #[test]
    fn test_field_segment_into_array_abandons_entry() {
        let flat = flat_map(&[("a.0", Value::from(1)), ("a.x", Value::from(2))]);
        let out = unflat(&flat, &UnflattenOptions::new());

        assert_eq!(out, payload!({ "a": [1] }));
    }

    #[test]
    fn test_index_segments_at_root_become_fields() {
        // The root is always an object; index-like segments address it by
        // their canonical decimal string
        let flat = flat_map(&[("0.a", Value::from(1))]);
        let out = unflat(&flat, &UnflattenOptions::new());

        assert_eq!(out, payload!({ "0": { "a": 1 } }));
    }

    #[test]
    fn test_transform_applies_per_segment_after_split() {
        let flat = flat_map(&[("user.name", Value::from("John"))]);
        let options = UnflattenOptions::new().with_transform_key(str::to_uppercase);
        let out = unflat(&flat, &options);

        assert_eq!(out, payload!({ "USER": { "NAME": "John" } }));
    }

    #[test]
    fn test_empty_flat_map_yields_empty_object() {
        let out = unflat(&ValueMap::new(), &UnflattenOptions::new());
        assert_eq!(out, payload!({}));
    }

    #[test]
    fn test_empty_delimiter_rejected() {
        let options = UnflattenOptions::new().with_delimiter("");
        assert!(unflatten_map(&ValueMap::new(), &options).is_err());
    }
}
