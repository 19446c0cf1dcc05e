//! The flatten engine: recursive descent from a nested payload to a flat mapping.
//!
//! At each recursive call the policy is evaluated in a fixed precedence order:
//!
//! 1. **Safes match** — the current prefix exactly equals a configured safe
//!    path: emit the subtree verbatim
//! 2. **Safe arrays** — `safe` is set and the payload is an array: emit it
//!    verbatim (at the root, under the literal key `"array"`)
//! 3. **Depth limit** — the step counter reached the configured depth: emit
//!    the remaining structure verbatim (at the root, under `"root"`)
//! 4. **Array descent** — recurse per element with stringified indices
//! 5. **Scalar** — emit under the current prefix (nothing at the root)
//! 6. **Object descent** — recurse per field in insertion order
//!
//! The key transform is applied to fully joined keys at emission time only,
//! so delimiter characters inside a transformed key are never re-split.
//! Children merge into a single output map, giving last-write-wins semantics
//! on key collisions.

use crate::{Error, FlattenOptions, Result, Value, ValueMap};

/// Flattens `payload` into a flat mapping of delimiter-joined path keys.
///
/// The input is not mutated; leaf values are cloned into the output. Fails
/// only when the configured delimiter is empty.
pub(crate) fn flatten_value(payload: &Value, options: &FlattenOptions) -> Result<ValueMap> {
    if options.delimiter.is_empty() {
        return Err(Error::EmptyDelimiter);
    }
    let mut out = ValueMap::new();
    flatten_into(payload, options, "", 0, &mut out);
    Ok(out)
}

fn flatten_into(
    payload: &Value,
    options: &FlattenOptions,
    prefix: &str,
    step: usize,
    out: &mut ValueMap,
) {
    if !prefix.is_empty() && options.safes.iter().any(|safe| safe == prefix) {
        out.insert(options.apply_transform(prefix), payload.clone());
        return;
    }

    if options.safe && payload.is_array() {
        let key = if prefix.is_empty() { "array" } else { prefix };
        out.insert(options.apply_transform(key), payload.clone());
        return;
    }

    if let Some(depth) = options.depth {
        // >= comparison: depth 0 truncates everything, root included
        if step >= depth {
            let key = if prefix.is_empty() { "root" } else { prefix };
            out.insert(options.apply_transform(key), payload.clone());
            return;
        }
    }

    match payload {
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                let child = join_key(prefix, &options.delimiter, &index.to_string());
                if item.is_composite() {
                    flatten_into(item, options, &child, step + 1, out);
                } else {
                    out.insert(options.apply_transform(&child), item.clone());
                }
            }
        }
        Value::Object(fields) => {
            for (key, value) in fields.iter() {
                let child = join_key(prefix, &options.delimiter, key);
                if value.is_composite() {
                    flatten_into(value, options, &child, step + 1, out);
                } else {
                    out.insert(options.apply_transform(&child), value.clone());
                }
            }
        }
        _ => {
            // A scalar at the root has no path to emit under
            if !prefix.is_empty() {
                out.insert(options.apply_transform(prefix), payload.clone());
            }
        }
    }
}

fn join_key(prefix: &str, delimiter: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{}{}{}", prefix, delimiter, segment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload;

    fn flat(payload: &Value, options: &FlattenOptions) -> ValueMap {
        flatten_value(payload, options).unwrap()
    }

    #[test]
    fn test_nested_object() {
        let input = payload!({
            "user": {
                "name": "John",
                "age": 30,
                "address": { "city": "NYC", "zip": "10001" }
            }
        });

        let out = flat(&input, &FlattenOptions::new());

        assert_eq!(out.len(), 4);
        assert_eq!(out.get("user.name"), Some(&Value::from("John")));
        assert_eq!(out.get("user.age"), Some(&Value::from(30)));
        assert_eq!(out.get("user.address.city"), Some(&Value::from("NYC")));
        assert_eq!(out.get("user.address.zip"), Some(&Value::from("10001")));
    }

    #[test]
    fn test_array_indices() {
        let input = payload!({ "tags": ["admin", "dev"] });
        let out = flat(&input, &FlattenOptions::new());

        assert_eq!(out.get("tags.0"), Some(&Value::from("admin")));
        assert_eq!(out.get("tags.1"), Some(&Value::from("dev")));
    }

    #[test]
    fn test_root_array_uses_bare_indices() {
        let input = payload!([1, { "a": 2 }]);
        let out = flat(&input, &FlattenOptions::new());

        assert_eq!(out.get("0"), Some(&Value::from(1)));
        assert_eq!(out.get("1.a"), Some(&Value::from(2)));
    }

    #[test]
    fn test_scalar_root_emits_nothing() {
        let out = flat(&Value::from(42), &FlattenOptions::new());
        assert!(out.is_empty());

        let out = flat(&Value::Null, &FlattenOptions::new());
        assert!(out.is_empty());
    }

    #[test]
    fn test_empty_containers_emit_nothing() {
        let out = flat(&payload!({}), &FlattenOptions::new());
        assert!(out.is_empty());

        let out = flat(&payload!({ "a": {} }), &FlattenOptions::new());
        assert!(out.is_empty());

        let out = flat(&payload!({ "a": [] }), &FlattenOptions::new());
        assert!(out.is_empty());
    }

    #[test]
    fn test_null_leaves_are_emitted() {
        let input = payload!({ "a": { "b": null } });
        let out = flat(&input, &FlattenOptions::new());
        assert_eq!(out.get("a.b"), Some(&Value::Null));
    }

    #[test]
    fn test_safes_emit_subtree_verbatim() {
        let input = payload!({
            "user": { "name": "John", "tags": ["admin", "dev"] }
        });
        let options = FlattenOptions::new().with_safes(["user.tags"]);
        let out = flat(&input, &options);

        assert_eq!(out.len(), 2);
        assert_eq!(out.get("user.name"), Some(&Value::from("John")));
        assert_eq!(out.get("user.tags"), Some(&payload!(["admin", "dev"])));
    }

    #[test]
    fn test_safes_match_is_exact() {
        let input = payload!({ "user": { "tags": { "a": 1 } } });
        let options = FlattenOptions::new().with_safes(["user.tag"]);
        let out = flat(&input, &options);

        // "user.tags" is not "user.tag", so descent continues
        assert_eq!(out.get("user.tags.a"), Some(&Value::from(1)));
    }

    #[test]
    fn test_safe_preserves_arrays() {
        let input = payload!({ "items": [1, 2, 3] });
        let options = FlattenOptions::new().with_safe(true);
        let out = flat(&input, &options);

        assert_eq!(out.len(), 1);
        assert_eq!(out.get("items"), Some(&payload!([1, 2, 3])));
    }

    #[test]
    fn test_safe_root_array_uses_array_key() {
        let input = payload!([1, 2]);
        let options = FlattenOptions::new().with_safe(true);
        let out = flat(&input, &options);

        assert_eq!(out.len(), 1);
        assert_eq!(out.get("array"), Some(&payload!([1, 2])));
    }

    #[test]
    fn test_safes_take_precedence_over_safe() {
        let input = payload!({ "items": [1, 2] });
        let options = FlattenOptions::new()
            .with_safe(true)
            .with_safes(["items"])
            .with_transform_key(str::to_uppercase);
        let out = flat(&input, &options);

        // Emitted via the safes branch, still transformed
        assert_eq!(out.get("ITEMS"), Some(&payload!([1, 2])));
    }

    #[test]
    fn test_depth_truncates_subtree() {
        let input = payload!({
            "user": {
                "name": "John",
                "meta": { "info": { "email": "john@example.com" } }
            }
        });
        let options = FlattenOptions::new().with_depth(2);
        let out = flat(&input, &options);

        assert_eq!(out.len(), 2);
        assert_eq!(out.get("user.name"), Some(&Value::from("John")));
        assert_eq!(
            out.get("user.meta"),
            Some(&payload!({ "info": { "email": "john@example.com" } }))
        );
    }

    #[test]
    fn test_depth_zero_truncates_root() {
        let input = payload!({ "a": { "b": 1 } });
        let options = FlattenOptions::new().with_depth(0);
        let out = flat(&input, &options);

        assert_eq!(out.len(), 1);
        assert_eq!(out.get("root"), Some(&input));
    }

    #[test]
    fn test_custom_delimiter() {
        let input = payload!({ "user": { "name": "John" } });
        let options = FlattenOptions::new().with_delimiter("__");
        let out = flat(&input, &options);

        assert_eq!(out.get("user__name"), Some(&Value::from("John")));
    }

    #[test]
    fn test_transform_applies_to_joined_keys_only() {
        let input = payload!({ "user": { "name": "John" } });
        let options = FlattenOptions::new().with_transform_key(|k| format!("x:{}", k));
        let out = flat(&input, &options);

        // One prefix per emission, not one per segment
        assert_eq!(out.get("x:user.name"), Some(&Value::from("John")));
    }

    #[test]
    fn test_transform_applies_to_fallback_keys() {
        let options = FlattenOptions::new()
            .with_depth(0)
            .with_transform_key(str::to_uppercase);
        let out = flat(&payload!({ "a": 1 }), &options);
        assert!(out.contains_key("ROOT"));

        let options = FlattenOptions::new()
            .with_safe(true)
            .with_transform_key(str::to_uppercase);
        let out = flat(&payload!([1]), &options);
        assert!(out.contains_key("ARRAY"));
    }

    #[test]
    fn test_collisions_are_last_write_wins() {
        let input = payload!({ "a": { "x": 1 }, "b": { "x": 2 } });
        let options = FlattenOptions::new().with_transform_key(|_| "same".to_string());
        let out = flat(&input, &options);

        assert_eq!(out.len(), 1);
        assert_eq!(out.get("same"), Some(&Value::from(2)));
    }

    #[test]
    fn test_empty_delimiter_rejected() {
        let options = FlattenOptions::new().with_delimiter("");
        assert!(flatten_value(&payload!({ "a": 1 }), &options).is_err());
    }

    #[test]
    fn test_already_flat_map_is_unchanged() {
        let input = payload!({ "a": 1, "b": "two", "c": null });
        let out = flat(&input, &FlattenOptions::new());

        assert_eq!(Value::Object(out), input);
    }

    #[test]
    fn test_output_preserves_traversal_order() {
        let input = payload!({ "b": { "y": 1 }, "a": 2 });
        let out = flat(&input, &FlattenOptions::new());

        let keys: Vec<_> = out.keys().cloned().collect();
        assert_eq!(keys, vec!["b.y", "a"]);
    }
}
