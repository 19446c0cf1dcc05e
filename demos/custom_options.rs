//! Customizing flatten and unflatten policy.
//!
//! Run with: cargo run --example custom_options

use flattener::{
    flatten_with_options, payload, unflatten_with_options, FlattenOptions, UnflattenOptions,
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let nested = payload!({
        "user": {
            "name": "John",
            "tags": ["admin", "dev"],
            "meta": { "info": { "email": "john@example.com" } }
        }
    });

    // Custom delimiter (useful when keys may contain dots)
    println!("Double-underscore delimiter:");
    let options = FlattenOptions::new().with_delimiter("__");
    for (key, value) in flatten_with_options(&nested, &options)?.iter() {
        println!("  {} = {}", key, value);
    }
    println!();

    // Safe arrays: keep arrays as single values
    println!("Safe arrays:");
    let options = FlattenOptions::new().with_safe(true);
    for (key, value) in flatten_with_options(&nested, &options)?.iter() {
        println!("  {} = {}", key, value);
    }
    println!();

    // Safes: exempt one exact path from flattening
    println!("Safes on user.meta:");
    let options = FlattenOptions::new().with_safes(["user.meta"]);
    for (key, value) in flatten_with_options(&nested, &options)?.iter() {
        println!("  {} = {}", key, value);
    }
    println!();

    // Depth limit: truncate below two levels
    println!("Depth 2:");
    let options = FlattenOptions::new().with_depth(2);
    for (key, value) in flatten_with_options(&nested, &options)?.iter() {
        println!("  {} = {}", key, value);
    }
    println!();

    // Overwrite on unflatten: later entries replace earlier scalars
    let mut flat = flattener::ValueMap::new();
    flat.insert("user".to_string(), flattener::Value::from("flat"));
    flat.insert("user.name".to_string(), flattener::Value::from("John"));

    println!("Unflatten without overwrite:");
    println!("  {}", unflatten_with_options(&flat, &UnflattenOptions::new())?);

    println!("Unflatten with overwrite:");
    let options = UnflattenOptions::new().with_overwrite(true);
    println!("  {}", unflatten_with_options(&flat, &options)?);

    Ok(())
}
