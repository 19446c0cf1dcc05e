//! Your first flatten/unflatten round trip.
//!
//! Run with: cargo run --example basic

use flattener::{flatten, payload, unflatten};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let nested = payload!({
        "user": {
            "name": "John",
            "age": 30,
            "address": {
                "city": "NYC",
                "zip": "10001"
            }
        }
    });

    println!("Nested payload:");
    println!("{}\n", nested);

    let flat = flatten(&nested)?;
    println!("Flattened:");
    for (key, value) in flat.iter() {
        println!("  {} = {}", key, value);
    }
    println!();

    let back = unflatten(&flat)?;
    println!("Reconstructed:");
    println!("{}\n", back);

    assert_eq!(back, nested);
    println!("Round trip is lossless.");

    Ok(())
}
