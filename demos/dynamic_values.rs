//! Working with dynamic payloads: payload!, serde, and serde_json.
//!
//! Run with: cargo run --example dynamic_values

use flattener::{flatten, payload, to_value, Value};
use serde::Serialize;
use std::error::Error;

#[derive(Serialize)]
struct Server {
    host: String,
    port: u16,
    features: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Build a payload literally
    let literal = payload!({
        "service": "api",
        "replicas": 3
    });
    println!("payload! literal: {}\n", literal);

    // Convert typed data via serde
    let server = Server {
        host: "0.0.0.0".to_string(),
        port: 8080,
        features: vec!["tls".to_string(), "http2".to_string()],
    };
    let value = to_value(&server)?;
    println!("Flattened struct:");
    for (key, leaf) in flatten(&value)?.iter() {
        println!("  {} = {}", key, leaf);
    }
    println!();

    // Or start from serde_json
    let json = serde_json::json!({ "limits": { "cpu": 2, "mem": "1Gi" } });
    println!("Flattened serde_json value:");
    for (key, leaf) in flatten(&Value::from(json))?.iter() {
        println!("  {} = {}", key, leaf);
    }

    Ok(())
}
