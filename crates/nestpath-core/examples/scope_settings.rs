//! Read and write settings buried in a JSON scope document.
//!
//! Usage: cargo run -p nestpath-core --example scope_settings -- scope.json

use nestpath_core::{Value, get_from_or, set_on};
use std::env;
use std::fs;
use std::process;

fn main() {
    let scope = match env::args().nth(1) {
        Some(path) => {
            let src = fs::read_to_string(&path).unwrap_or_else(|e| {
                eprintln!("read {}: {}", path, e);
                process::exit(1);
            });
            let doc: serde_json::Value = serde_json::from_str(&src).unwrap_or_else(|e| {
                eprintln!("parse {}: {}", path, e);
                process::exit(1);
            });
            Value::from(doc)
        }
        None => Value::Undefined,
    };

    let bin_count = get_from_or(&scope, "model.readSettings.binCount", &Value::from(50))
        .unwrap_or_else(|e| {
            eprintln!("binCount: {e}");
            process::exit(1);
        });
    println!("binCount: {bin_count}");

    let mut scope = if scope.is_container() { scope } else { Value::object() };
    if set_on(&mut scope, "model.readSettings.binCount", Value::from(500)).is_none() {
        eprintln!("could not store binCount");
        process::exit(1);
    }
    match serde_json::to_string_pretty(&serde_json::Value::from(&scope)) {
        Ok(text) => println!("updated: {text}"),
        Err(e) => {
            eprintln!("render: {e}");
            process::exit(1);
        }
    }
}
