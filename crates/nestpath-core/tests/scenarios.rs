//! End-to-end reads and writes over the public API.

use nestpath_core::{Value, exists_on, get_from, get_from_or, set_on};
use serde_json::json;

fn abc() -> Value {
    Value::from(json!({"a": {"b": {"c": 42}}}))
}

#[test]
fn reads_existing_leaf() {
    assert_eq!(get_from(&abc(), "a.b.c"), Value::from(42));
}

#[test]
fn missing_leaf_returns_fallback() {
    let fallback = Value::from("fallback");
    assert_eq!(get_from_or(&abc(), "a.b.x", &fallback).unwrap(), fallback);
}

#[test]
fn string_default_coerces_result() {
    assert_eq!(get_from_or(&abc(), "a.b.c", &Value::from("")).unwrap(), Value::from("42"));
}

#[test]
fn writes_materialize_whole_path() {
    let mut root = Value::object();
    assert_eq!(set_on(&mut root, "x.y.z", Value::from(7)), Some(&Value::from(7)));
    assert_eq!(root, Value::from(json!({"x": {"y": {"z": 7}}})));
}

#[test]
fn primitive_root_rejects_writes() {
    let mut root = Value::from(json!({"a": 1}));
    root = get_from(&root, "a");
    assert_eq!(set_on(&mut root, "b.c", Value::from(5)), None);
    assert_eq!(root, Value::from(1));
}

#[test]
fn accessor_steps_are_invoked() {
    let obj: Value = [(
        "getItem",
        Value::accessor(|| Value::from(json!({"value": 9}))),
    )]
    .into_iter()
    .collect();
    assert_eq!(get_from(&obj, "getItem().value"), Value::from(9));
    let def = Value::from("def");
    assert_eq!(get_from_or(&obj, "notAFunction().value", &def).unwrap(), def);
}

#[test]
fn get_from_agrees_with_exists_on() {
    let doc = Value::from(json!({
        "a": {"b": [0, "", false, null], "c": {"d": 1}},
        "e": null
    }));
    let paths = [
        "a", "a.b", "a.b.0", "a.b.1", "a.b.2", "a.b.3", "a.b.9", "a.c.d", "a.c.x", "e", "e.f", "z",
    ];
    for path in paths {
        let found = get_from(&doc, path);
        assert_eq!(exists_on(&doc, path), !found.is_undefined(), "{path}");
        assert_ne!(found, Value::Null, "{path} must never resolve to null");
    }
}

#[test]
fn failed_traversal_returns_default_uncoerced() {
    let doc = abc();
    let defaults = [
        Value::from(0),
        Value::from("s"),
        Value::Bool(true),
        Value::BigInt(3),
        Value::object(),
    ];
    for default in defaults {
        for path in ["a.x", "a.b.c.d", "q"] {
            assert_eq!(get_from_or(&doc, path, &default).unwrap(), default, "{path}");
        }
        assert_eq!(get_from_or(&doc, Value::Bool(true), &default).unwrap(), default);
    }
}

#[test]
fn fresh_paths_round_trip() {
    let mut o = Value::from(json!({"other": 1}));
    for (path, v) in [
        ("p.q", Value::from("x")),
        ("r.s.t.u", Value::from(json!([1, {"k": null}]))),
        ("w", Value::Bool(false)),
    ] {
        assert_eq!(set_on(&mut o, path, v.clone()), Some(&v));
        assert_eq!(get_from(&o, path), v);
    }
}

#[test]
fn sequence_path_is_not_consumed() {
    let doc = abc();
    let steps = vec!["a", "b", "c"];
    assert_eq!(get_from(&doc, &steps), Value::from(42));
    assert_eq!(get_from(&doc, &steps), Value::from(42));
    assert_eq!(steps.len(), 3);
}
