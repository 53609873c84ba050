//! Conversions between [`Value`] and `serde_json::Value`.
//!
//! JSON has no `undefined`, functions, NaN or big integers, so the way back
//! is lossy in the same places `JSON.stringify` is: `Undefined` and
//! functions are dropped from objects and become `null` elsewhere,
//! non-finite numbers become `null`, and big integers that do not fit a
//! JSON integer are written as decimal strings.

use crate::value::Value;
use serde_json::{Map, Number};
use std::collections::BTreeMap;

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map_or(Value::Null, Value::Number),
            serde_json::Value::String(s) => Value::from(s),
            serde_json::Value::Array(arr) => {
                Value::Array(arr.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(obj) => {
                let map: BTreeMap<String, Value> =
                    obj.into_iter().map(|(k, v)| (k, Value::from(v))).collect();
                Value::Object(map)
            }
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(v: &Value) -> Self {
        match v {
            Value::Undefined | Value::Null | Value::Function(_) => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => number_to_json(*n),
            Value::BigInt(n) => big_int_to_json(*n),
            Value::Str(s) => serde_json::Value::String(s.to_string()),
            Value::Array(items) => {
                serde_json::Value::Array(items.iter().map(serde_json::Value::from).collect())
            }
            Value::Object(map) => {
                let obj: Map<String, serde_json::Value> = map
                    .iter()
                    .filter(|(_, v)| !matches!(v, Value::Undefined | Value::Function(_)))
                    .map(|(k, v)| (k.clone(), serde_json::Value::from(v)))
                    .collect();
                serde_json::Value::Object(obj)
            }
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(v: Value) -> Self {
        serde_json::Value::from(&v)
    }
}

// Integral values print as JSON integers rather than `42.0`.
fn number_to_json(n: f64) -> serde_json::Value {
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        return serde_json::Value::Number(Number::from(n as i64));
    }
    Number::from_f64(n).map_or(serde_json::Value::Null, serde_json::Value::Number)
}

fn big_int_to_json(n: i128) -> serde_json::Value {
    if let Ok(small) = i64::try_from(n) {
        serde_json::Value::Number(Number::from(small))
    } else if let Ok(big) = u64::try_from(n) {
        serde_json::Value::Number(Number::from(big))
    } else {
        serde_json::Value::String(n.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_documents_become_values() {
        let v = Value::from(json!({"a": [1, "x", null, true], "b": {}}));
        let Value::Object(map) = &v else {
            panic!("expected an object");
        };
        assert_eq!(
            map.get("a"),
            Some(&Value::Array(vec![
                Value::Number(1.0),
                Value::from("x"),
                Value::Null,
                Value::Bool(true),
            ]))
        );
        assert_eq!(map.get("b"), Some(&Value::object()));
    }

    #[test]
    fn json_output_drops_what_json_cannot_hold() {
        let v: Value = [
            ("keep", Value::from(1)),
            ("gone", Value::Undefined),
            ("fn", Value::accessor(|| Value::Null)),
            ("nan", Value::Number(f64::NAN)),
            ("list", Value::Array(vec![Value::Undefined, Value::from(2.5)])),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            serde_json::Value::from(&v),
            json!({"keep": 1, "nan": null, "list": [null, 2.5]})
        );
    }

    #[test]
    fn big_ints_prefer_numbers() {
        assert_eq!(serde_json::Value::from(Value::BigInt(7)), json!(7));
        assert_eq!(
            serde_json::Value::from(Value::BigInt(99_999_999_999_999_999_999)),
            json!("99999999999999999999")
        );
    }
}
