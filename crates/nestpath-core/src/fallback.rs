//! One-line fallback helpers built on truthiness and [`coerce`].

use crate::coerce::{TypeConversionError, coerce};
use crate::value::Value;

/// `v` coerced to the kind of `def` when truthy, otherwise `def`.
pub fn or_default(v: &Value, def: &Value) -> Result<Value, TypeConversionError> {
    if v.is_truthy() {
        coerce(v, def)
    } else {
        Ok(def.clone())
    }
}

/// Like [`or_default`], but only `Null` and `Undefined` fall back, so `0`,
/// `""` and `false` are kept.
pub fn defined_or_default(v: &Value, def: &Value) -> Result<Value, TypeConversionError> {
    if v.is_nullish() {
        Ok(def.clone())
    } else {
        coerce(v, def)
    }
}

pub fn or_empty_array(v: &Value) -> Value {
    match v {
        Value::Array(_) => v.clone(),
        _ => Value::Array(Vec::new()),
    }
}

pub fn or_empty_string(v: &Value) -> String {
    if v.is_truthy() {
        v.to_js_string()
    } else {
        String::new()
    }
}

/// Drops falsy values, e.g. to keep empty strings out of serialized output.
pub fn or_undefined(v: &Value) -> Value {
    if v.is_truthy() {
        v.clone()
    } else {
        Value::Undefined
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn or_default_replaces_every_falsy_value() {
        let def = Value::from("def");
        for falsy in [
            Value::Undefined,
            Value::Null,
            Value::from(0),
            Value::from(""),
            Value::Bool(false),
            Value::Number(f64::NAN),
        ] {
            assert_eq!(or_default(&falsy, &def).unwrap(), def);
        }
        assert_eq!(or_default(&Value::from(7), &def).unwrap(), Value::from("7"));
        assert_eq!(or_default(&Value::from("8"), &Value::from(0)).unwrap(), Value::from(8));
    }

    #[test]
    fn defined_or_default_keeps_falsy_but_defined_values() {
        let def = Value::from(99);
        assert_eq!(defined_or_default(&Value::from(0), &def).unwrap(), Value::from(0));
        assert_eq!(defined_or_default(&Value::from(""), &def).unwrap(), Value::from(0));
        assert_eq!(defined_or_default(&Value::Bool(false), &def).unwrap(), Value::from(0));
        assert_eq!(defined_or_default(&Value::Null, &def).unwrap(), def);
        assert_eq!(defined_or_default(&Value::Undefined, &def).unwrap(), def);
    }

    #[test]
    fn fallback_helpers_propagate_big_int_errors() {
        assert!(or_default(&Value::object(), &Value::BigInt(0)).is_err());
        assert!(defined_or_default(&Value::object(), &Value::BigInt(0)).is_err());
    }

    #[test]
    fn or_empty_array_only_keeps_arrays() {
        let list = Value::from(json!(["one", "two"]));
        assert_eq!(or_empty_array(&list), list);
        assert_eq!(or_empty_array(&Value::from("one")), Value::Array(vec![]));
        assert_eq!(or_empty_array(&Value::object()), Value::Array(vec![]));
        assert_eq!(or_empty_array(&Value::Undefined), Value::Array(vec![]));
    }

    #[test]
    fn or_empty_string_stringifies_truthy_values() {
        assert_eq!(or_empty_string(&Value::from(42)), "42");
        assert_eq!(or_empty_string(&Value::object()), "[object Object]");
        assert_eq!(or_empty_string(&Value::from(0)), "");
        assert_eq!(or_empty_string(&Value::Null), "");
    }

    #[test]
    fn or_undefined_drops_falsy_values() {
        assert_eq!(or_undefined(&Value::from("")), Value::Undefined);
        assert_eq!(or_undefined(&Value::from(0)), Value::Undefined);
        assert_eq!(or_undefined(&Value::from("x")), Value::from("x"));
    }
}
