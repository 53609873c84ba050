use crate::value::{Kind, Value};
use thiserror::Error;

/// Raised only when a value is widened to the big-integer kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeConversionError {
    #[error("cannot convert {kind} to a BigInt")]
    NotConvertible { kind: Kind },
    #[error("cannot convert {value} to a BigInt because it is not an integer")]
    NotAnInteger { value: String },
    #[error("cannot convert \"{text}\" to a BigInt")]
    InvalidSyntax { text: String },
    #[error("{text} is out of range for a BigInt")]
    OutOfRange { text: String },
}

// 2^127, the first magnitude an i128 cannot hold.
const I128_LIMIT: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;

/// Converts `value` to the kind of `shape`.
///
/// Values already of the shape's kind pass through untouched, as does
/// everything when the shape is an object, `Undefined`, or a function.
/// Boolean, number and string targets never fail; only a big-integer
/// target can reject its input.
pub fn coerce(value: &Value, shape: &Value) -> Result<Value, TypeConversionError> {
    let target = shape.kind();
    if value.kind() == target {
        return Ok(value.clone());
    }

    match target {
        Kind::Boolean => Ok(Value::Bool(value.is_truthy())),
        Kind::Number => Ok(Value::Number(value.to_number())),
        Kind::String => Ok(Value::from(value.to_js_string())),
        Kind::BigInt => to_big_int(value).map(Value::BigInt),
        Kind::Object | Kind::Undefined | Kind::Function => Ok(value.clone()),
    }
}

fn to_big_int(value: &Value) -> Result<i128, TypeConversionError> {
    match value {
        Value::BigInt(n) => Ok(*n),
        Value::Bool(b) => Ok(i128::from(*b)),
        Value::Number(n) => number_to_big_int(*n),
        Value::Str(s) => parse_big_int(s),
        other => Err(TypeConversionError::NotConvertible { kind: other.kind() }),
    }
}

fn number_to_big_int(n: f64) -> Result<i128, TypeConversionError> {
    if !n.is_finite() || n.fract() != 0.0 {
        return Err(TypeConversionError::NotAnInteger {
            value: Value::Number(n).to_js_string(),
        });
    }
    if n >= I128_LIMIT || n < -I128_LIMIT {
        return Err(TypeConversionError::OutOfRange {
            text: Value::Number(n).to_js_string(),
        });
    }
    Ok(n as i128)
}

fn parse_big_int(text: &str) -> Result<i128, TypeConversionError> {
    let t = text.trim();
    if t.is_empty() {
        return Ok(0);
    }
    let invalid = || TypeConversionError::InvalidSyntax {
        text: text.to_string(),
    };

    let (digits, radix) = [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)]
        .into_iter()
        .find_map(|(prefix, radix)| t.strip_prefix(prefix).map(|rest| (rest, radix)))
        .unwrap_or((t, 10));

    // Signs are only accepted on decimal literals.
    let unsigned = if radix == 10 {
        digits.strip_prefix(['+', '-']).unwrap_or(digits)
    } else {
        digits
    };
    if unsigned.is_empty() || !unsigned.chars().all(|c| c.is_digit(radix)) {
        return Err(invalid());
    }

    i128::from_str_radix(digits, radix).map_err(|_| TypeConversionError::OutOfRange {
        text: t.to_string(),
    })
}
