use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Runtime kind of a [`Value`], the analogue of `typeof`.
///
/// `Null`, arrays and objects all report [`Kind::Object`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Undefined,
    Object,
    Boolean,
    Number,
    BigInt,
    String,
    Function,
}

impl Kind {
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Undefined => "undefined",
            Kind::Object => "object",
            Kind::Boolean => "boolean",
            Kind::Number => "number",
            Kind::BigInt => "bigint",
            Kind::String => "string",
            Kind::Function => "function",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A niladic member that a path step can invoke with `name()`.
///
/// Equality is identity: two accessors are equal only when they share
/// the same closure allocation.
#[derive(Clone)]
pub struct Accessor(Rc<dyn Fn() -> Value>);

impl Accessor {
    pub fn new(f: impl Fn() -> Value + 'static) -> Self {
        Self(Rc::new(f))
    }

    #[inline]
    pub fn call(&self) -> Value {
        (self.0)()
    }
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Accessor(..)")
    }
}

impl PartialEq for Accessor {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.0), Rc::as_ptr(&other.0))
    }
}

/// Dynamically shaped value walked by the path reader and writer.
///
/// `Undefined` and `Null` are distinct: `Undefined` means "nothing here",
/// `Null` is a present-but-empty member. Arrays and objects are owned, so
/// the writer can descend through them with plain `&mut` borrows.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    BigInt(i128),
    Str(Rc<str>),
    Array(Vec<Value>),
    Object(BTreeMap<String, Value>),
    Function(Accessor),
}

impl Value {
    /// An empty object container.
    pub fn object() -> Self {
        Value::Object(BTreeMap::new())
    }

    /// Wraps a niladic closure as an invocable member.
    pub fn accessor(f: impl Fn() -> Value + 'static) -> Self {
        Value::Function(Accessor::new(f))
    }

    pub fn kind(&self) -> Kind {
        match self {
            Value::Undefined => Kind::Undefined,
            Value::Null | Value::Array(_) | Value::Object(_) => Kind::Object,
            Value::Bool(_) => Kind::Boolean,
            Value::Number(_) => Kind::Number,
            Value::BigInt(_) => Kind::BigInt,
            Value::Str(_) => Kind::String,
            Value::Function(_) => Kind::Function,
        }
    }

    #[inline]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    #[inline]
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    /// Objects and arrays: the only values the writer can store into.
    #[inline]
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Object(_))
    }

    #[inline]
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::BigInt(n) => *n != 0,
            Value::Str(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) | Value::Function(_) => true,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_ref()),
            _ => None,
        }
    }

    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Reads the member named `key`, yielding `Undefined` when there is none.
    ///
    /// Objects read their entries. Arrays and strings answer canonical
    /// decimal indices (`"0"`, `"12"`, never `"01"` or `"[0]"`) and
    /// `length`. Any non-nullish value also exposes a few niladic
    /// intrinsics (`toString`, `valueOf`, and per-kind ones such as
    /// `toUpperCase` or `toFixed`) as bound [`Accessor`]s.
    pub fn member(&self, key: &str) -> Cow<'_, Value> {
        let own = match self {
            Value::Object(map) => map.get(key).map(Cow::Borrowed),
            Value::Array(items) => match key {
                "length" => Some(Cow::Owned(Value::Number(items.len() as f64))),
                _ => array_index(key)
                    .map(|i| items.get(i).map_or(Cow::Owned(Value::Undefined), Cow::Borrowed)),
            },
            Value::Str(s) => match key {
                "length" => Some(Cow::Owned(Value::Number(s.encode_utf16().count() as f64))),
                // Indices count UTF-16 code units, like `length`. Half of a
                // surrogate pair reads as U+FFFD.
                _ => array_index(key)
                    .and_then(|i| s.encode_utf16().nth(i))
                    .map(|unit| Cow::Owned(Value::from(String::from_utf16_lossy(&[unit])))),
            },
            _ => None,
        };
        own.or_else(|| self.intrinsic(key).map(Cow::Owned))
            .unwrap_or(Cow::Owned(Value::Undefined))
    }

    fn intrinsic(&self, name: &str) -> Option<Value> {
        let method: fn(&Value) -> Value = match (self, name) {
            (Value::Undefined | Value::Null, _) => return None,
            (_, "toString") => |v: &Value| Value::from(v.to_js_string()),
            (_, "valueOf") => Value::clone,
            (Value::Str(_), "toLowerCase") => {
                |v: &Value| Value::from(v.to_js_string().to_lowercase())
            }
            (Value::Str(_), "toUpperCase") => {
                |v: &Value| Value::from(v.to_js_string().to_uppercase())
            }
            (Value::Str(_), "trim") => |v: &Value| Value::from(v.to_js_string().trim()),
            (Value::Str(_), "trimStart") => |v: &Value| Value::from(v.to_js_string().trim_start()),
            (Value::Str(_), "trimEnd") => |v: &Value| Value::from(v.to_js_string().trim_end()),
            (Value::Number(_), "toFixed") => |v: &Value| Value::from(format_fixed(v.to_number())),
            (Value::Array(_), "join") => |v: &Value| Value::from(v.to_js_string()),
            _ => return None,
        };
        let receiver = self.clone();
        Some(Value::accessor(move || method(&receiver)))
    }

    /// String conversion with `String(v)` semantics.
    pub fn to_js_string(&self) -> String {
        match self {
            Value::Undefined => "undefined".to_string(),
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => format_number(*n),
            Value::BigInt(n) => n.to_string(),
            Value::Str(s) => s.to_string(),
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    if item.is_nullish() {
                        String::new()
                    } else {
                        item.to_js_string()
                    }
                })
                .collect::<Vec<_>>()
                .join(","),
            Value::Object(_) => "[object Object]".to_string(),
            Value::Function(_) => "function () { [native code] }".to_string(),
        }
    }

    /// Numeric conversion with `Number(v)` semantics. Never fails; anything
    /// without a numeric reading becomes NaN.
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Undefined => f64::NAN,
            Value::Null => 0.0,
            Value::Bool(b) => f64::from(u8::from(*b)),
            Value::Number(n) => *n,
            Value::BigInt(n) => *n as f64,
            Value::Str(s) => parse_number(s),
            Value::Array(_) => parse_number(&self.to_js_string()),
            Value::Object(_) | Value::Function(_) => f64::NAN,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_js_string())
    }
}

/// Canonical array index: decimal digits without a leading zero.
pub(crate) fn array_index(key: &str) -> Option<usize> {
    let canonical = !key.is_empty()
        && key.bytes().all(|b| b.is_ascii_digit())
        && (key == "0" || !key.starts_with('0'));
    if canonical { key.parse().ok() } else { None }
}

pub(crate) fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    let abs = n.abs();
    if n.fract() == 0.0 && abs < 1e21 {
        return format!("{n:.0}");
    }
    if (1e-6..1e21).contains(&abs) {
        return n.to_string();
    }
    let sci = format!("{n:e}");
    match sci.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => sci,
    }
}

fn format_fixed(n: f64) -> String {
    if !n.is_finite() || n.abs() >= 1e21 {
        format_number(n)
    } else if n < 0.0 {
        // The sign survives rounding to zero: -0.4 -> "-0".
        format!("-{}", format_number((-n).round()))
    } else {
        format_number(n.round())
    }
}

fn parse_number(text: &str) -> f64 {
    let t = text.trim();
    if t.is_empty() {
        return 0.0;
    }
    match t {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = t.strip_prefix(prefix) {
            if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
                return f64::NAN;
            }
            return u128::from_str_radix(digits, radix).map_or(f64::NAN, |n| n as f64);
        }
    }
    // `f64::from_str` also takes "inf" and "nan", which `Number` rejects.
    if t.bytes().any(|b| b.is_ascii_alphabetic() && b != b'e' && b != b'E') {
        return f64::NAN;
    }
    t.parse::<f64>().unwrap_or(f64::NAN)
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

/// `i128` is the big-integer kind, not a number.
impl From<i128> for Value {
    fn from(n: i128) -> Self {
        Value::BigInt(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(Rc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(Rc::from(s))
    }
}

impl From<Rc<str>> for Value {
    fn from(s: Rc<str>) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Value::Object(map)
    }
}

impl From<Accessor> for Value {
    fn from(accessor: Accessor) -> Self {
        Value::Function(accessor)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::Array(iter.into_iter().collect())
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Value::Object(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
