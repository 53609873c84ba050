use crate::coerce::{TypeConversionError, coerce};
use crate::path::{Step, ToPath};
use crate::value::Value;
use std::borrow::Cow;
use tracing::{debug, trace};

/// Reads the value at `path`, or `Undefined` when the path cannot be walked.
///
/// ```
/// use nestpath_core::{Value, get_from};
/// use serde_json::json;
///
/// let scope = Value::from(json!({"model": {"readSettings": {"binCount": 100}}}));
/// assert_eq!(get_from(&scope, "model.readSettings.binCount"), Value::from(100));
/// assert_eq!(get_from(&scope, "model.writeSettings.binCount"), Value::Undefined);
/// ```
pub fn get_from(context: &Value, path: impl ToPath) -> Value {
    resolve(context, &path).unwrap_or_default()
}

/// Reads the value at `path`, falling back to `default`.
///
/// A resolved value is coerced to the kind of `default`; the fallback itself
/// is returned as given. An `Undefined` default behaves like [`get_from`].
/// The only error is a failed big-integer coercion of a resolved value.
pub fn get_from_or(
    context: &Value,
    path: impl ToPath,
    default: &Value,
) -> Result<Value, TypeConversionError> {
    match resolve(context, &path) {
        Some(found) if default.is_undefined() => Ok(found),
        Some(found) => coerce(&found, default),
        None => Ok(default.clone()),
    }
}

/// True when [`get_from`] would yield something other than `Undefined`.
pub fn exists_on(context: &Value, path: impl ToPath) -> bool {
    resolve(context, &path).is_some()
}

/// Walks `path` from `context`. `None` covers every soft failure, including
/// a nullish final value, so a `Some` is never `Null` or `Undefined`.
fn resolve(context: &Value, path: &impl ToPath) -> Option<Value> {
    let Some(path) = path.to_path() else {
        trace!("path is neither a string nor a step sequence");
        return None;
    };

    let mut steps = path.steps();
    let mut current: Cow<'_, Value> = Cow::Borrowed(context);

    // Falsy-but-defined values (0, "", false, NaN) keep the walk going.
    while !current.is_nullish() {
        let Some(step) = steps.next() else {
            break;
        };
        current = match step {
            Step::Member(name) => {
                let next = match current {
                    Cow::Borrowed(v) => v.member(name),
                    Cow::Owned(ref v) => Cow::Owned(v.member(name).into_owned()),
                };
                if next.is_undefined() {
                    trace!(step = name, "member is undefined");
                    return None;
                }
                next
            }
            Step::Invoke(name) => Cow::Owned(invoke(&current, name)?),
            Step::Hole => {
                trace!("hole in step sequence");
                return None;
            }
        };
    }

    if steps.next().is_some() {
        trace!(path_len = path.len(), "walk stopped on a nullish value");
        return None;
    }
    if current.is_nullish() {
        return None;
    }
    Some(current.into_owned())
}

fn invoke(receiver: &Value, name: &str) -> Option<Value> {
    let member = receiver.member(name);
    if !member.is_truthy() {
        trace!(step = name, "no member to invoke");
        return None;
    }
    match &*member {
        Value::Function(accessor) => Some(accessor.call()),
        other => {
            debug!(step = name, kind = %other.kind(), "member is not invocable");
            None
        }
    }
}
