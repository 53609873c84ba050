use crate::path::ToPath;
use crate::value::{Value, array_index};
use tracing::{debug, trace};

/// Stores `value` at `path`, creating missing intermediate objects.
///
/// Returns the stored value, or `None` when the root or a fixed
/// intermediate is not a container, the path is malformed, or the final
/// key is empty. Intermediates replaced or created before a failure stay in
/// place: the write is not transactional.
///
/// ```
/// use nestpath_core::{Value, set_on};
/// use serde_json::json;
///
/// let mut scope = Value::object();
/// let stored = set_on(&mut scope, "model.readSettings.binCount", Value::from(500));
/// assert_eq!(stored, Some(&Value::from(500)));
/// assert_eq!(scope, Value::from(json!({"model": {"readSettings": {"binCount": 500}}})));
/// ```
pub fn set_on<'v>(context: &'v mut Value, path: impl ToPath, value: Value) -> Option<&'v Value> {
    if !context.is_container() {
        debug!(kind = %context.kind(), "cannot write into a non-container root");
        return None;
    }
    let Some(normalized) = path.to_path() else {
        trace!("path is neither a string nor a step sequence");
        return None;
    };

    let mut tokens = normalized.tokens();
    let last = tokens.next_back().flatten();

    let mut cursor = context;
    for token in tokens {
        if !cursor.is_container() {
            break;
        }
        let Some(key) = token else {
            debug!("hole in step sequence, abandoning write");
            return None;
        };
        cursor = descend(cursor, key)?;
    }

    let Some(key) = last.filter(|k| !k.is_empty()) else {
        trace!("final key is missing or empty");
        return None;
    };
    assign(cursor, key, value)
}

/// Moves into `key`, replacing a nullish or missing member with `{}`.
fn descend<'v>(cursor: &'v mut Value, key: &str) -> Option<&'v mut Value> {
    let slot = match cursor {
        Value::Object(map) => map.entry(key.to_string()).or_default(),
        Value::Array(items) => slot_at(items, key)?,
        _ => return None,
    };
    if slot.is_nullish() {
        *slot = Value::object();
    }
    Some(slot)
}

fn assign<'v>(cursor: &'v mut Value, key: &str, value: Value) -> Option<&'v Value> {
    let slot = match cursor {
        Value::Object(map) => map.entry(key.to_string()).or_default(),
        Value::Array(items) => slot_at(items, key)?,
        other => {
            debug!(kind = %other.kind(), step = key, "cannot write into a non-container");
            return None;
        }
    };
    *slot = value;
    Some(slot)
}

/// Most holes a single write may add when padding an array.
pub const MAX_ARRAY_PADDING: usize = 1 << 16;

/// Element slot for an index key, padding with `Undefined` holes when the
/// index is past the end. Named keys have nowhere to live on an array, and
/// an index more than [`MAX_ARRAY_PADDING`] past the end is refused.
fn slot_at<'v>(items: &'v mut Vec<Value>, key: &str) -> Option<&'v mut Value> {
    let Some(index) = array_index(key) else {
        debug!(step = key, "arrays only take index keys");
        return None;
    };
    if index >= items.len() {
        if index - items.len() > MAX_ARRAY_PADDING {
            debug!(step = key, len = items.len(), "index too far past the end of the array");
            return None;
        }
        let new_len = index.checked_add(1)?;
        items.resize(new_len, Value::Undefined);
    }
    items.get_mut(index)
}
