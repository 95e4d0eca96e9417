//! Map key checks
//!
//! Keys are matched with [`is_equal`], not identity. A pointer to a map is
//! followed one level; any other non-map input has no keys.

use crate::equal::is_equal;
use crate::value::Value;

fn map_entries(map: &Value) -> Option<&[(Value, Value)]> {
    match map.indirect() {
        Value::Map(entries) => Some(entries.as_deref().unwrap_or_default()),
        _ => None,
    }
}

fn entries_have_key(entries: &[(Value, Value)], key: &Value) -> bool {
    entries.iter().any(|(k, _)| is_equal(k, key))
}

/// Check if the map has the given key
pub fn has_key(map: &Value, key: &Value) -> bool {
    map_entries(map).is_some_and(|entries| entries_have_key(entries, key))
}

/// Check if the map has any of the given keys.
///
/// Returns the first key, in the given order, that is present.
pub fn has_one_key<'k>(map: &Value, keys: &'k [Value]) -> (bool, Option<&'k Value>) {
    let Some(entries) = map_entries(map) else {
        return (false, None);
    };

    match keys.iter().find(|key| entries_have_key(entries, key)) {
        Some(key) => (true, Some(key)),
        None => (false, None),
    }
}

/// Check if the map has all of the given keys.
///
/// Returns the first key, in the given order, that is missing.
pub fn has_all_keys<'k>(map: &Value, keys: &'k [Value]) -> (bool, Option<&'k Value>) {
    let Some(entries) = map_entries(map) else {
        return (false, None);
    };

    match keys.iter().find(|key| !entries_have_key(entries, key)) {
        Some(missing) => (false, Some(missing)),
        None => (true, None),
    }
}
