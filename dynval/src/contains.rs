//! Container membership checks

use crate::equal::is_equal;
use crate::error::{ConvError, ConvResult};
use crate::value::Value;

/// Check if `container` contains `elem`.
///
/// Returns `(valid, found)`: `valid` is false when the container kind does
/// not support membership testing.
///
/// - string (or custom value with a text form): `elem` rendered with
///   `Display` is a substring
/// - map: some key equals `elem` (values are not inspected)
/// - array, slice, bytes: some element equals `elem`
///
/// # Example
/// ```
/// use dynval::{check_contains, Value};
///
/// assert_eq!(check_contains(&Value::from("hello world"), &Value::from("wor")), (true, true));
/// assert_eq!(check_contains(&Value::from(42), &Value::from("x")), (false, false));
/// ```
pub fn check_contains(container: &Value, elem: &Value) -> (bool, bool) {
    match container {
        Value::Str(s) => (true, s.contains(&elem.to_string())),
        Value::Custom(c) => match c.as_text() {
            Some(text) => (true, text.contains(&elem.to_string())),
            None => (false, false),
        },
        Value::Map(entries) => (
            true,
            entries.iter().flatten().any(|(k, _)| is_equal(k, elem)),
        ),
        Value::Array(items) => (true, items.iter().any(|v| is_equal(v, elem))),
        Value::Slice(items) => (true, items.iter().flatten().any(|v| is_equal(v, elem))),
        Value::Bytes(bytes) => (
            true,
            bytes
                .iter()
                .flatten()
                .any(|b| is_equal(&Value::U8(*b), elem)),
        ),
        _ => (false, false),
    }
}

/// Flatten an array, slice or byte sequence into its elements
pub fn any_to_slice(value: &Value) -> ConvResult<Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items.clone()),
        Value::Slice(items) => Ok(items.clone().unwrap_or_default()),
        Value::Bytes(bytes) => Ok(bytes.iter().flatten().map(|b| Value::U8(*b)).collect()),
        _ => Err(ConvError::NotSequence),
    }
}

/// Check if the value is in the list
pub fn in_list<T: PartialEq>(value: &T, list: &[T]) -> bool {
    list.iter().any(|elem| elem == value)
}

/// Check if every one of `values` is in `list`
pub fn contains_all<T: PartialEq>(list: &[T], values: &[T]) -> bool {
    values.iter().all(|v| in_list(v, list))
}

/// Check if the string contains every one of `subs`
pub fn str_contains_all<S: AsRef<str>>(s: &str, subs: &[S]) -> bool {
    subs.iter().all(|sub| s.contains(sub.as_ref()))
}
