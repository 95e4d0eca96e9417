//! Value inspection: nil, empty and length checks

use crate::convert::duration_ticks;
use crate::value::{format_float, Value};

/// Check if the value is nil.
///
/// True for the literal absent value and for nil-able kinds (slice, map,
/// pointer, function, channel) holding a nil payload. Scalars, arrays and
/// structs are never nil, whatever their zero-ness.
pub fn is_nil(value: &Value) -> bool {
    match value {
        Value::Nil => true,
        Value::Bytes(b) => b.is_none(),
        Value::Slice(s) => s.is_none(),
        Value::Map(m) => m.is_none(),
        Value::Ptr(p) => p.is_none(),
        Value::Func(f) => f.is_none(),
        Value::Chan(c) => c.is_none(),
        _ => false,
    }
}

/// Check if the value is empty.
///
/// Strings and containers are empty when they hold no elements (or a nil
/// payload), booleans when false, numbers when zero and references when
/// nil. Structs and custom values are empty when they equal the zero value
/// of their own type.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Nil => true,
        Value::Str(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Bytes(b) => b.as_ref().map_or(true, Vec::is_empty),
        Value::Slice(s) => s.as_ref().map_or(true, Vec::is_empty),
        Value::Map(m) => m.as_ref().map_or(true, Vec::is_empty),
        Value::Bool(b) => !b,
        Value::Ptr(p) => p.is_none(),
        Value::Func(f) => f.is_none(),
        Value::Custom(c) => c.as_text().map_or_else(|| c.is_zero(), |t| t.is_empty()),
        other => is_zero_value(other),
    }
}

/// Check if the value structurally equals the zero value of its type.
pub fn is_zero_value(value: &Value) -> bool {
    match value {
        Value::Nil => true,
        Value::Bool(b) => !b,
        Value::I8(v) => *v == 0,
        Value::I16(v) => *v == 0,
        Value::I32(v) => *v == 0,
        Value::I64(v) => *v == 0,
        Value::U8(v) => *v == 0,
        Value::U16(v) => *v == 0,
        Value::U32(v) => *v == 0,
        Value::U64(v) => *v == 0,
        Value::F32(v) => *v == 0.0,
        Value::F64(v) => *v == 0.0,
        Value::Duration(d) => d.is_zero(),
        Value::Str(s) => s.is_empty(),
        // the zero value of an array holds zero elements, not no elements
        Value::Array(items) => items.iter().all(is_zero_value),
        Value::Bytes(b) => b.is_none(),
        Value::Slice(s) => s.is_none(),
        Value::Map(m) => m.is_none(),
        Value::Ptr(p) => p.is_none(),
        Value::Func(f) => f.is_none(),
        Value::Chan(c) => c.is_none(),
        Value::Struct { fields, .. } => fields.iter().all(|(_, v)| is_zero_value(v)),
        Value::Custom(c) => c.is_zero(),
    }
}

/// Check if the value is a (non-absent) function value
pub fn is_func(value: &Value) -> bool {
    matches!(value, Value::Func(_))
}

/// Get the length of a value.
///
/// - strings: number of chars
/// - map, array, slice, channel: number of elements
/// - integers: number of chars in the base-10 rendering, sign included
/// - floats: number of chars in the default rendering (`1e+21` is 5)
/// - custom values with a text form: number of chars of that text
///
/// One level of pointer indirection is followed. Returns `-1` when the
/// value has no defined length.
pub fn length(value: &Value) -> i64 {
    let len = match value.indirect() {
        Value::Str(s) => s.chars().count(),
        Value::Bytes(b) => b.as_ref().map_or(0, Vec::len),
        Value::Array(items) => items.len(),
        Value::Slice(s) => s.as_ref().map_or(0, Vec::len),
        Value::Map(m) => m.as_ref().map_or(0, Vec::len),
        Value::Chan(c) => c.as_ref().map_or(0, |c| c.len()),
        Value::I8(v) => v.to_string().len(),
        Value::I16(v) => v.to_string().len(),
        Value::I32(v) => v.to_string().len(),
        Value::I64(v) => v.to_string().len(),
        Value::Duration(d) => duration_ticks(d).to_string().len(),
        Value::U8(v) => v.to_string().len(),
        Value::U16(v) => v.to_string().len(),
        Value::U32(v) => v.to_string().len(),
        Value::U64(v) => v.to_string().len(),
        Value::F32(v) => format_float(*v).len(),
        Value::F64(v) => format_float(*v).len(),
        Value::Custom(c) => match c.as_text() {
            Some(text) => text.chars().count(),
            None => return -1,
        },
        _ => return -1,
    };
    i64::try_from(len).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Channel;
    use std::time::Duration;

    #[test]
    fn test_is_nil() {
        assert!(is_nil(&Value::Nil));
        assert!(is_nil(&Value::nil_slice()));
        assert!(is_nil(&Value::nil_bytes()));
        assert!(is_nil(&Value::nil_map()));
        assert!(is_nil(&Value::nil_ptr()));
        assert!(is_nil(&Value::nil_func()));
        assert!(is_nil(&Value::nil_chan()));

        assert!(!is_nil(&Value::from(0)));
        assert!(!is_nil(&Value::from("")));
        assert!(!is_nil(&Value::slice(Vec::<i32>::new())));
        assert!(!is_nil(&Value::array(Vec::<i32>::new())));
        assert!(!is_nil(&Value::structure("T", Vec::<(&str, i32)>::new())));
    }

    #[test]
    fn test_is_empty() {
        assert!(is_empty(&Value::Nil));
        assert!(is_empty(&Value::from("")));
        assert!(is_empty(&Value::from(0u16)));
        assert!(is_empty(&Value::from(0.0)));
        assert!(is_empty(&Value::from(false)));
        assert!(is_empty(&Value::slice(Vec::<i32>::new())));
        assert!(is_empty(&Value::nil_slice()));
        assert!(is_empty(&Value::map(Vec::<(i32, i32)>::new())));
        assert!(is_empty(&Value::nil_ptr()));
        assert!(is_empty(&Value::Duration(Duration::ZERO)));

        assert!(!is_empty(&Value::from(" ")));
        assert!(!is_empty(&Value::from(-1)));
        assert!(!is_empty(&Value::from(true)));
        assert!(!is_empty(&Value::ptr(0)));
        assert!(!is_empty(&Value::slice([0])));
    }

    #[test]
    fn test_is_empty_struct_fallback() {
        let zero = Value::structure("P", [("x", Value::from(0)), ("s", Value::from(""))]);
        let set = Value::structure("P", [("x", Value::from(1)), ("s", Value::from(""))]);
        assert!(is_empty(&zero));
        assert!(!is_empty(&set));

        assert!(is_empty(&Value::nil_chan()));
        assert!(!is_empty(&Value::chan(Channel::new(1))));
    }

    #[test]
    fn test_is_func() {
        assert!(is_func(&Value::func(|_| Value::Nil)));
        assert!(is_func(&Value::nil_func()));
        assert!(!is_func(&Value::Nil));
    }

    #[test]
    fn test_length() {
        assert_eq!(length(&Value::from("héllo")), 5);
        assert_eq!(length(&Value::from(12345)), 5);
        assert_eq!(length(&Value::from(-12)), 3);
        assert_eq!(length(&Value::from(3.5)), 3);
        assert_eq!(length(&Value::from(u64::MAX)), 20);
        assert_eq!(length(&Value::slice([1, 2])), 2);
        assert_eq!(length(&Value::nil_slice()), 0);
        assert_eq!(length(&Value::map([("a", 1)])), 1);
        assert_eq!(length(&Value::bytes("abc")), 3);
        assert_eq!(
            length(&Value::chan(Channel::with_queued(4, vec![Value::from(1)]))),
            1
        );
        assert_eq!(length(&Value::ptr("abc")), 3);
        assert_eq!(length(&Value::Duration(Duration::from_nanos(1500))), 4);
    }

    #[test]
    fn test_length_float_rendering() {
        assert_eq!(length(&Value::from(1e21)), 5);
        assert_eq!(length(&Value::from(1e20)), 21);
        assert_eq!(length(&Value::from(1e-7)), 5);
        assert_eq!(length(&Value::from(f64::MAX)), 23);
        assert_eq!(length(&Value::from(f64::NEG_INFINITY)), 4);
        assert_eq!(length(&Value::from(f64::NAN)), 3);
    }

    #[test]
    fn test_length_repeated_map_keys() {
        assert_eq!(length(&Value::map([("a", 1), ("a", 2)])), 1);
    }

    #[test]
    fn test_json_number_text() {
        let n: serde_json::Number = serde_json::from_str("-3.25").unwrap();
        assert_eq!(length(&Value::from(n)), 5);
        assert_eq!(length(&Value::from(serde_json::Number::from(0))), 1);
        assert!(!is_empty(&Value::from(serde_json::Number::from(0))));
    }

    #[test]
    fn test_length_undefined() {
        assert_eq!(length(&Value::Nil), -1);
        assert_eq!(length(&Value::nil_ptr()), -1);
        assert_eq!(length(&Value::from(true)), -1);
        assert_eq!(length(&Value::nil_func()), -1);
        assert_eq!(length(&Value::structure("T", [("a", 1)])), -1);
    }
}
