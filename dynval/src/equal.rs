//! Structural equality
//!
//! Two values are equal when they have the same concrete type and equal
//! contents, compared recursively through containers and pointers. Byte
//! sequences compare by content, but a nil byte payload only equals another
//! nil byte payload.
//!
//! Function values are equal only when both are nil; comparing non-nil
//! functions is not supported and always yields `false`.

use std::sync::Arc;

use crate::value::Value;

/// Check if two values are structurally equal.
pub fn is_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Nil, _) | (_, Value::Nil) => a.is_absent() && b.is_absent(),
        (Value::Bytes(x), Value::Bytes(y)) => match (x, y) {
            (Some(x), Some(y)) => x == y,
            (x, y) => x.is_none() && y.is_none(),
        },
        (Value::Bytes(_), _) | (_, Value::Bytes(_)) => false,
        _ => deep_equal(a, b),
    }
}

fn seq_equal(a: &[Value], b: &[Value]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| deep_equal(x, y))
}

// every entry of `a` has an equal key in `b` with an equal value
fn entries_within(a: &[(Value, Value)], b: &[(Value, Value)]) -> bool {
    a.iter().all(|(ka, va)| {
        b.iter()
            .find(|(kb, _)| deep_equal(ka, kb))
            .is_some_and(|(_, vb)| deep_equal(va, vb))
    })
}

// checked both ways, since a hand-built entry list may repeat a key
fn map_equal(a: &[(Value, Value)], b: &[(Value, Value)]) -> bool {
    a.len() == b.len() && entries_within(a, b) && entries_within(b, a)
}

fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Nil, Value::Nil) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::I8(x), Value::I8(y)) => x == y,
        (Value::I16(x), Value::I16(y)) => x == y,
        (Value::I32(x), Value::I32(y)) => x == y,
        (Value::I64(x), Value::I64(y)) => x == y,
        (Value::U8(x), Value::U8(y)) => x == y,
        (Value::U16(x), Value::U16(y)) => x == y,
        (Value::U32(x), Value::U32(y)) => x == y,
        (Value::U64(x), Value::U64(y)) => x == y,
        (Value::F32(x), Value::F32(y)) => x == y,
        (Value::F64(x), Value::F64(y)) => x == y,
        (Value::Duration(x), Value::Duration(y)) => x == y,
        (Value::Str(x), Value::Str(y)) => x == y,
        (Value::Bytes(x), Value::Bytes(y)) => x == y,
        (Value::Array(x), Value::Array(y)) => seq_equal(x, y),
        (Value::Slice(x), Value::Slice(y)) => match (x, y) {
            (Some(x), Some(y)) => seq_equal(x, y),
            (x, y) => x.is_none() && y.is_none(),
        },
        (Value::Map(x), Value::Map(y)) => match (x, y) {
            (Some(x), Some(y)) => map_equal(x, y),
            (x, y) => x.is_none() && y.is_none(),
        },
        (Value::Ptr(x), Value::Ptr(y)) => match (x, y) {
            (Some(x), Some(y)) => deep_equal(x, y),
            (x, y) => x.is_none() && y.is_none(),
        },
        (Value::Func(x), Value::Func(y)) => x.is_none() && y.is_none(),
        (Value::Chan(x), Value::Chan(y)) => match (x, y) {
            (Some(x), Some(y)) => Arc::ptr_eq(x, y),
            (x, y) => x.is_none() && y.is_none(),
        },
        (
            Value::Struct {
                type_name: n1,
                fields: f1,
            },
            Value::Struct {
                type_name: n2,
                fields: f2,
            },
        ) => {
            n1 == n2
                && f1.len() == f2.len()
                && f1
                    .iter()
                    .zip(f2)
                    .all(|((k1, v1), (k2, v2))| k1 == k2 && deep_equal(v1, v2))
        }
        (Value::Custom(x), Value::Custom(y)) => {
            x.type_name() == y.type_name() && x.eq_value(&**y)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Channel;

    #[test]
    fn test_nil_equality() {
        assert!(is_equal(&Value::Nil, &Value::Nil));
        assert!(!is_equal(&Value::Nil, &Value::from(0)));
        assert!(!is_equal(&Value::nil_slice(), &Value::Nil));
    }

    #[test]
    fn test_bytes_equality() {
        let x = Value::bytes("abc");
        assert!(is_equal(&x, &x));
        assert!(is_equal(&x, &Value::bytes(vec![b'a', b'b', b'c'])));
        assert!(!is_equal(&x, &Value::bytes("abd")));
        assert!(is_equal(&Value::nil_bytes(), &Value::nil_bytes()));
        assert!(!is_equal(&Value::nil_bytes(), &Value::bytes("")));
        assert!(!is_equal(&Value::bytes(""), &Value::nil_bytes()));
        assert!(!is_equal(&x, &Value::from("abc")));
        assert!(!is_equal(&Value::slice([97u8, 98, 99]), &x));
    }

    #[test]
    fn test_scalar_equality_requires_same_type() {
        assert!(is_equal(&Value::from(1), &Value::from(1)));
        assert!(!is_equal(&Value::from(1i32), &Value::from(1i64)));
        assert!(!is_equal(&Value::from(1), &Value::from(1.0)));
        assert!(!is_equal(&Value::from(f64::NAN), &Value::from(f64::NAN)));
        assert!(is_equal(&Value::from("a"), &Value::from("a")));
    }

    #[test]
    fn test_container_equality() {
        assert!(is_equal(&Value::slice([1, 2]), &Value::slice([1, 2])));
        assert!(!is_equal(&Value::slice([1, 2]), &Value::slice([2, 1])));
        assert!(!is_equal(&Value::slice([1, 2]), &Value::array([1, 2])));
        assert!(!is_equal(&Value::nil_slice(), &Value::slice(Vec::<i32>::new())));
        assert!(is_equal(
            &Value::map([("a", 1), ("b", 2)]),
            &Value::map([("b", 2), ("a", 1)])
        ));
        assert!(!is_equal(&Value::map([("a", 1)]), &Value::map([("a", 2)])));
        assert!(is_equal(&Value::nil_map(), &Value::nil_map()));
    }

    #[test]
    fn test_map_equality_is_symmetric() {
        let k = |s: &str| Value::from(s);
        let repeated = Value::Map(Some(vec![(k("a"), k("1")), (k("a"), k("1"))]));
        let distinct = Value::map([("a", "1"), ("b", "2")]);
        assert!(!is_equal(&repeated, &distinct));
        assert!(!is_equal(&distinct, &repeated));
        assert!(is_equal(&repeated, &repeated.clone()));
    }

    #[test]
    fn test_reference_equality() {
        assert!(is_equal(&Value::ptr(5), &Value::ptr(5)));
        assert!(!is_equal(&Value::ptr(5), &Value::ptr(6)));
        assert!(is_equal(&Value::nil_ptr(), &Value::nil_ptr()));
        assert!(is_equal(&Value::nil_func(), &Value::nil_func()));

        let ch = Value::chan(Channel::new(1));
        assert!(is_equal(&ch, &ch.clone()));
        assert!(!is_equal(&ch, &Value::chan(Channel::new(1))));
    }

    #[test]
    fn test_struct_equality() {
        let a = Value::structure("P", [("x", 1), ("y", 2)]);
        assert!(is_equal(&a, &Value::structure("P", [("x", 1), ("y", 2)])));
        assert!(!is_equal(&a, &Value::structure("Q", [("x", 1), ("y", 2)])));
        assert!(!is_equal(&a, &Value::structure("P", [("x", 1), ("y", 3)])));
    }

    #[test]
    fn test_custom_equality() {
        let n = |s: &str| Value::from(serde_json::from_str::<serde_json::Number>(s).unwrap());
        assert!(is_equal(&n("12"), &n("12")));
        assert!(!is_equal(&n("12"), &n("13")));
        assert!(!is_equal(&n("12"), &Value::from(12i64)));
    }
}
