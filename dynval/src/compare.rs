//! Numeric comparison
//!
//! Compares two dynamically typed scalars under an operator token. The
//! type of the first operand picks the path: a float first operand compares
//! as `f64`, anything else coerces both sides to `i64`. Any coercion
//! failure, a nil operand or an unknown operator yields `false`.

use std::fmt;

use num_traits::Num;

use crate::convert::{to_f64, to_i64};
use crate::value::Value;

/// Comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

impl CompareOp {
    /// Parse a symbolic (`<=`) or mnemonic (`lte`) operator token
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "<" | "lt" => Some(CompareOp::Lt),
            "<=" | "lte" => Some(CompareOp::Le),
            ">" | "gt" => Some(CompareOp::Gt),
            ">=" | "gte" => Some(CompareOp::Ge),
            "=" | "eq" => Some(CompareOp::Eq),
            "!=" | "ne" | "neq" => Some(CompareOp::Ne),
            _ => None,
        }
    }

    /// Get the symbolic operator string
    pub fn as_str(&self) -> &'static str {
        match self {
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
            CompareOp::Eq => "=",
            CompareOp::Ne => "!=",
        }
    }

    /// Apply the operator: `first op second`
    pub fn apply<T: PartialOrd>(&self, first: T, second: T) -> bool {
        match self {
            CompareOp::Lt => first < second,
            CompareOp::Le => first <= second,
            CompareOp::Gt => first > second,
            CompareOp::Ge => first >= second,
            CompareOp::Eq => first == second,
            CompareOp::Ne => first != second,
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compare two numbers of the same type: `first op second`.
///
/// Unknown operator tokens yield `false`.
pub fn compare_values<T: Num + PartialOrd>(first: T, second: T, op: &str) -> bool {
    match CompareOp::parse(op) {
        Some(op) => op.apply(first, second),
        None => {
            #[cfg(debug_assertions)]
            crate::debug::debug_log(format_args!("[COMPARE] unknown operator {:?}", op));
            false
        }
    }
}

pub fn compare_i64(first: i64, second: i64, op: &str) -> bool {
    compare_values(first, second, op)
}

pub fn compare_f64(first: f64, second: f64, op: &str) -> bool {
    compare_values(first, second, op)
}

/// Compare two dynamic values by the given operator.
///
/// # Example
/// ```
/// use dynval::{compare, Value};
///
/// assert!(!compare(&Value::from(2), &Value::from(3), ">"));
/// assert!(compare(&Value::from(2.1), &Value::from(2), ">"));
/// assert!(compare(&Value::from("2"), &Value::from("3"), "<"));
/// ```
pub fn compare(first: &Value, second: &Value, op: &str) -> bool {
    if first.is_absent() || second.is_absent() {
        return false;
    }

    match first {
        Value::F64(a) => match to_f64(second) {
            Ok(b) => compare_f64(*a, b, op),
            Err(_err) => {
                #[cfg(debug_assertions)]
                crate::debug::debug_log(format_args!(
                    "[COMPARE] {} as f64: {}",
                    second.type_name(),
                    _err
                ));
                false
            }
        },
        Value::F32(a) => match to_f64(second) {
            Ok(b) => compare_f64(*a as f64, b, op),
            Err(_err) => {
                #[cfg(debug_assertions)]
                crate::debug::debug_log(format_args!(
                    "[COMPARE] {} as f64: {}",
                    second.type_name(),
                    _err
                ));
                false
            }
        },
        _ => match (to_i64(first), to_i64(second)) {
            (Ok(a), Ok(b)) => compare_i64(a, b, op),
            (_a, _b) => {
                #[cfg(debug_assertions)]
                crate::debug::debug_log(format_args!(
                    "[COMPARE] ({}, {}) as i64: {:?}, {:?}",
                    first.type_name(),
                    second.type_name(),
                    _a.err(),
                    _b.err()
                ));
                false
            }
        },
    }
}
