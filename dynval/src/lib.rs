//! Runtime value inspection and comparison
//!
//! This crate answers semantic questions about values whose type is only
//! known at runtime, as needed by generic assertion helpers. It includes:
//!
//! - `Value` enum and its derived `Kind`
//! - Numeric coercion to `i64` / `f64`
//! - Numeric comparison under an operator token
//! - Nil, empty and length checks
//! - Structural equality
//! - Container membership and map key checks
//!
//! Every operation is a pure function of its inputs and never panics on an
//! unsupported shape: it resolves to `false` (or `-1` for [`length`]).

pub mod compare;
pub mod contains;
pub mod convert;
mod debug;
pub mod equal;
pub mod error;
pub mod inspect;
pub mod keys;
pub mod value;

/// Prelude module for convenient imports
///
/// # Example
/// ```
/// use dynval::prelude::*;
///
/// let m = Value::map([("a", 1), ("b", 2)]);
/// assert!(has_key(&m, &Value::from("a")));
/// ```
pub mod prelude {
    pub use super::compare::{compare, compare_f64, compare_i64, compare_values, CompareOp};
    pub use super::contains::{any_to_slice, check_contains, contains_all, in_list, str_contains_all};
    pub use super::convert::{is_numeric_str, to_f64, to_i64};
    pub use super::equal::is_equal;
    pub use super::error::{ConvError, ConvResult};
    pub use super::inspect::{is_empty, is_func, is_nil, is_zero_value, length};
    pub use super::keys::{has_all_keys, has_key, has_one_key};
    pub use super::value::{Callable, Channel, CustomValue, Kind, Value};
}

pub use prelude::*;
