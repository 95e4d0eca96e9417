//! Numeric coercion
//!
//! Converts an arbitrary [`Value`] into a canonical `i64` or `f64`.
//! The literal absent value coerces to zero on both paths.
//!
//! The two paths treat fractional input differently: a float value is cast
//! to `i64` with truncation, while a numeric string that fails integer
//! parsing is parsed as a float and rounded to the nearest integer.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ConvError, ConvResult};
use crate::value::Value;

// int or float, optional sign, ASCII digits only
#[allow(clippy::expect_used)]
static NUMERIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-+]?[0-9]*\.?[0-9]+$").expect("numeric pattern is valid"));

/// Check if the string is an integer or decimal number
pub fn is_numeric_str(s: &str) -> bool {
    NUMERIC_RE.is_match(s)
}

/// Integer tick count (nanoseconds) of a duration, saturating at `i64::MAX`
pub(crate) fn duration_ticks(d: &std::time::Duration) -> i64 {
    i64::try_from(d.as_nanos()).unwrap_or(i64::MAX)
}

fn parse_i64(s: &str) -> ConvResult<i64> {
    let s = s.trim();
    match s.parse::<i64>() {
        Ok(v) => Ok(v),
        Err(_) if is_numeric_str(s) => s
            .parse::<f64>()
            .map(|f| f.round() as i64)
            .map_err(|_| ConvError::Type),
        Err(_) => Err(ConvError::Type),
    }
}

/// Convert a Value to i64
pub fn to_i64(value: &Value) -> ConvResult<i64> {
    match value {
        Value::Nil => Ok(0),
        Value::Str(s) => parse_i64(s),
        Value::I8(v) => Ok(*v as i64),
        Value::I16(v) => Ok(*v as i64),
        Value::I32(v) => Ok(*v as i64),
        Value::I64(v) => Ok(*v),
        Value::U8(v) => Ok(*v as i64),
        Value::U16(v) => Ok(*v as i64),
        Value::U32(v) => Ok(*v as i64),
        Value::U64(v) => Ok(*v as i64),
        Value::F32(v) => Ok(*v as i64),
        Value::F64(v) => Ok(*v as i64),
        Value::Duration(d) => Ok(duration_ticks(d)),
        Value::Ptr(Some(inner)) => match inner.as_ref() {
            Value::I64(v) => Ok(*v),
            _ => Err(ConvError::Type),
        },
        Value::Custom(c) => c.as_int64().unwrap_or(Err(ConvError::Type)),
        _ => Err(ConvError::Type),
    }
}

/// Convert a Value to f64
pub fn to_f64(value: &Value) -> ConvResult<f64> {
    match value {
        Value::Nil => Ok(0.0),
        Value::Str(s) => s.trim().parse::<f64>().map_err(|_| ConvError::Type),
        Value::I8(v) => Ok(*v as f64),
        Value::I16(v) => Ok(*v as f64),
        Value::I32(v) => Ok(*v as f64),
        Value::I64(v) => Ok(*v as f64),
        Value::U8(v) => Ok(*v as f64),
        Value::U16(v) => Ok(*v as f64),
        Value::U32(v) => Ok(*v as f64),
        Value::U64(v) => Ok(*v as f64),
        Value::F32(v) => Ok(*v as f64),
        Value::F64(v) => Ok(*v),
        Value::Duration(d) => Ok(duration_ticks(d) as f64),
        Value::Ptr(Some(inner)) => match inner.as_ref() {
            Value::F64(v) => Ok(*v),
            _ => Err(ConvError::Type),
        },
        Value::Custom(c) => c.as_float64().unwrap_or(Err(ConvError::Type)),
        _ => Err(ConvError::Type),
    }
}
