//! Error types for value coercion
//!
//! Coercion has exactly one failure mode: the value cannot be read as the
//! requested numeric type. Every other operation in this crate is total.

use thiserror::Error;

/// Conversion error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConvError {
    /// The value cannot be interpreted as the requested numeric type.
    ///
    /// Carries no detail about the offending value; callers that need a
    /// message format the value themselves.
    #[error("convert value type error")]
    Type,

    /// The value is not an array, slice or byte sequence
    #[error("the input param type is invalid")]
    NotSequence,
}

/// Result type alias for conversions
pub type ConvResult<T> = Result<T, ConvError>;
