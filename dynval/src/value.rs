//! Dynamic value model
//!
//! `Value` is the closed set of runtime shapes the inspection, equality and
//! coercion operations understand. Every operation re-derives the value's
//! [`Kind`] on each call; the kind is never stored alongside the payload.

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use num_traits::Float;

use crate::error::{ConvError, ConvResult};

/// Runtime shape classification of a [`Value`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// The literal absent value
    Nil,
    Bool,
    /// Signed integers of any width, including durations
    Int,
    /// Unsigned integers of any width
    Uint,
    Float,
    String,
    /// Fixed-length sequence, never nil
    Array,
    /// Growable sequence (including byte sequences), may be nil
    Slice,
    Map,
    Ptr,
    Func,
    Chan,
    /// Structs and opaque custom values
    Struct,
}

impl Kind {
    /// Get the kind name
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Nil => "nil",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Uint => "uint",
            Kind::Float => "float",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Slice => "slice",
            Kind::Map => "map",
            Kind::Ptr => "ptr",
            Kind::Func => "func",
            Kind::Chan => "chan",
            Kind::Struct => "struct",
        }
    }

    /// Check if values of this kind can hold a nil payload
    pub fn is_nilable(&self) -> bool {
        matches!(
            self,
            Kind::Slice | Kind::Map | Kind::Ptr | Kind::Func | Kind::Chan
        )
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability interface for values defined outside this crate
///
/// Implementors opt into numeric coercion by overriding [`as_int64`] and
/// [`as_float64`]; returning `None` means the capability is absent.
///
/// [`as_int64`]: CustomValue::as_int64
/// [`as_float64`]: CustomValue::as_float64
pub trait CustomValue: fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Name of the concrete type
    fn type_name(&self) -> &str;

    fn as_any(&self) -> &dyn Any;

    /// Structural equality against another custom value
    fn eq_value(&self, other: &dyn CustomValue) -> bool;

    /// Whether this is the zero value of its type
    fn is_zero(&self) -> bool {
        false
    }

    fn as_int64(&self) -> Option<ConvResult<i64>> {
        None
    }

    fn as_float64(&self) -> Option<ConvResult<f64>> {
        None
    }

    /// Text form for values that behave as strings.
    ///
    /// When present, the value has kind [`Kind::String`] and its length,
    /// emptiness and substring checks use this text.
    fn as_text(&self) -> Option<String> {
        None
    }
}

impl CustomValue for serde_json::Number {
    fn type_name(&self) -> &str {
        "Number"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_value(&self, other: &dyn CustomValue) -> bool {
        other
            .as_any()
            .downcast_ref::<serde_json::Number>()
            .is_some_and(|n| n == self)
    }

    fn as_int64(&self) -> Option<ConvResult<i64>> {
        Some(self.as_i64().ok_or(ConvError::Type))
    }

    fn as_float64(&self) -> Option<ConvResult<f64>> {
        Some(self.as_f64().ok_or(ConvError::Type))
    }

    fn as_text(&self) -> Option<String> {
        Some(self.to_string())
    }
}

/// Shared function value
#[derive(Clone)]
pub struct Callable(Arc<dyn Fn(&[Value]) -> Value + Send + Sync>);

impl Callable {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Callable(Arc::new(f))
    }

    pub fn call(&self, args: &[Value]) -> Value {
        (self.0)(args)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callable(..)")
    }
}

/// Snapshot of a buffered channel
///
/// Channels compare by identity, so they are always shared through an `Arc`.
#[derive(Debug, Default)]
pub struct Channel {
    capacity: usize,
    queued: Vec<Value>,
}

impl Channel {
    /// Create an empty channel with the given buffer capacity
    pub fn new(capacity: usize) -> Self {
        Channel {
            capacity,
            queued: Vec::new(),
        }
    }

    /// Create a channel holding already-queued elements
    pub fn with_queued(capacity: usize, queued: Vec<Value>) -> Self {
        Channel {
            capacity: capacity.max(queued.len()),
            queued,
        }
    }

    /// Number of queued elements
    pub fn len(&self) -> usize {
        self.queued.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queued.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Dynamically typed runtime value
///
/// Nil-able variants wrap their payload in an `Option`; `None` is the
/// present-but-nil state, distinct from [`Value::Nil`] which is the
/// literal absent value.
#[derive(Debug, Clone)]
pub enum Value {
    /// Literal absent value
    Nil,

    // ========== Scalars ==========
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    /// Time interval; its integer tick count is the nanosecond total
    Duration(Duration),
    Str(String),

    // ========== Containers ==========
    /// Byte sequence
    Bytes(Option<Vec<u8>>),
    /// Fixed-length array
    Array(Vec<Value>),
    /// Slice-like sequence
    Slice(Option<Vec<Value>>),
    /// Map as an insertion-ordered list of entries
    Map(Option<Vec<(Value, Value)>>),

    // ========== References ==========
    Ptr(Option<Box<Value>>),
    Func(Option<Callable>),
    Chan(Option<Arc<Channel>>),

    // ========== Struct-like ==========
    Struct {
        /// Type name
        type_name: String,
        /// Named field values in declaration order
        fields: Vec<(String, Value)>,
    },
    Custom(Arc<dyn CustomValue>),
}

static NIL: Value = Value::Nil;

impl Value {
    /// Derive the runtime kind of this value
    pub fn kind(&self) -> Kind {
        match self {
            Value::Nil => Kind::Nil,
            Value::Bool(_) => Kind::Bool,
            Value::I8(_) | Value::I16(_) | Value::I32(_) | Value::I64(_) | Value::Duration(_) => {
                Kind::Int
            }
            Value::U8(_) | Value::U16(_) | Value::U32(_) | Value::U64(_) => Kind::Uint,
            Value::F32(_) | Value::F64(_) => Kind::Float,
            Value::Str(_) => Kind::String,
            Value::Bytes(_) | Value::Slice(_) => Kind::Slice,
            Value::Array(_) => Kind::Array,
            Value::Map(_) => Kind::Map,
            Value::Ptr(_) => Kind::Ptr,
            Value::Func(_) => Kind::Func,
            Value::Chan(_) => Kind::Chan,
            Value::Custom(c) if c.as_text().is_some() => Kind::String,
            Value::Struct { .. } | Value::Custom(_) => Kind::Struct,
        }
    }

    /// Get the concrete type name of this value
    pub fn type_name(&self) -> &str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::I8(_) => "i8",
            Value::I16(_) => "i16",
            Value::I32(_) => "i32",
            Value::I64(_) => "i64",
            Value::U8(_) => "u8",
            Value::U16(_) => "u16",
            Value::U32(_) => "u32",
            Value::U64(_) => "u64",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            Value::Duration(_) => "Duration",
            Value::Str(_) => "String",
            Value::Bytes(_) => "Bytes",
            Value::Array(_) => "Array",
            Value::Slice(_) => "Slice",
            Value::Map(_) => "Map",
            Value::Ptr(_) => "Ptr",
            Value::Func(_) => "Func",
            Value::Chan(_) => "Chan",
            Value::Struct { type_name, .. } => type_name,
            Value::Custom(c) => c.type_name(),
        }
    }

    /// Check if this is the literal absent value
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Follow one level of pointer indirection.
    ///
    /// A nil pointer yields [`Value::Nil`]; non-pointers yield themselves.
    pub fn indirect(&self) -> &Value {
        match self {
            Value::Ptr(Some(inner)) => inner.as_ref(),
            Value::Ptr(None) => &NIL,
            other => other,
        }
    }

    /// Try to extract as string reference
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    // ========== Constructors ==========

    pub fn slice<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        Value::Slice(Some(items.into_iter().map(Into::into).collect()))
    }

    pub fn array<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }

    /// Build a map. A repeated key keeps its first position and its last value.
    pub fn map<K: Into<Value>, V: Into<Value>>(entries: impl IntoIterator<Item = (K, V)>) -> Self {
        let mut out: Vec<(Value, Value)> = Vec::new();
        for (k, v) in entries {
            let (k, v) = (k.into(), v.into());
            match out.iter_mut().find(|(seen, _)| crate::equal::is_equal(seen, &k)) {
                Some(slot) => slot.1 = v,
                None => out.push((k, v)),
            }
        }
        Value::Map(Some(out))
    }

    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        Value::Bytes(Some(data.into()))
    }

    pub fn ptr(target: impl Into<Value>) -> Self {
        Value::Ptr(Some(Box::new(target.into())))
    }

    pub fn func<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Value::Func(Some(Callable::new(f)))
    }

    pub fn chan(channel: Channel) -> Self {
        Value::Chan(Some(Arc::new(channel)))
    }

    pub fn structure<N, V>(type_name: impl Into<String>, fields: impl IntoIterator<Item = (N, V)>) -> Self
    where
        N: Into<String>,
        V: Into<Value>,
    {
        Value::Struct {
            type_name: type_name.into(),
            fields: fields
                .into_iter()
                .map(|(n, v)| (n.into(), v.into()))
                .collect(),
        }
    }

    pub fn custom(value: impl CustomValue) -> Self {
        Value::Custom(Arc::new(value))
    }

    pub fn nil_slice() -> Self {
        Value::Slice(None)
    }

    pub fn nil_map() -> Self {
        Value::Map(None)
    }

    pub fn nil_bytes() -> Self {
        Value::Bytes(None)
    }

    pub fn nil_ptr() -> Self {
        Value::Ptr(None)
    }

    pub fn nil_func() -> Self {
        Value::Func(None)
    }

    pub fn nil_chan() -> Self {
        Value::Chan(None)
    }
}

// ========== From implementations ==========

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from_scalar! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    Duration => Duration,
    String => Str,
}

impl From<isize> for Value {
    fn from(v: isize) -> Self {
        Value::I64(v as i64)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::U64(v as u64)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::slice(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Nil, Into::into)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Nil
    }
}

impl From<serde_json::Number> for Value {
    fn from(n: serde_json::Number) -> Self {
        Value::custom(n)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Nil,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::custom(n),
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => Value::slice(items),
            serde_json::Value::Object(obj) => Value::map(obj),
        }
    }
}

// ========== Display implementation ==========

/// Render a float in its shortest round-trip form.
///
/// Exponent notation (`1e+21`, `1e-07`) is used when the decimal exponent
/// is below -4 or at least 21. Infinities render as `+Inf` / `-Inf`.
pub(crate) fn format_float<T>(v: T) -> String
where
    T: Float + fmt::Display + fmt::LowerExp,
{
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        let inf = if v.is_sign_negative() { "-Inf" } else { "+Inf" };
        return inf.to_string();
    }

    let sci = format!("{:e}", v);
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    if (-4..21).contains(&exp) {
        return v.to_string();
    }
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{}e{}{:02}", mantissa, sign, exp.unsigned_abs())
}

fn write_seq<'a>(f: &mut fmt::Formatter<'_>, items: impl Iterator<Item = &'a Value>) -> fmt::Result {
    write!(f, "[")?;
    for (i, v) in items.enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", v)?;
    }
    write!(f, "]")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "<nil>"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::I8(v) => write!(f, "{}", v),
            Value::I16(v) => write!(f, "{}", v),
            Value::I32(v) => write!(f, "{}", v),
            Value::I64(v) => write!(f, "{}", v),
            Value::U8(v) => write!(f, "{}", v),
            Value::U16(v) => write!(f, "{}", v),
            Value::U32(v) => write!(f, "{}", v),
            Value::U64(v) => write!(f, "{}", v),
            Value::F32(v) => f.write_str(&format_float(*v)),
            Value::F64(v) => f.write_str(&format_float(*v)),
            Value::Duration(d) => write!(f, "{:?}", d),
            Value::Str(s) => f.write_str(s),
            Value::Bytes(bytes) => {
                write!(f, "[")?;
                for (i, b) in bytes.iter().flatten().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", b)?;
                }
                write!(f, "]")
            }
            Value::Array(items) => write_seq(f, items.iter()),
            Value::Slice(items) => write_seq(f, items.iter().flatten()),
            Value::Map(entries) => {
                write!(f, "map[")?;
                for (i, (k, v)) in entries.iter().flatten().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}:{}", k, v)?;
                }
                write!(f, "]")
            }
            Value::Ptr(Some(inner)) => write!(f, "&{}", inner),
            Value::Func(Some(_)) => write!(f, "<func>"),
            Value::Chan(Some(_)) => write!(f, "<chan>"),
            Value::Ptr(None) | Value::Func(None) | Value::Chan(None) => write!(f, "<nil>"),
            Value::Struct { type_name, fields } => {
                write!(f, "{}{{", type_name)?;
                for (i, (_, field)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", field)?;
                }
                write!(f, "}}")
            }
            Value::Custom(c) => write!(f, "{}", c),
        }
    }
}

// ========== PartialEq implementation ==========

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        crate::equal::is_equal(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_from_primitives() {
        assert!(matches!(Value::from(42i64), Value::I64(42)));
        assert!(matches!(Value::from(7u8), Value::U8(7)));
        assert!(matches!(Value::from(3.125f64), Value::F64(_)));
        assert!(matches!(Value::from(true), Value::Bool(true)));
        assert!(matches!(Value::from("hello"), Value::Str(_)));
        assert!(matches!(Value::from(None::<i32>), Value::Nil));
        assert!(matches!(Value::from(vec![1, 2]), Value::Slice(Some(_))));
    }

    #[test]
    fn test_value_kind() {
        assert_eq!(Value::Nil.kind(), Kind::Nil);
        assert_eq!(Value::I8(1).kind(), Kind::Int);
        assert_eq!(Value::Duration(Duration::from_secs(1)).kind(), Kind::Int);
        assert_eq!(Value::U64(1).kind(), Kind::Uint);
        assert_eq!(Value::F32(1.0).kind(), Kind::Float);
        assert_eq!(Value::bytes("ab").kind(), Kind::Slice);
        assert_eq!(Value::array([1, 2]).kind(), Kind::Array);
        assert_eq!(Value::nil_map().kind(), Kind::Map);
        assert_eq!(Value::nil_chan().kind(), Kind::Chan);
        assert_eq!(Value::custom(serde_json::Number::from(1)).kind(), Kind::String);
        assert_eq!(Value::structure("T", [("a", 1)]).kind(), Kind::Struct);
    }

    #[test]
    fn test_kind_nilable() {
        assert!(Kind::Slice.is_nilable());
        assert!(Kind::Func.is_nilable());
        assert!(!Kind::Array.is_nilable());
        assert!(!Kind::Struct.is_nilable());
    }

    #[test]
    fn test_indirect() {
        let p = Value::ptr(5i64);
        assert!(matches!(p.indirect(), Value::I64(5)));
        assert!(Value::nil_ptr().indirect().is_absent());
        assert!(matches!(Value::I32(1).indirect(), Value::I32(1)));
    }

    #[test]
    fn test_value_display() {
        assert_eq!(format!("{}", Value::I64(42)), "42");
        assert_eq!(format!("{}", Value::F64(3.5)), "3.5");
        assert_eq!(format!("{}", Value::F64(3.0)), "3");
        assert_eq!(format!("{}", Value::F32(0.1)), "0.1");
        assert_eq!(format!("{}", Value::from("hi")), "hi");
        assert_eq!(format!("{}", Value::Nil), "<nil>");
        assert_eq!(format!("{}", Value::slice([1, 2, 3])), "[1 2 3]");
        assert_eq!(format!("{}", Value::bytes("hi")), "[104 105]");
        assert_eq!(format!("{}", Value::map([("a", 1)])), "map[a:1]");
        assert_eq!(format!("{}", Value::ptr(1)), "&1");
        assert_eq!(
            format!("{}", Value::structure("Point", [("x", 1), ("y", 2)])),
            "Point{1 2}"
        );
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(1e21), "1e+21");
        assert_eq!(format_float(1e20), "100000000000000000000");
        assert_eq!(format_float(1e-7), "1e-07");
        assert_eq!(format_float(0.0001), "0.0001");
        assert_eq!(format_float(-2.5e-5), "-2.5e-05");
        assert_eq!(format_float(1e100), "1e+100");
        assert_eq!(format_float(f64::MAX), "1.7976931348623157e+308");
        assert_eq!(format_float(f64::INFINITY), "+Inf");
        assert_eq!(format_float(f64::NEG_INFINITY), "-Inf");
        assert_eq!(format_float(f64::NAN), "NaN");
        assert_eq!(format_float(0.0), "0");
        assert_eq!(format_float(1e21f32), "1e+21");
    }

    #[test]
    fn test_map_repeated_key_keeps_last_value() {
        let m = Value::map([("a", 1), ("b", 2), ("a", 3)]);
        assert_eq!(format!("{}", m), "map[a:3 b:2]");
        assert!(matches!(m, Value::Map(Some(ref e)) if e.len() == 2));
    }

    #[test]
    fn test_from_json() {
        let v = Value::from(serde_json::json!({"a": [1, "x", null], "b": true}));
        assert_eq!(v.kind(), Kind::Map);
        assert_eq!(format!("{}", v), "map[a:[1 x <nil>] b:true]");
    }

    #[test]
    fn test_callable_call() {
        let f = Callable::new(|args| Value::from(args.len()));
        assert!(matches!(f.call(&[Value::Nil, Value::Nil]), Value::U64(2)));
    }
}
