//! Bridging between statically typed Rust values and dynamic [`Value`]s.
//!
//! Both traits advertise a [`TypeShape`] so callers can check compatibility
//! once, up front, instead of discovering a mismatch on every element.

use std::fmt;

use crate::types::{KeyValue, Value, ValueKind};

/// Static description of which runtime kinds a typed slot accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeShape {
    /// Any runtime kind (the slot is `Value` itself).
    Any,
    /// Exactly one runtime kind.
    Kind(ValueKind),
}

impl TypeShape {
    pub fn accepts(self, kind: ValueKind) -> bool {
        match self {
            TypeShape::Any => true,
            TypeShape::Kind(k) => k == kind,
        }
    }
}

impl fmt::Display for TypeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeShape::Any => f.write_str("any"),
            TypeShape::Kind(k) => write!(f, "{k}"),
        }
    }
}

/// Typed extraction from a dynamic element.
pub trait FromValue: Sized {
    const SHAPE: TypeShape;

    /// Returns `None` when the element's kind is not `SHAPE`.
    fn from_value(value: Value) -> Option<Self>;
}

/// Typed injection into a dynamic element.
pub trait IntoValue {
    const SHAPE: TypeShape;

    fn into_value(self) -> Value;
}

impl FromValue for Value {
    const SHAPE: TypeShape = TypeShape::Any;

    fn from_value(value: Value) -> Option<Self> {
        Some(value)
    }
}

impl IntoValue for Value {
    const SHAPE: TypeShape = TypeShape::Any;

    fn into_value(self) -> Value {
        self
    }
}

macro_rules! impl_typed {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl FromValue for $ty {
                const SHAPE: TypeShape = TypeShape::Kind(ValueKind::$variant);

                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            }

            impl IntoValue for $ty {
                const SHAPE: TypeShape = TypeShape::Kind(ValueKind::$variant);

                fn into_value(self) -> Value {
                    Value::$variant(self)
                }
            }
        )*
    };
}

impl_typed! {
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
    String => Str,
    Vec<u8> => Bin,
}

impl FromValue for KeyValue {
    const SHAPE: TypeShape = TypeShape::Kind(ValueKind::Pair);

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Pair(kv) => Some(*kv),
            _ => None,
        }
    }
}

impl IntoValue for KeyValue {
    const SHAPE: TypeShape = TypeShape::Kind(ValueKind::Pair);

    fn into_value(self) -> Value {
        Value::Pair(Box::new(self))
    }
}
