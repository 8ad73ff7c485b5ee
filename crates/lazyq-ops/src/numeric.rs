//! Numeric dispatch: choose a widening converter once, from a sample element.
//!
//! The choice is made from the first element of a sequence and applied to
//! every later element. Sequences feeding numeric operators must therefore be
//! homogeneous in family; an element outside the chosen family surfaces as
//! `Error::ElementType` rather than being re-dispatched.

use lazyq_core::error::{Error, NumericFamily, Result};
use lazyq_core::types::Value;

use crate::sequence::LazySequence;

pub type SignedConverter = fn(&Value) -> Option<i64>;
pub type UnsignedConverter = fn(&Value) -> Option<u64>;
pub type FloatConverter = fn(&Value) -> Option<f64>;

/// Converter selected for one sequence.
#[derive(Clone, Copy)]
pub enum Converter {
    Signed(SignedConverter),
    Unsigned(UnsignedConverter),
    Float(FloatConverter),
}

impl Converter {
    /// Signed and unsigned integers get their own family; every other
    /// numeric kind falls back to float widening. `None` means the sample
    /// has no widening conversion at all.
    pub fn classify(sample: &Value) -> Option<Self> {
        let kind = sample.kind();
        if kind.is_signed() {
            signed_converter(sample).map(Converter::Signed)
        } else if kind.is_unsigned() {
            unsigned_converter(sample).map(Converter::Unsigned)
        } else {
            float_converter(sample).map(Converter::Float)
        }
    }

    pub fn family(&self) -> NumericFamily {
        match self {
            Converter::Signed(_) => NumericFamily::Signed,
            Converter::Unsigned(_) => NumericFamily::Unsigned,
            Converter::Float(_) => NumericFamily::Float,
        }
    }
}

// Each converter has a fast path for the sampled width and widens any other
// member of the same family.
macro_rules! fast_path {
    ($($name:ident: $variant:ident -> $out:ty, $widen:ident;)*) => {
        $(
            fn $name(v: &Value) -> Option<$out> {
                match v {
                    Value::$variant(x) => Some(<$out>::from(*x)),
                    other => other.$widen(),
                }
            }
        )*
    };
}

fast_path! {
    signed_i8: I8 -> i64, as_i64;
    signed_i16: I16 -> i64, as_i64;
    signed_i32: I32 -> i64, as_i64;
    signed_i64: I64 -> i64, as_i64;
    unsigned_u8: U8 -> u64, as_u64;
    unsigned_u16: U16 -> u64, as_u64;
    unsigned_u32: U32 -> u64, as_u64;
    unsigned_u64: U64 -> u64, as_u64;
    float_f32: F32 -> f64, as_f64;
    float_f64: F64 -> f64, as_f64;
}

fn float_widen(v: &Value) -> Option<f64> {
    v.as_f64()
}

pub fn signed_converter(sample: &Value) -> Option<SignedConverter> {
    let conv: SignedConverter = match sample {
        Value::I8(_) => signed_i8,
        Value::I16(_) => signed_i16,
        Value::I32(_) => signed_i32,
        Value::I64(_) => signed_i64,
        _ => return None,
    };
    Some(conv)
}

pub fn unsigned_converter(sample: &Value) -> Option<UnsignedConverter> {
    let conv: UnsignedConverter = match sample {
        Value::U8(_) => unsigned_u8,
        Value::U16(_) => unsigned_u16,
        Value::U32(_) => unsigned_u32,
        Value::U64(_) => unsigned_u64,
        _ => return None,
    };
    Some(conv)
}

/// Float widening accepts every numeric kind.
pub fn float_converter(sample: &Value) -> Option<FloatConverter> {
    let conv: FloatConverter = match sample {
        Value::F32(_) => float_f32,
        Value::F64(_) => float_f64,
        other if other.kind().is_numeric() => float_widen,
        _ => return None,
    };
    Some(conv)
}

/// Fold `first` and the rest of the cursor through `convert`/`add`.
///
/// Returns the accumulated value and the element count. Integer callers pass
/// wrapping adds; overflow is the caller's concern.
pub(crate) fn fold_family<S, T>(
    operator: &'static str,
    family: NumericFamily,
    convert: fn(&Value) -> Option<T>,
    add: fn(T, T) -> T,
    first: &Value,
    rest: &mut S,
) -> Result<(T, usize)>
where
    S: LazySequence + ?Sized,
{
    let element = |v: &Value| {
        convert(v).ok_or(Error::ElementType {
            operator,
            expected: family,
            found: v.kind(),
        })
    };

    let mut acc = element(first)?;
    let mut n = 1usize;
    while let Some(item) = rest.next() {
        acc = add(acc, element(&item)?);
        n += 1;
    }
    Ok((acc, n))
}
