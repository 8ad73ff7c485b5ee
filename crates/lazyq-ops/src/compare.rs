//! Comparer selection for the extrema operators.
//!
//! Like numeric dispatch, the comparer is picked from the first element and
//! applied to the whole sequence.

use std::cmp::Ordering;

use lazyq_core::types::Value;

pub type Comparer = fn(&Value, &Value) -> Ordering;

/// Select a total order for the sample's runtime type.
///
/// Numeric families compare by widened value, `Str`/`Bool`/`Bin` by their
/// natural order. `Null` and key/value pairs are not orderable.
pub fn comparer_for(sample: &Value) -> Option<Comparer> {
    let kind = sample.kind();
    let cmp: Comparer = if kind.is_signed() {
        compare_signed
    } else if kind.is_unsigned() {
        compare_unsigned
    } else if kind.is_float() {
        compare_float
    } else {
        match sample {
            Value::Str(_) => compare_str,
            Value::Bool(_) => compare_bool,
            Value::Bin(_) => compare_bin,
            _ => return None,
        }
    };
    Some(cmp)
}

// A pair outside the comparer's family compares Equal, so it never displaces
// the running best of max/min.

fn compare_signed(a: &Value, b: &Value) -> Ordering {
    match (a.as_i64(), b.as_i64()) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => Ordering::Equal,
    }
}

fn compare_unsigned(a: &Value, b: &Value) -> Ordering {
    match (a.as_u64(), b.as_u64()) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => Ordering::Equal,
    }
}

/// NaN orders above every other float and equal to itself.
fn compare_float(a: &Value, b: &Value) -> Ordering {
    let (Some(x), Some(y)) = (a.as_f64(), b.as_f64()) else {
        return Ordering::Equal;
    };
    if x.is_nan() && y.is_nan() {
        Ordering::Equal
    } else if x.is_nan() {
        Ordering::Greater
    } else if y.is_nan() {
        Ordering::Less
    } else {
        x.partial_cmp(&y).unwrap_or(Ordering::Equal)
    }
}

fn compare_str(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Str(x), Value::Str(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

fn compare_bool(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

fn compare_bin(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bin(x), Value::Bin(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazyq_core::types::KeyValue;

    #[test]
    fn numeric_families_compare_by_value() {
        let cmp = comparer_for(&Value::I8(0)).unwrap();
        assert_eq!(cmp(&Value::I8(3), &Value::I64(2)), Ordering::Greater);

        let cmp = comparer_for(&Value::U64(0)).unwrap();
        assert_eq!(cmp(&Value::U8(1), &Value::U64(1)), Ordering::Equal);
    }

    #[test]
    fn nan_sorts_last() {
        let cmp = comparer_for(&Value::F64(0.0)).unwrap();
        assert_eq!(cmp(&Value::F64(f64::NAN), &Value::F64(1e300)), Ordering::Greater);
        assert_eq!(cmp(&Value::F64(1.0), &Value::F64(f64::NAN)), Ordering::Less);
    }

    #[test]
    fn natural_orders_and_unorderable_kinds() {
        let cmp = comparer_for(&Value::Str(String::new())).unwrap();
        assert_eq!(
            cmp(&Value::Str("a".into()), &Value::Str("b".into())),
            Ordering::Less
        );
        assert!(comparer_for(&Value::Null).is_none());
        assert!(comparer_for(&Value::from(KeyValue::new(1i64, 2i64))).is_none());
    }

    #[test]
    fn foreign_family_compares_equal() {
        let cmp = comparer_for(&Value::I32(0)).unwrap();
        assert_eq!(cmp(&Value::Str("z".into()), &Value::I32(1)), Ordering::Equal);
    }
}
