//! Terminal operators: drive a query's cursor to a scalar, a collection, or
//! a channel.
//!
//! Every operator requests its own cursor from the `Query` and drops it on
//! return; short-circuiting operators stop pulling as soon as the answer is
//! known. "No data" is reported through sentinels (`None`, `NaN`, `false`,
//! `0`, an untouched container), never through errors.

use std::cmp::Ordering;

use crossbeam_channel::Sender;

use lazyq_core::error::{Error, NumericFamily, Result};
use lazyq_core::types::{KeyValue, Value};

use crate::compare::comparer_for;
use crate::materialize::{write_to_map, write_to_slice, MapSink, SliceSink};
use crate::numeric::{
    float_converter, fold_family, signed_converter, unsigned_converter, Converter,
};
use crate::sequence::{LazySequence, Query};
use crate::trace;

// Cursor-level cores, shared with the typed variants.

pub(crate) fn all_in<S, P>(cursor: &mut S, mut predicate: P) -> bool
where
    S: LazySequence + ?Sized,
    P: FnMut(&Value) -> bool,
{
    while let Some(item) = cursor.next() {
        if !predicate(&item) {
            return false;
        }
    }
    true
}

pub(crate) fn any_with_in<S, P>(cursor: &mut S, mut predicate: P) -> bool
where
    S: LazySequence + ?Sized,
    P: FnMut(&Value) -> bool,
{
    while let Some(item) = cursor.next() {
        if predicate(&item) {
            return true;
        }
    }
    false
}

pub(crate) fn count_with_in<S, P>(cursor: &mut S, mut predicate: P) -> usize
where
    S: LazySequence + ?Sized,
    P: FnMut(&Value) -> bool,
{
    let mut n = 0;
    while let Some(item) = cursor.next() {
        if predicate(&item) {
            n += 1;
        }
    }
    n
}

pub(crate) fn first_with_in<S, P>(cursor: &mut S, mut predicate: P) -> Option<Value>
where
    S: LazySequence + ?Sized,
    P: FnMut(&Value) -> bool,
{
    while let Some(item) = cursor.next() {
        if predicate(&item) {
            return Some(item);
        }
    }
    None
}

pub(crate) fn last_with_in<S, P>(cursor: &mut S, mut predicate: P) -> Option<Value>
where
    S: LazySequence + ?Sized,
    P: FnMut(&Value) -> bool,
{
    let mut last = None;
    while let Some(item) = cursor.next() {
        if predicate(&item) {
            last = Some(item);
        }
    }
    last
}

/// Stops at the second match: the answer is already "ambiguous".
pub(crate) fn single_with_in<S, P>(cursor: &mut S, mut predicate: P) -> Option<Value>
where
    S: LazySequence + ?Sized,
    P: FnMut(&Value) -> bool,
{
    let mut found = None;
    while let Some(item) = cursor.next() {
        if predicate(&item) {
            if found.is_some() {
                return None;
            }
            found = Some(item);
        }
    }
    found
}

pub(crate) fn to_map_by_in<M, S, K, V>(
    dest: &mut M,
    cursor: &mut S,
    mut key_selector: K,
    mut value_selector: V,
) -> Result<()>
where
    M: MapSink + ?Sized,
    S: LazySequence + ?Sized,
    K: FnMut(&Value) -> Value,
    V: FnMut(&Value) -> Value,
{
    write_to_map(
        "to_map_by",
        dest,
        cursor,
        |item| Ok(key_selector(item)),
        |item| Ok(value_selector(item)),
    )?;
    Ok(())
}

fn pair_of(item: &Value) -> Result<&KeyValue> {
    item.as_pair().ok_or(Error::NotKeyValue {
        operator: "to_map",
        found: item.kind(),
    })
}

impl Query {
    /// True if every element satisfies `predicate`; true for an empty query.
    pub fn all<P>(&self, predicate: P) -> bool
    where
        P: FnMut(&Value) -> bool,
    {
        all_in(&mut self.iterate(), predicate)
    }

    /// True if the query has at least one element. Pulls at most one.
    pub fn any(&self) -> bool {
        self.iterate().next().is_some()
    }

    pub fn any_with<P>(&self, predicate: P) -> bool
    where
        P: FnMut(&Value) -> bool,
    {
        any_with_in(&mut self.iterate(), predicate)
    }

    /// Arithmetic mean. `NaN` for an empty query.
    ///
    /// Integer families are summed in their widest representation (wrapping)
    /// and divided as `f64`; every other numeric kind is summed as `f64`.
    pub fn average(&self) -> Result<f64> {
        const OP: &str = "average";
        let mut cursor = self.iterate();
        let Some(first) = cursor.next() else {
            return Ok(f64::NAN);
        };
        let conv = Converter::classify(&first).ok_or(Error::UnsupportedType {
            operator: OP,
            kind: first.kind(),
        })?;
        let family = conv.family();

        let (sum, n) = match conv {
            Converter::Signed(c) => {
                let (s, n) = fold_family(OP, family, c, i64::wrapping_add, &first, &mut cursor)?;
                (s as f64, n)
            }
            Converter::Unsigned(c) => {
                let (s, n) = fold_family(OP, family, c, u64::wrapping_add, &first, &mut cursor)?;
                (s as f64, n)
            }
            Converter::Float(c) => {
                fold_family(OP, family, c, |a: f64, b: f64| a + b, &first, &mut cursor)?
            }
        };

        Ok(sum / n as f64)
    }

    /// Native equality: `I32(1)` does not match `I64(1)`.
    pub fn contains(&self, value: impl Into<Value>) -> bool {
        let value = value.into();
        any_with_in(&mut self.iterate(), |item| *item == value)
    }

    pub fn count(&self) -> usize {
        let mut cursor = self.iterate();
        let mut n = 0;
        while cursor.next().is_some() {
            n += 1;
        }
        n
    }

    pub fn count_with<P>(&self, predicate: P) -> usize
    where
        P: FnMut(&Value) -> bool,
    {
        count_with_in(&mut self.iterate(), predicate)
    }

    pub fn first(&self) -> Option<Value> {
        self.iterate().next()
    }

    pub fn first_with<P>(&self, predicate: P) -> Option<Value>
    where
        P: FnMut(&Value) -> bool,
    {
        first_with_in(&mut self.iterate(), predicate)
    }

    pub fn last(&self) -> Option<Value> {
        last_with_in(&mut self.iterate(), |_| true)
    }

    pub fn last_with<P>(&self, predicate: P) -> Option<Value>
    where
        P: FnMut(&Value) -> bool,
    {
        last_with_in(&mut self.iterate(), predicate)
    }

    /// Largest element; the first of equal maxima wins.
    ///
    /// `None` for an empty query. A single element is returned as-is; with
    /// two or more, `None` when the first has no order (`Null`, key/value
    /// pairs).
    pub fn max(&self) -> Option<Value> {
        self.extremum(Ordering::Greater)
    }

    /// Smallest element; the first of equal minima wins.
    pub fn min(&self) -> Option<Value> {
        self.extremum(Ordering::Less)
    }

    fn extremum(&self, replace_when: Ordering) -> Option<Value> {
        let mut cursor = self.iterate();
        let mut best = cursor.next()?;
        let Some(second) = cursor.next() else {
            return Some(best);
        };
        let compare = comparer_for(&best)?;
        let mut next = Some(second);
        while let Some(item) = next {
            if compare(&item, &best) == replace_when {
                best = item;
            }
            next = cursor.next();
        }
        Some(best)
    }

    /// Collect every element into a new vector.
    pub fn results(&self) -> Vec<Value> {
        let mut out = Vec::with_capacity(self.config().results_capacity_hint);
        let mut cursor = self.iterate();
        while let Some(item) = cursor.next() {
            out.push(item);
        }
        out
    }

    /// Lock-step comparison; true only if both sides end together.
    pub fn sequence_equal(&self, other: &Query) -> bool {
        let mut left = self.iterate();
        let mut right = other.iterate();
        while let Some(item) = left.next() {
            match right.next() {
                Some(theirs) if theirs == item => {}
                _ => return false,
            }
        }
        right.next().is_none()
    }

    /// The only element; `None` if the query is empty or has more than one.
    pub fn single(&self) -> Option<Value> {
        let mut cursor = self.iterate();
        let item = cursor.next()?;
        if cursor.next().is_some() {
            return None;
        }
        Some(item)
    }

    /// The only matching element; `None` if nothing or more than one matches.
    pub fn single_with<P>(&self, predicate: P) -> Option<Value>
    where
        P: FnMut(&Value) -> bool,
    {
        single_with_in(&mut self.iterate(), predicate)
    }

    /// Sum of signed integers of any width as `i64` (wrapping). `0` if empty.
    pub fn sum_ints(&self) -> Result<i64> {
        const OP: &str = "sum_ints";
        let mut cursor = self.iterate();
        let Some(first) = cursor.next() else {
            return Ok(0);
        };
        let conv = signed_converter(&first).ok_or(Error::UnsupportedType {
            operator: OP,
            kind: first.kind(),
        })?;
        let (sum, _) = fold_family(
            OP,
            NumericFamily::Signed,
            conv,
            i64::wrapping_add,
            &first,
            &mut cursor,
        )?;
        Ok(sum)
    }

    /// Sum of unsigned integers of any width as `u64` (wrapping). `0` if empty.
    pub fn sum_uints(&self) -> Result<u64> {
        const OP: &str = "sum_uints";
        let mut cursor = self.iterate();
        let Some(first) = cursor.next() else {
            return Ok(0);
        };
        let conv = unsigned_converter(&first).ok_or(Error::UnsupportedType {
            operator: OP,
            kind: first.kind(),
        })?;
        let (sum, _) = fold_family(
            OP,
            NumericFamily::Unsigned,
            conv,
            u64::wrapping_add,
            &first,
            &mut cursor,
        )?;
        Ok(sum)
    }

    /// Sum of any numeric kind widened to `f64`. `0.0` if empty.
    pub fn sum_floats(&self) -> Result<f64> {
        const OP: &str = "sum_floats";
        let mut cursor = self.iterate();
        let Some(first) = cursor.next() else {
            return Ok(0.0);
        };
        let conv = float_converter(&first).ok_or(Error::UnsupportedType {
            operator: OP,
            kind: first.kind(),
        })?;
        let (sum, _) = fold_family(
            OP,
            NumericFamily::Float,
            conv,
            |a: f64, b: f64| a + b,
            &first,
            &mut cursor,
        )?;
        Ok(sum)
    }

    /// Send every element, then drop `sender`. Dropping the last sender is
    /// what closes the channel, so this closes it exactly once, after the
    /// last element, including when the query is empty.
    ///
    /// Sending blocks on a full bounded channel; drain it from another
    /// thread. If every receiver is gone the operator stops pulling.
    /// Returns the number of values delivered.
    pub fn to_channel(&self, sender: Sender<Value>) -> usize {
        let mut cursor = self.iterate();
        let mut sent = 0;
        let mut disconnected = false;
        while let Some(item) = cursor.next() {
            if sender.send(item).is_err() {
                disconnected = true;
                break;
            }
            sent += 1;
        }
        drop(sender);
        trace::channel_closed(sent, disconnected);
        sent
    }

    /// Insert every `KeyValue` element into `dest` without clearing it.
    /// Fails with `Error::NotKeyValue` on any other element shape.
    pub fn to_map<M>(&self, dest: &mut M) -> Result<()>
    where
        M: MapSink + ?Sized,
    {
        write_to_map(
            "to_map",
            dest,
            &mut self.iterate(),
            |item| pair_of(item).map(|kv| kv.key.clone()),
            |item| pair_of(item).map(|kv| kv.value.clone()),
        )?;
        Ok(())
    }

    /// Insert `key_selector(e) -> value_selector(e)` for every element,
    /// without clearing `dest`; duplicate keys keep the last value.
    pub fn to_map_by<M, K, V>(&self, dest: &mut M, key_selector: K, value_selector: V) -> Result<()>
    where
        M: MapSink + ?Sized,
        K: FnMut(&Value) -> Value,
        V: FnMut(&Value) -> Value,
    {
        to_map_by_in(dest, &mut self.iterate(), key_selector, value_selector)
    }

    /// Overwrite `dest` from index 0, growing it by doubling when needed,
    /// and trim it to exactly the number of elements.
    pub fn to_slice<S>(&self, dest: &mut S) -> Result<()>
    where
        S: SliceSink + ?Sized,
    {
        write_to_slice("to_slice", dest, &mut self.iterate())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vacuous_truth_and_short_circuit() {
        assert!(Query::empty().all(|_| false));
        assert!(!Query::from_values([1i64, 2]).all(|v| v.as_i64() == Some(1)));
        assert!(!Query::empty().any());
        assert!(Query::from_values([0u8]).any());
    }

    #[test]
    fn average_policy() {
        assert!(Query::empty().average().unwrap().is_nan());
        assert_eq!(Query::from_values([2i64, 4]).average().unwrap(), 3.0);
        assert_eq!(Query::from_values([1u8, 2]).average().unwrap(), 1.5);
        assert_eq!(Query::from_values([1.5f32, 2.5]).average().unwrap(), 2.0);
        assert!(matches!(
            Query::from_values(["a"]).average(),
            Err(Error::UnsupportedType {
                operator: "average",
                ..
            })
        ));
    }

    #[test]
    fn extrema_first_wins_ties() {
        let q = Query::from_values([
            Value::I64(3),
            Value::I32(3),
            Value::I64(1),
            Value::I16(1),
        ]);
        assert_eq!(q.max(), Some(Value::I64(3)));
        assert_eq!(q.min(), Some(Value::I64(1)));
        assert_eq!(Query::from_values([Value::Null]).max(), Some(Value::Null));
        assert_eq!(Query::from_values([Value::Null, Value::Null]).max(), None);
    }

    #[test]
    fn single_with_is_ambiguous_on_second_match() {
        let q = Query::from_values([1i64, 2, 3, 4]);
        assert_eq!(q.single_with(|v| v.as_i64() == Some(3)), Some(Value::I64(3)));
        assert_eq!(q.single_with(|v| v.as_i64().unwrap_or(0) > 2), None);
        assert_eq!(q.single_with(|_| false), None);
    }

    #[test]
    fn to_map_rejects_non_pairs() {
        let mut dest = std::collections::HashMap::<i64, i64>::new();
        let err = Query::from_values([1i64]).to_map(&mut dest).unwrap_err();
        assert!(matches!(err, Error::NotKeyValue { operator: "to_map", .. }));
    }
}
