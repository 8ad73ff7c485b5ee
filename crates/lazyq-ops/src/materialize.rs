//! Writes a dynamic element stream into caller-owned typed containers.
//!
//! Destinations are capability traits rather than concrete types so the
//! element type is checked at compile time and tests can observe growth.

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use lazyq_core::convert::FromValue;
use lazyq_core::error::{Error, Result};
use lazyq_core::types::Value;

use crate::sequence::LazySequence;
use crate::trace;

/// Growable indexed destination.
pub trait SliceSink {
    type Item: FromValue;

    fn len(&self) -> usize;
    fn capacity(&self) -> usize;
    /// Overwrite the slot at `index < len()`.
    fn set(&mut self, index: usize, item: Self::Item);
    /// Append; callers reserve first, so this never reallocates.
    fn push(&mut self, item: Self::Item);
    fn reserve_exact(&mut self, additional: usize);
    fn truncate(&mut self, len: usize);
}

impl<T: FromValue> SliceSink for Vec<T> {
    type Item = T;

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn capacity(&self) -> usize {
        Vec::capacity(self)
    }

    fn set(&mut self, index: usize, item: T) {
        self[index] = item;
    }

    fn push(&mut self, item: T) {
        Vec::push(self, item);
    }

    fn reserve_exact(&mut self, additional: usize) {
        Vec::reserve_exact(self, additional);
    }

    fn truncate(&mut self, len: usize) {
        Vec::truncate(self, len);
    }
}

/// Keyed destination. Inserting an existing key overwrites it.
pub trait MapSink {
    type Key: FromValue;
    type Mapped: FromValue;

    fn insert_entry(&mut self, key: Self::Key, value: Self::Mapped);
}

impl<K, V, S> MapSink for HashMap<K, V, S>
where
    K: FromValue + Eq + Hash,
    V: FromValue,
    S: BuildHasher,
{
    type Key = K;
    type Mapped = V;

    fn insert_entry(&mut self, key: K, value: V) {
        self.insert(key, value);
    }
}

impl<K, V> MapSink for BTreeMap<K, V>
where
    K: FromValue + Ord,
    V: FromValue,
{
    type Key = K;
    type Mapped = V;

    fn insert_entry(&mut self, key: K, value: V) {
        self.insert(key, value);
    }
}

/// Capacity needed to hold `needed` elements.
///
/// Unchanged if already sufficient; exactly `needed` when starting from
/// zero; otherwise doubled until it covers `needed`.
pub fn grown_capacity(capacity: usize, needed: usize) -> usize {
    if needed <= capacity {
        return capacity;
    }
    if capacity == 0 {
        return needed;
    }
    let mut cap = capacity;
    while cap < needed {
        cap = cap.saturating_mul(2);
    }
    cap
}

pub(crate) fn convert<T: FromValue>(operator: &'static str, value: Value) -> Result<T> {
    let found = value.kind();
    T::from_value(value).ok_or(Error::Conversion {
        operator,
        expected: T::SHAPE,
        found,
    })
}

fn grow<S: SliceSink + ?Sized>(operator: &'static str, dest: &mut S, needed: usize) {
    let cap = dest.capacity();
    let target = grown_capacity(cap, needed);
    if target > cap {
        dest.reserve_exact(target - dest.len());
        trace::slice_grown(operator, cap, target);
    }
}

/// Write `source` into `dest` from index 0, overwriting existing slots and
/// growing past the current length, then trim to the written count.
///
/// On a conversion error `dest` is trimmed to the elements written so far.
pub fn write_to_slice<S, Q>(operator: &'static str, dest: &mut S, source: &mut Q) -> Result<usize>
where
    S: SliceSink + ?Sized,
    Q: LazySequence + ?Sized,
{
    let mut index = 0;
    while let Some(item) = source.next() {
        let item = match convert::<S::Item>(operator, item) {
            Ok(item) => item,
            Err(e) => {
                dest.truncate(index);
                return Err(e);
            }
        };
        if index < dest.len() {
            dest.set(index, item);
        } else {
            grow(operator, dest, index + 1);
            dest.push(item);
        }
        index += 1;
    }
    dest.truncate(index);
    Ok(index)
}

/// Insert `key_of(item) -> value_of(item)` for every element. Existing
/// entries are kept unless overwritten by an equal key.
///
/// A selector error stops the write; entries inserted before it remain.
pub fn write_to_map<M, Q, K, V>(
    operator: &'static str,
    dest: &mut M,
    source: &mut Q,
    mut key_of: K,
    mut value_of: V,
) -> Result<usize>
where
    M: MapSink + ?Sized,
    Q: LazySequence + ?Sized,
    K: FnMut(&Value) -> Result<Value>,
    V: FnMut(&Value) -> Result<Value>,
{
    let mut written = 0;
    while let Some(item) = source.next() {
        let key = convert::<M::Key>(operator, key_of(&item)?)?;
        let value = convert::<M::Mapped>(operator, value_of(&item)?)?;
        dest.insert_entry(key, value);
        written += 1;
    }
    Ok(written)
}
