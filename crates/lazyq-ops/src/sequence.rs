//! Pull-based lazy sequence protocol and the `Query` cursor factory.
//!
//! A `LazySequence` hands out one element per `next()` call. `None` marks
//! exhaustion and must keep being returned on every later call; cursors
//! handed out by [`Query::iterate`] are wrapped in [`Fused`] so that holds
//! regardless of how the underlying source behaves.

use std::fmt;
use std::iter::FusedIterator;
use std::sync::Arc;

use lazyq_core::config::QueryConfig;
use lazyq_core::types::Value;

/// Single-pass cursor over dynamically typed elements.
pub trait LazySequence {
    fn next(&mut self) -> Option<Value>;
}

impl<S> LazySequence for Box<S>
where
    S: LazySequence + ?Sized,
{
    fn next(&mut self) -> Option<Value> {
        (**self).next()
    }
}

impl<S> LazySequence for &mut S
where
    S: LazySequence + ?Sized,
{
    fn next(&mut self) -> Option<Value> {
        (**self).next()
    }
}

/// Owned cursor produced by a `Query`.
pub type Cursor = Box<dyn LazySequence + Send>;

/// Latches exhaustion: once the inner cursor returns `None` it is never
/// polled again.
pub struct Fused<S> {
    inner: S,
    done: bool,
}

impl<S> Fused<S> {
    pub fn new(inner: S) -> Self {
        Self { inner, done: false }
    }
}

impl<S: LazySequence> LazySequence for Fused<S> {
    fn next(&mut self) -> Option<Value> {
        if self.done {
            return None;
        }
        let item = self.inner.next();
        if item.is_none() {
            self.done = true;
        }
        item
    }
}

/// Cursor that has already pulled its first element and yields it again
/// before continuing with the rest.
///
/// The rest must be fused: on an empty source it is polled a second time.
pub struct Peeked<S> {
    head: Option<Value>,
    rest: S,
}

impl<S: LazySequence> Peeked<S> {
    pub fn new(mut rest: S) -> Self {
        let head = rest.next();
        Self { head, rest }
    }

    pub fn peek(&self) -> Option<&Value> {
        self.head.as_ref()
    }
}

impl<S: LazySequence> LazySequence for Peeked<S> {
    fn next(&mut self) -> Option<Value> {
        match self.head.take() {
            Some(item) => Some(item),
            None => self.rest.next(),
        }
    }
}

/// Adapts any std iterator of values.
pub struct IterSource<I> {
    iter: I,
}

impl<I: Iterator<Item = Value>> IterSource<I> {
    pub fn new(iter: I) -> Self {
        Self { iter }
    }
}

impl<I: Iterator<Item = Value>> LazySequence for IterSource<I> {
    fn next(&mut self) -> Option<Value> {
        self.iter.next()
    }
}

/// Cursor over shared, already materialized values.
pub struct SliceCursor {
    values: Arc<[Value]>,
    index: usize,
}

impl SliceCursor {
    pub fn new(values: Arc<[Value]>) -> Self {
        Self { values, index: 0 }
    }
}

impl LazySequence for SliceCursor {
    fn next(&mut self) -> Option<Value> {
        let item = self.values.get(self.index)?.clone();
        self.index += 1;
        Some(item)
    }
}

type Factory = dyn Fn() -> Cursor + Send + Sync;

/// A replayable lazy query: every call to [`Query::iterate`] produces a new,
/// independent cursor positioned at the start.
///
/// Terminal operators (see `terminal` and `typed`) each request their own
/// cursor, so one `Query` can be drained any number of times.
#[derive(Clone)]
pub struct Query {
    iterate: Arc<Factory>,
    config: QueryConfig,
}

impl Query {
    /// Build a query from a cursor factory.
    pub fn new<F, S>(factory: F) -> Self
    where
        F: Fn() -> S + Send + Sync + 'static,
        S: LazySequence + Send + 'static,
    {
        Self {
            iterate: Arc::new(move || Box::new(Fused::new(factory())) as Cursor),
            config: QueryConfig::default(),
        }
    }

    pub fn empty() -> Self {
        Self::new(|| IterSource::new(std::iter::empty()))
    }

    pub fn from_values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Arc<[Value]> = values.into_iter().map(Into::into).collect();
        Self::new(move || SliceCursor::new(Arc::clone(&values)))
    }

    /// Lazily re-run `iterable` for every cursor instead of materializing it.
    pub fn from_iterable<I>(iterable: I) -> Self
    where
        I: IntoIterator + Clone + Send + Sync + 'static,
        I::Item: Into<Value>,
        I::IntoIter: Send + 'static,
    {
        Self::new(move || {
            IterSource::new(
                iterable
                    .clone()
                    .into_iter()
                    .map(|item| -> Value { item.into() }),
            )
        })
    }

    /// `count` consecutive `I64` values starting at `start`.
    pub fn range(start: i64, count: usize) -> Self {
        Self::new(move || {
            IterSource::new((0..count).map(move |i| Value::I64(start.wrapping_add(i as i64))))
        })
    }

    pub fn with_config(mut self, config: QueryConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// A fresh cursor at the start of the sequence.
    pub fn iterate(&self) -> Cursor {
        (self.iterate)()
    }

    /// A fresh cursor exposed as a std iterator.
    pub fn iter(&self) -> QueryIter {
        QueryIter {
            cursor: self.iterate(),
        }
    }
}

impl fmt::Debug for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<V: Into<Value>> FromIterator<V> for Query {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Query::from_values(iter)
    }
}

pub struct QueryIter {
    cursor: Cursor,
}

impl Iterator for QueryIter {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        self.cursor.next()
    }
}

impl FusedIterator for QueryIter {}
