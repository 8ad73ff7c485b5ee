#![forbid(unsafe_code)]
//! lazyq-ops: the lazy sequence protocol and the operators that consume it.
//!
//! - `sequence`: `LazySequence` cursors and the replayable `Query`
//! - `numeric`: per-family converters picked from a sample element
//! - `compare`: comparers for the extrema operators
//! - `generic`: validation and invocation of typed callbacks
//! - `terminal`: untyped terminal operators on `Query`
//! - `typed`: the `*_t` typed-callback variants
//! - `materialize`: slice and map destinations

pub mod compare;
pub mod generic;
pub mod materialize;
pub mod numeric;
pub mod sequence;
pub mod terminal;
pub mod typed;

mod trace;

pub use compare::{comparer_for, Comparer};
pub use generic::{Callable, GenericFunc, ParamValidator, Signature, Slot};
pub use materialize::{grown_capacity, write_to_map, write_to_slice, MapSink, SliceSink};
pub use numeric::{float_converter, signed_converter, unsigned_converter, Converter};
pub use sequence::{Cursor, Fused, IterSource, LazySequence, Peeked, Query, QueryIter, SliceCursor};
