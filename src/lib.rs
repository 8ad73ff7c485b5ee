#![forbid(unsafe_code)]
//! lazyq: a pull-based lazy query engine core.
//!
//! Build a [`Query`] from any replayable source and drive it with one of the
//! terminal operators (`count`, `sum_ints`, `to_slice`, `all_t`, ...). Every
//! operator starts a fresh cursor, so the same query can be consumed many
//! times.
//!
//! ```
//! use lazyq::Query;
//!
//! let q = Query::range(1, 4);
//! assert_eq!(q.sum_ints().unwrap(), 10);
//! assert_eq!(q.count_with_t(|x: i64| x > 2).unwrap(), 2);
//! ```

/// Channel types accepted by `Query::to_channel`.
pub use crossbeam_channel as channel;

pub use lazyq_core::{config, convert, error, types};
pub use lazyq_ops::{compare, generic, materialize, numeric, sequence};

pub use lazyq_core::config::QueryConfig;
pub use lazyq_core::error::{Error, NumericFamily, Result};
pub use lazyq_core::types::{KeyValue, Value, ValueKind};
pub use lazyq_ops::{
    Callable, Cursor, GenericFunc, LazySequence, MapSink, ParamValidator, Query, SliceSink, Slot,
};

pub mod prelude {
    pub use lazyq_core::prelude::*;
    pub use lazyq_ops::{Callable, LazySequence, MapSink, Query, SliceSink};
}
