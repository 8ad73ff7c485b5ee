#![forbid(unsafe_code)]
//! lazyq-core: dynamic element values, typed conversions, errors, and config.
//!
//! Pure data only. No threads, no I/O, no process-wide state.

pub mod config;
pub mod convert;
pub mod error;
pub mod prelude;
pub mod types;

pub use error::{Error, Result};
