//! Convenient re-exports for downstream crates.

pub use crate::config::QueryConfig;
pub use crate::convert::{FromValue, IntoValue, TypeShape};
pub use crate::error::{Error, NumericFamily, Result};
pub use crate::types::{KeyValue, Value, ValueKind};
