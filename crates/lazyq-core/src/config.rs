//! Per-query configuration that callers can serialize/deserialize.
//!
//! A config travels with the `Query` it was attached to; nothing here is
//! process-wide.

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Initial capacity of the vector allocated by `results()`.
    pub results_capacity_hint: usize,

    /// Emit a warning each time a typed operator variant binds a callable.
    /// The typed path is strictly slower than the untyped one.
    pub warn_on_typed_callbacks: bool,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            results_capacity_hint: 0,
            warn_on_typed_callbacks: false,
        }
    }
}

impl QueryConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `LAZYQ_RESULTS_CAPACITY_HINT`: initial `results()` capacity
    /// - `LAZYQ_WARN_TYPED_CALLBACKS`: `true`/`false`
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("LAZYQ_RESULTS_CAPACITY_HINT") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.results_capacity_hint = v;
            }
        }

        if let Ok(s) = std::env::var("LAZYQ_WARN_TYPED_CALLBACKS") {
            if let Ok(v) = s.parse::<bool>() {
                cfg.warn_on_typed_callbacks = v;
            }
        }

        cfg
    }

    /// Parse a JSON document; absent fields keep their defaults.
    pub fn from_json(doc: &str) -> Result<Self> {
        Ok(serde_json::from_str(doc)?)
    }
}
