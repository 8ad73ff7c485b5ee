use thiserror::Error;

use crate::convert::TypeShape;
use crate::types::ValueKind;

/// Canonical result for the engine.
pub type Result<T> = std::result::Result<T, Error>;

/// Numeric family an operator selected from the first element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericFamily {
    Signed,
    Unsigned,
    Float,
}

impl std::fmt::Display for NumericFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            NumericFamily::Signed => "signed integer",
            NumericFamily::Unsigned => "unsigned integer",
            NumericFamily::Float => "floating point",
        })
    }
}

#[derive(Debug, Error)]
pub enum Error {
    /// A typed callable does not fit the shape its operator requires.
    #[error("{operator}: invalid {param}: {reason}")]
    CallbackShape {
        operator: &'static str,
        param: &'static str,
        reason: String,
    },

    /// The first element has no conversion into the operator's numeric family.
    #[error("{operator}: unsupported element type {kind}")]
    UnsupportedType {
        operator: &'static str,
        kind: ValueKind,
    },

    /// An element outside the family chosen from the first element.
    #[error("{operator}: expected {expected} element, found {found}")]
    ElementType {
        operator: &'static str,
        expected: NumericFamily,
        found: ValueKind,
    },

    #[error("{operator}: element is not a key/value pair (found {found})")]
    NotKeyValue {
        operator: &'static str,
        found: ValueKind,
    },

    /// Element not assignable to the destination container's element type.
    #[error("{operator}: cannot assign {found} to {expected}")]
    Conversion {
        operator: &'static str,
        expected: TypeShape,
        found: ValueKind,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config(e.to_string())
    }
}
