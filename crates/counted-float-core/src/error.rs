//! Error types for counted-float-core operations

use crate::flop_type::FlopType;

/// Result type for counted-float-core operations
pub type Result<T> = std::result::Result<T, CountingError>;

/// Errors that can occur while counting or configuring weights
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CountingError {
    /// A weight mapping did not cover exactly the 15 flop types
    #[error("invalid flop weights: missing {missing:?}, unexpected {unexpected:?}")]
    InvalidWeights {
        missing: Vec<FlopType>,
        unexpected: Vec<String>,
    },

    /// A weight value was NaN, infinite or negative
    #[error("invalid weight {value} for {flop_type}")]
    InvalidWeightValue { flop_type: FlopType, value: f64 },

    /// A string did not name any flop type
    #[error("unknown flop type: {0:?}")]
    UnknownFlopType(String),

    /// The operation has no single flop category to charge
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// A counting context may only be entered once
    #[error("flop counting context has already been entered")]
    ContextAlreadyEntered,

    /// Benchmark settings that cannot produce a measurement
    #[error("invalid benchmark settings: {0}")]
    InvalidSettings(String),

    /// Built-in reference data or a results file could not be parsed
    #[error("invalid data in {source_name}: {message}")]
    InvalidData { source_name: String, message: String },
}

impl CountingError {
    pub(crate) fn invalid_data(source_name: impl Into<String>, err: impl std::fmt::Display) -> Self {
        CountingError::InvalidData {
            source_name: source_name.into(),
            message: err.to_string(),
        }
    }
}
