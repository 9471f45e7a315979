//! Error types for counted-float-bench operations

use counted_float_core::CountingError;
use counted_float_tracing::performance::TimerError;

/// Result type for counted-float-bench operations
pub type Result<T> = std::result::Result<T, BenchError>;

/// Errors that can occur while running benchmarks
#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    /// Invalid settings, empty statistics or malformed results
    #[error(transparent)]
    Counting(#[from] CountingError),

    /// Run timing failed
    #[error("timing error: {0}")]
    Timer(#[from] TimerError),

    /// A benchmark produced no runs to summarize
    #[error("benchmark {0:?} has no measured runs")]
    NoMeasuredRuns(String),
}
