//! Error types for the treatment progress engine

use thiserror::Error;

/// Engine-level error types
///
/// The taxonomy is deliberately small. Sparse or missing data is valid input
/// (empty periods, absent profiles, zero-log weeks) and produces guard values
/// or `None` fields; the only failure mode is input that violates a
/// documented domain check.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
