//! Core error type.

use thiserror::Error;

/// Errors produced by `hs-core` primitives.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid time step {0}: must be finite and non-negative")]
    InvalidTimeStep(f64),

    #[error("{what} count {count} exceeds the 32-bit id space")]
    IdOverflow { what: &'static str, count: usize },
}

/// Shorthand result type for `hs-core`.
pub type CoreResult<T> = Result<T, CoreError>;
