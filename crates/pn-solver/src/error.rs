//! Error types for solver operations.

use thiserror::Error;

/// Errors that can occur inside the nonlinear iteration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Convergence failed: {what}")]
    ConvergenceFailed { what: String },

    #[error("Numeric error: {what}")]
    Numeric { what: String },
}

pub type SolverResult<T> = Result<T, SolverError>;
