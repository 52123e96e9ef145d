//! Error types for the pn-app service layer.

use pn_fluids::FluidError;
use pn_network::NetworkError;
use std::path::PathBuf;

/// Failures of the evaluation chain. Each variant names the stage that failed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvaluationError {
    #[error("Invalid input: {what}")]
    InvalidInput { what: String },

    #[error("Fluid lookup failed: {0}")]
    Fluid(#[from] FluidError),

    #[error("Parallel split did not converge after {iterations} iterations: {diagnostic}")]
    ParallelNotConverged {
        iterations: usize,
        diagnostic: String,
    },
}

impl EvaluationError {
    pub(crate) fn invalid(what: impl Into<String>) -> Self {
        EvaluationError::InvalidInput { what: what.into() }
    }
}

pub type EvaluationResult<T> = Result<T, EvaluationError>;

impl From<pn_core::PnError> for EvaluationError {
    fn from(err: pn_core::PnError) -> Self {
        EvaluationError::invalid(err.to_string())
    }
}

/// Application error type shared by the CLI and library callers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Case error: {0}")]
    Case(String),

    #[error("Failed to read case file: {path}")]
    CaseFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write case file: {path}")]
    CaseFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Case validation failed: {0}")]
    Validation(String),

    #[error("Case compilation failed: {0}")]
    Compile(String),

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Evaluation failed: {0}")]
    Evaluation(#[from] EvaluationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for pn-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<pn_project::ProjectError> for AppError {
    fn from(err: pn_project::ProjectError) -> Self {
        match err {
            pn_project::ProjectError::Validation(v) => AppError::Validation(v.to_string()),
            other => AppError::Case(other.to_string()),
        }
    }
}

impl From<pn_project::ValidationError> for AppError {
    fn from(err: pn_project::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<FluidError> for AppError {
    fn from(err: FluidError) -> Self {
        AppError::Evaluation(EvaluationError::Fluid(err))
    }
}
