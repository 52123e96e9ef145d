//! Fluid lookup errors.

use thiserror::Error;

/// Result type for fluid operations.
pub type FluidResult<T> = Result<T, FluidError>;

/// Errors that can occur while resolving fluid properties.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidError {
    /// Name does not match any table entry or alias.
    #[error("Unknown fluid: {name}")]
    UnknownFluid { name: String },
}
