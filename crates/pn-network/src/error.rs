//! Network-specific error types.

use thiserror::Error;

pub type NetworkResult<T> = Result<T, NetworkError>;

/// Network construction and validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// Two branches share a name.
    #[error("Branch '{name}' is defined more than once")]
    DuplicateBranch { name: String },

    /// A branch name is empty or whitespace.
    #[error("Branch at position {index} has an empty name")]
    EmptyBranchName { index: usize },

    /// A branch has no segments.
    #[error("Branch '{name}' has no segments")]
    EmptyBranch { name: String },

    /// Referenced branch does not exist.
    #[error("Branch '{name}' not found")]
    BranchNotFound { name: String },

    /// Removing would leave the parallel group with no branch.
    #[error("The parallel group must keep at least one branch")]
    LastBranch,
}
