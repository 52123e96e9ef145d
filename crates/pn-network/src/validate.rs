//! Structural validation for the parallel group.

use crate::error::{NetworkError, NetworkResult};
use crate::network::Branch;
use std::collections::HashSet;

pub(crate) fn validate_branches(branches: &[Branch]) -> NetworkResult<()> {
    let mut names = HashSet::new();
    for (index, branch) in branches.iter().enumerate() {
        if branch.name().trim().is_empty() {
            return Err(NetworkError::EmptyBranchName { index });
        }
        if !names.insert(branch.name()) {
            return Err(NetworkError::DuplicateBranch {
                name: branch.name().to_string(),
            });
        }
        if branch.segments().is_empty() {
            return Err(NetworkError::EmptyBranch {
                name: branch.name().to_string(),
            });
        }
    }
    Ok(())
}
