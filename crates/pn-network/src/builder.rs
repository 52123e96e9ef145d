//! Incremental network builder.

use pn_components::PipeSegment;
use pn_core::units::{m, mm};

use crate::error::{NetworkError, NetworkResult};
use crate::network::{Branch, Network};

/// Builder for editing a network incrementally.
///
/// Holds the mutable segment and branch lists a front end edits between
/// evaluations. Call `build()` to validate and freeze the current state into
/// an immutable `Network` snapshot.
#[derive(Debug, Default, Clone)]
pub struct NetworkBuilder {
    pre: Vec<PipeSegment>,
    branches: Vec<Branch>,
    post: Vec<PipeSegment>,
}

impl NetworkBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume editing a frozen network.
    pub fn from_network(network: Network) -> Self {
        let (pre, branches, post) = network.into_parts();
        Self {
            pre,
            branches,
            post,
        }
    }

    /// New series segment: 10 m of 100 mm pipe, 0.15 mm roughness.
    pub fn default_series_segment() -> PipeSegment {
        PipeSegment::new(m(10.0), mm(100.0), mm(0.15))
    }

    /// New branch segment: 50 m of 80 mm pipe, 0.15 mm roughness.
    pub fn default_branch_segment() -> PipeSegment {
        PipeSegment::new(m(50.0), mm(80.0), mm(0.15))
    }

    pub fn push_pre(&mut self, segment: PipeSegment) -> &mut Self {
        self.pre.push(segment);
        self
    }

    pub fn push_pre_default(&mut self) -> &mut Self {
        self.push_pre(Self::default_series_segment())
    }

    /// Remove the last pre segment. No-op when the run is empty.
    pub fn pop_pre(&mut self) -> Option<PipeSegment> {
        self.pre.pop()
    }

    pub fn push_post(&mut self, segment: PipeSegment) -> &mut Self {
        self.post.push(segment);
        self
    }

    pub fn push_post_default(&mut self) -> &mut Self {
        self.push_post(Self::default_series_segment())
    }

    /// Remove the last post segment. No-op when the run is empty.
    pub fn pop_post(&mut self) -> Option<PipeSegment> {
        self.post.pop()
    }

    /// Add a named branch seeded with one segment.
    pub fn add_branch(
        &mut self,
        name: impl Into<String>,
        first_segment: PipeSegment,
    ) -> NetworkResult<&mut Self> {
        let name = name.into();
        if self.branches.iter().any(|b| b.name() == name) {
            return Err(NetworkError::DuplicateBranch { name });
        }
        self.branches.push(Branch::new(name, vec![first_segment]));
        Ok(self)
    }

    /// Add a default branch named "Branch N"; returns the name used.
    pub fn add_branch_default(&mut self) -> String {
        let mut n = self.branches.len() + 1;
        let name = loop {
            let candidate = format!("Branch {}", n);
            if !self.branches.iter().any(|b| b.name() == candidate) {
                break candidate;
            }
            n += 1;
        };
        self.branches
            .push(Branch::new(name.clone(), vec![Self::default_branch_segment()]));
        name
    }

    pub fn push_to_branch(&mut self, name: &str, segment: PipeSegment) -> NetworkResult<&mut Self> {
        self.branch_mut(name)?.segments_mut().push(segment);
        Ok(self)
    }

    /// Remove the last segment of a branch. A branch keeps its first segment.
    pub fn pop_from_branch(&mut self, name: &str) -> NetworkResult<Option<PipeSegment>> {
        let segments = self.branch_mut(name)?.segments_mut();
        if segments.len() <= 1 {
            return Ok(None);
        }
        Ok(segments.pop())
    }

    /// Remove the most recently added branch, refusing to empty the group.
    pub fn remove_last_branch(&mut self) -> NetworkResult<Branch> {
        if self.branches.len() <= 1 {
            return Err(NetworkError::LastBranch);
        }
        self.branches.pop().ok_or(NetworkError::LastBranch)
    }

    pub fn branch_count(&self) -> usize {
        self.branches.len()
    }

    /// Validate and freeze the current state.
    pub fn build(&self) -> NetworkResult<Network> {
        Network::new(self.pre.clone(), self.branches.clone(), self.post.clone())
    }

    fn branch_mut(&mut self, name: &str) -> NetworkResult<&mut Branch> {
        self.branches
            .iter_mut()
            .find(|b| b.name() == name)
            .ok_or_else(|| NetworkError::BranchNotFound {
                name: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_branch_names_skip_taken_ones() {
        let mut builder = NetworkBuilder::new();
        builder
            .add_branch("Branch 2", NetworkBuilder::default_branch_segment())
            .unwrap();
        let name = builder.add_branch_default();
        assert_eq!(name, "Branch 3");
    }

    #[test]
    fn duplicate_branch_rejected() {
        let mut builder = NetworkBuilder::new();
        builder.add_branch_default();
        let err = builder
            .add_branch("Branch 1", NetworkBuilder::default_branch_segment())
            .unwrap_err();
        assert_eq!(err, NetworkError::DuplicateBranch { name: "Branch 1".into() });
    }

    #[test]
    fn branch_keeps_its_first_segment() {
        let mut builder = NetworkBuilder::new();
        let name = builder.add_branch_default();
        assert_eq!(builder.pop_from_branch(&name).unwrap(), None);

        builder
            .push_to_branch(&name, NetworkBuilder::default_series_segment())
            .unwrap();
        assert!(builder.pop_from_branch(&name).unwrap().is_some());
    }

    #[test]
    fn last_branch_cannot_be_removed() {
        let mut builder = NetworkBuilder::new();
        builder.add_branch_default();
        builder.add_branch_default();
        assert!(builder.remove_last_branch().is_ok());
        assert_eq!(builder.remove_last_branch(), Err(NetworkError::LastBranch));
        assert_eq!(builder.branch_count(), 1);
    }

    #[test]
    fn unknown_branch_reported() {
        let mut builder = NetworkBuilder::new();
        let err = builder
            .push_to_branch("nope", NetworkBuilder::default_branch_segment())
            .unwrap_err();
        assert!(matches!(err, NetworkError::BranchNotFound { .. }));
    }

    #[test]
    fn series_runs_pop_from_the_end() {
        let mut builder = NetworkBuilder::new();
        assert!(builder.pop_pre().is_none());
        builder.push_pre_default().push_pre(PipeSegment::new(m(3.0), mm(65.0), mm(0.1)));
        let last = builder.pop_pre().unwrap();
        assert!((last.length.value - 3.0).abs() < 1e-12);
        builder.push_post_default();
        assert!(builder.pop_post().is_some());
    }
}
