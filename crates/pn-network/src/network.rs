//! Immutable network snapshot.

use crate::error::NetworkResult;
use crate::validate;
use pn_components::PipeSegment;
use std::fmt;

/// One flow path of the parallel group.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    name: String,
    segments: Vec<PipeSegment>,
}

impl Branch {
    pub fn new(name: impl Into<String>, segments: Vec<PipeSegment>) -> Self {
        Self {
            name: name.into(),
            segments,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn segments(&self) -> &[PipeSegment] {
        &self.segments
    }

    pub(crate) fn segments_mut(&mut self) -> &mut Vec<PipeSegment> {
        &mut self.segments
    }

    fn scaled(&self, factor: f64) -> Self {
        Self {
            name: self.name.clone(),
            segments: self.segments.iter().map(|s| s.scaled(factor)).collect(),
        }
    }
}

/// Where a segment sits in the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentLocation {
    Pre { index: usize },
    Branch { name: String, index: usize },
    Post { index: usize },
}

impl fmt::Display for SegmentLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentLocation::Pre { index } => write!(f, "pre segment {}", index + 1),
            SegmentLocation::Branch { name, index } => {
                write!(f, "{} segment {}", name, index + 1)
            }
            SegmentLocation::Post { index } => write!(f, "post segment {}", index + 1),
        }
    }
}

/// Series run, parallel group, series run.
///
/// Branch order is insertion order. It matters for display only; the
/// flow-split solver treats branches by identity.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Network {
    pre: Vec<PipeSegment>,
    branches: Vec<Branch>,
    post: Vec<PipeSegment>,
}

impl Network {
    /// Validate and freeze a network.
    pub fn new(
        pre: Vec<PipeSegment>,
        branches: Vec<Branch>,
        post: Vec<PipeSegment>,
    ) -> NetworkResult<Self> {
        validate::validate_branches(&branches)?;
        Ok(Self {
            pre,
            branches,
            post,
        })
    }

    pub fn pre(&self) -> &[PipeSegment] {
        &self.pre
    }

    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    pub fn post(&self) -> &[PipeSegment] {
        &self.post
    }

    pub fn branch(&self, name: &str) -> Option<&Branch> {
        self.branches.iter().find(|b| b.name == name)
    }

    /// Whether the parallel group actually splits flow.
    pub fn has_parallel_split(&self) -> bool {
        self.branches.len() >= 2
    }

    /// Independent copy with every diameter multiplied by `factor`.
    pub fn with_scaled_diameters(&self, factor: f64) -> Self {
        Self {
            pre: self.pre.iter().map(|s| s.scaled(factor)).collect(),
            branches: self.branches.iter().map(|b| b.scaled(factor)).collect(),
            post: self.post.iter().map(|s| s.scaled(factor)).collect(),
        }
    }

    /// All segments in flow order with their location.
    pub fn segments(&self) -> impl Iterator<Item = (SegmentLocation, &PipeSegment)> + '_ {
        let pre = self
            .pre
            .iter()
            .enumerate()
            .map(|(index, seg)| (SegmentLocation::Pre { index }, seg));
        let branches = self.branches.iter().flat_map(|branch| {
            branch.segments.iter().enumerate().map(move |(index, seg)| {
                (
                    SegmentLocation::Branch {
                        name: branch.name.clone(),
                        index,
                    },
                    seg,
                )
            })
        });
        let post = self
            .post
            .iter()
            .enumerate()
            .map(|(index, seg)| (SegmentLocation::Post { index }, seg));
        pre.chain(branches).chain(post)
    }

    /// Locations of segments whose diameter is not positive.
    pub fn degenerate_segments(&self) -> Vec<SegmentLocation> {
        self.segments()
            .filter(|(_, seg)| seg.is_degenerate())
            .map(|(loc, _)| loc)
            .collect()
    }

    pub fn into_parts(self) -> (Vec<PipeSegment>, Vec<Branch>, Vec<PipeSegment>) {
        (self.pre, self.branches, self.post)
    }
}
