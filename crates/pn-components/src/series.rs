//! Series accumulation of friction head.
//!
//! Every segment of a series run carries the same flow, so the run's loss is
//! the plain sum of its segments' friction heads. Fitting heads are left out.

use crate::pipe::{PipeSegment, SegmentLoss};
use pn_core::units::VolumeRate;
use pn_fluids::FluidProperties;

/// Per-segment breakdown of a series run.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesLoss {
    pub segments: Vec<SegmentLoss>,
    /// Sum of friction heads (m)
    pub total_head: f64,
}

/// Total friction head of `segments` at `flow` (m). Empty runs lose nothing.
pub fn series_head_loss(
    segments: &[PipeSegment],
    flow: VolumeRate,
    fluid: &FluidProperties,
) -> f64 {
    segments
        .iter()
        .map(|seg| seg.loss(flow, fluid).friction_head)
        .sum()
}

pub fn series_losses(
    segments: &[PipeSegment],
    flow: VolumeRate,
    fluid: &FluidProperties,
) -> SeriesLoss {
    let segments: Vec<SegmentLoss> = segments.iter().map(|seg| seg.loss(flow, fluid)).collect();
    let total_head = segments.iter().map(|l| l.friction_head).sum();
    SeriesLoss {
        segments,
        total_head,
    }
}
