//! Pipe segment with friction using Darcy-Weisbach correlation.

use crate::fitting::Fitting;
use pn_core::units::constants::G_MPS2;
use pn_core::units::{Length, Velocity, VolumeRate, mps};
use pn_fluids::FluidProperties;

/// Head reported for a segment whose diameter is not positive (m).
pub const DEGENERATE_HEAD_M: f64 = 1e12;

/// Reynolds number above which flow is treated as turbulent.
pub const TURBULENT_REYNOLDS: f64 = 4000.0;

/// Straight run of pipe between two joints.
///
/// Geometry is not validated here. A non-positive diameter is a legal value
/// that the loss model answers with `DEGENERATE_HEAD_M`.
#[derive(Debug, Clone, PartialEq)]
pub struct PipeSegment {
    /// Pipe length
    pub length: Length,
    /// Pipe inner diameter
    pub diameter: Length,
    /// Surface roughness (absolute)
    pub roughness: Length,
    /// Fittings installed on this run
    pub fittings: Vec<Fitting>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowRegime {
    /// No flow, or zero viscosity.
    Stagnant,
    /// `Re <= 4000`, including the transitional band.
    Laminar,
    Turbulent,
}

/// Result of evaluating one segment at one flow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentLoss {
    pub velocity: Velocity,
    pub reynolds: f64,
    pub friction_factor: f64,
    /// Friction head loss (m)
    pub friction_head: f64,
    /// Fitting head loss (m). Reported only; never part of series totals.
    pub minor_head: f64,
}

impl SegmentLoss {
    fn zero() -> Self {
        Self {
            velocity: mps(0.0),
            reynolds: 0.0,
            friction_factor: 0.0,
            friction_head: 0.0,
            minor_head: 0.0,
        }
    }

    pub fn regime(&self) -> FlowRegime {
        if self.reynolds > TURBULENT_REYNOLDS {
            FlowRegime::Turbulent
        } else if self.reynolds > 0.0 {
            FlowRegime::Laminar
        } else {
            FlowRegime::Stagnant
        }
    }
}

impl PipeSegment {
    /// Create a new segment without fittings.
    pub fn new(length: Length, diameter: Length, roughness: Length) -> Self {
        Self {
            length,
            diameter,
            roughness,
            fittings: Vec::new(),
        }
    }

    pub fn with_fittings(mut self, fittings: impl IntoIterator<Item = Fitting>) -> Self {
        self.fittings.extend(fittings);
        self
    }

    pub fn is_degenerate(&self) -> bool {
        self.diameter.value <= 0.0
    }

    /// Sum of fitting resistance coefficients.
    pub fn k_minor(&self) -> f64 {
        self.fittings.iter().map(|f| f.k()).sum()
    }

    /// Copy of this segment with its diameter multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            diameter: self.diameter * factor,
            ..self.clone()
        }
    }

    /// Velocity and head loss at volumetric flow `flow`.
    pub fn loss(&self, flow: VolumeRate, fluid: &FluidProperties) -> SegmentLoss {
        let q = flow.value;
        if q <= 0.0 {
            return SegmentLoss::zero();
        }

        let d = self.diameter.value;
        if d <= 0.0 {
            return SegmentLoss {
                friction_head: DEGENERATE_HEAD_M,
                ..SegmentLoss::zero()
            };
        }

        let area = std::f64::consts::PI * d.powi(2) / 4.0;
        let velocity = q / area;
        let nu = fluid.kinematic_viscosity.value;
        let reynolds = if nu > 0.0 { velocity * d / nu } else { 0.0 };

        let f = friction_factor(reynolds, self.roughness.value / d);
        let velocity_head = velocity.powi(2) / (2.0 * G_MPS2);

        SegmentLoss {
            velocity: mps(velocity),
            reynolds,
            friction_factor: f,
            friction_head: f * (self.length.value / d) * velocity_head,
            minor_head: self.k_minor() * velocity_head,
        }
    }
}

/// Darcy friction factor for relative roughness `e_d = ε/d`.
///
/// `64/Re` up to and including `Re = 4000`, Swamee-Jain above it, zero for
/// `Re <= 0`. The jump at the boundary is intentional.
pub fn friction_factor(reynolds: f64, e_d: f64) -> f64 {
    if reynolds > TURBULENT_REYNOLDS {
        let a = e_d / 3.7;
        let b = 5.74 / reynolds.powf(0.9);
        0.25 / (a + b).log10().powi(2)
    } else if reynolds > 0.0 {
        64.0 / reynolds
    } else {
        0.0
    }
}
