//! The evaluation chain: series losses, parallel split, manometric head and
//! energy cost for one network at one operating point.

use crate::energy::{EnergyResult, EquipmentParams, energy_cost};
use crate::error::{EvaluationError, EvaluationResult};
use pn_components::{PipeSegment, SegmentLoss, SeriesLoss, series_losses};
use pn_core::units::{VolumeRate, m3ph, to_m3ph};
use pn_core::{ensure_finite, ensure_positive};
use pn_fluids::FluidProperties;
use pn_network::{Network, SegmentLocation};
use pn_solver::{FlowSolution, ParallelFlowSolver};
use serde::Serialize;
use tracing::{info, warn};

/// Duty the pump has to deliver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatingPoint {
    pub flow: VolumeRate,
    /// Static lift between suction and discharge levels (m)
    pub geometric_head_m: f64,
}

impl OperatingPoint {
    pub fn validate(&self) -> EvaluationResult<()> {
        ensure_positive(to_m3ph(self.flow), "flow (m³/h)")?;
        ensure_finite(self.geometric_head_m, "geometric head")?;
        Ok(())
    }
}

/// Loss of one segment together with the flow it carries.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentReport {
    pub location: SegmentLocation,
    pub flow: VolumeRate,
    pub loss: SegmentLoss,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BranchReport {
    pub name: String,
    pub flow: VolumeRate,
    /// Friction head along the branch (m)
    pub head_loss: f64,
}

/// Full result of one evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkReport {
    pub pre: SeriesLoss,
    pub parallel: FlowSolution,
    pub post: SeriesLoss,
    pub branches: Vec<BranchReport>,
    /// Every segment in flow order, with the flow it carries
    pub segments: Vec<SegmentReport>,
    pub geometric_head_m: f64,
    pub energy: EnergyResult,
    /// Segments with a non-positive diameter; their head is the penalty value
    pub degenerate: Vec<SegmentLocation>,
}

impl NetworkReport {
    pub fn pre_loss_m(&self) -> f64 {
        self.pre.total_head
    }

    pub fn parallel_loss_m(&self) -> f64 {
        self.parallel.head_loss
    }

    pub fn post_loss_m(&self) -> f64 {
        self.post.total_head
    }

    pub fn total_loss_m(&self) -> f64 {
        self.pre_loss_m() + self.parallel_loss_m() + self.post_loss_m()
    }

    pub fn manometric_head_m(&self) -> f64 {
        self.geometric_head_m + self.total_loss_m()
    }

    /// Sum of reported fitting heads. Not part of [`Self::total_loss_m`].
    pub fn minor_head_m(&self) -> f64 {
        self.segments.iter().map(|s| s.loss.minor_head).sum()
    }

    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            pre_loss_m: self.pre_loss_m(),
            parallel_loss_m: self.parallel_loss_m(),
            post_loss_m: self.post_loss_m(),
            total_loss_m: self.total_loss_m(),
            minor_head_m: self.minor_head_m(),
            manometric_head_m: self.manometric_head_m(),
            power_kw: self.energy.power_kw(),
            annual_cost: self.energy.annual_cost,
            parallel_iterations: self.parallel.iterations,
            branches: self
                .branches
                .iter()
                .map(|b| BranchSummary {
                    name: b.name.clone(),
                    flow_m3h: to_m3ph(b.flow),
                    head_loss_m: b.head_loss,
                })
                .collect(),
            segments: self
                .segments
                .iter()
                .map(|s| SegmentSummary {
                    location: s.location.to_string(),
                    flow_m3h: to_m3ph(s.flow),
                    velocity_mps: s.loss.velocity.value,
                    reynolds: s.loss.reynolds,
                    friction_factor: s.loss.friction_factor,
                    friction_head_m: s.loss.friction_head,
                    minor_head_m: s.loss.minor_head,
                })
                .collect(),
            degenerate: self.degenerate.iter().map(|l| l.to_string()).collect(),
        }
    }
}

/// Plain-number view of a [`NetworkReport`] for serialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub pre_loss_m: f64,
    pub parallel_loss_m: f64,
    pub post_loss_m: f64,
    pub total_loss_m: f64,
    pub minor_head_m: f64,
    pub manometric_head_m: f64,
    pub power_kw: f64,
    pub annual_cost: f64,
    pub parallel_iterations: usize,
    pub branches: Vec<BranchSummary>,
    pub segments: Vec<SegmentSummary>,
    pub degenerate: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BranchSummary {
    pub name: String,
    pub flow_m3h: f64,
    pub head_loss_m: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentSummary {
    pub location: String,
    pub flow_m3h: f64,
    pub velocity_mps: f64,
    pub reynolds: f64,
    pub friction_factor: f64,
    pub friction_head_m: f64,
    pub minor_head_m: f64,
}

/// Runs the evaluation chain for a fixed fluid, duty and equipment.
///
/// Holds no per-network state, so one evaluator can be shared across
/// threads and reused for every point of a sweep.
#[derive(Debug, Clone)]
pub struct Evaluator {
    fluid: FluidProperties,
    operating: OperatingPoint,
    equipment: EquipmentParams,
    solver: ParallelFlowSolver,
}

impl Evaluator {
    pub fn new(
        fluid: FluidProperties,
        operating: OperatingPoint,
        equipment: EquipmentParams,
    ) -> EvaluationResult<Self> {
        operating.validate()?;
        equipment.validate()?;
        Ok(Self {
            fluid,
            operating,
            equipment,
            solver: ParallelFlowSolver::default(),
        })
    }

    pub fn with_solver(mut self, solver: ParallelFlowSolver) -> Self {
        self.solver = solver;
        self
    }

    pub fn fluid(&self) -> &FluidProperties {
        &self.fluid
    }

    pub fn operating(&self) -> &OperatingPoint {
        &self.operating
    }

    pub fn equipment(&self) -> &EquipmentParams {
        &self.equipment
    }

    pub fn evaluate(&self, network: &Network) -> EvaluationResult<NetworkReport> {
        let flow = self.operating.flow;

        let degenerate = network.degenerate_segments();
        if !degenerate.is_empty() {
            let locations: Vec<String> = degenerate.iter().map(|l| l.to_string()).collect();
            warn!(
                segments = ?locations,
                "non-positive diameter, segment evaluated at penalty head"
            );
        }

        let pre = series_losses(network.pre(), flow, &self.fluid);
        info!(head_m = pre.total_head, segments = network.pre().len(), "pre-split losses");

        let parallel = self.solver.solve(network.branches(), flow, &self.fluid);
        if !parallel.converged {
            return Err(EvaluationError::ParallelNotConverged {
                iterations: parallel.iterations,
                diagnostic: parallel
                    .diagnostic
                    .clone()
                    .unwrap_or_else(|| "no diagnostic".to_string()),
            });
        }
        info!(
            head_m = parallel.head_loss,
            branches = network.branches().len(),
            iterations = parallel.iterations,
            "parallel split solved"
        );

        let post = series_losses(network.post(), flow, &self.fluid);
        info!(head_m = post.total_head, segments = network.post().len(), "post-join losses");

        let branches: Vec<BranchReport> = parallel
            .branch_flows
            .iter()
            .map(|bf| BranchReport {
                name: bf.name.clone(),
                flow: bf.flow,
                head_loss: bf.head_loss,
            })
            .collect();

        let segments = self.segment_reports(network, &parallel);

        let manometric_head_m = self.operating.geometric_head_m
            + pre.total_head
            + parallel.head_loss
            + post.total_head;
        let energy = energy_cost(flow, manometric_head_m, &self.fluid, &self.equipment);
        info!(
            manometric_head_m,
            power_kw = energy.power_kw(),
            annual_cost = energy.annual_cost,
            "energy evaluated"
        );

        let report = NetworkReport {
            pre,
            parallel,
            post,
            branches,
            segments,
            geometric_head_m: self.operating.geometric_head_m,
            energy,
            degenerate,
        };

        Ok(report)
    }

    // A branch missing from the split (group of one) is labelled with zero flow.
    fn segment_reports(&self, network: &Network, parallel: &FlowSolution) -> Vec<SegmentReport> {
        let total = self.operating.flow;
        network
            .segments()
            .map(|(location, segment)| {
                let flow = match &location {
                    SegmentLocation::Branch { name, .. } => {
                        parallel.flow(name).unwrap_or_else(|| m3ph(0.0))
                    }
                    _ => total,
                };
                self.segment_report(location, segment, flow)
            })
            .collect()
    }

    fn segment_report(
        &self,
        location: SegmentLocation,
        segment: &PipeSegment,
        flow: VolumeRate,
    ) -> SegmentReport {
        SegmentReport {
            location,
            flow,
            loss: segment.loss(flow, &self.fluid),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pn_components::{Fitting, series_head_loss};
    use pn_core::units::{m, mm};
    use pn_fluids::FluidTable;
    use pn_network::NetworkBuilder;

    fn evaluator(flow_m3h: f64) -> Evaluator {
        Evaluator::new(
            FluidTable::lookup("water").unwrap(),
            OperatingPoint {
                flow: m3ph(flow_m3h),
                geometric_head_m: 15.0,
            },
            EquipmentParams::default(),
        )
        .unwrap()
    }

    fn example_network() -> Network {
        let mut builder = NetworkBuilder::new();
        builder.push_pre(PipeSegment::new(m(100.0), mm(100.0), mm(0.15)));
        builder.add_branch_default();
        builder.add_branch_default();
        builder.build().unwrap()
    }

    #[test]
    fn sections_sum_to_manometric_head() {
        let report = evaluator(100.0).evaluate(&example_network()).unwrap();

        assert!((report.pre_loss_m() - 14.35).abs() / 14.35 < 0.01);
        assert_eq!(report.post_loss_m(), 0.0);
        let expected = 15.0 + report.pre_loss_m() + report.parallel_loss_m();
        assert!((report.manometric_head_m() - expected).abs() < 1e-12);
        assert!(report.energy.power_kw() > 0.0);
        assert_eq!(report.branches.len(), 2);
    }

    #[test]
    fn segment_labels_carry_branch_flow() {
        let report = evaluator(100.0).evaluate(&example_network()).unwrap();
        assert_eq!(report.segments.len(), 3);
        assert!((to_m3ph(report.segments[0].flow) - 100.0).abs() < 1e-9);
        for seg in &report.segments[1..] {
            assert!((to_m3ph(seg.flow) - 50.0).abs() < 1e-6);
        }
    }

    #[test]
    fn fittings_are_reported_not_summed() {
        let mut builder = NetworkBuilder::new();
        builder.push_pre(
            PipeSegment::new(m(100.0), mm(100.0), mm(0.15))
                .with_fittings([Fitting::GlobeValveOpen, Fitting::Elbow90ShortRadius]),
        );
        let network = builder.build().unwrap();
        let report = evaluator(100.0).evaluate(&network).unwrap();

        let friction_only =
            series_head_loss(network.pre(), m3ph(100.0), &FluidTable::lookup("water").unwrap());
        assert!(report.minor_head_m() > 0.0);
        assert!((report.total_loss_m() - friction_only).abs() < 1e-12);
    }

    #[test]
    fn degenerate_segment_is_listed() {
        let mut builder = NetworkBuilder::new();
        builder.push_post(PipeSegment::new(m(10.0), mm(0.0), mm(0.15)));
        let report = evaluator(100.0).evaluate(&builder.build().unwrap()).unwrap();

        assert_eq!(report.degenerate, vec![SegmentLocation::Post { index: 0 }]);
        assert!(report.total_loss_m() >= 1e12);
    }

    #[test]
    fn non_converged_split_skips_energy() {
        let mut builder = NetworkBuilder::new();
        builder
            .add_branch("open", PipeSegment::new(m(50.0), mm(80.0), mm(0.15)))
            .unwrap();
        builder
            .add_branch("blocked", PipeSegment::new(m(50.0), mm(0.0), mm(0.15)))
            .unwrap();

        let err = evaluator(100.0).evaluate(&builder.build().unwrap()).unwrap_err();
        assert!(matches!(err, EvaluationError::ParallelNotConverged { .. }));
    }

    #[test]
    fn rejects_non_positive_flow() {
        let err = Evaluator::new(
            FluidTable::lookup("water").unwrap(),
            OperatingPoint {
                flow: m3ph(0.0),
                geometric_head_m: 15.0,
            },
            EquipmentParams::default(),
        )
        .unwrap_err();
        assert!(matches!(err, EvaluationError::InvalidInput { .. }));
    }

    #[test]
    fn non_finite_geometric_head_names_the_input() {
        let err = Evaluator::new(
            FluidTable::lookup("water").unwrap(),
            OperatingPoint {
                flow: m3ph(100.0),
                geometric_head_m: f64::INFINITY,
            },
            EquipmentParams::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            EvaluationError::InvalidInput {
                what: "Non-finite numeric value for geometric head: inf".into()
            }
        );
    }

    #[test]
    fn summary_mirrors_report() {
        let report = evaluator(100.0).evaluate(&example_network()).unwrap();
        let summary = report.summary();
        assert_eq!(summary.branches.len(), 2);
        assert_eq!(summary.segments[0].location, "pre segment 1");
        assert_eq!(summary.manometric_head_m, report.manometric_head_m());
    }
}
