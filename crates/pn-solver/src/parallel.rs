//! Equal-loss flow split across the branches of a parallel group.
//!
//! With N >= 2 branches carrying a common total flow Q, the split settles
//! where every branch shows the same head loss. The first N-1 branch flows
//! are the unknowns (in m³/h, which keeps them of order one for pump-sized
//! duties); branch N carries `Q - sum(others)`.
//!
//! Residual i is `h_i(q_i) - h_N(q_N)`. Any split with a negative flow is
//! infeasible and evaluates to a constant `PENALTY_RESIDUAL` vector instead of
//! touching the loss model. Iterates are additionally held inside the
//! feasible simplex by a fraction-to-boundary step bound.

use crate::error::SolverResult;
use crate::jacobian::one_sided_jacobian;
use crate::newton::{NewtonConfig, NewtonResult, newton_solve};
use nalgebra::DVector;
use pn_components::series_head_loss;
use pn_core::units::{VolumeRate, m3ph, to_m3ph};
use pn_fluids::FluidProperties;
use pn_network::Branch;
use tracing::{debug, warn};

/// Residual component reported for an infeasible split (m).
pub const PENALTY_RESIDUAL: f64 = 1e12;

/// Share of the distance to the feasibility boundary a single step may cover.
const FRACTION_TO_BOUNDARY: f64 = 0.99;

/// Flow and head loss of one branch at the solved split.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchFlow {
    pub name: String,
    pub flow: VolumeRate,
    /// Head loss along the branch (m)
    pub head_loss: f64,
}

/// Outcome of a parallel solve.
///
/// A group of fewer than two branches does not split flow: it is reported as
/// converged with zero head loss and no distribution, so a lone branch adds
/// nothing to the system head. A failed solve carries no distribution either;
/// `converged` is false and `diagnostic` says why.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowSolution {
    /// Per-branch flows in branch order
    pub branch_flows: Vec<BranchFlow>,
    /// Common head loss of the group (m)
    pub head_loss: f64,
    pub converged: bool,
    pub iterations: usize,
    /// Norm of the final residual vector (m)
    pub residual_norm: f64,
    pub diagnostic: Option<String>,
}

impl FlowSolution {
    fn no_split() -> Self {
        Self {
            branch_flows: Vec::new(),
            head_loss: 0.0,
            converged: true,
            iterations: 0,
            residual_norm: 0.0,
            diagnostic: None,
        }
    }

    fn not_converged(diagnostic: String) -> Self {
        Self {
            branch_flows: Vec::new(),
            head_loss: 0.0,
            converged: false,
            iterations: 0,
            residual_norm: f64::NAN,
            diagnostic: Some(diagnostic),
        }
    }

    pub fn flow(&self, name: &str) -> Option<VolumeRate> {
        self.branch_flows
            .iter()
            .find(|b| b.name == name)
            .map(|b| b.flow)
    }

    pub fn total_flow(&self) -> VolumeRate {
        m3ph(self.branch_flows.iter().map(|b| to_m3ph(b.flow)).sum())
    }
}

/// Solver for the equal-loss split.
#[derive(Debug, Clone, Default)]
pub struct ParallelFlowSolver {
    config: NewtonConfig,
}

impl ParallelFlowSolver {
    pub fn new(config: NewtonConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NewtonConfig {
        &self.config
    }

    pub fn solve(
        &self,
        branches: &[Branch],
        total_flow: VolumeRate,
        fluid: &FluidProperties,
    ) -> FlowSolution {
        if branches.len() < 2 {
            return FlowSolution::no_split();
        }
        let Some((last, leading)) = branches.split_last() else {
            return FlowSolution::no_split();
        };

        let problem = SplitProblem {
            leading,
            last,
            total: to_m3ph(total_flow),
            fluid,
        };

        let x0 = DVector::from_element(leading.len(), problem.total / branches.len() as f64);
        let residual =
            |x: &DVector<f64>| -> SolverResult<DVector<f64>> { Ok(problem.residual(x)) };
        let admissible = |x: &DVector<f64>| problem.is_feasible(x);
        let jacobian = |x: &DVector<f64>| {
            one_sided_jacobian(x, &residual, self.config.fd_epsilon, &admissible)
        };
        let bound = |x: &DVector<f64>, dx: &DVector<f64>| problem.step_bound(x, dx);

        match newton_solve(x0, &residual, &jacobian, &bound, &self.config) {
            Ok(result) => {
                debug!(
                    branches = branches.len(),
                    iterations = result.iterations,
                    residual_norm = result.residual_norm,
                    "parallel split converged"
                );
                problem.solution(&result)
            }
            Err(err) => {
                warn!(
                    branches = branches.len(),
                    total_flow_m3h = problem.total,
                    error = %err,
                    "parallel split did not converge"
                );
                FlowSolution::not_converged(err.to_string())
            }
        }
    }
}

struct SplitProblem<'a> {
    leading: &'a [Branch],
    last: &'a Branch,
    /// m³/h
    total: f64,
    fluid: &'a FluidProperties,
}

impl SplitProblem<'_> {
    fn last_flow(&self, x: &DVector<f64>) -> f64 {
        self.total - x.sum()
    }

    fn is_feasible(&self, x: &DVector<f64>) -> bool {
        self.last_flow(x) >= 0.0 && x.iter().all(|q| *q >= 0.0)
    }

    fn head(&self, branch: &Branch, q_m3h: f64) -> f64 {
        series_head_loss(branch.segments(), m3ph(q_m3h), self.fluid)
    }

    fn residual(&self, x: &DVector<f64>) -> DVector<f64> {
        if !self.is_feasible(x) {
            return DVector::from_element(x.len(), PENALTY_RESIDUAL);
        }

        let h_last = self.head(self.last, self.last_flow(x));
        DVector::from_iterator(
            x.len(),
            self.leading
                .iter()
                .zip(x.iter())
                .map(|(branch, q)| self.head(branch, *q) - h_last),
        )
    }

    fn step_bound(&self, x: &DVector<f64>, dx: &DVector<f64>) -> f64 {
        let mut alpha: f64 = 1.0;
        for (q, dq) in x.iter().zip(dx.iter()) {
            if *dq < 0.0 {
                alpha = alpha.min(FRACTION_TO_BOUNDARY * q / -dq);
            }
        }

        let d_last = -dx.sum();
        if d_last < 0.0 {
            alpha = alpha.min(FRACTION_TO_BOUNDARY * self.last_flow(x) / -d_last);
        }

        alpha.max(0.0)
    }

    fn solution(&self, result: &NewtonResult) -> FlowSolution {
        let flows = result
            .x
            .iter()
            .copied()
            .chain(std::iter::once(self.last_flow(&result.x)));

        let branch_flows: Vec<BranchFlow> = self
            .leading
            .iter()
            .chain(std::iter::once(self.last))
            .zip(flows)
            .map(|(branch, q)| BranchFlow {
                name: branch.name().to_string(),
                flow: m3ph(q),
                head_loss: self.head(branch, q),
            })
            .collect();

        let head_loss = branch_flows.first().map_or(0.0, |b| b.head_loss);

        FlowSolution {
            branch_flows,
            head_loss,
            converged: true,
            iterations: result.iterations,
            residual_norm: result.residual_norm,
            diagnostic: None,
        }
    }
}
