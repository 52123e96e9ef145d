//! Compilation of case files into runtime structures.

use pn_components::{Fitting, PipeSegment};
use pn_core::units::{m, m3ph, mm};
use pn_fluids::FluidTable;
use pn_network::{Network, NetworkBuilder};
use pn_project::schema::{CaseFile, SegmentDef};
use pn_solver::{NewtonConfig, ParallelFlowSolver};

use crate::energy::EquipmentParams;
use crate::error::{AppError, AppResult};
use crate::evaluate::{Evaluator, OperatingPoint};
use crate::sweep::SweepRange;

/// Everything needed to evaluate or sweep one case.
#[derive(Debug, Clone)]
pub struct CaseRuntime {
    pub name: String,
    /// Canonical id of the resolved fluid
    pub fluid_id: String,
    pub network: Network,
    pub evaluator: Evaluator,
    pub sweep: SweepRange,
}

/// Compile a validated case into a network and a configured evaluator.
pub fn compile_case(case: &CaseFile) -> AppResult<CaseRuntime> {
    pn_project::validate_case(case)?;

    let entry = FluidTable::entry(&case.fluid)?;
    let network = build_network(case)?;

    let operating = OperatingPoint {
        flow: m3ph(case.operating.flow_m3h),
        geometric_head_m: case.operating.geometric_head_m,
    };
    let equipment = EquipmentParams {
        pump_efficiency: case.equipment.pump_efficiency,
        motor_efficiency: case.equipment.motor_efficiency,
        hours_per_day: case.equipment.hours_per_day,
        tariff_per_kwh: case.equipment.tariff_per_kwh,
    };
    let evaluator = Evaluator::new(entry.properties(), operating, equipment)?
        .with_solver(ParallelFlowSolver::new(solver_config(case)));

    let sweep = case
        .sweep
        .map(|s| SweepRange {
            low_percent: s.low_percent,
            high_percent: s.high_percent,
            step_percent: s.step_percent,
        })
        .unwrap_or_default();

    Ok(CaseRuntime {
        name: case.name.clone(),
        fluid_id: entry.canonical_id.to_string(),
        network,
        evaluator,
        sweep,
    })
}

/// Build the network through [`NetworkBuilder`] so branch rules are enforced.
pub fn build_network(case: &CaseFile) -> AppResult<Network> {
    let mut builder = NetworkBuilder::new();

    for def in &case.pre {
        builder.push_pre(build_segment(def)?);
    }
    for branch in &case.branches {
        let mut segments = branch.segments.iter();
        let first = segments.next().ok_or_else(|| {
            AppError::Compile(format!("Branch '{}' has no segments", branch.name))
        })?;
        builder.add_branch(branch.name.clone(), build_segment(first)?)?;
        for def in segments {
            builder.push_to_branch(&branch.name, build_segment(def)?)?;
        }
    }
    for def in &case.post {
        builder.push_post(build_segment(def)?);
    }

    Ok(builder.build()?)
}

pub fn build_segment(def: &SegmentDef) -> AppResult<PipeSegment> {
    let fittings = def
        .fittings
        .iter()
        .map(|id| id.parse::<Fitting>().map_err(AppError::Compile))
        .collect::<AppResult<Vec<_>>>()?;

    Ok(PipeSegment::new(m(def.length_m), mm(def.diameter_mm), mm(def.roughness_mm))
        .with_fittings(fittings))
}

/// Solver tuning from the case, falling back to defaults.
pub fn solver_config(case: &CaseFile) -> NewtonConfig {
    let mut config = NewtonConfig::default();
    if let Some(solver) = &case.solver {
        if let Some(iters) = solver.max_iterations {
            config.max_iterations = iters;
        }
        if let Some(tol) = solver.abs_tol_m {
            config.abs_tol = tol;
        }
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvaluationError;
    use pn_project::schema::{BranchDef, SolverDef};

    #[test]
    fn example_compiles() {
        let runtime = compile_case(&CaseFile::example()).unwrap();
        assert_eq!(runtime.fluid_id, "water-20c");
        assert_eq!(runtime.network.branches().len(), 2);
        assert_eq!(runtime.sweep, SweepRange::default());
    }

    #[test]
    fn multi_segment_branch_keeps_order() {
        let mut case = CaseFile::example();
        case.branches[0].segments.push(SegmentDef {
            length_m: 5.0,
            ..SegmentDef::series_default()
        });
        let network = build_network(&case).unwrap();
        let segs = network.branches()[0].segments();
        assert_eq!(segs.len(), 2);
        assert!((segs[1].length.value - 5.0).abs() < 1e-12);
    }

    #[test]
    fn fittings_parse_from_ids() {
        let def = SegmentDef {
            fittings: vec!["gate_valve_open".into(), "elbow_45".into()],
            ..SegmentDef::series_default()
        };
        let seg = build_segment(&def).unwrap();
        assert!((seg.k_minor() - 0.6).abs() < 1e-12);
    }

    #[test]
    fn unknown_fitting_fails_compile() {
        let def = SegmentDef {
            fittings: vec!["butterfly_valve".into()],
            ..SegmentDef::series_default()
        };
        assert!(matches!(build_segment(&def), Err(AppError::Compile(_))));
    }

    #[test]
    fn unknown_fluid_fails() {
        let mut case = CaseFile::example();
        case.fluid = "mercury".to_string();
        assert!(matches!(
            compile_case(&case),
            Err(AppError::Evaluation(EvaluationError::Fluid(_)))
        ));
    }

    #[test]
    fn solver_overrides_apply() {
        let mut case = CaseFile::example();
        case.solver = Some(SolverDef {
            max_iterations: Some(7),
            abs_tol_m: None,
        });
        let config = solver_config(&case);
        assert_eq!(config.max_iterations, 7);
        assert_eq!(config.abs_tol, NewtonConfig::default().abs_tol);
    }

    #[test]
    fn single_branch_case_compiles() {
        let mut case = CaseFile::example();
        case.branches = vec![BranchDef {
            name: "only".to_string(),
            segments: vec![SegmentDef::branch_default()],
        }];
        let runtime = compile_case(&case).unwrap();
        assert!(!runtime.network.has_parallel_split());
    }
}
