//! Shared application service layer for pumpnet.
//!
//! Turns case files into networks, runs the evaluation chain
//! (series losses, parallel split, manometric head, energy cost) and the
//! diameter sensitivity sweep. Both the CLI and library callers go through
//! this crate.

pub mod case_service;
pub mod compile;
pub mod energy;
pub mod error;
pub mod evaluate;
pub mod sweep;

// Re-export key types for convenience
pub use case_service::{CaseSummary, load_case, save_case, summarize_case, validate_case};
pub use compile::{CaseRuntime, build_network, build_segment, compile_case, solver_config};
pub use energy::{EnergyResult, EquipmentParams, energy_cost};
pub use error::{AppError, AppResult, EvaluationError, EvaluationResult};
pub use evaluate::{
    BranchReport, Evaluator, NetworkReport, OperatingPoint, ReportSummary, SegmentReport,
};
pub use sweep::{SweepPoint, SweepRange, SweepReport, run_sweep};
