//! Flow-split solver for the parallel group of a pumped network.
//!
//! The unknowns are the flows of all branches but the last; the last branch
//! takes whatever remains of the total, so conservation holds by construction.
//! A damped Newton iteration with a finite-difference Jacobian drives the
//! branch head-loss differences to zero.

pub mod error;
pub mod jacobian;
pub mod newton;
pub mod parallel;

pub use error::{SolverError, SolverResult};
pub use newton::{NewtonConfig, NewtonResult, newton_solve};
pub use parallel::{BranchFlow, FlowSolution, PENALTY_RESIDUAL, ParallelFlowSolver};
