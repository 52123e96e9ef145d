//! Newton solver with an admissible-step bound.

use crate::error::{SolverError, SolverResult};
use nalgebra::{DMatrix, DVector};
use tracing::debug;

/// Newton solver configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonConfig {
    /// Maximum iterations
    pub max_iterations: usize,
    /// Absolute tolerance for residual norm
    pub abs_tol: f64,
    /// Relative step for finite-difference derivatives
    pub fd_epsilon: f64,
    /// Line search backtracking factor
    pub line_search_beta: f64,
    /// Maximum line search iterations
    pub max_line_search_iters: usize,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            abs_tol: 1e-9,
            fd_epsilon: 1e-7,
            line_search_beta: 0.5,
            max_line_search_iters: 30,
        }
    }
}

/// Newton iteration result.
#[derive(Debug, Clone)]
pub struct NewtonResult {
    /// Solution vector
    pub x: DVector<f64>,
    /// Final residual norm
    pub residual_norm: f64,
    /// Number of iterations
    pub iterations: usize,
}

/// Step bound that never limits the step.
pub fn unbounded(_x: &DVector<f64>, _dx: &DVector<f64>) -> f64 {
    1.0
}

/// Newton solver with backtracking line search.
///
/// `step_bound(x, dx)` returns the largest `alpha` in `(0, 1]` for which
/// `x + alpha * dx` is admissible. Each trial step starts from that bound and
/// is halved (by `line_search_beta`) until the residual norm decreases.
pub fn newton_solve<F, J, B>(
    x0: DVector<f64>,
    residual_fn: F,
    jacobian_fn: J,
    step_bound: B,
    config: &NewtonConfig,
) -> SolverResult<NewtonResult>
where
    F: Fn(&DVector<f64>) -> SolverResult<DVector<f64>>,
    J: Fn(&DVector<f64>) -> SolverResult<DMatrix<f64>>,
    B: Fn(&DVector<f64>, &DVector<f64>) -> f64,
{
    let mut x = x0;
    let mut r = residual_fn(&x)?;
    let mut r_norm = r.norm();

    for iter in 0..config.max_iterations {
        if r_norm <= config.abs_tol {
            return Ok(NewtonResult {
                x,
                residual_norm: r_norm,
                iterations: iter,
            });
        }

        let jac = jacobian_fn(&x)?;

        // Solve J * dx = -r
        let dx = jac
            .lu()
            .solve(&(-r.clone()))
            .ok_or_else(|| SolverError::Numeric {
                what: format!("singular Jacobian at iteration {}", iter),
            })?;

        let mut alpha = step_bound(&x, &dx).clamp(0.0, 1.0);
        let mut accepted = None;

        for _ in 0..config.max_line_search_iters {
            let x_new = &x + alpha * &dx;
            let r_new = residual_fn(&x_new)?;
            let r_new_norm = r_new.norm();

            if r_new_norm.is_finite() && r_new_norm < r_norm {
                accepted = Some((x_new, r_new, r_new_norm));
                break;
            }

            alpha *= config.line_search_beta;
        }

        let Some((x_new, r_new, r_new_norm)) = accepted else {
            return Err(SolverError::ConvergenceFailed {
                what: format!(
                    "line search stagnated at iteration {}, residual = {:e}",
                    iter, r_norm
                ),
            });
        };

        debug!(
            iteration = iter,
            residual_norm = r_new_norm,
            step = alpha,
            "newton step accepted"
        );

        x = x_new;
        r = r_new;
        r_norm = r_new_norm;
    }

    if r_norm <= config.abs_tol {
        return Ok(NewtonResult {
            x,
            residual_norm: r_norm,
            iterations: config.max_iterations,
        });
    }

    Err(SolverError::ConvergenceFailed {
        what: format!(
            "maximum iterations {} reached, residual = {:e}",
            config.max_iterations, r_norm
        ),
    })
}
