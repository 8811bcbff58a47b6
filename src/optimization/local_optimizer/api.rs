//! High-level entry point for bounded local minimization under an evaluation
//! budget.
//!
//! This validates the problem, wraps the objective in an [`ArgMinAdapter`]
//! sharing an [`EvalTracker`], selects the solver from [`LocalOptions`], and
//! delegates execution to the runners in [`run`](super::run).
use crate::optimization::{
    errors::OptResult,
    local_optimizer::{
        adapter::{ArgMinAdapter, EvalTracker},
        builders::{build_nelder_mead, build_optimizer_hager_zhang, build_optimizer_more_thuente},
        run::{run_lbfgs, run_nelder_mead},
        traits::{LocalAlgorithm, LocalOptions, LocalOutcome, Objective, ReturnCode},
        types::{Bounds, Theta},
        validation::{project_onto_bounds, validate_problem, verify_ftol},
    },
};

/// minimize_bounded — minimize `f` over a box using at most `max_evals` calls.
///
/// Parameters
/// ----------
/// - `f`: objective to minimize.
/// - `theta0`: start point; projected onto `bounds` before use.
/// - `bounds`: one `(lower, upper)` pair per coordinate.
/// - `ftol`: absolute function tolerance (stop criterion).
/// - `opts`: solver selection and verbosity.
/// - `max_evals`: evaluation budget; `0` returns `MaxEvalReached` without
///   calling `f`.
///
/// Returns
/// -------
/// `OptResult<LocalOutcome>`
///   - `Ok(outcome)` for every run that reached a terminal state, including
///     budget exhaustion and objective failures (see [`ReturnCode`]).
///   - `Err(e)` only for invalid configuration (shape, bounds, tolerance).
pub fn minimize_bounded<O: Objective + ?Sized>(
    f: &O, theta0: &Theta, bounds: &Bounds, ftol: f64, opts: &LocalOptions, max_evals: usize,
) -> OptResult<LocalOutcome> {
    validate_problem(theta0, bounds)?;
    verify_ftol(ftol)?;
    let start = project_onto_bounds(theta0, bounds);
    if max_evals == 0 {
        return Ok(LocalOutcome::new(None, &start, ReturnCode::MaxEvalReached, 0, None));
    }
    let tracker = EvalTracker::new(max_evals);
    let problem = ArgMinAdapter::new(f, bounds, &tracker);
    match opts.algorithm {
        LocalAlgorithm::NelderMead => {
            let solver = build_nelder_mead(&start, bounds, ftol)?;
            run_nelder_mead(&start, opts, problem, solver)
        }
        LocalAlgorithm::LbfgsMoreThuente => {
            let solver = build_optimizer_more_thuente(opts, ftol)?;
            run_lbfgs(&start, opts, problem, solver)
        }
        LocalAlgorithm::LbfgsHagerZhang => {
            let solver = build_optimizer_hager_zhang(opts, ftol)?;
            run_lbfgs(&start, opts, problem, solver)
        }
    }
}
