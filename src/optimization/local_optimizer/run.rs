//! Execution helpers that run an `argmin` solver on a bounded, budgeted
//! objective and return a crate-friendly [`LocalOutcome`].
//!
//! The executor result is reduced to a [`ReturnCode`]; the best point and the
//! evaluation count are read from the shared [`EvalTracker`] so they survive
//! runs that end in an error.
use crate::optimization::{
    errors::{OptError, OptResult},
    local_optimizer::{
        adapter::{ArgMinAdapter, EvalTracker},
        traits::{LocalOptions, LocalOutcome, Objective, ReturnCode},
        types::{GradientState, SimplexState, Theta},
    },
};
use argmin::core::{Error, Executor, State, TerminationReason, TerminationStatus};

/// Run a Nelder–Mead solver whose simplex already encodes the start point.
///
/// `max_iters` is set to the evaluation budget; every iteration costs at
/// least one evaluation, so the tracker budget binds first.
pub fn run_nelder_mead<'a, O, S>(
    theta0: &Theta, opts: &LocalOptions, problem: ArgMinAdapter<'a, O>, solver: S,
) -> OptResult<LocalOutcome>
where
    O: Objective + ?Sized,
    S: argmin::core::Solver<ArgMinAdapter<'a, O>, SimplexState>,
{
    let tracker = problem.tracker;
    let max_iters = tracker.max_evals() as u64;
    let mut optimizer = Executor::new(problem, solver);
    optimizer = optimizer.configure(|state| state.max_iters(max_iters));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }
    #[cfg(not(feature = "obs_slog"))]
    let _ = opts;
    let status = optimizer.run().map(|res| res.state().get_termination_status().clone());
    finish(status, tracker, theta0)
}

/// Run an L-BFGS solver from `theta0`.
pub fn run_lbfgs<'a, O, S>(
    theta0: &Theta, opts: &LocalOptions, problem: ArgMinAdapter<'a, O>, solver: S,
) -> OptResult<LocalOutcome>
where
    O: Objective + ?Sized,
    S: argmin::core::Solver<ArgMinAdapter<'a, O>, GradientState>,
{
    let tracker = problem.tracker;
    let max_iters = tracker.max_evals() as u64;
    let start = theta0.clone();
    let mut optimizer = Executor::new(problem, solver);
    optimizer = optimizer.configure(|state| state.param(start).max_iters(max_iters));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }
    #[cfg(not(feature = "obs_slog"))]
    let _ = opts;
    let status = optimizer.run().map(|res| res.state().get_termination_status().clone());
    finish(status, tracker, theta0)
}

// ---- Helper Methods ----

/// Map the executor result onto a [`ReturnCode`].
///
/// - `SolverConverged` → `FtolReached`, `TargetCostReached` → `Success`.
/// - `MaxItersReached` and [`OptError::BudgetExhausted`] → `MaxEvalReached`.
/// - Objective failures (loss errors, non-finite values, caller stops)
///   → `ForcedStop`.
/// - Anything else → `Failure`, with the backend error attached.
fn finish(
    status: Result<TerminationStatus, Error>, tracker: &EvalTracker, theta0: &Theta,
) -> OptResult<LocalOutcome> {
    let (code, error) = match status {
        Ok(TerminationStatus::Terminated(reason)) => match reason {
            TerminationReason::SolverConverged => (ReturnCode::FtolReached, None),
            TerminationReason::TargetCostReached => (ReturnCode::Success, None),
            TerminationReason::MaxItersReached => (ReturnCode::MaxEvalReached, None),
            other => (
                ReturnCode::Failure,
                Some(OptError::BackendError { text: format!("solver stopped: {other:?}") }),
            ),
        },
        Ok(TerminationStatus::NotTerminated) => (
            ReturnCode::Failure,
            Some(OptError::BackendError { text: "solver did not terminate".to_string() }),
        ),
        Err(err) => match OptError::from(err) {
            OptError::BudgetExhausted { .. } => (ReturnCode::MaxEvalReached, None),
            e if e.is_evaluation_failure() => (ReturnCode::ForcedStop, Some(e)),
            e => (ReturnCode::Failure, Some(e)),
        },
    };
    Ok(LocalOutcome::new(tracker.best(), theta0, code, tracker.used(), error))
}
