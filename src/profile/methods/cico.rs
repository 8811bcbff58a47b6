//! methods::cico — constrained single-pass search (`CICO_ONE_PASS`).
//!
//! Purpose
//! -------
//! Find the right endpoint in one constrained optimization over the full
//! parameter vector:
//!
//! ```text
//! maximize  s(θ)   subject to  Λ(θ) - loss_crit ≤ 0,  θ ∈ theta_bounds
//! ```
//!
//! where `s(θ) = θ_k` for a coordinate search, or any scan function for
//! [`search_with_scan_fn`].
//!
//! Key behaviors
//! -------------
//! - Runs [`minimize_constrained`] on `-s(θ)` with the offset loss as the
//!   only inequality constraint. `loss_tol` is the feasibility tolerance of
//!   that constraint, `scan_tol` the outer stopping tolerance on `s`.
//! - Early stop: as soon as a constraint evaluation is feasible (`loss < 0`)
//!   while `s(θ) > scan_bound`, the run is aborted and reported as
//!   `SCAN_BOUND_REACHED`.
//! - Outcome mapping:
//!   - converged → `BORDER_FOUND_BY_SCAN_TOL` with one profile point;
//!   - early stop → `SCAN_BOUND_REACHED`, no point;
//!   - budget → `MAX_ITER_STOP`, no point;
//!   - loss error → `LOSS_ERROR_STOP`, no point;
//!   - anything else → [`ProfileError::UnexpectedReturnCode`].
//!
//! Conventions
//! -----------
//! - Only derivative-free inner solvers are known to behave reliably here;
//!   other choices are used as requested but logged with `warn!`.
use log::{debug, warn};
use std::cell::Cell;

use crate::{
    optimization::{
        constrained::{
            AugLagOptions, ConstrainedProblem, InequalityConstraint, minimize_constrained,
        },
        errors::{OptError, OptResult},
        local_optimizer::{Bounds, ReturnCode, Theta},
    },
    profile::{
        core::{
            options::{LossFunction, SearchOptions},
            points::{EndpointStatus, Method, PointStatus, ProfilePoint, SearchOutcome},
            profile_fn::finite_loss,
        },
        errors::{ProfileError, ProfileResult},
        methods::{EndpointSearch, RightEndpointProblem, warn_near_zero_start},
    },
};

/// Smallest tolerance handed to the inner solver.
const LOCAL_FTOL_FLOOR: f64 = 1e-14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CicoOnePass;

impl EndpointSearch for CicoOnePass {
    fn method(&self) -> Method {
        Method::CicoOnePass
    }

    fn search(
        &self, problem: &RightEndpointProblem<'_>, options: &SearchOptions,
    ) -> ProfileResult<SearchOutcome> {
        let k = problem.theta_num;
        let scan = |theta: &Theta| theta[k];
        search_with_scan_fn(
            &problem.theta_init,
            problem.loss,
            &scan,
            &problem.theta_bounds,
            problem.scan_bound,
            options,
        )
    }
}

/// search_with_scan_fn — right endpoint of an arbitrary scan function.
///
/// Parameters
/// ----------
/// - `theta_init`: feasible start point (`loss(theta_init) < 0`).
/// - `loss`: offset loss, boundary at `0`.
/// - `scan_fn`: quantity to maximize, e.g. a coordinate or a model
///   prediction.
/// - `theta_bounds`: box for every coordinate.
/// - `scan_bound`: value of `scan_fn` beyond which the search gives up.
/// - `options`: `scan_tol`, `loss_tol`, `max_iter` and the inner solver.
///
/// Returns
/// -------
/// `ProfileResult<SearchOutcome>`; the single profile point of a successful
/// run has `value = scan_fn(θ*)` and `loss = loss(θ*)`.
pub fn search_with_scan_fn<L, S>(
    theta_init: &Theta, loss: &L, scan_fn: &S, theta_bounds: &Bounds, scan_bound: f64,
    options: &SearchOptions,
) -> ProfileResult<SearchOutcome>
where
    L: LossFunction + ?Sized,
    S: Fn(&Theta) -> f64,
{
    if !options.local.algorithm.is_derivative_free() {
        warn!(
            "Using {} as the local algorithm of CICO_ONE_PASS may result in wrong output.",
            options.local.algorithm
        );
    }
    warn_near_zero_start(theta_init, options, Method::CicoOnePass);
    let loss_tol = options.loss_tol_for(Method::CicoOnePass);
    let out_of_bound = Cell::new(false);

    let objective = |theta: &Theta| -> OptResult<f64> { Ok(-scan_fn(theta)) };
    let constraint = |theta: &Theta| -> OptResult<f64> {
        let value = finite_loss(loss, theta)?;
        if value < 0.0 && scan_fn(theta) > scan_bound {
            out_of_bound.set(true);
            return Err(OptError::ForcedStop {
                reason: "Out of the scan bound but in the loss constraint.".to_string(),
            });
        }
        Ok(value)
    };
    let problem = ConstrainedProblem::new(
        &objective,
        vec![InequalityConstraint::new(&constraint, loss_tol)],
        theta_bounds.clone(),
    );
    let local_ftol = (options.scan_tol * options.scan_tol).max(LOCAL_FTOL_FLOOR);
    let opts = AugLagOptions::new(
        options.scan_tol,
        local_ftol,
        options.local.clone(),
        options.max_iter,
        None,
    )?;

    let out = minimize_constrained(&problem, theta_init, &opts)?;
    let call_count = out.evals;
    let result = match out.code {
        ReturnCode::Success | ReturnCode::FtolReached => {
            let value = scan_fn(&out.theta);
            let loss_value = out.constraint_values.first().copied().unwrap_or(f64::NAN);
            let point =
                ProfilePoint::new(value, loss_value, out.theta, PointStatus::Converged, call_count);
            SearchOutcome::new(
                Some(value),
                vec![point],
                EndpointStatus::BorderFoundByScanTol,
                call_count,
            )
        }
        ReturnCode::ForcedStop if out_of_bound.get() => {
            SearchOutcome::new(None, Vec::new(), EndpointStatus::ScanBoundReached, call_count)
        }
        ReturnCode::ForcedStop => {
            SearchOutcome::new(None, Vec::new(), EndpointStatus::LossErrorStop, call_count)
        }
        ReturnCode::MaxEvalReached => {
            SearchOutcome::new(None, Vec::new(), EndpointStatus::MaxIterStop, call_count)
        }
        ReturnCode::Failure => {
            return Err(ProfileError::UnexpectedReturnCode {
                code: out.code.code(),
                context: "CICO_ONE_PASS",
                text: out.error.map(|e| e.to_string()).unwrap_or_default(),
            });
        }
    };
    debug!("CICO_ONE_PASS: stopped with {} after {call_count} loss calls", result.status);
    Ok(result)
}
