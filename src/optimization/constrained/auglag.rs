//! constrained::auglag — augmented-Lagrangian outer loop around
//! [`minimize_bounded`].
//!
//! Each outer iteration minimizes
//!
//! ```text
//! L(θ; μ, ρ) = f(θ) + ρ/2 · Σᵢ max(0, gᵢ(θ) + μᵢ/ρ)²
//! ```
//!
//! over the bound box, then updates `μᵢ ← max(0, μᵢ + ρ gᵢ)` and multiplies
//! `ρ` by ten whenever the infeasibility measure failed to halve. The run
//! converges once the iterate is feasible and the objective moved by less
//! than `ftol_abs`.
//!
//! The evaluation budget covers every call of `f` together with the
//! constraints, including the re-evaluation after each sub-problem. Only
//! that budget yields `MaxEvalReached`; running out of outer iterations is a
//! `Failure`.
use log::trace;

use crate::optimization::{
    constrained::types::{AugLagOptions, ConstrainedOutcome, ConstrainedProblem},
    errors::{OptError, OptResult},
    local_optimizer::{
        ReturnCode, Theta, minimize_bounded, validation::project_onto_bounds,
    },
};

const RHO_MIN: f64 = 1e-6;
const RHO_MAX_INIT: f64 = 10.0;
const RHO_GROWTH: f64 = 10.0;
const ICM_FACTOR: f64 = 0.5;

pub fn minimize_constrained(
    problem: &ConstrainedProblem<'_>, theta0: &Theta, opts: &AugLagOptions,
) -> OptResult<ConstrainedOutcome> {
    problem.validate(theta0)?;
    let m = problem.constraints.len();
    let mut x = project_onto_bounds(theta0, &problem.bounds);
    let mut used = 0usize;

    if opts.max_evals == 0 {
        return Ok(outcome(x, f64::NAN, vec![f64::NAN; m], ReturnCode::MaxEvalReached, 0, None));
    }

    used += 1;
    let (mut f_cur, mut g_cur) = match problem.evaluate(&x) {
        Ok(v) => v,
        Err(e) => return stopped(e, x, m, used),
    };

    let mut mu = vec![0.0_f64; m];
    let con2: f64 = g_cur.iter().filter(|&&g| g > 0.0).map(|g| g * g).sum();
    let mut rho = if con2 > 0.0 && f_cur.is_finite() {
        (2.0 * f_cur.abs() / con2).clamp(RHO_MIN, RHO_MAX_INIT)
    } else {
        1.0
    };
    let mut prev_icm = f64::INFINITY;

    for outer in 0..opts.max_outer {
        let remaining = opts.max_evals.saturating_sub(used);
        if remaining == 0 {
            return Ok(outcome(x, f_cur, g_cur, ReturnCode::MaxEvalReached, used, None));
        }

        let penalized = |theta: &Theta| -> OptResult<f64> {
            let (f, g) = problem.evaluate(theta)?;
            let penalty: f64 =
                g.iter().zip(mu.iter()).map(|(&gi, &mi)| (gi + mi / rho).max(0.0).powi(2)).sum();
            Ok(f + 0.5 * rho * penalty)
        };
        let local = minimize_bounded(
            &penalized,
            &x,
            &problem.bounds,
            opts.local_ftol,
            &opts.local,
            remaining,
        )?;
        used += local.evals;
        match local.code {
            ReturnCode::ForcedStop => {
                let err = local.error.unwrap_or(OptError::ForcedStop {
                    reason: "sub-problem stopped".to_string(),
                });
                return stopped(err, local.theta, m, used);
            }
            ReturnCode::MaxEvalReached => {
                return Ok(outcome(local.theta, f_cur, g_cur, ReturnCode::MaxEvalReached, used, None));
            }
            ReturnCode::Failure => {
                return Ok(outcome(local.theta, f_cur, g_cur, ReturnCode::Failure, used, local.error));
            }
            ReturnCode::Success | ReturnCode::FtolReached => {}
        }
        x = local.theta;

        if used >= opts.max_evals {
            return Ok(outcome(x, f_cur, g_cur, ReturnCode::MaxEvalReached, used, None));
        }
        used += 1;
        let (f_new, g_new) = match problem.evaluate(&x) {
            Ok(v) => v,
            Err(e) => return stopped(e, x, m, used),
        };

        let mut icm = 0.0_f64;
        for (mi, &gi) in mu.iter_mut().zip(g_new.iter()) {
            icm = icm.max(gi.max(-*mi / rho).abs());
            *mi = (*mi + rho * gi).max(0.0);
        }
        if icm > ICM_FACTOR * prev_icm {
            rho *= RHO_GROWTH;
        }
        prev_icm = icm;

        let feasible = problem.is_feasible(&g_new);
        trace!(
            "auglag outer {outer}: f = {f_new:.6e}, icm = {icm:.3e}, rho = {rho:.1e}, feasible = {feasible}, evals = {used}"
        );
        if feasible && (f_new - f_cur).abs() < opts.ftol_abs {
            return Ok(outcome(x, f_new, g_new, ReturnCode::FtolReached, used, None));
        }
        f_cur = f_new;
        g_cur = g_new;
    }
    let err = OptError::BackendError {
        text: format!("outer iteration limit reached ({} iterations)", opts.max_outer),
    };
    Ok(outcome(x, f_cur, g_cur, ReturnCode::Failure, used, Some(err)))
}

// ---- Helper Methods ----

fn outcome(
    theta: Theta, value: f64, constraint_values: Vec<f64>, code: ReturnCode, evals: usize,
    error: Option<OptError>,
) -> ConstrainedOutcome {
    ConstrainedOutcome { theta, value, constraint_values, code, evals, error }
}

/// Outcome for a run halted by an objective or constraint error. Backend
/// errors raised outside an evaluation are surfaced as `Failure`.
fn stopped(err: OptError, theta: Theta, m: usize, evals: usize) -> OptResult<ConstrainedOutcome> {
    let code =
        if err.is_evaluation_failure() { ReturnCode::ForcedStop } else { ReturnCode::Failure };
    Ok(outcome(theta, f64::NAN, vec![f64::NAN; m], code, evals, Some(err)))
}
