//! profile::core::profile_fn — the profile function `p(x) = min Λ(θ | θ_k = x)`.
//!
//! Purpose
//! -------
//! Build, for a fixed scanned coordinate `k`, a callable that minimizes the
//! loss over all remaining coordinates with `θ_k` pinned to a given value,
//! and reports the optimum as a [`ProfilePoint`].
//!
//! Key behaviors
//! -------------
//! - For one-dimensional problems, or when optimization is skipped, the loss
//!   is evaluated once at the pinned vector (`Skipped`, `call_count = 1`).
//! - Otherwise the reduced problem (dimension `n - 1`) is handed to
//!   [`minimize_bounded`] with the bounds of the remaining coordinates and at
//!   most `max_evals` loss calls. Each call restarts from the override start
//!   point, or `theta_init` when none is given.
//! - Optimizer codes map to point statuses: converged → `Converged`, budget →
//!   `MaxEvalReached`, objective failure → `LossError`. Any other code is a
//!   [`ProfileError::UnexpectedReturnCode`].
//!
//! Invariants & assumptions
//! ------------------------
//! - `call_count` includes the failing call when the loss raises.
//! - On budget exhaustion or a loss error the point carries the best vector
//!   evaluated so far (`loss = NaN` when none succeeded).
//! - `max_evals == 0` returns `MaxEvalReached` without calling the loss.
//!
//! Conventions
//! -----------
//! - Works in whatever coordinates it is given; scaling happens upstream in
//!   `profile::endpoint`.
use crate::{
    optimization::{
        errors::{OptError, OptResult},
        local_optimizer::{Bounds, LocalOptions, ReturnCode, Theta, minimize_bounded},
    },
    profile::{
        core::{
            options::LossFunction,
            points::{PointStatus, ProfilePoint},
        },
        errors::{ProfileError, ProfileResult},
    },
};
use ndarray::{Array1, s};

/// Callable profile of one coordinate; see [`make_profile`].
pub struct ProfileFn<'a, L: LossFunction + ?Sized> {
    theta_init: Theta,
    theta_num: usize,
    loss: &'a L,
    rest_bounds: Bounds,
    local: LocalOptions,
    ftol_abs: f64,
    skip_optim: bool,
}

/// make_profile — build the profile function of coordinate `theta_num`.
///
/// Parameters
/// ----------
/// - `theta_init`: default start point of the inner optimizations.
/// - `theta_num`: scanned coordinate (0-based).
/// - `loss`: loss to profile.
/// - `theta_bounds`: bounds of every coordinate; the scanned one is ignored.
/// - `local` / `ftol_abs`: inner solver and its absolute tolerance.
/// - `skip_optim`: evaluate the loss directly instead of optimizing.
///
/// Errors
/// ------
/// - `ThetaNumOutOfRange` / `LengthMismatch` for inconsistent shapes.
pub fn make_profile<'a, L: LossFunction + ?Sized>(
    theta_init: &Theta, theta_num: usize, loss: &'a L, theta_bounds: &Bounds,
    local: &LocalOptions, ftol_abs: f64, skip_optim: bool,
) -> ProfileResult<ProfileFn<'a, L>> {
    let n = theta_init.len();
    if theta_num >= n {
        return Err(ProfileError::ThetaNumOutOfRange { theta_num, len: n });
    }
    if theta_bounds.len() != n {
        return Err(ProfileError::LengthMismatch {
            what: "theta_bounds",
            expected: n,
            actual: theta_bounds.len(),
        });
    }
    let rest_bounds = theta_bounds
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != theta_num)
        .map(|(_, &b)| b)
        .collect();
    Ok(ProfileFn {
        theta_init: theta_init.clone(),
        theta_num,
        loss,
        rest_bounds,
        local: local.clone(),
        ftol_abs,
        skip_optim,
    })
}

impl<'a, L: LossFunction + ?Sized> ProfileFn<'a, L> {
    pub fn is_skipping(&self) -> bool {
        self.skip_optim || self.theta_init.len() == 1
    }

    /// Evaluate the profile at `x`.
    ///
    /// `theta_init_override` replaces the default start point (warm start);
    /// its scanned component is ignored.
    pub fn eval(
        &self, x: f64, theta_init_override: Option<&Theta>, max_evals: usize,
    ) -> ProfileResult<ProfilePoint> {
        let start = theta_init_override.unwrap_or(&self.theta_init);
        if start.len() != self.theta_init.len() {
            return Err(ProfileError::LengthMismatch {
                what: "theta_init_override",
                expected: self.theta_init.len(),
                actual: start.len(),
            });
        }
        if max_evals == 0 {
            let params = self.pin(start, x);
            return Ok(ProfilePoint::new(x, f64::NAN, params, PointStatus::MaxEvalReached, 0));
        }
        if self.is_skipping() {
            return Ok(self.eval_direct(x, start));
        }

        let k = self.theta_num;
        let rest_start = drop_coordinate(start, k);
        let objective = |rest: &Theta| -> OptResult<f64> {
            let full = insert_coordinate(rest, k, x);
            finite_loss(self.loss, &full)
        };
        let out = minimize_bounded(
            &objective,
            &rest_start,
            &self.rest_bounds,
            self.ftol_abs,
            &self.local,
            max_evals,
        )?;

        let status = match out.code {
            ReturnCode::Success | ReturnCode::FtolReached => PointStatus::Converged,
            ReturnCode::MaxEvalReached => PointStatus::MaxEvalReached,
            ReturnCode::ForcedStop => PointStatus::LossError,
            ReturnCode::Failure => {
                return Err(ProfileError::UnexpectedReturnCode {
                    code: out.code.code(),
                    context: "profile",
                    text: out.error.map(|e| e.to_string()).unwrap_or_default(),
                });
            }
        };
        let params = insert_coordinate(&out.theta, k, x);
        Ok(ProfilePoint::new(x, out.value, params, status, out.evals))
    }

    fn eval_direct(&self, x: f64, start: &Theta) -> ProfilePoint {
        let params = self.pin(start, x);
        match finite_loss(self.loss, &params) {
            Ok(loss) => ProfilePoint::new(x, loss, params, PointStatus::Skipped, 1),
            Err(_) => ProfilePoint::new(x, f64::NAN, params, PointStatus::LossError, 1),
        }
    }

    fn pin(&self, start: &Theta, x: f64) -> Theta {
        let mut params = start.clone();
        params[self.theta_num] = x;
        params
    }
}

// ---- Helper Methods ----

/// Loss value, with non-finite results reported as an evaluation failure.
pub(crate) fn finite_loss<L: LossFunction + ?Sized>(loss: &L, theta: &Theta) -> OptResult<f64> {
    let value = loss.loss(theta)?;
    if !value.is_finite() {
        return Err(OptError::NonFiniteCost { value });
    }
    Ok(value)
}

fn drop_coordinate(theta: &Theta, k: usize) -> Theta {
    theta.iter().enumerate().filter(|&(i, _)| i != k).map(|(_, &v)| v).collect()
}

fn insert_coordinate(rest: &Theta, k: usize, x: f64) -> Theta {
    let mut full = Array1::zeros(rest.len() + 1);
    full.slice_mut(s![..k]).assign(&rest.slice(s![..k]));
    full[k] = x;
    full.slice_mut(s![k + 1..]).assign(&rest.slice(s![k..]));
    full
}
