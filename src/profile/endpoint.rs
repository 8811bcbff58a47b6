//! profile::endpoint — one-sided confidence endpoint of a single parameter.
//!
//! Purpose
//! -------
//! Turn a request in natural units ("how far left/right can `θ_k` move before
//! the loss crosses `loss_crit`?") into a right-endpoint search in scan space,
//! run the selected strategy, and map the answer back.
//!
//! Key behaviors
//! -------------
//! - [`get_endpoint`] validates the whole request before any search, then:
//!   - scales every coordinate by its [`Scale`] mode;
//!   - negates the scanned coordinate (and swaps its bounds) for left
//!     searches;
//!   - offsets the loss by `loss_crit` so the boundary is `loss = 0`;
//!   - dispatches through [`get_right_endpoint`];
//!   - maps the value, every profile point and its loss back to natural
//!     units.
//! - `EndPoint::supreme` records the smallest natural loss returned by any
//!   successful evaluation during the search.
//!
//! Invariants & assumptions
//! ------------------------
//! - The validation order is fixed (see `profile::core::validation`), so a
//!   request with several problems always reports the same error.
//! - Non-finite loss values are reported to the strategies as evaluation
//!   failures and never reach `supreme`.
//!
//! Downstream usage
//! ----------------
//! - `profile::interval::get_interval` calls [`get_endpoint`] once per
//!   direction.
//!
//! Testing notes
//! -------------
//! - Unit tests cover direction symmetry, log scaling, `supreme` and the
//!   validation order; multi-parameter scenarios live in the integration
//!   tests.
use log::debug;
use std::cell::Cell;

use crate::{
    optimization::{
        errors::OptResult,
        local_optimizer::{Bounds, Theta},
    },
    profile::{
        core::{
            options::{EndpointConfig, LossFunction, SearchOptions},
            points::{Direction, EndPoint, Method, ProfilePoint, SearchOutcome},
            profile_fn::finite_loss,
            scaling::{Scale, flip},
            validation::{
                check_initial_loss, default_scan_bound, resolve_bounds, resolve_scales,
                validate_bounds, validate_scan_bound, validate_theta,
            },
        },
        errors::ProfileResult,
        methods::RightEndpointProblem,
    },
};

/// get_endpoint — confidence endpoint of `theta_init[theta_num]` in one
/// direction.
///
/// Parameters
/// ----------
/// - `theta_init`: start point, strictly inside the bounds with
///   `loss(theta_init) < loss_crit`.
/// - `theta_num`: scanned coordinate (0-based).
/// - `loss`: loss in natural units.
/// - `method`: search strategy.
/// - `direction`: which side of `theta_init[theta_num]` to search.
/// - `config`: critical level, optional scales / bounds / scan bound, and
///   the search options.
///
/// Returns
/// -------
/// `ProfileResult<EndPoint>` in natural units. Loss errors and budget
/// exhaustion are reported through `EndPoint::status`.
///
/// Errors
/// ------
/// - Any validation failure, raised before the loss is searched.
/// - `UnexpectedReturnCode` when the optimizer ends in an unclassified
///   state.
pub fn get_endpoint<L: LossFunction + ?Sized>(
    theta_init: &Theta, theta_num: usize, loss: &L, method: Method, direction: Direction,
    config: &EndpointConfig,
) -> ProfileResult<EndPoint> {
    let n = theta_init.len();
    let scales = resolve_scales(config.scale.as_deref(), n)?;
    let bounds = resolve_bounds(config.theta_bounds.as_ref(), &scales)?;
    validate_theta(theta_init, theta_num)?;
    validate_bounds(theta_init, &bounds, &scales)?;
    let scale_k = scales[theta_num];
    let scan_bound =
        config.scan_bound.unwrap_or_else(|| default_scan_bound(scale_k, direction));
    validate_scan_bound(theta_init[theta_num], scan_bound, bounds[theta_num], direction)?;
    check_initial_loss(loss, theta_init, config.loss_crit)?;

    let loss_crit = config.loss_crit;
    let supreme: Cell<Option<f64>> = Cell::new(None);
    let scan_loss = |theta_gd: &Theta| -> OptResult<f64> {
        let theta = to_natural(theta_gd, &scales, theta_num, direction);
        let value = finite_loss(loss, &theta)?;
        supreme.set(Some(supreme.get().map_or(value, |s| s.min(value))));
        Ok(value - loss_crit)
    };

    let problem = RightEndpointProblem::new(
        to_scan(theta_init, &scales, theta_num, direction),
        theta_num,
        &scan_loss,
        scan_bounds(&bounds, &scales, theta_num, direction),
        flip(scale_k.scale(scan_bound), direction),
    )?;
    let outcome = get_right_endpoint(&problem, method, &config.search)?;

    let SearchOutcome { value, profile_points, status, call_count } = outcome;
    let value = scale_k.unscale_opt(value.map(|v| flip(v, direction)));
    let profile_points = profile_points
        .into_iter()
        .map(|p| {
            ProfilePoint::new(
                scale_k.unscale(flip(p.value, direction)),
                p.loss + loss_crit,
                to_natural(&p.params, &scales, theta_num, direction),
                p.status,
                p.call_count,
            )
        })
        .collect();
    debug!("get_endpoint: theta_num = {theta_num}, {direction} {method}: {status}, {value:?}");

    Ok(EndPoint { value, profile_points, status, direction, call_count, supreme: supreme.get() })
}

/// get_right_endpoint — run `method` on a problem already expressed in scan
/// space with the loss offset by `loss_crit`.
///
/// `options` is validated first, so invalid search options fail with an
/// error before the loss is called.
pub fn get_right_endpoint(
    problem: &RightEndpointProblem<'_>, method: Method, options: &SearchOptions,
) -> ProfileResult<SearchOutcome> {
    options.validate()?;
    debug!(
        "get_right_endpoint: {method} on theta_num = {}, scan_bound = {:.6e}",
        problem.theta_num, problem.scan_bound
    );
    method.search_strategy().search(problem, options)
}

// ---- Helper Methods ----

fn to_scan(theta: &Theta, scales: &[Scale], theta_num: usize, direction: Direction) -> Theta {
    theta
        .iter()
        .zip(scales)
        .enumerate()
        .map(|(i, (&v, s))| {
            let g = s.scale(v);
            if i == theta_num { flip(g, direction) } else { g }
        })
        .collect()
}

fn to_natural(theta_gd: &Theta, scales: &[Scale], theta_num: usize, direction: Direction) -> Theta {
    theta_gd
        .iter()
        .zip(scales)
        .enumerate()
        .map(|(i, (&g, s))| {
            let g = if i == theta_num { flip(g, direction) } else { g };
            s.unscale(g)
        })
        .collect()
}

fn scan_bounds(
    bounds: &Bounds, scales: &[Scale], theta_num: usize, direction: Direction,
) -> Bounds {
    let mut out: Bounds =
        bounds.iter().zip(scales).map(|(&(lo, hi), s)| (s.scale(lo), s.scale(hi))).collect();
    if direction == Direction::Left {
        let (lo, hi) = out[theta_num];
        out[theta_num] = (-hi, -lo);
    }
    out
}
