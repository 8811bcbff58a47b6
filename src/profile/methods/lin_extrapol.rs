//! methods::lin_extrapol — secant-extrapolation search (`LIN_EXTRAPOL`).
//!
//! The next trial is the root of the line through the two most recent
//! profile points. The first step, and any step where the secant slope is not
//! strictly positive and finite, is the fixed step `scan_hini`.
use crate::profile::{
    core::{
        options::SearchOptions,
        points::{Method, ProfilePoint, SearchOutcome},
    },
    errors::ProfileResult,
    methods::{
        EndpointSearch, RightEndpointProblem,
        extrapolation::{History, fixed_step, run_extrapolation},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LinExtrapol;

impl EndpointSearch for LinExtrapol {
    fn method(&self) -> Method {
        Method::LinExtrapol
    }

    fn search(
        &self, problem: &RightEndpointProblem<'_>, options: &SearchOptions,
    ) -> ProfileResult<SearchOutcome> {
        run_extrapolation(problem, options, Method::LinExtrapol, next_value)
    }
}

/// Secant step through the latest history point and `current`.
pub fn next_value(history: &History, current: &ProfilePoint, scan_hini: f64) -> f64 {
    match history.latest() {
        None => fixed_step(current, scan_hini),
        Some(prev) => secant_step(prev, current, scan_hini),
    }
}

pub(crate) fn secant_step(prev: &ProfilePoint, current: &ProfilePoint, scan_hini: f64) -> f64 {
    let dx = current.value - prev.value;
    let dl = current.loss - prev.loss;
    let slope = dl / dx;
    if !(slope > 0.0 && slope.is_finite()) {
        return fixed_step(current, scan_hini);
    }
    let next = current.value - dx * current.loss / dl;
    if next.is_finite() { next } else { fixed_step(current, scan_hini) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        optimization::{
            errors::{OptError, OptResult},
            local_optimizer::Theta,
        },
        profile::core::points::{EndpointStatus, PointStatus},
    };
    use ndarray::array;
    use std::cell::Cell;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The secant rule and its fixed-step fallbacks.
    // - Full right-endpoint searches on one- and two-dimensional quadratics
    //   with known roots, including scan-bound, budget and loss-error stops.
    // -------------------------------------------------------------------------

    fn pt(value: f64, loss: f64) -> ProfilePoint {
        ProfilePoint::new(value, loss, array![value], PointStatus::Converged, 1)
    }

    fn unbounded(n: usize) -> Vec<(f64, f64)> {
        vec![(f64::NEG_INFINITY, f64::INFINITY); n]
    }

    #[test]
    // Purpose
    // -------
    // Verify the secant root and the fallbacks.
    //
    // Expect
    // ------
    // - Points `(0, -2)` and `(1, -1)` extrapolate to `2`.
    // - A falling or flat curve, or no history, steps by `scan_hini`.
    fn next_value_secant_and_fallbacks() {
        let h = History::OnePoint(pt(0.0, -2.0));
        assert_eq!(next_value(&h, &pt(1.0, -1.0), 0.5), 2.0);
        assert_eq!(next_value(&h, &pt(1.0, -3.0), 0.5), 1.5);
        assert_eq!(next_value(&History::NoHistory, &pt(1.0, -1.0), 0.5), 1.5);
        let dup = History::OnePoint(pt(1.0, -2.0));
        assert_eq!(next_value(&dup, &pt(1.0, -1.0), 0.5), 1.5);
    }

    #[test]
    // Purpose
    // -------
    // Ensure that the search converges to the analytic root of a
    // one-dimensional parabola.
    //
    // Given
    // -----
    // - Offset loss `(x-3)² - 4` from `x = 3`, root at `x = 5`.
    //
    // Expect
    // ------
    // - `BORDER_FOUND_BY_SCAN_TOL` within `2e-3` of 5 and one call per point.
    fn lin_extrapol_finds_parabola_root() {
        // Arrange
        let loss = |t: &Theta| -> OptResult<f64> { Ok((t[0] - 3.0).powi(2) - 4.0) };
        let problem =
            RightEndpointProblem::new(array![3.0], 0, &loss, unbounded(1), 9.0).expect("valid");

        // Act
        let out = LinExtrapol.search(&problem, &SearchOptions::default()).expect("search runs");

        // Assert
        assert_eq!(out.status, EndpointStatus::BorderFoundByScanTol);
        let value = out.value.expect("border found");
        assert!((value - 5.0).abs() < 2e-3, "value = {value}");
        assert_eq!(out.call_count, out.profile_points.len());
    }

    #[test]
    // Purpose
    // -------
    // Verify that a loss that stays below zero ends at the scan bound.
    fn lin_extrapol_reaches_scan_bound() {
        let loss = |_: &Theta| -> OptResult<f64> { Ok(-1.0) };
        let problem =
            RightEndpointProblem::new(array![0.0], 0, &loss, unbounded(1), 3.0).expect("valid");

        let out = LinExtrapol.search(&problem, &SearchOptions::default()).expect("search runs");

        assert_eq!(out.status, EndpointStatus::ScanBoundReached);
        assert_eq!(out.value, None);
        assert_eq!(out.profile_points.last().map(|p| p.value), Some(3.0));
    }

    #[test]
    // Purpose
    // -------
    // Check budget and loss-error stops.
    //
    // Expect
    // ------
    // - `max_iter = 2` on a flat loss: `MAX_ITER_STOP`, two points.
    // - A loss failing on its second call: `LOSS_ERROR_STOP`.
    fn lin_extrapol_budget_and_loss_error() {
        // Arrange
        let flat = |_: &Theta| -> OptResult<f64> { Ok(-1.0) };
        let calls = Cell::new(0usize);
        let failing = |t: &Theta| -> OptResult<f64> {
            calls.set(calls.get() + 1);
            if calls.get() == 2 {
                return Err(OptError::LossEvaluation { text: "bad".to_string() });
            }
            Ok(t[0] - 10.0)
        };
        let opts = SearchOptions { max_iter: 2, ..SearchOptions::default() };
        let p_flat =
            RightEndpointProblem::new(array![0.0], 0, &flat, unbounded(1), 8.0).expect("valid");
        let p_fail =
            RightEndpointProblem::new(array![0.0], 0, &failing, unbounded(1), 8.0).expect("valid");

        // Act
        let budget = LinExtrapol.search(&p_flat, &opts).expect("search runs");
        let failed = LinExtrapol.search(&p_fail, &SearchOptions::default()).expect("search runs");

        // Assert
        assert_eq!(budget.status, EndpointStatus::MaxIterStop);
        assert_eq!(budget.value, None);
        assert_eq!(budget.profile_points.len(), 2);
        assert_eq!(failed.status, EndpointStatus::LossErrorStop);
        assert_eq!(failed.value, None);
        assert_eq!(failed.call_count, 2);
    }

    #[test]
    // Purpose
    // -------
    // Ensure that the nested profile optimization is used for multi-parameter
    // losses.
    //
    // Given
    // -----
    // - Offset loss `(x0-3)² + (x0-x1-1)² - 4` from `[3, 2]`; the profile of
    //   `x0` is `(x0-3)² - 4` with root 5.
    //
    // Expect
    // ------
    // - A border within `1e-2` of 5, all points `Converged`.
    fn lin_extrapol_profiles_two_parameter_loss() {
        // Arrange
        let loss = |t: &Theta| -> OptResult<f64> {
            Ok((t[0] - 3.0).powi(2) + (t[0] - t[1] - 1.0).powi(2) - 4.0)
        };
        let problem =
            RightEndpointProblem::new(array![3.0, 2.0], 0, &loss, unbounded(2), 9.0).expect("valid");
        let opts = SearchOptions { ftol_abs: 1e-10, ..SearchOptions::default() };

        // Act
        let out = LinExtrapol.search(&problem, &opts).expect("search runs");

        // Assert
        assert!(out.status.is_border_found(), "status = {}", out.status);
        let value = out.value.expect("border found");
        assert!((value - 5.0).abs() < 1e-2, "value = {value}");
        assert!(out.profile_points.iter().all(|p| p.status == PointStatus::Converged));
    }
}
