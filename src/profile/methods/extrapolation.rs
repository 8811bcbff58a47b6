//! methods::extrapolation — iteration skeleton shared by the secant and
//! quadratic searches.
//!
//! Each iteration evaluates the profile at the current trial `x` (warm
//! started from the previous optimum), classifies the new point, and
//! otherwise proposes the next trial
//!
//! ```text
//! x_next = min(x + scan_hmax, proposal(history, point), upper_bound)
//! ```
//!
//! Stop conditions, checked in this order on every new point:
//!
//! 1. remaining budget is zero before the call → `MAX_ITER_STOP`;
//! 2. point status `MaxEvalReached` → `MAX_ITER_STOP`;
//! 3. point status `LossError` → `LOSS_ERROR_STOP`;
//! 4. `x ≥ scan_bound` with `loss < 0` → `SCAN_BOUND_REACHED`;
//! 5. the secant crossing estimate through the previous point lies within
//!    `scan_tol` of `x` → `BORDER_FOUND_BY_SCAN_TOL` at `x`;
//! 6. `|loss| ≤ loss_tol` → `BORDER_FOUND_BY_LOSS_TOL` at `x`.
use log::debug;

use crate::profile::{
    core::{
        options::SearchOptions,
        points::{EndpointStatus, Method, PointStatus, ProfilePoint, SearchOutcome},
        profile_fn::make_profile,
    },
    errors::ProfileResult,
    methods::{RightEndpointProblem, warn_near_zero_start},
};

/// Points available to the stepping rule, most recent last.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum History {
    #[default]
    NoHistory,
    OnePoint(ProfilePoint),
    TwoOrMorePoints { prev2: ProfilePoint, prev1: ProfilePoint },
}

impl History {
    pub fn latest(&self) -> Option<&ProfilePoint> {
        match self {
            History::NoHistory => None,
            History::OnePoint(p) => Some(p),
            History::TwoOrMorePoints { prev1, .. } => Some(prev1),
        }
    }

    /// Shift `point` in as the most recent entry.
    pub fn push(self, point: ProfilePoint) -> Self {
        match self {
            History::NoHistory => History::OnePoint(point),
            History::OnePoint(p) => History::TwoOrMorePoints { prev2: p, prev1: point },
            History::TwoOrMorePoints { prev1, .. } => {
                History::TwoOrMorePoints { prev2: prev1, prev1: point }
            }
        }
    }
}

/// Accumulator threaded through the search loop.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchState {
    pub call_count: usize,
    pub points: Vec<ProfilePoint>,
    pub history: History,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remaining(&self, max_iter: usize) -> usize {
        max_iter.saturating_sub(self.call_count)
    }

    /// Count and store `point` without touching the stepping history.
    pub fn record(mut self, point: &ProfilePoint) -> Self {
        self.call_count += point.call_count;
        self.points.push(point.clone());
        self
    }

    pub fn advance(mut self, point: ProfilePoint) -> Self {
        self.history = self.history.push(point);
        self
    }

    pub fn finish(self, value: Option<f64>, status: EndpointStatus) -> SearchOutcome {
        SearchOutcome::new(value, self.points, status, self.call_count)
    }
}

/// Proposal for the next trial value given the history before `current`.
pub type StepRule = fn(&History, &ProfilePoint, f64) -> f64;

/// Run the extrapolation loop with stepping rule `propose`.
pub fn run_extrapolation(
    problem: &RightEndpointProblem<'_>, options: &SearchOptions, method: Method,
    propose: StepRule,
) -> ProfileResult<SearchOutcome> {
    let k = problem.theta_num;
    warn_near_zero_start(&problem.theta_init, options, method);
    let loss_tol = options.loss_tol_for(method);
    let profile = make_profile(
        &problem.theta_init,
        k,
        problem.loss,
        &problem.theta_bounds,
        &options.local,
        options.ftol_abs,
        false,
    )?;
    let upper = problem.scan_upper();

    let mut x = problem.theta_init[k];
    let mut start = problem.theta_init.clone();
    let mut state = SearchState::new();
    loop {
        let remaining = state.remaining(options.max_iter);
        if remaining == 0 {
            debug!("{method}: budget of {} loss calls exhausted", options.max_iter);
            return Ok(state.finish(None, EndpointStatus::MaxIterStop));
        }
        let point = profile.eval(x, Some(&start), remaining)?;
        state = state.record(&point);
        debug!(
            "{method}: x = {x:.6e}, loss = {:.6e}, status = {}, calls = {}",
            point.loss, point.status, state.call_count
        );

        if let Some((value, status)) = classify(
            &point,
            state.history.latest(),
            problem.scan_bound,
            options.scan_tol,
            loss_tol,
        ) {
            debug!("{method}: stopped with {status} after {} loss calls", state.call_count);
            return Ok(state.finish(value, status));
        }

        let proposal = propose(&state.history, &point, options.scan_hini);
        let next = (x + options.scan_hmax).min(proposal).min(upper);
        start = point.params.clone();
        state = state.advance(point);
        x = next;
    }
}

// ---- Helper Methods ----

fn classify(
    point: &ProfilePoint, previous: Option<&ProfilePoint>, scan_bound: f64, scan_tol: f64,
    loss_tol: f64,
) -> Option<(Option<f64>, EndpointStatus)> {
    match point.status {
        PointStatus::MaxEvalReached => return Some((None, EndpointStatus::MaxIterStop)),
        PointStatus::LossError => return Some((None, EndpointStatus::LossErrorStop)),
        PointStatus::Converged | PointStatus::Skipped => {}
    }
    if point.value >= scan_bound && point.loss < 0.0 {
        return Some((None, EndpointStatus::ScanBoundReached));
    }
    if let Some(prev) = previous {
        if point.loss != prev.loss {
            let distance = (point.value - prev.value) * point.loss / (point.loss - prev.loss);
            if distance.abs() <= scan_tol {
                return Some((Some(point.value), EndpointStatus::BorderFoundByScanTol));
            }
        }
    }
    if point.loss.abs() <= loss_tol {
        return Some((Some(point.value), EndpointStatus::BorderFoundByLossTol));
    }
    None
}

/// Fixed forward step used when no extrapolation is trustworthy.
pub(crate) fn fixed_step(current: &ProfilePoint, scan_hini: f64) -> f64 {
    current.value + scan_hini
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - History shifting and the state accumulator.
    // - Each branch of the stop classification.
    //
    // They intentionally DO NOT cover:
    // - Full searches (see `lin_extrapol` and `quadr_extrapol`).
    // -------------------------------------------------------------------------

    fn pt(value: f64, loss: f64, status: PointStatus) -> ProfilePoint {
        ProfilePoint::new(value, loss, array![value], status, 2)
    }

    #[test]
    // Purpose
    // -------
    // Verify that history keeps at most the two most recent points.
    fn history_push_shifts_points() {
        let h = History::NoHistory;
        assert_eq!(h.latest(), None);
        let h = h.push(pt(1.0, -1.0, PointStatus::Converged));
        assert_eq!(h.latest().map(|p| p.value), Some(1.0));
        let h = h.push(pt(2.0, -0.5, PointStatus::Converged));
        let h = h.push(pt(3.0, 0.5, PointStatus::Converged));
        match h {
            History::TwoOrMorePoints { prev2, prev1 } => {
                assert_eq!(prev2.value, 2.0);
                assert_eq!(prev1.value, 3.0);
            }
            other => panic!("unexpected history {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Check that recording accumulates calls and points in order.
    fn search_state_record_accumulates() {
        let state = SearchState::new()
            .record(&pt(0.0, -1.0, PointStatus::Converged))
            .record(&pt(1.0, -0.5, PointStatus::Converged));
        assert_eq!(state.call_count, 4);
        assert_eq!(state.remaining(5), 1);
        assert_eq!(state.remaining(3), 0);
        let out = state.finish(None, EndpointStatus::MaxIterStop);
        assert_eq!(out.profile_points.len(), 2);
        assert_eq!(out.profile_points[1].value, 1.0);
    }

    #[test]
    // Purpose
    // -------
    // Exercise each stop condition of `classify`.
    //
    // Expect
    // ------
    // - Point statuses take precedence over geometric checks.
    // - Crossing within `scan_tol` reports the current value.
    fn classify_stop_conditions() {
        let prev = pt(1.0, -1.0, PointStatus::Converged);
        assert_eq!(
            classify(&pt(2.0, 0.0, PointStatus::MaxEvalReached), Some(&prev), 9.0, 1e-3, 0.0),
            Some((None, EndpointStatus::MaxIterStop))
        );
        assert_eq!(
            classify(&pt(2.0, 0.0, PointStatus::LossError), Some(&prev), 9.0, 1e-3, 0.0),
            Some((None, EndpointStatus::LossErrorStop))
        );
        assert_eq!(
            classify(&pt(9.5, -0.5, PointStatus::Converged), Some(&prev), 9.0, 1e-3, 0.0),
            Some((None, EndpointStatus::ScanBoundReached))
        );
        assert_eq!(
            classify(&pt(2.0, 1e-5, PointStatus::Converged), Some(&prev), 9.0, 1e-3, 0.0),
            Some((Some(2.0), EndpointStatus::BorderFoundByScanTol))
        );
        assert_eq!(
            classify(&pt(2.0, 1e-5, PointStatus::Converged), None, 9.0, 1e-3, 1e-4),
            Some((Some(2.0), EndpointStatus::BorderFoundByLossTol))
        );
        assert_eq!(
            classify(&pt(2.0, -0.5, PointStatus::Converged), Some(&prev), 9.0, 1e-3, 0.0),
            None
        );
    }
}
