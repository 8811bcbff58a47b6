//! Adapter that exposes a bounded, budgeted [`Objective`] as an `argmin` problem.
//!
//! Every cost call is projected onto the bound box, counted against a shared
//! [`EvalTracker`], and checked for finiteness. The tracker outlives the
//! `argmin` executor, so the best point and the number of evaluations stay
//! available even when the run ends in an error (loss failure, budget
//! exhaustion, caller stop). If an analytic gradient is not provided, the
//! **cost** closure is finite-differenced, and those evaluations count
//! against the budget too.
use std::cell::{Cell, RefCell};

use crate::optimization::{
    errors::{OptError, OptResult},
    local_optimizer::{
        finite_diff::forward_gradient,
        traits::Objective,
        types::{Bounds, Cost, Grad, Theta},
        validation::{project_onto_bounds, validate_grad},
    },
};
use argmin::core::{CostFunction, Error, Gradient};
use finitediff::FiniteDiff;

/// Shared evaluation counter and best-point memory for one bounded run.
#[derive(Debug)]
pub struct EvalTracker {
    max_evals: usize,
    used: Cell<usize>,
    best: RefCell<Option<(Theta, Cost)>>,
}

impl EvalTracker {
    pub fn new(max_evals: usize) -> Self {
        Self { max_evals, used: Cell::new(0), best: RefCell::new(None) }
    }

    pub fn max_evals(&self) -> usize {
        self.max_evals
    }

    pub fn used(&self) -> usize {
        self.used.get()
    }

    pub fn remaining(&self) -> usize {
        self.max_evals.saturating_sub(self.used.get())
    }

    pub fn best(&self) -> Option<(Theta, Cost)> {
        self.best.borrow().clone()
    }

    /// Reserve one evaluation; fails once the budget is spent.
    fn consume(&self) -> OptResult<()> {
        if self.used.get() >= self.max_evals {
            return Err(OptError::BudgetExhausted { max_evals: self.max_evals });
        }
        self.used.set(self.used.get() + 1);
        Ok(())
    }

    fn record(&self, theta: &Theta, value: Cost) {
        let mut best = self.best.borrow_mut();
        let improves = match best.as_ref() {
            Some((_, current)) => value < *current,
            None => true,
        };
        if improves {
            *best = Some((theta.clone(), value));
        }
    }
}

pub struct ArgMinAdapter<'a, O: Objective + ?Sized> {
    pub f: &'a O,
    pub bounds: &'a Bounds,
    pub tracker: &'a EvalTracker,
}

impl<'a, O: Objective + ?Sized> ArgMinAdapter<'a, O> {
    pub fn new(f: &'a O, bounds: &'a Bounds, tracker: &'a EvalTracker) -> Self {
        Self { f, bounds, tracker }
    }

    /// Evaluate the objective at the projection of `theta`, counting the call
    /// before it is made so a failing call is still charged.
    pub fn evaluate(&self, theta: &Theta) -> OptResult<Cost> {
        let projected = project_onto_bounds(theta, self.bounds);
        self.tracker.consume()?;
        let value = self.f.value(&projected)?;
        if !value.is_finite() {
            return Err(OptError::NonFiniteCost { value });
        }
        self.tracker.record(&projected, value);
        Ok(value)
    }
}

impl<'a, O: Objective + ?Sized> CostFunction for ArgMinAdapter<'a, O> {
    type Param = Theta;
    type Output = Cost;

    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        Ok(self.evaluate(theta)?)
    }
}

impl<'a, O: Objective + ?Sized> Gradient for ArgMinAdapter<'a, O> {
    type Param = Theta;
    type Gradient = Grad;

    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, Error> {
        let dim = theta.len();
        let projected = project_onto_bounds(theta, self.bounds);
        match self.f.grad(&projected) {
            Ok(g) => {
                validate_grad(&g, dim)?;
                Ok(g)
            }
            Err(OptError::GradientNotImplemented) => {
                let closure_err: RefCell<Option<Error>> = RefCell::new(None);
                let cost_func = |theta: &Theta| -> f64 {
                    match self.evaluate(theta) {
                        Ok(val) => val,
                        Err(e) => {
                            let mut slot = closure_err.borrow_mut();
                            if slot.is_none() {
                                *slot = Some(e.into());
                            }
                            f64::NAN
                        }
                    }
                };
                let fd_grad = theta.central_diff(&cost_func);
                if let Some(err) = closure_err.take() {
                    return Err(err);
                }
                match validate_grad(&fd_grad, dim) {
                    Ok(()) => Ok(fd_grad),
                    Err(_) => Ok(forward_gradient(theta, &cost_func, &closure_err)?),
                }
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptResult;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Budget accounting and refusal past `max_evals`.
    // - Projection onto bounds before evaluation.
    // - Best-point memory and non-finite cost rejection.
    // - Finite-difference gradients through the counted cost.
    // -------------------------------------------------------------------------

    fn quadratic(theta: &Theta) -> OptResult<f64> {
        Ok(theta.dot(theta))
    }

    #[test]
    // Purpose
    // -------
    // Verify that the tracker charges each call and refuses calls past the
    // budget.
    //
    // Given
    // -----
    // - A budget of 2 evaluations and a quadratic objective.
    //
    // Expect
    // ------
    // - Two calls succeed, the third returns `BudgetExhausted`.
    // - `used()` stays at 2 and the best value is the smaller of the two.
    fn evaluate_enforces_budget_and_tracks_best() {
        // Arrange
        let bounds = vec![(f64::NEG_INFINITY, f64::INFINITY); 2];
        let tracker = EvalTracker::new(2);
        let adapter = ArgMinAdapter::new(&quadratic, &bounds, &tracker);

        // Act
        let first = adapter.evaluate(&array![2.0, 0.0]);
        let second = adapter.evaluate(&array![1.0, 0.0]);
        let third = adapter.evaluate(&array![0.0, 0.0]);

        // Assert
        assert_eq!(first, Ok(4.0));
        assert_eq!(second, Ok(1.0));
        assert_eq!(third, Err(OptError::BudgetExhausted { max_evals: 2 }));
        assert_eq!(tracker.used(), 2);
        assert_eq!(tracker.remaining(), 0);
        let (theta, value) = tracker.best().expect("best point should be recorded");
        assert_eq!(theta, array![1.0, 0.0]);
        assert_eq!(value, 1.0);
    }

    #[test]
    // Purpose
    // -------
    // Ensure that points outside the bound box are projected before the
    // objective sees them.
    //
    // Given
    // -----
    // - Bounds `[1, 2]` and a query at `-3`.
    //
    // Expect
    // ------
    // - The objective is evaluated at `1`, and the recorded best point is `[1]`.
    fn evaluate_projects_onto_bounds() {
        // Arrange
        let bounds = vec![(1.0, 2.0)];
        let tracker = EvalTracker::new(10);
        let adapter = ArgMinAdapter::new(&quadratic, &bounds, &tracker);

        // Act
        let value = adapter.evaluate(&array![-3.0]).expect("projected evaluation");

        // Assert
        assert_eq!(value, 1.0);
        assert_eq!(tracker.best().map(|(t, _)| t), Some(array![1.0]));
    }

    #[test]
    // Purpose
    // -------
    // Confirm that failing and non-finite evaluations are charged but never
    // recorded as best.
    //
    // Given
    // -----
    // - An objective returning `NaN`, and one returning a loss error.
    //
    // Expect
    // ------
    // - `NonFiniteCost` and `LossEvaluation` errors respectively.
    // - Both calls are counted; no best point exists.
    fn evaluate_counts_failing_calls() {
        // Arrange
        let bounds = vec![(f64::NEG_INFINITY, f64::INFINITY)];
        let tracker = EvalTracker::new(5);
        let nan = |_: &Theta| -> OptResult<f64> { Ok(f64::NAN) };
        let failing = |_: &Theta| -> OptResult<f64> {
            Err(OptError::LossEvaluation { text: "bad".to_string() })
        };

        // Act
        let nan_res = ArgMinAdapter::new(&nan, &bounds, &tracker).evaluate(&array![0.0]);
        let fail_res = ArgMinAdapter::new(&failing, &bounds, &tracker).evaluate(&array![0.0]);

        // Assert
        assert!(matches!(nan_res, Err(OptError::NonFiniteCost { .. })));
        assert!(matches!(fail_res, Err(OptError::LossEvaluation { .. })));
        assert_eq!(tracker.used(), 2);
        assert!(tracker.best().is_none());
    }

    #[test]
    // Purpose
    // -------
    // Check the finite-difference gradient of a quadratic objective.
    //
    // Given
    // -----
    // - `f(θ) = θᵀθ` at `θ = [1, -2]`.
    //
    // Expect
    // ------
    // - Gradient close to `[2, -4]` and the FD evaluations are counted.
    fn gradient_uses_finite_differences() {
        // Arrange
        let bounds = vec![(f64::NEG_INFINITY, f64::INFINITY); 2];
        let tracker = EvalTracker::new(100);
        let adapter = ArgMinAdapter::new(&quadratic, &bounds, &tracker);

        // Act
        let grad = adapter.gradient(&array![1.0, -2.0]).expect("FD gradient");

        // Assert
        assert!((grad[0] - 2.0).abs() < 1e-5);
        assert!((grad[1] + 4.0).abs() < 1e-5);
        assert!(tracker.used() > 0);
    }
}
