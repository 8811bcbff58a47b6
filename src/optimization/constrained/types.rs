//! constrained::types — problem, options and outcome for inequality-constrained
//! minimization.
use crate::optimization::{
    errors::{OptError, OptResult},
    local_optimizer::{
        Bounds, LocalOptions, ReturnCode, Theta,
        validation::{validate_problem, verify_ftol},
    },
};

/// Fallible scalar function of the full parameter vector.
pub type ScalarFn<'a> = &'a dyn Fn(&Theta) -> OptResult<f64>;

pub const DEFAULT_MAX_OUTER: usize = 100;

/// `g(θ) <= 0`, considered satisfied when `g(θ) <= tol`.
#[derive(Clone, Copy)]
pub struct InequalityConstraint<'a> {
    pub func: ScalarFn<'a>,
    pub tol: f64,
}

impl<'a> InequalityConstraint<'a> {
    pub fn new(func: ScalarFn<'a>, tol: f64) -> Self {
        Self { func, tol }
    }
}

/// Minimize `objective` subject to `constraints` and box `bounds`.
pub struct ConstrainedProblem<'a> {
    pub objective: ScalarFn<'a>,
    pub constraints: Vec<InequalityConstraint<'a>>,
    pub bounds: Bounds,
}

impl<'a> ConstrainedProblem<'a> {
    pub fn new(
        objective: ScalarFn<'a>, constraints: Vec<InequalityConstraint<'a>>, bounds: Bounds,
    ) -> Self {
        Self { objective, constraints, bounds }
    }

    pub fn validate(&self, theta0: &Theta) -> OptResult<()> {
        validate_problem(theta0, &self.bounds)?;
        for (index, c) in self.constraints.iter().enumerate() {
            if !c.tol.is_finite() || c.tol < 0.0 {
                return Err(OptError::InvalidConstraintTol { index, tol: c.tol });
            }
        }
        Ok(())
    }

    /// Objective and constraint values at `theta`, stopping at the first error.
    pub fn evaluate(&self, theta: &Theta) -> OptResult<(f64, Vec<f64>)> {
        let f = (self.objective)(theta)?;
        let g = self.constraints.iter().map(|c| (c.func)(theta)).collect::<OptResult<Vec<_>>>()?;
        Ok((f, g))
    }

    pub fn is_feasible(&self, g: &[f64]) -> bool {
        g.iter().zip(self.constraints.iter()).all(|(&gi, c)| gi <= c.tol)
    }
}

/// Augmented-Lagrangian configuration.
///
/// `ftol_abs` is the outer stopping tolerance on the objective change between
/// feasible iterates, `local_ftol` the tolerance handed to each sub-problem.
#[derive(Debug, Clone, PartialEq)]
pub struct AugLagOptions {
    pub ftol_abs: f64,
    pub local_ftol: f64,
    pub local: LocalOptions,
    pub max_evals: usize,
    pub max_outer: usize,
}

impl AugLagOptions {
    pub fn new(
        ftol_abs: f64, local_ftol: f64, local: LocalOptions, max_evals: usize,
        max_outer: Option<usize>,
    ) -> OptResult<Self> {
        verify_ftol(ftol_abs)?;
        verify_ftol(local_ftol)?;
        let max_outer = max_outer.unwrap_or(DEFAULT_MAX_OUTER);
        if max_outer == 0 {
            return Err(OptError::InvalidMaxEvals {
                max_evals: max_outer,
                reason: "Outer iteration limit must be greater than zero.",
            });
        }
        Ok(Self { ftol_abs, local_ftol, local, max_evals, max_outer })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstrainedOutcome {
    pub theta: Theta,
    pub value: f64,
    pub constraint_values: Vec<f64>,
    pub code: ReturnCode,
    pub evals: usize,
    pub error: Option<OptError>,
}
