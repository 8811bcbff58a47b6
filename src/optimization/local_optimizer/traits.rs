//! Public API surface for bounded local minimization.
//!
//! - [`Objective`]: what callers minimize (blanket-implemented for closures).
//! - [`LocalAlgorithm`] and [`LocalOptions`]: solver choice and configuration.
//! - [`ReturnCode`]: small termination enumeration shared with the constrained
//!   optimizer.
//! - [`LocalOutcome`]: normalized result of a single bounded run.
//!
//! Convention: objectives are always *minimized*. Errors raised by an objective
//! stop the run and are reported through [`ReturnCode::ForcedStop`] together
//! with the best point evaluated before the failure.
use crate::optimization::{
    errors::{OptError, OptResult},
    local_optimizer::{Cost, Grad, Theta},
};
use std::str::FromStr;

/// Scalar function minimized by the local optimizer.
///
/// `value` must report invalid inputs as an [`OptError`] instead of panicking.
/// `grad` is optional; gradient-based solvers fall back to finite differences
/// when it returns [`OptError::GradientNotImplemented`].
pub trait Objective {
    // Required methods
    fn value(&self, theta: &Theta) -> OptResult<Cost>;

    // Optional methods
    fn grad(&self, _theta: &Theta) -> OptResult<Grad> {
        Err(OptError::GradientNotImplemented)
    }
}

impl<F> Objective for F
where
    F: Fn(&Theta) -> OptResult<Cost>,
{
    fn value(&self, theta: &Theta) -> OptResult<Cost> {
        self(theta)
    }
}

/// Local solver used for profile sub-problems and augmented-Lagrangian inner
/// iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocalAlgorithm {
    #[default]
    NelderMead,
    LbfgsMoreThuente,
    LbfgsHagerZhang,
}

impl LocalAlgorithm {
    /// Derivative-free methods are the only ones that behave reliably inside
    /// the constrained single-pass search.
    pub fn is_derivative_free(&self) -> bool {
        matches!(self, LocalAlgorithm::NelderMead)
    }

    pub fn name(&self) -> &'static str {
        match self {
            LocalAlgorithm::NelderMead => "NelderMead",
            LocalAlgorithm::LbfgsMoreThuente => "LbfgsMoreThuente",
            LocalAlgorithm::LbfgsHagerZhang => "LbfgsHagerZhang",
        }
    }
}

impl FromStr for LocalAlgorithm {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "neldermead" | "lnneldermead" => Ok(LocalAlgorithm::NelderMead),
            "lbfgsmorethuente" | "lbfgs" => Ok(LocalAlgorithm::LbfgsMoreThuente),
            "lbfgshagerzhang" => Ok(LocalAlgorithm::LbfgsHagerZhang),
            _ => Err(OptError::InvalidLocalAlgorithm {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'NelderMead', 'LbfgsMoreThuente' or 'LbfgsHagerZhang'.",
            }),
        }
    }
}

impl std::fmt::Display for LocalAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LocalOptions {
    pub algorithm: LocalAlgorithm,
    pub verbose: bool,
    pub lbfgs_mem: Option<usize>,
}

impl LocalOptions {
    pub fn new(
        algorithm: LocalAlgorithm, verbose: bool, lbfgs_mem: Option<usize>,
    ) -> OptResult<Self> {
        if let Some(m) = lbfgs_mem {
            if m == 0 {
                return Err(OptError::InvalidLBFGSMem {
                    mem: m,
                    reason: "L-BFGS memory must be greater than zero.",
                });
            }
        }
        Ok(Self { algorithm, verbose, lbfgs_mem })
    }

    pub fn with_algorithm(algorithm: LocalAlgorithm) -> Self {
        Self { algorithm, ..Self::default() }
    }
}

/// Termination codes, numbered after the classic NLopt convention so
/// profile points can report them unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnCode {
    Success,
    FtolReached,
    MaxEvalReached,
    ForcedStop,
    Failure,
}

impl ReturnCode {
    pub fn code(&self) -> i32 {
        match self {
            ReturnCode::Success => 1,
            ReturnCode::FtolReached => 3,
            ReturnCode::MaxEvalReached => 5,
            ReturnCode::ForcedStop => -5,
            ReturnCode::Failure => -1,
        }
    }

    pub fn is_converged(&self) -> bool {
        matches!(self, ReturnCode::Success | ReturnCode::FtolReached)
    }
}

impl std::fmt::Display for ReturnCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ReturnCode::Success => "SUCCESS",
            ReturnCode::FtolReached => "FTOL_REACHED",
            ReturnCode::MaxEvalReached => "MAXEVAL_REACHED",
            ReturnCode::ForcedStop => "FORCED_STOP",
            ReturnCode::Failure => "FAILURE",
        };
        write!(f, "{label} ({})", self.code())
    }
}

/// Result of one bounded minimization.
///
/// `theta` and `value` hold the best point evaluated; when no evaluation
/// succeeded `theta` is the starting point and `value` is `NaN`. `error`
/// carries the cause of a `ForcedStop` or `Failure`.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalOutcome {
    pub theta: Theta,
    pub value: Cost,
    pub code: ReturnCode,
    pub evals: usize,
    pub error: Option<OptError>,
}

impl LocalOutcome {
    pub fn new(
        best: Option<(Theta, Cost)>, theta0: &Theta, code: ReturnCode, evals: usize,
        error: Option<OptError>,
    ) -> Self {
        let (theta, value) = best.unwrap_or_else(|| (theta0.clone(), f64::NAN));
        Self { theta, value, code, evals, error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Parsing of `LocalAlgorithm` from user strings.
    // - Validation in `LocalOptions::new`.
    // - Return-code numbering and outcome construction.
    //
    // They intentionally DO NOT cover:
    // - Running solvers (see `api` and `run`).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that algorithm names parse case-insensitively, including the
    // NLopt-style alias.
    //
    // Given
    // -----
    // - Several spellings of the supported algorithms.
    //
    // Expect
    // ------
    // - Each spelling maps to the expected variant.
    fn local_algorithm_from_str_accepts_aliases() {
        assert_eq!("NelderMead".parse::<LocalAlgorithm>(), Ok(LocalAlgorithm::NelderMead));
        assert_eq!("LN_NELDERMEAD".parse::<LocalAlgorithm>(), Ok(LocalAlgorithm::NelderMead));
        assert_eq!("lbfgs".parse::<LocalAlgorithm>(), Ok(LocalAlgorithm::LbfgsMoreThuente));
        assert_eq!(
            "lbfgs-hager-zhang".parse::<LocalAlgorithm>(),
            Ok(LocalAlgorithm::LbfgsHagerZhang)
        );
    }

    #[test]
    // Purpose
    // -------
    // Ensure that unknown algorithm names are rejected.
    //
    // Expect
    // ------
    // - `OptError::InvalidLocalAlgorithm` echoing the input name.
    fn local_algorithm_from_str_rejects_unknown() {
        // Act
        let err = "COBYLA".parse::<LocalAlgorithm>().expect_err("COBYLA is not supported");

        // Assert
        match err {
            OptError::InvalidLocalAlgorithm { name, .. } => assert_eq!(name, "COBYLA"),
            other => panic!("Expected InvalidLocalAlgorithm, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Check that a zero L-BFGS memory is refused.
    //
    // Expect
    // ------
    // - `OptError::InvalidLBFGSMem`.
    fn local_options_new_rejects_zero_memory() {
        let err = LocalOptions::new(LocalAlgorithm::LbfgsMoreThuente, false, Some(0))
            .expect_err("zero memory must fail");
        assert!(matches!(err, OptError::InvalidLBFGSMem { mem: 0, .. }));
    }

    #[test]
    // Purpose
    // -------
    // Confirm the numeric return codes and that an outcome without any
    // successful evaluation falls back to the start point.
    //
    // Expect
    // ------
    // - Codes 1, 3, 5, -5, -1.
    // - `LocalOutcome::new(None, ..)` reports `theta0` and a NaN value.
    fn return_codes_and_empty_outcome() {
        // Arrange
        let theta0 = array![1.0, 2.0];

        // Act
        let outcome = LocalOutcome::new(None, &theta0, ReturnCode::MaxEvalReached, 0, None);

        // Assert
        assert_eq!(ReturnCode::Success.code(), 1);
        assert_eq!(ReturnCode::FtolReached.code(), 3);
        assert_eq!(ReturnCode::MaxEvalReached.code(), 5);
        assert_eq!(ReturnCode::ForcedStop.code(), -5);
        assert_eq!(ReturnCode::Failure.code(), -1);
        assert_eq!(outcome.theta, theta0);
        assert!(outcome.value.is_nan());
        assert!(!outcome.code.is_converged());
    }
}
