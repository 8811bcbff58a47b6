//! profile::methods — right-endpoint search strategies.
//!
//! Purpose
//! -------
//! Locate, in scan space, the largest value of the scanned coordinate for
//! which the offset loss `Λ(θ) - loss_crit` can still be kept non-positive.
//! Left endpoints and scaling are handled upstream by flipping and
//! reparametrizing the problem, so every strategy here only ever searches to
//! the right.
//!
//! Key behaviors
//! -------------
//! - [`EndpointSearch`] is the common interface; [`Method::search_strategy`]
//!   maps the closed [`Method`] enumeration onto one unit-struct strategy:
//!   - [`CicoOnePass`]: one augmented-Lagrangian run maximizing the scanned
//!     coordinate under `loss ≤ 0`.
//!   - [`LinExtrapol`]: repeated profile evaluations with secant steps.
//!   - [`QuadrExtrapol`]: repeated profile evaluations with quadratic steps.
//! - All strategies share the `max_iter` loss-evaluation budget across their
//!   nested optimizer calls.
//!
//! Invariants & assumptions
//! ------------------------
//! - `problem.theta_init` satisfies `loss < 0` and lies strictly inside
//!   `theta_bounds`; `theta_init[theta_num] < scan_bound`. These are checked
//!   by `profile::endpoint` before dispatch.
//! - Loss errors and budget exhaustion end a search with a status; only
//!   configuration mistakes and uninterpretable optimizer codes are `Err`.
//!
//! Downstream usage
//! ----------------
//! - `profile::endpoint::get_right_endpoint` dispatches through
//!   [`Method::search_strategy`].
//!
//! Testing notes
//! -------------
//! - Each strategy file tests its stepping rule and stop conditions on small
//!   quadratic losses with known roots.

pub mod cico;
pub mod extrapolation;
pub mod lin_extrapol;
pub mod quadr_extrapol;

use log::warn;

use crate::{
    optimization::local_optimizer::{Bounds, LocalAlgorithm, Theta},
    profile::{
        core::{
            options::{LossFunction, SearchOptions},
            points::{Method, SearchOutcome},
        },
        errors::{ProfileError, ProfileResult},
    },
};

pub use self::cico::{CicoOnePass, search_with_scan_fn};
pub use self::extrapolation::{History, SearchState};
pub use self::lin_extrapol::LinExtrapol;
pub use self::quadr_extrapol::QuadrExtrapol;

/// A right-endpoint search in scan space, with the loss already offset so
/// that the boundary is `loss = 0`.
pub struct RightEndpointProblem<'a> {
    pub theta_init: Theta,
    pub theta_num: usize,
    pub loss: &'a dyn LossFunction,
    pub theta_bounds: Bounds,
    pub scan_bound: f64,
}

impl<'a> RightEndpointProblem<'a> {
    pub fn new(
        theta_init: Theta, theta_num: usize, loss: &'a dyn LossFunction, theta_bounds: Bounds,
        scan_bound: f64,
    ) -> ProfileResult<Self> {
        let n = theta_init.len();
        if n == 0 {
            return Err(ProfileError::EmptyTheta);
        }
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
        Ok(Self { theta_init, theta_num, loss, theta_bounds, scan_bound })
    }

    /// Upper bound of the scanned coordinate.
    pub fn scan_upper(&self) -> f64 {
        self.theta_bounds[self.theta_num].1
    }
}

/// Common interface of the endpoint strategies.
pub trait EndpointSearch {
    fn method(&self) -> Method;

    fn search(
        &self, problem: &RightEndpointProblem<'_>, options: &SearchOptions,
    ) -> ProfileResult<SearchOutcome>;
}

impl Method {
    pub fn search_strategy(&self) -> &'static dyn EndpointSearch {
        match self {
            Method::CicoOnePass => &CicoOnePass,
            Method::LinExtrapol => &LinExtrapol,
            Method::QuadrExtrapol => &QuadrExtrapol,
        }
    }
}

/// Start coordinates with a magnitude below this are treated as zero by the
/// Nelder–Mead warning.
const NEAR_ZERO: f64 = 1e-2;

/// Warn when Nelder–Mead starts from coordinates close to zero, where its
/// initial simplex is poorly scaled. Returns the offending indices.
pub(crate) fn warn_near_zero_start(
    theta: &Theta, options: &SearchOptions, method: Method,
) -> Vec<usize> {
    if options.local.algorithm != LocalAlgorithm::NelderMead {
        return Vec::new();
    }
    let near_zero: Vec<usize> = theta
        .iter()
        .enumerate()
        .filter(|&(_, v)| v.abs() <= NEAR_ZERO)
        .map(|(i, _)| i)
        .collect();
    if !near_zero.is_empty() {
        warn!("{method}: close-to-zero start parameters {near_zero:?} with NelderMead.");
    }
    near_zero
}

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use profile_likelihood::profile::methods::prelude::*;
//
// to import the strategy surface in a single line.

pub mod prelude {
    pub use super::cico::{CicoOnePass, search_with_scan_fn};
    pub use super::lin_extrapol::LinExtrapol;
    pub use super::quadr_extrapol::QuadrExtrapol;
    pub use super::{EndpointSearch, RightEndpointProblem};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::{errors::OptResult, local_optimizer::LocalOptions};
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Verify that every method dispatches to the matching strategy.
    fn search_strategy_matches_method() {
        for m in [Method::CicoOnePass, Method::LinExtrapol, Method::QuadrExtrapol] {
            assert_eq!(m.search_strategy().method(), m);
        }
    }

    #[test]
    // Purpose
    // -------
    // Check shape validation of the right-endpoint problem.
    fn right_endpoint_problem_rejects_bad_shapes() {
        let loss = |t: &Theta| -> OptResult<f64> { Ok(t[0]) };
        assert!(matches!(
            RightEndpointProblem::new(array![1.0], 1, &loss, vec![(0.0, 2.0)], 1.5),
            Err(ProfileError::ThetaNumOutOfRange { .. })
        ));
        assert!(matches!(
            RightEndpointProblem::new(array![1.0], 0, &loss, vec![], 1.5),
            Err(ProfileError::LengthMismatch { .. })
        ));
        let ok = RightEndpointProblem::new(array![1.0], 0, &loss, vec![(0.0, 2.0)], 1.5)
            .expect("valid problem");
        assert_eq!(ok.scan_upper(), 2.0);
    }

    #[test]
    // Purpose
    // -------
    // Verify that only Nelder–Mead start points are screened for
    // close-to-zero coordinates.
    //
    // Given
    // -----
    // - Start `[0, 1, 0.005, -0.02]` under Nelder–Mead and L-BFGS.
    //
    // Expect
    // ------
    // - Indices `[0, 2]` for Nelder–Mead; nothing for L-BFGS.
    fn warn_near_zero_start_flags_nelder_mead_only() {
        // Arrange
        let theta = array![0.0, 1.0, 0.005, -0.02];
        let nm = SearchOptions::default();
        let lbfgs = SearchOptions {
            local: LocalOptions::with_algorithm(LocalAlgorithm::LbfgsMoreThuente),
            ..SearchOptions::default()
        };

        // Act
        let flagged_nm = warn_near_zero_start(&theta, &nm, Method::LinExtrapol);
        let flagged_lbfgs = warn_near_zero_start(&theta, &lbfgs, Method::LinExtrapol);

        // Assert
        assert_eq!(flagged_nm, vec![0, 2]);
        assert!(flagged_lbfgs.is_empty());
    }
}
