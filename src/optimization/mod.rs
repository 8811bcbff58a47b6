//! optimization — bounded and constrained minimization, numerical helpers,
//! and the unified error surface.
//!
//! Purpose
//! -------
//! Provide the optimizer layer the profile-likelihood code is built on: a
//! budgeted, bound-aware local minimizer backed by `argmin`, an
//! augmented-Lagrangian wrapper for inequality constraints, numerically
//! stable reparametrization primitives, and a single error/result surface.
//!
//! Key behaviors
//! -------------
//! - `local_optimizer`: minimize an objective over a box with Nelder–Mead or
//!   L-BFGS, counting every evaluation and reporting a small termination
//!   code instead of raising on budget exhaustion or objective failures.
//! - `constrained`: minimize subject to `gᵢ(θ) <= 0` by running the local
//!   optimizer on a sequence of augmented-Lagrangian sub-problems that share
//!   one evaluation budget.
//! - `numerical_stability`: base-10 log / log-odds transforms that keep
//!   domain boundaries finite-safe.
//! - `errors`: `OptError` / `OptResult` used throughout, including by
//!   caller-supplied loss functions.
//!
//! Invariants & assumptions
//! ------------------------
//! - All solvers minimize; maximization is expressed by negating.
//! - The number of objective evaluations never exceeds the configured
//!   budget, and a failing evaluation is counted.
//! - Configuration mistakes are `Err`; budget exhaustion and evaluation
//!   failures are `Ok` outcomes carrying a `ReturnCode`.
//!
//! Conventions
//! -----------
//! - Parameters are `ndarray::Array1<f64>` (`Theta`); bounds are
//!   `Vec<(f64, f64)>` with infinities for open sides.
//! - This layer logs only at `trace` level; reporting is left to callers.
//!
//! Downstream usage
//! ----------------
//! - `profile::core::profile_fn` calls `local_optimizer::minimize_bounded`.
//! - `profile::methods::cico` calls `constrained::minimize_constrained`.
//! - Front-ends typically import `optimization::prelude::*`.
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests on quadratic bowls and small
//!   constrained toys; end-to-end behavior is tested through the profile
//!   layer and the integration tests.

pub mod constrained;
pub mod errors;
pub mod local_optimizer;
pub mod numerical_stability;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use profile_likelihood::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::constrained::prelude::*;
    pub use super::errors::{OptError, OptResult};
    pub use super::local_optimizer::prelude::*;
    pub use super::numerical_stability::prelude::*;
}
