//! local_optimizer — bounded, budgeted local minimization on top of `argmin`.
//!
//! Purpose
//! -------
//! Provide the local-optimizer contract the profile-likelihood layer relies
//! on: given an objective, a start point, per-coordinate bounds, an absolute
//! function tolerance and a maximum number of evaluations, return the best
//! point found together with a small termination code ([`ReturnCode`]).
//!
//! Key behaviors
//! -------------
//! - Wrap any [`Objective`] (including plain closures) in an
//!   [`adapter::ArgMinAdapter`] that projects points onto the bound box,
//!   counts evaluations against a shared [`adapter::EvalTracker`], and
//!   remembers the best point seen.
//! - Expose a single entry point, [`minimize_bounded`], that selects
//!   Nelder–Mead or L-BFGS from [`LocalOptions`] via [`builders`] and runs it
//!   through [`run`].
//! - Convert every terminal situation into a [`LocalOutcome`]: convergence,
//!   budget exhaustion, objective failures (forced stop), and backend
//!   failures. Only configuration mistakes are returned as `Err`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Objectives are minimized; callers negate when they want a maximum.
//! - The number of objective calls never exceeds `max_evals`; the call that
//!   raised an error is counted.
//! - `LocalOutcome::theta` always lies inside the bound box.
//!
//! Conventions
//! -----------
//! - Parameters are [`Theta`] (`Array1<f64>`); bounds are [`Bounds`].
//! - Return codes follow the NLopt numbering (`3` converged, `5` budget,
//!   `-5` forced stop, `1` success, `-1` failure).
//!
//! Downstream usage
//! ----------------
//! - The profile function minimizes the loss over all coordinates but the
//!   scanned one with [`minimize_bounded`].
//! - The augmented-Lagrangian optimizer in `constrained` solves its
//!   sub-problems with [`minimize_bounded`].
//!
//! Testing notes
//! -------------
//! - Unit tests cover projection and budget accounting in [`adapter`],
//!   simplex construction in [`builders`], code mapping in [`run`], and full
//!   runs on quadratic bowls in [`api`].

pub mod adapter;
pub mod api;
pub mod builders;
pub mod finite_diff;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::minimize_bounded;
pub use self::traits::{
    LocalAlgorithm, LocalOptions, LocalOutcome, Objective, ReturnCode,
};
pub use self::types::{Bounds, Cost, DEFAULT_LBFGS_MEM, Grad, Theta};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use profile_likelihood::optimization::local_optimizer::prelude::*;
//
// to import the main optimizer surface in a single line.

pub mod prelude {
    pub use super::api::minimize_bounded;
    pub use super::traits::{LocalAlgorithm, LocalOptions, LocalOutcome, Objective, ReturnCode};
    pub use super::types::{Bounds, Theta};
}
