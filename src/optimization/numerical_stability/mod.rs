//! numerical_stability — guarded reparametrization primitives.
//!
//! Purpose
//! -------
//! Host the low-level transforms that map bounded coordinates into an
//! unconstrained space and back without overflow, underflow or `NaN` at the
//! domain boundaries.
//!
//! Key behaviors
//! -------------
//! - Base-10 logarithm and exponential for coordinates in `(0, ∞)`.
//! - Base-10 log-odds and logistic for coordinates in `(0, 1)`.
//! - Boundary values (`0`, `1`, `-∞`) map to infinities rather than `NaN`,
//!   so bounds can be transformed alongside parameters.
//!
//! Downstream usage
//! ----------------
//! - `profile::core::scaling` builds the `direct` / `log` / `logit` scale
//!   modes on top of these primitives.
//!
//! Testing notes
//! -------------
//! - Unit tests check boundary behavior, tail saturation and round trips.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{
    ROUND_TRIP_TOL, safe_exp10, safe_log10, safe_logistic10, safe_logit10,
};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use profile_likelihood::optimization::numerical_stability::prelude::*;
//
// to import the numerical-stability surface in a single line.

pub mod prelude {
    pub use super::transformations::{safe_exp10, safe_log10, safe_logistic10, safe_logit10};
}
