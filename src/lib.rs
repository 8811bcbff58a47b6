//! profile_likelihood — profile-likelihood confidence intervals and
//! practical identifiability analysis.
//!
//! Purpose
//! -------
//! Serve as the crate root. Given a loss function over a parameter vector
//! (for example `-2 ln L(θ)` of a fitted model), a starting point inside the
//! confidence region, and a critical loss level, find for chosen components
//! of the vector the range of values for which the profile loss stays below
//! the critical level.
//!
//! Key behaviors
//! -------------
//! - `optimization`: bounded local minimization (argmin Nelder–Mead /
//!   L-BFGS) with a shared evaluation budget, an augmented-Lagrangian layer
//!   for the loss constraint, and stable base-10 transforms.
//! - `profile`: the endpoint strategies (`CICO_ONE_PASS`, `LIN_EXTRAPOL`,
//!   `QUADR_EXTRAPOL`), scaling and direction handling, and the
//!   `get_endpoint` / `get_interval` entry points.
//!
//! Invariants & assumptions
//! ------------------------
//! - Single-threaded and synchronous; each search owns its optimizer state
//!   and counters, so callers may run searches for different coordinates in
//!   parallel themselves.
//! - The loss is treated as a black box; it is never differentiated
//!   analytically.
//!
//! Conventions
//! -----------
//! - Parameters are `ndarray::Array1<f64>`, bounds `Vec<(f64, f64)>`.
//! - Diagnostics go through the `log` facade; no logger is installed here.
//!
//! Downstream usage
//! ----------------
//! - Most callers only need `use profile_likelihood::prelude::*;`.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to the code; end-to-end scenarios are in
//!   `tests/integration_profile_pipeline.rs`.

pub mod optimization;
pub mod profile;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use profile_likelihood::prelude::*;
//
// to import the loss contract, configuration and entry points in a single
// line.

pub mod prelude {
    pub use crate::optimization::errors::{OptError, OptResult};
    pub use crate::optimization::local_optimizer::{LocalAlgorithm, LocalOptions, Theta};
    pub use crate::profile::prelude::*;
}
