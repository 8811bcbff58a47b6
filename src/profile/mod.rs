//! profile — profile-likelihood confidence endpoints and intervals.
//!
//! Purpose
//! -------
//! Compute, for one parameter of a loss `Λ(θ)` (typically `-2 ln L`), the
//! range of values for which the profile `min Λ(θ | θ_k = x)` stays below a
//! critical level. This is the profile-likelihood confidence interval of
//! `θ_k`, and it works without any Hessian or normality assumption.
//!
//! Key behaviors
//! -------------
//! - `core`: value types, configuration, scaling, validation, the profile
//!   function and the χ² critical-level helper.
//! - `methods`: the three right-endpoint strategies (`CICO_ONE_PASS`,
//!   `LIN_EXTRAPOL`, `QUADR_EXTRAPOL`) behind the `EndpointSearch` trait.
//! - `endpoint`: scaling/direction orchestration of a single endpoint.
//! - `interval`: both endpoints of one or all coordinates.
//! - `errors`: the `ProfileError` / `ProfileResult` surface.
//!
//! Invariants & assumptions
//! ------------------------
//! - Requests are validated completely before any search starts.
//! - Every search honors a shared loss-evaluation budget (`max_iter`).
//! - Loss failures and budget exhaustion are statuses, not errors.
//!
//! Conventions
//! -----------
//! - Coordinates are 0-based. Results are always in natural units.
//! - Method, direction, scale and status names parse from their canonical
//!   strings (`"CICO_ONE_PASS"`, `"left"`, `"log"`, `"SCAN_BOUND_REACHED"`).
//!
//! Downstream usage
//! ----------------
//! - Typical use: pick `loss_crit` with `loss_crit_chi2`, then call
//!   `get_interval` (or `get_intervals`) with an `IntervalConfig`.
//!
//! Testing notes
//! -------------
//! - Unit tests sit next to each submodule; end-to-end scenarios are in
//!   `tests/integration_profile_pipeline.rs`.

pub mod core;
pub mod endpoint;
pub mod errors;
pub mod interval;
pub mod methods;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{
    Direction, EndPoint, EndpointConfig, EndpointStatus, IntervalConfig, LossFunction, Method,
    PointStatus, ProfilePoint, Scale, SearchOptions, loss_crit_chi2,
};
pub use self::endpoint::{get_endpoint, get_right_endpoint};
pub use self::errors::{ProfileError, ProfileResult};
pub use self::interval::{ParamInterval, ParamIntervalInput, get_interval, get_intervals};
pub use self::methods::search_with_scan_fn;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use profile_likelihood::profile::prelude::*;
//
// to import the main profile surface in a single line.

pub mod prelude {
    pub use super::core::prelude::*;
    pub use super::endpoint::get_endpoint;
    pub use super::errors::{ProfileError, ProfileResult};
    pub use super::interval::{ParamInterval, get_interval, get_intervals};
    pub use super::methods::prelude::*;
}
