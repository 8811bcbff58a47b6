//! profile::core — building blocks shared by every endpoint search.
//!
//! Purpose
//! -------
//! Collect the value types, configuration, scaling, validation and the
//! profile function that the search strategies in `profile::methods` and the
//! orchestration in `profile::endpoint` / `profile::interval` are built on.
//!
//! Key behaviors
//! -------------
//! - `scaling`: `direct` / `log` / `logit` transforms and the left/right flip.
//! - `points`: `ProfilePoint`, `EndPoint`, `SearchOutcome` and the status,
//!   direction and method enumerations.
//! - `options`: the `LossFunction` contract, `SearchOptions`,
//!   `EndpointConfig` and `IntervalConfig`.
//! - `validation`: ordered request checks and scale-derived defaults.
//! - `profile_fn`: `make_profile` and the callable `ProfileFn`.
//! - `critical`: χ²-based `loss_crit` helper.
//!
//! Invariants & assumptions
//! ------------------------
//! - Nothing in this module performs logging; reporting is done by the
//!   strategies and the orchestration layer.
//! - Loss errors and budget exhaustion surface as point statuses, never as
//!   `Err`.
//!
//! Downstream usage
//! ----------------
//! - Import `profile::core::prelude::*` for the common types.
//!
//! Testing notes
//! -------------
//! - Each file carries its own unit tests; cross-module behavior is covered
//!   in `profile::methods` and the integration tests.

pub mod critical;
pub mod options;
pub mod points;
pub mod profile_fn;
pub mod scaling;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::critical::loss_crit_chi2;
pub use self::options::{
    DEFAULT_FTOL_ABS, DEFAULT_MAX_ITER, DEFAULT_SCAN_BOUND, DEFAULT_SCAN_HINI, DEFAULT_SCAN_TOL,
    EndpointConfig, IntervalConfig, LossFunction, SearchOptions,
};
pub use self::points::{
    Direction, EndPoint, EndpointStatus, Method, PointStatus, ProfilePoint, SearchOutcome,
};
pub use self::profile_fn::{ProfileFn, make_profile};
pub use self::scaling::{Scale, flip, parse_scales};
pub use self::validation::{
    check_initial_loss, default_scan_bound, resolve_bounds, resolve_scales, validate_bounds,
    validate_scan_bound, validate_theta,
};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use profile_likelihood::profile::core::prelude::*;
//
// to import the main profile core surface in a single line.

pub mod prelude {
    pub use super::critical::loss_crit_chi2;
    pub use super::options::{EndpointConfig, IntervalConfig, LossFunction, SearchOptions};
    pub use super::points::{
        Direction, EndPoint, EndpointStatus, Method, PointStatus, ProfilePoint,
    };
    pub use super::profile_fn::{ProfileFn, make_profile};
    pub use super::scaling::Scale;
}
