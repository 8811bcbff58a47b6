//! profile::core::options — loss contract and search configuration.
//!
//! Purpose
//! -------
//! Define what callers hand to the profile layer: the [`LossFunction`]
//! contract, the validated [`SearchOptions`] shared by every endpoint
//! strategy, and the request-level configs [`EndpointConfig`] and
//! [`IntervalConfig`].
//!
//! Key behaviors
//! -------------
//! - [`SearchOptions::new`] validates tolerances, step sizes and the
//!   evaluation budget; [`SearchOptions::default`] is always valid.
//! - `loss_tol = None` defers to the method default
//!   ([`Method::default_loss_tol`]).
//! - `EndpointConfig` / `IntervalConfig` leave `scale`, `theta_bounds` and scan
//!   bounds optional; defaults are derived from the scale modes at call time.
//!
//! Conventions
//! -----------
//! - Builders take `self` by value and return `Self` (`with_*`).
//! - All thresholds are absolute and expressed in scan space.
use crate::{
    optimization::{
        errors::OptResult,
        local_optimizer::{Bounds, LocalOptions, Theta},
    },
    profile::{
        core::{points::Method, scaling::Scale},
        errors::{ProfileError, ProfileResult},
    },
};

pub const DEFAULT_SCAN_TOL: f64 = 1e-3;
pub const DEFAULT_MAX_ITER: usize = 100_000;
pub const DEFAULT_SCAN_HINI: f64 = 1.0;
pub const DEFAULT_FTOL_ABS: f64 = 1e-3;

/// Half-width of the default scan window in scan space.
pub const DEFAULT_SCAN_BOUND: f64 = 9.0;

/// Scalar loss whose profile is analyzed (e.g. `-2 ln L(θ)`).
///
/// Implementations report points where the loss cannot be computed as an
/// `OptError` (typically `OptError::LossEvaluation`). A non-finite value is
/// treated the same way by every search.
pub trait LossFunction {
    fn loss(&self, theta: &Theta) -> OptResult<f64>;
}

impl<F> LossFunction for F
where
    F: Fn(&Theta) -> OptResult<f64>,
{
    fn loss(&self, theta: &Theta) -> OptResult<f64> {
        self(theta)
    }
}

/// SearchOptions — tolerances and budget shared by all endpoint strategies.
///
/// Fields
/// ------
/// - `scan_tol`: absolute tolerance on the scanned coordinate.
/// - `loss_tol`: absolute tolerance on the offset loss; `None` selects the
///   method default. For `CICO_ONE_PASS` it is the feasibility tolerance of
///   the loss constraint.
/// - `max_iter`: loss-evaluation budget shared across the whole search.
/// - `scan_hini` / `scan_hmax`: fallback step and maximal step of the
///   extrapolation methods.
/// - `ftol_abs`: tolerance of the inner profile optimizations.
/// - `local`: inner solver selection.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    pub scan_tol: f64,
    pub loss_tol: Option<f64>,
    pub max_iter: usize,
    pub scan_hini: f64,
    pub scan_hmax: f64,
    pub ftol_abs: f64,
    pub local: LocalOptions,
}

impl SearchOptions {
    pub fn new(
        scan_tol: f64, loss_tol: Option<f64>, max_iter: usize, scan_hini: f64, scan_hmax: f64,
        ftol_abs: f64, local: LocalOptions,
    ) -> ProfileResult<Self> {
        let opts = Self { scan_tol, loss_tol, max_iter, scan_hini, scan_hmax, ftol_abs, local };
        opts.validate()?;
        Ok(opts)
    }

    /// Check every field; `get_right_endpoint` runs this before each search.
    pub fn validate(&self) -> ProfileResult<()> {
        let Self { scan_tol, loss_tol, max_iter, scan_hini, scan_hmax, ftol_abs, .. } = *self;
        if !scan_tol.is_finite() || scan_tol <= 0.0 {
            return Err(ProfileError::InvalidScanTol {
                tol: scan_tol,
                reason: "Tolerance must be finite and positive.",
            });
        }
        if let Some(tol) = loss_tol {
            if !tol.is_finite() || tol < 0.0 {
                return Err(ProfileError::InvalidLossTol {
                    tol,
                    reason: "Tolerance must be finite and non-negative.",
                });
            }
        }
        if max_iter == 0 {
            return Err(ProfileError::InvalidMaxIter { max_iter });
        }
        if !scan_hini.is_finite() || scan_hini <= 0.0 {
            return Err(ProfileError::InvalidStep { name: "scan_hini", value: scan_hini });
        }
        if scan_hmax.is_nan() || scan_hmax <= 0.0 {
            return Err(ProfileError::InvalidStep { name: "scan_hmax", value: scan_hmax });
        }
        if !ftol_abs.is_finite() || ftol_abs < 0.0 {
            return Err(ProfileError::InvalidStep { name: "ftol_abs", value: ftol_abs });
        }
        Ok(())
    }

    /// Effective loss tolerance for `method`.
    pub fn loss_tol_for(&self, method: Method) -> f64 {
        self.loss_tol.unwrap_or_else(|| method.default_loss_tol())
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            scan_tol: DEFAULT_SCAN_TOL,
            loss_tol: None,
            max_iter: DEFAULT_MAX_ITER,
            scan_hini: DEFAULT_SCAN_HINI,
            scan_hmax: f64::INFINITY,
            ftol_abs: DEFAULT_FTOL_ABS,
            local: LocalOptions::default(),
        }
    }
}

/// Configuration of a single endpoint search ([`get_endpoint`]).
///
/// [`get_endpoint`]: crate::profile::endpoint::get_endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointConfig {
    pub loss_crit: f64,
    pub scale: Option<Vec<Scale>>,
    pub theta_bounds: Option<Bounds>,
    pub scan_bound: Option<f64>,
    pub search: SearchOptions,
}

impl EndpointConfig {
    pub fn new(loss_crit: f64) -> Self {
        Self {
            loss_crit,
            scale: None,
            theta_bounds: None,
            scan_bound: None,
            search: SearchOptions::default(),
        }
    }

    pub fn with_scale(mut self, scale: Vec<Scale>) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn with_theta_bounds(mut self, theta_bounds: Bounds) -> Self {
        self.theta_bounds = Some(theta_bounds);
        self
    }

    pub fn with_scan_bound(mut self, scan_bound: f64) -> Self {
        self.scan_bound = Some(scan_bound);
        self
    }

    pub fn with_search(mut self, search: SearchOptions) -> Self {
        self.search = search;
        self
    }
}

/// Configuration of a two-sided interval search ([`get_interval`]).
///
/// `scan_bounds` applies to the scanned coordinate only; when unset it
/// defaults to `unscale((-9, 9))` under that coordinate's scale.
///
/// [`get_interval`]: crate::profile::interval::get_interval
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalConfig {
    pub loss_crit: f64,
    pub scale: Option<Vec<Scale>>,
    pub theta_bounds: Option<Bounds>,
    pub scan_bounds: Option<(f64, f64)>,
    pub search: SearchOptions,
}

impl IntervalConfig {
    pub fn new(loss_crit: f64) -> Self {
        Self {
            loss_crit,
            scale: None,
            theta_bounds: None,
            scan_bounds: None,
            search: SearchOptions::default(),
        }
    }

    pub fn with_scale(mut self, scale: Vec<Scale>) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn with_theta_bounds(mut self, theta_bounds: Bounds) -> Self {
        self.theta_bounds = Some(theta_bounds);
        self
    }

    pub fn with_scan_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.scan_bounds = Some((lower, upper));
        self
    }

    pub fn with_search(mut self, search: SearchOptions) -> Self {
        self.search = search;
        self
    }

    /// Endpoint configuration for one direction, given the resolved scan
    /// bound of that direction.
    pub fn endpoint_config(&self, scan_bound: f64) -> EndpointConfig {
        EndpointConfig {
            loss_crit: self.loss_crit,
            scale: self.scale.clone(),
            theta_bounds: self.theta_bounds.clone(),
            scan_bound: Some(scan_bound),
            search: self.search.clone(),
        }
    }
}
