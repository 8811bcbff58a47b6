//! Errors for profile-likelihood searches (request validation, configuration
//! parsing, and unrecoverable optimizer outcomes).
//!
//! This module defines [`ProfileError`] and the alias [`ProfileResult`].
//! Loss-function failures and budget exhaustion are **not** errors: they end a
//! search with `LOSS_ERROR_STOP` / `MAX_ITER_STOP` and are reported through
//! `EndPoint::status`.
//!
//! ## Conventions
//! - **Indices are 0-based.**
//! - Validation errors are raised before any optimization starts.
//! - Optimizer configuration mistakes are wrapped as
//!   [`ProfileError::Optimization`]; unexpected termination codes surface as
//!   [`ProfileError::UnexpectedReturnCode`].
use crate::optimization::errors::OptError;

pub type ProfileResult<T> = Result<T, ProfileError>;

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileError {
    // ---- Request shape ----
    EmptyTheta,

    LengthMismatch { what: &'static str, expected: usize, actual: usize },

    ThetaNumOutOfRange { theta_num: usize, len: usize },

    NonFiniteTheta { index: usize, value: f64 },

    // ---- Bounds ----
    InvalidThetaBounds { index: usize, lower: f64, upper: f64 },

    ThetaInitOutOfBounds { index: usize, value: f64, lower: f64, upper: f64 },

    InvalidBoundsForScale { index: usize, scale: &'static str, lower: f64, upper: f64 },

    ScanBoundOutOfBounds { scan_bound: f64, lower: f64, upper: f64 },

    ScanBoundWrongSide { direction: &'static str, value: f64, scan_bound: f64 },

    InvalidScanBounds { lower: f64, upper: f64 },

    // ---- Loss at the initial point ----
    NonFiniteLossCrit { value: f64 },

    LossAboveCritical { loss: f64, loss_crit: f64 },

    LossAtInit { source: OptError },

    // ---- Search options ----
    InvalidScanTol { tol: f64, reason: &'static str },

    InvalidLossTol { tol: f64, reason: &'static str },

    InvalidStep { name: &'static str, value: f64 },

    InvalidMaxIter { max_iter: usize },

    // ---- Parsing ----
    UnknownScale { name: String },

    UnknownMethod { name: String },

    UnknownDirection { name: String },

    UnknownStatus { name: String },

    // ---- Critical level ----
    InvalidConfidence { value: f64 },

    InvalidDof { dof: usize },

    CriticalValue { text: String },

    // ---- Optimizer ----
    UnexpectedReturnCode { code: i32, context: &'static str, text: String },

    Optimization(OptError),
}

impl std::error::Error for ProfileError {}

impl std::fmt::Display for ProfileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Request shape ----
            ProfileError::EmptyTheta => {
                write!(f, "Parameter vector theta_init is empty.")
            }
            ProfileError::LengthMismatch { what, expected, actual } => {
                write!(f, "Length of {what} ({actual}) does not match theta_init ({expected}).")
            }
            ProfileError::ThetaNumOutOfRange { theta_num, len } => {
                write!(f, "theta_num {theta_num} is out of range for a vector of length {len}.")
            }
            ProfileError::NonFiniteTheta { index, value } => {
                write!(f, "theta_init[{index}] is non-finite: {value}")
            }

            // ---- Bounds ----
            ProfileError::InvalidThetaBounds { index, lower, upper } => {
                write!(f, "theta_bounds[{index}] = ({lower}, {upper}) must satisfy lower < upper.")
            }
            ProfileError::ThetaInitOutOfBounds { index, value, lower, upper } => {
                write!(
                    f,
                    "theta_init[{index}] = {value} must be strictly inside theta_bounds ({lower}, {upper})."
                )
            }
            ProfileError::InvalidBoundsForScale { index, scale, lower, upper } => {
                write!(
                    f,
                    "theta_bounds[{index}] = ({lower}, {upper}) is not compatible with '{scale}' scale."
                )
            }
            ProfileError::ScanBoundOutOfBounds { scan_bound, lower, upper } => {
                write!(
                    f,
                    "scan_bound {scan_bound} must be strictly inside theta_bounds ({lower}, {upper})."
                )
            }
            ProfileError::ScanBoundWrongSide { direction, value, scan_bound } => {
                write!(
                    f,
                    "theta_init value {value} is not on the correct side of scan_bound {scan_bound} for a {direction} search."
                )
            }
            ProfileError::InvalidScanBounds { lower, upper } => {
                write!(f, "scan_bounds ({lower}, {upper}) must satisfy lower < upper.")
            }

            // ---- Loss at the initial point ----
            ProfileError::NonFiniteLossCrit { value } => {
                write!(f, "loss_crit must be finite; got: {value}")
            }
            ProfileError::LossAboveCritical { loss, loss_crit } => {
                write!(
                    f,
                    "Check theta_init and loss_crit: loss_func(theta_init) = {loss} should be < loss_crit = {loss_crit}."
                )
            }
            ProfileError::LossAtInit { source } => {
                write!(f, "loss_func failed at theta_init: {source}")
            }

            // ---- Search options ----
            ProfileError::InvalidScanTol { tol, reason } => {
                write!(f, "Invalid scan_tol {tol}: {reason}")
            }
            ProfileError::InvalidLossTol { tol, reason } => {
                write!(f, "Invalid loss_tol {tol}: {reason}")
            }
            ProfileError::InvalidStep { name, value } => {
                write!(f, "Invalid {name} {value}: must be positive and not NaN.")
            }
            ProfileError::InvalidMaxIter { max_iter } => {
                write!(f, "Invalid max_iter {max_iter}: must be greater than zero.")
            }

            // ---- Parsing ----
            ProfileError::UnknownScale { name } => {
                write!(f, "Unknown scale '{name}'. Valid options are 'direct', 'log', 'logit'.")
            }
            ProfileError::UnknownMethod { name } => {
                write!(
                    f,
                    "Unknown method '{name}'. Valid options are 'CICO_ONE_PASS', 'LIN_EXTRAPOL', 'QUADR_EXTRAPOL'."
                )
            }
            ProfileError::UnknownDirection { name } => {
                write!(f, "Unknown direction '{name}'. Valid options are 'left', 'right'.")
            }
            ProfileError::UnknownStatus { name } => {
                write!(f, "Unknown endpoint status '{name}'.")
            }

            // ---- Critical level ----
            ProfileError::InvalidConfidence { value } => {
                write!(f, "Confidence level must lie in (0, 1); got: {value}")
            }
            ProfileError::InvalidDof { dof } => {
                write!(f, "Degrees of freedom must be greater than zero; got: {dof}")
            }
            ProfileError::CriticalValue { text } => {
                write!(f, "Could not compute critical value: {text}")
            }

            // ---- Optimizer ----
            ProfileError::UnexpectedReturnCode { code, context, text } => {
                write!(f, "Unexpected optimizer return code {code} in {context}: {text}")
            }
            ProfileError::Optimization(err) => {
                write!(f, "Optimizer configuration error: {err}")
            }
        }
    }
}

impl From<OptError> for ProfileError {
    fn from(err: OptError) -> Self {
        ProfileError::Optimization(err)
    }
}
