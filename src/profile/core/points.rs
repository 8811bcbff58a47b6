//! profile::core::points — profile points, endpoint results and the small
//! enumerations describing them.
//!
//! Purpose
//! -------
//! Hold the value types produced by profile evaluations and endpoint
//! searches, together with the closed enumerations (`PointStatus`,
//! `EndpointStatus`, `Direction`, `Method`) used to label them.
//!
//! Key behaviors
//! -------------
//! - [`PointStatus`] mirrors the optimizer's return-code numbering
//!   (`3`, `1`, `-5`, `5`) through [`PointStatus::code`].
//! - [`EndpointStatus`] renders and parses the upper-snake labels
//!   (`BORDER_FOUND_BY_SCAN_TOL`, ...).
//! - [`Direction`] and [`Method`] parse case-insensitively from user strings.
//!
//! Invariants & assumptions
//! ------------------------
//! - A [`ProfilePoint`] is a snapshot: `params` is an owned copy, never a view
//!   into optimizer buffers.
//! - `ProfilePoint::loss` is offset by the critical level while a search is
//!   running (boundary ⇔ loss = 0) and restored to natural units in the
//!   returned [`EndPoint`].
//! - [`EndPoint::value`] is `None` whenever no boundary was located.
//!
//! Conventions
//! -----------
//! - Parameter vectors are `ndarray::Array1<f64>` (`Theta`).
use crate::{
    optimization::local_optimizer::Theta,
    profile::errors::ProfileError,
};
use std::str::FromStr;

/// Outcome of the inner optimization behind one profile point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointStatus {
    Converged,
    Skipped,
    LossError,
    MaxEvalReached,
}

impl PointStatus {
    pub fn code(&self) -> i32 {
        match self {
            PointStatus::Converged => 3,
            PointStatus::Skipped => 1,
            PointStatus::LossError => -5,
            PointStatus::MaxEvalReached => 5,
        }
    }
}

impl std::fmt::Display for PointStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PointStatus::Converged => "CONVERGED",
            PointStatus::Skipped => "OPTIMIZATION_SKIPPED",
            PointStatus::LossError => "LOSS_ERROR",
            PointStatus::MaxEvalReached => "MAX_EVAL_REACHED",
        };
        write!(f, "{label} ({})", self.code())
    }
}

/// One evaluation of the profile function at a fixed scanned value.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfilePoint {
    pub value: f64,
    pub loss: f64,
    pub params: Theta,
    pub status: PointStatus,
    pub call_count: usize,
}

impl ProfilePoint {
    pub fn new(
        value: f64, loss: f64, params: Theta, status: PointStatus, call_count: usize,
    ) -> Self {
        Self { value, loss, params, status, call_count }
    }
}

/// Terminal classification of an endpoint search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointStatus {
    BorderFoundByScanTol,
    BorderFoundByLossTol,
    ScanBoundReached,
    MaxIterStop,
    LossErrorStop,
}

impl EndpointStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndpointStatus::BorderFoundByScanTol => "BORDER_FOUND_BY_SCAN_TOL",
            EndpointStatus::BorderFoundByLossTol => "BORDER_FOUND_BY_LOSS_TOL",
            EndpointStatus::ScanBoundReached => "SCAN_BOUND_REACHED",
            EndpointStatus::MaxIterStop => "MAX_ITER_STOP",
            EndpointStatus::LossErrorStop => "LOSS_ERROR_STOP",
        }
    }

    /// Whether the search located a boundary.
    pub fn is_border_found(&self) -> bool {
        matches!(self, EndpointStatus::BorderFoundByScanTol | EndpointStatus::BorderFoundByLossTol)
    }
}

impl std::fmt::Display for EndpointStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EndpointStatus {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "BORDER_FOUND_BY_SCAN_TOL" => Ok(EndpointStatus::BorderFoundByScanTol),
            "BORDER_FOUND_BY_LOSS_TOL" => Ok(EndpointStatus::BorderFoundByLossTol),
            "SCAN_BOUND_REACHED" => Ok(EndpointStatus::ScanBoundReached),
            "MAX_ITER_STOP" => Ok(EndpointStatus::MaxIterStop),
            "LOSS_ERROR_STOP" => Ok(EndpointStatus::LossErrorStop),
            _ => Err(ProfileError::UnknownStatus { name: s.to_string() }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Left,
    #[default]
    Right,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(ProfileError::UnknownDirection { name: s.to_string() }),
        }
    }
}

/// Endpoint-search method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    CicoOnePass,
    LinExtrapol,
    QuadrExtrapol,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::CicoOnePass => "CICO_ONE_PASS",
            Method::LinExtrapol => "LIN_EXTRAPOL",
            Method::QuadrExtrapol => "QUADR_EXTRAPOL",
        }
    }

    /// Loss tolerance used when the caller does not set one.
    pub fn default_loss_tol(&self) -> f64 {
        match self {
            Method::CicoOnePass => 1e-3,
            Method::LinExtrapol | Method::QuadrExtrapol => 0.0,
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Method {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CICO_ONE_PASS" => Ok(Method::CicoOnePass),
            "LIN_EXTRAPOL" => Ok(Method::LinExtrapol),
            "QUADR_EXTRAPOL" => Ok(Method::QuadrExtrapol),
            _ => Err(ProfileError::UnknownMethod { name: s.to_string() }),
        }
    }
}

/// Raw result of a right-endpoint search in scan space, before the
/// direction flip and inverse scaling are applied.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub value: Option<f64>,
    pub profile_points: Vec<ProfilePoint>,
    pub status: EndpointStatus,
    pub call_count: usize,
}

impl SearchOutcome {
    pub fn new(
        value: Option<f64>, profile_points: Vec<ProfilePoint>, status: EndpointStatus,
        call_count: usize,
    ) -> Self {
        Self { value, profile_points, status, call_count }
    }
}

/// EndPoint — result of one directional confidence-endpoint search.
///
/// - `value`: endpoint in natural units, `None` unless a border was found.
/// - `profile_points`: points in evaluation order, natural units.
/// - `call_count`: loss evaluations spent by the search (the validation call
///   at `theta_init` is not included).
/// - `supreme`: smallest loss seen by any successful evaluation during the
///   search, natural units.
#[derive(Debug, Clone, PartialEq)]
pub struct EndPoint {
    pub value: Option<f64>,
    pub profile_points: Vec<ProfilePoint>,
    pub status: EndpointStatus,
    pub direction: Direction,
    pub call_count: usize,
    pub supreme: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Numeric codes of `PointStatus`.
    // - Label round trips and unknown-name errors for the parsed enums.
    //
    // They intentionally DO NOT cover:
    // - How points and endpoints are produced (see `profile_fn`, `endpoint`).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the numeric mirror of point statuses.
    fn point_status_codes_match_optimizer_convention() {
        assert_eq!(PointStatus::Converged.code(), 3);
        assert_eq!(PointStatus::Skipped.code(), 1);
        assert_eq!(PointStatus::LossError.code(), -5);
        assert_eq!(PointStatus::MaxEvalReached.code(), 5);
    }

    #[test]
    // Purpose
    // -------
    // Ensure that every endpoint status label parses back to itself.
    //
    // Expect
    // ------
    // - `s.to_string().parse() == s` for every variant.
    // - Only the two border statuses report `is_border_found`.
    fn endpoint_status_labels_parse_back() {
        let all = [
            EndpointStatus::BorderFoundByScanTol,
            EndpointStatus::BorderFoundByLossTol,
            EndpointStatus::ScanBoundReached,
            EndpointStatus::MaxIterStop,
            EndpointStatus::LossErrorStop,
        ];
        for s in all {
            assert_eq!(s.to_string().parse::<EndpointStatus>(), Ok(s));
        }
        assert_eq!(all.iter().filter(|s| s.is_border_found()).count(), 2);
        assert!(matches!(
            "FOUND".parse::<EndpointStatus>(),
            Err(ProfileError::UnknownStatus { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Check case-insensitive parsing of methods and directions.
    //
    // Expect
    // ------
    // - `"lin_extrapol"` parses to `LinExtrapol`, `"LEFT"` to `Left`.
    // - Unknown names map to the matching `Unknown*` error.
    fn method_and_direction_parse_case_insensitively() {
        assert_eq!("lin_extrapol".parse::<Method>(), Ok(Method::LinExtrapol));
        assert_eq!("CICO_ONE_PASS".parse::<Method>(), Ok(Method::CicoOnePass));
        assert_eq!("Quadr_Extrapol".parse::<Method>(), Ok(Method::QuadrExtrapol));
        assert_eq!("LEFT".parse::<Direction>(), Ok(Direction::Left));
        assert!(matches!("bisect".parse::<Method>(), Err(ProfileError::UnknownMethod { .. })));
        assert!(matches!("up".parse::<Direction>(), Err(ProfileError::UnknownDirection { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Verify the per-method default loss tolerance.
    fn method_default_loss_tol() {
        assert_eq!(Method::CicoOnePass.default_loss_tol(), 1e-3);
        assert_eq!(Method::LinExtrapol.default_loss_tol(), 0.0);
        assert_eq!(Method::QuadrExtrapol.default_loss_tol(), 0.0);
    }
}
