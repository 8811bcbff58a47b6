//! profile::core::scaling — coordinate reparametrization for endpoint searches.
//!
//! Purpose
//! -------
//! Map each parameter coordinate between its natural domain and the
//! unconstrained *scan space* in which endpoint searches run, and provide the
//! direction flip that turns every left-endpoint search into a right-endpoint
//! one.
//!
//! Key behaviors
//! -------------
//! - [`Scale::Direct`] is the identity, [`Scale::Log`] maps `(0, ∞)` to `ℝ` by
//!   `log10`, [`Scale::Logit`] maps `(0, 1)` to `ℝ` by base-10 log-odds.
//! - `scale(-∞) = -∞` for every mode, so open lower bounds survive.
//! - [`Scale::unscale_opt`] maps `None` to `None`, carrying "no endpoint
//!   found" through the inverse transform.
//! - [`flip`] negates a scan-space value for left searches; it is its own
//!   inverse.
//!
//! Conventions
//! -----------
//! - Mode names parse case-insensitively: `"direct"` (alias `"lin"`), `"log"`,
//!   `"logit"`. Anything else is [`ProfileError::UnknownScale`].
use crate::{
    optimization::numerical_stability::{safe_exp10, safe_log10, safe_logistic10, safe_logit10},
    profile::{
        core::points::Direction,
        errors::{ProfileError, ProfileResult},
    },
};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scale {
    #[default]
    Direct,
    Log,
    Logit,
}

impl Scale {
    pub fn scale(&self, x: f64) -> f64 {
        if x == f64::NEG_INFINITY {
            return f64::NEG_INFINITY;
        }
        match self {
            Scale::Direct => x,
            Scale::Log => safe_log10(x),
            Scale::Logit => safe_logit10(x),
        }
    }

    pub fn unscale(&self, x: f64) -> f64 {
        match self {
            Scale::Direct => x,
            Scale::Log => safe_exp10(x),
            Scale::Logit => safe_logistic10(x),
        }
    }

    pub fn unscale_opt(&self, x: Option<f64>) -> Option<f64> {
        x.map(|v| self.unscale(v))
    }

    /// Natural-domain bounds used when the caller gives none.
    pub fn default_bounds(&self) -> (f64, f64) {
        match self {
            Scale::Direct => (f64::NEG_INFINITY, f64::INFINITY),
            Scale::Log => (0.0, f64::INFINITY),
            Scale::Logit => (0.0, 1.0),
        }
    }

    /// Whether `(lower, upper)` lies inside the domain of this mode.
    pub fn admits_bounds(&self, lower: f64, upper: f64) -> bool {
        match self {
            Scale::Direct => true,
            Scale::Log => lower >= 0.0,
            Scale::Logit => lower >= 0.0 && upper <= 1.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Scale::Direct => "direct",
            Scale::Log => "log",
            Scale::Logit => "logit",
        }
    }
}

impl FromStr for Scale {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "direct" | "lin" => Ok(Scale::Direct),
            "log" => Ok(Scale::Log),
            "logit" => Ok(Scale::Logit),
            _ => Err(ProfileError::UnknownScale { name: s.to_string() }),
        }
    }
}

impl std::fmt::Display for Scale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Parse one scale mode per coordinate.
pub fn parse_scales<S: AsRef<str>>(names: &[S]) -> ProfileResult<Vec<Scale>> {
    names.iter().map(|s| s.as_ref().parse()).collect()
}

/// Direction flip in scan space: identity for right searches, negation for
/// left searches.
pub fn flip(x: f64, direction: Direction) -> f64 {
    match direction {
        Direction::Right => x,
        Direction::Left => -x,
    }
}
