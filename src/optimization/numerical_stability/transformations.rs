//! Numerical stability utilities for base-10 reparametrizations.
//!
//! Provides guarded implementations of the transforms used to move a
//! coordinate between its natural domain and an unconstrained scan space.
//! Each forward map sends the domain boundary to `±∞` instead of producing
//! `NaN`, and each inverse map saturates to the boundary instead of
//! overflowing.
//!
//! # Provided items
//! - [`safe_log10`] / [`safe_exp10`]: `(0, ∞) ↔ ℝ`.
//! - [`safe_logit10`] / [`safe_logistic10`]: `(0, 1) ↔ ℝ` via base-10 log-odds.
//! - [`ROUND_TRIP_TOL`]: relative tolerance used when checking that a
//!   forward/inverse pair recovers its input.

use std::f64::consts::LN_10;

/// Relative tolerance for forward/inverse round trips on finite inputs.
pub const ROUND_TRIP_TOL: f64 = 1e-12;

/// `log10(x)` with `log10(0) = -∞` and `log10(-∞) = -∞`.
///
/// Negative finite inputs are outside the domain and yield `NaN`.
pub fn safe_log10(x: f64) -> f64 {
    if x == f64::NEG_INFINITY { f64::NEG_INFINITY } else { x.log10() }
}

/// `10^y`, saturating to `0` and `∞` at the ends of the real line.
pub fn safe_exp10(y: f64) -> f64 {
    10f64.powf(y)
}

/// Base-10 log-odds `log10(p / (1 - p))`.
///
/// Computed as `(ln p - ln1p(-p)) / ln 10` to keep precision near `p = 1`.
/// `p = 0` and `p = -∞` map to `-∞`, `p = 1` maps to `+∞`.
pub fn safe_logit10(p: f64) -> f64 {
    if p == f64::NEG_INFINITY {
        return f64::NEG_INFINITY;
    }
    (p.ln() - (-p).ln_1p()) / LN_10
}

/// Inverse of [`safe_logit10`]: `1 / (1 + 10^(-y))`.
///
/// Uses the branch that never exponentiates a large positive number.
pub fn safe_logistic10(y: f64) -> f64 {
    if y >= 0.0 {
        1.0 / (1.0 + 10f64.powf(-y))
    } else {
        let z = 10f64.powf(y);
        z / (1.0 + z)
    }
}
