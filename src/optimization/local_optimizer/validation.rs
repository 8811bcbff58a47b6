//! Validation helpers for bounded local optimization.
//!
//! This module centralizes the consistency checks used before and during a
//! local run:
//!
//! - **Tolerance checks**: [`verify_ftol`] requires a finite, non-negative
//!   absolute function tolerance.
//! - **Problem shape**: [`validate_problem`] checks that the start point is
//!   finite and non-empty and that bounds match its length with
//!   `lower <= upper`.
//! - **Gradient validation**: [`validate_grad`] enforces dimension and finite
//!   entries for analytic or finite-difference gradients.
//! - **Projection**: [`project_onto_bounds`] clamps a point into the box.
use crate::optimization::{
    errors::{OptError, OptResult},
    local_optimizer::{Bounds, Grad, Theta},
};

pub fn verify_ftol(tol: f64) -> OptResult<()> {
    if !tol.is_finite() {
        return Err(OptError::InvalidFtol { tol, reason: "Tolerance must be finite." });
    }
    if tol < 0.0 {
        return Err(OptError::InvalidFtol { tol, reason: "Tolerance must be non-negative." });
    }
    Ok(())
}

pub fn validate_problem(theta0: &Theta, bounds: &Bounds) -> OptResult<()> {
    if theta0.is_empty() {
        return Err(OptError::EmptyParameterVector);
    }
    if bounds.len() != theta0.len() {
        return Err(OptError::BoundsLengthMismatch {
            expected: theta0.len(),
            found: bounds.len(),
        });
    }
    for (index, (&value, &(lower, upper))) in theta0.iter().zip(bounds.iter()).enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidStartingPoint { index, value });
        }
        if lower.is_nan() || upper.is_nan() || lower > upper {
            return Err(OptError::InvalidBounds { index, lower, upper });
        }
    }
    Ok(())
}

pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    for (index, &value) in grad.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidGradient {
                index,
                value,
                reason: "Gradient elements must be finite.",
            });
        }
    }
    Ok(())
}

/// Clamp every coordinate of `theta` into its `(lower, upper)` interval.
pub fn project_onto_bounds(theta: &Theta, bounds: &Bounds) -> Theta {
    let mut projected = theta.clone();
    for (value, &(lower, upper)) in projected.iter_mut().zip(bounds.iter()) {
        *value = value.clamp(lower, upper);
    }
    projected
}
