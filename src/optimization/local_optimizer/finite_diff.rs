//! local_optimizer::finite_diff — forward-difference fallback with error capture.
//!
//! Purpose
//! -------
//! Provide the forward-difference gradient used by the adapter when the
//! central-difference approximation is not finite (typically because a perturbed
//! point fell where the objective is undefined). Errors raised by the
//! objective during differencing are captured in a side channel and surfaced
//! as [`OptError`] values instead of silently producing `NaN` gradients.
//!
//! Conventions
//! -----------
//! - The differenced closure has signature `Fn(&Theta) -> f64`; runtime
//!   failures are written into a `RefCell<Option<Error>>` and the closure
//!   returns `NaN`.
//! - Only the first captured error is reported.
use std::cell::RefCell;

use crate::optimization::{
    errors::OptResult,
    local_optimizer::{
        types::{Grad, Theta},
        validation::validate_grad,
    },
};
use argmin::core::Error;
use finitediff::FiniteDiff;

/// forward_gradient — forward-difference gradient with closure error capture.
///
/// Parameters
/// ----------
/// - `theta`: `&Theta`
///   Point at which the gradient is approximated.
/// - `func`: `&G`
///   Scalar closure that records failures in `captured` and returns `NaN`.
/// - `captured`: `&RefCell<Option<Error>>`
///   Side channel cleared before differencing and inspected afterwards.
///
/// Returns
/// -------
/// `OptResult<Grad>`
///   - `Ok(grad)` with `grad.len() == theta.len()` and finite entries.
///   - `Err(e)` with the captured closure error, or
///     `OptError::InvalidGradient` when an entry is not finite.
pub fn forward_gradient<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, captured: &RefCell<Option<Error>>,
) -> OptResult<Grad> {
    captured.replace(None);
    let grad = theta.forward_diff(func);
    let dim = theta.len();
    if let Some(err) = captured.take() {
        return Err(err.into());
    }
    validate_grad(&grad, dim)?;
    Ok(grad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptError;
    use ndarray::Array1;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Forward-difference gradients with and without closure errors.
    // - Validation failures for non-finite gradients.
    //
    // They intentionally DO NOT cover:
    // - End-to-end solver behavior (see `api`).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `forward_gradient` returns a valid gradient for a simple quadratic.
    //
    // Given
    // -----
    // - `theta = [0, 1]` and `f(θ) = θᵀθ`.
    //
    // Expect
    // ------
    // - A finite gradient of length 2 close to `[0, 2]`.
    fn forward_gradient_of_quadratic() {
        // Arrange
        let theta: Theta = Array1::from(vec![0.0_f64, 1.0]);
        let captured: RefCell<Option<Error>> = RefCell::new(None);
        let f = |x: &Theta| x.dot(x);

        // Act
        let grad = forward_gradient(&theta, &f, &captured)
            .expect("Gradient for quadratic should be computed successfully");

        // Assert
        assert_eq!(grad.len(), theta.len());
        assert!(grad[0].abs() < 1e-4);
        assert!((grad[1] - 2.0).abs() < 1e-4);
    }

    #[test]
    // Purpose
    // -------
    // Ensure that a loss error written into the side channel is surfaced
    // unchanged.
    //
    // Given
    // -----
    // - A closure that stores `OptError::LossEvaluation` and returns `NaN`.
    //
    // Expect
    // ------
    // - `Err(OptError::LossEvaluation { .. })`.
    fn forward_gradient_surfaces_captured_loss_error() {
        // Arrange
        let theta: Theta = Array1::from(vec![1.0_f64]);
        let captured: RefCell<Option<Error>> = RefCell::new(None);
        let f = |_: &Theta| {
            let err = OptError::LossEvaluation { text: "outside support".to_string() };
            captured.replace(Some(err.into()));
            f64::NAN
        };

        // Act
        let err = forward_gradient(&theta, &f, &captured)
            .expect_err("Error in closure should cause forward_gradient to fail");

        // Assert
        assert_eq!(err, OptError::LossEvaluation { text: "outside support".to_string() });
    }

    #[test]
    // Purpose
    // -------
    // Confirm that a NaN-valued objective without a captured error yields
    // `InvalidGradient`.
    //
    // Expect
    // ------
    // - `Err(OptError::InvalidGradient { .. })`.
    fn forward_gradient_rejects_nan_objective() {
        let theta: Theta = Array1::from(vec![0.0_f64, 1.0]);
        let captured: RefCell<Option<Error>> = RefCell::new(None);
        let f = |_x: &Theta| f64::NAN;

        let err = forward_gradient(&theta, &f, &captured).expect_err("NaN gradient");
        assert!(matches!(err, OptError::InvalidGradient { .. }));
    }
}
