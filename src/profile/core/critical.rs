//! profile::core::critical — χ²-based critical loss level.
//!
//! For a deviance-type loss `Λ = -2 ln L`, the profile-likelihood confidence
//! region at level `α` is `{θ : Λ(θ) < Λ_min + χ²_{dof}(α)}`.
//! [`loss_crit_chi2`] returns that threshold for use as `loss_crit`.
use crate::profile::errors::{ProfileError, ProfileResult};
use statrs::distribution::{ChiSquared, ContinuousCDF};

/// Critical level `loss_min + F⁻¹_{χ²(dof)}(confidence)`.
///
/// Errors
/// ------
/// - `InvalidConfidence` unless `0 < confidence < 1`.
/// - `InvalidDof` for `dof == 0`.
/// - `NonFiniteLossCrit` when `loss_min` is not finite.
pub fn loss_crit_chi2(loss_min: f64, confidence: f64, dof: usize) -> ProfileResult<f64> {
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(ProfileError::InvalidConfidence { value: confidence });
    }
    if dof == 0 {
        return Err(ProfileError::InvalidDof { dof });
    }
    if !loss_min.is_finite() {
        return Err(ProfileError::NonFiniteLossCrit { value: loss_min });
    }
    let chi2 = ChiSquared::new(dof as f64)
        .map_err(|e| ProfileError::CriticalValue { text: e.to_string() })?;
    Ok(loss_min + chi2.inverse_cdf(confidence))
}
