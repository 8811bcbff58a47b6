//! profile::core::validation — request checks run before any search starts.
//!
//! Every check returns a descriptive [`ProfileError`] and performs no partial
//! work. [`get_endpoint`](crate::profile::endpoint::get_endpoint) runs them in
//! this order:
//!
//! 1. shapes (`theta_init`, `scale`, `theta_bounds`), finiteness of `theta_init`;
//! 2. `theta_num` in range;
//! 3. bounds ordered and compatible with each scale mode;
//! 4. `theta_init` strictly inside `theta_bounds`;
//! 5. scan bound strictly inside the bounds of the scanned coordinate;
//! 6. `theta_init[theta_num]` strictly on the searched side of the scan bound;
//! 7. `loss(theta_init)` evaluates to a finite value below `loss_crit`.
use crate::{
    optimization::local_optimizer::{Bounds, Theta},
    profile::{
        core::{
            options::{DEFAULT_SCAN_BOUND, LossFunction},
            points::Direction,
            scaling::Scale,
        },
        errors::{ProfileError, ProfileResult},
    },
};

/// Per-coordinate scale modes, `Direct` everywhere when unset.
pub fn resolve_scales(scale: Option<&[Scale]>, n: usize) -> ProfileResult<Vec<Scale>> {
    match scale {
        None => Ok(vec![Scale::Direct; n]),
        Some(s) if s.len() != n => {
            Err(ProfileError::LengthMismatch { what: "scale", expected: n, actual: s.len() })
        }
        Some(s) => Ok(s.to_vec()),
    }
}

/// Natural-domain bounds, taken from the scale modes when unset.
pub fn resolve_bounds(theta_bounds: Option<&Bounds>, scales: &[Scale]) -> ProfileResult<Bounds> {
    match theta_bounds {
        None => Ok(scales.iter().map(Scale::default_bounds).collect()),
        Some(b) if b.len() != scales.len() => Err(ProfileError::LengthMismatch {
            what: "theta_bounds",
            expected: scales.len(),
            actual: b.len(),
        }),
        Some(b) => Ok(b.clone()),
    }
}

/// `unscale(±9)` for the scanned coordinate, sign given by `direction`.
pub fn default_scan_bound(scale: Scale, direction: Direction) -> f64 {
    match direction {
        Direction::Left => scale.unscale(-DEFAULT_SCAN_BOUND),
        Direction::Right => scale.unscale(DEFAULT_SCAN_BOUND),
    }
}

pub fn validate_theta(theta_init: &Theta, theta_num: usize) -> ProfileResult<()> {
    if theta_init.is_empty() {
        return Err(ProfileError::EmptyTheta);
    }
    for (index, &value) in theta_init.iter().enumerate() {
        if !value.is_finite() {
            return Err(ProfileError::NonFiniteTheta { index, value });
        }
    }
    if theta_num >= theta_init.len() {
        return Err(ProfileError::ThetaNumOutOfRange { theta_num, len: theta_init.len() });
    }
    Ok(())
}

/// Bounds must be ordered, admissible for their scale mode, and contain
/// `theta_init` strictly.
pub fn validate_bounds(theta_init: &Theta, bounds: &Bounds, scales: &[Scale]) -> ProfileResult<()> {
    for (index, (&(lower, upper), scale)) in bounds.iter().zip(scales.iter()).enumerate() {
        if lower.is_nan() || upper.is_nan() || lower >= upper {
            return Err(ProfileError::InvalidThetaBounds { index, lower, upper });
        }
        if !scale.admits_bounds(lower, upper) {
            return Err(ProfileError::InvalidBoundsForScale {
                index,
                scale: scale.name(),
                lower,
                upper,
            });
        }
    }
    for (index, (&value, &(lower, upper))) in theta_init.iter().zip(bounds.iter()).enumerate() {
        if !(lower < value && value < upper) {
            return Err(ProfileError::ThetaInitOutOfBounds { index, value, lower, upper });
        }
    }
    Ok(())
}

pub fn validate_scan_bound(
    value: f64, scan_bound: f64, bound: (f64, f64), direction: Direction,
) -> ProfileResult<()> {
    let (lower, upper) = bound;
    if !(lower < scan_bound && scan_bound < upper) {
        return Err(ProfileError::ScanBoundOutOfBounds { scan_bound, lower, upper });
    }
    let wrong_side = match direction {
        Direction::Right => value >= scan_bound,
        Direction::Left => value <= scan_bound,
    };
    if wrong_side {
        return Err(ProfileError::ScanBoundWrongSide {
            direction: direction.as_str(),
            value,
            scan_bound,
        });
    }
    Ok(())
}

/// Evaluate the loss at `theta_init` and require it below `loss_crit`.
pub fn check_initial_loss<L: LossFunction + ?Sized>(
    loss: &L, theta_init: &Theta, loss_crit: f64,
) -> ProfileResult<f64> {
    if !loss_crit.is_finite() {
        return Err(ProfileError::NonFiniteLossCrit { value: loss_crit });
    }
    let value = loss.loss(theta_init).map_err(|source| ProfileError::LossAtInit { source })?;
    if !(value < loss_crit) {
        return Err(ProfileError::LossAboveCritical { loss: value, loss_crit });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::{OptError, OptResult};
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Defaults derived from scale modes.
    // - Each rejection path with its error variant.
    //
    // They intentionally DO NOT cover:
    // - The order in which `get_endpoint` applies the checks (see
    //   `profile::endpoint`).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that unset scales and bounds resolve to the scale defaults.
    //
    // Expect
    // ------
    // - `Direct` everywhere; bounds `(0, ∞)` for a log coordinate.
    // - Length mismatches are reported with the offending field name.
    fn resolve_defaults_and_lengths() {
        assert_eq!(resolve_scales(None, 2), Ok(vec![Scale::Direct; 2]));
        let scales = vec![Scale::Log, Scale::Direct];
        assert_eq!(
            resolve_bounds(None, &scales),
            Ok(vec![(0.0, f64::INFINITY), (f64::NEG_INFINITY, f64::INFINITY)])
        );
        assert_eq!(
            resolve_scales(Some(&[Scale::Log]), 2),
            Err(ProfileError::LengthMismatch { what: "scale", expected: 2, actual: 1 })
        );
        assert!(matches!(
            resolve_bounds(Some(&vec![(0.0, 1.0)]), &scales),
            Err(ProfileError::LengthMismatch { what: "theta_bounds", .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Check the default scan bound in natural units.
    fn default_scan_bound_unscales_nine() {
        assert_eq!(default_scan_bound(Scale::Direct, Direction::Right), 9.0);
        assert_eq!(default_scan_bound(Scale::Direct, Direction::Left), -9.0);
        assert!((default_scan_bound(Scale::Log, Direction::Left) - 1e-9).abs() < 1e-20);
    }

    #[test]
    // Purpose
    // -------
    // Ensure that malformed parameter vectors are rejected.
    fn validate_theta_rejects_bad_input() {
        assert_eq!(validate_theta(&Theta::zeros(0), 0), Err(ProfileError::EmptyTheta));
        assert!(matches!(
            validate_theta(&array![1.0, f64::NAN], 0),
            Err(ProfileError::NonFiniteTheta { index: 1, .. })
        ));
        assert_eq!(
            validate_theta(&array![1.0, 2.0], 2),
            Err(ProfileError::ThetaNumOutOfRange { theta_num: 2, len: 2 })
        );
        assert_eq!(validate_theta(&array![1.0, 2.0], 1), Ok(()));
    }

    #[test]
    // Purpose
    // -------
    // Verify the bound checks.
    //
    // Expect
    // ------
    // - A negative lower bound under `log` is `InvalidBoundsForScale`.
    // - A start on the bound itself is `ThetaInitOutOfBounds`.
    fn validate_bounds_rejects_incompatible_or_touching() {
        let theta = array![1.0, 0.5];
        let scales = vec![Scale::Log, Scale::Direct];
        assert!(matches!(
            validate_bounds(&theta, &vec![(-1.0, 10.0), (0.0, 1.0)], &scales),
            Err(ProfileError::InvalidBoundsForScale { index: 0, .. })
        ));
        assert!(matches!(
            validate_bounds(&theta, &vec![(0.0, 10.0), (0.5, 1.0)], &scales),
            Err(ProfileError::ThetaInitOutOfBounds { index: 1, .. })
        ));
        assert!(matches!(
            validate_bounds(&theta, &vec![(0.0, 10.0), (1.0, 1.0)], &scales),
            Err(ProfileError::InvalidThetaBounds { index: 1, .. })
        ));
        assert_eq!(validate_bounds(&theta, &vec![(0.0, 10.0), (0.0, 1.0)], &scales), Ok(()));
    }

    #[test]
    // Purpose
    // -------
    // Check scan-bound placement for both directions.
    fn validate_scan_bound_checks_side_and_range() {
        let b = (0.0, 10.0);
        assert_eq!(validate_scan_bound(3.0, 9.0, b, Direction::Right), Ok(()));
        assert_eq!(validate_scan_bound(3.0, 1.0, b, Direction::Left), Ok(()));
        assert!(matches!(
            validate_scan_bound(3.0, 1.0, b, Direction::Right),
            Err(ProfileError::ScanBoundWrongSide { direction: "right", .. })
        ));
        assert!(matches!(
            validate_scan_bound(3.0, 10.0, b, Direction::Right),
            Err(ProfileError::ScanBoundOutOfBounds { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Verify the initial-loss check.
    //
    // Expect
    // ------
    // - A value above the critical level is `LossAboveCritical`.
    // - A failing loss is wrapped in `LossAtInit`.
    fn check_initial_loss_paths() {
        let ok = |t: &Theta| -> OptResult<f64> { Ok(t[0]) };
        let bad = |_: &Theta| -> OptResult<f64> {
            Err(OptError::LossEvaluation { text: "boom".to_string() })
        };
        assert_eq!(check_initial_loss(&ok, &array![2.0], 3.0), Ok(2.0));
        assert!(matches!(
            check_initial_loss(&ok, &array![4.0], 3.0),
            Err(ProfileError::LossAboveCritical { .. })
        ));
        assert!(matches!(
            check_initial_loss(&bad, &array![1.0], 3.0),
            Err(ProfileError::LossAtInit { .. })
        ));
        assert!(matches!(
            check_initial_loss(&ok, &array![1.0], f64::NAN),
            Err(ProfileError::NonFiniteLossCrit { .. })
        ));
    }
}
