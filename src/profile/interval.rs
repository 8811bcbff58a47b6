//! profile::interval — two-sided profile-likelihood confidence intervals.
//!
//! Purpose
//! -------
//! Run [`get_endpoint`] in both directions for one coordinate and package
//! both endpoints, the resolved request and the loss at `theta_init` into a
//! [`ParamInterval`] for reporting.
//!
//! Key behaviors
//! -------------
//! - Both directions share one pair of scan bounds; when unset they default
//!   to `unscale((-9, 9))` under the scale of the scanned coordinate.
//! - [`get_intervals`] repeats the computation for every coordinate, each
//!   with its own default scan bounds.
//! - [`ParamInterval::profile_series`] exposes the `(value, loss)` points of
//!   both searches, sorted by value, for external plotting.
//!
//! Invariants & assumptions
//! ------------------------
//! - `result[0]` is always the left endpoint and `result[1]` the right one.
//! - Validation errors of either direction abort the whole interval.
use log::debug;

use crate::{
    optimization::local_optimizer::{Bounds, Theta},
    profile::{
        core::{
            options::{IntervalConfig, LossFunction, SearchOptions},
            points::{Direction, EndPoint, Method},
            scaling::Scale,
            validation::{
                check_initial_loss, default_scan_bound, resolve_bounds, resolve_scales,
                validate_theta,
            },
        },
        endpoint::get_endpoint,
        errors::{ProfileError, ProfileResult},
    },
};

/// Resolved request of an interval computation (defaults filled in).
#[derive(Debug, Clone, PartialEq)]
pub struct ParamIntervalInput {
    pub theta_init: Theta,
    pub theta_num: usize,
    pub loss_crit: f64,
    pub scale: Vec<Scale>,
    pub theta_bounds: Bounds,
    pub scan_bounds: (f64, f64),
    pub search: SearchOptions,
}

/// ParamInterval — both confidence endpoints of one coordinate.
///
/// - `input`: the resolved request.
/// - `loss_init`: `loss(theta_init)`.
/// - `method`: strategy used for both directions.
/// - `result`: `[left, right]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamInterval {
    pub input: ParamIntervalInput,
    pub loss_init: f64,
    pub method: Method,
    pub result: [EndPoint; 2],
}

impl ParamInterval {
    pub fn left(&self) -> &EndPoint {
        &self.result[0]
    }

    pub fn right(&self) -> &EndPoint {
        &self.result[1]
    }

    /// `(left, right)` endpoint values; `None` on a side without a border.
    pub fn bounds(&self) -> (Option<f64>, Option<f64>) {
        (self.left().value, self.right().value)
    }

    /// Whether a finite border was found on both sides.
    pub fn is_identifiable(&self) -> bool {
        self.result.iter().all(|ep| ep.status.is_border_found())
    }

    /// Plot data: the initial point and every profile point with a finite
    /// loss, as `(value, loss)` sorted by value.
    pub fn profile_series(&self) -> Vec<(f64, f64)> {
        let init = (self.input.theta_init[self.input.theta_num], self.loss_init);
        let mut series: Vec<(f64, f64)> = std::iter::once(init)
            .chain(
                self.result
                    .iter()
                    .flat_map(|ep| ep.profile_points.iter())
                    .filter(|p| p.loss.is_finite())
                    .map(|p| (p.value, p.loss)),
            )
            .collect();
        series.sort_by(|a, b| a.0.total_cmp(&b.0));
        series
    }
}

/// get_interval — confidence interval of `theta_init[theta_num]`.
///
/// Parameters
/// ----------
/// - `theta_init`, `theta_num`, `loss`, `method`: as for [`get_endpoint`].
/// - `config`: critical level, optional scales / bounds, optional
///   `(left, right)` scan bounds, and the search options.
///
/// Errors
/// ------
/// - `InvalidScanBounds` when the scan bounds are not ordered.
/// - Any validation error raised by [`get_endpoint`] for either direction.
pub fn get_interval<L: LossFunction + ?Sized>(
    theta_init: &Theta, theta_num: usize, loss: &L, method: Method, config: &IntervalConfig,
) -> ProfileResult<ParamInterval> {
    let scales = resolve_scales(config.scale.as_deref(), theta_init.len())?;
    let theta_bounds = resolve_bounds(config.theta_bounds.as_ref(), &scales)?;
    validate_theta(theta_init, theta_num)?;
    let scale_k = scales[theta_num];
    let (lower, upper) = config.scan_bounds.unwrap_or_else(|| {
        let left = default_scan_bound(scale_k, Direction::Left);
        (left, default_scan_bound(scale_k, Direction::Right))
    });
    if lower.is_nan() || upper.is_nan() || lower >= upper {
        return Err(ProfileError::InvalidScanBounds { lower, upper });
    }

    let left = get_endpoint(
        theta_init,
        theta_num,
        loss,
        method,
        Direction::Left,
        &config.endpoint_config(lower),
    )?;
    let right = get_endpoint(
        theta_init,
        theta_num,
        loss,
        method,
        Direction::Right,
        &config.endpoint_config(upper),
    )?;
    let loss_init = check_initial_loss(loss, theta_init, config.loss_crit)?;
    debug!(
        "get_interval: theta_num = {theta_num}, {method}: [{:?}, {:?}] ({}, {})",
        left.value, right.value, left.status, right.status
    );

    let input = ParamIntervalInput {
        theta_init: theta_init.clone(),
        theta_num,
        loss_crit: config.loss_crit,
        scale: scales,
        theta_bounds,
        scan_bounds: (lower, upper),
        search: config.search.clone(),
    };
    Ok(ParamInterval { input, loss_init, method, result: [left, right] })
}

/// Intervals for every coordinate of `theta_init`.
///
/// `config.scan_bounds` is ignored; each coordinate uses the default scan
/// bounds of its own scale.
pub fn get_intervals<L: LossFunction + ?Sized>(
    theta_init: &Theta, loss: &L, method: Method, config: &IntervalConfig,
) -> ProfileResult<Vec<ParamInterval>> {
    validate_theta(theta_init, 0)?;
    let per_coordinate = IntervalConfig { scan_bounds: None, ..config.clone() };
    (0..theta_init.len())
        .map(|k| get_interval(theta_init, k, loss, method, &per_coordinate))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        optimization::errors::OptResult,
        profile::core::points::{EndpointStatus, PointStatus, ProfilePoint},
    };
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Two-sided intervals on one- and two-parameter quadratics.
    // - Scan-bound defaults and validation.
    // - Plot data and identifiability helpers.
    // -------------------------------------------------------------------------

    fn parabola(t: &Theta) -> OptResult<f64> {
        Ok((t[0] - 3.0).powi(2))
    }

    #[test]
    // Purpose
    // -------
    // Verify a full interval on a one-dimensional parabola.
    //
    // Given
    // -----
    // - Loss `(x-3)²`, `loss_crit = 4`, `LIN_EXTRAPOL`.
    //
    // Expect
    // ------
    // - Endpoints near 1 and 5, `loss_init = 0`, default scan bounds ±9.
    fn get_interval_parabola() {
        // Arrange
        let cfg = IntervalConfig::new(4.0);

        // Act
        let iv = get_interval(&array![3.0], 0, &parabola, Method::LinExtrapol, &cfg)
            .expect("interval runs");

        // Assert
        let (l, r) = iv.bounds();
        assert!((l.expect("left") - 1.0).abs() < 2e-3);
        assert!((r.expect("right") - 5.0).abs() < 2e-3);
        assert_eq!(iv.loss_init, 0.0);
        assert_eq!(iv.input.scan_bounds, (-9.0, 9.0));
        assert_eq!(iv.left().direction, Direction::Left);
        assert_eq!(iv.right().direction, Direction::Right);
        assert!(iv.is_identifiable());
    }

    #[test]
    // Purpose
    // -------
    // Ensure that unordered scan bounds are rejected before any search.
    fn get_interval_rejects_unordered_scan_bounds() {
        let cfg = IntervalConfig::new(4.0).with_scan_bounds(5.0, 1.0);

        let err = get_interval(&array![3.0], 0, &parabola, Method::CicoOnePass, &cfg);

        assert_eq!(err, Err(ProfileError::InvalidScanBounds { lower: 5.0, upper: 1.0 }));
    }

    #[test]
    // Purpose
    // -------
    // Check that a narrow scan window makes the interval unidentifiable on
    // the clipped side.
    fn narrow_scan_bounds_clip_one_side() {
        let cfg = IntervalConfig::new(4.0).with_scan_bounds(-9.0, 4.0);

        let iv = get_interval(&array![3.0], 0, &parabola, Method::LinExtrapol, &cfg)
            .expect("interval runs");

        assert!(iv.left().status.is_border_found());
        assert_eq!(iv.right().status, EndpointStatus::ScanBoundReached);
        assert!(!iv.is_identifiable());
    }

    #[test]
    // Purpose
    // -------
    // Verify the plot series: sorted by value, includes the initial point,
    // and drops points without a finite loss.
    fn profile_series_is_sorted_and_contains_init() {
        // Arrange
        let cfg = IntervalConfig::new(4.0);
        let mut iv = get_interval(&array![3.0], 0, &parabola, Method::LinExtrapol, &cfg)
            .expect("interval runs");
        let extra = ProfilePoint::new(7.0, f64::NAN, array![7.0], PointStatus::LossError, 1);
        iv.result[1].profile_points.push(extra);

        // Act
        let series = iv.profile_series();

        // Assert
        assert!(series.windows(2).all(|w| w[0].0 <= w[1].0));
        assert!(series.contains(&(3.0, 0.0)));
        assert!(series.iter().all(|&(_, l)| l.is_finite()));
        assert!(series.iter().all(|&(x, _)| x != 7.0));
    }

    #[test]
    // Purpose
    // -------
    // Ensure that `get_intervals` covers every coordinate of a coupled
    // two-parameter loss.
    //
    // Given
    // -----
    // - Loss `(x0-3)² + (x0-x1-1)²` from `[3, 2]`, `loss_crit = 4`.
    //
    // Expect
    // ------
    // - Coordinate 0 in about `[1, 5]`; coordinate 1 in about
    //   `[2 - 2√2, 2 + 2√2]`.
    fn get_intervals_all_coordinates() {
        // Arrange
        let loss = |t: &Theta| -> OptResult<f64> {
            Ok((t[0] - 3.0).powi(2) + (t[0] - t[1] - 1.0).powi(2))
        };
        let cfg = IntervalConfig::new(4.0).with_scan_bounds(100.0, -100.0);

        // Act
        let ivs = get_intervals(&array![3.0, 2.0], &loss, Method::CicoOnePass, &cfg)
            .expect("intervals run");

        // Assert
        assert_eq!(ivs.len(), 2);
        let s = 2.0 * 2f64.sqrt();
        let (l0, r0) = ivs[0].bounds();
        let (l1, r1) = ivs[1].bounds();
        assert!((l0.expect("l0") - 1.0).abs() < 2e-2);
        assert!((r0.expect("r0") - 5.0).abs() < 2e-2);
        assert!((l1.expect("l1") - (2.0 - s)).abs() < 2e-2);
        assert!((r1.expect("r1") - (2.0 + s)).abs() < 2e-2);
        assert!(ivs.iter().all(|iv| iv.input.scan_bounds == (-9.0, 9.0)));
    }
}
