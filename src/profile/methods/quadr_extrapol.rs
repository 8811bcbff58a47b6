//! methods::quadr_extrapol — quadratic-extrapolation search (`QUADR_EXTRAPOL`).
//!
//! Stepping rule, by available history:
//!
//! - none: fixed step `scan_hini`;
//! - one earlier point `(x₂, L₂)`: fit `a x² + b x + c` through it and the
//!   current point `(x₃, L₃)` with zero slope at `x₂`, i.e. solve
//!
//!   ```text
//!   | x₃²  x₃  1 |   | a |   | L₃ |
//!   | x₂²  x₂  1 | · | b | = | L₂ |
//!   | 2x₂  1   0 |   | c |   | 0  |
//!   ```
//!
//! - two earlier points: fit the quadratic through all three points.
//!
//! The next trial is the larger root `(-b + √(b² - 4ac)) / 2a`. The rule falls
//! back to the fixed step when the system is singular, `a ≤ 0`, or the
//! discriminant is negative.
use crate::profile::{
    core::{
        options::SearchOptions,
        points::{Method, ProfilePoint, SearchOutcome},
    },
    errors::ProfileResult,
    methods::{
        EndpointSearch, RightEndpointProblem,
        extrapolation::{History, fixed_step, run_extrapolation},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuadrExtrapol;

impl EndpointSearch for QuadrExtrapol {
    fn method(&self) -> Method {
        Method::QuadrExtrapol
    }

    fn search(
        &self, problem: &RightEndpointProblem<'_>, options: &SearchOptions,
    ) -> ProfileResult<SearchOutcome> {
        run_extrapolation(problem, options, Method::QuadrExtrapol, next_value)
    }
}

pub fn next_value(history: &History, current: &ProfilePoint, scan_hini: f64) -> f64 {
    let (x3, l3) = (current.value, current.loss);
    let coeffs = match history {
        History::NoHistory => None,
        History::OnePoint(p2) => {
            let (x2, l2) = (p2.value, p2.loss);
            solve3([[x3 * x3, x3, 1.0], [x2 * x2, x2, 1.0], [2.0 * x2, 1.0, 0.0]], [l3, l2, 0.0])
        }
        History::TwoOrMorePoints { prev2: p1, prev1: p2 } => {
            let (x1, l1) = (p1.value, p1.loss);
            let (x2, l2) = (p2.value, p2.loss);
            solve3([[x3 * x3, x3, 1.0], [x2 * x2, x2, 1.0], [x1 * x1, x1, 1.0]], [l3, l2, l1])
        }
    };
    coeffs
        .and_then(|[a, b, c]| larger_root(a, b, c))
        .unwrap_or_else(|| fixed_step(current, scan_hini))
}

/// Larger real root of `a x² + b x + c` for an upward-opening parabola.
pub(crate) fn larger_root(a: f64, b: f64, c: f64) -> Option<f64> {
    if !(a > 0.0) {
        return None;
    }
    let disc = b * b - 4.0 * a * c;
    if !(disc >= 0.0) {
        return None;
    }
    let root = (-b + disc.sqrt()) / (2.0 * a);
    root.is_finite().then_some(root)
}

/// Solve a 3×3 system by Cramer's rule; `None` when singular.
pub(crate) fn solve3(m: [[f64; 3]; 3], rhs: [f64; 3]) -> Option<[f64; 3]> {
    let det = det3(&m);
    if det == 0.0 || !det.is_finite() {
        return None;
    }
    let mut out = [0.0; 3];
    for (col, slot) in out.iter_mut().enumerate() {
        let mut mc = m;
        for row in 0..3 {
            mc[row][col] = rhs[row];
        }
        *slot = det3(&mc) / det;
    }
    out.iter().all(|v| v.is_finite()).then_some(out)
}

fn det3(m: &[[f64; 3]; 3]) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}
