//! local_optimizer::types — shared numeric aliases and solver wiring.
//!
//! Purpose
//! -------
//! Centralize the numeric types and `argmin` solver aliases used by the
//! bounded local optimizer so the rest of the crate never spells out
//! `ndarray` or `argmin` generics directly.
//!
//! Conventions
//! -----------
//! - `Theta` and `Grad` are column vectors whose length is the number of free
//!   coordinates of the problem being minimized.
//! - `Bounds` holds one `(lower, upper)` pair per coordinate; infinite values
//!   mean "unbounded" on that side.
//! - `Cost` is always the quantity being *minimized*.
use argmin::{
    core::IterState,
    solver::{
        linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
        neldermead::NelderMead,
        quasinewton::LBFGS,
    },
};
use ndarray::Array1;

pub type Theta = Array1<f64>;

pub type Grad = Array1<f64>;

pub type Cost = f64;

pub type Bounds = Vec<(f64, f64)>;

pub const DEFAULT_LBFGS_MEM: usize = 7;

/// Relative size of the initial simplex edge along each coordinate.
pub const SIMPLEX_REL_STEP: f64 = 0.1;

/// Simplex edge used for coordinates whose magnitude is below one.
pub const SIMPLEX_ABS_STEP: f64 = 0.1;

pub type NelderMeadSolver = NelderMead<Theta, Cost>;

pub type HagerZhangLS = HagerZhangLineSearch<Theta, Grad, Cost>;

pub type MoreThuenteLS = MoreThuenteLineSearch<Theta, Grad, Cost>;

pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Theta, Grad, Cost>;

pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Theta, Grad, Cost>;

pub type SimplexState = IterState<Theta, (), (), (), (), Cost>;

pub type GradientState = IterState<Theta, Grad, (), (), (), Cost>;
