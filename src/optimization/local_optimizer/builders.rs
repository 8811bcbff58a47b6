//! local_optimizer::builders — solver construction helpers.
//!
//! Purpose
//! -------
//! Provide small, focused builders for the local solvers so higher-level code
//! can request a configured solver without touching `argmin` generics.
//!
//! Key behaviors
//! -------------
//! - Build a Nelder–Mead solver from a bound-aware initial simplex around the
//!   start point, with the absolute function tolerance mapped onto the
//!   simplex cost standard deviation.
//! - Build L-BFGS solvers with either Hager–Zhang or More–Thuente line search,
//!   applying the cost-change tolerance via [`configure_lbfgs`].
//!
//! Conventions
//! -----------
//! - The builders never set `max_iters` or the initial parameter on the
//!   executor state; the runner owns those runtime concerns.
//! - Invalid tolerances rejected by `argmin` surface as [`OptError`] values
//!   via the crate's `From<Error>` implementation.
//!
//! [`OptError`]: crate::optimization::errors::OptError
use argmin::solver::{neldermead::NelderMead, quasinewton::LBFGS};

use crate::optimization::{
    errors::OptResult,
    local_optimizer::{
        traits::LocalOptions,
        types::{
            Bounds, Cost, DEFAULT_LBFGS_MEM, Grad, HagerZhangLS, LbfgsHagerZhang,
            LbfgsMoreThuente, MoreThuenteLS, NelderMeadSolver, SIMPLEX_ABS_STEP,
            SIMPLEX_REL_STEP, Theta,
        },
    },
};

pub fn build_nelder_mead(theta0: &Theta, bounds: &Bounds, ftol: f64) -> OptResult<NelderMeadSolver> {
    let simplex = initial_simplex(theta0, bounds);
    Ok(NelderMead::new(simplex).with_sd_tolerance(ftol)?)
}

pub fn build_optimizer_hager_zhang(opts: &LocalOptions, ftol: f64) -> OptResult<LbfgsHagerZhang> {
    let hager_zhang = HagerZhangLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsHagerZhang::new(hager_zhang, mem);
    configure_lbfgs(lbfgs, ftol)
}

pub fn build_optimizer_more_thuente(
    opts: &LocalOptions, ftol: f64,
) -> OptResult<LbfgsMoreThuente> {
    let more_thuente = MoreThuenteLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsMoreThuente::new(more_thuente, mem);
    configure_lbfgs(lbfgs, ftol)
}

pub fn configure_lbfgs<L>(
    solver: LBFGS<L, Theta, Grad, Cost>, ftol: f64,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    Ok(solver.with_tolerance_cost(ftol)?)
}

/// Initial simplex: `theta0` plus one vertex per coordinate.
///
/// Each vertex moves a single coordinate by `SIMPLEX_REL_STEP * |x|`, or by
/// `SIMPLEX_ABS_STEP` when `|x| < 1`. The step flips direction when it would
/// leave the box, and shrinks to half the remaining room when neither
/// direction fits.
pub fn initial_simplex(theta0: &Theta, bounds: &Bounds) -> Vec<Theta> {
    let mut simplex = Vec::with_capacity(theta0.len() + 1);
    simplex.push(theta0.clone());
    for (i, (&x, &(lower, upper))) in theta0.iter().zip(bounds.iter()).enumerate() {
        let step = if x.abs() >= 1.0 { SIMPLEX_REL_STEP * x.abs() } else { SIMPLEX_ABS_STEP };
        let moved = if x + step <= upper {
            x + step
        } else if x - step >= lower {
            x - step
        } else if upper - x >= x - lower {
            x + 0.5 * (upper - x)
        } else {
            x - 0.5 * (x - lower)
        };
        let mut vertex = theta0.clone();
        vertex[i] = moved;
        simplex.push(vertex);
    }
    simplex
}
