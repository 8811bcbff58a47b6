//! constrained — inequality-constrained minimization by augmented Lagrangian.
//!
//! Purpose
//! -------
//! Provide the constrained half of the optimizer contract: minimize an
//! objective subject to `gᵢ(θ) <= 0` and box bounds, under a shared
//! evaluation budget, using [`minimize_bounded`] as the pluggable local
//! sub-solver.
//!
//! Key behaviors
//! -------------
//! - [`minimize_constrained`] runs the outer multiplier/penalty loop and
//!   reports a [`ReturnCode`] with the final iterate, objective and
//!   constraint values.
//! - Errors raised by the objective or a constraint end the run with
//!   `ForcedStop`; callers can raise [`OptError::ForcedStop`] from a
//!   constraint to abort a search early.
//!
//! Invariants & assumptions
//! ------------------------
//! - The total number of evaluations never exceeds `max_evals`.
//! - A `FtolReached` outcome is feasible within every constraint tolerance.
//!
//! [`minimize_bounded`]: crate::optimization::local_optimizer::minimize_bounded
//! [`ReturnCode`]: crate::optimization::local_optimizer::ReturnCode
//! [`OptError::ForcedStop`]: crate::optimization::errors::OptError::ForcedStop

pub mod auglag;
pub mod types;

pub use self::auglag::minimize_constrained;
pub use self::types::{
    AugLagOptions, ConstrainedOutcome, ConstrainedProblem, InequalityConstraint, ScalarFn,
};

pub mod prelude {
    pub use super::auglag::minimize_constrained;
    pub use super::types::{AugLagOptions, ConstrainedOutcome, ConstrainedProblem, InequalityConstraint};
}
