//! optimization::errors — unified error surface for the optimizer layer.
//!
//! Purpose
//! -------
//! Collect every failure mode of the local and constrained optimizers into a
//! single enum, [`OptError`], with a shared result alias [`OptResult`]. Loss
//! functions supplied by callers also report invalid inputs through this type.
//!
//! Key behaviors
//! -------------
//! - Mirror `argmin`'s [`ArgminError`] variants so backend errors never leak
//!   across module boundaries.
//! - Recover an [`OptError`] that travelled through `argmin` as an
//!   `argmin::core::Error` (e.g. a loss error raised inside a cost call)
//!   instead of flattening it into a backend string.
//! - Distinguish evaluation-budget exhaustion ([`OptError::BudgetExhausted`])
//!   and caller-requested stops ([`OptError::ForcedStop`]) from genuine
//!   failures so runners can map them to return codes.
//!
//! Conventions
//! -----------
//! - Variants are grouped by origin with `// ---- Section ----` markers.
//! - `Display` messages are short, human-readable, and include the offending
//!   value where one exists.
use argmin::core::{ArgminError, Error};

pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Gradient ----
    GradientNotImplemented,

    GradientDimMismatch {
        expected: usize,
        found: usize,
    },

    InvalidGradient {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    // ---- Options ----
    InvalidFtol {
        tol: f64,
        reason: &'static str,
    },
    InvalidMaxEvals {
        max_evals: usize,
        reason: &'static str,
    },
    InvalidLocalAlgorithm {
        name: String,
        reason: &'static str,
    },
    InvalidLBFGSMem {
        mem: usize,
        reason: &'static str,
    },
    InvalidConstraintTol {
        index: usize,
        tol: f64,
    },

    // ---- Problem shape ----
    EmptyParameterVector,

    BoundsLengthMismatch {
        expected: usize,
        found: usize,
    },

    InvalidBounds {
        index: usize,
        lower: f64,
        upper: f64,
    },

    InvalidStartingPoint {
        index: usize,
        value: f64,
    },

    // ---- Cost function ----
    NonFiniteCost {
        value: f64,
    },

    LossEvaluation {
        text: String,
    },

    // ---- Run control ----
    BudgetExhausted {
        max_evals: usize,
    },

    ForcedStop {
        reason: String,
    },

    // ---- Argmin ---
    InvalidParameter {
        text: String,
    },
    NotImplemented {
        text: String,
    },
    NotInitialized {
        text: String,
    },
    ConditionViolated {
        text: String,
    },
    CheckPointNotFound {
        text: String,
    },
    PotentialBug {
        text: String,
    },
    ImpossibleError {
        text: String,
    },
    BackendError {
        text: String,
    },

    // ---- Fallback ----
    UnknownError,
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Gradient ----
            OptError::GradientNotImplemented => {
                write!(f, "Analytic gradient not implemented")
            }
            OptError::GradientDimMismatch { expected, found } => {
                write!(f, "Gradient dimension mismatch: expected {expected}, found {found}")
            }
            OptError::InvalidGradient { index, value, reason } => {
                write!(f, "Invalid gradient at index {index}: {value}: {reason}")
            }

            // ---- Options ----
            OptError::InvalidFtol { tol, reason } => {
                write!(f, "Invalid absolute function tolerance {tol}: {reason}")
            }
            OptError::InvalidMaxEvals { max_evals, reason } => {
                write!(f, "Invalid maximum evaluations {max_evals}: {reason}")
            }
            OptError::InvalidLocalAlgorithm { name, reason } => {
                write!(f, "Invalid local algorithm '{name}': {reason}")
            }
            OptError::InvalidLBFGSMem { mem, reason } => {
                write!(f, "Invalid L-BFGS memory {mem}: {reason}")
            }
            OptError::InvalidConstraintTol { index, tol } => {
                write!(
                    f,
                    "Invalid tolerance {tol} for constraint {index}, must be finite and >= 0"
                )
            }

            // ---- Problem shape ----
            OptError::EmptyParameterVector => {
                write!(f, "Parameter vector must have at least one element")
            }
            OptError::BoundsLengthMismatch { expected, found } => {
                write!(f, "Bounds length mismatch: expected {expected}, found {found}")
            }
            OptError::InvalidBounds { index, lower, upper } => {
                write!(f, "Invalid bounds at index {index}: [{lower}, {upper}]")
            }
            OptError::InvalidStartingPoint { index, value } => {
                write!(f, "Invalid starting point at index {index}: {value}, must be finite")
            }

            // ---- Cost function ----
            OptError::NonFiniteCost { value } => {
                write!(f, "Non-finite cost value: {value}")
            }
            OptError::LossEvaluation { text } => {
                write!(f, "Loss function failed: {text}")
            }

            // ---- Run control ----
            OptError::BudgetExhausted { max_evals } => {
                write!(f, "Evaluation budget of {max_evals} calls exhausted")
            }
            OptError::ForcedStop { reason } => {
                write!(f, "Optimization stopped by caller: {reason}")
            }

            // ---- Argmin ----
            OptError::InvalidParameter { text } => {
                write!(f, "Invalid parameter: {text}")
            }
            OptError::NotImplemented { text } => {
                write!(f, "Not implemented: {text}")
            }
            OptError::NotInitialized { text } => {
                write!(f, "Not initialized: {text}")
            }
            OptError::ConditionViolated { text } => {
                write!(f, "Condition violated: {text}")
            }
            OptError::CheckPointNotFound { text } => {
                write!(f, "Checkpoint not found: {text}")
            }
            OptError::PotentialBug { text } => {
                write!(f, "Potential bug: {text}")
            }
            OptError::ImpossibleError { text } => {
                write!(f, "Impossible error: {text}")
            }
            OptError::BackendError { text } => {
                write!(f, "Backend error: {text}")
            }

            // ---- Fallback ----
            OptError::UnknownError => {
                write!(f, "Unknown error")
            }
        }
    }
}

impl From<Error> for OptError {
    fn from(original_err: Error) -> Self {
        if let Some(opt_err) = original_err.chain().find_map(|e| e.downcast_ref::<OptError>()) {
            return opt_err.clone();
        }
        match original_err.downcast() {
            Ok(argmin_err) => match argmin_err {
                ArgminError::InvalidParameter { text } => OptError::InvalidParameter { text },
                ArgminError::NotImplemented { text } => OptError::NotImplemented { text },
                ArgminError::NotInitialized { text } => OptError::NotInitialized { text },
                ArgminError::ConditionViolated { text } => OptError::ConditionViolated { text },
                ArgminError::CheckpointNotFound { text } => OptError::CheckPointNotFound { text },
                ArgminError::PotentialBug { text } => OptError::PotentialBug { text },
                ArgminError::ImpossibleError { text } => OptError::ImpossibleError { text },
                _ => OptError::UnknownError,
            },
            Err(err) => OptError::BackendError { text: err.to_string() },
        }
    }
}

impl OptError {
    /// True for errors raised by the evaluated function itself (loss failures,
    /// non-finite values, caller stops) rather than by the optimizer backend.
    pub fn is_evaluation_failure(&self) -> bool {
        matches!(
            self,
            OptError::LossEvaluation { .. }
                | OptError::NonFiniteCost { .. }
                | OptError::ForcedStop { .. }
        )
    }
}
