//! Error types for structured error handling.
//!
//! This module provides:
//! - `ConfigError`: Errors detected eagerly while constructing intervals,
//!   configurations, or solver instances (fail-fast, never deferred)
//! - `SolverError`: Errors detected while iterating, once the target function
//!   has actually been evaluated

use num_traits::Float;
use thiserror::Error;

/// Construction-time configuration errors.
///
/// Every invalid input is rejected at the point where the raw value enters
/// the library: interval bounds in [`Interval::new`](crate::types::Interval::new),
/// tolerance and iteration budget in
/// [`SolverConfig::new`](crate::solvers::SolverConfig::new), and initial
/// guesses in the polishing solver constructors. Nothing is deferred to
/// `solve()`.
///
/// # Examples
/// ```
/// use solver_core::types::{ConfigError, Interval};
///
/// let err = Interval::<f64>::new(3.0, 1.0).unwrap_err();
/// assert!(matches!(err, ConfigError::InvalidInterval { .. }));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConfigError {
    /// Interval bounds are non-finite or not strictly increasing.
    #[error("invalid interval [{lower}, {upper}]: bounds must be finite with lower < upper")]
    InvalidInterval {
        /// Requested lower bound
        lower: f64,
        /// Requested upper bound
        upper: f64,
    },

    /// Tolerance is zero, negative, or non-finite.
    #[error("invalid tolerance {tolerance}: must be finite and positive")]
    InvalidTolerance {
        /// Requested tolerance
        tolerance: f64,
    },

    /// Iteration budget of zero.
    #[error("iteration budget must be at least 1")]
    ZeroIterationBudget,

    /// Initial guess for a polishing solver is not finite.
    #[error("invalid initial guess {guess}: must be finite")]
    NonFiniteGuess {
        /// Requested initial guess
        guess: f64,
    },
}

impl ConfigError {
    /// Build an `InvalidInterval` error from generic bounds.
    pub(crate) fn invalid_interval<T: Float>(lower: T, upper: T) -> Self {
        ConfigError::InvalidInterval {
            lower: lower.to_f64().unwrap_or(f64::NAN),
            upper: upper.to_f64().unwrap_or(f64::NAN),
        }
    }

    /// Build an `InvalidTolerance` error from a generic tolerance.
    pub(crate) fn invalid_tolerance<T: Float>(tolerance: T) -> Self {
        ConfigError::InvalidTolerance {
            tolerance: tolerance.to_f64().unwrap_or(f64::NAN),
        }
    }

    /// Build a `NonFiniteGuess` error from a generic guess.
    pub(crate) fn non_finite_guess<T: Float>(guess: T) -> Self {
        ConfigError::NonFiniteGuess {
            guess: guess.to_f64().unwrap_or(f64::NAN),
        }
    }
}

/// Solve-time errors.
///
/// Raised only once the target function has been evaluated. Each variant
/// carries the diagnostic state the algorithm held when it gave up.
///
/// # Variants
/// - `InvalidBounds`: the bracket does not straddle a sign change
/// - `Divergence`: a non-finite value or unusable derivative appeared
/// - `ConvergenceFailure`: iteration budget exhausted under the tolerance
///   criterion
///
/// # Examples
/// ```
/// use solver_core::types::SolverError;
///
/// let err = SolverError::ConvergenceFailure {
///     iterations: 100,
///     last_estimate: 1.5,
///     tolerance: 1e-12,
/// };
/// assert!(format!("{}", err).contains("100 iterations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverError {
    /// Function values at the bracket ends do not straddle a sign change.
    #[error(
        "invalid bounds: f({lower}) = {f_lower} and f({upper}) = {f_upper} do not bracket a sign change"
    )]
    InvalidBounds {
        /// Lower bracket end
        lower: f64,
        /// Upper bracket end
        upper: f64,
        /// Function value at the lower end
        f_lower: f64,
        /// Function value at the upper end
        f_upper: f64,
    },

    /// Iteration produced a non-finite value or an unusable derivative.
    #[error("diverged at iteration {iteration}: last value {last_value}")]
    Divergence {
        /// Iteration index at which divergence was detected (0-based)
        iteration: usize,
        /// The estimate held when iteration stopped
        last_value: f64,
    },

    /// Iteration budget exhausted without satisfying the tolerance criterion.
    #[error(
        "failed to converge after {iterations} iterations: last estimate {last_estimate}, tolerance {tolerance}"
    )]
    ConvergenceFailure {
        /// Number of iterations performed
        iterations: usize,
        /// Best estimate when the budget ran out
        last_estimate: f64,
        /// Tolerance that was not met
        tolerance: f64,
    },
}

impl SolverError {
    /// Build an `InvalidBounds` error from generic bracket state.
    pub(crate) fn invalid_bounds<T: Float>(lower: T, upper: T, f_lower: T, f_upper: T) -> Self {
        SolverError::InvalidBounds {
            lower: lower.to_f64().unwrap_or(f64::NAN),
            upper: upper.to_f64().unwrap_or(f64::NAN),
            f_lower: f_lower.to_f64().unwrap_or(f64::NAN),
            f_upper: f_upper.to_f64().unwrap_or(f64::NAN),
        }
    }

    /// Build a `Divergence` error from generic iteration state.
    pub(crate) fn divergence<T: Float>(iteration: usize, last_value: T) -> Self {
        SolverError::Divergence {
            iteration,
            last_value: last_value.to_f64().unwrap_or(f64::NAN),
        }
    }

    /// Build a `ConvergenceFailure` error from generic iteration state.
    pub(crate) fn convergence_failure<T: Float>(
        iterations: usize,
        last_estimate: T,
        tolerance: T,
    ) -> Self {
        SolverError::ConvergenceFailure {
            iterations,
            last_estimate: last_estimate.to_f64().unwrap_or(f64::NAN),
            tolerance: tolerance.to_f64().unwrap_or(f64::NAN),
        }
    }
}
