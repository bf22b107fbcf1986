//! Solver configuration types.

use crate::types::ConfigError;
use num_traits::Float;

/// Stopping rule shared by all solvers.
///
/// Every algorithm interprets its tolerance predicate slightly differently
/// (bracket half-width for bisection, step size or residual for the Newton
/// variants); the criterion selects whether that predicate is consulted at
/// all.
///
/// # Example
///
/// ```
/// use solver_core::solvers::ConvergenceCriterion;
///
/// // The tolerance-based rule is the default.
/// assert_eq!(ConvergenceCriterion::default(), ConvergenceCriterion::Tolerance);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConvergenceCriterion {
    /// Run exactly `max_iterations` iterations, then return the current
    /// estimate. Always yields a best-effort answer, never
    /// `ConvergenceFailure`.
    MaxIterations,

    /// Stop once the algorithm-specific tolerance predicate holds. Exhausting
    /// the iteration budget first is reported as `ConvergenceFailure`.
    #[default]
    Tolerance,
}

/// Configuration for root-finding algorithms.
///
/// Provides the settings shared across all solver implementations: the
/// convergence tolerance, the iteration budget, and the stopping rule.
/// Validation is eager: invalid values are rejected by [`SolverConfig::new`]
/// before any solver is built.
///
/// # Type Parameters
///
/// * `T` - Floating-point type for the tolerance (e.g., `f64`)
///
/// # Example
///
/// ```
/// use solver_core::solvers::{ConvergenceCriterion, SolverConfig};
///
/// // Use default configuration
/// let config: SolverConfig<f64> = SolverConfig::default();
/// assert!(config.tolerance < 1e-8);
/// assert!(config.max_iterations >= 50);
///
/// // Custom configuration
/// let custom = SolverConfig::new(1e-12, 200, ConvergenceCriterion::Tolerance).unwrap();
/// assert_eq!(custom.max_iterations, 200);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig<T: Float> {
    /// Convergence tolerance.
    ///
    /// Interpreted by each algorithm's own predicate; smaller values provide
    /// more precision but may require more iterations.
    pub tolerance: T,

    /// Maximum number of iterations.
    ///
    /// Under [`ConvergenceCriterion::Tolerance`] this is a budget whose
    /// exhaustion is an error; under [`ConvergenceCriterion::MaxIterations`]
    /// it is the exact number of iterations to run.
    pub max_iterations: usize,

    /// Stopping rule.
    pub criterion: ConvergenceCriterion,
}

impl<T: Float> Default for SolverConfig<T> {
    /// Create a default configuration with sensible values.
    ///
    /// Default values:
    /// - `tolerance`: 1e-10
    /// - `max_iterations`: 100
    /// - `criterion`: [`ConvergenceCriterion::Tolerance`]
    fn default() -> Self {
        Self {
            tolerance: T::from(1e-10).unwrap(),
            max_iterations: 100,
            criterion: ConvergenceCriterion::Tolerance,
        }
    }
}

impl<T: Float> SolverConfig<T> {
    /// Create a new configuration with specified values.
    ///
    /// # Arguments
    ///
    /// * `tolerance` - Convergence tolerance (must be finite and positive)
    /// * `max_iterations` - Iteration budget (must be > 0)
    /// * `criterion` - Stopping rule
    ///
    /// # Returns
    ///
    /// * `Ok(SolverConfig)` - Valid configuration
    /// * `Err(ConfigError::InvalidTolerance)` - Non-positive or non-finite tolerance
    /// * `Err(ConfigError::ZeroIterationBudget)` - Zero iteration budget
    ///
    /// # Example
    ///
    /// ```
    /// use solver_core::solvers::{ConvergenceCriterion, SolverConfig};
    ///
    /// let config = SolverConfig::new(1e-12, 200, ConvergenceCriterion::Tolerance).unwrap();
    /// assert_eq!(config.max_iterations, 200);
    ///
    /// assert!(SolverConfig::new(0.0, 200, ConvergenceCriterion::Tolerance).is_err());
    /// assert!(SolverConfig::new(1e-12, 0, ConvergenceCriterion::Tolerance).is_err());
    /// ```
    pub fn new(
        tolerance: T,
        max_iterations: usize,
        criterion: ConvergenceCriterion,
    ) -> Result<Self, ConfigError> {
        if tolerance <= T::zero() || !tolerance.is_finite() {
            return Err(ConfigError::invalid_tolerance(tolerance));
        }
        if max_iterations == 0 {
            return Err(ConfigError::ZeroIterationBudget);
        }
        Ok(Self {
            tolerance,
            max_iterations,
            criterion,
        })
    }

    /// Create a configuration with high precision settings.
    ///
    /// Uses tighter tolerance (1e-14) and more iterations (500)
    /// for cases requiring extreme precision.
    pub fn high_precision() -> Self {
        Self {
            tolerance: T::from(1e-14).unwrap(),
            max_iterations: 500,
            criterion: ConvergenceCriterion::Tolerance,
        }
    }

    /// Create a configuration optimised for fast convergence.
    ///
    /// Uses relaxed tolerance (1e-6) and fewer iterations (50)
    /// for cases where speed is more important than precision.
    pub fn fast() -> Self {
        Self {
            tolerance: T::from(1e-6).unwrap(),
            max_iterations: 50,
            criterion: ConvergenceCriterion::Tolerance,
        }
    }

    /// Returns true if the tolerance predicate is consulted while iterating.
    #[inline]
    pub(crate) fn tolerance_based(&self) -> bool {
        self.criterion == ConvergenceCriterion::Tolerance
    }
}
