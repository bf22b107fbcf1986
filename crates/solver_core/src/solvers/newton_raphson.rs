//! Newton-Raphson root-finding solver.

use super::bracket::{accept_distinct_root, scan_range, sort_roots, ScanCandidate};
use super::{DerivativeProvider, RootSolver, SolverConfig};
use crate::types::{ConfigError, Interval, SolverError};
use num_traits::Float;
use std::fmt;

/// Newton-Raphson root finder (polishing method).
///
/// Uses Newton's iteration `x_{n+1} = x_n - f(x_n) / f'(x_n)` from a single
/// initial guess. Convergence is quadratic near a simple root, but no bracket
/// is maintained, so convergence is not guaranteed: a zero, NaN, or infinite
/// derivative, or an iterate escaping to a non-finite value, is reported as
/// [`SolverError::Divergence`].
///
/// The derivative comes from the configured [`DerivativeProvider`]: a
/// central-difference stencil over the target function, or an externally
/// supplied derivative function.
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f64`)
/// * `F` - Target function
///
/// # Example
///
/// ```
/// use solver_core::solvers::{DerivativeProvider, NewtonRaphsonSolver, RootSolver, SolverConfig};
///
/// let f = |x: f64| x * x - 2.0;
/// let solver = NewtonRaphsonSolver::new(
///     f,
///     1.0,
///     DerivativeProvider::predefined(|x: f64| 2.0 * x),
///     SolverConfig::default(),
/// )
/// .unwrap();
///
/// let root = solver.solve().unwrap();
/// assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
#[derive(Clone)]
pub struct NewtonRaphsonSolver<T, F>
where
    T: Float,
    F: Fn(T) -> T,
{
    /// Target function
    f: F,
    /// Initial guess
    guess: T,
    /// Derivative evaluation strategy
    derivative: DerivativeProvider<T>,
    /// Solver configuration
    config: SolverConfig<T>,
}

impl<T, F> NewtonRaphsonSolver<T, F>
where
    T: Float,
    F: Fn(T) -> T,
{
    /// Create a new Newton-Raphson solver.
    ///
    /// # Arguments
    ///
    /// * `f` - Target function
    /// * `guess` - Starting estimate; must be finite
    /// * `derivative` - Derivative evaluation strategy
    /// * `config` - Solver configuration
    ///
    /// # Returns
    ///
    /// * `Ok(NewtonRaphsonSolver)` - Valid solver
    /// * `Err(ConfigError::NonFiniteGuess)` - Non-finite starting estimate
    pub fn new(
        f: F,
        guess: T,
        derivative: DerivativeProvider<T>,
        config: SolverConfig<T>,
    ) -> Result<Self, ConfigError> {
        if !guess.is_finite() {
            return Err(ConfigError::non_finite_guess(guess));
        }
        Ok(Self {
            f,
            guess,
            derivative,
            config,
        })
    }

    /// Create a solver with default configuration and numerical derivatives.
    pub fn with_defaults(f: F, guess: T) -> Result<Self, ConfigError> {
        Self::new(
            f,
            guess,
            DerivativeProvider::numerical(),
            SolverConfig::default(),
        )
    }

    /// Derive a solver for a different initial guess.
    ///
    /// Returns a new instance; the original is never mutated.
    pub fn with_guess(&self, guess: T) -> Result<Self, ConfigError>
    where
        F: Clone,
    {
        if !guess.is_finite() {
            return Err(ConfigError::non_finite_guess(guess));
        }
        Ok(Self {
            f: self.f.clone(),
            guess,
            derivative: self.derivative.clone(),
            config: self.config,
        })
    }

    /// Returns the initial guess.
    pub fn guess(&self) -> T {
        self.guess
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }

    fn solve_from(&self, guess: T) -> Result<T, SolverError> {
        let tolerance = self.config.tolerance;
        let mut x = guess;

        for iteration in 0..self.config.max_iterations {
            if !x.is_finite() {
                return Err(SolverError::divergence(iteration, x));
            }

            let fx = (self.f)(x);
            let dfx = self.derivative.evaluate(&self.f, x);
            if dfx == T::zero() || !dfx.is_finite() {
                // Derivative is unusable; the step x - f/f' is meaningless.
                return Err(SolverError::divergence(iteration, x));
            }

            let dx = -fx / dfx;
            let x_new = x + dx;

            if self.config.tolerance_based() {
                if dx.abs() < tolerance {
                    return Ok(x_new);
                }
                // The pre-step residual is judged against the pre-step point.
                if fx.abs() < tolerance {
                    return Ok(x);
                }
            }

            if !x_new.is_finite() {
                return Err(SolverError::divergence(iteration, x_new));
            }
            x = x_new;
        }

        if self.config.tolerance_based() {
            Err(SolverError::convergence_failure(
                self.config.max_iterations,
                x,
                tolerance,
            ))
        } else {
            Ok(x)
        }
    }
}

impl<T, F> RootSolver<T> for NewtonRaphsonSolver<T, F>
where
    T: Float,
    F: Fn(T) -> T,
{
    fn solve(&self) -> Result<T, SolverError> {
        self.solve_from(self.guess)
    }

    fn solve_all(&self, range: Interval<T>, subdivisions: usize) -> Vec<T> {
        let min_spacing = self.config.tolerance;
        let mut roots = Vec::new();
        for candidate in scan_range(&self.f, &range, subdivisions) {
            let found = match candidate {
                ScanCandidate::Bracket(interval) => self.solve_from(interval.midpoint()).ok(),
                ScanCandidate::Root(x) => Some(x),
            };
            if let Some(root) = found {
                accept_distinct_root(&mut roots, root, min_spacing);
            }
        }
        sort_roots(&mut roots);
        roots
    }
}

impl<T, F> fmt::Debug for NewtonRaphsonSolver<T, F>
where
    T: Float + fmt::Debug,
    F: Fn(T) -> T,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewtonRaphsonSolver")
            .field("guess", &self.guess)
            .field("derivative", &self.derivative)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solvers::ConvergenceCriterion;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    // ========================================
    // Basic Functionality Tests
    // ========================================

    #[test]
    fn test_find_sqrt_2_with_predefined_derivative() {
        let solver = NewtonRaphsonSolver::new(
            |x: f64| x * x - 2.0,
            1.0,
            DerivativeProvider::predefined(|x: f64| 2.0 * x),
            SolverConfig::default(),
        )
        .unwrap();

        let root = solver.solve().unwrap();
        assert!(
            (root - std::f64::consts::SQRT_2).abs() < 1e-10,
            "Expected √2 ≈ {}, got {}",
            std::f64::consts::SQRT_2,
            root
        );
    }

    #[test]
    fn test_find_cubic_root_with_numerical_derivative() {
        let solver =
            NewtonRaphsonSolver::with_defaults(|x: f64| x * x * x - x - 2.0, 1.5).unwrap();

        let root = solver.solve().unwrap();
        let f = |x: f64| x * x * x - x - 2.0;
        assert!(
            f(root).abs() < 1e-9,
            "f(root) = {} should be near zero",
            f(root)
        );
    }

    #[test]
    fn test_find_sin_root() {
        let solver = NewtonRaphsonSolver::new(
            |x: f64| x.sin(),
            3.0,
            DerivativeProvider::predefined(|x: f64| x.cos()),
            SolverConfig::default(),
        )
        .unwrap();

        let root = solver.solve().unwrap();
        assert!(
            (root - std::f64::consts::PI).abs() < 1e-10,
            "Expected π ≈ {}, got {}",
            std::f64::consts::PI,
            root
        );
    }

    #[cfg(feature = "num-dual-mode")]
    #[test]
    fn test_find_root_with_dual_derivative() {
        use num_dual::Dual64;

        let solver = NewtonRaphsonSolver::new(
            |x: f64| x * x - 2.0,
            1.0,
            DerivativeProvider::symbolic_from_dual(|x: Dual64| x * x - Dual64::from(2.0)),
            SolverConfig::default(),
        )
        .unwrap();

        let root = solver.solve().unwrap();
        assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
    }

    // ========================================
    // Convergence behaviour
    // ========================================

    #[test]
    fn test_quadratic_convergence_iteration_count() {
        // One derivative evaluation per iteration: counting them counts
        // iterations. From 1.5 the error roughly squares each step, so six
        // iterations are ample for 1e-10.
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let config = SolverConfig::new(1e-10, 100, ConvergenceCriterion::Tolerance).unwrap();
        let solver = NewtonRaphsonSolver::new(
            |x: f64| x * x - 4.0,
            1.5,
            DerivativeProvider::predefined(move |x: f64| {
                counter.fetch_add(1, Ordering::Relaxed);
                2.0 * x
            }),
            config,
        )
        .unwrap();

        let root = solver.solve().unwrap();
        assert!((root - 2.0).abs() < 1e-10);
        assert!(
            calls.load(Ordering::Relaxed) <= 6,
            "took {} iterations",
            calls.load(Ordering::Relaxed)
        );
    }

    #[test]
    fn test_small_residual_returns_pre_step_point() {
        // |f(x0)| is already below tolerance but the Newton step is huge; the
        // solver must return the original point, not the stepped one.
        let config = SolverConfig::new(1e-10, 100, ConvergenceCriterion::Tolerance).unwrap();
        let solver = NewtonRaphsonSolver::new(
            |_x: f64| 1e-12,
            0.0,
            DerivativeProvider::predefined(|_x: f64| 1e-12),
            config,
        )
        .unwrap();

        assert_eq!(solver.solve().unwrap(), 0.0);
    }

    #[test]
    fn test_iteration_criterion_returns_best_effort() {
        let config = SolverConfig::new(1e-10, 4, ConvergenceCriterion::MaxIterations).unwrap();
        let solver = NewtonRaphsonSolver::new(
            |x: f64| x * x - 2.0,
            1.0,
            DerivativeProvider::predefined(|x: f64| 2.0 * x),
            config,
        )
        .unwrap();

        let root = solver.solve().unwrap();
        assert!((root - std::f64::consts::SQRT_2).abs() < 1e-6);
    }

    // ========================================
    // Error Handling Tests
    // ========================================

    #[test]
    fn test_zero_derivative_diverges() {
        // (x - 1)² from its own root: f and f' both vanish at x = 1.
        let solver = NewtonRaphsonSolver::new(
            |x: f64| (x - 1.0) * (x - 1.0),
            1.0,
            DerivativeProvider::predefined(|x: f64| 2.0 * (x - 1.0)),
            SolverConfig::default(),
        )
        .unwrap();

        match solver.solve().unwrap_err() {
            SolverError::Divergence { iteration, last_value } => {
                assert_eq!(iteration, 0);
                assert_eq!(last_value, 1.0);
            }
            other => panic!("Expected Divergence error, got {:?}", other),
        }
    }

    #[test]
    fn test_nan_derivative_diverges() {
        let solver = NewtonRaphsonSolver::new(
            |x: f64| x - 1.0,
            0.0,
            DerivativeProvider::predefined(|_x: f64| f64::NAN),
            SolverConfig::default(),
        )
        .unwrap();

        assert!(matches!(
            solver.solve().unwrap_err(),
            SolverError::Divergence { .. }
        ));
    }

    #[test]
    fn test_non_finite_step_diverges() {
        // A minuscule derivative flings the iterate to infinity.
        let solver = NewtonRaphsonSolver::new(
            |_x: f64| 1e300,
            0.0,
            DerivativeProvider::predefined(|_x: f64| 1e-300),
            SolverConfig::default(),
        )
        .unwrap();

        assert!(matches!(
            solver.solve().unwrap_err(),
            SolverError::Divergence { .. }
        ));
    }

    #[test]
    fn test_budget_exhaustion_under_tolerance_criterion() {
        let config = SolverConfig::new(1e-100, 3, ConvergenceCriterion::Tolerance).unwrap();
        let solver = NewtonRaphsonSolver::new(
            |x: f64| x * x - 2.0,
            1.0,
            DerivativeProvider::predefined(|x: f64| 2.0 * x),
            config,
        )
        .unwrap();

        match solver.solve().unwrap_err() {
            SolverError::ConvergenceFailure { iterations, .. } => {
                assert_eq!(iterations, 3);
            }
            other => panic!("Expected ConvergenceFailure error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_guess_rejected_at_construction() {
        let result = NewtonRaphsonSolver::new(
            |x: f64| x,
            f64::NAN,
            DerivativeProvider::numerical(),
            SolverConfig::default(),
        );

        assert!(matches!(
            result.unwrap_err(),
            ConfigError::NonFiniteGuess { .. }
        ));
    }

    // ========================================
    // Derivation and accessor tests
    // ========================================

    #[test]
    fn test_with_guess_derives_new_instance() {
        let solver = NewtonRaphsonSolver::new(
            |x: f64| x * x - 4.0,
            1.5,
            DerivativeProvider::predefined(|x: f64| 2.0 * x),
            SolverConfig::default(),
        )
        .unwrap();
        let negative = solver.with_guess(-1.5).unwrap();

        assert!((solver.solve().unwrap() - 2.0).abs() < 1e-9);
        assert!((negative.solve().unwrap() + 2.0).abs() < 1e-9);
        assert!(solver.with_guess(f64::INFINITY).is_err());
    }

    #[test]
    fn test_guess_and_config_accessors() {
        let solver = NewtonRaphsonSolver::with_defaults(|x: f64| x, 0.5).unwrap();
        assert_eq!(solver.guess(), 0.5);
        assert_eq!(solver.config().max_iterations, 100);
    }

    // ========================================
    // Multi-root discovery
    // ========================================

    #[test]
    fn test_solve_all_cubic_from_midpoint_guesses() {
        let range = Interval::new(0.0, 4.0).unwrap();
        let solver = NewtonRaphsonSolver::new(
            |x: f64| (x - 1.0) * (x - 2.0) * (x - 3.0),
            range.midpoint(),
            DerivativeProvider::numerical(),
            SolverConfig::default(),
        )
        .unwrap();

        let roots = solver.solve_all(range, 97);
        assert_eq!(roots.len(), 3);
        for (root, expected) in roots.iter().zip([1.0, 2.0, 3.0]) {
            assert!(
                (root - expected).abs() < 1e-9,
                "Expected {}, got {}",
                expected,
                root
            );
        }
    }
}
