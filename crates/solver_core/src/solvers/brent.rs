//! Brent's method root-finding solver.

use super::bracket::{accept_distinct_root, scan_range, sort_roots, validate_bounds, ScanCandidate};
use super::{RootSolver, SolverConfig};
use crate::types::{Interval, SolverError};
use num_traits::Float;
use std::fmt;

/// Brent's method root finder.
///
/// Combines inverse quadratic interpolation, secant steps, and bisection for
/// robust root finding without requiring derivatives. Guaranteed to converge
/// for continuous functions with a valid bracket, with super-linear
/// convergence on well-behaved problems.
///
/// # Algorithm
///
/// The method tracks three points `a`, `b`, `c`, keeping `b` as the
/// smallest-magnitude (best) estimate, and each iteration chooses between:
/// - **Inverse quadratic interpolation** when all three function values are
///   distinct
/// - **Secant interpolation** when only two points are available
/// - **Bisection** whenever the interpolated step fails the acceptance
///   inequalities, guaranteeing progress
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f64`)
/// * `F` - Target function
///
/// # Example
///
/// ```
/// use solver_core::solvers::{BrentSolver, RootSolver, SolverConfig};
/// use solver_core::types::Interval;
///
/// // Solve x³ - x - 2 = 0 in bracket [1, 2]
/// let f = |x: f64| x * x * x - x - 2.0;
/// let bracket = Interval::new(1.0, 2.0).unwrap();
///
/// let solver = BrentSolver::new(f, bracket, SolverConfig::default());
/// let root = solver.solve().unwrap();
/// assert!(f(root).abs() < 1e-7);
/// ```
#[derive(Clone)]
pub struct BrentSolver<T, F>
where
    T: Float,
    F: Fn(T) -> T,
{
    /// Target function
    f: F,
    /// Bracket to search
    bracket: Interval<T>,
    /// Solver configuration
    config: SolverConfig<T>,
}

impl<T, F> BrentSolver<T, F>
where
    T: Float,
    F: Fn(T) -> T,
{
    /// Create a new Brent solver.
    pub fn new(f: F, bracket: Interval<T>, config: SolverConfig<T>) -> Self {
        Self { f, bracket, config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults(f: F, bracket: Interval<T>) -> Self {
        Self::new(f, bracket, SolverConfig::default())
    }

    /// Derive a solver for a different bracket.
    ///
    /// Returns a new instance; the original is never mutated.
    pub fn with_bracket(&self, bracket: Interval<T>) -> Self
    where
        F: Clone,
    {
        Self {
            f: self.f.clone(),
            bracket,
            config: self.config,
        }
    }

    /// Returns the bracket this solver searches.
    pub fn bracket(&self) -> Interval<T> {
        self.bracket
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }

    fn solve_on(&self, bracket: &Interval<T>) -> Result<T, SolverError> {
        let zero = T::zero();
        let one = T::one();
        let two = T::from(2.0).unwrap();
        let three = T::from(3.0).unwrap();
        let half = T::from(0.5).unwrap();
        let tolerance = self.config.tolerance;

        let (mut a, mut b) = (bracket.lower(), bracket.upper());
        let (mut fa, mut fb) = validate_bounds(&self.f, a, b)?;

        // c mirrors a until the first bracket reset.
        let mut c = a;
        let mut fc = fa;
        let mut d = b - a;
        let mut e = d;

        for _iteration in 0..self.config.max_iterations {
            // Rotate so b always holds the smallest-magnitude value.
            if fc.abs() < fb.abs() {
                a = b;
                b = c;
                c = a;
                fa = fb;
                fb = fc;
                fc = fa;
            }

            let tol = two * tolerance * b.abs() + tolerance;
            let m = (c - b) / two;

            if m.abs() <= tol || fb == zero {
                return Ok(b);
            }

            if e.abs() < tol || fa.abs() <= fb.abs() {
                // Interpolation is not trustworthy here; bisect.
                d = m;
                e = m;
            } else {
                let s = fb / fa;
                let mut p;
                let mut q;
                if a == c {
                    // Secant (linear) step from the two distinct points.
                    p = two * m * s;
                    q = one - s;
                } else {
                    // Inverse quadratic interpolation through (a, b, c).
                    let r0 = fa / fc;
                    let r1 = fb / fc;
                    p = s * (two * m * r0 * (r0 - r1) - (b - a) * (r1 - one));
                    q = (r0 - one) * (r1 - one) * (s - one);
                }

                // Normalise so p >= 0.
                if p > zero {
                    q = -q;
                } else {
                    p = -p;
                }

                let e_prev = e;
                e = d;
                if two * p < three * m * q - (tol * q).abs() && p < (half * e_prev * q).abs() {
                    d = p / q;
                } else {
                    d = m;
                    e = m;
                }
            }

            a = b;
            fa = fb;
            if d.abs() > tol {
                b = b + d;
            } else {
                // Minimum step toward the bracket midpoint.
                b = b + if m > zero { tol } else { -tol };
            }
            fb = (self.f)(b);

            // Keep the bracket valid: f(b) and f(c) must straddle the root.
            if (fb > zero && fc > zero) || (fb < zero && fc < zero) {
                c = a;
                fc = fa;
                d = b - a;
                e = d;
            }

            if self.config.tolerance_based() && (b - a).abs() < tolerance {
                return Ok(b);
            }
        }

        if self.config.tolerance_based() {
            Err(SolverError::convergence_failure(
                self.config.max_iterations,
                b,
                tolerance,
            ))
        } else {
            Ok(b)
        }
    }
}

impl<T, F> RootSolver<T> for BrentSolver<T, F>
where
    T: Float,
    F: Fn(T) -> T,
{
    fn solve(&self) -> Result<T, SolverError> {
        self.solve_on(&self.bracket)
    }

    fn solve_all(&self, range: Interval<T>, subdivisions: usize) -> Vec<T> {
        let min_spacing = T::from(2.0).unwrap() * self.config.tolerance;
        let mut roots = Vec::new();
        for candidate in scan_range(&self.f, &range, subdivisions) {
            let found = match candidate {
                ScanCandidate::Bracket(interval) => self.solve_on(&interval).ok(),
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

impl<T, F> fmt::Debug for BrentSolver<T, F>
where
    T: Float + fmt::Debug,
    F: Fn(T) -> T,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrentSolver")
            .field("bracket", &self.bracket)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solvers::ConvergenceCriterion;

    fn bracket(lower: f64, upper: f64) -> Interval<f64> {
        Interval::new(lower, upper).unwrap()
    }

    // ========================================
    // Basic Functionality Tests
    // ========================================

    #[test]
    fn test_find_sqrt_2() {
        let solver = BrentSolver::with_defaults(|x: f64| x * x - 2.0, bracket(0.0, 2.0));

        let root = solver.solve().unwrap();
        assert!(
            (root - std::f64::consts::SQRT_2).abs() < 1e-8,
            "Expected √2 ≈ {}, got {}",
            std::f64::consts::SQRT_2,
            root
        );
    }

    #[test]
    fn test_find_cubic_root() {
        let solver =
            BrentSolver::with_defaults(|x: f64| x * x * x - x - 2.0, bracket(1.0, 2.0));

        let root = solver.solve().unwrap();
        let f = |x: f64| x * x * x - x - 2.0;
        assert!(
            f(root).abs() < 1e-8,
            "f(root) = {} should be near zero",
            f(root)
        );
    }

    #[test]
    fn test_find_sin_root() {
        let solver = BrentSolver::with_defaults(|x: f64| x.sin(), bracket(3.0, 4.0));

        let root = solver.solve().unwrap();
        assert!(
            (root - std::f64::consts::PI).abs() < 1e-8,
            "Expected π ≈ {}, got {}",
            std::f64::consts::PI,
            root
        );
    }

    #[test]
    fn test_find_exp_root() {
        let solver = BrentSolver::with_defaults(|x: f64| x.exp() - 2.0, bracket(0.0, 1.0));

        let root = solver.solve().unwrap();
        assert!(
            (root - 2.0_f64.ln()).abs() < 1e-8,
            "Expected ln(2) ≈ {}, got {}",
            2.0_f64.ln(),
            root
        );
    }

    #[test]
    fn test_known_cubic_value() {
        let config = SolverConfig::new(1e-12, 100, ConvergenceCriterion::Tolerance).unwrap();
        let solver = BrentSolver::new(|x: f64| x * x * x - 2.0 * x - 5.0, bracket(2.0, 3.0), config);

        let root = solver.solve().unwrap();
        assert!(
            (root - 2.094_551_481_542_326_5).abs() < 1e-10,
            "Expected 2.0945514815423265, got {}",
            root
        );
    }

    #[test]
    fn test_tight_bracket() {
        let sqrt2 = std::f64::consts::SQRT_2;
        let solver = BrentSolver::with_defaults(
            |x: f64| x * x - 2.0,
            bracket(sqrt2 - 1e-8, sqrt2 + 1e-8),
        );

        let root = solver.solve().unwrap();
        assert!((root - sqrt2).abs() < 1e-8);
    }

    // ========================================
    // Error Handling Tests
    // ========================================

    #[test]
    fn test_no_sign_change_rejected() {
        let solver = BrentSolver::with_defaults(|x: f64| x * x + 1.0, bracket(-1.0, 1.0));

        match solver.solve().unwrap_err() {
            SolverError::InvalidBounds { lower, upper, .. } => {
                assert_eq!(lower, -1.0);
                assert_eq!(upper, 1.0);
            }
            other => panic!("Expected InvalidBounds error, got {:?}", other),
        }
    }

    #[test]
    fn test_budget_exhaustion_under_tolerance_criterion() {
        let config = SolverConfig::new(1e-100, 3, ConvergenceCriterion::Tolerance).unwrap();
        let solver = BrentSolver::new(|x: f64| x * x - 2.0, bracket(0.0, 2.0), config);

        match solver.solve().unwrap_err() {
            SolverError::ConvergenceFailure { iterations, .. } => {
                assert_eq!(iterations, 3);
            }
            other => panic!("Expected ConvergenceFailure error, got {:?}", other),
        }
    }

    #[test]
    fn test_budget_exhaustion_under_iteration_criterion_is_best_effort() {
        let config = SolverConfig::new(1e-100, 3, ConvergenceCriterion::MaxIterations).unwrap();
        let solver = BrentSolver::new(|x: f64| x * x - 2.0, bracket(0.0, 2.0), config);

        let root = solver.solve().unwrap();
        assert!((root - std::f64::consts::SQRT_2).abs() < 1.0);
    }

    // ========================================
    // Convergence Tests
    // ========================================

    #[test]
    fn test_achieves_tolerance() {
        let tol = 1e-12;
        let config = SolverConfig::new(tol, 100, ConvergenceCriterion::Tolerance).unwrap();
        let solver = BrentSolver::new(|x: f64| x * x - 2.0, bracket(0.0, 2.0), config);

        let root = solver.solve().unwrap();
        let f = |x: f64| x * x - 2.0;
        assert!(
            f(root).abs() < 1e-10,
            "f(root) = {} should be within a tolerance-scaled bound of zero",
            f(root)
        );
    }

    #[test]
    fn test_difficult_function() {
        // Slow sign change: x - cos(x) = 0
        let solver = BrentSolver::with_defaults(|x: f64| x - x.cos(), bracket(0.0, 1.0));

        let root = solver.solve().unwrap();
        let f = |x: f64| x - x.cos();
        assert!(
            f(root).abs() < 1e-8,
            "f(root) = {} should be near zero",
            f(root)
        );
    }

    #[test]
    fn test_repeated_solves_are_identical() {
        let solver = BrentSolver::with_defaults(|x: f64| x * x * x - x - 2.0, bracket(1.0, 2.0));
        assert_eq!(solver.solve().unwrap(), solver.solve().unwrap());
    }

    // ========================================
    // Derivation and accessor tests
    // ========================================

    #[test]
    fn test_with_bracket_derives_new_instance() {
        let solver = BrentSolver::with_defaults(|x: f64| x * x - 4.0, bracket(0.0, 5.0));
        let negative = solver.with_bracket(bracket(-5.0, 0.0));

        assert!((solver.solve().unwrap() - 2.0).abs() < 1e-8);
        assert!((negative.solve().unwrap() + 2.0).abs() < 1e-8);
    }

    #[test]
    fn test_config_accessor() {
        let config = SolverConfig::new(1e-8, 50, ConvergenceCriterion::Tolerance).unwrap();
        let solver = BrentSolver::new(|x: f64| x, bracket(-1.0, 2.0), config);

        assert!((solver.config().tolerance - 1e-8).abs() < 1e-15);
        assert_eq!(solver.config().max_iterations, 50);
    }

    #[test]
    fn test_clone() {
        let solver = BrentSolver::with_defaults(|x: f64| x * x - 2.0, bracket(0.0, 2.0));
        let cloned = solver.clone();
        assert_eq!(solver.solve().unwrap(), cloned.solve().unwrap());
    }

    #[test]
    fn test_with_f32() {
        let solver: BrentSolver<f32, _> = BrentSolver::new(
            |x: f32| x * x - 2.0,
            Interval::new(0.0_f32, 2.0_f32).unwrap(),
            SolverConfig::new(1e-5_f32, 100, ConvergenceCriterion::Tolerance).unwrap(),
        );

        let root = solver.solve().unwrap();
        assert!((root - std::f32::consts::SQRT_2).abs() < 1e-4);
    }

    // ========================================
    // Multi-root discovery
    // ========================================

    #[test]
    fn test_solve_all_sin_roots() {
        let solver = BrentSolver::with_defaults(|x: f64| x.sin(), bracket(1.0, 7.0));

        let roots = solver.solve_all(bracket(1.0, 7.0), 60);
        assert_eq!(roots.len(), 2);
        assert!((roots[0] - std::f64::consts::PI).abs() < 1e-8);
        assert!((roots[1] - 2.0 * std::f64::consts::PI).abs() < 1e-8);
    }

    #[test]
    fn test_solve_all_no_roots() {
        let solver = BrentSolver::with_defaults(|x: f64| x * x + 1.0, bracket(-5.0, 5.0));
        assert!(solver.solve_all(bracket(-5.0, 5.0), 100).is_empty());
    }
}
