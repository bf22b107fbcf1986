//! Hybrid Newton/bisection root-finding solver.

use super::bracket::{accept_distinct_root, scan_range, sort_roots, validate_bounds, ScanCandidate};
use super::{DerivativeProvider, RootSolver, SolverConfig};
use crate::types::{Interval, SolverError};
use num_traits::Float;
use std::fmt;

/// Newton-bisection hybrid root finder.
///
/// Maintains a bracket like bisection while attempting a Newton step each
/// iteration. The Newton step is taken only when the derivative is usable and
/// the step would stay inside the bracket; otherwise the iteration bisects.
/// This combines bisection's guaranteed convergence with Newton's
/// near-quadratic speed once the iterate is close to the root.
///
/// Unlike [`NewtonRaphsonSolver`](super::NewtonRaphsonSolver), an unusable
/// derivative is not an error here: the bracket always offers a bisection
/// step to fall back on.
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f64`)
/// * `F` - Target function
///
/// # Example
///
/// ```
/// use solver_core::solvers::{DerivativeProvider, NewtonBisectionSolver, RootSolver, SolverConfig};
/// use solver_core::types::Interval;
///
/// let f = |x: f64| x * x - 4.0;
/// let bracket = Interval::new(0.0, 5.0).unwrap();
///
/// let solver = NewtonBisectionSolver::new(
///     f,
///     bracket,
///     DerivativeProvider::predefined(|x: f64| 2.0 * x),
///     SolverConfig::default(),
/// );
///
/// let root = solver.solve().unwrap();
/// assert!((root - 2.0).abs() < 1e-8);
/// ```
#[derive(Clone)]
pub struct NewtonBisectionSolver<T, F>
where
    T: Float,
    F: Fn(T) -> T,
{
    /// Target function
    f: F,
    /// Bracket to search
    bracket: Interval<T>,
    /// Derivative evaluation strategy
    derivative: DerivativeProvider<T>,
    /// Solver configuration
    config: SolverConfig<T>,
}

impl<T, F> NewtonBisectionSolver<T, F>
where
    T: Float,
    F: Fn(T) -> T,
{
    /// Create a new hybrid solver.
    pub fn new(
        f: F,
        bracket: Interval<T>,
        derivative: DerivativeProvider<T>,
        config: SolverConfig<T>,
    ) -> Self {
        Self {
            f,
            bracket,
            derivative,
            config,
        }
    }

    /// Create a solver with default configuration and numerical derivatives.
    pub fn with_defaults(f: F, bracket: Interval<T>) -> Self {
        Self::new(
            f,
            bracket,
            DerivativeProvider::numerical(),
            SolverConfig::default(),
        )
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
            derivative: self.derivative.clone(),
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
        let two = T::from(2.0).unwrap();
        let tolerance = self.config.tolerance;

        let (mut a, mut b) = (bracket.lower(), bracket.upper());
        let (mut fa, _fb) = validate_bounds(&self.f, a, b)?;

        let mut x = bracket.midpoint();
        for iteration in 0..self.config.max_iterations {
            let fx = (self.f)(x);
            if self.config.tolerance_based() && fx.abs() < tolerance {
                return Ok(x);
            }

            // Narrow the bracket around the sign change.
            if fa * fx < T::zero() {
                b = x;
            } else {
                a = x;
                fa = fx;
            }
            if !a.is_finite() || !b.is_finite() {
                return Err(SolverError::divergence(iteration, x));
            }

            let dfx = self.derivative.evaluate(&self.f, x);
            let newton_step = if dfx != T::zero() && dfx.is_finite() {
                let x_newton = x - fx / dfx;
                // A Newton step is only trusted inside the bracket.
                if x_newton.is_finite() && a <= x_newton && x_newton <= b {
                    Some(x_newton)
                } else {
                    None
                }
            } else {
                None
            };

            let dx = match newton_step {
                Some(x_newton) => {
                    let dx = x_newton - x;
                    x = x_newton;
                    dx
                }
                None => {
                    x = (a + b) / two;
                    (b - a) / two
                }
            };

            if self.config.tolerance_based() && dx.abs() < tolerance {
                return Ok(x);
            }
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

impl<T, F> RootSolver<T> for NewtonBisectionSolver<T, F>
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

impl<T, F> fmt::Debug for NewtonBisectionSolver<T, F>
where
    T: Float + fmt::Debug,
    F: Fn(T) -> T,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewtonBisectionSolver")
            .field("bracket", &self.bracket)
            .field("derivative", &self.derivative)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
