//! Bisection root-finding solver.

use super::bracket::{accept_distinct_root, scan_range, sort_roots, validate_bounds, ScanCandidate};
use super::{RootSolver, SolverConfig};
use crate::types::{Interval, SolverError};
use num_traits::Float;
use std::fmt;

/// Bisection root finder.
///
/// The simplest bracketing algorithm: each iteration halves the bracket,
/// keeping the half whose end values straddle the sign change. Convergence is
/// linear but guaranteed for any continuous function with a valid bracket.
///
/// Under the tolerance criterion the bracket half-width is checked *before*
/// the midpoint is evaluated, so the returned estimate may not itself have
/// been evaluated; it is however within the tolerance of a sign change.
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f64`)
/// * `F` - Target function
///
/// # Example
///
/// ```
/// use solver_core::solvers::{BisectionSolver, RootSolver, SolverConfig};
/// use solver_core::types::Interval;
///
/// let f = |x: f64| x * x - 2.0;
/// let bracket = Interval::new(0.0, 2.0).unwrap();
///
/// let solver = BisectionSolver::new(f, bracket, SolverConfig::default());
/// let root = solver.solve().unwrap();
/// assert!((root - std::f64::consts::SQRT_2).abs() < 1e-9);
/// ```
#[derive(Clone)]
pub struct BisectionSolver<T, F>
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

impl<T, F> BisectionSolver<T, F>
where
    T: Float,
    F: Fn(T) -> T,
{
    /// Create a new bisection solver.
    ///
    /// The bracket and configuration are already-validated values; whether
    /// the bracket actually straddles a sign change of `f` is only knowable
    /// once `f` is evaluated, and is checked at the start of every solve.
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
        let two = T::from(2.0).unwrap();

        let (mut a, mut b) = (bracket.lower(), bracket.upper());
        let (mut fa, _fb) = validate_bounds(&self.f, a, b)?;

        let mut x = bracket.midpoint();
        let mut iteration = 0;
        loop {
            if !x.is_finite() {
                return Err(SolverError::divergence(iteration, x));
            }

            // The half-width check precedes the midpoint evaluation: a bracket
            // already narrower than the tolerance is an answer.
            let half_width = (b - a).abs() / two;
            if self.config.tolerance_based() && half_width < self.config.tolerance {
                return Ok(x);
            }

            let fx = (self.f)(x);
            if fx == T::zero() {
                return Ok(x);
            }

            if fa * fx < T::zero() {
                b = x;
            } else {
                a = x;
                fa = fx;
            }

            iteration += 1;
            if iteration == self.config.max_iterations {
                break;
            }
            x = (a + b) / two;
        }

        if self.config.tolerance_based() {
            Err(SolverError::convergence_failure(
                self.config.max_iterations,
                x,
                self.config.tolerance,
            ))
        } else {
            Ok(x)
        }
    }
}

impl<T, F> RootSolver<T> for BisectionSolver<T, F>
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

impl<T, F> fmt::Debug for BisectionSolver<T, F>
where
    T: Float + fmt::Debug,
    F: Fn(T) -> T,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BisectionSolver")
            .field("bracket", &self.bracket)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
