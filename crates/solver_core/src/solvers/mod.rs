//! Root-finding solvers for single-variable continuous real functions.
//!
//! This module provides a family of iterative root-finding algorithms behind
//! one shared contract, plus bracket scanning for multi-root discovery.
//!
//! ## Available Solvers
//!
//! ### Bracketing (guaranteed convergence)
//!
//! - [`BisectionSolver`]: Simplest bracketing method, linear convergence
//! - [`BrentSolver`]: Inverse quadratic / secant interpolation with bisection
//!   fallback, super-linear convergence
//! - [`NewtonBisectionSolver`]: Newton steps constrained to a maintained
//!   bracket, near-quadratic convergence without losing the guarantee
//!
//! ### Polishing (fast, not guaranteed)
//!
//! - [`NewtonRaphsonSolver`]: Quadratic convergence from an initial guess, no
//!   bracket maintained
//!
//! ## Configuration
//!
//! All solvers are configured through [`SolverConfig`]:
//! - `tolerance`: Convergence tolerance (default: 1e-10)
//! - `max_iterations`: Iteration budget (default: 100)
//! - `criterion`: [`ConvergenceCriterion`] selecting between a fixed
//!   iteration count and a tolerance predicate
//!
//! The Newton variants additionally take a [`DerivativeProvider`] selecting
//! how `f'(x)` is evaluated.
//!
//! ## Examples
//!
//! ### Single root
//!
//! ```
//! use solver_core::solvers::{BrentSolver, RootSolver, SolverConfig};
//! use solver_core::types::Interval;
//!
//! // Solve x² - 2 = 0 (find √2)
//! let f = |x: f64| x * x - 2.0;
//! let bracket = Interval::new(0.0, 2.0).unwrap();
//!
//! let solver = BrentSolver::new(f, bracket, SolverConfig::default());
//! let root = solver.solve().unwrap();
//! assert!((root - std::f64::consts::SQRT_2).abs() < 1e-8);
//! ```
//!
//! ### Multiple roots
//!
//! ```
//! use solver_core::solvers::{BrentSolver, RootSolver};
//! use solver_core::types::Interval;
//!
//! // sin has two roots in [1, 7]
//! let range = Interval::new(1.0, 7.0).unwrap();
//! let solver = BrentSolver::with_defaults(|x: f64| x.sin(), range);
//!
//! let roots = solver.solve_all(range, 100);
//! assert_eq!(roots.len(), 2);
//! ```

mod bisection;
mod bracket;
mod brent;
mod config;
mod derivative;
mod newton_bisection;
mod newton_raphson;

// Re-export public types at module level
pub use bisection::BisectionSolver;
pub use bracket::{scan_range, validate_bounds, ScanCandidate};
pub use brent::BrentSolver;
pub use config::{ConvergenceCriterion, SolverConfig};
pub use derivative::DerivativeProvider;
pub use newton_bisection::NewtonBisectionSolver;
pub use newton_raphson::NewtonRaphsonSolver;

use crate::types::{Interval, SolverError};
use num_traits::Float;

/// Shared contract implemented by every root-finding algorithm.
///
/// Implementations are immutable values combining a target function, a
/// [`SolverConfig`], and algorithm-specific state (a bracket for bracketing
/// methods, an initial guess plus a [`DerivativeProvider`] for polishing
/// methods). `solve` is a pure function of those fields: calling it
/// repeatedly, or concurrently from several threads, yields identical
/// results for a pure target function.
pub trait RootSolver<T: Float> {
    /// Find a single root.
    ///
    /// # Returns
    ///
    /// * `Ok(x)` - The located root (or best-effort estimate under
    ///   [`ConvergenceCriterion::MaxIterations`])
    /// * `Err(SolverError::InvalidBounds)` - Bracketing methods only: the
    ///   bracket does not straddle a sign change
    /// * `Err(SolverError::Divergence)` - A non-finite value or unusable
    ///   derivative appeared during iteration
    /// * `Err(SolverError::ConvergenceFailure)` - Iteration budget exhausted
    ///   under [`ConvergenceCriterion::Tolerance`]
    fn solve(&self) -> Result<T, SolverError>;

    /// Discover multiple roots in `range`.
    ///
    /// Scans `subdivisions` equal sub-intervals for sign changes
    /// (see [`scan_range`]), then runs one scoped solve per candidate:
    /// bracketing methods re-solve the candidate interval, polishing methods
    /// start from its midpoint. Candidates whose solve fails are silently
    /// skipped.
    /// Accepted roots are deduplicated (a new root within `2 × tolerance` for
    /// bracketing methods, `tolerance` for polishing methods, of an accepted
    /// one is discarded) and returned sorted ascending.
    ///
    /// Roots of even multiplicity produce no sign change and are missed by
    /// construction.
    fn solve_all(&self, range: Interval<T>, subdivisions: usize) -> Vec<T>;
}
