//! # solver_core: Root-Finding for Single-Variable Real Functions
//!
//! A small numerical library that locates roots of continuous `f: T -> T`
//! functions using four classical iterative algorithms behind one contract:
//!
//! - Bisection (`solvers::BisectionSolver`)
//! - Brent's hybrid method (`solvers::BrentSolver`)
//! - Newton-Raphson (`solvers::NewtonRaphsonSolver`)
//! - A Newton/bisection hybrid (`solvers::NewtonBisectionSolver`)
//!
//! plus sign-change scanning and multi-root discovery over a search range.
//!
//! ## Design
//!
//! - Solver instances are immutable: a validated constructor captures the
//!   target function, the bracket or initial guess, and a
//!   `solvers::SolverConfig`; `solve()` is a pure function of those fields
//!   and may be called repeatedly or concurrently.
//! - Invalid inputs are rejected eagerly at construction
//!   (`types::ConfigError`); failures while iterating are reported as
//!   `types::SolverError` values, never panics.
//! - Everything numeric is generic over `T: num_traits::Float`, so `f64` and
//!   `f32` (and compatible user types) work throughout.
//!
//! ## Usage Example
//!
//! ```rust
//! use solver_core::solvers::{BrentSolver, RootSolver, SolverConfig};
//! use solver_core::types::Interval;
//!
//! let f = |x: f64| x * x * x - 2.0 * x - 5.0;
//! let bracket = Interval::new(2.0, 3.0).unwrap();
//!
//! let solver = BrentSolver::new(f, bracket, SolverConfig::default());
//! let root = solver.solve().unwrap();
//! assert!(f(root).abs() < 1e-8);
//! ```
//!
//! ## Feature Flags
//!
//! - `num-dual-mode` (default): Build symbolic derivative providers from
//!   `Dual64`-evaluatable functions via num-dual automatic differentiation
//! - `serde`: Enable serialisation for `ConvergenceCriterion` and the error
//!   types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod solvers;
pub mod types;
