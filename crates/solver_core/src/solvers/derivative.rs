//! Derivative evaluation strategies for the Newton-based solvers.

use num_traits::Float;
use std::fmt;
use std::sync::Arc;

/// Shared handle to an evaluatable derivative function.
type DerivativeFn<T> = Arc<dyn Fn(T) -> T + Send + Sync>;

/// Strategy for evaluating `f'(x)` during Newton iteration.
///
/// The Newton-based solvers never differentiate the target function
/// themselves; they consult a provider selected at construction:
///
/// - [`Numerical`](DerivativeProvider::Numerical) approximates the derivative
///   with a central-difference stencil over the target function, requiring no
///   extra function.
/// - [`Symbolic`](DerivativeProvider::Symbolic) wraps a derivative function
///   produced by an external differentiation service, invoked once at
///   construction.
/// - [`Predefined`](DerivativeProvider::Predefined) wraps a caller-supplied
///   derivative function, used as-is.
///
/// Providers hold their closure behind an [`Arc`], so they are cheap to clone
/// and safe to share across threads.
///
/// # Example
///
/// ```
/// use solver_core::solvers::DerivativeProvider;
///
/// let f = |x: f64| x * x - 2.0;
///
/// // Central differences need only the target function.
/// let numerical = DerivativeProvider::numerical();
/// let slope = numerical.evaluate(&f, 1.0);
/// assert!((slope - 2.0).abs() < 1e-6);
///
/// // A known derivative is used exactly.
/// let predefined = DerivativeProvider::predefined(|x: f64| 2.0 * x);
/// assert_eq!(predefined.evaluate(&f, 1.0), 2.0);
/// ```
pub enum DerivativeProvider<T: Float> {
    /// Central-difference stencil over the target function.
    Numerical,
    /// Derivative function produced by an external differentiation service.
    Symbolic(DerivativeFn<T>),
    /// Caller-supplied derivative function.
    Predefined(DerivativeFn<T>),
}

impl<T: Float> DerivativeProvider<T> {
    /// Create the numerical (central-difference) strategy.
    pub fn numerical() -> Self {
        DerivativeProvider::Numerical
    }

    /// Wrap a derivative function obtained from a differentiation service.
    pub fn symbolic(df: impl Fn(T) -> T + Send + Sync + 'static) -> Self {
        DerivativeProvider::Symbolic(Arc::new(df))
    }

    /// Wrap a caller-supplied derivative function.
    pub fn predefined(df: impl Fn(T) -> T + Send + Sync + 'static) -> Self {
        DerivativeProvider::Predefined(Arc::new(df))
    }

    /// Evaluate `f'(x)`.
    ///
    /// For [`Numerical`](DerivativeProvider::Numerical) this samples the
    /// target function at `x ± h` with `h = eps^(1/3) · max(|x|, 1)`; the
    /// other strategies delegate to their wrapped function. The result may be
    /// zero, NaN, or infinite; judging usability is the caller's concern.
    pub fn evaluate<F>(&self, f: &F, x: T) -> T
    where
        F: Fn(T) -> T,
    {
        match self {
            DerivativeProvider::Numerical => {
                let two = T::from(2.0).unwrap();
                let h = T::epsilon().cbrt() * x.abs().max(T::one());
                (f(x + h) - f(x - h)) / (two * h)
            }
            DerivativeProvider::Symbolic(df) | DerivativeProvider::Predefined(df) => df(x),
        }
    }
}

#[cfg(feature = "num-dual-mode")]
impl DerivativeProvider<f64> {
    /// Build a symbolic provider by differentiating a `Dual64`-evaluatable
    /// function.
    ///
    /// The dual-number function is differentiated here, once, into a plain
    /// `f64 -> f64` closure; iteration later sees an ordinary symbolic
    /// provider.
    ///
    /// # Example
    ///
    /// ```
    /// use num_dual::Dual64;
    /// use solver_core::solvers::DerivativeProvider;
    ///
    /// let provider = DerivativeProvider::symbolic_from_dual(|x: Dual64| x * x - Dual64::from(2.0));
    ///
    /// let f = |x: f64| x * x - 2.0;
    /// assert!((provider.evaluate(&f, 3.0) - 6.0).abs() < 1e-12);
    /// ```
    pub fn symbolic_from_dual<F>(f: F) -> Self
    where
        F: Fn(num_dual::Dual64) -> num_dual::Dual64 + Send + Sync + 'static,
    {
        DerivativeProvider::Symbolic(Arc::new(move |x| f(num_dual::Dual64::new(x, 1.0)).eps))
    }
}

impl<T: Float> Default for DerivativeProvider<T> {
    /// The numerical strategy: always available, no extra function needed.
    fn default() -> Self {
        DerivativeProvider::Numerical
    }
}

impl<T: Float> Clone for DerivativeProvider<T> {
    fn clone(&self) -> Self {
        match self {
            DerivativeProvider::Numerical => DerivativeProvider::Numerical,
            DerivativeProvider::Symbolic(df) => DerivativeProvider::Symbolic(Arc::clone(df)),
            DerivativeProvider::Predefined(df) => DerivativeProvider::Predefined(Arc::clone(df)),
        }
    }
}

impl<T: Float> fmt::Debug for DerivativeProvider<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // closures are opaque; print only the strategy
        match self {
            DerivativeProvider::Numerical => f.write_str("Numerical"),
            DerivativeProvider::Symbolic(_) => f.write_str("Symbolic(..)"),
            DerivativeProvider::Predefined(_) => f.write_str("Predefined(..)"),
        }
    }
}
