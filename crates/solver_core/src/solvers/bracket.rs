//! Bracket validation and sign-change scanning.

use crate::types::{Interval, SolverError};
use num_traits::Float;

/// Validate that `[lower, upper]` actually brackets a sign change.
///
/// Evaluates the target function once at each end. Fails with
/// [`SolverError::InvalidBounds`] if and only if
/// `f(lower) * f(upper) >= 0`; on success the two end values are returned so
/// the caller can reuse them without re-evaluating.
///
/// Called at the start of every bracketing solve.
///
/// # Example
///
/// ```
/// use solver_core::solvers::validate_bounds;
///
/// let f = |x: f64| x * x - 4.0;
///
/// let (f_lower, f_upper) = validate_bounds(&f, 0.0, 5.0).unwrap();
/// assert_eq!(f_lower, -4.0);
/// assert_eq!(f_upper, 21.0);
///
/// // No sign change on [3, 5]
/// assert!(validate_bounds(&f, 3.0, 5.0).is_err());
/// ```
pub fn validate_bounds<T, F>(f: &F, lower: T, upper: T) -> Result<(T, T), SolverError>
where
    T: Float,
    F: Fn(T) -> T,
{
    let f_lower = f(lower);
    let f_upper = f(upper);
    if f_lower * f_upper >= T::zero() {
        return Err(SolverError::invalid_bounds(lower, upper, f_lower, f_upper));
    }
    Ok((f_lower, f_upper))
}

/// One candidate reported by [`scan_range`].
///
/// Subdividing a range usually yields sub-intervals whose end values change
/// sign, but a boundary can also land exactly on a root; such a boundary
/// cannot be bracketed (a zero endpoint fails bracket validation) and is
/// reported as a root directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScanCandidate<T: Float> {
    /// Sub-interval whose end values have strictly opposite sign.
    Bracket(Interval<T>),
    /// Boundary point at which the function evaluated exactly to zero.
    Root(T),
}

/// Subdivide `range` and report candidates that contain (or are) a root.
///
/// Walks `subdivisions` equal sub-intervals, evaluating the target function
/// once at each boundary and reusing the previous evaluation, so the scan
/// costs exactly `subdivisions + 1` evaluations. Whenever two consecutive
/// boundary values have strictly opposite sign, the sub-interval between them
/// is emitted; a boundary value of exactly zero is emitted as a
/// [`ScanCandidate::Root`].
///
/// Candidates are reported in ascending order. Roots of even multiplicity
/// inside a single sub-interval produce no sign change and are missed by
/// construction. A `subdivisions` of zero yields no candidates.
///
/// # Example
///
/// ```
/// use solver_core::solvers::{scan_range, ScanCandidate};
/// use solver_core::types::Interval;
///
/// let f = |x: f64| x * x - 2.0;
/// let range = Interval::new(-5.0, 5.0).unwrap();
///
/// let candidates = scan_range(&f, &range, 10);
/// assert_eq!(candidates.len(), 2);
/// assert!(matches!(candidates[0], ScanCandidate::Bracket(_)));
/// ```
pub fn scan_range<T, F>(f: &F, range: &Interval<T>, subdivisions: usize) -> Vec<ScanCandidate<T>>
where
    T: Float,
    F: Fn(T) -> T,
{
    let mut candidates = Vec::new();
    if subdivisions == 0 {
        return candidates;
    }

    let step = range.width() / T::from(subdivisions).unwrap();
    let mut prev_x = range.lower();
    let mut prev_f = f(prev_x);
    if prev_f == T::zero() {
        candidates.push(ScanCandidate::Root(prev_x));
    }

    for i in 1..=subdivisions {
        let x = if i == subdivisions {
            range.upper()
        } else {
            range.lower() + step * T::from(i).unwrap()
        };
        let fx = f(x);

        if fx == T::zero() {
            candidates.push(ScanCandidate::Root(x));
        } else if prev_f * fx < T::zero() {
            if let Ok(interval) = Interval::new(prev_x, x) {
                candidates.push(ScanCandidate::Bracket(interval));
            }
        }

        prev_x = x;
        prev_f = fx;
    }

    candidates
}

/// Push `root` onto `roots` unless an already-accepted root lies within
/// `min_spacing` of it.
pub(crate) fn accept_distinct_root<T: Float>(roots: &mut Vec<T>, root: T, min_spacing: T) {
    if roots.iter().all(|&r| (r - root).abs() >= min_spacing) {
        roots.push(root);
    }
}

/// Sort roots ascending.
pub(crate) fn sort_roots<T: Float>(roots: &mut [T]) {
    roots.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
}
