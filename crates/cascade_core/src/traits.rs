use num_traits::{Float, FromPrimitive};
use std::fmt::Debug;

/// A trait for types that can be used as scalars in our dynamical systems.
/// Must support basic arithmetic, debug printing, and conversion from f64.
pub trait Scalar: Float + FromPrimitive + Debug + 'static {}

impl<T: Float + FromPrimitive + Debug + 'static> Scalar for T {}

/// An explicit single-step discrete map x_{n+1} = f(x_n).
///
/// Implementations must be pure: deterministic, side-effect-free, and
/// independent of anything but `x` and the parameters the implementor
/// carries. The engine assumes nothing else (no continuity, no bounds).
pub trait DiscreteSystem<T: Scalar> {
    /// Returns the dimension of the state space.
    fn dimension(&self) -> usize;

    /// Evaluates the map, appending the successor state to `out`.
    /// x: current state
    /// out: arrives empty; the implementor pushes the next state into it.
    ///
    /// A well-behaved map pushes exactly `dimension()` values. The iteration
    /// engine checks the written length after every application and reports
    /// a shape mismatch instead of letting a malformed state propagate.
    fn apply(&self, x: &[T], out: &mut Vec<T>);
}

/// Adapter turning a closure into a [`DiscreteSystem`], for callers with an
/// ad-hoc transition function and no struct to hang it on.
pub struct MapFn<F> {
    dimension: usize,
    f: F,
}

impl<F> MapFn<F> {
    pub fn new(dimension: usize, f: F) -> Self {
        Self { dimension, f }
    }
}

impl<T: Scalar, F: Fn(&[T], &mut Vec<T>)> DiscreteSystem<T> for MapFn<F> {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn apply(&self, x: &[T], out: &mut Vec<T>) {
        (self.f)(x, out)
    }
}
