use crate::traits::{DiscreteSystem, Scalar};
use anyhow::Result;
use serde::Serialize;
use thiserror::Error;

/// Contract violations the iteration engine can surface.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The transition function wrote a state of the wrong length.
    #[error("transition returned a state of length {got} at step {step}, expected {expected}")]
    ShapeMismatch {
        expected: usize,
        got: usize,
        step: usize,
    },
    /// The initial state does not match the system's declared dimension.
    #[error("initial state has length {got}, but the system has dimension {expected}")]
    DimensionMismatch { expected: usize, got: usize },
}

/// An ordered sequence of states produced by [`iterate`].
///
/// Entry 0 is a value copy of the initial state; entry t is the state after
/// t applications of the transition function. Storage is a flat row-major
/// buffer of `len * dimension` scalars, immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectory<T: Scalar> {
    dimension: usize,
    data: Vec<T>,
}

impl<T: Scalar> Trajectory<T> {
    fn with_capacity(dimension: usize, steps: usize) -> Self {
        Self {
            dimension,
            data: Vec::with_capacity(dimension * steps),
        }
    }

    /// Number of states in the trajectory.
    pub fn len(&self) -> usize {
        if self.dimension == 0 {
            0
        } else {
            self.data.len() / self.dimension
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Dimension of each state.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// The state after `t` applications of the map. Panics if out of range.
    pub fn state(&self, t: usize) -> &[T] {
        &self.data[t * self.dimension..(t + 1) * self.dimension]
    }

    /// Iterates over states in time order.
    pub fn states(&self) -> impl Iterator<Item = &[T]> {
        // chunks_exact rejects a chunk size of 0; a dimension-0 trajectory
        // is always empty, so chunking by 1 yields the same empty iterator.
        self.data.chunks_exact(self.dimension.max(1))
    }

    /// Time series of a single state variable, for downstream consumers
    /// (plotting layers) that want one coordinate over the whole run.
    pub fn variable(&self, index: usize) -> Vec<T> {
        self.states().map(|s| s[index]).collect()
    }
}

/// Repeatedly applies `system` to `initial_state`, recording every state.
///
/// The returned trajectory has length exactly `steps`, with entry 0 a value
/// copy of `initial_state` (later caller mutation cannot corrupt history).
/// `steps == 0` or an empty initial state is a no-op and yields an empty
/// trajectory rather than an error: iteration with nothing to iterate is
/// not a failure. Non-finite values are not special-cased; NaN/Inf written
/// by the map propagate into the trajectory as ordinary scalars.
pub fn iterate<T: Scalar>(
    system: &impl DiscreteSystem<T>,
    initial_state: &[T],
    steps: usize,
) -> Result<Trajectory<T>> {
    let dim = initial_state.len();
    if steps == 0 || dim == 0 {
        return Ok(Trajectory {
            dimension: dim,
            data: Vec::new(),
        });
    }
    if dim != system.dimension() {
        return Err(EngineError::DimensionMismatch {
            expected: system.dimension(),
            got: dim,
        }
        .into());
    }

    let mut trajectory = Trajectory::with_capacity(dim, steps);
    trajectory.data.extend_from_slice(initial_state);

    let mut buffer = Vec::with_capacity(dim);
    for step in 1..steps {
        buffer.clear();
        let previous = &trajectory.data[(step - 1) * dim..step * dim];
        system.apply(previous, &mut buffer);
        if buffer.len() != dim {
            return Err(EngineError::ShapeMismatch {
                expected: dim,
                got: buffer.len(),
                step,
            }
            .into());
        }
        trajectory.data.extend_from_slice(&buffer);
    }

    Ok(trajectory)
}

#[cfg(test)]
mod tests {
    use super::{iterate, EngineError};
    use crate::systems::LogisticMap;
    use crate::traits::{DiscreteSystem, MapFn, Scalar};

    /// Doubles every coordinate.
    struct Doubling {
        dimension: usize,
    }

    impl<T: Scalar> DiscreteSystem<T> for Doubling {
        fn dimension(&self) -> usize {
            self.dimension
        }

        fn apply(&self, x: &[T], out: &mut Vec<T>) {
            let two = T::from_f64(2.0).unwrap();
            out.extend(x.iter().map(|&v| v * two));
        }
    }

    fn assert_err_contains<T: std::fmt::Debug>(result: anyhow::Result<T>, needle: &str) {
        let err = result.expect_err("expected error");
        let message = format!("{err}");
        assert!(
            message.contains(needle),
            "expected error to contain \"{needle}\", got \"{message}\""
        );
    }

    #[test]
    fn trajectory_has_requested_length_and_copied_initial_state() {
        let system = Doubling { dimension: 2 };
        let mut initial = vec![1.0, -3.0];
        let trajectory = iterate(&system, &initial, 5).expect("iteration should succeed");

        assert_eq!(trajectory.len(), 5);
        assert_eq!(trajectory.dimension(), 2);
        assert_eq!(trajectory.state(0), &[1.0, -3.0]);
        assert_eq!(trajectory.state(3), &[8.0, -24.0]);

        // History is a value copy; mutating the caller's state changes nothing.
        initial[0] = 99.0;
        assert_eq!(trajectory.state(0), &[1.0, -3.0]);
    }

    #[test]
    fn zero_steps_and_empty_state_are_no_ops() {
        let system = Doubling { dimension: 2 };
        let trajectory = iterate(&system, &[1.0, 1.0], 0).expect("zero steps should succeed");
        assert!(trajectory.is_empty());
        assert_eq!(trajectory.len(), 0);

        let empty: &[f64] = &[];
        let trajectory = iterate(&system, empty, 10).expect("empty state should succeed");
        assert!(trajectory.is_empty());
        assert_eq!(trajectory.states().count(), 0);
    }

    #[test]
    fn single_step_trajectory_is_just_the_initial_state() {
        let system = Doubling { dimension: 1 };
        let trajectory = iterate(&system, &[0.25], 1).expect("iteration should succeed");
        assert_eq!(trajectory.len(), 1);
        assert_eq!(trajectory.state(0), &[0.25]);
    }

    #[test]
    fn iteration_is_deterministic_bit_for_bit() {
        let system = LogisticMap { r: 3.7 };
        let a = iterate(&system, &[0.5], 200).expect("iteration should succeed");
        let b = iterate(&system, &[0.5], 200).expect("iteration should succeed");
        assert_eq!(a, b);
    }

    #[test]
    fn every_state_preserves_shape() {
        let system = Doubling { dimension: 3 };
        let trajectory = iterate(&system, &[1.0, 2.0, 3.0], 20).expect("iteration should succeed");
        for state in trajectory.states() {
            assert_eq!(state.len(), 3);
        }
        assert_eq!(trajectory.states().count(), 20);
    }

    #[test]
    fn dimension_mismatch_is_rejected() {
        let system = Doubling { dimension: 2 };
        assert_err_contains(iterate(&system, &[1.0, 2.0, 3.0], 4), "dimension 2");
    }

    #[test]
    fn shape_violation_surfaces_immediately() {
        // Claims dimension 2 but emits 3 values per step.
        let system = MapFn::new(2, |x: &[f64], out: &mut Vec<f64>| {
            out.extend_from_slice(x);
            out.push(0.0);
        });
        let result = iterate(&system, &[1.0, 2.0], 4);
        assert_err_contains(result, "length 3 at step 1");
    }

    #[test]
    fn shape_violation_downcasts_to_engine_error() {
        let system = MapFn::new(1, |_: &[f64], _: &mut Vec<f64>| {});
        let err = iterate(&system, &[1.0], 2).expect_err("expected shape error");
        assert!(matches!(
            err.downcast_ref::<EngineError>(),
            Some(EngineError::ShapeMismatch { expected: 1, got: 0, step: 1 })
        ));
    }

    #[test]
    fn non_finite_values_propagate_silently() {
        let system = MapFn::new(1, |x: &[f64], out: &mut Vec<f64>| {
            out.push((x[0] - 1.0).sqrt());
        });
        let trajectory = iterate(&system, &[0.0], 3).expect("iteration should succeed");
        assert!(trajectory.state(1)[0].is_nan());
        assert!(trajectory.state(2)[0].is_nan());
    }

    #[test]
    fn variable_extracts_one_coordinate_over_time() {
        let system = Doubling { dimension: 2 };
        let trajectory = iterate(&system, &[1.0, 5.0], 3).expect("iteration should succeed");
        assert_eq!(trajectory.variable(0), vec![1.0, 2.0, 4.0]);
        assert_eq!(trajectory.variable(1), vec![5.0, 10.0, 20.0]);
    }
}
