use crate::traits::{DiscreteSystem, Scalar};
use serde::{Deserialize, Serialize};

/// The logistic map x' = r * x * (1 - x).
///
/// Models a population under reproduction rate `r` and density-dependent
/// mortality; `x` is the relative population size in [0, 1]. One-dimensional.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LogisticMap<T: Scalar> {
    /// Reproduction rate.
    pub r: T,
}

impl<T: Scalar> DiscreteSystem<T> for LogisticMap<T> {
    fn dimension(&self) -> usize {
        1
    }

    fn apply(&self, x: &[T], out: &mut Vec<T>) {
        let x = x[0];
        out.push(self.r * x * (T::one() - x));
    }
}

/// Explicit-Euler step of the Lotka-Volterra predator-prey system.
///
/// State layout: index 0 = x (prey), index 1 = y (predator).
///   x' = x + x * (a - b*y) * timestep
///   y' = y + (-y * (c - d*x)) * timestep
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PredatorPrey<T: Scalar> {
    /// Prey birth rate.
    pub a: T,
    /// Prey death rate due to predation.
    pub b: T,
    /// Natural predator death rate.
    pub c: T,
    /// Conversion of eaten prey into new predators.
    pub d: T,
    /// Time increment of the Euler step.
    pub timestep: T,
}

impl<T: Scalar> DiscreteSystem<T> for PredatorPrey<T> {
    fn dimension(&self) -> usize {
        2
    }

    fn apply(&self, state: &[T], out: &mut Vec<T>) {
        let x = state[0];
        let y = state[1];
        out.push(x + x * (self.a - self.b * y) * self.timestep);
        out.push(y + (-y * (self.c - self.d * x)) * self.timestep);
    }
}
