pub mod classify;
pub mod engine;
pub mod systems;
/// The `cascade_core` crate provides the computational engine for exploring
/// discrete-time dynamical systems: generic single-step map iteration and
/// classification of long-run behavior (fixed point, limit cycle, chaos).
///
/// Key components:
/// - **Traits**: `Scalar` (numeric type abstraction), `DiscreteSystem` (explicit single-step maps).
/// - **Engine**: `iterate` produces an immutable `Trajectory` of states.
/// - **Classify**: logistic-family fixed-point/limit-cycle detection with analytic fast paths.
/// - **Systems**: the logistic map and an explicit-Euler predator-prey map.
pub mod traits;
