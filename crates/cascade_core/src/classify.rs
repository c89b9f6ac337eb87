use crate::engine::iterate;
use crate::systems::LogisticMap;
use crate::traits::DiscreteSystem;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Approximate fixed point of the logistic map at r = 3.0 exactly.
///
/// r = 3 is the first period-doubling bifurcation; convergence there is
/// asymptotically slow enough that sampling-based detection is unreliable,
/// so the value is hardcoded. It is a documented approximation inherited
/// for compatibility, not a derivation — do not adjust it without an
/// independent derivation.
pub const R3_FIXED_POINT: f64 = 0.6623452662682413;

/// Settings for the convergence classifier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ClassifierSettings {
    /// Applications discarded before sampling, to let transients settle.
    pub equilibration_steps: usize,
    /// Applications sampled while collecting recurring values.
    pub sampling_steps: usize,
    /// Absolute-difference threshold for treating two values as the same.
    /// Non-positive values make every sample look new, which drives the
    /// result toward the chaotic classification.
    pub epsilon: f64,
    /// Initial state the sampler iterates from. The default reproduces the
    /// historical behavior; it is an explicit setting so runs stay
    /// reproducible without hidden state.
    pub seed: f64,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            equilibration_steps: 1000,
            sampling_steps: 100,
            epsilon: 1e-4,
            seed: 0.5,
        }
    }
}

/// How a caller may read a classifier result. The classifier itself never
/// caps or rejects long sequences; applying this reading is caller policy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Convergence {
    /// A single stable value.
    FixedPoint(f64),
    /// A periodic orbit visiting these values.
    Cycle(Vec<f64>),
    /// Every sampled point was distinct: chaotic or unresolved.
    Unresolved,
}

/// Samples the long-run recurring values of a one-dimensional map.
///
/// Iterates from `settings.seed`, discards `equilibration_steps`
/// applications, then inspects the next `sampling_steps` values: each one is
/// compared against the values collected so far, scanning in insertion order
/// and stopping at the first value within `epsilon`; unmatched values are
/// appended. Returns the collected values in insertion order.
///
/// NaN never compares within epsilon of anything, so a map that degenerates
/// mid-run fills the result with distinct samples rather than failing.
pub fn recurrent_values(
    system: &impl DiscreteSystem<f64>,
    settings: &ClassifierSettings,
) -> Result<Vec<f64>> {
    if settings.sampling_steps == 0 {
        return Ok(Vec::new());
    }

    let total = settings.equilibration_steps + settings.sampling_steps + 1;
    let trajectory = iterate(system, &[settings.seed], total)?;

    let mut values: Vec<f64> = Vec::new();
    for state in trajectory.states().skip(settings.equilibration_steps + 1) {
        let x = state[0];
        let already_collected = values.iter().any(|&v| (v - x).abs() < settings.epsilon);
        if !already_collected {
            values.push(x);
        }
    }
    Ok(values)
}

/// Classifies the long-run behavior of the logistic map at reproduction
/// rate `r`.
///
/// Returns the distinct recurring values: one element for a stable fixed
/// point, k elements for a period-k cycle, and a sequence as long as
/// `sampling_steps` when no repetition was found (chaotic or unresolved —
/// see [`Convergence`] for the caller-side reading).
///
/// For r < 1 and 1 <= r < 3 the fixed point is known in closed form and no
/// iteration is performed; r = 3.0 exactly returns [`R3_FIXED_POINT`]. For
/// r > 3 the result comes from [`recurrent_values`] over [`LogisticMap`].
/// Total for every finite `r`.
pub fn classify_fixed_points(r: f64, settings: &ClassifierSettings) -> Vec<f64> {
    if r < 1.0 {
        vec![0.0]
    } else if r < 3.0 {
        vec![(r - 1.0) / r]
    } else if r == 3.0 {
        vec![R3_FIXED_POINT]
    } else {
        recurrent_values(&LogisticMap { r }, settings)
            .expect("logistic map preserves its one-dimensional shape")
    }
}

/// Batch wrapper over [`classify_fixed_points`] for bifurcation-diagram
/// style scans: one independent classification per `r` value.
pub fn classify_sweep(r_values: &[f64], settings: &ClassifierSettings) -> Vec<(f64, Vec<f64>)> {
    r_values
        .iter()
        .map(|&r| (r, classify_fixed_points(r, settings)))
        .collect()
}

/// Caller-side interpretation of a classifier result (see [`Convergence`]).
/// A sequence as long as the sampling window means no repetition was ever
/// found; anything shorter is a genuine cycle.
pub fn interpret(values: Vec<f64>, sampling_steps: usize) -> Convergence {
    if values.len() == 1 {
        Convergence::FixedPoint(values[0])
    } else if values.len() >= sampling_steps {
        Convergence::Unresolved
    } else {
        Convergence::Cycle(values)
    }
}
