//! The fixed-topology network and its evolution capabilities.

use std::fs;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use foobartory_strategy::{OPERATION_COUNT, Policy, STATE_DIM, StateVector};

use crate::error::PolicyError;
use crate::math::{gaussian, relu6, softmax};

/// Hidden layer width.
const HIDDEN_UNITS: usize = 16;

/// One dense layer: `weights[input][output]` plus one bias per output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Layer {
    weights: Vec<Vec<f64>>,
    biases: Vec<f64>,
}

impl Layer {
    /// Glorot-uniform weights, standard-normal biases.
    fn random(inputs: usize, outputs: usize, rng: &mut impl Rng) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let limit = (6.0 / (inputs as f64 + outputs as f64)).sqrt();
        let weights = (0..inputs)
            .map(|_| (0..outputs).map(|_| rng.random_range(-limit..limit)).collect())
            .collect();
        let biases = (0..outputs).map(|_| gaussian(rng)).collect();
        Self { weights, biases }
    }

    /// Pre-activation outputs for `input`.
    fn forward(&self, input: &[f64]) -> Vec<f64> {
        let mut activations = self.biases.clone();
        for (row, value) in self.weights.iter().zip(input) {
            for (acc, weight) in activations.iter_mut().zip(row) {
                *acc += weight * value;
            }
        }
        activations
    }

    fn params_mut(&mut self) -> impl Iterator<Item = &mut f64> {
        self.weights
            .iter_mut()
            .flatten()
            .chain(self.biases.iter_mut())
    }

    /// Take the even flat positions of the weight and bias tensors from
    /// `other`, keeping the odd ones.
    fn interleave_from(&mut self, other: &Self) {
        take_even(
            self.weights.iter_mut().flatten(),
            other.weights.iter().flatten(),
        );
        take_even(self.biases.iter_mut(), other.biases.iter());
    }
}

fn take_even<'a>(
    mine: impl Iterator<Item = &'a mut f64>,
    theirs: impl Iterator<Item = &'a f64>,
) {
    let mut take = true;
    for (mine, theirs) in mine.zip(theirs) {
        if take {
            *mine = *theirs;
        }
        take = !take;
    }
}

/// Feed-forward policy: 6 inputs, 16 relu6 hidden units, 5 softmax
/// outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MlpPolicy {
    hidden: Layer,
    output: Layer,
}

impl Policy for MlpPolicy {
    type Error = PolicyError;

    fn random(rng: &mut impl Rng) -> Self {
        Self {
            hidden: Layer::random(STATE_DIM, HIDDEN_UNITS, rng),
            output: Layer::random(HIDDEN_UNITS, OPERATION_COUNT, rng),
        }
    }

    fn predict(&self, state: &StateVector) -> [f64; OPERATION_COUNT] {
        let hidden: Vec<f64> = self
            .hidden
            .forward(state)
            .into_iter()
            .map(relu6)
            .collect();
        let mut outputs = self.output.forward(&hidden);
        softmax(&mut outputs);

        let mut scores = [0.0; OPERATION_COUNT];
        for (slot, value) in scores.iter_mut().zip(outputs) {
            *slot = value;
        }
        scores
    }

    fn mutate(&mut self, rate: f64, rng: &mut impl Rng) -> usize {
        let mut mutated = 0_usize;
        for param in self.hidden.params_mut().chain(self.output.params_mut()) {
            if rng.random::<f64>() < rate {
                *param = gaussian(rng);
                mutated = mutated.saturating_add(1);
            }
        }
        mutated
    }

    fn crossover(&mut self, other: &Self) {
        self.hidden.interleave_from(&other.hidden);
        self.output.interleave_from(&other.output);
    }

    fn save(&self, path: &Path) -> Result<(), Self::Error> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        info!(path = %path.display(), "policy saved");
        Ok(())
    }

    fn load(path: &Path) -> Result<Self, Self::Error> {
        let contents = fs::read_to_string(path)?;
        let policy = serde_json::from_str(&contents)?;
        info!(path = %path.display(), "policy loaded");
        Ok(policy)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn policy(seed: u64) -> MlpPolicy {
        MlpPolicy::random(&mut SmallRng::seed_from_u64(seed))
    }

    fn flat_weights(layer: &Layer) -> Vec<f64> {
        layer.weights.iter().flatten().copied().collect()
    }

    /// Even positions must come from `b`, odd positions from `a`.
    fn assert_interleaved(child: &[f64], a: &[f64], b: &[f64]) {
        assert_eq!(child.len(), a.len());
        assert_eq!(child.len(), b.len());
        for (position, ((child_v, a_v), b_v)) in child.iter().zip(a).zip(b).enumerate() {
            let expected = if position % 2 == 0 { b_v } else { a_v };
            assert_eq!(child_v.to_bits(), expected.to_bits());
        }
    }

    #[test]
    fn distinct_seeds_produce_distinct_policies() {
        assert_ne!(policy(1), policy(2));
    }

    #[test]
    fn predict_returns_a_probability_distribution() {
        let scores = policy(3).predict(&[0.1, 0.2, 0.0, 0.05, 0.02, 1.0]);
        let sum: f64 = scores.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!(scores.iter().all(|s| *s > 0.0 && *s < 1.0));
    }

    #[test]
    fn mutate_at_rate_zero_changes_nothing() {
        let mut mutant = policy(4);
        let original = mutant.clone();
        let count = mutant.mutate(0.0, &mut SmallRng::seed_from_u64(5));
        assert_eq!(count, 0);
        assert_eq!(mutant, original);
    }

    #[test]
    fn mutate_at_rate_one_changes_every_parameter() {
        let mut mutant = policy(4);
        let original = mutant.clone();
        let count = mutant.mutate(1.0, &mut SmallRng::seed_from_u64(5));
        // 6*16 + 16 hidden parameters, 16*5 + 5 output parameters.
        assert_eq!(count, 197);
        assert_ne!(mutant, original);
    }

    #[test]
    fn crossover_takes_even_positions_from_the_other_parent() {
        let parent_a = policy(6);
        let parent_b = policy(7);
        let mut child = parent_a.clone();
        child.crossover(&parent_b);

        // Weight and bias tensors each restart their own parity.
        for (child_layer, a_layer, b_layer) in [
            (&child.hidden, &parent_a.hidden, &parent_b.hidden),
            (&child.output, &parent_a.output, &parent_b.output),
        ] {
            assert_interleaved(
                &flat_weights(child_layer),
                &flat_weights(a_layer),
                &flat_weights(b_layer),
            );
            assert_interleaved(&child_layer.biases, &a_layer.biases, &b_layer.biases);
        }
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy.json");

        let original = policy(8);
        original.save(&path).unwrap();
        let restored = MlpPolicy::load(&path).unwrap();

        assert_eq!(restored, original);
    }
}
