//! Scalar math for the network: activations and Gaussian sampling.

use rand::Rng;

/// Rectified linear unit capped at 6.
pub const fn relu6(value: f64) -> f64 {
    value.clamp(0.0, 6.0)
}

/// Normalize `values` in place into a probability distribution.
///
/// The maximum is subtracted before exponentiation so large activations
/// cannot overflow to infinity.
pub fn softmax(values: &mut [f64]) {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut sum = 0.0;
    for value in values.iter_mut() {
        *value = (*value - max).exp();
        sum += *value;
    }
    if sum > 0.0 {
        for value in values.iter_mut() {
            *value /= sum;
        }
    }
}

/// One standard-normal sample via the Box-Muller transform.
pub fn gaussian(rng: &mut impl Rng) -> f64 {
    // ln(0) is -inf; clamp the first draw away from zero.
    let u1 = rng.random::<f64>().max(f64::MIN_POSITIVE);
    let u2 = rng.random::<f64>();
    (-2.0 * u1.ln()).sqrt() * (core::f64::consts::TAU * u2).cos()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn relu6_clamps_both_ends() {
        assert!((relu6(-3.0) - 0.0).abs() < f64::EPSILON);
        assert!((relu6(2.5) - 2.5).abs() < f64::EPSILON);
        assert!((relu6(10.0) - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn softmax_is_a_probability_distribution() {
        let mut values = [1.0, 2.0, 3.0, 4.0, 5.0];
        softmax(&mut values);

        let sum: f64 = values.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
        assert!(values.iter().all(|v| *v > 0.0));
        // Larger activations keep larger probabilities.
        for pair in values.windows(2) {
            if let [lower, higher] = pair {
                assert!(higher > lower);
            }
        }
    }

    #[test]
    fn gaussian_samples_are_finite_and_vary() {
        let mut rng = SmallRng::seed_from_u64(11);
        let samples: Vec<f64> = (0..100).map(|_| gaussian(&mut rng)).collect();

        assert!(samples.iter().all(|s| s.is_finite()));
        let first = samples.first().copied().unwrap_or_default();
        assert!(samples.iter().any(|s| (s - first).abs() > f64::EPSILON));
    }
}
