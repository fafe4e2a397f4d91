use crate::config::BrainConfig;
use faery_data::NeuronWeightMatrix;
use rand::Rng;

/// Perturbs weights in place.
///
/// Each weight is hit with probability `mutation_rate`. One sign is drawn
/// per call and shared by every hit; magnitudes are exponential with mean
/// `mutation_magnitude`.
pub fn mutate_with_config<R: Rng>(
    matrix: &mut NeuronWeightMatrix,
    config: &BrainConfig,
    rng: &mut R,
) {
    let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
    for weight in &mut matrix.weights {
        if rng.gen::<f64>() < config.mutation_rate {
            *weight += sign * exponential(config.mutation_magnitude, rng);
        }
    }
}

fn exponential<R: Rng>(mean: f64, rng: &mut R) -> f64 {
    let u: f64 = rng.gen();
    -mean * (1.0 - u).ln()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::reconcile::fresh_matrix;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn matrix(rng: &mut ChaCha8Rng) -> NeuronWeightMatrix {
        let sensors = (0..6).map(|i| i.to_string()).collect();
        let motors = (0..8).map(|i| format!("{}_{}", i, i + 1)).collect();
        fresh_matrix(sensors, motors, rng)
    }

    #[test]
    fn test_zero_rate_is_noop() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut m = matrix(&mut rng);
        let before = m.clone();
        let config = BrainConfig {
            mutation_rate: 0.0,
            ..Default::default()
        };
        mutate_with_config(&mut m, &config, &mut rng);
        assert_eq!(m, before);
    }

    #[test]
    fn test_full_rate_moves_every_weight_one_way() {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let mut m = matrix(&mut rng);
        let before = m.clone();
        let config = BrainConfig {
            mutation_rate: 1.0,
            mutation_magnitude: 2.0,
        };
        mutate_with_config(&mut m, &config, &mut rng);
        let deltas: Vec<f64> = m
            .weights
            .iter()
            .zip(&before.weights)
            .map(|(a, b)| a - b)
            .collect();
        let all_up = deltas.iter().all(|d| *d >= 0.0);
        let all_down = deltas.iter().all(|d| *d <= 0.0);
        assert!(all_up || all_down);
        assert!(deltas.iter().any(|d| d.abs() > 0.0));
        assert_eq!(m.sensor_names, before.sensor_names);
    }

    #[test]
    fn test_exponential_mean() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let n = 20_000;
        let mean = (0..n).map(|_| exponential(2.0, &mut rng)).sum::<f64>() / n as f64;
        assert!((mean - 2.0).abs() < 0.1, "mean {mean}");
    }
}
