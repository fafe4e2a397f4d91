pub mod mutation;
pub mod reconcile;
pub mod wiring;

pub use faery_data::NeuronWeightMatrix;
use rand::Rng;

pub use wiring::{build_brain, emit_brain, motor_neuron_name, sensor_neuron_name};

/// Trait defining the weight-matrix logic of a FAERY brain.
pub trait WeightMatrixLogic {
    /// A fully connected matrix with every weight drawn from N(0, 1).
    fn new_random_with_rng<R: Rng>(
        sensors: Vec<String>,
        motors: Vec<String>,
        rng: &mut R,
    ) -> Self;

    /// A matrix over the new names that keeps every weight whose sensor and
    /// motor names both survive, and samples the rest from N(0, 1).
    #[must_use]
    fn reconciled_with_rng<R: Rng>(
        &self,
        sensors: Vec<String>,
        motors: Vec<String>,
        rng: &mut R,
    ) -> Self;

    fn mutate_with_config<R: Rng>(&mut self, config: &crate::config::BrainConfig, rng: &mut R);
}

impl WeightMatrixLogic for NeuronWeightMatrix {
    fn new_random_with_rng<R: Rng>(
        sensors: Vec<String>,
        motors: Vec<String>,
        rng: &mut R,
    ) -> Self {
        reconcile::fresh_matrix(sensors, motors, rng)
    }

    fn reconciled_with_rng<R: Rng>(
        &self,
        sensors: Vec<String>,
        motors: Vec<String>,
        rng: &mut R,
    ) -> Self {
        reconcile::reconcile_with_rng(self, sensors, motors, rng)
    }

    fn mutate_with_config<R: Rng>(&mut self, config: &crate::config::BrainConfig, rng: &mut R) {
        mutation::mutate_with_config(self, config, rng);
    }
}

/// Standard normal sample via the Box-Muller transform.
pub fn standard_normal<R: Rng>(rng: &mut R) -> f64 {
    let u1: f64 = rng.gen::<f64>().max(f64::EPSILON);
    let u2: f64 = rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}
