use super::standard_normal;
use faery_data::NeuronWeightMatrix;
use rand::Rng;
use std::collections::HashMap;

pub fn fresh_matrix<R: Rng>(
    sensors: Vec<String>,
    motors: Vec<String>,
    rng: &mut R,
) -> NeuronWeightMatrix {
    let weights = (0..sensors.len() * motors.len())
        .map(|_| standard_normal(rng))
        .collect();
    assemble(sensors, motors, weights)
}

/// Carries weights over to a new sensor/motor name set.
///
/// Names match by exact equality only. Cells are visited row-major, and a
/// fresh sample is drawn only for cells without an inherited weight.
pub fn reconcile_with_rng<R: Rng>(
    previous: &NeuronWeightMatrix,
    sensors: Vec<String>,
    motors: Vec<String>,
    rng: &mut R,
) -> NeuronWeightMatrix {
    let old_rows: Vec<Option<usize>> = sensors.iter().map(|s| previous.sensor_row(s)).collect();
    let old_cols: Vec<Option<usize>> = motors.iter().map(|m| previous.motor_column(m)).collect();

    let mut weights = Vec::with_capacity(sensors.len() * motors.len());
    for row in &old_rows {
        for col in &old_cols {
            let inherited = match (row, col) {
                (Some(r), Some(c)) => previous.weight_at(*r, *c),
                _ => None,
            };
            weights.push(inherited.unwrap_or_else(|| standard_normal(rng)));
        }
    }
    assemble(sensors, motors, weights)
}

fn assemble(sensors: Vec<String>, motors: Vec<String>, weights: Vec<f64>) -> NeuronWeightMatrix {
    let mut matrix = NeuronWeightMatrix {
        sensor_names: sensors,
        motor_names: motors,
        weights,
        sensor_index: HashMap::new(),
        motor_index: HashMap::new(),
    };
    matrix.initialize_index_maps();
    matrix
}
