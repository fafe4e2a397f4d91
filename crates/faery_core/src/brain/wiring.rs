use super::WeightMatrixLogic;
use crate::builder::BuiltBody;
use crate::emitter::NeuralEmitter;
use crate::error::Result;
use faery_data::NeuronWeightMatrix;
use rand::Rng;

#[must_use]
pub fn sensor_neuron_name(link: &str) -> String {
    format!("sensor_{link}")
}

#[must_use]
pub fn motor_neuron_name(joint: &str) -> String {
    format!("motor_{joint}")
}

/// Wires a brain for `body` and emits it.
///
/// Rows are the body's sensor parts and columns its joints, both in build
/// order. With a `previous` matrix, surviving weights are inherited.
pub fn build_brain<R: Rng, E: NeuralEmitter + ?Sized>(
    body: &BuiltBody,
    previous: Option<&NeuronWeightMatrix>,
    rng: &mut R,
    emitter: &mut E,
) -> Result<NeuronWeightMatrix> {
    let sensors = body.sensor_link_names();
    let motors = body.joint_names();
    let matrix = match previous {
        Some(old) => old.reconciled_with_rng(sensors, motors, rng),
        None => NeuronWeightMatrix::new_random_with_rng(sensors, motors, rng),
    };
    emit_brain(&matrix, emitter)?;
    Ok(matrix)
}

/// Sensor neurons, then motor neurons, then every synapse row-major.
pub fn emit_brain<E: NeuralEmitter + ?Sized>(
    matrix: &NeuronWeightMatrix,
    emitter: &mut E,
) -> Result<()> {
    for link in &matrix.sensor_names {
        emitter.emit_sensor_neuron(&sensor_neuron_name(link), link)?;
    }
    for joint in &matrix.motor_names {
        emitter.emit_motor_neuron(&motor_neuron_name(joint), joint)?;
    }
    for (sensor, motor, weight) in matrix.synapses() {
        emitter.emit_synapse(
            &sensor_neuron_name(sensor),
            &motor_neuron_name(motor),
            weight,
        )?;
    }
    tracing::debug!(
        sensors = matrix.sensor_names.len(),
        motors = matrix.motor_names.len(),
        "Brain emitted"
    );
    Ok(())
}
