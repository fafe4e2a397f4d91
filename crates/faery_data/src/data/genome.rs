use super::body::BodyCons;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Dense sensor x motor weight table with stable name-to-index maps.
///
/// Weights are stored row-major: one row per sensor neuron, one column per
/// motor neuron. Decoding goes through [`NeuronWeightMatrix::from_parts`],
/// so a stored matrix whose weight count does not match its names is
/// rejected and the lookup caches are always rebuilt.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "StoredMatrix", into = "StoredMatrix")]
pub struct NeuronWeightMatrix {
    pub sensor_names: Vec<String>,
    pub motor_names: Vec<String>,
    pub weights: Vec<f64>,
    /// Sensor name to row (not serialized).
    pub sensor_index: HashMap<String, usize>,
    /// Motor name to column (not serialized).
    pub motor_index: HashMap<String, usize>,
}

/// On-disk form of a [`NeuronWeightMatrix`]: names and weights only.
#[derive(Serialize, Deserialize)]
pub struct StoredMatrix {
    sensor_names: Vec<String>,
    motor_names: Vec<String>,
    weights: Vec<f64>,
}

impl TryFrom<StoredMatrix> for NeuronWeightMatrix {
    type Error = anyhow::Error;

    fn try_from(stored: StoredMatrix) -> anyhow::Result<Self> {
        Self::from_parts(stored.sensor_names, stored.motor_names, stored.weights)
    }
}

impl From<NeuronWeightMatrix> for StoredMatrix {
    fn from(matrix: NeuronWeightMatrix) -> Self {
        Self {
            sensor_names: matrix.sensor_names,
            motor_names: matrix.motor_names,
            weights: matrix.weights,
        }
    }
}

impl PartialEq for NeuronWeightMatrix {
    fn eq(&self, other: &Self) -> bool {
        self.sensor_names == other.sensor_names
            && self.motor_names == other.motor_names
            && self.weights == other.weights
    }
}

impl NeuronWeightMatrix {
    /// Builds a matrix from names and a row-major weight vector.
    pub fn from_parts(
        sensor_names: Vec<String>,
        motor_names: Vec<String>,
        weights: Vec<f64>,
    ) -> anyhow::Result<Self> {
        anyhow::ensure!(
            weights.len() == sensor_names.len() * motor_names.len(),
            "Weight count {} does not match {} sensors x {} motors",
            weights.len(),
            sensor_names.len(),
            motor_names.len()
        );
        let mut matrix = Self {
            sensor_names,
            motor_names,
            weights,
            sensor_index: HashMap::new(),
            motor_index: HashMap::new(),
        };
        matrix.initialize_index_maps();
        Ok(matrix)
    }

    /// Rebuilds the name lookup caches, e.g. after deserialization.
    pub fn initialize_index_maps(&mut self) {
        self.sensor_index = self
            .sensor_names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.clone(), i))
            .collect();
        self.motor_index = self
            .motor_names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.clone(), i))
            .collect();
    }

    /// (sensors, motors)
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.sensor_names.len(), self.motor_names.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    #[must_use]
    pub fn sensor_row(&self, name: &str) -> Option<usize> {
        self.sensor_index
            .get(name)
            .copied()
            .or_else(|| self.sensor_names.iter().position(|n| n == name))
    }

    #[must_use]
    pub fn motor_column(&self, name: &str) -> Option<usize> {
        self.motor_index
            .get(name)
            .copied()
            .or_else(|| self.motor_names.iter().position(|n| n == name))
    }

    #[must_use]
    pub fn weight_at(&self, row: usize, column: usize) -> Option<f64> {
        if row >= self.sensor_names.len() || column >= self.motor_names.len() {
            return None;
        }
        self.weights.get(row * self.motor_names.len() + column).copied()
    }

    /// Weight of the synapse from `sensor` to `motor`, matched by exact name.
    #[must_use]
    pub fn get(&self, sensor: &str, motor: &str) -> Option<f64> {
        self.weight_at(self.sensor_row(sensor)?, self.motor_column(motor)?)
    }

    /// Overwrites one weight. Returns false when either name is unknown.
    pub fn set(&mut self, sensor: &str, motor: &str, weight: f64) -> bool {
        let (Some(row), Some(column)) = (self.sensor_row(sensor), self.motor_column(motor)) else {
            return false;
        };
        let index = row * self.motor_names.len() + column;
        match self.weights.get_mut(index) {
            Some(slot) => {
                *slot = weight;
                true
            }
            None => false,
        }
    }

    /// Every synapse as (sensor, motor, weight), row-major.
    ///
    /// Pairs without a weight, or weights without a pair, are not yielded.
    pub fn synapses(&self) -> impl Iterator<Item = (&str, &str, f64)> + '_ {
        self.sensor_names
            .iter()
            .flat_map(move |s| self.motor_names.iter().map(move |m| (s.as_str(), m.as_str())))
            .zip(self.weights.iter().copied())
            .map(|((s, m), w)| (s, m, w))
    }
}

/// One evolvable individual: a body plan plus optional brain weights.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Genome {
    pub id: u64,
    /// Absent until the individual's first brain is built.
    pub brain_weights: Option<NeuronWeightMatrix>,
    pub body: BodyCons,
}

impl Genome {
    #[must_use]
    pub fn new(id: u64, body: BodyCons) -> Self {
        Self {
            id,
            brain_weights: None,
            body,
        }
    }

    /// Serialize genome to hex string.
    #[must_use]
    pub fn to_hex(&self) -> String {
        let bytes = serde_json::to_vec(self).unwrap_or_default();
        hex::encode(bytes)
    }

    /// Deserialize genome from hex string.
    pub fn from_hex(hex_str: &str) -> anyhow::Result<Self> {
        let bytes = hex::decode(hex_str)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
