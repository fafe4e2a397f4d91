//! NNDF brain writer.

use crate::document::{num, DocumentSink};
use faery_core::emitter::NeuralEmitter;
use faery_core::EmitterError;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct NndfWriter {
    sink: DocumentSink,
}

impl Default for NndfWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl NndfWriter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            sink: DocumentSink::on_disk(),
        }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            sink: DocumentSink::in_memory(),
        }
    }

    #[must_use]
    pub fn documents(&self) -> &[(PathBuf, String)] {
        self.sink.documents()
    }
}

impl NeuralEmitter for NndfWriter {
    fn begin_neural_document(&mut self, path: &Path) -> Result<(), EmitterError> {
        self.sink.begin(path)?;
        self.sink.push_line("<neuralNetwork>")
    }

    fn end_neural_document(&mut self) -> Result<(), EmitterError> {
        self.sink.push_line("</neuralNetwork>")?;
        self.sink.finish()?;
        Ok(())
    }

    fn abort_neural_document(&mut self) -> Result<(), EmitterError> {
        self.sink.abort()
    }

    fn emit_sensor_neuron(&mut self, name: &str, link: &str) -> Result<(), EmitterError> {
        self.sink.push_line(&format!(
            "    <neuron name = \"{name}\" type = \"sensor\" linkName = \"{link}\" />"
        ))
    }

    fn emit_motor_neuron(&mut self, name: &str, joint: &str) -> Result<(), EmitterError> {
        self.sink.push_line(&format!(
            "    <neuron name = \"{name}\" type = \"motor\"  jointName = \"{joint}\" />"
        ))
    }

    fn emit_synapse(
        &mut self,
        source: &str,
        target: &str,
        weight: f64,
    ) -> Result<(), EmitterError> {
        if !weight.is_finite() {
            return Err(EmitterError::Rejected(format!(
                "non-finite weight on {source} -> {target}"
            )));
        }
        self.sink.push_line(&format!(
            "    <synapse sourceNeuronName = \"{source}\" targetNeuronName = \"{target}\" weight = \"{}\" />",
            num(weight)
        ))
    }
}
