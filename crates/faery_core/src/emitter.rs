//! Collaborator interfaces the core writes bodies and brains through.
//!
//! The builder and brain builder never touch files. They call a
//! [`SceneEmitter`] and a [`NeuralEmitter`] in generation order; file
//! formats live in `faery_io`. Two in-memory emitters ship here: a
//! [`NullEmitter`] for validation builds and a [`RecordingEmitter`] that
//! keeps every call for inspection.

use crate::catalog::ColorTag;
use crate::error::{EmitterError, FaeryError};
use faery_data::{Axis, Dimensions, JointType, Position};
use std::path::{Path, PathBuf};

/// One rigid box, positioned in world coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct SolidRecord {
    pub id: usize,
    pub position: Position,
    pub size: Dimensions,
    pub color: ColorTag,
}

impl SolidRecord {
    /// Link name used by every document format.
    #[must_use]
    pub fn link_name(&self) -> String {
        self.id.to_string()
    }
}

/// One joint between two solids. `position` is the world-space hinge point.
#[derive(Debug, Clone, PartialEq)]
pub struct JointRecord {
    pub name: String,
    pub parent: usize,
    pub child: usize,
    pub joint_type: JointType,
    pub position: Position,
    pub axis: Axis,
}

pub trait SceneEmitter {
    fn begin_scene_document(&mut self, path: &Path) -> Result<(), EmitterError>;
    fn end_scene_document(&mut self) -> Result<(), EmitterError>;
    /// Drops the open document without writing it.
    fn abort_scene_document(&mut self) -> Result<(), EmitterError>;
    fn emit_solid(&mut self, solid: &SolidRecord) -> Result<(), EmitterError>;
    fn emit_joint(&mut self, joint: &JointRecord) -> Result<(), EmitterError>;
}

pub trait NeuralEmitter {
    fn begin_neural_document(&mut self, path: &Path) -> Result<(), EmitterError>;
    fn end_neural_document(&mut self) -> Result<(), EmitterError>;
    /// Drops the open document without writing it.
    fn abort_neural_document(&mut self) -> Result<(), EmitterError>;
    fn emit_sensor_neuron(&mut self, name: &str, link: &str) -> Result<(), EmitterError>;
    fn emit_motor_neuron(&mut self, name: &str, joint: &str) -> Result<(), EmitterError>;
    fn emit_synapse(
        &mut self,
        source: &str,
        target: &str,
        weight: f64,
    ) -> Result<(), EmitterError>;
}

/// Runs `body` inside a scene document.
///
/// The document is ended when `body` succeeds and aborted when it fails, so
/// a failed emission never produces a truncated document. An error from
/// `body` wins over an error from aborting.
pub fn with_scene_document<E, T, F>(
    emitter: &mut E,
    path: &Path,
    body: F,
) -> Result<T, FaeryError>
where
    E: SceneEmitter + ?Sized,
    F: FnOnce(&mut E) -> Result<T, FaeryError>,
{
    emitter.begin_scene_document(path)?;
    match body(emitter) {
        Ok(value) => {
            emitter.end_scene_document()?;
            Ok(value)
        }
        Err(err) => {
            if let Err(abort) = emitter.abort_scene_document() {
                tracing::warn!(error = %abort, "Failed to abort scene document");
            }
            Err(err)
        }
    }
}

/// Neural counterpart of [`with_scene_document`].
pub fn with_neural_document<E, T, F>(
    emitter: &mut E,
    path: &Path,
    body: F,
) -> Result<T, FaeryError>
where
    E: NeuralEmitter + ?Sized,
    F: FnOnce(&mut E) -> Result<T, FaeryError>,
{
    emitter.begin_neural_document(path)?;
    match body(emitter) {
        Ok(value) => {
            emitter.end_neural_document()?;
            Ok(value)
        }
        Err(err) => {
            if let Err(abort) = emitter.abort_neural_document() {
                tracing::warn!(error = %abort, "Failed to abort neural document");
            }
            Err(err)
        }
    }
}

/// Accepts and discards every call.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEmitter;

impl SceneEmitter for NullEmitter {
    fn begin_scene_document(&mut self, _path: &Path) -> Result<(), EmitterError> {
        Ok(())
    }
    fn end_scene_document(&mut self) -> Result<(), EmitterError> {
        Ok(())
    }
    fn abort_scene_document(&mut self) -> Result<(), EmitterError> {
        Ok(())
    }
    fn emit_solid(&mut self, _solid: &SolidRecord) -> Result<(), EmitterError> {
        Ok(())
    }
    fn emit_joint(&mut self, _joint: &JointRecord) -> Result<(), EmitterError> {
        Ok(())
    }
}

impl NeuralEmitter for NullEmitter {
    fn begin_neural_document(&mut self, _path: &Path) -> Result<(), EmitterError> {
        Ok(())
    }
    fn end_neural_document(&mut self) -> Result<(), EmitterError> {
        Ok(())
    }
    fn abort_neural_document(&mut self) -> Result<(), EmitterError> {
        Ok(())
    }
    fn emit_sensor_neuron(&mut self, _name: &str, _link: &str) -> Result<(), EmitterError> {
        Ok(())
    }
    fn emit_motor_neuron(&mut self, _name: &str, _joint: &str) -> Result<(), EmitterError> {
        Ok(())
    }
    fn emit_synapse(
        &mut self,
        _source: &str,
        _target: &str,
        _weight: f64,
    ) -> Result<(), EmitterError> {
        Ok(())
    }
}

/// A single collaborator call as seen by [`RecordingEmitter`].
#[derive(Debug, Clone, PartialEq)]
pub enum EmitterEvent {
    BeginScene(PathBuf),
    EndScene,
    AbortScene,
    Solid(SolidRecord),
    Joint(JointRecord),
    BeginNeural(PathBuf),
    EndNeural,
    AbortNeural,
    SensorNeuron { name: String, link: String },
    MotorNeuron { name: String, joint: String },
    Synapse { source: String, target: String, weight: f64 },
}

/// Records every call in order. Emits outside an open document are
/// recorded anyway; only `fail_after` makes it refuse calls.
#[derive(Debug, Default, Clone)]
pub struct RecordingEmitter {
    pub events: Vec<EmitterEvent>,
    fail_after: Option<usize>,
}

impl RecordingEmitter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An emitter that accepts `calls` calls and rejects every one after.
    #[must_use]
    pub fn failing_after(calls: usize) -> Self {
        Self {
            events: Vec::new(),
            fail_after: Some(calls),
        }
    }

    fn record(&mut self, event: EmitterEvent) -> Result<(), EmitterError> {
        if let Some(limit) = self.fail_after {
            if self.events.len() >= limit {
                return Err(EmitterError::Rejected(format!("{event:?}")));
            }
        }
        self.events.push(event);
        Ok(())
    }

    pub fn solids(&self) -> impl Iterator<Item = &SolidRecord> {
        self.events.iter().filter_map(|e| match e {
            EmitterEvent::Solid(s) => Some(s),
            _ => None,
        })
    }

    pub fn joints(&self) -> impl Iterator<Item = &JointRecord> {
        self.events.iter().filter_map(|e| match e {
            EmitterEvent::Joint(j) => Some(j),
            _ => None,
        })
    }

    #[must_use]
    pub fn synapse_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, EmitterEvent::Synapse { .. }))
            .count()
    }
}

impl SceneEmitter for RecordingEmitter {
    fn begin_scene_document(&mut self, path: &Path) -> Result<(), EmitterError> {
        self.record(EmitterEvent::BeginScene(path.to_path_buf()))
    }
    fn end_scene_document(&mut self) -> Result<(), EmitterError> {
        self.record(EmitterEvent::EndScene)
    }
    fn abort_scene_document(&mut self) -> Result<(), EmitterError> {
        self.record(EmitterEvent::AbortScene)
    }
    fn emit_solid(&mut self, solid: &SolidRecord) -> Result<(), EmitterError> {
        self.record(EmitterEvent::Solid(solid.clone()))
    }
    fn emit_joint(&mut self, joint: &JointRecord) -> Result<(), EmitterError> {
        self.record(EmitterEvent::Joint(joint.clone()))
    }
}

impl NeuralEmitter for RecordingEmitter {
    fn begin_neural_document(&mut self, path: &Path) -> Result<(), EmitterError> {
        self.record(EmitterEvent::BeginNeural(path.to_path_buf()))
    }
    fn end_neural_document(&mut self) -> Result<(), EmitterError> {
        self.record(EmitterEvent::EndNeural)
    }
    fn abort_neural_document(&mut self) -> Result<(), EmitterError> {
        self.record(EmitterEvent::AbortNeural)
    }
    fn emit_sensor_neuron(&mut self, name: &str, link: &str) -> Result<(), EmitterError> {
        self.record(EmitterEvent::SensorNeuron {
            name: name.to_string(),
            link: link.to_string(),
        })
    }
    fn emit_motor_neuron(&mut self, name: &str, joint: &str) -> Result<(), EmitterError> {
        self.record(EmitterEvent::MotorNeuron {
            name: name.to_string(),
            joint: joint.to_string(),
        })
    }
    fn emit_synapse(
        &mut self,
        source: &str,
        target: &str,
        weight: f64,
    ) -> Result<(), EmitterError> {
        self.record(EmitterEvent::Synapse {
            source: source.to_string(),
            target: target.to_string(),
            weight,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(id: usize) -> SolidRecord {
        SolidRecord {
            id,
            position: Position::ORIGIN,
            size: Dimensions::cube(1.0),
            color: ColorTag::Red,
        }
    }

    #[test]
    fn test_scoped_document_closes_on_success() {
        let mut rec = RecordingEmitter::new();
        let n = with_scene_document(&mut rec, Path::new("body0.urdf"), |e| {
            e.emit_solid(&solid(0))?;
            Ok(1)
        })
        .unwrap();
        assert_eq!(n, 1);
        assert_eq!(rec.events.len(), 3);
        assert_eq!(rec.events[2], EmitterEvent::EndScene);
    }

    #[test]
    fn test_scoped_document_aborts_on_failure() {
        let mut rec = RecordingEmitter::new();
        let result: Result<(), FaeryError> =
            with_neural_document(&mut rec, Path::new("brain0.nndf"), |_| {
                Err(FaeryError::invalid_shape("boom"))
            });
        assert!(matches!(result, Err(FaeryError::InvalidShape(_))));
        assert_eq!(rec.events.last(), Some(&EmitterEvent::AbortNeural));
        assert!(!rec.events.contains(&EmitterEvent::EndNeural));
    }

    #[test]
    fn test_failed_abort_keeps_body_error() {
        // One call allowed: begin succeeds, the abort is rejected.
        let mut rec = RecordingEmitter::failing_after(1);
        let result: Result<(), FaeryError> =
            with_scene_document(&mut rec, Path::new("body0.urdf"), |_| {
                Err(FaeryError::invalid_shape("boom"))
            });
        assert!(matches!(result, Err(FaeryError::InvalidShape(_))));
        assert_eq!(rec.events.len(), 1);
    }

    #[test]
    fn test_failing_emitter_rejects_after_limit() {
        let mut rec = RecordingEmitter::failing_after(1);
        assert!(rec.emit_solid(&solid(0)).is_ok());
        let err = rec.emit_solid(&solid(1)).unwrap_err();
        assert!(matches!(err, EmitterError::Rejected(_)));
        assert_eq!(rec.solids().count(), 1);
    }
}
