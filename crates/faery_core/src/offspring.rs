//! Producing a child genome from a parent, with retry on collisions.

use crate::brain::{build_brain, WeightMatrixLogic};
use crate::builder::{BodyBuilder, BuiltBody};
use crate::config::AppConfig;
use crate::emitter::{with_neural_document, with_scene_document, NeuralEmitter, SceneEmitter};
use crate::error::{FaeryError, Result};
use crate::metrics::Metrics;
use crate::mutator::BodyMutator;
use crate::plan::NodeIdGenerator;
use faery_data::Genome;
use rand::Rng;
use std::path::Path;

/// A child genome together with the body that validated it.
#[derive(Debug, Clone)]
pub struct Offspring {
    pub genome: Genome,
    pub body: BuiltBody,
    /// Build attempts spent, including the successful one.
    pub attempts: usize,
}

impl Offspring {
    /// Writes the body and brain documents. The genome's brain is replaced by
    /// the matrix actually emitted.
    pub fn emit<R, S, N>(
        &mut self,
        scene: &mut S,
        body_path: &Path,
        neural: &mut N,
        brain_path: &Path,
        rng: &mut R,
    ) -> Result<()>
    where
        R: Rng,
        S: SceneEmitter + ?Sized,
        N: NeuralEmitter + ?Sized,
    {
        with_scene_document(scene, body_path, |s| self.body.replay(s))?;
        let previous = self.genome.brain_weights.as_ref();
        let body = &self.body;
        let matrix = with_neural_document(neural, brain_path, |n| {
            build_brain(body, previous, rng, n)
        })?;
        self.genome.brain_weights = Some(matrix);
        Ok(())
    }
}

/// Mutates `parent` until its body builds.
///
/// Each attempt starts again from the parent; a colliding plan is never
/// repaired. Emitter failures are not retried. The parent's brain, when
/// present, is carried over to the new body and weight-mutated.
pub fn produce_offspring<R: Rng>(
    parent: &Genome,
    child_id: u64,
    config: &AppConfig,
    rng: &mut R,
    metrics: &Metrics,
) -> Result<Offspring> {
    let builder = BodyBuilder::new(&config.build);
    let mutator = BodyMutator::from_app_config(config);
    let max_attempts = config.mutation.max_build_attempts.max(1);
    let rounds = config.mutation.mutations_per_offspring.max(1);

    for attempt in 1..=max_attempts {
        let mut ids = NodeIdGenerator::after(&parent.body);
        let plan = mutator.mutate_times(&parent.body, rounds, &mut ids, rng);
        metrics.record_mutations(rounds);

        match builder.build_detached(&plan, rng) {
            Ok(body) => {
                metrics.record_build();
                metrics.record_offspring();
                let brain_weights = parent.brain_weights.as_ref().map(|old| {
                    let mut matrix =
                        old.reconciled_with_rng(body.sensor_link_names(), body.joint_names(), rng);
                    matrix.mutate_with_config(&config.brain, rng);
                    matrix
                });
                tracing::debug!(
                    parent = parent.id,
                    child = child_id,
                    attempt,
                    parts = body.part_count(),
                    "Offspring built"
                );
                return Ok(Offspring {
                    genome: Genome {
                        id: child_id,
                        brain_weights,
                        body: plan,
                    },
                    body,
                    attempts: attempt,
                });
            }
            Err(err) if err.is_collision() => {
                metrics.record_collision();
                tracing::warn!(
                    parent = parent.id,
                    child = child_id,
                    attempt,
                    error = %err,
                    "Mutated plan collides, retrying"
                );
            }
            Err(err) => return Err(err),
        }
    }

    Err(FaeryError::RetriesExhausted {
        attempts: max_attempts,
    })
}
