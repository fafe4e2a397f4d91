//! Lowers a [`BodyCons`] tree into placed parts and joints.
//!
//! The walk is pre-order over an explicit stack. A node's repetition chain
//! is finished before any of its children are visited, and children are
//! visited in direction order. Every part claims one cell of an integer
//! lattice; a second claim on the same cell is a self-intersecting plan.

use crate::catalog::{PartLogic, PlacedPart};
use crate::config::{BuildConfig, CollisionPolicy};
use crate::emitter::{JointRecord, NullEmitter, SceneEmitter};
use crate::error::{FaeryError, Result};
use crate::geometry::add_cell;
use crate::plan::BodyPlanLogic;
use faery_data::{BodyCons, CubeElement, LatticeCell, Position};
use rand::Rng;
use std::collections::BTreeSet;

const ORIGIN_CELL: LatticeCell = [0, 0, 0];

/// Everything one build pass produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuiltBody {
    /// Indexed by part id.
    pub parts: Vec<PlacedPart>,
    /// Creation order. `joints[k]` is the incoming joint of part `k + 1`.
    pub joints: Vec<JointRecord>,
    /// Ids of sensor-bearing parts, creation order.
    pub sensor_parts: Vec<usize>,
    pub lattice: BTreeSet<LatticeCell>,
    /// Node ids whose parts were dropped by the lenient policy.
    pub skipped: Vec<u64>,
}

impl BuiltBody {
    #[must_use]
    pub fn joint_names(&self) -> Vec<String> {
        self.joints.iter().map(|j| j.name.clone()).collect()
    }

    #[must_use]
    pub fn sensor_link_names(&self) -> Vec<String> {
        self.sensor_parts.iter().map(ToString::to_string).collect()
    }

    #[must_use]
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// Re-emits the body in build order: root solid, then each joint
    /// followed by the solid it attaches.
    pub fn replay<E: SceneEmitter + ?Sized>(&self, emitter: &mut E) -> Result<()> {
        let Some(root) = self.parts.first() else {
            return Ok(());
        };
        emitter.emit_solid(&root.solid())?;
        for joint in &self.joints {
            let child = self.parts.get(joint.child).ok_or_else(|| {
                FaeryError::invalid_shape(format!("joint {} has no child part", joint.name))
            })?;
            emitter.emit_joint(joint)?;
            emitter.emit_solid(&child.solid())?;
        }
        Ok(())
    }

    fn push_part(&mut self, part: PlacedPart) {
        if part.kind.is_sensor() {
            self.sensor_parts.push(part.id);
        }
        self.parts.push(part);
    }
}

/// One pending step of the walk.
struct Frame<'t> {
    node: &'t BodyCons,
    /// Physical parent part.
    parent: usize,
    /// Lattice cell of the previous step, skipped or not.
    parent_cell: LatticeCell,
    /// Direction this step grows in, as seen from the parent.
    toward: CubeElement,
    /// Steps left in this node's chain, counting this one.
    remaining: u32,
}

pub struct BodyBuilder<'c> {
    config: &'c BuildConfig,
}

impl<'c> BodyBuilder<'c> {
    #[must_use]
    pub fn new(config: &'c BuildConfig) -> Self {
        Self { config }
    }

    /// Builds without emitting anything; used to validate mutated plans.
    pub fn build_detached<R: Rng>(&self, plan: &BodyCons, rng: &mut R) -> Result<BuiltBody> {
        self.build(plan, rng, &mut NullEmitter)
    }

    /// Builds `plan`, emitting each solid and joint as it is created.
    ///
    /// Under [`CollisionPolicy::Strict`] the first lattice collision aborts
    /// the build; whatever was already emitted stays emitted.
    pub fn build<R: Rng, E: SceneEmitter + ?Sized>(
        &self,
        plan: &BodyCons,
        rng: &mut R,
        emitter: &mut E,
    ) -> Result<BuiltBody> {
        plan.validate()?;

        let mut body = BuiltBody::default();
        let root_spec = spec_of(plan)?;
        let root = plan.part_kind.instantiate(
            Position::from(self.config.root_position),
            CubeElement::Center,
            0,
            plan.id,
            self.config,
            rng,
        );
        emitter.emit_solid(&root.solid())?;
        body.lattice.insert(ORIGIN_CELL);
        body.push_part(root);

        let mut stack = Vec::new();
        schedule(&mut stack, plan, 0, ORIGIN_CELL, root_spec.repetitions)?;

        while let Some(frame) = stack.pop() {
            let spec = spec_of(frame.node)?;
            let cell = add_cell(frame.parent_cell, frame.toward.offset());

            let next_parent = if body.lattice.contains(&cell) {
                match self.config.collision_policy {
                    CollisionPolicy::Strict => {
                        return Err(FaeryError::StructuralCollision {
                            node_id: frame.node.id,
                            cell,
                        });
                    }
                    CollisionPolicy::Lenient => {
                        tracing::warn!(
                            node_id = frame.node.id,
                            ?cell,
                            "Lattice cell occupied, skipping part"
                        );
                        body.skipped.push(frame.node.id);
                        frame.parent
                    }
                }
            } else {
                let parent = body.parts.get(frame.parent).ok_or_else(|| {
                    FaeryError::invalid_shape(format!("missing parent part {}", frame.parent))
                })?;
                let attach_point = parent.anchor(frame.toward);
                let part_id = body.parts.len();
                let part = frame.node.part_kind.instantiate(
                    attach_point,
                    frame.toward.opposite(),
                    part_id,
                    frame.node.id,
                    self.config,
                    rng,
                );
                let joint = JointRecord {
                    name: format!("{}_{}", frame.parent, part_id),
                    parent: frame.parent,
                    child: part_id,
                    joint_type: frame.node.part_kind.joint_type(),
                    position: attach_point,
                    axis: spec.axis,
                };
                emitter.emit_joint(&joint)?;
                emitter.emit_solid(&part.solid())?;
                body.lattice.insert(cell);
                body.joints.push(joint);
                body.push_part(part);
                part_id
            };

            if frame.remaining > 1 {
                stack.push(Frame {
                    node: frame.node,
                    parent: next_parent,
                    parent_cell: cell,
                    toward: spec.direction_to_build,
                    remaining: frame.remaining - 1,
                });
            } else {
                schedule_children(&mut stack, frame.node, next_parent, cell)?;
            }
        }

        tracing::debug!(
            root = plan.id,
            parts = body.parts.len(),
            joints = body.joints.len(),
            sensors = body.sensor_parts.len(),
            skipped = body.skipped.len(),
            "Body built"
        );
        Ok(body)
    }
}

fn spec_of(node: &BodyCons) -> Result<faery_data::BuildSpecification> {
    node.active_spec().copied().ok_or_else(|| {
        FaeryError::invalid_shape(format!("node {} has no build specification", node.id))
    })
}

/// Queues the rest of the root's chain, or its children once the chain is done.
fn schedule<'t>(
    stack: &mut Vec<Frame<'t>>,
    node: &'t BodyCons,
    parent: usize,
    cell: LatticeCell,
    remaining: u32,
) -> Result<()> {
    if remaining > 1 {
        stack.push(Frame {
            node,
            parent,
            parent_cell: cell,
            toward: spec_of(node)?.direction_to_build,
            remaining: remaining - 1,
        });
        Ok(())
    } else {
        schedule_children(stack, node, parent, cell)
    }
}

fn schedule_children<'t>(
    stack: &mut Vec<Frame<'t>>,
    node: &'t BodyCons,
    parent: usize,
    cell: LatticeCell,
) -> Result<()> {
    // Reverse so the first direction is popped first.
    for (&direction, child) in node.children.iter().rev() {
        stack.push(Frame {
            node: &**child,
            parent,
            parent_cell: cell,
            toward: direction,
            remaining: spec_of(child)?.repetitions,
        });
    }
    Ok(())
}
