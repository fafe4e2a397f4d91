use super::direction::{Axis, CubeElement};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// How a part is jointed to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JointType {
    /// Motor-driven hinge about the build axis.
    Revolute,
    /// Welded to the parent.
    Fixed,
}

impl JointType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            JointType::Revolute => "revolute",
            JointType::Fixed => "fixed",
        }
    }
}

/// The kind of rigid part a body-plan node grows.
///
/// Kinds are values: the mutator swaps a node's kind wholesale and never
/// edits one in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum BodyPartKind {
    /// Box with extents sampled on every instantiation.
    RandomSizedBody,
    /// Random-sized box that also carries a sensor.
    RandomSizedSensor,
    /// Cube of edge `size` on a revolute joint.
    FixedSizedBody { size: f64 },
    /// Sensor-bearing cube on a revolute joint.
    FixedSizedSensor { size: f64 },
    /// Cube welded to its parent.
    FixedSizedUnmovableBody { size: f64 },
    /// Sensor-bearing cube welded to its parent.
    FixedSizedUnmovableSensor { size: f64 },
    /// Brain anchor. Never replaced by the mutator.
    FixedUnchangeableBrain { size: f64 },
}

impl BodyPartKind {
    #[must_use]
    pub const fn is_sensor(&self) -> bool {
        matches!(
            self,
            BodyPartKind::RandomSizedSensor
                | BodyPartKind::FixedSizedSensor { .. }
                | BodyPartKind::FixedSizedUnmovableSensor { .. }
        )
    }

    #[must_use]
    pub const fn joint_type(&self) -> JointType {
        match self {
            BodyPartKind::FixedSizedUnmovableBody { .. }
            | BodyPartKind::FixedSizedUnmovableSensor { .. }
            | BodyPartKind::FixedUnchangeableBrain { .. } => JointType::Fixed,
            _ => JointType::Revolute,
        }
    }

    #[must_use]
    pub const fn unchangeable(&self) -> bool {
        matches!(self, BodyPartKind::FixedUnchangeableBrain { .. })
    }

    #[must_use]
    pub const fn is_brain(&self) -> bool {
        matches!(self, BodyPartKind::FixedUnchangeableBrain { .. })
    }

    /// Edge length for fixed-size kinds, `None` for sampled kinds.
    #[must_use]
    pub const fn fixed_size(&self) -> Option<f64> {
        match *self {
            BodyPartKind::FixedSizedBody { size }
            | BodyPartKind::FixedSizedSensor { size }
            | BodyPartKind::FixedSizedUnmovableBody { size }
            | BodyPartKind::FixedSizedUnmovableSensor { size }
            | BodyPartKind::FixedUnchangeableBrain { size } => Some(size),
            BodyPartKind::RandomSizedBody | BodyPartKind::RandomSizedSensor => None,
        }
    }

    /// True when both values are the same variant, whatever their size.
    #[must_use]
    pub fn same_kind(&self, other: &BodyPartKind) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            BodyPartKind::RandomSizedBody => "RandomSizedBody",
            BodyPartKind::RandomSizedSensor => "RandomSizedSensor",
            BodyPartKind::FixedSizedBody { .. } => "FixedSizedBody",
            BodyPartKind::FixedSizedSensor { .. } => "FixedSizedSensor",
            BodyPartKind::FixedSizedUnmovableBody { .. } => "FixedSizedUnmovableBody",
            BodyPartKind::FixedSizedUnmovableSensor { .. } => "FixedSizedUnmovableSensor",
            BodyPartKind::FixedUnchangeableBrain { .. } => "FixedUnchangeableBrain",
        }
    }
}

/// How a chain of identical parts grows before the plan branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuildSpecification {
    pub direction_to_build: CubeElement,
    pub repetitions: u32,
    pub axis: Axis,
}

impl BuildSpecification {
    #[must_use]
    pub const fn new(direction_to_build: CubeElement, repetitions: u32, axis: Axis) -> Self {
        Self {
            direction_to_build,
            repetitions,
            axis,
        }
    }
}

/// A node of the recursive body plan.
///
/// Children are held behind `Arc` so an offspring plan shares every subtree
/// the mutator left untouched with its parent plan. Shared subtrees are
/// never written through; edits rebuild the path from the root.
///
/// A plan serializes as a flat [`StoredPlan`], so plan depth never reaches
/// the decoder's nesting limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "StoredPlan", try_from = "StoredPlan")]
pub struct BodyCons {
    /// Node identifier, unique within one tree.
    pub id: u64,
    pub part_kind: BodyPartKind,
    /// Only the first entry is read when building.
    pub build_specs: Vec<BuildSpecification>,
    pub children: BTreeMap<CubeElement, Arc<BodyCons>>,
}

/// Where a stored node hangs: the index of its parent in
/// [`StoredPlan::nodes`] and the face it grows from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub parent: usize,
    pub direction: CubeElement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredNode {
    pub id: u64,
    pub part_kind: BodyPartKind,
    pub build_specs: Vec<BuildSpecification>,
    /// Absent only on the root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attach: Option<Attachment>,
}

/// On-disk form of a [`BodyCons`] tree: nodes in pre-order, children in
/// face order, each pointing back at an earlier parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredPlan {
    pub nodes: Vec<StoredNode>,
}

impl From<&BodyCons> for StoredPlan {
    fn from(root: &BodyCons) -> Self {
        let mut nodes = Vec::new();
        let mut stack: Vec<(&BodyCons, Option<Attachment>)> = vec![(root, None)];
        while let Some((node, attach)) = stack.pop() {
            let index = nodes.len();
            nodes.push(StoredNode {
                id: node.id,
                part_kind: node.part_kind,
                build_specs: node.build_specs.clone(),
                attach,
            });
            for (&direction, child) in node.children.iter().rev() {
                stack.push((
                    child.as_ref(),
                    Some(Attachment {
                        parent: index,
                        direction,
                    }),
                ));
            }
        }
        Self { nodes }
    }
}

impl From<BodyCons> for StoredPlan {
    fn from(root: BodyCons) -> Self {
        Self::from(&root)
    }
}

impl TryFrom<StoredPlan> for BodyCons {
    type Error = anyhow::Error;

    fn try_from(plan: StoredPlan) -> anyhow::Result<Self> {
        anyhow::ensure!(!plan.nodes.is_empty(), "Body plan has no nodes");
        let mut attachments = Vec::with_capacity(plan.nodes.len());
        let mut built = Vec::with_capacity(plan.nodes.len());
        for (index, stored) in plan.nodes.into_iter().enumerate() {
            match (index, stored.attach) {
                (0, Some(_)) => anyhow::bail!("Root node {} has a parent", stored.id),
                (0, None) => {}
                (_, None) => anyhow::bail!("Node {} at {index} has no parent", stored.id),
                (_, Some(attach)) => anyhow::ensure!(
                    attach.parent < index,
                    "Node {} at {index} points at later parent {}",
                    stored.id,
                    attach.parent
                ),
            }
            attachments.push(stored.attach);
            built.push(Some(BodyCons {
                id: stored.id,
                part_kind: stored.part_kind,
                build_specs: stored.build_specs,
                children: BTreeMap::new(),
            }));
        }

        // Later nodes first, so every subtree is complete before it moves.
        for index in (1..built.len()).rev() {
            let (Some(attach), Some(node)) = (attachments[index], built[index].take()) else {
                anyhow::bail!("Node at {index} was already attached");
            };
            let Some(parent) = built[attach.parent].as_mut() else {
                anyhow::bail!("Parent {} of node at {index} is missing", attach.parent);
            };
            anyhow::ensure!(
                !parent.children.contains_key(&attach.direction),
                "Node {} has two children on {:?}",
                parent.id,
                attach.direction
            );
            parent.children.insert(attach.direction, Arc::new(node));
        }
        built
            .into_iter()
            .next()
            .flatten()
            .ok_or_else(|| anyhow::anyhow!("Body plan lost its root"))
    }
}

impl BodyCons {
    /// A leaf node with a single build specification.
    #[must_use]
    pub fn new(id: u64, part_kind: BodyPartKind, spec: BuildSpecification) -> Self {
        Self {
            id,
            part_kind,
            build_specs: vec![spec],
            children: BTreeMap::new(),
        }
    }

    /// Attaches `child` under `direction`, replacing any previous child there.
    #[must_use]
    pub fn with_child(mut self, direction: CubeElement, child: BodyCons) -> Self {
        self.children.insert(direction, Arc::new(child));
        self
    }

    /// The specification the builder uses, if the list is not empty.
    #[must_use]
    pub fn active_spec(&self) -> Option<&BuildSpecification> {
        self.build_specs.first()
    }

    #[must_use]
    pub fn child(&self, direction: CubeElement) -> Option<&BodyCons> {
        self.children.get(&direction).map(Arc::as_ref)
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
