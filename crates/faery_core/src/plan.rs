//! Structural queries over [`BodyCons`] trees.
//!
//! Every walk uses an explicit stack so deep chains of children never
//! exhaust the call stack.

use crate::error::{FaeryError, Result};
use faery_data::{BodyCons, CubeElement};
use std::collections::HashSet;

pub trait BodyPlanLogic {
    /// Nodes in pre-order, children in direction order.
    fn preorder(&self) -> Vec<&BodyCons>;
    fn node_count(&self) -> usize;
    fn max_id(&self) -> u64;
    /// Depth of the node tree; a lone root has depth 1.
    fn depth(&self) -> usize;
    fn find(&self, id: u64) -> Option<&BodyCons>;
    /// Checks every rule the builder relies on.
    fn validate(&self) -> Result<()>;
}

impl BodyPlanLogic for BodyCons {
    fn preorder(&self) -> Vec<&BodyCons> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children.values().rev().map(|c| &**c));
        }
        out
    }

    fn node_count(&self) -> usize {
        self.preorder().len()
    }

    fn max_id(&self) -> u64 {
        self.preorder().iter().map(|n| n.id).max().unwrap_or(self.id)
    }

    fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1usize)];
        while let Some((node, level)) = stack.pop() {
            deepest = deepest.max(level);
            for child in node.children.values() {
                stack.push((&**child, level + 1));
            }
        }
        deepest
    }

    fn find(&self, id: u64) -> Option<&BodyCons> {
        self.preorder().into_iter().find(|n| n.id == id)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for node in self.preorder() {
            let spec = node.active_spec().ok_or_else(|| {
                FaeryError::invalid_shape(format!("node {} has no build specification", node.id))
            })?;
            if spec.repetitions == 0 {
                return Err(FaeryError::invalid_shape(format!(
                    "node {} has zero repetitions",
                    node.id
                )));
            }
            if spec.direction_to_build == CubeElement::Center {
                return Err(FaeryError::invalid_shape(format!(
                    "node {} builds toward CENTER",
                    node.id
                )));
            }
            if node.children.contains_key(&CubeElement::Center) {
                return Err(FaeryError::invalid_shape(format!(
                    "node {} has a child at CENTER",
                    node.id
                )));
            }
            if !seen.insert(node.id) {
                return Err(FaeryError::invalid_shape(format!(
                    "duplicate node id {}",
                    node.id
                )));
            }
        }
        Ok(())
    }
}

/// Hands out fresh node ids, strictly increasing.
#[derive(Debug, Clone)]
pub struct NodeIdGenerator {
    next: u64,
}

impl NodeIdGenerator {
    #[must_use]
    pub fn starting_at(next: u64) -> Self {
        Self { next }
    }

    /// A generator whose first id is above every id in `tree`.
    #[must_use]
    pub fn after(tree: &BodyCons) -> Self {
        Self::starting_at(tree.max_id() + 1)
    }

    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// The id the next call will return.
    #[must_use]
    pub fn peek(&self) -> u64 {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faery_data::{Axis, BodyPartKind, BuildSpecification};

    const KIND: BodyPartKind = BodyPartKind::FixedSizedBody { size: 1.0 };

    fn node(id: u64) -> BodyCons {
        BodyCons::new(id, KIND, BuildSpecification::new(CubeElement::Front, 1, Axis::X))
    }

    fn sample() -> BodyCons {
        node(0)
            .with_child(CubeElement::Left, node(2).with_child(CubeElement::Top, node(7)))
            .with_child(CubeElement::Front, node(1))
    }

    #[test]
    fn test_preorder_follows_direction_order() {
        let tree = sample();
        let ids: Vec<u64> = tree.preorder().iter().map(|n| n.id).collect();
        // FRONT sorts before LEFT.
        assert_eq!(ids, vec![0, 1, 2, 7]);
    }

    #[test]
    fn test_queries() {
        let tree = sample();
        assert_eq!(tree.node_count(), 4);
        assert_eq!(tree.max_id(), 7);
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.find(2).map(|n| n.children.len()), Some(1));
        assert!(tree.find(5).is_none());
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let tree = node(0).with_child(CubeElement::Right, node(0));
        assert!(matches!(tree.validate(), Err(FaeryError::InvalidShape(_))));
    }

    #[test]
    fn test_validate_rejects_zero_repetitions_and_empty_specs() {
        let mut tree = node(0);
        tree.build_specs[0].repetitions = 0;
        assert!(tree.validate().is_err());
        tree.build_specs.clear();
        assert!(tree.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_center() {
        let tree = node(0).with_child(CubeElement::Center, node(1));
        assert!(tree.validate().is_err());
    }

    #[test]
    fn test_id_generator_after_tree() {
        let mut ids = NodeIdGenerator::after(&sample());
        assert_eq!(ids.next_id(), 8);
        assert_eq!(ids.next_id(), 9);
        assert_eq!(ids.peek(), 10);
    }
}
