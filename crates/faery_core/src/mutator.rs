//! Structure-preserving mutation of body plans.
//!
//! A mutation never writes through the parent tree. The node that changes
//! and each of its ancestors are cloned; every other subtree stays shared
//! with the parent through its `Arc`.

use crate::catalog::{mutable_catalog, random_kind};
use crate::config::{AppConfig, MutationConfig};
use crate::plan::NodeIdGenerator;
use faery_data::{Axis, BodyCons, BodyPartKind, BuildSpecification, CubeElement};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationFamily {
    TypeChange,
    BuildSpec,
    Subtree,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecTweak {
    Direction,
    Repetitions,
    Axis,
}

const REPETITION_MODIFIERS: [i64; 4] = [-2, -1, 1, 2];

/// Categorical pick. Falls back to the last option when the weights cannot
/// form a distribution (all zero, say).
pub fn pick_weighted<T: Copy, R: Rng, const N: usize>(
    options: [(T, f64); N],
    rng: &mut R,
) -> T {
    match WeightedIndex::new(options.iter().map(|(_, w)| *w)) {
        Ok(dist) => options[dist.sample(rng)].0,
        Err(_) => options[N - 1].0,
    }
}

fn pick_uniform<T: Copy, R: Rng>(options: &[T], rng: &mut R) -> Option<T> {
    if options.is_empty() {
        None
    } else {
        Some(options[rng.gen_range(0..options.len())])
    }
}

/// A different kind from the mutable catalog, or `current` if none differs.
pub fn change_kind<R: Rng>(current: &BodyPartKind, size: f64, rng: &mut R) -> BodyPartKind {
    let candidates: Vec<BodyPartKind> = mutable_catalog(size)
        .into_iter()
        .filter(|k| !k.same_kind(current))
        .collect();
    pick_uniform(&candidates, rng).unwrap_or(*current)
}

/// Applies one tweak. The result always differs from `spec`.
pub fn tweak_spec<R: Rng>(
    spec: &BuildSpecification,
    tweak: SpecTweak,
    rng: &mut R,
) -> BuildSpecification {
    let mut out = *spec;
    match tweak {
        SpecTweak::Direction => {
            let others: Vec<CubeElement> = CubeElement::FACES
                .into_iter()
                .filter(|d| *d != spec.direction_to_build)
                .collect();
            if let Some(direction) = pick_uniform(&others, rng) {
                out.direction_to_build = direction;
            }
        }
        SpecTweak::Repetitions => {
            let current = i64::from(spec.repetitions);
            let valid: Vec<u32> = REPETITION_MODIFIERS
                .iter()
                .filter_map(|m| u32::try_from(current + m).ok())
                .filter(|r| *r >= 1)
                .collect();
            if let Some(repetitions) = pick_uniform(&valid, rng) {
                out.repetitions = repetitions;
            }
        }
        SpecTweak::Axis => {
            let others: Vec<Axis> = Axis::ALL
                .into_iter()
                .filter(|a| *a != spec.axis)
                .collect();
            if let Some(axis) = pick_uniform(&others, rng) {
                out.axis = axis;
            }
        }
    }
    out
}

pub struct BodyMutator<'c> {
    config: &'c MutationConfig,
    part_size: f64,
}

impl<'c> BodyMutator<'c> {
    /// `part_size` is the edge length of every kind the mutator creates.
    #[must_use]
    pub fn new(config: &'c MutationConfig, part_size: f64) -> Self {
        Self { config, part_size }
    }

    #[must_use]
    pub fn from_app_config(config: &'c AppConfig) -> Self {
        Self::new(&config.mutation, config.build.fixed_part_size)
    }

    fn pick_family<R: Rng>(&self, node: &BodyCons, rng: &mut R) -> MutationFamily {
        let w = self.config.family_weights;
        let type_weight = if node.part_kind.unchangeable() {
            0.0
        } else {
            w.type_change
        };
        pick_weighted(
            [
                (MutationFamily::TypeChange, type_weight),
                (MutationFamily::BuildSpec, w.build_spec),
                (MutationFamily::Subtree, w.subtree),
            ],
            rng,
        )
    }

    fn pick_tweak<R: Rng>(&self, rng: &mut R) -> SpecTweak {
        let w = self.config.build_spec_weights;
        pick_weighted(
            [
                (SpecTweak::Direction, w.direction),
                (SpecTweak::Repetitions, w.repetitions),
                (SpecTweak::Axis, w.axis),
            ],
            rng,
        )
    }

    /// A fresh single-node subtree.
    pub fn graft<R: Rng>(&self, ids: &mut NodeIdGenerator, rng: &mut R) -> BodyCons {
        let direction = CubeElement::FACES[rng.gen_range(0..CubeElement::FACES.len())];
        let repetitions = rng.gen_range(1..=self.config.max_graft_repetitions.max(1));
        let axis = Axis::ALL[rng.gen_range(0..Axis::ALL.len())];
        BodyCons::new(
            ids.next_id(),
            random_kind(self.part_size, rng),
            BuildSpecification::new(direction, repetitions, axis),
        )
    }

    /// Returns a mutated copy of `plan`. `plan` itself is left untouched.
    ///
    /// Starting at the root, a family is drawn for the current node. A
    /// subtree draw picks a face: an empty face gets a graft, an occupied
    /// one moves the walk down to that child and draws again.
    pub fn mutate<R: Rng>(
        &self,
        plan: &BodyCons,
        ids: &mut NodeIdGenerator,
        rng: &mut R,
    ) -> BodyCons {
        let mut ancestors: Vec<(&BodyCons, CubeElement)> = Vec::new();
        let mut current = plan;

        let edited = loop {
            let family = self.pick_family(current, rng);
            tracing::debug!(node_id = current.id, ?family, "Mutating node");
            match family {
                MutationFamily::TypeChange => {
                    let mut node = current.clone();
                    node.part_kind = change_kind(&current.part_kind, self.part_size, rng);
                    break node;
                }
                MutationFamily::BuildSpec => {
                    let mut node = current.clone();
                    let tweak = self.pick_tweak(rng);
                    if let Some(first) = node.build_specs.first_mut() {
                        *first = tweak_spec(first, tweak, rng);
                    }
                    break node;
                }
                MutationFamily::Subtree => {
                    let direction =
                        CubeElement::FACES[rng.gen_range(0..CubeElement::FACES.len())];
                    match current.children.get(&direction) {
                        Some(child) => {
                            ancestors.push((current, direction));
                            current = &**child;
                        }
                        None => {
                            let mut node = current.clone();
                            let grafted = self.graft(ids, rng);
                            node.children.insert(direction, Arc::new(grafted));
                            break node;
                        }
                    }
                }
            }
        };

        let mut rebuilt = edited;
        while let Some((ancestor, direction)) = ancestors.pop() {
            let mut node = ancestor.clone();
            node.children.insert(direction, Arc::new(rebuilt));
            rebuilt = node;
        }
        rebuilt
    }

    /// Applies `count` successive mutations.
    pub fn mutate_times<R: Rng>(
        &self,
        plan: &BodyCons,
        count: usize,
        ids: &mut NodeIdGenerator,
        rng: &mut R,
    ) -> BodyCons {
        let mut out = self.mutate(plan, ids, rng);
        for _ in 1..count {
            out = self.mutate(&out, ids, rng);
        }
        out
    }
}
