//! Starting body plans for a run.

use faery_data::{Axis, BodyCons, BodyPartKind, BuildSpecification, CubeElement, Genome};
use rand::Rng;

/// One fixed-size body part growing FRONT about Y.
#[must_use]
pub fn base_plan(size: f64) -> BodyCons {
    BodyCons::new(
        0,
        BodyPartKind::FixedSizedBody { size },
        BuildSpecification::new(CubeElement::Front, 1, Axis::Y),
    )
}

#[must_use]
pub fn base_genome(size: f64) -> Genome {
    Genome::new(0, base_plan(size))
}

/// Hand-authored figure: brain head, a spine of three segments, a pair of
/// two-part limbs at the shoulders and at the hips, and a sensor tail.
#[must_use]
pub fn figure_plan(size: f64) -> BodyCons {
    let brain = BodyPartKind::FixedUnchangeableBrain { size };
    let segment = BodyPartKind::FixedSizedBody { size };
    let joint = BodyPartKind::FixedSizedUnmovableBody { size };
    let limb = BodyPartKind::FixedSizedSensor { size };
    let tail = BodyPartKind::FixedSizedUnmovableSensor { size };

    let grow = |id: u64, kind: BodyPartKind, direction: CubeElement, repetitions: u32| {
        BodyCons::new(
            id,
            kind,
            BuildSpecification::new(direction, repetitions, Axis::X),
        )
    };

    let hips = grow(6, joint, CubeElement::Front, 1)
        .with_child(CubeElement::Front, grow(7, tail, CubeElement::Front, 1))
        .with_child(CubeElement::Right, grow(8, limb, CubeElement::Right, 2))
        .with_child(CubeElement::Left, grow(9, limb, CubeElement::Left, 2));
    let waist = grow(5, segment, CubeElement::Front, 1).with_child(CubeElement::Front, hips);
    let shoulders = grow(2, joint, CubeElement::Front, 1)
        .with_child(CubeElement::Right, grow(3, limb, CubeElement::Right, 2))
        .with_child(CubeElement::Left, grow(4, limb, CubeElement::Left, 2))
        .with_child(CubeElement::Front, waist);
    let neck = grow(1, segment, CubeElement::Front, 1).with_child(CubeElement::Front, shoulders);

    grow(0, brain, CubeElement::Front, 1).with_child(CubeElement::Front, neck)
}

#[must_use]
pub fn figure_genome(size: f64) -> Genome {
    Genome::new(0, figure_plan(size))
}

/// A straight FRONT chain of `length` nodes alternating random-sized body
/// and sensor parts, each repeated one to three times.
#[must_use]
pub fn random_chain_plan<R: Rng>(length: usize, rng: &mut R) -> BodyCons {
    let length = length.max(1);
    let mut nodes: Vec<BodyCons> = (0..length)
        .map(|i| {
            let kind = if i % 2 == 0 {
                BodyPartKind::RandomSizedBody
            } else {
                BodyPartKind::RandomSizedSensor
            };
            let axis = Axis::ALL[rng.gen_range(0..Axis::ALL.len())];
            BodyCons::new(
                i as u64,
                kind,
                BuildSpecification::new(CubeElement::Front, rng.gen_range(1..=3), axis),
            )
        })
        .collect();

    let mut tail = nodes.pop();
    while let Some(mut node) = nodes.pop() {
        if let Some(child) = tail.take() {
            node = node.with_child(CubeElement::Front, child);
        }
        tail = Some(node);
    }
    // `length >= 1`, so a node always remains.
    tail.unwrap_or_else(|| base_plan(1.0))
}
