use faery_core::config::{AppConfig, BuildConfig, CollisionPolicy};
use faery_data::{Axis, BodyCons, BodyPartKind, BuildSpecification, CubeElement};
use proptest::prelude::*;
use std::path::PathBuf;

#[allow(dead_code)]
pub const BODY: BodyPartKind = BodyPartKind::FixedSizedBody { size: 1.0 };
#[allow(dead_code)]
pub const SENSOR: BodyPartKind = BodyPartKind::FixedSizedSensor { size: 1.0 };

#[allow(dead_code)]
pub fn node(id: u64, kind: BodyPartKind, direction: CubeElement, repetitions: u32) -> BodyCons {
    BodyCons::new(
        id,
        kind,
        BuildSpecification::new(direction, repetitions, Axis::X),
    )
}

#[allow(dead_code)]
pub fn build_config(policy: CollisionPolicy) -> BuildConfig {
    BuildConfig {
        collision_policy: policy,
        ..Default::default()
    }
}

#[allow(dead_code)]
pub fn app_config(policy: CollisionPolicy) -> AppConfig {
    AppConfig {
        build: build_config(policy),
        ..Default::default()
    }
}

/// A fresh directory under the system temp dir, unique per test and process.
#[allow(dead_code)]
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("faery_{}_{}", name, std::process::id()));
    std::fs::remove_dir_all(&dir).ok();
    dir
}

/// Same shape, ids reassigned 0.. in pre-order.
#[allow(dead_code)]
pub fn renumber(plan: &BodyCons) -> BodyCons {
    fn walk(node: &BodyCons, next: &mut u64) -> BodyCons {
        let mut out = BodyCons::new(*next, node.part_kind, node.build_specs[0]);
        *next += 1;
        for (direction, child) in &node.children {
            out = out.with_child(*direction, walk(child, next));
        }
        out
    }
    walk(plan, &mut 0)
}

#[allow(dead_code)]
pub fn total_repetitions(plan: &BodyCons) -> usize {
    use faery_core::plan::BodyPlanLogic;
    plan.preorder()
        .iter()
        .map(|n| n.build_specs[0].repetitions as usize)
        .sum()
}

#[allow(dead_code)]
pub fn arb_kind() -> impl Strategy<Value = BodyPartKind> {
    prop_oneof![
        Just(BodyPartKind::RandomSizedBody),
        Just(BodyPartKind::RandomSizedSensor),
        (0.2f64..1.5).prop_map(|size| BodyPartKind::FixedSizedBody { size }),
        (0.2f64..1.5).prop_map(|size| BodyPartKind::FixedSizedSensor { size }),
        (0.2f64..1.5).prop_map(|size| BodyPartKind::FixedSizedUnmovableBody { size }),
        (0.2f64..1.5).prop_map(|size| BodyPartKind::FixedSizedUnmovableSensor { size }),
        (0.2f64..1.5).prop_map(|size| BodyPartKind::FixedUnchangeableBrain { size }),
    ]
}

prop_compose! {
    #[allow(dead_code)]
    pub fn arb_spec()(
        direction in prop::sample::select(CubeElement::FACES.to_vec()),
        repetitions in 1u32..4,
        axis in prop::sample::select(Axis::ALL.to_vec())
    ) -> BuildSpecification {
        BuildSpecification::new(direction, repetitions, axis)
    }
}

/// Arbitrary plan trees with unique pre-order ids.
#[allow(dead_code)]
pub fn arb_plan() -> impl Strategy<Value = BodyCons> {
    let leaf = (arb_kind(), arb_spec()).prop_map(|(kind, spec)| BodyCons::new(0, kind, spec));
    leaf.prop_recursive(4, 24, 3, |inner| {
        (
            arb_kind(),
            arb_spec(),
            prop::collection::btree_map(
                prop::sample::select(CubeElement::FACES.to_vec()),
                inner,
                0..3,
            ),
        )
            .prop_map(|(kind, spec, children)| {
                children
                    .into_iter()
                    .fold(BodyCons::new(0, kind, spec), |node, (direction, child)| {
                        node.with_child(direction, child)
                    })
            })
    })
    .prop_map(|plan| renumber(&plan))
}
