mod common;

use common::{arb_plan, arb_spec, build_config, total_repetitions};
use faery_core::builder::BodyBuilder;
use faery_core::config::{CollisionPolicy, MutationConfig};
use faery_core::mutator::{tweak_spec, BodyMutator, SpecTweak};
use faery_core::plan::{BodyPlanLogic, NodeIdGenerator};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn test_mutation_leaves_parent_intact(plan in arb_plan(), seed in any::<u64>()) {
        let config = MutationConfig::default();
        let mutator = BodyMutator::new(&config, 1.0);
        let before = plan.clone();
        let mut ids = NodeIdGenerator::after(&plan);
        let start = ids.peek();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let child = mutator.mutate(&plan, &mut ids, &mut rng);

        prop_assert_eq!(&plan, &before);
        prop_assert_ne!(&child, &plan);
        prop_assert!(child.validate().is_ok());

        let grown = child.node_count() - plan.node_count();
        prop_assert!(grown <= 1);
        for node in child.preorder() {
            if plan.find(node.id).is_none() {
                prop_assert!(node.id >= start);
            }
        }
    }

    #[test]
    fn test_repeated_mutation_keeps_ids_unique(plan in arb_plan(), seed in any::<u64>(), rounds in 1usize..8) {
        let config = MutationConfig::default();
        let mutator = BodyMutator::new(&config, 1.0);
        let mut ids = NodeIdGenerator::after(&plan);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let child = mutator.mutate_times(&plan, rounds, &mut ids, &mut rng);
        prop_assert!(child.validate().is_ok());
        prop_assert!(child.node_count() <= plan.node_count() + rounds);
    }

    #[test]
    fn test_every_tweak_changes_spec(spec in arb_spec(), seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        for tweak in [SpecTweak::Direction, SpecTweak::Repetitions, SpecTweak::Axis] {
            let out = tweak_spec(&spec, tweak, &mut rng);
            prop_assert_ne!(out, spec);
            prop_assert!(out.repetitions >= 1);
        }
    }

    #[test]
    fn test_lenient_build_accounts_for_every_repetition(plan in arb_plan(), seed in any::<u64>()) {
        let config = build_config(CollisionPolicy::Lenient);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let body = BodyBuilder::new(&config).build_detached(&plan, &mut rng).unwrap();

        prop_assert_eq!(body.part_count() + body.skipped.len(), total_repetitions(&plan));
        prop_assert_eq!(body.lattice.len(), body.part_count());
        prop_assert_eq!(body.joints.len(), body.part_count() - 1);
        for &sensor in &body.sensor_parts {
            prop_assert!(body.parts[sensor].kind.is_sensor());
        }
    }

    #[test]
    fn test_strict_build_agrees_with_lenient(plan in arb_plan(), seed in any::<u64>()) {
        let strict = build_config(CollisionPolicy::Strict);
        let lenient = build_config(CollisionPolicy::Lenient);
        let strict_result =
            BodyBuilder::new(&strict).build_detached(&plan, &mut ChaCha8Rng::seed_from_u64(seed));
        let lenient_body = BodyBuilder::new(&lenient)
            .build_detached(&plan, &mut ChaCha8Rng::seed_from_u64(seed))
            .unwrap();

        match strict_result {
            Ok(body) => {
                prop_assert!(lenient_body.skipped.is_empty());
                prop_assert_eq!(body, lenient_body);
            }
            Err(err) => {
                prop_assert!(err.is_collision());
                prop_assert!(!lenient_body.skipped.is_empty());
            }
        }
    }

    #[test]
    fn test_build_is_deterministic(plan in arb_plan(), seed in any::<u64>()) {
        let config = build_config(CollisionPolicy::Lenient);
        let builder = BodyBuilder::new(&config);
        let a = builder.build_detached(&plan, &mut ChaCha8Rng::seed_from_u64(seed)).unwrap();
        let b = builder.build_detached(&plan, &mut ChaCha8Rng::seed_from_u64(seed)).unwrap();
        prop_assert_eq!(a, b);
    }
}
