mod common;

use common::{app_config, scratch_dir};
use faery_core::config::CollisionPolicy;
use faery_io::read_genome_file;
use faery_lib::run::{run_inspect, run_mutate, run_seed, SeedKind};

#[test]
fn test_children_get_sequential_ids() {
    let dir = scratch_dir("children_ids");
    let config = app_config(CollisionPolicy::Strict);
    let parent = run_seed(&config, SeedKind::Figure, 0, &dir, 1).unwrap();
    let children = run_mutate(&config, &parent.genome, &dir, 4, 100).unwrap();

    let ids: Vec<u64> = children.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
    for child in &children {
        assert!(child.body.exists());
        assert!(child.brain.exists());
        assert!(child.attempts >= 1);
        let genome = read_genome_file(&child.genome).unwrap();
        assert_eq!(genome.id, child.id);

        let report = run_inspect(&config, &child.genome, 0).unwrap();
        let brain = genome.brain_weights.unwrap();
        assert_eq!(brain.shape(), (report.sensors, report.joints));
    }
}

#[test]
fn test_mutate_is_reproducible() {
    let config = app_config(CollisionPolicy::Strict);
    let seed_dir = scratch_dir("repro_seed");
    let parent = run_seed(&config, SeedKind::Figure, 0, &seed_dir, 3).unwrap();

    let first_dir = scratch_dir("repro_a");
    let second_dir = scratch_dir("repro_b");
    let first = run_mutate(&config, &parent.genome, &first_dir, 3, 42).unwrap();
    let second = run_mutate(&config, &parent.genome, &second_dir, 3, 42).unwrap();

    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.attempts, b.attempts);
        for (x, y) in [(&a.genome, &b.genome), (&a.body, &b.body), (&a.brain, &b.brain)] {
            assert_eq!(
                std::fs::read_to_string(x).unwrap(),
                std::fs::read_to_string(y).unwrap()
            );
        }
    }
}

#[test]
fn test_missing_parent_is_an_error() {
    let dir = scratch_dir("no_parent");
    let config = app_config(CollisionPolicy::Strict);
    let result = run_mutate(&config, &dir.join("genome_0.json"), &dir, 2, 0);
    assert!(result.is_err());
}

#[test]
fn test_lenient_children_of_colliding_parent() {
    use faery_data::{Axis, BodyCons, BodyPartKind, BuildSpecification, CubeElement, Genome};

    let dir = scratch_dir("lenient_parent");
    std::fs::create_dir_all(&dir).unwrap();
    let kind = BodyPartKind::FixedSizedBody { size: 1.0 };
    let spec = |d| BuildSpecification::new(d, 1, Axis::X);
    let plan = BodyCons::new(0, kind, spec(CubeElement::Front)).with_child(
        CubeElement::Left,
        BodyCons::new(1, kind, spec(CubeElement::Left))
            .with_child(CubeElement::Right, BodyCons::new(2, kind, spec(CubeElement::Right))),
    );
    let parent_path = dir.join("genome_0.json");
    faery_io::write_json_file(&Genome::new(0, plan), &parent_path).unwrap();

    let strict = app_config(CollisionPolicy::Strict);
    assert!(run_mutate(&strict, &parent_path, &dir, 1, 5).is_err());

    let lenient = app_config(CollisionPolicy::Lenient);
    let children = run_mutate(&lenient, &parent_path, &dir, 2, 5).unwrap();
    assert!(children.iter().all(|c| c.attempts == 1));
}
