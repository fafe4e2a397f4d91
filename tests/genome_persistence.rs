mod common;

use common::{app_config, scratch_dir};
use faery_core::config::CollisionPolicy;
use faery_core::seeds::{base_genome, figure_genome};
use faery_data::Genome;
use faery_io::{
    genome_from_hex_dna, is_valid_hex_dna, read_genome_file, to_hex_dna, IoError,
};
use faery_lib::run::{load_config, run_inspect, run_seed, SeedKind};

#[test]
fn test_hex_dna_keeps_brain_lookups() {
    let dir = scratch_dir("hex_brain");
    let config = app_config(CollisionPolicy::Strict);
    let written = run_seed(&config, SeedKind::Base, 0, &dir, 5).unwrap();
    let genome = read_genome_file(&written.genome).unwrap();

    let dna = to_hex_dna(&genome).unwrap();
    assert!(is_valid_hex_dna(&dna));
    let restored = genome_from_hex_dna(&dna).unwrap();
    assert_eq!(restored.id, genome.id);
    assert_eq!(restored.body, genome.body);

    let brain = restored.brain_weights.as_ref().unwrap();
    let original = genome.brain_weights.as_ref().unwrap();
    assert_eq!(brain.shape(), original.shape());
    for (a, b) in brain.weights.iter().zip(&original.weights) {
        assert!((a - b).abs() < 1e-12);
    }
    for (sensor, motor, weight) in brain.synapses() {
        assert_eq!(brain.get(sensor, motor), Some(weight));
    }
}

#[test]
fn test_seed_writes_three_documents() {
    let dir = scratch_dir("seed_figure");
    let config = app_config(CollisionPolicy::Strict);
    let written = run_seed(&config, SeedKind::Figure, 0, &dir, 11).unwrap();

    assert_eq!(written.id, 0);
    assert_eq!(written.genome, dir.join("genome_0.json"));
    let urdf = std::fs::read_to_string(&written.body).unwrap();
    let nndf = std::fs::read_to_string(&written.brain).unwrap();
    assert!(urdf.starts_with("<robot"));
    assert!(urdf.trim_end().ends_with("</robot>"));
    assert_eq!(urdf.matches("<link ").count(), 14);
    assert_eq!(urdf.matches("<joint ").count(), 13);
    assert_eq!(nndf.matches("type = \"sensor\"").count(), 9);
    assert_eq!(nndf.matches("type = \"motor\"").count(), 13);
    assert_eq!(nndf.matches("<synapse ").count(), 9 * 13);

    let genome = read_genome_file(&written.genome).unwrap();
    let brain = genome.brain_weights.unwrap();
    assert_eq!(brain.shape(), (9, 13));
}

#[test]
fn test_inspect_reports_figure() {
    let dir = scratch_dir("inspect_figure");
    let config = app_config(CollisionPolicy::Strict);
    let written = run_seed(&config, SeedKind::Figure, 0, &dir, 2).unwrap();
    let report = run_inspect(&config, &written.genome, 2).unwrap();

    assert_eq!(report.nodes, 10);
    assert_eq!(report.parts, 14);
    assert_eq!(report.joints, 13);
    assert_eq!(report.sensors, 9);
    assert!(report.skipped.is_empty());
    assert!(report.has_brain);
    assert_eq!(report.config_fingerprint, config.fingerprint());
}

#[test]
fn test_random_chain_seed_is_reproducible() {
    let config = app_config(CollisionPolicy::Lenient);
    let a = run_seed(&config, SeedKind::RandomChain, 6, &scratch_dir("chain_a"), 9).unwrap();
    let b = run_seed(&config, SeedKind::RandomChain, 6, &scratch_dir("chain_b"), 9).unwrap();
    let first: Genome = read_genome_file(&a.genome).unwrap();
    let second: Genome = read_genome_file(&b.genome).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        std::fs::read_to_string(&a.body).unwrap(),
        std::fs::read_to_string(&b.body).unwrap()
    );
}

#[test]
fn test_missing_genome_is_not_found() {
    let dir = scratch_dir("missing");
    let err = read_genome_file(dir.join("genome_404.json")).unwrap_err();
    assert!(matches!(err, IoError::NotFound(_)));
}

#[test]
fn test_missing_config_uses_defaults() {
    let dir = scratch_dir("no_config");
    let config = load_config(&dir.join("faery.toml")).unwrap();
    assert_eq!(config.fingerprint(), app_config(CollisionPolicy::Strict).fingerprint());
}

#[test]
fn test_config_file_is_read() {
    let dir = scratch_dir("config_file");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("faery.toml");
    std::fs::write(&path, "[build]\ncollision_policy = \"lenient\"\n").unwrap();
    let config = load_config(&path).unwrap();
    assert_eq!(config.build.collision_policy, CollisionPolicy::Lenient);
}

#[test]
fn test_json_roundtrip_of_seed_genomes() {
    for genome in [base_genome(1.0), figure_genome(0.5)] {
        let json = faery_io::to_json(&genome).unwrap();
        let back: Genome = faery_io::from_json(&json).unwrap();
        assert_eq!(back, genome);
    }
}
