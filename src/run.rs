//! Orchestration behind the `faery` binary: seeding, mutating and
//! inspecting genomes on disk.

use anyhow::Context;
use faery_core::builder::BodyBuilder;
use faery_core::config::AppConfig;
use faery_core::metrics::Metrics;
use faery_core::offspring::{produce_offspring, Offspring};
use faery_core::plan::BodyPlanLogic;
use faery_core::seeds::{base_genome, figure_genome, random_chain_plan};
use faery_data::Genome;
use faery_io::{read_genome_file, write_json_file, NndfWriter, UrdfWriter};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Which starting plan `seed` mode writes.
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedKind {
    Base,
    Figure,
    RandomChain,
}

/// Paths written for one individual.
#[derive(Debug, Clone, Serialize)]
pub struct WrittenIndividual {
    pub id: u64,
    pub genome: PathBuf,
    pub body: PathBuf,
    pub brain: PathBuf,
    pub attempts: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct InspectReport {
    pub id: u64,
    pub nodes: usize,
    pub depth: usize,
    pub parts: usize,
    pub joints: usize,
    pub sensors: usize,
    pub skipped: Vec<u64>,
    pub has_brain: bool,
    pub config_fingerprint: String,
}

/// Reads `path` if it exists, otherwise falls back to defaults.
pub fn load_config(path: &Path) -> anyhow::Result<AppConfig> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "No config file, using defaults");
        return Ok(AppConfig::default());
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    AppConfig::from_toml(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn individual_paths(dir: &Path, id: u64) -> (PathBuf, PathBuf, PathBuf) {
    (
        dir.join(format!("genome_{id}.json")),
        dir.join(format!("body{id}.urdf")),
        dir.join(format!("brain{id}.nndf")),
    )
}

fn write_individual(
    mut individual: Offspring,
    dir: &Path,
    rng: &mut ChaCha8Rng,
) -> anyhow::Result<WrittenIndividual> {
    let id = individual.genome.id;
    let (genome_path, body_path, brain_path) = individual_paths(dir, id);
    let mut urdf = UrdfWriter::new();
    let mut nndf = NndfWriter::new();
    if let Err(err) = individual.emit(&mut urdf, &body_path, &mut nndf, &brain_path, rng) {
        // The body may already be on disk when the brain is rejected.
        if body_path.exists() {
            std::fs::remove_file(&body_path).ok();
        }
        return Err(err).with_context(|| format!("writing documents for individual {id}"));
    }
    write_json_file(&individual.genome, &genome_path)?;
    Ok(WrittenIndividual {
        id,
        genome: genome_path,
        body: body_path,
        brain: brain_path,
        attempts: individual.attempts,
    })
}

/// Writes a seed genome with its body and brain documents.
pub fn run_seed(
    config: &AppConfig,
    kind: SeedKind,
    chain_length: usize,
    output: &Path,
    seed: u64,
) -> anyhow::Result<WrittenIndividual> {
    std::fs::create_dir_all(output)?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let genome = match kind {
        SeedKind::Base => base_genome(config.build.fixed_part_size),
        SeedKind::Figure => figure_genome(config.build.fixed_part_size),
        SeedKind::RandomChain => Genome::new(0, random_chain_plan(chain_length, &mut rng)),
    };
    let body = BodyBuilder::new(&config.build).build_detached(&genome.body, &mut rng)?;
    tracing::info!(?kind, parts = body.part_count(), "Seed genome built");
    write_individual(
        Offspring {
            genome,
            body,
            attempts: 1,
        },
        output,
        &mut rng,
    )
}

/// Produces `children` offspring of the genome at `parent_path` in parallel.
///
/// Child `i` gets id `parent.id + 1 + i` and its own RNG seeded from
/// `seed + i`, so results do not depend on thread scheduling.
pub fn run_mutate(
    config: &AppConfig,
    parent_path: &Path,
    output: &Path,
    children: usize,
    seed: u64,
) -> anyhow::Result<Vec<WrittenIndividual>> {
    let parent = read_genome_file(parent_path)
        .with_context(|| format!("loading parent {}", parent_path.display()))?;
    std::fs::create_dir_all(output)?;
    let metrics = Metrics::new();

    let written = (0..children as u64)
        .into_par_iter()
        .map(|i| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(i));
            let child = produce_offspring(&parent, parent.id + 1 + i, config, &mut rng, &metrics)?;
            write_individual(child, output, &mut rng)
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    metrics.log_summary();
    Ok(written)
}

pub fn run_inspect(config: &AppConfig, path: &Path, seed: u64) -> anyhow::Result<InspectReport> {
    let genome = read_genome_file(path)?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let body = BodyBuilder::new(&config.build).build_detached(&genome.body, &mut rng)?;
    Ok(InspectReport {
        id: genome.id,
        nodes: genome.body.node_count(),
        depth: genome.body.depth(),
        parts: body.part_count(),
        joints: body.joints.len(),
        sensors: body.sensor_parts.len(),
        skipped: body.skipped,
        has_brain: genome.brain_weights.is_some(),
        config_fingerprint: config.fingerprint(),
    })
}
