//! Archive of a run's best genome.
//!
//! Each archive is one pretty-printed JSON file named after the moment it
//! was written, holding the genome, the best fitness of every generation
//! and a SHA-256 digest of the genome used to detect edits on load.

use crate::error::{IoError, Result};
use crate::serialization::{read_json_file, to_json, write_json_file};
use chrono::{DateTime, Utc};
use faery_data::Genome;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchivedRun {
    pub saved_at: DateTime<Utc>,
    pub genome: Genome,
    /// Best fitness per generation, oldest first.
    pub fitness_history: Vec<f64>,
    pub genome_sha256: String,
}

#[must_use]
pub fn archive_file_name(at: DateTime<Utc>) -> String {
    format!("best_genome_{}.json", at.format("%Y%m%d_%H%M%S"))
}

fn digest(genome: &Genome) -> Result<String> {
    let json = to_json(genome)?;
    Ok(hex::encode(Sha256::digest(json.as_bytes())))
}

/// Writes `genome` and its history into `dir`; returns the file written.
pub fn save_best(dir: &Path, genome: &Genome, fitness_history: &[f64]) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .map_err(|e| IoError::FileSystem(e).with_context(format!("creating {dir:?}")))?;
    let saved_at = Utc::now();
    let run = ArchivedRun {
        saved_at,
        genome: genome.clone(),
        fitness_history: fitness_history.to_vec(),
        genome_sha256: digest(genome)?,
    };
    let path = dir.join(archive_file_name(saved_at));
    write_json_file(&run, &path)?;
    tracing::info!(
        genome = genome.id,
        generations = fitness_history.len(),
        path = %path.display(),
        "Archived best genome"
    );
    Ok(path)
}

pub fn load_archive(path: &Path) -> Result<ArchivedRun> {
    let run: ArchivedRun = read_json_file(path)?;
    let actual = digest(&run.genome)?;
    if actual != run.genome_sha256 {
        return Err(IoError::validation(format!(
            "genome digest mismatch in {path:?}"
        )));
    }
    Ok(run)
}
