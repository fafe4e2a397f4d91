//! # FAERY IO
//!
//! Persistence and document writers for FAERY.
//!
//! This crate provides:
//! - Structured error handling with custom error types
//! - JSON and HexDNA serialization of genomes
//! - A timestamped archive of a run's best genome
//! - URDF body and NNDF brain writers behind the core's emitter traits

/// Best-genome archive with fitness history
pub mod archive;
/// Buffered document handling shared by the writers
pub mod document;
/// Error types and result aliases for I/O operations
pub mod error;
/// NNDF brain writer
pub mod nndf;
/// Validated serialization helpers for JSON and HexDNA formats
pub mod serialization;
/// URDF body writer
pub mod urdf;

pub use archive::{archive_file_name, load_archive, save_best, ArchivedRun};
pub use error::{IoError, Result};
pub use nndf::NndfWriter;
pub use serialization::{
    from_hex_dna, from_json, genome_from_hex_dna, is_valid_hex_dna, read_genome_file,
    read_json_file, to_hex_dna, to_json, to_json_pretty, write_json_file,
};
pub use urdf::UrdfWriter;
