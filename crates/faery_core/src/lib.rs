//! # FAERY Core
//!
//! Body-plan logic for FAERY, a genetic-algorithm loop that evolves robot
//! bodies together with their controllers.
//!
//! This crate contains:
//! - The part catalog and the lattice-checked body builder
//! - Brain wiring, weight reconciliation and weight mutation
//! - The body mutator and the offspring retry loop
//! - Seed body plans, configuration, metrics and structured logging
//!
//! ## Example
//!
//! ```
//! use faery_core::builder::BodyBuilder;
//! use faery_core::config::AppConfig;
//! use faery_core::seeds::figure_plan;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let config = AppConfig::default();
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let body = BodyBuilder::new(&config.build)
//!     .build_detached(&figure_plan(1.0), &mut rng)
//!     .unwrap();
//! assert_eq!(body.joints.len(), body.part_count() - 1);
//! ```

/// Brain wiring and weight-matrix logic
pub mod brain;
/// Lowering body plans into placed parts and joints
pub mod builder;
/// Per-kind sizing, placement and colour
pub mod catalog;
/// Configuration management for build, mutation and brain parameters
pub mod config;
/// Scene and neural collaborator interfaces
pub mod emitter;
pub mod error;
pub mod geometry;
/// Run counters and logging setup
pub mod metrics;
/// Structure-preserving body-plan mutation
pub mod mutator;
pub mod offspring;
/// Tree queries and node id allocation
pub mod plan;
pub mod seeds;

pub use error::{EmitterError, FaeryError, Result};
pub use faery_data::{
    Axis, BodyCons, BodyPartKind, BuildSpecification, CubeElement, Genome, JointType,
    NeuronWeightMatrix,
};
