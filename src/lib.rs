//! # FAERY
//!
//! Evolves robot bodies and their controllers. The workspace crates hold the
//! pieces; this crate wires them into the `faery` command line tool.

pub mod run;

pub use faery_core::{config::AppConfig, BodyCons, FaeryError, Genome};
pub use run::{load_config, run_inspect, run_mutate, run_seed, InspectReport, SeedKind};
