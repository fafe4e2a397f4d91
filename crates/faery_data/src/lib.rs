//! # FAERY Data
//!
//! Plain data types shared by every FAERY crate: geometry values, cube
//! directions, the recursive body-plan tree and the genome that pairs a body
//! plan with its brain weights. Behaviour over these types lives in
//! `faery_core`.

pub mod data;

pub use data::body::{BodyCons, BodyPartKind, BuildSpecification, JointType};
pub use data::direction::{Axis, CubeElement};
pub use data::genome::{Genome, NeuronWeightMatrix};
pub use data::geometry::{Dimensions, LatticeCell, Position};
