//! Core data structures for the FAERY body-plan pipeline.

pub mod body;
pub mod direction;
pub mod genome;
pub mod geometry;
