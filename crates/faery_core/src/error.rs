//! Error types for body-plan building and mutation.

use faery_data::LatticeCell;
use thiserror::Error;

/// Failure raised by a scene or neural emitter.
#[derive(Error, Debug)]
pub enum EmitterError {
    /// Underlying writer failed
    #[error("Emitter I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An emit call arrived outside a begin/end pair
    #[error("No document is open")]
    NoOpenDocument,

    /// `begin_*` was called twice without `end_*`
    #[error("Document already open: {0}")]
    DocumentAlreadyOpen(String),

    /// Emitter refused the call
    #[error("Emitter rejected call: {0}")]
    Rejected(String),
}

/// Main error type for faery_core operations.
#[derive(Error, Debug)]
pub enum FaeryError {
    /// Two parts resolved to the same abstract lattice cell
    #[error("Structural collision: node {node_id} lands on occupied cell {cell:?}")]
    StructuralCollision { node_id: u64, cell: LatticeCell },

    /// The plan breaks a structural rule (empty specs, zero repetitions, duplicate ids)
    #[error("Invalid body plan: {0}")]
    InvalidShape(String),

    /// A scene or neural emitter failed; passed through unchanged
    #[error("Collaborator failure: {0}")]
    Collaborator(#[from] EmitterError),

    /// Every mutation attempt produced a colliding plan
    #[error("No valid offspring after {attempts} attempts")]
    RetriesExhausted { attempts: usize },
}

/// Result type alias for faery_core operations.
pub type Result<T> = std::result::Result<T, FaeryError>;

impl FaeryError {
    /// Creates a new invalid shape error.
    #[must_use]
    pub fn invalid_shape<S: Into<String>>(msg: S) -> Self {
        Self::InvalidShape(msg.into())
    }

    /// True for errors a caller should answer by re-mutating from the parent.
    #[must_use]
    pub fn is_collision(&self) -> bool {
        matches!(self, Self::StructuralCollision { .. })
    }
}
