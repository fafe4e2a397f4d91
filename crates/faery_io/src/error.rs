//! Errors raised while storing and loading genomes.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IoError {
    /// Encoding failed, or the text is not a valid document for the type
    /// (bad syntax, missing fields, a brain whose shape does not match).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    /// Input rejected before or after decoding: blank text, bad hex, a
    /// digest that does not match.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("{context}: {source}")]
    Context {
        context: String,
        source: Box<IoError>,
    },
}

pub type Result<T> = std::result::Result<T, IoError>;

impl IoError {
    #[must_use]
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::Validation(msg.into())
    }

    #[must_use]
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound(resource.into())
    }

    #[must_use]
    pub fn with_context<S: Into<String>>(self, context: S) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, past any context wrappers.
    #[must_use]
    pub fn root(&self) -> &IoError {
        let mut current = self;
        while let IoError::Context { source, .. } = current {
            current = source;
        }
        current
    }
}
