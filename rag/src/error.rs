//! Error types for the RAG crate.

use thiserror::Error;

/// Errors that can occur in vector-store and orchestrator operations.
///
/// Collaborator failures (embedding provider, generative model, text splitter,
/// database backend) are carried unmodified as `#[source]` causes; everything
/// else names the offending id or dimension so callers can act on it.
#[derive(Debug, Error)]
pub enum RagError {
    /// An embedding's length disagrees with the store's established dimension.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension provided.
        actual: usize,
    },

    /// Insertion targeted an id already present in the store.
    #[error("duplicate id: {0}")]
    DuplicateId(String),

    /// An operation referenced an id absent from the store.
    #[error("id not found: {0}")]
    NotFound(String),

    /// Contradictory or missing required parameters.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A caller-supplied generator returned the wrong number of outputs.
    #[error("shape mismatch: expected {expected} outputs, got {actual}")]
    ShapeMismatch {
        /// Expected output count.
        expected: usize,
        /// Actual output count produced.
        actual: usize,
    },

    /// Generation was requested with an empty message list.
    #[error("empty input: no messages to respond to")]
    EmptyInput,

    /// Augmented generation requires a non-empty last message.
    #[error("missing content: the last message is empty")]
    MissingContent,

    /// Embedding provider failed.
    #[error("embedding failed: {0}")]
    Embedding(#[source] anyhow::Error),

    /// Generative model failed.
    #[error("generation failed: {0}")]
    Generation(#[source] anyhow::Error),

    /// Text splitter failed.
    #[error("splitting failed: {0}")]
    Split(#[source] anyhow::Error),

    /// Database backend failed.
    #[error("database error: {0}")]
    Database(#[source] anyhow::Error),
}

/// Result type alias for RAG operations.
pub type Result<T, E = RagError> = core::result::Result<T, E>;
