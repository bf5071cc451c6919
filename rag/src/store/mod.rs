//! Vector store implementations.
//!
//! This module provides the [`VectorStore`] trait and two implementations
//! sharing one contract: [`MemoryVectorStore`], the in-memory reference, and
//! [`SqlVectorStore`], which persists records through a SQL backend with a
//! dedicated vector column and similarity index.

pub mod memory;
pub mod sql;

pub use memory::MemoryVectorStore;
pub use sql::{Compression, Database, IndexOptions, Row, SqlValue, SqlVectorStore};

use core::future::Future;

use crate::error::Result;
use crate::request::{AddRequest, DeleteRequest, QueryRequest, UpdateRequest};
use crate::types::QueryResult;

/// Persistent mapping from record id to (document, embedding, metadata) with
/// ranked similarity queries.
///
/// Implementations enforce two invariants: all records share one embedding
/// dimension, fixed when first established and enforced thereafter; and ids
/// are unique. Every operation is all-or-nothing — validation for the whole
/// batch completes before any mutation, so a failed call leaves the store
/// exactly as it was. Check-then-mutate sequences are serialized internally,
/// so concurrent callers cannot interleave between an existence check and the
/// mutation it guards.
pub trait VectorStore: Send + Sync {
    /// Prepares the store for use: warms up the embedding provider and, for
    /// persisted stores, creates the backing schema and index.
    fn load(&self) -> impl Future<Output = Result<()>> + Send;

    /// Releases the embedding provider and any backing connection.
    fn unload(&self) -> impl Future<Output = Result<()>> + Send;

    /// Inserts a batch of records, returning the assigned ids in input order.
    fn add(&self, request: AddRequest) -> impl Future<Output = Result<Vec<String>>> + Send;

    /// Updates existing records in place.
    fn update(&self, request: UpdateRequest) -> impl Future<Output = Result<()>> + Send;

    /// Removes records by id, by predicate, or by both.
    fn delete(&self, request: DeleteRequest) -> impl Future<Output = Result<()>> + Send;

    /// Answers similarity queries: one ranked result list per query, ordered
    /// by descending cosine similarity.
    fn query(&self, request: QueryRequest) -> impl Future<Output = Result<Vec<Vec<QueryResult>>>> + Send;
}

/// Rejects embeddings no store can rank: empty, non-finite, or all-zero
/// vectors make cosine similarity undefined.
pub(crate) fn check_embedding(embedding: &[f32]) -> Result<()> {
    use crate::error::RagError;

    if embedding.is_empty() {
        return Err(RagError::InvalidArgument("embedding is empty".into()));
    }
    if embedding.iter().any(|x| !x.is_finite()) {
        return Err(RagError::InvalidArgument(
            "embedding contains a non-finite value".into(),
        ));
    }
    if embedding.iter().all(|x| *x == 0.0) {
        return Err(RagError::InvalidArgument(
            "embedding is all zeros; cosine similarity is undefined".into(),
        ));
    }
    Ok(())
}

/// Validates a vector's length against an established dimension.
pub(crate) fn check_dimension(expected: Option<usize>, embedding: &[f32]) -> Result<()> {
    use crate::error::RagError;

    match expected {
        Some(expected) if embedding.len() != expected => Err(RagError::DimensionMismatch {
            expected,
            actual: embedding.len(),
        }),
        _ => Ok(()),
    }
}
