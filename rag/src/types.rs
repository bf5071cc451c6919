//! Core data types shared by the vector stores and the orchestrator.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Key/value metadata attached to stored records.
///
/// Keys iterate in sorted order; values are arbitrary structured JSON. The
/// stores treat metadata as opaque — it is stored, replaced, and returned
/// whole, never merged or interpreted.
pub type Metadata = BTreeMap<String, serde_json::Value>;

/// Post-score filter applied to records during `query` and `delete`.
pub type Predicate = Arc<dyn Fn(&Record) -> bool + Send + Sync>;

/// The unit of storage in a vector store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Unique identifier within the store, immutable once assigned.
    pub id: String,
    /// Text content. Absent only when the record was inserted with a
    /// precomputed embedding and no text.
    pub document: Option<String>,
    /// Embedding vector; its length equals the store's established dimension.
    pub embedding: Vec<f32>,
    /// Caller-defined metadata, opaque to the store.
    pub metadata: Option<Metadata>,
}

/// A record together with its similarity score for one query.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// The matching record.
    pub record: Record,
    /// Cosine similarity in `[-1, 1]`; `1.0` means identical direction.
    pub similarity: f32,
}
