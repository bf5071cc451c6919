//! Batch request types for vector-store operations.
//!
//! Every operation takes a request value built with `with_*` methods. Batch
//! parameters are parallel arrays: position `i` of every present array
//! describes entry `i`. Cardinalities are validated up front as one
//! precondition pass, so a malformed request fails with a single
//! [`InvalidArgument`](crate::RagError::InvalidArgument) before any embedding
//! or storage work happens.

use core::fmt;

use crate::error::{RagError, Result};
use crate::types::{Metadata, Predicate, Record};

/// Request for [`VectorStore::add`](crate::VectorStore::add).
///
/// The batch length is the length of `documents` (or of `embeddings` when no
/// documents are given). Missing ids are generated; missing embeddings are
/// computed from the corresponding document by the store's embedding provider.
#[derive(Clone, Debug, Default)]
pub struct AddRequest {
    pub(crate) ids: Option<Vec<String>>,
    pub(crate) documents: Option<Vec<String>>,
    pub(crate) embeddings: Option<Vec<Vec<f32>>>,
    pub(crate) metadatas: Option<Vec<Metadata>>,
}

impl AddRequest {
    /// Creates a request that inserts the given documents.
    #[must_use]
    pub fn documents<I, S>(documents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::default().with_documents(documents)
    }

    /// Creates a request that inserts precomputed embeddings without text.
    #[must_use]
    pub fn embeddings(embeddings: Vec<Vec<f32>>) -> Self {
        Self::default().with_embeddings(embeddings)
    }

    /// Sets the documents to insert.
    #[must_use]
    pub fn with_documents<I, S>(mut self, documents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.documents = Some(documents.into_iter().map(Into::into).collect());
        self
    }

    /// Supplies explicit ids instead of generated ones.
    #[must_use]
    pub fn with_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    /// Supplies precomputed embeddings, skipping the embedding provider.
    #[must_use]
    pub fn with_embeddings(mut self, embeddings: Vec<Vec<f32>>) -> Self {
        self.embeddings = Some(embeddings);
        self
    }

    /// Attaches one metadata mapping per entry.
    #[must_use]
    pub fn with_metadatas(mut self, metadatas: Vec<Metadata>) -> Self {
        self.metadatas = Some(metadatas);
        self
    }

    /// Validates cardinalities and returns the batch length.
    pub(crate) fn batch_len(&self) -> Result<usize> {
        let len = match (&self.documents, &self.embeddings) {
            (Some(documents), _) => documents.len(),
            (None, Some(embeddings)) => embeddings.len(),
            (None, None) => {
                return Err(RagError::InvalidArgument(
                    "add requires documents or embeddings".into(),
                ));
            }
        };

        check_len("ids", self.ids.as_ref().map(Vec::len), len)?;
        check_len("embeddings", self.embeddings.as_ref().map(Vec::len), len)?;
        check_len("metadatas", self.metadatas.as_ref().map(Vec::len), len)?;
        Ok(len)
    }
}

/// Request for [`VectorStore::update`](crate::VectorStore::update).
///
/// Every id must already exist. Arrays left absent leave the corresponding
/// field of every record unchanged; a present `metadatas` array replaces each
/// record's metadata whole, never merging. A new document without an explicit
/// embedding is re-embedded; an explicit embedding always wins.
#[derive(Clone, Debug)]
pub struct UpdateRequest {
    pub(crate) ids: Vec<String>,
    pub(crate) documents: Option<Vec<String>>,
    pub(crate) embeddings: Option<Vec<Vec<f32>>>,
    pub(crate) metadatas: Option<Vec<Metadata>>,
}

impl UpdateRequest {
    /// Creates a request targeting the given record ids.
    #[must_use]
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
            documents: None,
            embeddings: None,
            metadatas: None,
        }
    }

    /// Replaces each record's document text.
    #[must_use]
    pub fn with_documents<I, S>(mut self, documents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.documents = Some(documents.into_iter().map(Into::into).collect());
        self
    }

    /// Replaces each record's embedding directly.
    #[must_use]
    pub fn with_embeddings(mut self, embeddings: Vec<Vec<f32>>) -> Self {
        self.embeddings = Some(embeddings);
        self
    }

    /// Replaces each record's metadata whole.
    #[must_use]
    pub fn with_metadatas(mut self, metadatas: Vec<Metadata>) -> Self {
        self.metadatas = Some(metadatas);
        self
    }

    /// Validates cardinalities and returns the batch length.
    pub(crate) fn batch_len(&self) -> Result<usize> {
        let len = self.ids.len();
        check_len("documents", self.documents.as_ref().map(Vec::len), len)?;
        check_len("embeddings", self.embeddings.as_ref().map(Vec::len), len)?;
        check_len("metadatas", self.metadatas.as_ref().map(Vec::len), len)?;
        Ok(len)
    }
}

/// Request for [`VectorStore::delete`](crate::VectorStore::delete).
///
/// With ids only, every id must exist and all are removed. With a predicate
/// only, every record is evaluated and matches are removed (zero matches is
/// success). With both, the predicate filters the id-restricted set. A
/// request with neither is rejected.
#[derive(Clone, Default)]
pub struct DeleteRequest {
    pub(crate) ids: Option<Vec<String>>,
    pub(crate) predicate: Option<Predicate>,
}

impl DeleteRequest {
    /// Creates a request removing the given ids.
    #[must_use]
    pub fn ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: Some(ids.into_iter().map(Into::into).collect()),
            predicate: None,
        }
    }

    /// Creates a request removing every record the predicate matches.
    #[must_use]
    pub fn matching<F>(predicate: F) -> Self
    where
        F: Fn(&Record) -> bool + Send + Sync + 'static,
    {
        Self::default().with_predicate(predicate)
    }

    /// Restricts removal to records matching the predicate.
    #[must_use]
    pub fn with_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Record) -> bool + Send + Sync + 'static,
    {
        self.predicate = Some(std::sync::Arc::new(predicate));
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.ids.is_none() && self.predicate.is_none() {
            return Err(RagError::InvalidArgument(
                "delete requires ids or a predicate".into(),
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for DeleteRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeleteRequest")
            .field("ids", &self.ids)
            .field("predicate", &self.predicate.as_ref().map(|_| ".."))
            .finish()
    }
}

/// Request for [`VectorStore::query`](crate::VectorStore::query).
///
/// Exactly one of `texts`/`embeddings` must be present. Each query produces
/// one ranked result list; `n_results` of `None` returns all matches.
#[derive(Clone, Default)]
pub struct QueryRequest {
    pub(crate) texts: Option<Vec<String>>,
    pub(crate) embeddings: Option<Vec<Vec<f32>>>,
    pub(crate) n_results: Option<usize>,
    pub(crate) ids: Option<Vec<String>>,
    pub(crate) predicate: Option<Predicate>,
}

impl QueryRequest {
    /// Creates a request whose queries are embedded from text.
    #[must_use]
    pub fn texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::default().with_texts(texts)
    }

    /// Creates a request whose query vectors are given directly.
    #[must_use]
    pub fn embeddings(embeddings: Vec<Vec<f32>>) -> Self {
        Self::default().with_embeddings(embeddings)
    }

    /// Sets the query texts.
    #[must_use]
    pub fn with_texts<I, S>(mut self, texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.texts = Some(texts.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the query vectors.
    #[must_use]
    pub fn with_embeddings(mut self, embeddings: Vec<Vec<f32>>) -> Self {
        self.embeddings = Some(embeddings);
        self
    }

    /// Limits each ranked list to the top `n` results.
    #[must_use]
    pub const fn with_n_results(mut self, n: usize) -> Self {
        self.n_results = Some(n);
        self
    }

    /// Restricts the candidate pool to the given ids, all of which must exist.
    #[must_use]
    pub fn with_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    /// Applies a post-score filter before ranking is truncated.
    #[must_use]
    pub fn with_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Record) -> bool + Send + Sync + 'static,
    {
        self.predicate = Some(std::sync::Arc::new(predicate));
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        match (&self.texts, &self.embeddings) {
            (Some(_), Some(_)) => Err(RagError::InvalidArgument(
                "query accepts texts or embeddings, not both".into(),
            )),
            (None, None) => Err(RagError::InvalidArgument(
                "query requires texts or embeddings".into(),
            )),
            _ => Ok(()),
        }
    }
}

impl fmt::Debug for QueryRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryRequest")
            .field("texts", &self.texts)
            .field("embeddings", &self.embeddings)
            .field("n_results", &self.n_results)
            .field("ids", &self.ids)
            .field("predicate", &self.predicate.as_ref().map(|_| ".."))
            .finish()
    }
}

fn check_len(name: &str, actual: Option<usize>, expected: usize) -> Result<()> {
    match actual {
        Some(actual) if actual != expected => Err(RagError::InvalidArgument(format!(
            "{name} has length {actual}, expected {expected}"
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_batch_length_from_documents() {
        let request = AddRequest::documents(["a", "b", "c"]);
        assert_eq!(request.batch_len().unwrap(), 3);
    }

    #[test]
    fn add_batch_length_from_embeddings_alone() {
        let request = AddRequest::embeddings(vec![vec![1.0], vec![2.0]]);
        assert_eq!(request.batch_len().unwrap(), 2);
    }

    #[test]
    fn add_without_documents_or_embeddings_is_invalid() {
        let err = AddRequest::default().batch_len().unwrap_err();
        assert!(matches!(err, RagError::InvalidArgument(_)));
    }

    #[test]
    fn add_rejects_mismatched_ids() {
        let err = AddRequest::documents(["a", "b"])
            .with_ids(["only-one"])
            .batch_len()
            .unwrap_err();
        assert!(matches!(err, RagError::InvalidArgument(_)));
    }

    #[test]
    fn update_rejects_mismatched_metadatas() {
        let err = UpdateRequest::new(["x"])
            .with_metadatas(vec![Metadata::new(), Metadata::new()])
            .batch_len()
            .unwrap_err();
        assert!(matches!(err, RagError::InvalidArgument(_)));
    }

    #[test]
    fn delete_with_neither_selector_is_invalid() {
        let err = DeleteRequest::default().validate().unwrap_err();
        assert!(matches!(err, RagError::InvalidArgument(_)));
    }

    #[test]
    fn delete_with_ids_or_predicate_is_valid() {
        DeleteRequest::ids(["a"]).validate().unwrap();
        DeleteRequest::matching(|_| true).validate().unwrap();
        DeleteRequest::ids(["a"])
            .with_predicate(|_| false)
            .validate()
            .unwrap();
    }

    #[test]
    fn query_exclusivity() {
        assert!(matches!(
            QueryRequest::default().validate().unwrap_err(),
            RagError::InvalidArgument(_)
        ));
        assert!(matches!(
            QueryRequest::texts(["q"])
                .with_embeddings(vec![vec![1.0]])
                .validate()
                .unwrap_err(),
            RagError::InvalidArgument(_)
        ));
        QueryRequest::texts(["q"]).validate().unwrap();
        QueryRequest::embeddings(vec![vec![1.0]]).validate().unwrap();
    }
}
