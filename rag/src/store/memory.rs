//! In-memory vector store, the reference implementation of the contract.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use mneme_core::EmbeddingModel;
use parking_lot::RwLock;
use rayon::prelude::*;
use tracing::debug;

use super::{VectorStore, check_dimension, check_embedding};
use crate::error::{RagError, Result};
use crate::id::IdGenerator;
use crate::math::cosine_similarity;
use crate::request::{AddRequest, DeleteRequest, QueryRequest, UpdateRequest};
use crate::types::{QueryResult, Record};

#[derive(Default)]
struct State {
    records: BTreeMap<String, Record>,
    dimension: Option<usize>,
}

/// Vector store backed by an in-memory ordered map.
///
/// Records live in a `BTreeMap`, so iteration order — and with it candidate
/// order during scoring — is deterministic. Similarity scoring runs on a
/// parallel iterator with a stable parallel sort, which keeps repeated queries
/// byte-for-byte identical while scaling to sizable corpora.
///
/// The store is bound to one [`EmbeddingModel`] for its lifetime. Embeddings
/// are computed before the internal write lock is taken; the lock then covers
/// the whole validate-and-mutate sequence, so concurrent callers serialize and
/// a failed call never leaves a partial mutation behind.
pub struct MemoryVectorStore<E> {
    embedder: E,
    ids: IdGenerator,
    state: RwLock<State>,
}

impl<E> core::fmt::Debug for MemoryVectorStore<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let state = self.state.read();
        f.debug_struct("MemoryVectorStore")
            .field("records", &state.records.len())
            .field("dimension", &state.dimension)
            .finish_non_exhaustive()
    }
}

impl<E> MemoryVectorStore<E>
where
    E: EmbeddingModel,
{
    /// Creates an empty store bound to the given embedding provider.
    ///
    /// The embedding dimension is not fixed yet; the first successful
    /// insertion establishes it.
    #[must_use]
    pub fn new(embedder: E) -> Self {
        Self {
            embedder,
            ids: IdGenerator::new(),
            state: RwLock::new(State::default()),
        }
    }

    /// Replaces the id generator, e.g. with a seeded one for deterministic
    /// tests.
    #[must_use]
    pub fn with_id_generator(mut self, ids: IdGenerator) -> Self {
        self.ids = ids;
        self
    }

    /// Returns the number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.read().records.len()
    }

    /// Returns `true` if the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.read().records.is_empty()
    }

    /// Returns the established embedding dimension, if any record has been
    /// inserted yet.
    #[must_use]
    pub fn dimension(&self) -> Option<usize> {
        self.state.read().dimension
    }

    async fn embed_all(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for text in texts {
            embeddings.push(self.embedder.embed(text).await.map_err(RagError::Embedding)?);
        }
        Ok(embeddings)
    }
}

impl<E> VectorStore for MemoryVectorStore<E>
where
    E: EmbeddingModel,
{
    async fn load(&self) -> Result<()> {
        self.embedder.load().await.map_err(RagError::Embedding)
    }

    async fn unload(&self) -> Result<()> {
        self.embedder.unload().await.map_err(RagError::Embedding)
    }

    async fn add(&self, request: AddRequest) -> Result<Vec<String>> {
        let len = request.batch_len()?;
        if len == 0 {
            return Ok(Vec::new());
        }
        let AddRequest {
            ids,
            documents,
            embeddings,
            metadatas,
        } = request;

        let embeddings = match embeddings {
            Some(embeddings) => embeddings,
            // batch_len guarantees documents are present when embeddings are not.
            None => self.embed_all(documents.as_deref().unwrap_or_default()).await?,
        };
        for embedding in &embeddings {
            check_embedding(embedding)?;
        }

        let ids = ids.unwrap_or_else(|| (0..len).map(|_| self.ids.generate()).collect());

        let mut state = self.state.write();
        let dimension = state.dimension.unwrap_or_else(|| embeddings[0].len());
        for embedding in &embeddings {
            check_dimension(Some(dimension), embedding)?;
        }

        let mut seen = HashSet::with_capacity(len);
        for id in &ids {
            if state.records.contains_key(id) || !seen.insert(id) {
                return Err(RagError::DuplicateId(id.clone()));
            }
        }

        for (index, (id, embedding)) in ids.iter().zip(embeddings).enumerate() {
            state.records.insert(
                id.clone(),
                Record {
                    id: id.clone(),
                    document: documents.as_ref().map(|docs| docs[index].clone()),
                    embedding,
                    metadata: metadatas.as_ref().map(|metas| metas[index].clone()),
                },
            );
        }
        state.dimension = Some(dimension);
        debug!(count = len, dimension, "added records");

        Ok(ids)
    }

    async fn update(&self, request: UpdateRequest) -> Result<()> {
        let len = request.batch_len()?;
        let UpdateRequest {
            ids,
            documents,
            embeddings,
            metadatas,
        } = request;

        // An explicit embedding wins; a new document without one is re-embedded.
        let new_embeddings = match (&embeddings, &documents) {
            (Some(embeddings), _) => Some(embeddings.clone()),
            (None, Some(documents)) => Some(self.embed_all(documents).await?),
            (None, None) => None,
        };
        if let Some(new_embeddings) = &new_embeddings {
            for embedding in new_embeddings {
                check_embedding(embedding)?;
            }
        }

        let mut state = self.state.write();
        for id in &ids {
            if !state.records.contains_key(id) {
                return Err(RagError::NotFound(id.clone()));
            }
        }
        if let Some(new_embeddings) = &new_embeddings {
            for embedding in new_embeddings {
                check_dimension(state.dimension, embedding)?;
            }
        }

        for (index, id) in ids.iter().enumerate() {
            let record = state
                .records
                .get_mut(id)
                .unwrap_or_else(|| unreachable!("existence checked above"));
            if let Some(documents) = &documents {
                record.document = Some(documents[index].clone());
            }
            if let Some(new_embeddings) = &new_embeddings {
                record.embedding = new_embeddings[index].clone();
            }
            if let Some(metadatas) = &metadatas {
                record.metadata = Some(metadatas[index].clone());
            }
        }
        debug!(count = len, "updated records");

        Ok(())
    }

    async fn delete(&self, request: DeleteRequest) -> Result<()> {
        request.validate()?;
        let DeleteRequest { ids, predicate } = request;

        let mut state = self.state.write();
        let before = state.records.len();
        match (ids, predicate) {
            (Some(ids), predicate) => {
                for id in &ids {
                    if !state.records.contains_key(id) {
                        return Err(RagError::NotFound(id.clone()));
                    }
                }
                for id in &ids {
                    if predicate
                        .as_ref()
                        .is_none_or(|matches| matches(&state.records[id]))
                    {
                        state.records.remove(id);
                    }
                }
            }
            (None, Some(matches)) => {
                state.records.retain(|_, record| !matches(record));
            }
            (None, None) => unreachable!("rejected by validate"),
        }
        debug!(removed = before - state.records.len(), "deleted records");

        Ok(())
    }

    async fn query(&self, request: QueryRequest) -> Result<Vec<Vec<QueryResult>>> {
        request.validate()?;
        let QueryRequest {
            texts,
            embeddings,
            n_results,
            ids,
            predicate,
        } = request;

        let vectors = match (texts, embeddings) {
            (Some(texts), None) => self.embed_all(&texts).await?,
            (None, Some(embeddings)) => embeddings,
            _ => unreachable!("rejected by validate"),
        };
        for vector in &vectors {
            check_embedding(vector)?;
        }

        let state = self.state.read();
        for vector in &vectors {
            check_dimension(state.dimension, vector)?;
        }

        // Candidates keep the map's key order, so ranking ties are stable and
        // repeated queries return identical results.
        let candidates: Vec<&Record> = match &ids {
            Some(ids) => {
                for id in ids {
                    if !state.records.contains_key(id) {
                        return Err(RagError::NotFound(id.clone()));
                    }
                }
                let requested: HashSet<&str> = ids.iter().map(String::as_str).collect();
                state
                    .records
                    .values()
                    .filter(|record| requested.contains(record.id.as_str()))
                    .collect()
            }
            None => state.records.values().collect(),
        };

        let mut results = Vec::with_capacity(vectors.len());
        for vector in &vectors {
            let mut scored: Vec<QueryResult> = candidates
                .par_iter()
                .map(|record| {
                    cosine_similarity(&record.embedding, vector).map(|similarity| QueryResult {
                        record: (*record).clone(),
                        similarity,
                    })
                })
                .collect::<Result<_>>()?;

            if let Some(matches) = &predicate {
                scored.retain(|result| matches(&result.record));
            }
            scored.par_sort_by(|a, b| {
                b.similarity
                    .partial_cmp(&a.similarity)
                    .unwrap_or(Ordering::Equal)
            });
            if let Some(n) = n_results {
                scored.truncate(n);
            }
            results.push(scored);
        }
        debug!(
            queries = vectors.len(),
            candidates = candidates.len(),
            n_results,
            "ranked query"
        );

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Metadata;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

    /// Deterministic embedder: direction depends on text length only.
    struct MockEmbedder {
        dimension: usize,
        calls: AtomicUsize,
    }

    impl MockEmbedder {
        const fn new(dimension: usize) -> Self {
            Self {
                dimension,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl EmbeddingModel for MockEmbedder {
        #[allow(clippy::cast_precision_loss)]
        async fn embed(&self, text: &str) -> mneme_core::Result<Vec<f32>> {
            self.calls.fetch_add(1, AtomicOrdering::SeqCst);
            let mut vector = vec![0.0; self.dimension];
            for (idx, value) in vector.iter_mut().enumerate() {
                *value = ((text.len() + idx) % 10) as f32 + 1.0;
            }
            Ok(vector)
        }
    }

    fn store() -> MemoryVectorStore<MockEmbedder> {
        MemoryVectorStore::new(MockEmbedder::new(3))
    }

    fn meta(key: &str, value: &str) -> Metadata {
        Metadata::from([(key.into(), json!(value))])
    }

    #[tokio::test]
    async fn add_and_query_round_trip() {
        let store = store();
        store
            .add(
                AddRequest::documents(["hello"])
                    .with_ids(["x"])
                    .with_embeddings(vec![vec![1.0, 0.0, 0.0]]),
            )
            .await
            .unwrap();

        let results = store
            .query(QueryRequest::embeddings(vec![vec![1.0, 0.0, 0.0]]).with_n_results(1))
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].len(), 1);
        assert_eq!(results[0][0].record.id, "x");
        assert!((results[0][0].similarity - 1.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn missing_ids_are_generated_in_order() {
        let store = store();
        let ids = store
            .add(AddRequest::documents(["one", "two", "three"]))
            .await
            .unwrap();

        assert_eq!(ids.len(), 3);
        assert_eq!(store.len(), 3);
        for id in &ids {
            assert_eq!(id.split('-').count(), 5);
        }
    }

    #[tokio::test]
    async fn empty_batch_is_a_no_op() {
        let store = store();
        let ids = store
            .add(AddRequest::documents(Vec::<String>::new()))
            .await
            .unwrap();

        assert!(ids.is_empty());
        assert!(store.is_empty());
        // No insertion happened, so no dimension was established either.
        assert_eq!(store.dimension(), None);
    }

    #[tokio::test]
    async fn missing_embeddings_come_from_the_provider() {
        let store = store();
        store.add(AddRequest::documents(["alpha", "beta"])).await.unwrap();
        assert_eq!(store.embedder.calls.load(AtomicOrdering::SeqCst), 2);

        // Explicit embeddings skip the provider entirely.
        store
            .add(AddRequest::documents(["gamma"]).with_embeddings(vec![vec![1.0, 2.0, 3.0]]))
            .await
            .unwrap();
        assert_eq!(store.embedder.calls.load(AtomicOrdering::SeqCst), 2);
    }

    #[tokio::test]
    async fn duplicate_id_rejects_the_whole_batch() {
        let store = store();
        store
            .add(AddRequest::documents(["existing"]).with_ids(["a"]))
            .await
            .unwrap();

        let err = store
            .add(AddRequest::documents(["new one", "collides"]).with_ids(["b", "a"]))
            .await
            .unwrap_err();

        assert!(matches!(err, RagError::DuplicateId(id) if id == "a"));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn duplicate_id_within_one_batch_is_rejected() {
        let store = store();
        let err = store
            .add(AddRequest::documents(["p", "q"]).with_ids(["same", "same"]))
            .await
            .unwrap_err();

        assert!(matches!(err, RagError::DuplicateId(_)));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn first_insertion_establishes_the_dimension() {
        let store = store();
        store
            .add(AddRequest::embeddings(vec![vec![1.0, 2.0]]).with_ids(["a"]))
            .await
            .unwrap();
        assert_eq!(store.dimension(), Some(2));

        let err = store
            .add(AddRequest::embeddings(vec![vec![1.0, 2.0, 3.0]]).with_ids(["b"]))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RagError::DimensionMismatch {
                expected: 2,
                actual: 3
            }
        ));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn mixed_dimensions_in_one_batch_are_rejected() {
        let store = store();
        let err = store
            .add(AddRequest::embeddings(vec![vec![1.0, 2.0], vec![1.0, 2.0, 3.0]]).with_ids(["a", "b"]))
            .await
            .unwrap_err();

        assert!(matches!(err, RagError::DimensionMismatch { .. }));
        assert!(store.is_empty());
        // Nothing was inserted, so no dimension was established either.
        assert_eq!(store.dimension(), None);
    }

    #[tokio::test]
    async fn zero_and_non_finite_embeddings_are_rejected() {
        let store = store();
        let zero = store
            .add(AddRequest::embeddings(vec![vec![0.0, 0.0]]).with_ids(["z"]))
            .await
            .unwrap_err();
        assert!(matches!(zero, RagError::InvalidArgument(_)));

        let nan = store
            .add(AddRequest::embeddings(vec![vec![1.0, f32::NAN]]).with_ids(["n"]))
            .await
            .unwrap_err();
        assert!(matches!(nan, RagError::InvalidArgument(_)));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn update_replaces_embedding_and_metadata_whole() {
        let store = store();
        store
            .add(
                AddRequest::documents(["alpha"])
                    .with_ids(["m"])
                    .with_embeddings(vec![vec![1.0, 0.0, 0.0]])
                    .with_metadatas(vec![meta("a", "1")]),
            )
            .await
            .unwrap();

        store
            .update(
                UpdateRequest::new(["m"])
                    .with_embeddings(vec![vec![9.0, 9.0, 9.0]])
                    .with_metadatas(vec![meta("b", "2")]),
            )
            .await
            .unwrap();

        let results = store
            .query(QueryRequest::embeddings(vec![vec![9.0, 9.0, 9.0]]).with_n_results(1))
            .await
            .unwrap();
        let record = &results[0][0].record;
        assert_eq!(record.id, "m");
        assert!((results[0][0].similarity - 1.0).abs() < 1e-6);
        // Old metadata is fully replaced, not merged.
        assert_eq!(record.metadata, Some(meta("b", "2")));
        assert_eq!(record.document.as_deref(), Some("alpha"));
    }

    #[tokio::test]
    async fn update_with_new_document_re_embeds() {
        let store = store();
        store
            .add(AddRequest::documents(["short"]).with_ids(["d"]))
            .await
            .unwrap();
        let calls_before = store.embedder.calls.load(AtomicOrdering::SeqCst);

        store
            .update(UpdateRequest::new(["d"]).with_documents(["a rather longer document"]))
            .await
            .unwrap();
        assert_eq!(
            store.embedder.calls.load(AtomicOrdering::SeqCst),
            calls_before + 1
        );

        // An explicit embedding wins over recomputation.
        store
            .update(
                UpdateRequest::new(["d"])
                    .with_documents(["changed again"])
                    .with_embeddings(vec![vec![1.0, 1.0, 1.0]]),
            )
            .await
            .unwrap();
        assert_eq!(
            store.embedder.calls.load(AtomicOrdering::SeqCst),
            calls_before + 1
        );

        let results = store
            .query(QueryRequest::embeddings(vec![vec![1.0, 1.0, 1.0]]).with_n_results(1))
            .await
            .unwrap();
        assert_eq!(results[0][0].record.document.as_deref(), Some("changed again"));
    }

    #[tokio::test]
    async fn update_unknown_id_rejects_the_whole_batch() {
        let store = store();
        store
            .add(AddRequest::documents(["present"]).with_ids(["p"]))
            .await
            .unwrap();

        let err = store
            .update(UpdateRequest::new(["p", "ghost"]).with_metadatas(vec![meta("k", "v"); 2]))
            .await
            .unwrap_err();

        assert!(matches!(err, RagError::NotFound(id) if id == "ghost"));
        let results = store
            .query(QueryRequest::texts(["present"]).with_n_results(1))
            .await
            .unwrap();
        // The existing record was left untouched.
        assert_eq!(results[0][0].record.metadata, None);
    }

    #[tokio::test]
    async fn delete_by_ids_requires_existence() {
        let store = store();
        store
            .add(AddRequest::documents(["a", "b"]).with_ids(["a", "b"]))
            .await
            .unwrap();

        let err = store.delete(DeleteRequest::ids(["a", "ghost"])).await.unwrap_err();
        assert!(matches!(err, RagError::NotFound(_)));
        assert_eq!(store.len(), 2);

        store.delete(DeleteRequest::ids(["a", "b"])).await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn delete_by_predicate_removes_matches_only() {
        let store = store();
        store
            .add(
                AddRequest::documents(["one", "two", "three"])
                    .with_ids(["1", "2", "3"])
                    .with_metadatas(vec![meta("role", "x"), meta("role", "y"), meta("role", "y")]),
            )
            .await
            .unwrap();

        store
            .delete(DeleteRequest::matching(|record| {
                record
                    .metadata
                    .as_ref()
                    .and_then(|m| m.get("role"))
                    .is_some_and(|role| role == "y")
            }))
            .await
            .unwrap();

        assert_eq!(store.len(), 1);
        let results = store.query(QueryRequest::texts(["one"])).await.unwrap();
        assert_eq!(results[0][0].record.id, "1");

        // Zero matches is success, not an error.
        store
            .delete(DeleteRequest::matching(|_| false))
            .await
            .unwrap();
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn delete_with_ids_and_predicate_post_filters() {
        let store = store();
        store
            .add(
                AddRequest::documents(["one", "two", "three"])
                    .with_ids(["1", "2", "3"])
                    .with_metadatas(vec![meta("role", "x"), meta("role", "y"), meta("role", "y")]),
            )
            .await
            .unwrap();

        // Only records in the id set AND matching the predicate go away.
        store
            .delete(DeleteRequest::ids(["1", "2"]).with_predicate(|record| {
                record
                    .metadata
                    .as_ref()
                    .and_then(|m| m.get("role"))
                    .is_some_and(|role| role == "y")
            }))
            .await
            .unwrap();

        assert_eq!(store.len(), 2);
        assert!(store.state.read().records.contains_key("1"));
        assert!(store.state.read().records.contains_key("3"));
    }

    #[tokio::test]
    async fn query_restricted_to_ids() {
        let store = store();
        store
            .add(
                AddRequest::embeddings(vec![
                    vec![1.0, 0.0, 0.0],
                    vec![0.9, 0.1, 0.0],
                    vec![0.0, 1.0, 0.0],
                ])
                .with_ids(["best", "good", "other"]),
            )
            .await
            .unwrap();

        let results = store
            .query(
                QueryRequest::embeddings(vec![vec![1.0, 0.0, 0.0]])
                    .with_ids(["good", "other"])
                    .with_n_results(1),
            )
            .await
            .unwrap();
        // "best" is excluded from the candidate pool despite the higher score.
        assert_eq!(results[0][0].record.id, "good");

        let err = store
            .query(QueryRequest::embeddings(vec![vec![1.0, 0.0, 0.0]]).with_ids(["ghost"]))
            .await
            .unwrap_err();
        assert!(matches!(err, RagError::NotFound(_)));
    }

    #[tokio::test]
    async fn query_ranks_descending_and_truncates() {
        let store = store();
        store
            .add(
                AddRequest::embeddings(vec![
                    vec![0.0, 1.0, 0.0],
                    vec![1.0, 0.0, 0.0],
                    vec![0.7, 0.7, 0.0],
                ])
                .with_ids(["orthogonal", "aligned", "diagonal"]),
            )
            .await
            .unwrap();

        let results = store
            .query(QueryRequest::embeddings(vec![vec![1.0, 0.0, 0.0]]).with_n_results(2))
            .await
            .unwrap();

        let ids: Vec<&str> = results[0].iter().map(|r| r.record.id.as_str()).collect();
        assert_eq!(ids, ["aligned", "diagonal"]);
        assert!(results[0][0].similarity >= results[0][1].similarity);

        // Without n_results, every candidate comes back.
        let all = store
            .query(QueryRequest::embeddings(vec![vec![1.0, 0.0, 0.0]]))
            .await
            .unwrap();
        assert_eq!(all[0].len(), 3);
    }

    #[tokio::test]
    async fn query_predicate_filters_after_scoring() {
        let store = store();
        store
            .add(
                AddRequest::embeddings(vec![vec![1.0, 0.0, 0.0], vec![0.9, 0.1, 0.0]])
                    .with_ids(["skip", "keep"])
                    .with_metadatas(vec![meta("kind", "noise"), meta("kind", "signal")]),
            )
            .await
            .unwrap();

        let results = store
            .query(
                QueryRequest::embeddings(vec![vec![1.0, 0.0, 0.0]])
                    .with_n_results(1)
                    .with_predicate(|record| {
                        record
                            .metadata
                            .as_ref()
                            .and_then(|m| m.get("kind"))
                            .is_some_and(|kind| kind == "signal")
                    }),
            )
            .await
            .unwrap();

        assert_eq!(results[0].len(), 1);
        assert_eq!(results[0][0].record.id, "keep");
    }

    #[tokio::test]
    async fn repeated_queries_are_deterministic() {
        let store = store();
        store
            .add(AddRequest::documents(["aa", "bbb", "cccc", "ddddd"]))
            .await
            .unwrap();

        let first = store.query(QueryRequest::texts(["fixed query"])).await.unwrap();
        for _ in 0..5 {
            let again = store.query(QueryRequest::texts(["fixed query"])).await.unwrap();
            assert_eq!(again, first);
        }
    }

    #[tokio::test]
    async fn multiple_queries_return_lists_in_query_order() {
        let store = store();
        store
            .add(
                AddRequest::embeddings(vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]])
                    .with_ids(["x-axis", "y-axis"]),
            )
            .await
            .unwrap();

        let results = store
            .query(
                QueryRequest::embeddings(vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]])
                    .with_n_results(1),
            )
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0][0].record.id, "x-axis");
        assert_eq!(results[1][0].record.id, "y-axis");
    }

    #[tokio::test]
    async fn query_on_empty_store_returns_empty_lists() {
        let store = store();
        let results = store
            .query(QueryRequest::embeddings(vec![vec![1.0, 0.0]]))
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert!(results[0].is_empty());
    }

    #[tokio::test]
    async fn query_dimension_is_validated() {
        let store = store();
        store
            .add(AddRequest::embeddings(vec![vec![1.0, 0.0, 0.0]]).with_ids(["a"]))
            .await
            .unwrap();

        let err = store
            .query(QueryRequest::embeddings(vec![vec![1.0, 0.0]]))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RagError::DimensionMismatch {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[tokio::test]
    async fn lifecycle_delegates_to_the_provider() {
        let store = store();
        store.load().await.unwrap();
        store.unload().await.unwrap();
    }
}
