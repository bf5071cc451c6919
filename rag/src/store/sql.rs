//! SQL-backed vector store.
//!
//! Same contract as the in-memory store, persisted through a [`Database`]
//! backend: records map to rows of a `vectors` table with a dedicated vector
//! column and a similarity index, and ranking is pushed into the query. No
//! concrete driver ships in this crate; any connection that can run
//! parameterized statements and the libSQL vector functions
//! (`vector32`, `vector_distance_cos`, `libsql_vector_idx`) qualifies.

use std::collections::HashSet;

use mneme_core::EmbeddingModel;
use tracing::{debug, trace};

use super::{VectorStore, check_dimension, check_embedding};
use crate::error::{RagError, Result};
use crate::id::IdGenerator;
use crate::request::{AddRequest, DeleteRequest, QueryRequest, UpdateRequest};
use crate::types::{Metadata, QueryResult, Record};

/// One text sent through the provider at load time to size the vector column.
const DIMENSION_PROBE: &str = "dimension probe";

/// A parameter or result cell crossing the backend boundary.
#[derive(Clone, Debug, PartialEq)]
pub enum SqlValue {
    /// SQL NULL.
    Null,
    /// 64-bit integer.
    Integer(i64),
    /// 64-bit float.
    Real(f64),
    /// UTF-8 text.
    Text(String),
    /// Raw bytes.
    Blob(Vec<u8>),
}

/// One result row, cells in SELECT projection order.
pub type Row = Vec<SqlValue>;

/// Connection contract consumed by [`SqlVectorStore`].
///
/// Backend errors are opaque to this crate and surface unmodified inside
/// [`RagError::Database`].
pub trait Database: Send + Sync {
    /// Runs one parameterized statement and returns its result rows.
    fn execute(
        &self,
        sql: &str,
        params: Vec<SqlValue>,
    ) -> impl core::future::Future<Output = anyhow::Result<Vec<Row>>> + Send;
}

/// Vector-compression kinds accepted by the similarity index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Compression {
    /// One bit per component.
    Float1Bit,
    /// Eight bits per component.
    Float8,
    /// Sixteen bits per component.
    Float16,
}

impl Compression {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Float1Bit => "float1bit",
            Self::Float8 => "float8",
            Self::Float16 => "float16",
        }
    }
}

/// Tuning parameters for the similarity index created at load time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IndexOptions {
    /// Maximum neighbor count per node in the index graph.
    pub max_neighbors: Option<usize>,
    /// Compression applied to indexed vectors.
    pub compress_neighbors: Option<Compression>,
}

/// Vector store persisted in a `vectors` table.
///
/// On-disk layout is stable across versions: table `vectors`, columns
/// `id TEXT PRIMARY KEY`, `document TEXT`, `embedding F32_BLOB(dim)`,
/// `metadata TEXT` (metadata serialized as JSON text). The embedding
/// dimension is probed through the provider during [`load`](VectorStore::load)
/// and sizes the vector column.
///
/// Mutating operations serialize behind an internal async mutex, so a
/// check-then-mutate sequence never interleaves with another writer.
#[derive(Debug)]
pub struct SqlVectorStore<E, D> {
    embedder: E,
    db: D,
    ids: IdGenerator,
    options: IndexOptions,
    // Holds the probed dimension; doubles as the single-writer lock.
    state: async_lock::Mutex<Option<usize>>,
}

impl<E, D> SqlVectorStore<E, D>
where
    E: EmbeddingModel,
    D: Database,
{
    /// Creates a store over the given provider and backend connection.
    ///
    /// Call [`load`](VectorStore::load) before any other operation: it warms
    /// the provider, probes the dimension, and creates the schema and index.
    #[must_use]
    pub fn new(embedder: E, db: D) -> Self {
        Self {
            embedder,
            db,
            ids: IdGenerator::new(),
            options: IndexOptions::default(),
            state: async_lock::Mutex::new(None),
        }
    }

    /// Sets the similarity-index tuning parameters used at load time.
    #[must_use]
    pub fn with_index_options(mut self, options: IndexOptions) -> Self {
        self.options = options;
        self
    }

    /// Replaces the id generator, e.g. with a seeded one for deterministic
    /// tests.
    #[must_use]
    pub fn with_id_generator(mut self, ids: IdGenerator) -> Self {
        self.ids = ids;
        self
    }

    /// Drops the entire backing table.
    ///
    /// This is the destructive counterpart of `delete`: every record is gone
    /// and unrecoverable, which is why it consumes the store.
    pub async fn destroy(self) -> Result<()> {
        self.run("DROP TABLE IF EXISTS vectors", Vec::new()).await?;
        debug!("dropped the vectors table");
        Ok(())
    }

    async fn run(&self, sql: &str, params: Vec<SqlValue>) -> Result<Vec<Row>> {
        trace!(sql, params = params.len(), "executing statement");
        self.db.execute(sql, params).await.map_err(RagError::Database)
    }

    async fn embed_all(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for text in texts {
            embeddings.push(self.embedder.embed(text).await.map_err(RagError::Embedding)?);
        }
        Ok(embeddings)
    }

    /// Returns which of `ids` already have a row.
    async fn existing_ids(&self, ids: &[String]) -> Result<HashSet<String>> {
        if ids.is_empty() {
            return Ok(HashSet::new());
        }
        let sql = format!(
            "SELECT id FROM vectors WHERE id IN ({})",
            placeholders(ids.len())
        );
        let params = ids.iter().cloned().map(SqlValue::Text).collect();
        let rows = self.run(&sql, params).await?;

        rows.into_iter()
            .map(|row| match row.into_iter().next() {
                Some(SqlValue::Text(id)) => Ok(id),
                other => Err(malformed(format!("expected text id, got {other:?}"))),
            })
            .collect()
    }

    /// Errors with `NotFound` unless every id has a row.
    async fn require_ids(&self, ids: &[String]) -> Result<()> {
        let existing = self.existing_ids(ids).await?;
        for id in ids {
            if !existing.contains(id) {
                return Err(RagError::NotFound(id.clone()));
            }
        }
        Ok(())
    }

    async fn fetch_records(&self, ids: Option<&[String]>) -> Result<Vec<Record>> {
        let (sql, params) = match ids {
            Some(ids) => (
                format!(
                    "SELECT id, document, embedding, metadata FROM vectors WHERE id IN ({})",
                    placeholders(ids.len())
                ),
                ids.iter().cloned().map(SqlValue::Text).collect(),
            ),
            None => (
                "SELECT id, document, embedding, metadata FROM vectors".to_owned(),
                Vec::new(),
            ),
        };
        let rows = self.run(&sql, params).await?;
        rows.into_iter().map(decode_record).collect()
    }

    async fn delete_rows(&self, ids: &[String]) -> Result<()> {
        if ids.is_empty() {
            return Ok(());
        }
        let sql = format!(
            "DELETE FROM vectors WHERE id IN ({})",
            placeholders(ids.len())
        );
        let params = ids.iter().cloned().map(SqlValue::Text).collect();
        self.run(&sql, params).await?;
        Ok(())
    }
}

impl<E, D> VectorStore for SqlVectorStore<E, D>
where
    E: EmbeddingModel,
    D: Database,
{
    async fn load(&self) -> Result<()> {
        self.embedder.load().await.map_err(RagError::Embedding)?;
        let probe = self
            .embedder
            .embed(DIMENSION_PROBE)
            .await
            .map_err(RagError::Embedding)?;
        let dimension = probe.len();

        let mut state = self.state.lock().await;
        self.run(
            &format!(
                "CREATE TABLE IF NOT EXISTS vectors (id TEXT PRIMARY KEY, document TEXT, embedding F32_BLOB({dimension}), metadata TEXT)"
            ),
            Vec::new(),
        )
        .await?;

        let mut index_args = "embedding".to_owned();
        if let Some(max_neighbors) = self.options.max_neighbors {
            index_args.push_str(&format!(", 'max_neighbors={max_neighbors}'"));
        }
        if let Some(compression) = self.options.compress_neighbors {
            index_args.push_str(&format!(", 'compress_neighbors={}'", compression.as_str()));
        }
        self.run(
            &format!(
                "CREATE INDEX IF NOT EXISTS vectors_embedding_idx ON vectors (libsql_vector_idx({index_args}))"
            ),
            Vec::new(),
        )
        .await?;

        *state = Some(dimension);
        debug!(dimension, "loaded vector store schema");
        Ok(())
    }

    async fn unload(&self) -> Result<()> {
        self.embedder.unload().await.map_err(RagError::Embedding)
    }

    async fn add(&self, request: AddRequest) -> Result<Vec<String>> {
        let len = request.batch_len()?;
        let AddRequest {
            ids,
            documents,
            embeddings,
            metadatas,
        } = request;

        let embeddings = match embeddings {
            Some(embeddings) => embeddings,
            None => self.embed_all(documents.as_deref().unwrap_or_default()).await?,
        };
        for embedding in &embeddings {
            check_embedding(embedding)?;
        }

        let ids = ids.unwrap_or_else(|| (0..len).map(|_| self.ids.generate()).collect());

        let state = self.state.lock().await;
        for embedding in &embeddings {
            check_dimension(*state, embedding)?;
        }

        let mut seen = HashSet::with_capacity(len);
        for id in &ids {
            if !seen.insert(id) {
                return Err(RagError::DuplicateId(id.clone()));
            }
        }
        let existing = self.existing_ids(&ids).await?;
        if let Some(id) = ids.iter().find(|id| existing.contains(*id)) {
            return Err(RagError::DuplicateId(id.clone()));
        }

        for (index, (id, embedding)) in ids.iter().zip(&embeddings).enumerate() {
            let document = documents
                .as_ref()
                .map_or(SqlValue::Null, |docs| SqlValue::Text(docs[index].clone()));
            let metadata = match metadatas.as_ref() {
                Some(metas) => SqlValue::Text(encode_metadata(&metas[index])?),
                None => SqlValue::Null,
            };
            self.run(
                "INSERT INTO vectors (id, document, embedding, metadata) VALUES (?, ?, vector32(?), ?)",
                vec![
                    SqlValue::Text(id.clone()),
                    document,
                    SqlValue::Text(vector_literal(embedding)),
                    metadata,
                ],
            )
            .await?;
        }
        debug!(count = len, "inserted rows");

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

        let state = self.state.lock().await;
        if let Some(new_embeddings) = &new_embeddings {
            for embedding in new_embeddings {
                check_dimension(*state, embedding)?;
            }
        }
        self.require_ids(&ids).await?;

        for (index, id) in ids.iter().enumerate() {
            let mut assignments = Vec::new();
            let mut params = Vec::new();
            if let Some(documents) = &documents {
                assignments.push("document = ?");
                params.push(SqlValue::Text(documents[index].clone()));
            }
            if let Some(new_embeddings) = &new_embeddings {
                assignments.push("embedding = vector32(?)");
                params.push(SqlValue::Text(vector_literal(&new_embeddings[index])));
            }
            if let Some(metadatas) = &metadatas {
                assignments.push("metadata = ?");
                params.push(SqlValue::Text(encode_metadata(&metadatas[index])?));
            }
            if assignments.is_empty() {
                continue;
            }
            params.push(SqlValue::Text(id.clone()));
            self.run(
                &format!("UPDATE vectors SET {} WHERE id = ?", assignments.join(", ")),
                params,
            )
            .await?;
        }
        debug!(count = len, "updated rows");

        Ok(())
    }

    async fn delete(&self, request: DeleteRequest) -> Result<()> {
        request.validate()?;
        let DeleteRequest { ids, predicate } = request;

        let _state = self.state.lock().await;
        match (ids, predicate) {
            (Some(ids), None) => {
                self.require_ids(&ids).await?;
                self.delete_rows(&ids).await?;
            }
            (Some(ids), Some(matches)) => {
                self.require_ids(&ids).await?;
                let records = self.fetch_records(Some(&ids)).await?;
                let doomed: Vec<String> = records
                    .into_iter()
                    .filter(|record| matches(record))
                    .map(|record| record.id)
                    .collect();
                self.delete_rows(&doomed).await?;
            }
            (None, Some(matches)) => {
                let records = self.fetch_records(None).await?;
                let doomed: Vec<String> = records
                    .into_iter()
                    .filter(|record| matches(record))
                    .map(|record| record.id)
                    .collect();
                self.delete_rows(&doomed).await?;
            }
            (None, None) => unreachable!("rejected by validate"),
        }
        debug!("deleted rows");

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

        let dimension = *self.state.lock().await;
        for vector in &vectors {
            check_dimension(dimension, vector)?;
        }
        if let Some(ids) = &ids {
            self.require_ids(ids).await?;
        }

        let mut results = Vec::with_capacity(vectors.len());
        for vector in &vectors {
            let mut sql = String::from(
                "SELECT id, document, embedding, metadata, \
                 1.0 - vector_distance_cos(embedding, vector32(?)) AS similarity FROM vectors",
            );
            let mut params = vec![SqlValue::Text(vector_literal(vector))];
            if let Some(ids) = &ids {
                sql.push_str(&format!(" WHERE id IN ({})", placeholders(ids.len())));
                params.extend(ids.iter().cloned().map(SqlValue::Text));
            }
            sql.push_str(" ORDER BY similarity DESC");
            // A predicate filters after scoring, so the limit cannot be pushed
            // down without losing matches.
            if predicate.is_none() {
                if let Some(n) = n_results {
                    sql.push_str(" LIMIT ?");
                    params.push(SqlValue::Integer(i64::try_from(n).unwrap_or(i64::MAX)));
                }
            }

            let rows = self.run(&sql, params).await?;
            let mut scored = rows
                .into_iter()
                .map(decode_query_row)
                .collect::<Result<Vec<QueryResult>>>()?;
            if let Some(matches) = &predicate {
                scored.retain(|result| matches(&result.record));
                if let Some(n) = n_results {
                    scored.truncate(n);
                }
            }
            results.push(scored);
        }
        debug!(queries = vectors.len(), n_results, "ranked query");

        Ok(results)
    }
}

/// Encodes a vector in the backend's bracketed literal syntax.
fn vector_literal(embedding: &[f32]) -> String {
    let components: Vec<String> = embedding.iter().map(ToString::to_string).collect();
    format!("[{}]", components.join(","))
}

/// Decodes a stored vector column: f32 components, little-endian.
fn decode_vector(bytes: &[u8]) -> Result<Vec<f32>> {
    if bytes.len() % 4 != 0 {
        return Err(malformed(format!(
            "embedding blob length {} is not a multiple of 4",
            bytes.len()
        )));
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect())
}

fn encode_metadata(metadata: &Metadata) -> Result<String> {
    serde_json::to_string(metadata).map_err(|err| RagError::Database(err.into()))
}

fn decode_record(row: Row) -> Result<Record> {
    let mut cells = row.into_iter();
    let id = match cells.next() {
        Some(SqlValue::Text(id)) => id,
        other => return Err(malformed(format!("expected text id, got {other:?}"))),
    };
    let document = match cells.next() {
        Some(SqlValue::Text(text)) => Some(text),
        Some(SqlValue::Null) => None,
        other => return Err(malformed(format!("expected document text, got {other:?}"))),
    };
    let embedding = match cells.next() {
        Some(SqlValue::Blob(bytes)) => decode_vector(&bytes)?,
        other => return Err(malformed(format!("expected embedding blob, got {other:?}"))),
    };
    let metadata = match cells.next() {
        Some(SqlValue::Text(json)) => {
            Some(serde_json::from_str(&json).map_err(|err| RagError::Database(err.into()))?)
        }
        Some(SqlValue::Null) => None,
        other => return Err(malformed(format!("expected metadata text, got {other:?}"))),
    };
    Ok(Record {
        id,
        document,
        embedding,
        metadata,
    })
}

fn decode_query_row(row: Row) -> Result<QueryResult> {
    if row.len() < 5 {
        return Err(malformed(format!("expected 5 columns, got {}", row.len())));
    }
    let mut row = row;
    #[allow(clippy::cast_possible_truncation)]
    let similarity = match row.pop() {
        Some(SqlValue::Real(value)) => value as f32,
        #[allow(clippy::cast_precision_loss)]
        Some(SqlValue::Integer(value)) => value as f32,
        other => return Err(malformed(format!("expected similarity, got {other:?}"))),
    };
    Ok(QueryResult {
        record: decode_record(row)?,
        similarity,
    })
}

fn malformed(detail: String) -> RagError {
    RagError::Database(anyhow::anyhow!("malformed row: {detail}"))
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}
