//! # mneme-rag
//!
//! **Retrieval-augmented generation toolkit** 🔍
//!
//! `mneme-rag` turns the provider traits from [`mneme-core`](mneme_core) into a working
//! retrieval pipeline: vector stores with batch CRUD and cosine-ranked similarity queries,
//! text splitters for ingestion, and a [`Rag`] orchestrator that composes a store with a
//! streaming generative model.
//!
//! ```text
//! ┌───────────┐   split   ┌──────────────┐   embed + store   ┌──────────────┐
//! │ Documents │──────────▶│ TextSplitter │──────────────────▶│ VectorStore  │
//! └───────────┘           └──────────────┘                   └──────┬───────┘
//!                                                                  │ retrieve
//! ┌───────────┐  augmented prompt  ┌─────────────────┐             │
//! │  Answer   │◀───────────────────│ GenerativeModel │◀────────────┘
//! └───────────┘   (token stream)   └─────────────────┘
//! ```
//!
//! ## Components
//!
//! | Component | Type | Description |
//! |-----------|------|-------------|
//! | **Store contract** | [`VectorStore`] | Batch add/update/delete plus ranked queries |
//! | **In-memory store** | [`MemoryVectorStore`] | Parallel-scored reference implementation |
//! | **SQL store** | [`SqlVectorStore`] | Persists vectors through any [`Database`] backend |
//! | **Splitting** | [`RecursiveCharacterSplitter`], [`FixedSizeSplitter`] | Chunk documents before embedding |
//! | **Orchestration** | [`Rag`] | Retrieval-augmented streaming generation |
//!
//! ## Example
//!
//! ```rust,ignore
//! use mneme_rag::{GenerateRequest, MemoryVectorStore, Rag};
//!
//! # async fn demo(embedder: impl mneme_core::EmbeddingModel + 'static,
//! #               model: impl mneme_core::GenerativeModel + 'static) -> mneme_rag::Result<()> {
//! let rag = Rag::new(MemoryVectorStore::new(embedder), model);
//! rag.load().await?;
//!
//! rag.split_add("Aqueducts carried water across valleys on arched bridges.").await?;
//!
//! let answer = rag.generate(GenerateRequest::new("How did aqueducts cross valleys?"))?
//!     .await?;
//! println!("{answer}");
//! # Ok(())
//! # }
//! ```
//!
//! All fallible operations return [`RagError`], which keeps collaborator failures
//! (embedding provider, model, database) intact as source errors.

pub mod error;
mod id;
pub mod math;
mod rag;
mod request;
pub mod split;
pub mod store;
mod types;

pub use error::{RagError, Result};
pub use id::IdGenerator;
pub use rag::{GenerateRequest, Generation, Rag, RagBuilder};
pub use request::{AddRequest, DeleteRequest, QueryRequest, UpdateRequest};
pub use split::{FixedSizeSplitter, RecursiveCharacterSplitter, TextSplitter};
pub use store::{
    Compression, Database, IndexOptions, MemoryVectorStore, Row, SqlValue, SqlVectorStore,
    VectorStore,
};
pub use types::{Metadata, Predicate, QueryResult, Record};
