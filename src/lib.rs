#![no_std]
//! # mneme
//!
//! High level façade crate for the mneme retrieval-augmented generation toolkit. It
//! re-exports everything from [`mneme_core`] and, with the `rag` feature (enabled by
//! default), the full [`rag`] toolkit: vector stores, text splitters, and the
//! retrieval-augmented orchestrator.
//!
//! ## What's inside?
//!
//! - [`EmbeddingModel`](mneme_core::EmbeddingModel) for turning text into vectors.
//! - [`GenerativeModel`](mneme_core::GenerativeModel) + [`TokenStream`](mneme_core::TokenStream)
//!   for streaming text generation: iterate for tokens, `.await` for the full answer.
//! - [`rag::VectorStore`] with in-memory and SQL-backed implementations, batch CRUD,
//!   and cosine-ranked similarity queries.
//! - [`rag::Rag`], which splits and indexes documents, then answers questions with
//!   retrieved context folded into the prompt.
//!
//! ## Example
//!
//! ```rust,ignore
//! use mneme::rag::{GenerateRequest, MemoryVectorStore, Rag};
//! use futures_lite::StreamExt;
//!
//! async fn demo(
//!     embedder: impl mneme::EmbeddingModel + 'static,
//!     model: impl mneme::GenerativeModel + 'static,
//! ) -> mneme::rag::Result<()> {
//!     let rag = Rag::new(MemoryVectorStore::new(embedder), model);
//!     rag.load().await?;
//!
//!     rag.split_add("Roman aqueducts moved water by gravity alone.").await?;
//!
//!     let mut answer = rag.generate(GenerateRequest::new("How did aqueducts move water?"))?;
//!     while let Some(token) = answer.next().await {
//!         print!("{}", token?);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`mneme_core::llm`] — messages, generative model traits, token streams.
//! - [`mneme_core::embedding`] — convert text to vectors.
//! - [`rag`] — vector stores, splitters, and the orchestrator (feature `rag`).

pub use mneme_core::*;

#[cfg(feature = "rag")]
#[doc(inline)]
pub use mneme_rag as rag;
