//! # mneme-core
//!
//! **Model-agnostic building blocks for retrieval-augmented generation** 🧠
//!
//! `mneme-core` hosts the no-std trait APIs that power the rest of the workspace. Use it directly
//! (or through the top-level [`mneme`](https://crates.io/crates/mneme) crate) to describe portable
//! embedding providers and streaming generative models. Every provider crate simply implements
//! these traits; the toolkit crates stay oblivious to where the vectors and tokens come from.
//!
//! ```text
//! ┌─────────────────┐    ┌──────────────────┐    ┌─────────────────┐
//! │   Your App      │───▶│   mneme-core     │◀───│   Providers     │
//! │                 │    │   (this crate)   │    │                 │
//! │ - Q&A over docs │    │                  │    │ - API backends  │
//! │ - Search        │    │ - EmbeddingModel │    │ - local models  │
//! │ - Assistants    │    │ - GenerativeModel│    │ - test mocks    │
//! └─────────────────┘    └──────────────────┘    └─────────────────┘
//! ```
//!
//! ## Supported capabilities
//!
//! | Capability | Trait | Description |
//! |------------|-------|-------------|
//! | **Embeddings** | [`EmbeddingModel`] | Convert text to vectors for semantic search |
//! | **Generation** | [`GenerativeModel`] | Stream tokens from a conversation |
//!
//! ## Examples
//!
//! ### Streaming a response
//!
//! [`GenerativeModel::respond`] returns a [`TokenStream`]: iterate it for tokens as they
//! arrive, or `.await` it for the aggregated final text.
//!
//! ```rust,ignore
//! use mneme_core::{GenerativeModel, Message};
//! use futures_lite::StreamExt;
//!
//! async fn stream_demo(model: impl GenerativeModel) {
//!     let mut stream = model.respond(vec![Message::user("Why is the sky blue?")]);
//!     while let Some(token) = stream.next().await {
//!         print!("{}", token.unwrap());
//!     }
//! }
//! ```
//!
//! ### Semantic search with embeddings
//!
//! ```rust
//! use mneme_core::EmbeddingModel;
//!
//! async fn embed_query(
//!     model: impl EmbeddingModel,
//!     query: &str,
//! ) -> mneme_core::Result<Vec<f32>> {
//!     let embedding = model.embed(query).await?;
//!     Ok(embedding)
//! }
//! ```
//!
//! ## Modules
//!
//! - [`embedding`] — turn text into dense vectors.
//! - [`llm`] — messages, provider traits, token streams.

#![no_std]
extern crate alloc;
#[cfg(test)]
extern crate std;

/// Text embeddings.
pub mod embedding;
pub mod llm;

use alloc::string::String;

#[doc(inline)]
pub use embedding::{Embedding, EmbeddingModel};
#[doc(inline)]
pub use llm::{GenerativeModel, Message, Prompt, Role, TextFuture, TextStream, TokenStream};

/// Result type used throughout the crate.
///
/// Type alias for [`anyhow::Result<T>`](anyhow::Result) with [`String`] as default success type.
pub type Result<T = String> = anyhow::Result<T>;

pub use anyhow::Error;
