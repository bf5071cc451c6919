//! # Embedding Module
//!
//! This module provides types and traits for working with text embeddings.
//!
//! ## What are Embeddings?
//!
//! Embeddings are dense vector representations of text that capture semantic meaning.
//! Similar texts produce similar embedding vectors, making them useful for:
//!
//! - **Semantic search**: Finding relevant documents based on meaning rather than exact keywords
//! - **Text similarity**: Measuring how similar two pieces of text are
//! - **Retrieval-augmented generation**: Selecting the context a language model answers from
//!
//! ## Embedding Models
//!
//! An embedding model is a neural network trained to convert text into meaningful vector
//! representations. Different models have different characteristics:
//!
//! - **Dimension**: The length of the embedding vector (e.g., 384, 768, 1536)
//! - **Domain**: Some models are optimized for specific types of content
//! - **Performance**: Trade-offs between speed, accuracy, and resource usage
//!
//! A model produces vectors of one fixed length. Consumers discover that length from the
//! vectors themselves (the vector stores in `mneme-rag` fix their dimension from the first
//! embedding they see), so the trait does not ask implementations to declare it up front.
//!
//! ## Usage
//!
//! This module provides the [`EmbeddingModel`] trait that abstracts over different
//! embedding implementations, allowing you to switch between providers while
//! maintaining the same interface.
//!
//! ```rust
//! use mneme_core::EmbeddingModel;
//!
//! async fn example<T: EmbeddingModel>(model: &T) -> mneme_core::Result<()> {
//!     // Bring the model up before use; a no-op for providers without warm-up.
//!     model.load().await?;
//!
//!     let embedding = model.embed("Hello, world!").await?;
//!     println!("{}-dimensional embedding", embedding.len());
//!
//!     model.unload().await?;
//!     Ok(())
//! }
//! ```

use alloc::vec::Vec;
use core::future::Future;

/// A type alias for an embedding vector of 32-bit floats.
///
/// Embeddings are dense vector representations where each dimension captures
/// different semantic features of the input text. The vector length is determined
/// by the embedding model's architecture.
pub type Embedding = Vec<f32>;

/// Converts text to vector representations.
///
/// This trait provides a unified interface for different embedding model implementations,
/// allowing you to switch between providers (API-backed, local, mock) while maintaining
/// the same API.
///
/// See the [module documentation](crate::embedding) for more details on embeddings and their use cases.
///
/// # Implementation Requirements
///
/// - Every vector returned by [`embed`](EmbeddingModel::embed) must have the same length
/// - [`load`](EmbeddingModel::load) must be idempotent: calling it on an already-loaded
///   model is a no-op, not an error
/// - Errors are surfaced unmodified; callers report them with their full chain intact
///
/// # Example
///
/// ```rust
/// use mneme_core::EmbeddingModel;
///
/// struct MyEmbedding {
///     api_key: String,
/// }
///
/// impl EmbeddingModel for MyEmbedding {
///     async fn embed(&self, text: &str) -> mneme_core::Result<Vec<f32>> {
///         // In a real implementation, this would call the embedding API
///         Ok(vec![0.0; 1536])
///     }
/// }
///
/// # tokio_test::block_on(async {
/// let model = MyEmbedding { api_key: "sk-...".to_string() };
/// let embedding = model.embed("The quick brown fox").await.unwrap();
/// assert_eq!(embedding.len(), 1536);
/// # });
/// ```
pub trait EmbeddingModel: Send + Sized + Sync {
    /// Prepares the model for use.
    ///
    /// Warm-up work (weight loading, connection setup) happens here. The default
    /// implementation does nothing; providers that keep state override it. Must be
    /// idempotent.
    fn load(&self) -> impl Future<Output = crate::Result<()>> + Send {
        async { Ok(()) }
    }

    /// Releases resources held by the model.
    ///
    /// The default implementation does nothing. After an unload, a subsequent
    /// [`load`](EmbeddingModel::load) must bring the model back to a usable state.
    fn unload(&self) -> impl Future<Output = crate::Result<()>> + Send {
        async { Ok(()) }
    }

    /// Converts text to an embedding vector.
    ///
    /// # Arguments
    ///
    /// * `text` - The input text to embed. Can be a word, sentence, paragraph, or document.
    ///
    /// # Returns
    ///
    /// A [`Vec<f32>`] whose length is fixed by the model's architecture. The vector
    /// represents the semantic meaning of the input text in high-dimensional space.
    fn embed(&self, text: &str) -> impl Future<Output = crate::Result<Vec<f32>>> + Send;
}
