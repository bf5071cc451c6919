//! # Generative Models and Conversation Management
//!
//! This module provides everything you need to stream text from language models in a
//! provider-agnostic way. Build question answering, chat, and retrieval-augmented flows
//! without being tied to any specific AI service.
//!
//! ## Core Components
//!
//! - **[`GenerativeModel`]** - The main trait for streaming text generation
//! - **[`TokenStream`]** - Trait for responses that stream tokens and aggregate on await
//! - **[`TextStream`]** - Ready-made [`TokenStream`] adapter over any raw token source
//! - **[`Message`]** / **[`Role`]** - Individual messages in a conversation
//! - **[`Prompt`]** - Flexible input: a bare string or a full message list
//!
//! ## Quick Start
//!
//! ### Basic Conversation
//!
//! ```rust,ignore
//! use mneme_core::{GenerativeModel, Message};
//! use futures_lite::StreamExt;
//!
//! async fn chat(model: impl GenerativeModel) -> anyhow::Result<String> {
//!     let mut response = model.respond(vec![
//!         Message::system("You are a helpful assistant"),
//!         Message::user("What's the capital of Japan?"),
//!     ]);
//!
//!     let mut full_text = String::new();
//!     while let Some(token) = response.next().await {
//!         full_text.push_str(&token?);
//!     }
//!     Ok(full_text)
//! }
//! ```
//!
//! ### Collecting Instead of Streaming
//!
//! Every [`TokenStream`] is also an [`IntoFuture`], so callers that do not care about
//! incremental tokens simply `.await` the response:
//!
//! ```rust,ignore
//! use mneme_core::{GenerativeModel, Message};
//!
//! async fn oneshot(model: impl GenerativeModel) -> Result<String, impl core::error::Error> {
//!     model.respond(vec![Message::user("Summarize RAG in one line.")]).await
//! }
//! ```

/// Message types and conversation handling.
pub mod message;
mod response;

use core::future::Future;

use alloc::{string::String, vec::Vec};
use futures_core::Stream;

pub use message::{Message, Prompt, Role};
pub use response::{TextFuture, TextStream};

/// Response stream from a generative model.
///
/// Iterating the stream yields tokens in generation order; awaiting the value yields the
/// aggregated final text. Both views observe the same generation pass: a token is part
/// of the aggregate from the moment it is yielded.
///
/// Implementors must also implement `IntoFuture` to allow collecting the full response;
/// [`TextStream`] does both over any raw token source.
pub trait TokenStream:
    Stream<Item = Result<String, Self::Error>>
    + IntoFuture<Output = Result<String, Self::Error>, IntoFuture: Send>
    + Send
{
    /// The error type returned by this response stream.
    type Error: core::error::Error + Send + Sync + 'static;
}

/// Language models for streaming text generation.
///
/// See the [module documentation](crate::llm) for examples and usage patterns.
pub trait GenerativeModel: Sized + Send + Sync {
    /// The error type returned by this model.
    type Error: core::error::Error + Send + Sync + 'static;

    /// Prepares the model for use.
    ///
    /// Warm-up work happens here; the default implementation does nothing. Must be
    /// idempotent.
    fn load(&self) -> impl Future<Output = Result<(), Self::Error>> + Send {
        async { Ok(()) }
    }

    /// Releases resources held by the model.
    ///
    /// The default implementation does nothing.
    fn unload(&self) -> impl Future<Output = Result<(), Self::Error>> + Send {
        async { Ok(()) }
    }

    /// Generates a streaming response to the conversation.
    fn respond(&self, messages: Vec<Message>) -> impl TokenStream<Error = Self::Error>;

    /// Requests cancellation of any in-flight generation.
    ///
    /// Best-effort: the model stops producing tokens as soon as it can, and streams
    /// already handed out simply end. Models without cancellation support keep the
    /// default no-op.
    fn interrupt(&self) -> impl Future<Output = ()> + Send {
        async {}
    }
}
