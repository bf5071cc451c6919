//! High-level RAG orchestrator.
//!
//! [`Rag`] composes a [`VectorStore`] with a [`GenerativeModel`]: ingestion
//! splits, embeds, and stores documents; generation retrieves context for the
//! question, folds it into the prompt, and streams the model's answer.

use std::pin::Pin;
use std::sync::Arc;

use async_stream::try_stream;
use futures_core::Stream;
use futures_lite::StreamExt;
use mneme_core::{GenerativeModel, Message, Prompt, TextFuture, TextStream, TokenStream};
use tracing::debug;

use crate::error::{RagError, Result};
use crate::request::{AddRequest, DeleteRequest, QueryRequest, UpdateRequest};
use crate::split::{RecursiveCharacterSplitter, TextSplitter};
use crate::store::VectorStore;
use crate::types::{Metadata, Predicate, QueryResult, Record};

/// Derives the retrieval question from the conversation.
type QuestionFn = Box<dyn Fn(&[Message]) -> String + Send + Sync>;
/// Builds the augmented prompt from the question and the retrieved texts.
type PromptFn = Box<dyn Fn(&str, &[String]) -> String + Send + Sync>;

struct RagInner<S, G, T> {
    store: S,
    model: G,
    splitter: T,
}

/// Orchestrator over a vector store, a generative model, and a text splitter.
///
/// Cloning is cheap: clones share the same collaborators. The splitter is
/// chosen at construction time ([`RecursiveCharacterSplitter`] with the
/// default 500/100 configuration unless [`Rag::builder`] swaps it).
pub struct Rag<S, G, T = RecursiveCharacterSplitter> {
    inner: Arc<RagInner<S, G, T>>,
}

impl<S, G, T> Clone for Rag<S, G, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S, G, T> core::fmt::Debug for Rag<S, G, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Rag").finish_non_exhaustive()
    }
}

impl<S, G> Rag<S, G>
where
    S: VectorStore,
    G: GenerativeModel,
{
    /// Creates an orchestrator with the default text splitter.
    #[must_use]
    pub fn new(store: S, model: G) -> Self {
        Self::builder(store, model).build()
    }

    /// Creates a builder for swapping in a custom text splitter.
    #[must_use]
    pub fn builder(store: S, model: G) -> RagBuilder<S, G> {
        RagBuilder {
            store,
            model,
            splitter: RecursiveCharacterSplitter::default(),
        }
    }
}

impl<S, G, T> Rag<S, G, T>
where
    S: VectorStore,
    G: GenerativeModel,
    T: TextSplitter,
{
    /// Loads the vector store (which warms its embedding provider), then the
    /// generative model. Both must be ready before [`generate`](Self::generate).
    pub async fn load(&self) -> Result<()> {
        self.inner.store.load().await?;
        self.inner.model.load().await.map_err(model_error)
    }

    /// Unloads the model, then the store; symmetric teardown of
    /// [`load`](Self::load).
    pub async fn unload(&self) -> Result<()> {
        self.inner.model.unload().await.map_err(model_error)?;
        self.inner.store.unload().await
    }

    /// Splits a document and stores every chunk in one batch.
    ///
    /// Returns the generated ids in chunk order.
    pub async fn split_add(&self, document: &str) -> Result<Vec<String>> {
        let chunks = self.split(document).await?;
        if chunks.is_empty() {
            return Ok(Vec::new());
        }
        self.inner.store.add(AddRequest::documents(chunks)).await
    }

    /// Splits a document, derives one metadata mapping per chunk via
    /// `annotate`, and stores everything in one batch.
    ///
    /// # Errors
    ///
    /// Fails with [`RagError::ShapeMismatch`] before anything is stored if
    /// `annotate` does not return exactly one mapping per chunk.
    pub async fn split_add_with<F>(&self, document: &str, annotate: F) -> Result<Vec<String>>
    where
        F: FnOnce(&[String]) -> Vec<Metadata>,
    {
        let chunks = self.split(document).await?;
        let metadatas = annotate(&chunks);
        if metadatas.len() != chunks.len() {
            return Err(RagError::ShapeMismatch {
                expected: chunks.len(),
                actual: metadatas.len(),
            });
        }
        if chunks.is_empty() {
            return Ok(Vec::new());
        }
        self.inner
            .store
            .add(AddRequest::documents(chunks).with_metadatas(metadatas))
            .await
    }

    /// Inserts records directly; see [`VectorStore::add`].
    pub async fn add(&self, request: AddRequest) -> Result<Vec<String>> {
        self.inner.store.add(request).await
    }

    /// Updates records in place; see [`VectorStore::update`].
    pub async fn update(&self, request: UpdateRequest) -> Result<()> {
        self.inner.store.update(request).await
    }

    /// Removes records; see [`VectorStore::delete`].
    pub async fn delete(&self, request: DeleteRequest) -> Result<()> {
        self.inner.store.delete(request).await
    }

    /// Answers similarity queries; see [`VectorStore::query`].
    pub async fn query(&self, request: QueryRequest) -> Result<Vec<Vec<QueryResult>>> {
        self.inner.store.query(request).await
    }

    /// Starts a generation pass and returns its token stream.
    ///
    /// Input validation happens here, before the returned [`Generation`] is
    /// polled; retrieval and the model call run lazily on first poll.
    /// Augmented mode retrieves context once, appends the augmented prompt as
    /// a trailing user message, and only then calls the model; retrieval,
    /// prompt assembly, and generation are strictly ordered.
    ///
    /// # Errors
    ///
    /// [`RagError::EmptyInput`] if the prompt normalizes to no messages, and
    /// [`RagError::MissingContent`] if augmented generation is asked to work
    /// from an empty last message.
    pub fn generate(&self, request: GenerateRequest) -> Result<Generation>
    where
        S: 'static,
        G: 'static,
        T: 'static,
    {
        let GenerateRequest {
            prompt,
            augmented,
            n_results,
            predicate,
            question_fn,
            prompt_fn,
        } = request;

        let mut messages = prompt.into_messages();
        if messages.is_empty() {
            return Err(RagError::EmptyInput);
        }
        if augmented && messages.last().is_some_and(|last| last.content.is_empty()) {
            return Err(RagError::MissingContent);
        }

        let inner = Arc::clone(&self.inner);
        let tokens: TokenSource = Box::pin(try_stream! {
            if augmented {
                let question = question_fn.as_ref().map_or_else(
                    || messages.last().map(|last| last.content.clone()).unwrap_or_default(),
                    |derive| derive(&messages),
                );
                debug!(n_results, "retrieving context");
                let request = QueryRequest {
                    texts: Some(vec![question.clone()]),
                    embeddings: None,
                    n_results: Some(n_results),
                    ids: None,
                    predicate,
                };
                let mut ranked = inner.store.query(request).await?;
                let retrieved: Vec<String> = ranked
                    .pop()
                    .unwrap_or_default()
                    .into_iter()
                    .filter_map(|result| result.record.document)
                    .collect();
                debug!(retrieved = retrieved.len(), "assembling augmented prompt");

                let augmented_prompt = prompt_fn.as_ref().map_or_else(
                    || default_prompt(&question, &retrieved),
                    |build| build(&question, &retrieved),
                );
                messages.push(Message::user(augmented_prompt));
            }

            let mut response = Box::pin(inner.model.respond(messages));
            while let Some(token) = response.next().await {
                yield token.map_err(model_error)?;
            }
        });

        Ok(Generation {
            stream: TextStream::new(tokens),
        })
    }

    /// Requests cancellation of any in-flight generation.
    ///
    /// Best-effort and asynchronous: the model stops when it can, and the
    /// returned text of a running [`Generation`] may not reflect immediate
    /// termination. Store operations are unaffected.
    pub async fn interrupt(&self) {
        self.inner.model.interrupt().await;
    }

    async fn split(&self, document: &str) -> Result<Vec<String>> {
        self.inner
            .splitter
            .split_text(document)
            .await
            .map_err(RagError::Split)
    }
}

fn model_error<E>(err: E) -> RagError
where
    E: core::error::Error + Send + Sync + 'static,
{
    RagError::Generation(anyhow::Error::new(err))
}

fn default_prompt(question: &str, context: &[String]) -> String {
    format!(
        "Use the following context to answer the question.\n\n\
         Context:\n{}\n\nQuestion: {question}",
        context.join("\n")
    )
}

/// Builder for a [`Rag`] with a custom text splitter.
pub struct RagBuilder<S, G, T = RecursiveCharacterSplitter> {
    store: S,
    model: G,
    splitter: T,
}

impl<S, G, T> core::fmt::Debug for RagBuilder<S, G, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RagBuilder").finish_non_exhaustive()
    }
}

impl<S, G, T> RagBuilder<S, G, T>
where
    S: VectorStore,
    G: GenerativeModel,
    T: TextSplitter,
{
    /// Swaps in a custom text splitter.
    #[must_use]
    pub fn splitter<T2: TextSplitter>(self, splitter: T2) -> RagBuilder<S, G, T2> {
        RagBuilder {
            store: self.store,
            model: self.model,
            splitter,
        }
    }

    /// Builds the orchestrator.
    #[must_use]
    pub fn build(self) -> Rag<S, G, T> {
        Rag {
            inner: Arc::new(RagInner {
                store: self.store,
                model: self.model,
                splitter: self.splitter,
            }),
        }
    }
}

/// Parameters for one [`Rag::generate`] call.
pub struct GenerateRequest {
    prompt: Prompt,
    augmented: bool,
    n_results: usize,
    predicate: Option<Predicate>,
    question_fn: Option<QuestionFn>,
    prompt_fn: Option<PromptFn>,
}

impl GenerateRequest {
    /// Creates a request with augmented generation on and three retrieved
    /// results per question.
    #[must_use]
    pub fn new(prompt: impl Into<Prompt>) -> Self {
        Self {
            prompt: prompt.into(),
            augmented: true,
            n_results: 3,
            predicate: None,
            question_fn: None,
            prompt_fn: None,
        }
    }

    /// Enables or disables retrieval; when disabled the messages go to the
    /// model untouched.
    #[must_use]
    pub const fn with_augmented(mut self, augmented: bool) -> Self {
        self.augmented = augmented;
        self
    }

    /// Sets how many retrieved results feed the augmented prompt.
    #[must_use]
    pub const fn with_n_results(mut self, n_results: usize) -> Self {
        self.n_results = n_results;
        self
    }

    /// Filters retrieved records after scoring.
    #[must_use]
    pub fn with_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Record) -> bool + Send + Sync + 'static,
    {
        self.predicate = Some(Arc::new(predicate));
        self
    }

    /// Overrides how the retrieval question is derived from the messages
    /// (default: the last message's content).
    #[must_use]
    pub fn with_question_fn<F>(mut self, derive: F) -> Self
    where
        F: Fn(&[Message]) -> String + Send + Sync + 'static,
    {
        self.question_fn = Some(Box::new(derive));
        self
    }

    /// Overrides how the augmented prompt is built from the question and the
    /// retrieved texts.
    #[must_use]
    pub fn with_prompt_fn<F>(mut self, build: F) -> Self
    where
        F: Fn(&str, &[String]) -> String + Send + Sync + 'static,
    {
        self.prompt_fn = Some(Box::new(build));
        self
    }
}

impl core::fmt::Debug for GenerateRequest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GenerateRequest")
            .field("prompt", &self.prompt)
            .field("augmented", &self.augmented)
            .field("n_results", &self.n_results)
            .finish_non_exhaustive()
    }
}

type TokenSource = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

/// Token stream produced by [`Rag::generate`].
///
/// Iterate it for tokens as the model produces them, or `.await` it for the
/// aggregated final text. Each token joins the observable
/// [`response`](Self::response) before the consumer sees it.
pub struct Generation {
    stream: TextStream<TokenSource, RagError>,
}

impl Generation {
    /// Returns the response text accumulated so far.
    #[must_use]
    pub fn response(&self) -> &str {
        self.stream.response()
    }
}

impl core::fmt::Debug for Generation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Generation")
            .field("response", &self.stream.response())
            .finish_non_exhaustive()
    }
}

impl Stream for Generation {
    type Item = Result<String>;

    fn poll_next(
        mut self: Pin<&mut Self>,
        cx: &mut core::task::Context<'_>,
    ) -> core::task::Poll<Option<Self::Item>> {
        Pin::new(&mut self.stream).poll_next(cx)
    }
}

impl IntoFuture for Generation {
    type Output = Result<String>;
    type IntoFuture = TextFuture<TokenSource, RagError>;

    fn into_future(self) -> Self::IntoFuture {
        self.stream.into_future()
    }
}

impl TokenStream for Generation {
    type Error = RagError;
}
