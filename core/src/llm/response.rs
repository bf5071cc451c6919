use alloc::string::String;
use core::{
    future::Future,
    mem,
    pin::Pin,
    task::{Context, Poll},
};
use futures_core::Stream;
use pin_project_lite::pin_project;

use super::TokenStream;

pin_project! {
    /// [`TokenStream`] implementation that adapts a raw provider stream.
    ///
    /// Providers feed a base stream of token results. This adapter forwards each token to
    /// the consumer while accumulating the full response text, so the same value can be
    /// iterated for tokens or awaited for the aggregated result.
    ///
    /// A token is appended to the accumulated response BEFORE the consumer observes it:
    /// whenever a token has been yielded, [`TextStream::response`] already contains it.
    pub struct TextStream<S, E> {
        #[pin]
        inner: S,
        collected: String,
        stream_error: Option<E>,
        finished: bool,
    }
}

impl<S, E> TextStream<S, E>
where
    S: Stream<Item = Result<String, E>>,
{
    /// Creates a new adapter over a provider token stream.
    #[must_use]
    pub const fn new(stream: S) -> Self {
        Self {
            inner: stream,
            collected: String::new(),
            stream_error: None,
            finished: false,
        }
    }

    /// Returns the response text accumulated so far.
    #[must_use]
    pub fn response(&self) -> &str {
        &self.collected
    }
}

impl<S, E> Stream for TextStream<S, E>
where
    S: Stream<Item = Result<String, E>>,
{
    type Item = Result<String, E>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            let mut this = self.as_mut().project();
            if let Some(err) = this.stream_error.take() {
                return Poll::Ready(Some(Err(err)));
            }

            if *this.finished {
                return Poll::Ready(None);
            }

            match this.inner.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(token))) => {
                    if token.is_empty() {
                        continue;
                    }
                    this.collected.push_str(&token);
                    return Poll::Ready(Some(Ok(token)));
                }
                Poll::Ready(Some(Err(err))) => {
                    // The stream ends at the first error.
                    *this.finished = true;
                    *this.stream_error = Some(err);
                }
                Poll::Ready(None) => {
                    *this.finished = true;
                    return Poll::Ready(None);
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

impl<S, E> TokenStream for TextStream<S, E>
where
    S: Stream<Item = Result<String, E>> + Send,
    E: core::error::Error + Send + Sync + 'static,
{
    type Error = E;
}

pin_project! {
    /// Future returned when awaiting a [`TextStream`].
    pub struct TextFuture<S, E> {
        #[pin]
        response: Option<TextStream<S, E>>,
    }
}

impl<S, E> Future for TextFuture<S, E>
where
    S: Stream<Item = Result<String, E>> + Send,
{
    type Output = Result<String, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();
        let mut response = this.response.as_mut().as_pin_mut().map_or_else(
            || panic!("response future already completed"),
            |stream| stream,
        );

        loop {
            match response.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(_))) => {}
                Poll::Ready(Some(Err(err))) => {
                    this.response.set(None);
                    return Poll::Ready(Err(err));
                }
                Poll::Ready(None) => {
                    let projection = response.as_mut().project();
                    let collected = mem::take(projection.collected);
                    this.response.set(None);
                    return Poll::Ready(Ok(collected));
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

impl<S, E> IntoFuture for TextStream<S, E>
where
    S: Stream<Item = Result<String, E>> + Send,
    E: core::error::Error + Send + Sync + 'static,
{
    type Output = Result<String, E>;
    type IntoFuture = TextFuture<S, E>;

    fn into_future(self) -> Self::IntoFuture {
        TextFuture {
            response: Some(self),
        }
    }
}
