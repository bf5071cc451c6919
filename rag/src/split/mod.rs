//! Text splitting strategies for ingestion.
//!
//! This module provides the [`TextSplitter`] trait and implementations for
//! breaking a long document into smaller strings before embedding. Different
//! strategies suit different content:
//!
//! - [`RecursiveCharacterSplitter`]: boundary-aware recursive splitting, the
//!   orchestrator's default
//! - [`FixedSizeSplitter`]: plain character windows with overlap

mod fixed;
mod recursive;

pub use fixed::FixedSizeSplitter;
pub use recursive::RecursiveCharacterSplitter;

use core::future::Future;

/// Splits a document into an ordered list of chunk strings.
///
/// Chunking strategy and boundary preservation are the splitter's concern;
/// consumers only rely on chunk order. Errors are splitter-specific and
/// surface unmodified.
pub trait TextSplitter: Send + Sync {
    /// Splits `text` into chunks, in document order.
    fn split_text(&self, text: &str) -> impl Future<Output = mneme_core::Result<Vec<String>>> + Send;
}
