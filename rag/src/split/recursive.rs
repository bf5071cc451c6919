//! Recursive boundary-aware text splitting.

use std::collections::VecDeque;
use std::mem;

use unicode_segmentation::UnicodeSegmentation;

use super::TextSplitter;

const DEFAULT_CHUNK_SIZE: usize = 500;
const DEFAULT_OVERLAP: usize = 100;

/// Splits text recursively along a separator hierarchy.
///
/// The splitter tries each separator in order — paragraph breaks, then line
/// breaks, then spaces, then individual characters — and recurses into pieces
/// still longer than the chunk size with the next separator down. Short
/// pieces are merged back together up to the chunk size, carrying the
/// configured overlap across chunk boundaries. Sizes are measured in
/// characters and cuts never land inside a code point or grapheme.
#[derive(Clone, Debug)]
pub struct RecursiveCharacterSplitter {
    chunk_size: usize,
    overlap: usize,
    separators: Vec<String>,
}

impl RecursiveCharacterSplitter {
    /// Creates a splitter with the given chunk size and overlap, both in
    /// characters.
    ///
    /// # Panics
    /// Panics if `overlap >= chunk_size`.
    #[must_use]
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        assert!(
            overlap < chunk_size,
            "overlap ({overlap}) must be less than chunk_size ({chunk_size})"
        );
        Self {
            chunk_size,
            overlap,
            separators: ["\n\n", "\n", " ", ""]
                .into_iter()
                .map(str::to_owned)
                .collect(),
        }
    }

    /// Replaces the separator hierarchy. The empty string, if present, splits
    /// between every grapheme and should come last.
    #[must_use]
    pub fn with_separators<I, S>(mut self, separators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.separators = separators.into_iter().map(Into::into).collect();
        self
    }

    fn split(&self, text: &str) -> Vec<String> {
        let separators: Vec<&str> = self.separators.iter().map(String::as_str).collect();
        self.split_with(text, &separators)
    }

    fn split_with(&self, text: &str, separators: &[&str]) -> Vec<String> {
        let mut separator = separators.last().copied().unwrap_or("");
        let mut rest: &[&str] = &[];
        for (index, candidate) in separators.iter().enumerate() {
            if candidate.is_empty() || text.contains(candidate) {
                separator = candidate;
                rest = &separators[index + 1..];
                break;
            }
        }

        let pieces = split_keep_separator(text, separator);

        let mut chunks = Vec::new();
        let mut short = Vec::new();
        for piece in pieces {
            if char_len(&piece) <= self.chunk_size {
                short.push(piece);
            } else {
                // Flush what came before, then cut the long piece finer.
                if !short.is_empty() {
                    chunks.extend(self.merge(mem::take(&mut short)));
                }
                if rest.is_empty() {
                    chunks.extend(self.hard_split(&piece));
                } else {
                    chunks.extend(self.split_with(&piece, rest));
                }
            }
        }
        if !short.is_empty() {
            chunks.extend(self.merge(short));
        }
        chunks
    }

    /// Packs consecutive short pieces into chunks up to `chunk_size`,
    /// re-seeding each new chunk with up to `overlap` trailing characters of
    /// the previous one.
    fn merge(&self, pieces: Vec<String>) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut window: VecDeque<String> = VecDeque::new();
        let mut window_len = 0usize;

        for piece in pieces {
            let piece_len = char_len(&piece);
            if window_len + piece_len > self.chunk_size && window_len > 0 {
                push_chunk(&mut chunks, window.iter());
                while !window.is_empty()
                    && (window_len > self.overlap || window_len + piece_len > self.chunk_size)
                {
                    let front = window.pop_front().unwrap_or_default();
                    window_len -= char_len(&front);
                }
            }
            window.push_back(piece);
            window_len += piece_len;
        }
        if !window.is_empty() {
            push_chunk(&mut chunks, window.iter());
        }
        chunks
    }

    /// Last resort for a piece with no usable separator: grapheme windows of
    /// `chunk_size` advancing by `chunk_size - overlap`.
    fn hard_split(&self, text: &str) -> Vec<String> {
        let graphemes: Vec<&str> = text.graphemes(true).collect();
        let step = self.chunk_size - self.overlap;
        let mut chunks = Vec::new();
        let mut start = 0;
        while start < graphemes.len() {
            let end = (start + self.chunk_size).min(graphemes.len());
            chunks.push(graphemes[start..end].concat());
            if end == graphemes.len() {
                break;
            }
            start += step;
        }
        chunks
    }
}

impl Default for RecursiveCharacterSplitter {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP)
    }
}

impl TextSplitter for RecursiveCharacterSplitter {
    async fn split_text(&self, text: &str) -> mneme_core::Result<Vec<String>> {
        Ok(self.split(text))
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Splits on `separator`, keeping it at the end of each piece so chunks can
/// be rebuilt by plain concatenation. The empty separator yields graphemes.
fn split_keep_separator(text: &str, separator: &str) -> Vec<String> {
    if separator.is_empty() {
        text.graphemes(true).map(str::to_owned).collect()
    } else {
        text.split_inclusive(separator).map(str::to_owned).collect()
    }
}

fn push_chunk<'a>(chunks: &mut Vec<String>, pieces: impl Iterator<Item = &'a String>) {
    let joined: String = pieces.map(String::as_str).collect();
    let trimmed = joined.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_owned());
    }
}
