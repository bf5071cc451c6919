//! Fixed-size text splitting.

use super::TextSplitter;

/// Splits text into fixed-size character windows with configurable overlap.
///
/// Windows back off to the nearest whitespace where possible so cuts land
/// between words. Sizes are measured in characters, so multi-byte text is
/// never cut inside a code point.
#[derive(Debug, Clone)]
pub struct FixedSizeSplitter {
    chunk_size: usize,
    overlap: usize,
}

impl FixedSizeSplitter {
    /// Creates a splitter with the given window size and overlap, both in
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
        }
    }

    fn split(&self, text: &str) -> Vec<String> {
        // Byte offset of every character boundary, so windows can be cut by
        // character count without landing inside a code point.
        let bounds: Vec<usize> = text
            .char_indices()
            .map(|(offset, _)| offset)
            .chain(Some(text.len()))
            .collect();
        let total = bounds.len() - 1;

        if total <= self.chunk_size {
            let trimmed = text.trim();
            return if trimmed.is_empty() {
                Vec::new()
            } else {
                vec![trimmed.to_owned()]
            };
        }

        let mut chunks = Vec::new();
        let mut start = 0usize;
        while start < total {
            let end = (start + self.chunk_size).min(total);
            let window = &text[bounds[start]..bounds[end]];

            // Back off to a whitespace boundary unless this is the final window.
            let cut = if end < total {
                window
                    .rfind(char::is_whitespace)
                    .map_or(bounds[end], |pos| bounds[start] + pos)
            } else {
                bounds[end]
            };
            if cut <= bounds[start] {
                break;
            }

            let chunk = text[bounds[start]..cut].trim();
            if !chunk.is_empty() {
                chunks.push(chunk.to_owned());
            }
            if end == total {
                break;
            }

            let cut_char = bounds.partition_point(|bound| *bound < cut);
            let next = cut_char.saturating_sub(self.overlap);
            start = if next > start { next } else { cut_char };
        }
        chunks
    }
}

impl Default for FixedSizeSplitter {
    fn default() -> Self {
        Self::new(512, 64)
    }
}

impl TextSplitter for FixedSizeSplitter {
    async fn split_text(&self, text: &str) -> mneme_core::Result<Vec<String>> {
        Ok(self.split(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_one_chunk() {
        let splitter = FixedSizeSplitter::new(100, 20);
        assert_eq!(splitter.split("Short text"), ["Short text"]);
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        let splitter = FixedSizeSplitter::new(100, 20);
        assert!(splitter.split("").is_empty());
        assert!(splitter.split("   ").is_empty());
    }

    #[test]
    fn long_text_splits_at_word_boundaries() {
        let splitter = FixedSizeSplitter::new(25, 5);
        let text = "This is a longer text that should be split into several chunks for testing.";
        let chunks = splitter.split(text);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 25);
            assert!(!chunk.starts_with(' ') && !chunk.ends_with(' '));
        }
        assert!(chunks[0].starts_with("This is"));
        assert!(chunks.last().unwrap().ends_with("testing."));
    }

    #[test]
    fn windows_overlap() {
        let splitter = FixedSizeSplitter::new(20, 8);
        let chunks = splitter.split("alpha beta gamma delta epsilon zeta eta theta");

        assert!(chunks.len() > 1);
        // Overlap carries the tail of each window into the next one.
        for pair in chunks.windows(2) {
            let last_word = pair[0].split_whitespace().last().unwrap();
            assert!(pair[1].contains(last_word));
        }
    }

    #[test]
    fn multibyte_text_is_cut_on_character_boundaries() {
        let splitter = FixedSizeSplitter::new(10, 2);
        let chunks = splitter.split(&"汎用人工知能の研究開発は続く".repeat(4));

        assert!(!chunks.is_empty());
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 10);
        }
    }

    #[test]
    #[should_panic(expected = "overlap")]
    fn overlap_must_be_less_than_chunk_size() {
        let _ = FixedSizeSplitter::new(50, 50);
    }

    #[tokio::test]
    async fn split_text_returns_chunks_in_order() {
        let splitter = FixedSizeSplitter::default();
        let chunks = splitter.split_text("one two three").await.unwrap();
        assert_eq!(chunks, ["one two three"]);
    }
}
