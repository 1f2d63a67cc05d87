//! Splitting a document into fixed-stride chunks.
//!
//! Chunks are cut at fixed character strides with no regard to word
//! boundaries: a word straddling a cut is tallied as two partial tokens
//! downstream. Known accuracy caveat, kept deliberately.

/// A contiguous span of the document, as byte offsets on char boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkSpan {
    /// Byte offset of the first character
    pub start: usize,

    /// Byte offset one past the last character
    pub end: usize,
}

impl ChunkSpan {
    /// Get the substring this span covers.
    pub fn slice<'a>(&self, document: &'a str) -> &'a str {
        &document[self.start..self.end]
    }

    /// Span length in bytes.
    pub fn len_bytes(&self) -> usize {
        self.end - self.start
    }
}

/// Split `text` into contiguous spans of `max(chars / num_chunks, 1)`
/// characters each.
///
/// The stride is computed by integer division, so the number of spans can
/// exceed `num_chunks` when the division is uneven; the final span absorbs
/// the remainder and may be shorter than the stride. Concatenating the
/// spans in order reconstructs `text` exactly. Empty text yields no spans.
pub fn split_document(text: &str, num_chunks: usize) -> Vec<ChunkSpan> {
    if text.is_empty() {
        return Vec::new();
    }

    let char_count = text.chars().count();
    let chunk_size = (char_count / num_chunks.max(1)).max(1);

    let mut spans = Vec::with_capacity(char_count.div_ceil(chunk_size));
    let mut start = 0;
    let mut chars_in_span = 0;
    for (offset, _) in text.char_indices() {
        if chars_in_span == chunk_size {
            spans.push(ChunkSpan { start, end: offset });
            start = offset;
            chars_in_span = 0;
        }
        chars_in_span += 1;
    }
    spans.push(ChunkSpan {
        start,
        end: text.len(),
    });
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reconstruct(text: &str, spans: &[ChunkSpan]) -> String {
        spans.iter().map(|s| s.slice(text)).collect()
    }

    #[test]
    fn test_chunks_reconstruct_document() {
        let texts = [
            "The quick brown fox jumps over the lazy dog",
            "a",
            "  leading and trailing  ",
            "Привіт, світе! Багатобайтові символи.",
        ];
        for text in texts {
            for k in 1..=8 {
                let spans = split_document(text, k);
                assert_eq!(reconstruct(text, &spans), text, "text={:?} k={}", text, k);
            }
        }
    }

    #[test]
    fn test_empty_text_yields_no_spans() {
        for k in 1..=4 {
            assert!(split_document("", k).is_empty());
        }
    }

    #[test]
    fn test_single_chunk_covers_everything() {
        let text = "one two three";
        let spans = split_document(text, 1);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].slice(text), text);
    }

    #[test]
    fn test_chunk_count_can_exceed_request() {
        // 10 chars / 4 chunks = stride 2, which cuts 5 spans.
        let text = "abcdefghij";
        let spans = split_document(text, 4);
        assert_eq!(spans.len(), 5);
        for span in &spans {
            assert_eq!(span.len_bytes(), 2);
        }
        assert_eq!(reconstruct(text, &spans), text);
    }

    #[test]
    fn test_final_span_absorbs_remainder() {
        // 7 chars / 3 chunks = stride 2: spans of 2, 2, 2, 1.
        let text = "abcdefg";
        let spans = split_document(text, 3);
        let lengths: Vec<usize> = spans.iter().map(|s| s.len_bytes()).collect();
        assert_eq!(lengths, vec![2, 2, 2, 1]);
    }

    #[test]
    fn test_more_chunks_than_chars() {
        // Stride clamps to one char per span.
        let text = "abc";
        let spans = split_document(text, 10);
        assert_eq!(spans.len(), 3);
        assert_eq!(reconstruct(text, &spans), text);
    }

    #[test]
    fn test_spans_cut_on_char_boundaries() {
        // Multi-byte chars: every span must slice without panicking.
        let text = "ааббвв";
        for k in 1..=6 {
            let spans = split_document(text, k);
            assert_eq!(reconstruct(text, &spans), text);
        }
    }
}
