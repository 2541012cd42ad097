use crate::types::{EntitySpan, Token};

use super::{shift_entity, shift_token, Chunk, Chunker};

/// Splits a document into overlapping character windows of `window_size`
/// bytes, stepping by `stride` bytes.
///
/// Window boundaries are snapped to character boundaries so multi-byte
/// text never gets cut mid-character. Tokens and entities are kept only
/// when fully inside the window, with offsets shifted by the window start.
#[derive(Debug, Clone, Copy)]
pub struct SlidingWindowChunker {
    window_size: usize,
    stride: usize,
}

impl Default for SlidingWindowChunker {
    fn default() -> Self {
        Self::new(512, 256)
    }
}

impl SlidingWindowChunker {
    /// Creates a chunker with the given window size and stride, both
    /// clamped to at least 1.
    #[must_use]
    pub fn new(window_size: usize, stride: usize) -> Self {
        Self {
            window_size: window_size.max(1),
            stride: stride.max(1),
        }
    }
}

/// Largest char boundary less than or equal to `index`.
fn snap_down(text: &str, mut index: usize) -> usize {
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Smallest char boundary greater than or equal to `index`.
fn snap_up(text: &str, mut index: usize) -> usize {
    while index < text.len() && !text.is_char_boundary(index) {
        index += 1;
    }
    index
}

impl Chunker for SlidingWindowChunker {
    fn chunk(&self, text: &str, tokens: &[Token], entities: &[EntitySpan]) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut offset = 0;

        while offset < text.len() {
            let window_start = snap_up(text, offset);
            if window_start >= text.len() {
                break;
            }
            let window_end = snap_down(text, (window_start + self.window_size).min(text.len()));

            let chunk_tokens: Vec<Token> = tokens
                .iter()
                .filter(|token| token.start >= window_start && token.end <= window_end)
                .map(|token| shift_token(token, window_start))
                .collect();
            let chunk_entities: Vec<EntitySpan> = entities
                .iter()
                .filter(|entity| entity.start >= window_start && entity.end <= window_end)
                .map(|entity| shift_entity(entity, window_start))
                .collect();

            chunks.push(Chunk {
                chunk_id: chunks.len(),
                text: text[window_start..window_end].to_string(),
                tokens: chunk_tokens,
                entities: chunk_entities,
            });

            offset += self.stride;
        }

        chunks
    }
}
