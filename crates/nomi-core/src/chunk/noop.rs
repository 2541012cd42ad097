use crate::types::{EntitySpan, Token};

use super::{Chunk, Chunker};

/// Passes the whole document through as a single chunk with id 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpChunker;

impl NoOpChunker {
    /// Creates a new no-op chunker.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Chunker for NoOpChunker {
    fn chunk(&self, text: &str, tokens: &[Token], entities: &[EntitySpan]) -> Vec<Chunk> {
        vec![Chunk {
            chunk_id: 0,
            text: text.to_string(),
            tokens: tokens.to_vec(),
            entities: entities.to_vec(),
        }]
    }
}
