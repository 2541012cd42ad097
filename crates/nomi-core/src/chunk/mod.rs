//! # Chunkers
//!
//! Split a tokenized document into self-contained windows so long inputs
//! fit model length constraints. Every chunk re-bases token and entity
//! offsets to be chunk-relative; the alignment core downstream never sees
//! document-absolute offsets.

mod fixed;
mod noop;
mod sliding;

use serde::{Deserialize, Serialize};

use crate::types::{EntitySpan, Token};

pub use fixed::FixedLengthChunker;
pub use noop::NoOpChunker;
pub use sliding::SlidingWindowChunker;

/// One self-contained window of a document.
///
/// Token and entity offsets index into `text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Chunk number within the source document, starting at 0.
    pub chunk_id: usize,
    /// Window text.
    pub text: String,
    /// Tokens fully inside the window, offsets re-based to `text`.
    pub tokens: Vec<Token>,
    /// Entities fully inside the window, offsets re-based to `text`.
    pub entities: Vec<EntitySpan>,
}

/// Splits a document into chunks.
///
/// Implementations must keep only tokens and entities fully inside each
/// window and shift their offsets by the window start, preserving the
/// crate-wide offset convention within every chunk.
pub trait Chunker {
    /// Chunks one document.
    fn chunk(&self, text: &str, tokens: &[Token], entities: &[EntitySpan]) -> Vec<Chunk>;
}

/// Shifts a token's offsets left by `base`.
pub(crate) fn shift_token(token: &Token, base: usize) -> Token {
    Token::new(token.id, token.text.as_str(), token.start - base, token.end - base)
}

/// Shifts an entity's offsets left by `base`, keeping text and attributes.
pub(crate) fn shift_entity(entity: &EntitySpan, base: usize) -> EntitySpan {
    let mut shifted = entity.clone();
    shifted.start -= base;
    shifted.end -= base;
    shifted
}
