use serde::{Deserialize, Serialize};

/// A token produced by a tokenizer, with byte offsets into the source text.
///
/// Offsets follow the convention used everywhere in this crate: `start` is
/// inclusive, `end` is exclusive, and both index into the UTF-8 source text.
/// Tokenizers must emit tokens in left-to-right, non-overlapping order with
/// `start <= end`. The `id` is tokenizer-internal and opaque; it need not be
/// unique or ordered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// Tokenizer-internal identifier (vocabulary id for subword tokenizers).
    pub id: u32,
    /// Surface form of the token.
    pub text: String,
    /// Start byte offset in the source text (inclusive).
    pub start: usize,
    /// End byte offset in the source text (exclusive).
    pub end: usize,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(id: u32, text: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            id,
            text: text.into(),
            start,
            end,
        }
    }
}
