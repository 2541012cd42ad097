//! # Tokenizers
//!
//! Adapters producing [`Token`](crate::types::Token) sequences with byte
//! offsets into the source text. The alignment core treats tokenizers as
//! opaque; anything that honors the offset convention plugs in.

#[cfg(feature = "hf")]
mod hf;
mod whitespace;

use crate::error::Result;
use crate::types::Token;

#[cfg(feature = "hf")]
pub use hf::HuggingFaceTokenizer;
pub use whitespace::WhitespaceTokenizer;

/// Converts raw text into tokens with byte offsets.
///
/// Implementations must emit tokens in left-to-right, non-overlapping
/// order with `start <= end`, offsets indexing into the input text.
pub trait Tokenizer {
    /// Tokenizes the input text.
    fn tokenize(&self, text: &str) -> Result<Vec<Token>>;
}
