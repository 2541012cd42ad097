use crate::error::Result;
use crate::types::Token;

use super::Tokenizer;

/// Whitespace tokenizer: every maximal run of non-whitespace characters
/// becomes one token. Token ids are sequential positions.
///
/// # Examples
/// ```rust
/// use nomi_core::tokenize::{Tokenizer, WhitespaceTokenizer};
///
/// let tokens = WhitespaceTokenizer::new().tokenize("Barack Obama visited").unwrap();
/// assert_eq!(tokens.len(), 3);
/// assert_eq!(tokens[1].text, "Obama");
/// assert_eq!((tokens[1].start, tokens[1].end), (7, 12));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl WhitespaceTokenizer {
    /// Creates a new whitespace tokenizer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        let mut current_start = 0;

        for (idx, c) in text.char_indices() {
            if c.is_whitespace() {
                if idx > current_start {
                    tokens.push(Token::new(
                        tokens.len() as u32,
                        &text[current_start..idx],
                        current_start,
                        idx,
                    ));
                }
                current_start = idx + c.len_utf8();
            }
        }

        if current_start < text.len() {
            tokens.push(Token::new(
                tokens.len() as u32,
                &text[current_start..],
                current_start,
                text.len(),
            ));
        }

        Ok(tokens)
    }
}
