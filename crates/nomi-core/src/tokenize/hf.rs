use std::path::Path;

use crate::error::{NomiError, Result};
use crate::types::Token;
use crate::validate::TokenDecoder;

use super::Tokenizer;

/// Adapter over a HuggingFace `tokenizers` tokenizer.
///
/// Produces subword tokens with vocabulary ids and byte offsets into the
/// input text (no special tokens), and implements [`TokenDecoder`] so the
/// same tokenizer can back the token-alignment validator — its `decode`
/// collapses subword continuation markers.
///
/// Only available with the `hf` feature.
pub struct HuggingFaceTokenizer {
    inner: tokenizers::Tokenizer,
}

impl HuggingFaceTokenizer {
    /// Loads a tokenizer from a serialized `tokenizer.json` file.
    ///
    /// # Errors
    ///
    /// Returns [`NomiError::Tokenizer`] when the file cannot be read or
    /// parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let inner = tokenizers::Tokenizer::from_file(path).map_err(|e| NomiError::Tokenizer {
            message: e.to_string(),
        })?;
        Ok(Self { inner })
    }

    /// Wraps an already-constructed tokenizer.
    #[must_use]
    pub fn from_tokenizer(inner: tokenizers::Tokenizer) -> Self {
        Self { inner }
    }
}

impl Tokenizer for HuggingFaceTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>> {
        let encoding = self
            .inner
            .encode(text, false)
            .map_err(|e| NomiError::Tokenizer {
                message: e.to_string(),
            })?;

        let tokens = encoding
            .get_ids()
            .iter()
            .zip(encoding.get_tokens())
            .zip(encoding.get_offsets())
            .map(|((&id, token), &(start, end))| Token::new(id, token.as_str(), start, end))
            .collect();
        Ok(tokens)
    }
}

impl TokenDecoder for HuggingFaceTokenizer {
    fn decode(&self, ids: &[u32]) -> Result<String> {
        self.inner
            .decode(ids, true)
            .map_err(|e| NomiError::Tokenizer {
                message: e.to_string(),
            })
    }
}
