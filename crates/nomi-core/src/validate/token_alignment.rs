use tracing::warn;

use crate::error::{NomiError, Result};
use crate::types::{Token, TokenEntitySpan};

use super::{squash_whitespace, ChunkArtifacts, ErrorPolicy, Validator};

/// Maps a sequence of token identifiers back to surface text.
///
/// Implementations are expected to collapse model-specific subword
/// continuation markers (e.g. WordPiece `##`) so that the decoded text is
/// comparable to the original entity text. The `hf` feature provides an
/// implementation backed by a HuggingFace tokenizer; tests use a trivial
/// lookup table.
pub trait TokenDecoder {
    /// Decodes token ids into surface text.
    fn decode(&self, ids: &[u32]) -> Result<String>;
}

/// Cross-checks aligned token spans against the entity text they claim to
/// cover.
///
/// For each [`TokenEntitySpan`], the ids of the aligned tokens are decoded
/// through the supplied [`TokenDecoder`] and compared — whitespace
/// removed — against the entity's recorded text. A mismatch means the
/// alignment selected the wrong tokens or the tokenizer's offsets drifted
/// from the source text.
#[derive(Debug, Clone)]
pub struct TokenAlignmentValidator<D> {
    decoder: D,
    policy: ErrorPolicy,
}

impl<D: TokenDecoder> TokenAlignmentValidator<D> {
    /// Creates a validator around the given decode capability.
    #[must_use]
    pub fn new(decoder: D, policy: ErrorPolicy) -> Self {
        Self { decoder, policy }
    }

    /// Checks each aligned span's decoded text against its entity text.
    ///
    /// Returns the collected findings under `Warn`, or the first finding as
    /// an error under `Raise`.
    pub fn check(&self, tokens: &[Token], aligned: &[TokenEntitySpan]) -> Result<Vec<String>> {
        let mut findings = Vec::new();

        for span in aligned {
            let mut ids = Vec::with_capacity(span.token_indices.len());
            let mut out_of_range = None;
            for &idx in &span.token_indices {
                match tokens.get(idx) {
                    Some(token) => ids.push(token.id),
                    None => {
                        out_of_range = Some(idx);
                        break;
                    }
                }
            }
            if let Some(idx) = out_of_range {
                self.report(
                    &mut findings,
                    format!(
                        "token index {idx} out of range for {} tokens (entity {:?})",
                        tokens.len(),
                        span.entity.label
                    ),
                )?;
                continue;
            }

            let decoded = self.decoder.decode(&ids)?;
            let actual = squash_whitespace(&decoded);
            let expected = squash_whitespace(&span.entity.text);
            if actual != expected {
                self.report(
                    &mut findings,
                    format!(
                        "decoded token span {decoded:?} does not match entity text {:?} at {}..{}",
                        span.entity.text, span.entity.start, span.entity.end
                    ),
                )?;
            }
        }

        Ok(findings)
    }

    fn report(&self, findings: &mut Vec<String>, message: String) -> Result<()> {
        match self.policy {
            ErrorPolicy::Warn => {
                warn!(validator = "token-alignment", "{message}");
                findings.push(message);
                Ok(())
            }
            ErrorPolicy::Raise => Err(NomiError::SpanIntegrity { message }),
        }
    }
}

impl<D: TokenDecoder> Validator for TokenAlignmentValidator<D> {
    fn name(&self) -> &'static str {
        "token-alignment"
    }

    fn validate(&self, chunk: &ChunkArtifacts<'_>) -> Result<Vec<String>> {
        self.check(chunk.tokens, chunk.aligned)
    }
}
