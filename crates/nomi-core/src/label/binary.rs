use crate::error::Result;
use crate::types::{Token, TokenEntitySpan};

use super::{alignment_ok, exact_match_index, Labeler, LabelerConfig, SubwordStrategy, OUTSIDE};

/// The label assigned to entity tokens by the binary labeler.
pub const ENTITY: &str = "ENTITY";

/// Binary labeler: every entity token becomes `ENTITY`, everything else
/// stays `O`. The entity's `label` field is discarded — all entity types
/// collapse into one tag. This information loss is intentional; it feeds
/// binary detection tasks where only entity boundaries matter.
#[derive(Debug, Clone, Default)]
pub struct BinaryLabeler {
    config: LabelerConfig,
}

impl BinaryLabeler {
    /// Creates a binary labeler with the given configuration.
    #[must_use]
    pub fn new(config: LabelerConfig) -> Self {
        Self { config }
    }

    /// Returns the labeler configuration.
    #[must_use]
    pub fn config(&self) -> &LabelerConfig {
        &self.config
    }
}

impl Labeler for BinaryLabeler {
    fn label(&self, tokens: &[Token], aligned: &[TokenEntitySpan]) -> Result<Vec<String>> {
        let mut labels = vec![OUTSIDE.to_string(); tokens.len()];

        for span in aligned {
            if !alignment_ok(span, self.config.misalignment_policy)? {
                continue;
            }
            let indices = &span.token_indices;

            match self.config.subword_strategy {
                SubwordStrategy::First => {
                    labels[indices[0]] = ENTITY.to_string();
                }
                SubwordStrategy::All => {
                    for &idx in indices {
                        labels[idx] = ENTITY.to_string();
                    }
                }
                SubwordStrategy::Strict => {
                    if let Some(idx) = exact_match_index(tokens, span) {
                        labels[idx] = ENTITY.to_string();
                    }
                }
            }
        }

        Ok(labels)
    }
}
