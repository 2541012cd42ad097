use crate::error::Result;
use crate::types::{Token, TokenEntitySpan};

use super::{alignment_ok, exact_match_index, Labeler, LabelerConfig, SubwordStrategy, OUTSIDE};

/// BILOU labeler.
///
/// - `B-<TYPE>`: beginning of a multi-token entity
/// - `I-<TYPE>`: inside a multi-token entity
/// - `L-<TYPE>`: last token of a multi-token entity
/// - `O`: outside any entity
/// - `U-<TYPE>`: unit-length entity (exactly one token)
///
/// Unlike BIO, single-token entities are distinguished (`U-`) from the
/// first token of a multi-token entity (`B-`). Under the `first` strategy
/// the single labeled token always gets `U-<TYPE>` — the only tag that
/// forms a valid BILOU sequence on its own.
#[derive(Debug, Clone, Default)]
pub struct BilouLabeler {
    config: LabelerConfig,
}

impl BilouLabeler {
    /// Creates a BILOU labeler with the given configuration.
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

impl Labeler for BilouLabeler {
    fn label(&self, tokens: &[Token], aligned: &[TokenEntitySpan]) -> Result<Vec<String>> {
        let mut labels = vec![OUTSIDE.to_string(); tokens.len()];

        for span in aligned {
            if !alignment_ok(span, self.config.misalignment_policy)? {
                continue;
            }
            let indices = &span.token_indices;
            let entity_label = &span.entity.label;

            match self.config.subword_strategy {
                SubwordStrategy::First => {
                    labels[indices[0]] = format!("U-{entity_label}");
                }
                SubwordStrategy::All => {
                    if indices.len() == 1 {
                        labels[indices[0]] = format!("U-{entity_label}");
                    } else {
                        labels[indices[0]] = format!("B-{entity_label}");
                        for &idx in &indices[1..indices.len() - 1] {
                            labels[idx] = format!("I-{entity_label}");
                        }
                        labels[indices[indices.len() - 1]] = format!("L-{entity_label}");
                    }
                }
                SubwordStrategy::Strict => {
                    if let Some(idx) = exact_match_index(tokens, span) {
                        labels[idx] = format!("U-{entity_label}");
                    }
                }
            }
        }

        Ok(labels)
    }
}
