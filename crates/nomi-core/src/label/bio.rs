use crate::error::Result;
use crate::types::{Token, TokenEntitySpan};

use super::{alignment_ok, exact_match_index, Labeler, LabelerConfig, SubwordStrategy, OUTSIDE};

/// BIO labeler: `B-<TYPE>` opens an entity, `I-<TYPE>` continues it, `O`
/// marks everything else. Multi-token spans never use a distinguished
/// last-token tag.
///
/// # Examples
/// ```rust
/// use nomi_core::align::SpanAligner;
/// use nomi_core::label::{BioLabeler, Labeler, LabelerConfig};
/// use nomi_core::types::{EntitySpan, Token};
///
/// let tokens = vec![
///     Token::new(0, "Barack", 0, 6),
///     Token::new(1, "Obama", 7, 12),
///     Token::new(2, "visited", 13, 20),
/// ];
/// let entity = EntitySpan::new("Barack Obama", 0, 12, "PER").unwrap();
/// let aligned = SpanAligner::new().align(&tokens, &[entity]);
///
/// let labeler = BioLabeler::new(LabelerConfig::default());
/// let labels = labeler.label(&tokens, &aligned).unwrap();
/// assert_eq!(labels, ["B-PER", "I-PER", "O"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BioLabeler {
    config: LabelerConfig,
}

impl BioLabeler {
    /// Creates a BIO labeler with the given configuration.
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

impl Labeler for BioLabeler {
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
                    labels[indices[0]] = format!("B-{entity_label}");
                }
                SubwordStrategy::All => {
                    labels[indices[0]] = format!("B-{entity_label}");
                    for &idx in &indices[1..] {
                        labels[idx] = format!("I-{entity_label}");
                    }
                }
                SubwordStrategy::Strict => {
                    if let Some(idx) = exact_match_index(tokens, span) {
                        labels[idx] = format!("B-{entity_label}");
                    }
                }
            }
        }

        Ok(labels)
    }
}
