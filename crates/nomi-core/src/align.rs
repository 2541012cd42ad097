//! # Span Alignment
//!
//! Maps character-level entity spans onto token-index lists. This is the
//! bridge between annotation space (byte offsets into the source text) and
//! model space (positions in a token sequence).

use crate::types::{EntitySpan, Token, TokenEntitySpan};

/// Aligns entity spans to tokens by full containment.
///
/// A token belongs to an entity iff its `[start, end)` range lies fully
/// within the entity's `[start, end)` range. A token that straddles an
/// entity boundary is excluded. This single containment definition is used
/// by every labeler and validator in the crate; nothing re-derives overlap
/// from character bounds independently.
///
/// # Examples
/// ```rust
/// use nomi_core::align::SpanAligner;
/// use nomi_core::types::{EntitySpan, Token};
///
/// let tokens = vec![
///     Token::new(0, "Barack", 0, 6),
///     Token::new(1, "Obama", 7, 12),
///     Token::new(2, "visited", 13, 20),
/// ];
/// let entity = EntitySpan::new("Barack Obama", 0, 12, "PER").unwrap();
///
/// let aligned = SpanAligner::new().align(&tokens, &[entity]);
/// assert_eq!(aligned[0].token_indices, vec![0, 1]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SpanAligner;

impl SpanAligner {
    /// Creates a new aligner instance.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Aligns each entity to the tokens fully contained in its span.
    ///
    /// Returns one [`TokenEntitySpan`] per input entity, in input order.
    /// Entities with no contained token get an empty index list — a legal
    /// misalignment signal whose handling is deferred to the labeler's
    /// policy. Pure and deterministic; O(tokens × entities).
    #[must_use]
    pub fn align(&self, tokens: &[Token], entities: &[EntitySpan]) -> Vec<TokenEntitySpan> {
        entities
            .iter()
            .map(|entity| {
                let token_indices = tokens
                    .iter()
                    .enumerate()
                    .filter(|(_, token)| {
                        token.start >= entity.start && token.end <= entity.end
                    })
                    .map(|(idx, _)| idx)
                    .collect();
                TokenEntitySpan::new(entity.clone(), token_indices)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens() -> Vec<Token> {
        vec![
            Token::new(0, "Barack", 0, 6),
            Token::new(1, "Obama", 7, 12),
            Token::new(2, "visited", 13, 20),
        ]
    }

    #[test]
    fn aligns_multi_token_entity() {
        let entity = EntitySpan::new("Barack Obama", 0, 12, "PER").unwrap();
        let aligned = SpanAligner::new().align(&tokens(), &[entity]);

        assert_eq!(aligned.len(), 1);
        assert_eq!(aligned[0].token_indices, vec![0, 1]);
    }

    #[test]
    fn aligns_single_token_entity() {
        let entity = EntitySpan::new("Obama", 7, 12, "PER").unwrap();
        let aligned = SpanAligner::new().align(&tokens(), &[entity]);
        assert_eq!(aligned[0].token_indices, vec![1]);
    }

    #[test]
    fn boundary_straddling_token_is_excluded() {
        // Entity covers "Barack Oba" — the second token sticks out past the
        // entity end, so only the first token is contained.
        let entity = EntitySpan::new("Barack Oba", 0, 10, "PER").unwrap();
        let aligned = SpanAligner::new().align(&tokens(), &[entity]);
        assert_eq!(aligned[0].token_indices, vec![0]);
    }

    #[test]
    fn unaligned_entity_yields_empty_indices() {
        let entity = EntitySpan::new("XYZ", 100, 103, "MISC").unwrap();
        let aligned = SpanAligner::new().align(&tokens(), &[entity]);

        assert_eq!(aligned.len(), 1);
        assert!(aligned[0].token_indices.is_empty());
        assert!(!aligned[0].is_aligned());
    }

    #[test]
    fn output_preserves_entity_order() {
        let first = EntitySpan::new("visited", 13, 20, "ACTION").unwrap();
        let second = EntitySpan::new("Barack Obama", 0, 12, "PER").unwrap();
        let aligned = SpanAligner::new().align(&tokens(), &[first, second]);

        assert_eq!(aligned[0].entity.label, "ACTION");
        assert_eq!(aligned[0].token_indices, vec![2]);
        assert_eq!(aligned[1].entity.label, "PER");
        assert_eq!(aligned[1].token_indices, vec![0, 1]);
    }

    #[test]
    fn align_is_idempotent() {
        let entities = vec![
            EntitySpan::new("Barack Obama", 0, 12, "PER").unwrap(),
            EntitySpan::new("XYZ", 100, 103, "MISC").unwrap(),
        ];
        let aligner = SpanAligner::new();
        let first = aligner.align(&tokens(), &entities);
        let second = aligner.align(&tokens(), &entities);
        assert_eq!(first, second);
    }
}
