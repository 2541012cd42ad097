use crate::types::{EntitySpan, Token};

use super::{shift_entity, shift_token, Chunk, Chunker};

/// Splits a document into windows of at most `max_tokens` tokens, stepping
/// by `max_tokens - overlap`.
///
/// Each window's text is the source slice from its first token's start to
/// its last token's end; token and entity offsets are shifted accordingly.
/// Entities are kept only when their character span lies fully inside the
/// window — an entity cut by a window boundary is dropped from that window
/// rather than truncated.
#[derive(Debug, Clone, Copy)]
pub struct FixedLengthChunker {
    max_tokens: usize,
    overlap: usize,
}

impl Default for FixedLengthChunker {
    fn default() -> Self {
        Self::new(256, 0)
    }
}

impl FixedLengthChunker {
    /// Creates a chunker with the given window size and overlap.
    ///
    /// `max_tokens` is clamped to at least 1 and `overlap` to less than
    /// `max_tokens`.
    #[must_use]
    pub fn new(max_tokens: usize, overlap: usize) -> Self {
        let max_tokens = max_tokens.max(1);
        Self {
            max_tokens,
            overlap: overlap.min(max_tokens - 1),
        }
    }
}

impl Chunker for FixedLengthChunker {
    fn chunk(&self, text: &str, tokens: &[Token], entities: &[EntitySpan]) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let stride = self.max_tokens - self.overlap;
        let mut i = 0;

        while i < tokens.len() {
            let window = &tokens[i..(i + self.max_tokens).min(tokens.len())];
            // A tail window no longer than the overlap was already fully
            // covered by the previous window.
            if i != 0 && window.len() <= self.overlap {
                break;
            }

            let base = window[0].start;
            let window_end = window[window.len() - 1].end;

            let chunk_tokens: Vec<Token> =
                window.iter().map(|token| shift_token(token, base)).collect();
            let chunk_entities: Vec<EntitySpan> = entities
                .iter()
                .filter(|entity| entity.start >= base && entity.end <= window_end)
                .map(|entity| shift_entity(entity, base))
                .collect();

            chunks.push(Chunk {
                chunk_id: chunks.len(),
                text: text.get(base..window_end).unwrap_or_default().to_string(),
                tokens: chunk_tokens,
                entities: chunk_entities,
            });

            i += stride;
        }

        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize::{Tokenizer, WhitespaceTokenizer};

    fn fixture() -> (String, Vec<Token>, Vec<EntitySpan>) {
        let text = "Barack Obama met Angela Merkel in Berlin".to_string();
        let tokens = WhitespaceTokenizer::new().tokenize(&text).unwrap();
        let entities = vec![
            EntitySpan::new("Barack Obama", 0, 12, "PER").unwrap(),
            EntitySpan::new("Angela Merkel", 17, 30, "PER").unwrap(),
            EntitySpan::new("Berlin", 34, 40, "LOC").unwrap(),
        ];
        (text, tokens, entities)
    }

    #[test]
    fn single_window_when_document_fits() {
        let (text, tokens, entities) = fixture();
        let chunks = FixedLengthChunker::new(32, 0).chunk(&text, &tokens, &entities);

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].tokens.len(), tokens.len());
        assert_eq!(chunks[0].entities.len(), 3);
        assert_eq!(chunks[0].text, text);
    }

    #[test]
    fn windows_rebase_offsets() {
        let (text, tokens, entities) = fixture();
        let chunks = FixedLengthChunker::new(3, 0).chunk(&text, &tokens, &entities);

        assert_eq!(chunks.len(), 3);
        for chunk in &chunks {
            assert_eq!(chunk.tokens[0].start, 0);
            for token in &chunk.tokens {
                assert_eq!(&chunk.text[token.start..token.end], token.text);
            }
            for entity in &chunk.entities {
                assert_eq!(&chunk.text[entity.start..entity.end], entity.text);
            }
        }

        // "Angela Merkel" lives entirely in the second window.
        assert_eq!(chunks[1].entities.len(), 1);
        assert_eq!(chunks[1].entities[0].text, "Angela Merkel");
    }

    #[test]
    fn boundary_crossing_entity_is_dropped() {
        let (text, tokens, entities) = fixture();
        // Window of 2 tokens splits "Angela Merkel" across windows 2 and 3.
        let chunks = FixedLengthChunker::new(2, 0).chunk(&text, &tokens, &entities);

        let kept: Vec<&str> = chunks
            .iter()
            .flat_map(|c| c.entities.iter().map(|e| e.text.as_str()))
            .collect();
        assert!(kept.contains(&"Barack Obama"));
        assert!(!kept.contains(&"Angela Merkel"));
    }

    #[test]
    fn overlapping_windows_step_by_stride() {
        let (text, tokens, entities) = fixture();
        let chunks = FixedLengthChunker::new(4, 2).chunk(&text, &tokens, &entities);

        // Stride 2 over 7 tokens: windows start at tokens 0, 2, 4.
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].tokens.len(), 4);
        assert_eq!(chunks[1].tokens.len(), 4);
        assert_eq!(chunks[2].tokens.len(), 3);
        assert_eq!(chunks[2].chunk_id, 2);
    }

    #[test]
    fn empty_token_sequence_yields_no_chunks() {
        let chunks = FixedLengthChunker::new(4, 0).chunk("", &[], &[]);
        assert!(chunks.is_empty());
    }

    #[test]
    fn overlap_is_clamped_below_window_size() {
        // Equal overlap would make the stride zero; the constructor clamps
        // it so chunking always terminates.
        let (text, tokens, entities) = fixture();
        let chunks = FixedLengthChunker::new(2, 2).chunk(&text, &tokens, &entities);
        assert!(!chunks.is_empty());
    }
}
