use serde::{Deserialize, Serialize};

use super::entity::EntitySpan;
use super::token::Token;

/// A standardized representation of one processed chunk, ready for export.
///
/// This is the flat shape every exporter consumes. `bio_labels` carries the
/// scheme-formatted string labels (one per token); `labels` carries the
/// numeric encoding produced by
/// [`LabelEncoder`](crate::label::LabelEncoder) when label encoding is
/// enabled. Both are optional so that partially processed corpora can still
/// be exported for inspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetRecord {
    /// Identifier of the source document.
    pub id: String,
    /// Chunk number within the source document.
    pub chunk_id: usize,
    /// Chunk text (offsets of `tokens` and `entities` are relative to it).
    pub text: String,
    /// Tokens covering the chunk text.
    pub tokens: Vec<Token>,
    /// Entity spans within the chunk text.
    pub entities: Vec<EntitySpan>,
    /// Scheme-formatted labels, one per token.
    #[serde(rename = "bio-labels", default, skip_serializing_if = "Option::is_none")]
    pub bio_labels: Option<Vec<String>>,
    /// Numeric label ids, one per token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<usize>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serialization_roundtrip() {
        let record = DatasetRecord {
            id: "doc-1".into(),
            chunk_id: 0,
            text: "Barack Obama visited".into(),
            tokens: vec![
                Token::new(0, "Barack", 0, 6),
                Token::new(1, "Obama", 7, 12),
                Token::new(2, "visited", 13, 20),
            ],
            entities: vec![EntitySpan::new("Barack Obama", 0, 12, "PER").unwrap()],
            bio_labels: Some(vec!["B-PER".into(), "I-PER".into(), "O".into()]),
            labels: None,
        };

        let json = serde_json::to_string_pretty(&record).unwrap();
        assert!(json.contains("\"bio-labels\""));
        assert!(!json.contains("\"labels\""));

        let back: DatasetRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
