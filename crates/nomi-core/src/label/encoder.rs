use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{NomiError, Result};

/// Maps string labels to dense numeric ids and back.
///
/// The vocabulary is built with [`fit`](Self::fit) from the label sequences
/// of a corpus; ids are assigned in sorted label order so that a given
/// label set always produces the same encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoder {
    label_to_id: BTreeMap<String, usize>,
    id_to_label: Vec<String>,
}

impl LabelEncoder {
    /// Creates an empty, unfitted encoder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the label vocabulary from multiple label sequences.
    ///
    /// Replaces any previously fitted vocabulary.
    pub fn fit(&mut self, sequences: &[Vec<String>]) {
        let unique: std::collections::BTreeSet<&String> =
            sequences.iter().flatten().collect();
        self.id_to_label = unique.into_iter().cloned().collect();
        self.label_to_id = self
            .id_to_label
            .iter()
            .enumerate()
            .map(|(id, label)| (label.clone(), id))
            .collect();
    }

    /// Converts a label sequence to numeric ids.
    ///
    /// # Errors
    ///
    /// Returns [`NomiError::UnknownLabel`] for labels outside the fitted
    /// vocabulary.
    pub fn encode(&self, labels: &[String]) -> Result<Vec<usize>> {
        labels.iter().map(|label| self.label_to_id(label)).collect()
    }

    /// Converts numeric ids back to string labels.
    ///
    /// # Errors
    ///
    /// Returns [`NomiError::UnknownLabelId`] for ids outside the fitted
    /// vocabulary.
    pub fn decode(&self, ids: &[usize]) -> Result<Vec<String>> {
        ids.iter()
            .map(|&id| self.id_to_label(id).map(str::to_string))
            .collect()
    }

    /// Looks up the id of a single label.
    pub fn label_to_id(&self, label: &str) -> Result<usize> {
        self.label_to_id
            .get(label)
            .copied()
            .ok_or_else(|| NomiError::UnknownLabel {
                label: label.to_string(),
            })
    }

    /// Looks up the label of a single id.
    pub fn id_to_label(&self, id: usize) -> Result<&str> {
        self.id_to_label
            .get(id)
            .map(String::as_str)
            .ok_or(NomiError::UnknownLabelId { id })
    }

    /// Number of labels in the fitted vocabulary.
    #[must_use]
    pub fn len(&self) -> usize {
        self.id_to_label.len()
    }

    /// Returns `true` if the encoder has not been fitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id_to_label.is_empty()
    }

    /// Iterates the vocabulary in id order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.id_to_label.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn fit_assigns_sorted_ids() {
        let mut encoder = LabelEncoder::new();
        encoder.fit(&[seq(&["O", "B-PER", "I-PER"]), seq(&["O", "B-LOC"])]);

        assert_eq!(encoder.len(), 4);
        // Sorted order: B-LOC < B-PER < I-PER < O
        assert_eq!(encoder.label_to_id("B-LOC").unwrap(), 0);
        assert_eq!(encoder.label_to_id("B-PER").unwrap(), 1);
        assert_eq!(encoder.label_to_id("I-PER").unwrap(), 2);
        assert_eq!(encoder.label_to_id("O").unwrap(), 3);
    }

    #[test]
    fn encode_decode_roundtrip() {
        let mut encoder = LabelEncoder::new();
        encoder.fit(&[seq(&["O", "B-PER", "I-PER"])]);

        let labels = seq(&["B-PER", "I-PER", "O"]);
        let ids = encoder.encode(&labels).unwrap();
        let back = encoder.decode(&ids).unwrap();
        assert_eq!(back, labels);
    }

    #[test]
    fn unknown_label_is_an_error() {
        let mut encoder = LabelEncoder::new();
        encoder.fit(&[seq(&["O"])]);

        let err = encoder.encode(&seq(&["B-PER"])).unwrap_err();
        assert!(matches!(err, NomiError::UnknownLabel { .. }));

        let err = encoder.decode(&[99]).unwrap_err();
        assert!(matches!(err, NomiError::UnknownLabelId { id: 99 }));
    }

    #[test]
    fn unfitted_encoder_rejects_everything() {
        let encoder = LabelEncoder::new();
        assert!(encoder.is_empty());
        assert!(encoder.encode(&seq(&["O"])).is_err());
    }

    #[test]
    fn refit_replaces_vocabulary() {
        let mut encoder = LabelEncoder::new();
        encoder.fit(&[seq(&["O", "B-PER"])]);
        encoder.fit(&[seq(&["ENTITY", "O"])]);

        assert_eq!(encoder.len(), 2);
        assert!(encoder.label_to_id("B-PER").is_err());
        assert_eq!(encoder.labels().collect::<Vec<_>>(), vec!["ENTITY", "O"]);
    }
}
