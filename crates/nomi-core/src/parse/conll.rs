use crate::error::{NomiError, Result};
use crate::types::EntitySpan;

use super::DocumentParser;

/// Parses CoNLL-style "token label" lines, reconstructing running text and
/// converting BIO runs into entity spans.
///
/// Tokens are joined with the configured `joiner`, except single-character
/// punctuation which attaches directly to the preceding text. Inside a BIO
/// run the joiner is always used, so the reconstructed span text matches
/// the reconstructed document text at the span's offsets.
#[derive(Debug, Clone)]
pub struct ConllParser {
    separator: String,
    joiner: String,
}

impl Default for ConllParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ConllParser {
    /// Creates a parser with space separator and space joiner.
    #[must_use]
    pub fn new() -> Self {
        Self {
            separator: " ".to_string(),
            joiner: " ".to_string(),
        }
    }

    /// Sets the column separator used in the input lines.
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Sets the string used to join tokens in the reconstructed text.
    #[must_use]
    pub fn with_joiner(mut self, joiner: impl Into<String>) -> Self {
        self.joiner = joiner.into();
        self
    }

    fn split_line(&self, line: &str) -> Result<(String, String)> {
        let fields: Vec<&str> = line.split(self.separator.as_str()).collect();
        match fields.as_slice() {
            [token, label] => Ok((token.to_string(), label.to_string())),
            _ => Err(NomiError::MalformedInput {
                message: format!("expected \"token{}label\" line, got {line:?}", self.separator),
            }),
        }
    }
}

/// Single-character punctuation attaches to the previous token without a
/// joiner, matching how detokenized text reads.
fn is_punctuation(token: &str) -> bool {
    let mut chars = token.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_punctuation())
}

impl DocumentParser for ConllParser {
    fn parse(&self, doc: &str) -> Result<(String, Vec<EntitySpan>)> {
        let mut tokens = Vec::new();
        let mut labels = Vec::new();
        for line in doc.trim().lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (token, label) = self.split_line(line)?;
            tokens.push(token);
            labels.push(label);
        }

        let mut text = String::new();
        let mut spans = Vec::new();
        let mut i = 0;

        while i < tokens.len() {
            let token = &tokens[i];
            let label = &labels[i];

            if !text.is_empty() && !is_punctuation(token) {
                text.push_str(&self.joiner);
            }

            if let Some(entity_label) = label.strip_prefix("B-") {
                let span_start = text.len();
                let mut span_text = token.clone();
                text.push_str(token);
                i += 1;
                while i < tokens.len() && labels[i].starts_with("I-") {
                    text.push_str(&self.joiner);
                    text.push_str(&tokens[i]);
                    span_text.push_str(&self.joiner);
                    span_text.push_str(&tokens[i]);
                    i += 1;
                }
                let span_end = text.len();
                spans.push(EntitySpan::new(span_text, span_start, span_end, entity_label)?);
            } else {
                text.push_str(token);
                i += 1;
            }
        }

        Ok((text, spans))
    }
}
