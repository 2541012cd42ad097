use serde::Deserialize;

use crate::error::{NomiError, Result};
use crate::types::EntitySpan;

use super::DocumentParser;

/// Parses a JSON document with pre-annotated character spans.
///
/// Expected shape:
///
/// ```json
/// {
///   "text": "Barack Obama visited Berlin",
///   "entities": [
///     {"start": 0, "end": 12, "label": "PER"}
///   ]
/// }
/// ```
///
/// The span text is sliced out of `text` at the given offsets, so spans
/// produced by this parser always satisfy the
/// [`ParseValidator`](crate::validate::ParseValidator) text/offset
/// equality — unless the offsets themselves are out of bounds, which is
/// rejected here.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSpanParser;

impl JsonSpanParser {
    /// Creates a new JSON span parser.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[derive(Deserialize)]
struct RawDocumentPayload {
    text: String,
    #[serde(default)]
    entities: Vec<RawSpanPayload>,
}

#[derive(Deserialize)]
struct RawSpanPayload {
    start: usize,
    end: usize,
    label: String,
}

impl DocumentParser for JsonSpanParser {
    fn parse(&self, doc: &str) -> Result<(String, Vec<EntitySpan>)> {
        let payload: RawDocumentPayload = serde_json::from_str(doc)?;

        let mut entities = Vec::with_capacity(payload.entities.len());
        for raw in &payload.entities {
            let text = payload
                .text
                .get(raw.start..raw.end)
                .ok_or_else(|| NomiError::MalformedInput {
                    message: format!(
                        "entity span {}..{} out of bounds for text of length {}",
                        raw.start,
                        raw.end,
                        payload.text.len()
                    ),
                })?;
            entities.push(EntitySpan::new(text, raw.start, raw.end, raw.label.as_str())?);
        }

        Ok((payload.text, entities))
    }
}
