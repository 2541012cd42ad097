use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{NomiError, Result};

/// A labeled, character-offset-delimited region of source text.
///
/// `start`/`end` are byte offsets into the UTF-8 source text, `start`
/// inclusive and `end` exclusive. `start <= end` is enforced at
/// construction and at deserialization; a violation is always fatal and
/// never policy-gated. Whether `text` actually equals
/// `source[start..end]` is *not* enforced here — that equality is exactly
/// what [`ParseValidator`](crate::validate::ParseValidator) checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawEntitySpan")]
pub struct EntitySpan {
    /// Surface text of the annotated region.
    pub text: String,
    /// Start byte offset in the source text (inclusive).
    pub start: usize,
    /// End byte offset in the source text (exclusive).
    pub end: usize,
    /// Entity label, e.g. `"PER"` or `"DISEASE"`.
    pub label: String,
    /// Arbitrary key/value annotations carried from the source markup.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl EntitySpan {
    /// Creates a new entity span.
    ///
    /// # Errors
    ///
    /// Returns [`NomiError::InvalidSpan`] if `start > end`.
    pub fn new(
        text: impl Into<String>,
        start: usize,
        end: usize,
        label: impl Into<String>,
    ) -> Result<Self> {
        if start > end {
            return Err(NomiError::InvalidSpan { start, end });
        }
        Ok(Self {
            text: text.into(),
            start,
            end,
            label: label.into(),
            attributes: BTreeMap::new(),
        })
    }

    /// Attaches source-markup attributes to the span.
    #[must_use]
    pub fn with_attributes(mut self, attributes: BTreeMap<String, String>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Length of the annotated region in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the annotated region is empty (`start == end`).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Deserialization proxy so that spans read from JSON go through the same
/// `start <= end` check as constructed ones.
#[derive(Deserialize)]
struct RawEntitySpan {
    text: String,
    start: usize,
    end: usize,
    label: String,
    #[serde(default)]
    attributes: BTreeMap<String, String>,
}

impl TryFrom<RawEntitySpan> for EntitySpan {
    type Error = NomiError;

    fn try_from(raw: RawEntitySpan) -> Result<Self> {
        Ok(EntitySpan::new(raw.text, raw.start, raw.end, raw.label)?
            .with_attributes(raw.attributes))
    }
}

/// The result of aligning one entity span onto a token sequence.
///
/// `token_indices` holds positions into the token sequence the entity was
/// aligned against, sorted ascending. An empty list is a legal signal that
/// the entity could not be aligned; how that is handled is decided by the
/// labeler's misalignment policy, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenEntitySpan {
    /// The aligned entity.
    pub entity: EntitySpan,
    /// Indices of the tokens fully contained in the entity's span.
    pub token_indices: Vec<usize>,
}

impl TokenEntitySpan {
    /// Creates a new token-entity span.
    #[must_use]
    pub fn new(entity: EntitySpan, token_indices: Vec<usize>) -> Self {
        Self {
            entity,
            token_indices,
        }
    }

    /// Returns `true` if at least one token was aligned.
    #[must_use]
    pub fn is_aligned(&self) -> bool {
        !self.token_indices.is_empty()
    }
}
