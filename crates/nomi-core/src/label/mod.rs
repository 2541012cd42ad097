//! # Sequence Labelers
//!
//! Converts aligned token-entity spans into per-token label sequences under
//! a configurable tagging scheme (BIO, BILOU, binary) and subword /
//! misalignment policy.

mod bilou;
mod binary;
mod bio;
mod encoder;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::align::SpanAligner;
use crate::error::{NomiError, Result};
use crate::types::{EntitySpan, Token, TokenEntitySpan};

pub use bilou::BilouLabeler;
pub use binary::BinaryLabeler;
pub use bio::BioLabeler;
pub use encoder::LabelEncoder;

/// The label assigned to tokens outside any entity.
pub const OUTSIDE: &str = "O";

/// How tokens inside a multi-token (e.g. subword-split) alignment are labeled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubwordStrategy {
    /// Label only the first aligned token; the rest stay outside.
    First,
    /// Label every aligned token.
    #[default]
    All,
    /// Label a token only when its own span exactly equals the entity span.
    Strict,
}

impl fmt::Display for SubwordStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => write!(f, "first"),
            Self::All => write!(f, "all"),
            Self::Strict => write!(f, "strict"),
        }
    }
}

impl FromStr for SubwordStrategy {
    type Err = NomiError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "first" => Ok(Self::First),
            "all" => Ok(Self::All),
            "strict" => Ok(Self::Strict),
            other => Err(NomiError::MalformedInput {
                message: format!("unknown subword strategy {other:?}"),
            }),
        }
    }
}

/// What to do when an entity has no aligned tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MisalignmentPolicy {
    /// Silently move on to the next entity.
    #[default]
    Skip,
    /// Emit a diagnostic, then move on to the next entity.
    Warn,
    /// Abort the whole labeling call.
    Fail,
}

impl fmt::Display for MisalignmentPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skip => write!(f, "skip"),
            Self::Warn => write!(f, "warn"),
            Self::Fail => write!(f, "fail"),
        }
    }
}

impl FromStr for MisalignmentPolicy {
    type Err = NomiError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "skip" => Ok(Self::Skip),
            "warn" => Ok(Self::Warn),
            "fail" => Ok(Self::Fail),
            other => Err(NomiError::MalformedInput {
                message: format!("unknown misalignment policy {other:?}"),
            }),
        }
    }
}

/// Configuration shared by every labeler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelerConfig {
    /// Subword labeling strategy.
    pub subword_strategy: SubwordStrategy,
    /// Misalignment handling policy.
    pub misalignment_policy: MisalignmentPolicy,
}

impl LabelerConfig {
    /// Creates a configuration with default settings (`all` + `skip`).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the subword strategy.
    #[must_use]
    pub fn with_subword_strategy(mut self, strategy: SubwordStrategy) -> Self {
        self.subword_strategy = strategy;
        self
    }

    /// Sets the misalignment policy.
    #[must_use]
    pub fn with_misalignment_policy(mut self, policy: MisalignmentPolicy) -> Self {
        self.misalignment_policy = policy;
        self
    }
}

/// Converts aligned entities into one label per token.
///
/// Implementations write labels over an all-`"O"` sequence in entity input
/// order; a later entity overwrites labels written by an earlier one at
/// overlapping token positions. No conflict detection is performed — that
/// behavior is deliberate and covered by tests.
pub trait Labeler {
    /// Labels `tokens` according to the pre-aligned entity spans.
    ///
    /// The output has exactly one label per input token.
    ///
    /// # Errors
    ///
    /// Returns [`NomiError::MisalignedEntity`] when an entity has no
    /// aligned tokens and the misalignment policy is
    /// [`MisalignmentPolicy::Fail`]. No label sequence is produced in that
    /// case.
    fn label(&self, tokens: &[Token], aligned: &[TokenEntitySpan]) -> Result<Vec<String>>;

    /// Aligns `entities` with the crate's [`SpanAligner`] and then labels.
    ///
    /// This is the convenience path for callers holding raw entity spans;
    /// it funnels through the same full-containment alignment as
    /// everything else.
    fn label_entities(&self, tokens: &[Token], entities: &[EntitySpan]) -> Result<Vec<String>> {
        let aligned = SpanAligner::new().align(tokens, entities);
        self.label(tokens, &aligned)
    }
}

/// Applies the misalignment policy to one aligned entity.
///
/// Returns `Ok(true)` when labeling should proceed, `Ok(false)` when the
/// entity should be skipped, and an error under the `Fail` policy.
pub(crate) fn alignment_ok(span: &TokenEntitySpan, policy: MisalignmentPolicy) -> Result<bool> {
    if span.is_aligned() {
        return Ok(true);
    }
    match policy {
        MisalignmentPolicy::Skip => Ok(false),
        MisalignmentPolicy::Warn => {
            warn!(
                label = %span.entity.label,
                start = span.entity.start,
                end = span.entity.end,
                "no tokens aligned with entity span"
            );
            Ok(false)
        }
        MisalignmentPolicy::Fail => Err(NomiError::MisalignedEntity {
            label: span.entity.label.clone(),
            start: span.entity.start,
            end: span.entity.end,
        }),
    }
}

/// Finds the index of the token whose span exactly equals the entity span.
///
/// Used by the `strict` strategy: only an exact single-token match earns a
/// label; merely overlapping tokens are left outside.
pub(crate) fn exact_match_index(
    tokens: &[Token],
    span: &TokenEntitySpan,
) -> Option<usize> {
    span.token_indices
        .iter()
        .copied()
        .find(|&idx| {
            tokens[idx].start == span.entity.start && tokens[idx].end == span.entity.end
        })
}
