//! # Validators
//!
//! Independent checks over already-produced artifacts: span integrity
//! against the source text, decoded token spans against entity text, and
//! label sequences against the entity spans they were derived from.
//! Validators detect and report; they never repair data.

mod label_alignment;
mod parse;
mod token_alignment;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{NomiError, Result};
use crate::types::{EntitySpan, Token, TokenEntitySpan};

pub use label_alignment::{BilouAlignmentValidator, BioAlignmentValidator};
pub use parse::ParseValidator;
pub use token_alignment::{TokenAlignmentValidator, TokenDecoder};

/// How a validator surfaces the problems it finds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Emit a diagnostic per finding and return the collected list.
    #[default]
    Warn,
    /// Abort on the first finding.
    Raise,
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warn => write!(f, "warn"),
            Self::Raise => write!(f, "raise"),
        }
    }
}

impl FromStr for ErrorPolicy {
    type Err = NomiError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "warn" => Ok(Self::Warn),
            "raise" => Ok(Self::Raise),
            other => Err(NomiError::MalformedInput {
                message: format!("unknown error policy {other:?}"),
            }),
        }
    }
}

/// Everything produced for one chunk, bundled for validation.
///
/// Validators take the whole bundle and pick the pieces they need; the
/// pipeline builds one per chunk after labeling.
#[derive(Debug, Clone, Copy)]
pub struct ChunkArtifacts<'a> {
    /// Chunk text.
    pub text: &'a str,
    /// Tokens covering the chunk text.
    pub tokens: &'a [Token],
    /// Entity spans within the chunk text.
    pub entities: &'a [EntitySpan],
    /// Alignment results, one per entity.
    pub aligned: &'a [TokenEntitySpan],
    /// Labels, one per token.
    pub labels: &'a [String],
}

/// A read-only check over one chunk's artifacts.
///
/// `validate` returns the findings collected under the `Warn` policy (an
/// empty list means the chunk passed) or an error under `Raise`.
pub trait Validator {
    /// Short identifier used in diagnostics.
    fn name(&self) -> &'static str;

    /// Runs the check against one chunk.
    fn validate(&self, chunk: &ChunkArtifacts<'_>) -> Result<Vec<String>>;
}

/// Strips all whitespace before comparison, so that differences in subword
/// joining do not show up as span mismatches.
pub(crate) fn squash_whitespace(s: &str) -> String {
    s.split_whitespace().collect()
}

/// Finds the expected span matching a reconstructed one by exact
/// (start, end, label) triple.
pub(crate) fn find_span<'a>(
    entities: &'a [EntitySpan],
    start: usize,
    end: usize,
    label: &str,
) -> Option<&'a EntitySpan> {
    entities
        .iter()
        .find(|span| span.start == start && span.end == end && span.label == label)
}
