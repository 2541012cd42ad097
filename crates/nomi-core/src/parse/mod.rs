//! # Document Parsers
//!
//! Convert annotated documents (HTML markup, CoNLL lines, JSON payloads)
//! into plain text plus character-level entity spans — the input shape the
//! alignment core consumes.

mod category;
mod conll;
mod html;
mod json;

use crate::error::Result;
use crate::types::EntitySpan;

pub use category::CategoryTagParser;
pub use conll::ConllParser;
pub use html::{HtmlTagParser, LabelStrategy};
pub use json::JsonSpanParser;

/// Converts one annotated document into plain text and entity spans.
///
/// Offsets of the returned spans index into the returned text, following
/// the crate-wide byte-offset convention. Implementations must produce
/// spans whose recorded text equals the slice of the returned text at
/// their offsets — [`ParseValidator`](crate::validate::ParseValidator)
/// checks exactly that.
pub trait DocumentParser {
    /// Parses a document into `(clean_text, entity_spans)`.
    fn parse(&self, doc: &str) -> Result<(String, Vec<EntitySpan>)>;
}
