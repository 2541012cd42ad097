use regex::Regex;

use crate::error::Result;
use crate::types::EntitySpan;

use super::DocumentParser;

/// Minimal parser for `<category="LABEL">...</category>` markup, as used by
/// NCBI-style corpora.
///
/// The label is taken from the `category` attribute value; everything
/// between tags is kept as text, trimmed of surrounding whitespace. No DOM
/// is built — a single pre-compiled regex drives extraction.
#[derive(Debug, Clone)]
pub struct CategoryTagParser {
    re_category: Regex,
}

impl CategoryTagParser {
    /// Constructs a new parser with its pre-compiled pattern.
    ///
    /// # Errors
    ///
    /// Returns [`NomiError::Regex`](crate::error::NomiError::Regex) if the
    /// pattern fails to compile (should never happen with the static
    /// pattern defined here).
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_category: Regex::new(r#"(?s)<category="(.*?)">(.*?)</category>"#)?,
        })
    }
}

impl DocumentParser for CategoryTagParser {
    fn parse(&self, doc: &str) -> Result<(String, Vec<EntitySpan>)> {
        let mut cleaned = String::new();
        let mut spans = Vec::new();
        let mut last_index = 0;

        for captures in self.re_category.captures_iter(doc) {
            let whole = captures.get(0).expect("capture group 0 always exists");
            let label = &captures[1];
            let span_text = &captures[2];

            cleaned.push_str(doc[last_index..whole.start()].trim());

            let span_start = cleaned.len();
            cleaned.push_str(span_text);
            let span_end = cleaned.len();

            spans.push(EntitySpan::new(span_text, span_start, span_end, label)?);
            last_index = whole.end();
        }

        cleaned.push_str(&doc[last_index..]);
        Ok((cleaned, spans))
    }
}
