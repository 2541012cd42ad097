use tracing::warn;

use crate::error::{NomiError, Result};
use crate::types::EntitySpan;

use super::{ChunkArtifacts, ErrorPolicy, Validator};

/// Validates entity spans against the source text they were parsed from.
///
/// Four checks per span, in order:
///
/// 1. the span text is non-empty;
/// 2. `0 <= start < end <= text.len()` and both offsets land on character
///    boundaries;
/// 3. the span text occurs verbatim somewhere in the source text;
/// 4. `text[start..end]` equals the span text exactly.
///
/// Any character-level shift between the recorded offsets and the recorded
/// text fails check 4. Under [`ErrorPolicy::Warn`] each finding is logged
/// and collected; under [`ErrorPolicy::Raise`] the first finding aborts
/// with [`NomiError::SpanIntegrity`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseValidator {
    policy: ErrorPolicy,
}

impl ParseValidator {
    /// Creates a parse validator with the given error policy.
    #[must_use]
    pub fn new(policy: ErrorPolicy) -> Self {
        Self { policy }
    }

    /// Checks every entity span against the source text.
    ///
    /// Returns the collected findings under `Warn`, or the first finding as
    /// an error under `Raise`.
    pub fn check(&self, text: &str, entities: &[EntitySpan]) -> Result<Vec<String>> {
        let mut findings = Vec::new();

        for span in entities {
            if span.text.is_empty() {
                self.report(
                    &mut findings,
                    format!("empty span text at {}..{}", span.start, span.end),
                )?;
                continue;
            }

            let slice = if span.start < span.end && span.end <= text.len() {
                text.get(span.start..span.end)
            } else {
                None
            };
            let Some(slice) = slice else {
                self.report(
                    &mut findings,
                    format!(
                        "invalid span indices {}..{} for text of length {}",
                        span.start,
                        span.end,
                        text.len()
                    ),
                )?;
                continue;
            };

            if !text.contains(&span.text) {
                self.report(
                    &mut findings,
                    format!("span text {:?} not found in source text", span.text),
                )?;
                continue;
            }

            if slice != span.text {
                self.report(
                    &mut findings,
                    format!(
                        "span text mismatch at {}..{}: expected {:?}, found {:?}",
                        span.start, span.end, span.text, slice
                    ),
                )?;
            }
        }

        Ok(findings)
    }

    fn report(&self, findings: &mut Vec<String>, message: String) -> Result<()> {
        match self.policy {
            ErrorPolicy::Warn => {
                warn!(validator = "parse", "{message}");
                findings.push(message);
                Ok(())
            }
            ErrorPolicy::Raise => Err(NomiError::SpanIntegrity { message }),
        }
    }
}

impl Validator for ParseValidator {
    fn name(&self) -> &'static str {
        "parse"
    }

    fn validate(&self, chunk: &ChunkArtifacts<'_>) -> Result<Vec<String>> {
        self.check(chunk.text, chunk.entities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "Barack Obama visited Berlin";

    #[test]
    fn exact_span_passes() {
        let span = EntitySpan::new("Barack Obama", 0, 12, "PER").unwrap();
        let validator = ParseValidator::new(ErrorPolicy::Raise);
        let findings = validator.check(TEXT, &[span]).unwrap();
        assert!(findings.is_empty());
    }

    #[test]
    fn shifted_offsets_fail_under_raise() {
        // Off by one: offsets 1..13 slice "arack Obama ".
        let span = EntitySpan::new("Barack Obama", 1, 13, "PER").unwrap();
        let validator = ParseValidator::new(ErrorPolicy::Raise);
        let err = validator.check(TEXT, &[span]).unwrap_err();
        assert!(matches!(err, NomiError::SpanIntegrity { .. }));
        assert!(err.to_string().contains("mismatch"));
    }

    #[test]
    fn shifted_offsets_collected_under_warn() {
        let span = EntitySpan::new("Barack Obama", 1, 13, "PER").unwrap();
        let validator = ParseValidator::new(ErrorPolicy::Warn);
        let findings = validator.check(TEXT, &[span]).unwrap();
        assert_eq!(findings.len(), 1);
        assert!(findings[0].contains("mismatch"));
    }

    #[test]
    fn empty_span_text_is_reported() {
        let span = EntitySpan::new("", 3, 3, "PER").unwrap();
        let validator = ParseValidator::new(ErrorPolicy::Warn);
        let findings = validator.check(TEXT, &[span]).unwrap();
        assert!(findings[0].contains("empty span text"));
    }

    #[test]
    fn out_of_bounds_indices_are_reported() {
        let span = EntitySpan::new("Berlin", 21, 999, "LOC").unwrap();
        let validator = ParseValidator::new(ErrorPolicy::Warn);
        let findings = validator.check(TEXT, &[span]).unwrap();
        assert!(findings[0].contains("invalid span indices"));
    }

    #[test]
    fn zero_width_span_is_reported_as_invalid() {
        let span = EntitySpan::new("x", 5, 5, "PER").unwrap();
        let validator = ParseValidator::new(ErrorPolicy::Warn);
        let findings = validator.check(TEXT, &[span]).unwrap();
        assert!(findings[0].contains("invalid span indices"));
    }

    #[test]
    fn text_absent_from_source_is_reported() {
        let span = EntitySpan::new("Merkel", 0, 6, "PER").unwrap();
        let validator = ParseValidator::new(ErrorPolicy::Warn);
        let findings = validator.check(TEXT, &[span]).unwrap();
        assert!(findings[0].contains("not found"));
    }

    #[test]
    fn offsets_splitting_a_character_are_reported() {
        // "é" is two bytes; offset 1 falls inside it.
        let text = "état";
        let span = EntitySpan::new("ta", 1, 3, "MISC").unwrap();
        let validator = ParseValidator::new(ErrorPolicy::Warn);
        let findings = validator.check(text, &[span]).unwrap();
        assert!(findings[0].contains("invalid span indices"));
    }

    #[test]
    fn multiple_findings_are_all_collected() {
        let spans = vec![
            EntitySpan::new("", 0, 0, "A").unwrap(),
            EntitySpan::new("Barack Obama", 1, 13, "PER").unwrap(),
            EntitySpan::new("Berlin", 21, 27, "LOC").unwrap(),
        ];
        let validator = ParseValidator::new(ErrorPolicy::Warn);
        let findings = validator.check(TEXT, &spans).unwrap();
        assert_eq!(findings.len(), 2);
    }
}
