use tracing::warn;

use crate::error::{NomiError, Result};
use crate::types::{EntitySpan, Token};

use super::{find_span, squash_whitespace, ChunkArtifacts, ErrorPolicy, Validator};

/// Re-parses a BIO label sequence into implied entity spans and checks them
/// against the expected spans.
///
/// A run is `B-<T>` followed by any number of `I-` tags; it is closed by
/// `O`, by the next `B-`, or by the end of the sequence. For every closed
/// run the covered tokens' text is stitched together and compared —
/// whitespace removed — against the expected span matched by exact
/// (start, end, label). Detected problems:
///
/// - orphan `I-` tags with no preceding `B-`,
/// - runs with no exactly-matching expected span,
/// - stitched-text mismatches against the expected span text.
#[derive(Debug, Clone, Copy, Default)]
pub struct BioAlignmentValidator {
    policy: ErrorPolicy,
}

impl BioAlignmentValidator {
    /// Creates a BIO alignment validator with the given error policy.
    #[must_use]
    pub fn new(policy: ErrorPolicy) -> Self {
        Self { policy }
    }

    /// Checks a BIO label sequence against the expected entity spans.
    ///
    /// Returns the collected findings under `Warn`, or the first finding as
    /// a [`NomiError::SchemeViolation`] under `Raise`.
    pub fn check(
        &self,
        tokens: &[Token],
        labels: &[String],
        entities: &[EntitySpan],
    ) -> Result<Vec<String>> {
        check_lengths(tokens, labels)?;
        let mut findings = Vec::new();
        // Open run: (index of the B- token, entity type).
        let mut open: Option<(usize, String)> = None;

        for (idx, label) in labels.iter().enumerate() {
            if let Some(entity_type) = label.strip_prefix("B-") {
                if let Some((start_idx, open_type)) = open.take() {
                    self.close_run(tokens, entities, start_idx, idx - 1, &open_type, &mut findings)?;
                }
                open = Some((idx, entity_type.to_string()));
            } else if label.starts_with("I-") {
                if open.is_none() {
                    self.report(
                        &mut findings,
                        format!("continuation tag {label:?} at index {idx} has no preceding B- tag"),
                    )?;
                }
                // An open run absorbs the tag; type drift surfaces in the
                // stitched-text comparison when the run closes.
            } else if let Some((start_idx, open_type)) = open.take() {
                self.close_run(tokens, entities, start_idx, idx - 1, &open_type, &mut findings)?;
            }
        }

        if let Some((start_idx, open_type)) = open {
            self.close_run(
                tokens,
                entities,
                start_idx,
                labels.len() - 1,
                &open_type,
                &mut findings,
            )?;
        }

        Ok(findings)
    }

    /// Validates one closed run covering tokens `start_idx..=end_idx`.
    fn close_run(
        &self,
        tokens: &[Token],
        entities: &[EntitySpan],
        start_idx: usize,
        end_idx: usize,
        entity_type: &str,
        findings: &mut Vec<String>,
    ) -> Result<()> {
        let start = tokens[start_idx].start;
        let end = tokens[end_idx].end;
        let stitched: String = tokens[start_idx..=end_idx]
            .iter()
            .map(|token| token.text.as_str())
            .collect();

        match find_span(entities, start, end, entity_type) {
            None => self.report(
                findings,
                format!("no matching span for entity {entity_type:?} at {start}..{end}"),
            ),
            Some(expected) => {
                if squash_whitespace(&stitched) != squash_whitespace(&expected.text) {
                    self.report(
                        findings,
                        format!(
                            "stitched text {stitched:?} does not match span text {:?} for entity {entity_type:?} at {start}..{end}",
                            expected.text
                        ),
                    )
                } else {
                    Ok(())
                }
            }
        }
    }

    fn report(&self, findings: &mut Vec<String>, message: String) -> Result<()> {
        report(self.policy, "bio-alignment", findings, message)
    }
}

impl Validator for BioAlignmentValidator {
    fn name(&self) -> &'static str {
        "bio-alignment"
    }

    fn validate(&self, chunk: &ChunkArtifacts<'_>) -> Result<Vec<String>> {
        self.check(chunk.tokens, chunk.labels, chunk.entities)
    }
}

/// Re-parses a BILOU label sequence into implied entity spans and checks
/// them against the expected spans.
///
/// Multi-token runs must be `B-<T> (I-<T>)* L-<T>`; single-token entities
/// must be `U-<T>`. In addition to the BIO checks this detects runs that
/// are never closed by an `L-` tag and orphan `I-`/`L-` tags.
#[derive(Debug, Clone, Copy, Default)]
pub struct BilouAlignmentValidator {
    policy: ErrorPolicy,
}

impl BilouAlignmentValidator {
    /// Creates a BILOU alignment validator with the given error policy.
    #[must_use]
    pub fn new(policy: ErrorPolicy) -> Self {
        Self { policy }
    }

    /// Checks a BILOU label sequence against the expected entity spans.
    ///
    /// Returns the collected findings under `Warn`, or the first finding as
    /// a [`NomiError::SchemeViolation`] under `Raise`.
    pub fn check(
        &self,
        tokens: &[Token],
        labels: &[String],
        entities: &[EntitySpan],
    ) -> Result<Vec<String>> {
        check_lengths(tokens, labels)?;
        let mut findings = Vec::new();
        let mut idx = 0;

        while idx < labels.len() {
            let label = labels[idx].as_str();

            if let Some(entity_type) = label.strip_prefix("B-") {
                let start_idx = idx;
                idx += 1;
                while idx < labels.len() && labels[idx].starts_with("I-") {
                    idx += 1;
                }
                if idx < labels.len() && labels[idx].starts_with("L-") {
                    let end_idx = idx;
                    idx += 1;
                    self.close_run(tokens, entities, start_idx, end_idx, entity_type, &mut findings)?;
                } else {
                    // The run was never closed; whatever label ended it is
                    // reprocessed on the next iteration.
                    self.report(
                        &mut findings,
                        format!(
                            "entity {entity_type:?} starting at token {start_idx} is not closed by an L- tag"
                        ),
                    )?;
                }
            } else if let Some(entity_type) = label.strip_prefix("U-") {
                let start = tokens[idx].start;
                let end = tokens[idx].end;
                match find_span(entities, start, end, entity_type) {
                    None => self.report(
                        &mut findings,
                        format!("no matching span for unit entity {entity_type:?} at {start}..{end}"),
                    )?,
                    Some(expected) => {
                        if squash_whitespace(&tokens[idx].text) != squash_whitespace(&expected.text)
                        {
                            self.report(
                                &mut findings,
                                format!(
                                    "token text {:?} does not match span text {:?} for unit entity {entity_type:?} at {start}..{end}",
                                    tokens[idx].text, expected.text
                                ),
                            )?;
                        }
                    }
                }
                idx += 1;
            } else if label.starts_with("I-") || label.starts_with("L-") {
                self.report(
                    &mut findings,
                    format!("orphan continuation tag {label:?} at index {idx}"),
                )?;
                idx += 1;
            } else {
                idx += 1;
            }
        }

        Ok(findings)
    }

    /// Validates one `B- .. L-` run covering tokens `start_idx..=end_idx`.
    fn close_run(
        &self,
        tokens: &[Token],
        entities: &[EntitySpan],
        start_idx: usize,
        end_idx: usize,
        entity_type: &str,
        findings: &mut Vec<String>,
    ) -> Result<()> {
        let start = tokens[start_idx].start;
        let end = tokens[end_idx].end;
        let stitched: String = tokens[start_idx..=end_idx]
            .iter()
            .map(|token| token.text.as_str())
            .collect();

        match find_span(entities, start, end, entity_type) {
            None => self.report(
                findings,
                format!("no matching span for entity {entity_type:?} at {start}..{end}"),
            ),
            Some(expected) => {
                if squash_whitespace(&stitched) != squash_whitespace(&expected.text) {
                    self.report(
                        findings,
                        format!(
                            "stitched text {stitched:?} does not match span text {:?} for entity {entity_type:?} at {start}..{end}",
                            expected.text
                        ),
                    )
                } else {
                    Ok(())
                }
            }
        }
    }

    fn report(&self, findings: &mut Vec<String>, message: String) -> Result<()> {
        report(self.policy, "bilou-alignment", findings, message)
    }
}

impl Validator for BilouAlignmentValidator {
    fn name(&self) -> &'static str {
        "bilou-alignment"
    }

    fn validate(&self, chunk: &ChunkArtifacts<'_>) -> Result<Vec<String>> {
        self.check(chunk.tokens, chunk.labels, chunk.entities)
    }
}

fn check_lengths(tokens: &[Token], labels: &[String]) -> Result<()> {
    if tokens.len() != labels.len() {
        return Err(NomiError::SchemeViolation {
            message: format!(
                "label sequence length {} does not match token count {}",
                labels.len(),
                tokens.len()
            ),
        });
    }
    Ok(())
}

fn report(
    policy: ErrorPolicy,
    validator: &'static str,
    findings: &mut Vec<String>,
    message: String,
) -> Result<()> {
    match policy {
        ErrorPolicy::Warn => {
            warn!(validator, "{message}");
            findings.push(message);
            Ok(())
        }
        ErrorPolicy::Raise => Err(NomiError::SchemeViolation { message }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(tags: &[&str]) -> Vec<String> {
        tags.iter().map(|s| s.to_string()).collect()
    }

    fn obama_tokens() -> Vec<Token> {
        vec![
            Token::new(0, "Barack", 0, 6),
            Token::new(1, "Obama", 7, 12),
            Token::new(2, "visited", 13, 20),
        ]
    }

    mod bio {
        use super::*;

        #[test]
        fn well_formed_sequence_passes() {
            let entities = vec![EntitySpan::new("Barack Obama", 0, 12, "PER").unwrap()];
            let validator = BioAlignmentValidator::new(ErrorPolicy::Raise);
            let findings = validator
                .check(&obama_tokens(), &labels(&["B-PER", "I-PER", "O"]), &entities)
                .unwrap();
            assert!(findings.is_empty());
        }

        #[test]
        fn run_closed_by_sequence_end_passes() {
            let tokens = vec![
                Token::new(0, "visited", 0, 7),
                Token::new(1, "Barack", 8, 14),
                Token::new(2, "Obama", 15, 20),
            ];
            let entities = vec![EntitySpan::new("Barack Obama", 8, 20, "PER").unwrap()];
            let validator = BioAlignmentValidator::new(ErrorPolicy::Raise);
            let findings = validator
                .check(&tokens, &labels(&["O", "B-PER", "I-PER"]), &entities)
                .unwrap();
            assert!(findings.is_empty());
        }

        #[test]
        fn adjacent_entities_both_validate() {
            let tokens = vec![
                Token::new(0, "Barack", 0, 6),
                Token::new(1, "Obama", 7, 12),
                Token::new(2, "Berlin", 13, 19),
            ];
            let entities = vec![
                EntitySpan::new("Barack Obama", 0, 12, "PER").unwrap(),
                EntitySpan::new("Berlin", 13, 19, "LOC").unwrap(),
            ];
            let validator = BioAlignmentValidator::new(ErrorPolicy::Raise);
            let findings = validator
                .check(&tokens, &labels(&["B-PER", "I-PER", "B-LOC"]), &entities)
                .unwrap();
            assert!(findings.is_empty());
        }

        #[test]
        fn orphan_inside_tag_is_detected() {
            let validator = BioAlignmentValidator::new(ErrorPolicy::Warn);
            let findings = validator
                .check(&obama_tokens(), &labels(&["O", "I-PER", "O"]), &[])
                .unwrap();
            assert_eq!(findings.len(), 1);
            assert!(findings[0].contains("no preceding B- tag"));
        }

        #[test]
        fn orphan_inside_tag_raises() {
            let validator = BioAlignmentValidator::new(ErrorPolicy::Raise);
            let err = validator
                .check(&obama_tokens(), &labels(&["O", "I-PER", "O"]), &[])
                .unwrap_err();
            assert!(matches!(err, NomiError::SchemeViolation { .. }));
        }

        #[test]
        fn missing_expected_span_is_detected() {
            let validator = BioAlignmentValidator::new(ErrorPolicy::Warn);
            let findings = validator
                .check(&obama_tokens(), &labels(&["B-PER", "I-PER", "O"]), &[])
                .unwrap();
            assert!(findings[0].contains("no matching span"));
        }

        #[test]
        fn label_type_must_match_expected_span() {
            let entities = vec![EntitySpan::new("Barack Obama", 0, 12, "ORG").unwrap()];
            let validator = BioAlignmentValidator::new(ErrorPolicy::Warn);
            let findings = validator
                .check(&obama_tokens(), &labels(&["B-PER", "I-PER", "O"]), &entities)
                .unwrap();
            assert!(findings[0].contains("no matching span"));
        }

        #[test]
        fn stitched_text_mismatch_is_detected() {
            // Span bounds match, but the recorded text disagrees with what
            // the labeled tokens spell out.
            let entities = vec![EntitySpan::new("Barack Osama", 0, 12, "PER").unwrap()];
            let validator = BioAlignmentValidator::new(ErrorPolicy::Warn);
            let findings = validator
                .check(&obama_tokens(), &labels(&["B-PER", "I-PER", "O"]), &entities)
                .unwrap();
            assert!(findings[0].contains("does not match span text"));
        }

        #[test]
        fn length_mismatch_is_always_fatal() {
            let validator = BioAlignmentValidator::new(ErrorPolicy::Warn);
            let err = validator
                .check(&obama_tokens(), &labels(&["O", "O"]), &[])
                .unwrap_err();
            assert!(matches!(err, NomiError::SchemeViolation { .. }));
        }
    }

    mod bilou {
        use super::*;

        #[test]
        fn unit_entity_passes() {
            let entities = vec![EntitySpan::new("Barack", 0, 6, "PER").unwrap()];
            let validator = BilouAlignmentValidator::new(ErrorPolicy::Raise);
            let findings = validator
                .check(&obama_tokens(), &labels(&["U-PER", "O", "O"]), &entities)
                .unwrap();
            assert!(findings.is_empty());
        }

        #[test]
        fn closed_run_passes() {
            let entities = vec![EntitySpan::new("Barack Obama", 0, 12, "PER").unwrap()];
            let validator = BilouAlignmentValidator::new(ErrorPolicy::Raise);
            let findings = validator
                .check(&obama_tokens(), &labels(&["B-PER", "L-PER", "O"]), &entities)
                .unwrap();
            assert!(findings.is_empty());
        }

        #[test]
        fn three_token_run_passes() {
            let tokens = vec![
                Token::new(0, "The", 0, 3),
                Token::new(1, "Barack", 4, 10),
                Token::new(2, "Hussein", 11, 18),
                Token::new(3, "Obama", 19, 24),
            ];
            let entities = vec![EntitySpan::new("Barack Hussein Obama", 4, 24, "PER").unwrap()];
            let validator = BilouAlignmentValidator::new(ErrorPolicy::Raise);
            let findings = validator
                .check(&tokens, &labels(&["O", "B-PER", "I-PER", "L-PER"]), &entities)
                .unwrap();
            assert!(findings.is_empty());
        }

        #[test]
        fn unclosed_run_is_detected() {
            let validator = BilouAlignmentValidator::new(ErrorPolicy::Warn);
            let findings = validator
                .check(&obama_tokens(), &labels(&["B-PER", "I-PER", "O"]), &[])
                .unwrap();
            assert!(findings[0].contains("not closed by an L- tag"));
        }

        #[test]
        fn run_cut_off_by_sequence_end_is_detected() {
            let validator = BilouAlignmentValidator::new(ErrorPolicy::Warn);
            let findings = validator
                .check(&obama_tokens(), &labels(&["O", "B-PER", "I-PER"]), &[])
                .unwrap();
            assert!(findings[0].contains("not closed"));
        }

        #[test]
        fn orphan_tags_are_detected() {
            let validator = BilouAlignmentValidator::new(ErrorPolicy::Warn);
            let findings = validator
                .check(&obama_tokens(), &labels(&["O", "L-PER", "I-LOC"]), &[])
                .unwrap();
            assert_eq!(findings.len(), 2);
            assert!(findings[0].contains("orphan continuation tag"));
        }

        #[test]
        fn unit_text_mismatch_is_detected() {
            // Span bounds 0..6 match token 0, but the recorded text differs.
            let entities = vec![EntitySpan::new("Osama", 0, 6, "PER").unwrap()];
            let validator = BilouAlignmentValidator::new(ErrorPolicy::Warn);
            let findings = validator
                .check(&obama_tokens(), &labels(&["U-PER", "O", "O"]), &entities)
                .unwrap();
            assert!(findings[0].contains("does not match span text"));
        }

        #[test]
        fn first_finding_raises_under_raise() {
            let validator = BilouAlignmentValidator::new(ErrorPolicy::Raise);
            let err = validator
                .check(&obama_tokens(), &labels(&["B-PER", "I-PER", "O"]), &[])
                .unwrap_err();
            assert!(matches!(err, NomiError::SchemeViolation { .. }));
        }
    }
}
