use thiserror::Error;

/// Errors that can occur during nomi core operations.
#[derive(Debug, Error)]
pub enum NomiError {
    /// An entity span was constructed with `start > end`.
    #[error("invalid span: start {start} is greater than end {end}")]
    InvalidSpan {
        /// Start offset of the rejected span.
        start: usize,
        /// End offset of the rejected span.
        end: usize,
    },

    /// An entity span has no aligned tokens and the labeler was configured to fail.
    #[error("no tokens aligned with entity {label:?} at {start}..{end}")]
    MisalignedEntity {
        /// Label of the unaligned entity.
        label: String,
        /// Start offset of the unaligned entity.
        start: usize,
        /// End offset of the unaligned entity.
        end: usize,
    },

    /// A label sequence is internally inconsistent for its tagging scheme.
    #[error("label scheme violation: {message}")]
    SchemeViolation {
        /// Description of the inconsistency.
        message: String,
    },

    /// A span's recorded text or offsets disagree with the source text.
    #[error("span integrity check failed: {message}")]
    SpanIntegrity {
        /// Description of the failed check, including the offending offsets.
        message: String,
    },

    /// A label outside the fitted vocabulary was passed to the encoder.
    #[error("unknown label {label:?}")]
    UnknownLabel {
        /// The label that was not found in the vocabulary.
        label: String,
    },

    /// A label id outside the fitted vocabulary was passed to the encoder.
    #[error("unknown label id {id}")]
    UnknownLabelId {
        /// The id that was not found in the vocabulary.
        id: usize,
    },

    /// An input document does not have the shape the parser/loader expects.
    #[error("malformed input: {message}")]
    MalformedInput {
        /// Description of the shape mismatch.
        message: String,
    },

    /// A regex pattern failed to compile (should not happen with static patterns).
    #[error("regex compilation error: {0}")]
    Regex(#[from] regex::Error),

    /// JSON (de)serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem failure while loading or exporting.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The subword tokenizer backend reported a failure.
    #[cfg(feature = "hf")]
    #[error("tokenizer error: {message}")]
    Tokenizer {
        /// Message reported by the backend.
        message: String,
    },
}

/// Result type alias for nomi operations.
pub type Result<T> = std::result::Result<T, NomiError>;
