//! # Nomi Core
//!
//! The heart of the nomi dataset-preparation engine. Converts annotated
//! documents (HTML-tagged or span-annotated text) into token-level labeled
//! sequences for training sequence-labeling models, with span-to-token
//! alignment, BIO/BILOU/binary label schemes, and round-trip validation.
//!
//! ## Quick Start
//!
//! ```rust
//! use nomi_core::align::SpanAligner;
//! use nomi_core::label::{BioLabeler, Labeler, LabelerConfig};
//! use nomi_core::types::{EntitySpan, Token};
//!
//! let tokens = vec![
//!     Token::new(0, "Barack", 0, 6),
//!     Token::new(1, "Obama", 7, 12),
//!     Token::new(2, "visited", 13, 20),
//! ];
//! let entity = EntitySpan::new("Barack Obama", 0, 12, "PER").unwrap();
//!
//! let aligned = SpanAligner::new().align(&tokens, &[entity]);
//! let labels = BioLabeler::new(LabelerConfig::default())
//!     .label(&tokens, &aligned)
//!     .unwrap();
//!
//! assert_eq!(labels, ["B-PER", "I-PER", "O"]);
//! ```
pub mod align;
pub mod chunk;
pub mod error;
pub mod export;
pub mod label;
pub mod load;
pub mod parse;
pub mod pipeline;
pub mod tokenize;
pub mod types;
pub mod validate;

// Re-export primary API
pub use align::SpanAligner;
pub use chunk::{Chunk, Chunker, FixedLengthChunker, NoOpChunker, SlidingWindowChunker};
pub use error::{NomiError, Result};
pub use export::{Exporter, JsonExporter};
pub use label::{
    BilouLabeler, BinaryLabeler, BioLabeler, LabelEncoder, Labeler, LabelerConfig,
    MisalignmentPolicy, SubwordStrategy,
};
pub use load::{JsonLoader, Loader, RawDocument};
pub use parse::{
    CategoryTagParser, ConllParser, DocumentParser, HtmlTagParser, JsonSpanParser, LabelStrategy,
};
pub use pipeline::{Pipeline, PipelineConfig, PipelineReport};
#[cfg(feature = "hf")]
pub use tokenize::HuggingFaceTokenizer;
pub use tokenize::{Tokenizer, WhitespaceTokenizer};
pub use types::{DatasetRecord, EntitySpan, Token, TokenEntitySpan};
pub use validate::{
    BilouAlignmentValidator, BioAlignmentValidator, ChunkArtifacts, ErrorPolicy, ParseValidator,
    TokenAlignmentValidator, TokenDecoder, Validator,
};
