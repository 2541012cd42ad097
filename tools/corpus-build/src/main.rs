//! Corpus Build Tool
//!
//! Drives a nomi preprocessing pipeline over a file of annotated documents
//! and writes a token-labeled dataset, or checks span integrity of an
//! input without exporting anything.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use nomi_core::chunk::{Chunker, FixedLengthChunker, NoOpChunker, SlidingWindowChunker};
use nomi_core::export::JsonExporter;
use nomi_core::label::{
    BilouLabeler, BinaryLabeler, BioLabeler, Labeler, LabelerConfig, MisalignmentPolicy,
    SubwordStrategy,
};
use nomi_core::load::{JsonLoader, Loader};
use nomi_core::parse::{CategoryTagParser, ConllParser, DocumentParser, HtmlTagParser, JsonSpanParser};
use nomi_core::pipeline::{Pipeline, PipelineConfig};
use nomi_core::tokenize::WhitespaceTokenizer;
use nomi_core::validate::{
    BilouAlignmentValidator, BioAlignmentValidator, ErrorPolicy, ParseValidator, Validator,
};

/// CLI arguments
#[derive(Parser)]
#[command(name = "corpus-build")]
#[command(about = "Build token-labeled NER datasets from annotated documents")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline and export a labeled dataset
    Build {
        /// Input JSON file: array of {"id", "text"|"html"} documents
        input: PathBuf,

        /// Output JSON file for the labeled records
        output: PathBuf,

        /// Document parser for the annotated bodies
        #[arg(short, long, value_enum, default_value_t = ParserKind::Html)]
        parser: ParserKind,

        /// Tagging scheme
        #[arg(short, long, value_enum, default_value_t = SchemeKind::Bio)]
        scheme: SchemeKind,

        /// Subword labeling strategy
        #[arg(long, value_enum, default_value_t = SubwordsKind::All)]
        subwords: SubwordsKind,

        /// Misalignment handling policy
        #[arg(long, value_enum, default_value_t = MisalignmentKind::Skip)]
        misalignment: MisalignmentKind,

        /// Chunking strategy
        #[arg(long, value_enum, default_value_t = ChunkerKind::None)]
        chunker: ChunkerKind,

        /// Window size in tokens (fixed chunker)
        #[arg(long, default_value_t = 256)]
        max_tokens: usize,

        /// Window overlap in tokens (fixed chunker)
        #[arg(long, default_value_t = 0)]
        overlap: usize,

        /// Window size in bytes (sliding-window chunker)
        #[arg(long, default_value_t = 512)]
        window_size: usize,

        /// Window stride in bytes (sliding-window chunker)
        #[arg(long, default_value_t = 256)]
        stride: usize,

        /// Attach numeric label ids fitted over the whole corpus
        #[arg(long)]
        encode_labels: bool,

        /// Skip span/label validation of every chunk
        #[arg(long)]
        no_validate: bool,

        /// Abort the whole batch on the first failing chunk
        #[arg(long)]
        fail_fast: bool,
    },
    /// Check span integrity of parsed documents without exporting
    Check {
        /// Input JSON file: array of {"id", "text"|"html"} documents
        input: PathBuf,

        /// Document parser for the annotated bodies
        #[arg(short, long, value_enum, default_value_t = ParserKind::Html)]
        parser: ParserKind,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ParserKind {
    /// Inline HTML annotation tags
    Html,
    /// NCBI-style <category="..."> tags
    Category,
    /// CoNLL "token label" lines
    Conll,
    /// JSON {"text", "entities"} payloads
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SchemeKind {
    Bio,
    Bilou,
    Binary,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SubwordsKind {
    First,
    All,
    Strict,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MisalignmentKind {
    Skip,
    Warn,
    Fail,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ChunkerKind {
    /// Single chunk per document
    None,
    /// Fixed-size token windows
    Fixed,
    /// Sliding character windows
    Window,
}

fn make_parser(kind: ParserKind) -> Result<Box<dyn DocumentParser>> {
    Ok(match kind {
        ParserKind::Html => Box::new(HtmlTagParser::new()),
        ParserKind::Category => {
            Box::new(CategoryTagParser::new().context("building category parser")?)
        }
        ParserKind::Conll => Box::new(ConllParser::new()),
        ParserKind::Json => Box::new(JsonSpanParser::new()),
    })
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Build {
            input,
            output,
            parser,
            scheme,
            subwords,
            misalignment,
            chunker,
            max_tokens,
            overlap,
            window_size,
            stride,
            encode_labels,
            no_validate,
            fail_fast,
        } => {
            let labeler_config = LabelerConfig::new()
                .with_subword_strategy(match subwords {
                    SubwordsKind::First => SubwordStrategy::First,
                    SubwordsKind::All => SubwordStrategy::All,
                    SubwordsKind::Strict => SubwordStrategy::Strict,
                })
                .with_misalignment_policy(match misalignment {
                    MisalignmentKind::Skip => MisalignmentPolicy::Skip,
                    MisalignmentKind::Warn => MisalignmentPolicy::Warn,
                    MisalignmentKind::Fail => MisalignmentPolicy::Fail,
                });

            let labeler: Box<dyn Labeler> = match scheme {
                SchemeKind::Bio => Box::new(BioLabeler::new(labeler_config)),
                SchemeKind::Bilou => Box::new(BilouLabeler::new(labeler_config)),
                SchemeKind::Binary => Box::new(BinaryLabeler::new(labeler_config)),
            };

            let chunker: Box<dyn Chunker> = match chunker {
                ChunkerKind::None => Box::new(NoOpChunker::new()),
                ChunkerKind::Fixed => Box::new(FixedLengthChunker::new(max_tokens, overlap)),
                ChunkerKind::Window => Box::new(SlidingWindowChunker::new(window_size, stride)),
            };

            let mut pipeline = Pipeline::new(
                Box::new(JsonLoader::new()),
                make_parser(parser)?,
                Box::new(WhitespaceTokenizer::new()),
                chunker,
                labeler,
                Box::new(JsonExporter::new(&output)),
            )
            .with_config(
                PipelineConfig::new()
                    .with_fail_fast(fail_fast)
                    .with_encode_labels(encode_labels),
            );

            if !no_validate {
                pipeline = pipeline
                    .with_validator(Box::new(ParseValidator::new(ErrorPolicy::Warn)));
                let label_validator: Option<Box<dyn Validator>> = match scheme {
                    SchemeKind::Bio => {
                        Some(Box::new(BioAlignmentValidator::new(ErrorPolicy::Warn)))
                    }
                    SchemeKind::Bilou => {
                        Some(Box::new(BilouAlignmentValidator::new(ErrorPolicy::Warn)))
                    }
                    // Binary labels carry no span structure to re-parse.
                    SchemeKind::Binary => None,
                };
                if let Some(validator) = label_validator {
                    pipeline = pipeline.with_validator(validator);
                }
            }

            let report = pipeline
                .run(&input)
                .with_context(|| format!("processing {}", input.display()))?;

            info!(
                documents = report.documents,
                records = report.records,
                chunks_failed = report.chunks_failed,
                validation_findings = report.validation_findings,
                "dataset written to {}",
                output.display()
            );
            Ok(())
        }
        Commands::Check { input, parser } => {
            let parser = make_parser(parser)?;
            let documents = JsonLoader::new()
                .load(&input)
                .with_context(|| format!("loading {}", input.display()))?;
            let validator = ParseValidator::new(ErrorPolicy::Warn);

            let mut total_findings = 0;
            for document in &documents {
                let (text, entities) = parser
                    .parse(&document.text)
                    .with_context(|| format!("parsing document {}", document.id))?;
                let findings = validator.check(&text, &entities)?;
                for finding in &findings {
                    eprintln!("{}: {finding}", document.id);
                }
                total_findings += findings.len();
            }

            if total_findings > 0 {
                bail!(
                    "span integrity check failed: {total_findings} finding(s) across {} document(s)",
                    documents.len()
                );
            }
            info!(documents = documents.len(), "all spans check out");
            Ok(())
        }
    }
}
