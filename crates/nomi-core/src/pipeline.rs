//! # Preprocessing Pipeline
//!
//! Sequences loader → parser → tokenizer → chunker → aligner → labeler →
//! validators → exporter over a batch of documents. Every stage is a trait
//! object chosen at construction time; the pipeline itself only decides
//! ordering and failure isolation.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::align::SpanAligner;
use crate::chunk::{Chunk, Chunker};
use crate::error::Result;
use crate::export::Exporter;
use crate::label::{LabelEncoder, Labeler};
use crate::load::Loader;
use crate::parse::DocumentParser;
use crate::tokenize::Tokenizer;
use crate::types::DatasetRecord;
use crate::validate::{ChunkArtifacts, Validator};

/// Pipeline behavior switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Abort the whole batch on the first failing document or chunk
    /// instead of skipping it.
    pub fail_fast: bool,
    /// Fit a [`LabelEncoder`] over the produced label sequences and attach
    /// numeric label ids to every record before export.
    pub encode_labels: bool,
}

impl PipelineConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether a failing chunk aborts the whole batch.
    #[must_use]
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Sets whether numeric label ids are attached before export.
    #[must_use]
    pub fn with_encode_labels(mut self, encode_labels: bool) -> Self {
        self.encode_labels = encode_labels;
        self
    }
}

/// Outcome of one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineReport {
    /// Number of documents loaded.
    pub documents: usize,
    /// Number of records exported.
    pub records: usize,
    /// Number of chunks skipped because a stage failed.
    pub chunks_failed: usize,
    /// Total findings collected by warn-mode validators.
    pub validation_findings: usize,
}

/// The preprocessing pipeline.
///
/// Stages are injected at construction; validators are optional and run in
/// the order they were added. Chunks are processed one at a time — every
/// core operation is pure and synchronous, and a chunk failure is isolated
/// to that chunk unless [`PipelineConfig::fail_fast`] is set.
pub struct Pipeline {
    loader: Box<dyn Loader>,
    parser: Box<dyn DocumentParser>,
    tokenizer: Box<dyn Tokenizer>,
    chunker: Box<dyn Chunker>,
    aligner: SpanAligner,
    labeler: Box<dyn Labeler>,
    validators: Vec<Box<dyn Validator>>,
    exporter: Box<dyn Exporter>,
    config: PipelineConfig,
}

impl Pipeline {
    /// Creates a pipeline from its stages.
    #[must_use]
    pub fn new(
        loader: Box<dyn Loader>,
        parser: Box<dyn DocumentParser>,
        tokenizer: Box<dyn Tokenizer>,
        chunker: Box<dyn Chunker>,
        labeler: Box<dyn Labeler>,
        exporter: Box<dyn Exporter>,
    ) -> Self {
        Self {
            loader,
            parser,
            tokenizer,
            chunker,
            aligner: SpanAligner::new(),
            labeler,
            validators: Vec::new(),
            exporter,
            config: PipelineConfig::default(),
        }
    }

    /// Appends a validator; validators run in insertion order per chunk.
    #[must_use]
    pub fn with_validator(mut self, validator: Box<dyn Validator>) -> Self {
        self.validators.push(validator);
        self
    }

    /// Replaces the pipeline configuration.
    #[must_use]
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Runs the pipeline over all documents at `input` and exports the
    /// resulting records.
    ///
    /// # Errors
    ///
    /// Loading and exporting errors always abort. Per-document and
    /// per-chunk errors abort only under
    /// [`PipelineConfig::fail_fast`]; otherwise the chunk is skipped,
    /// logged, and counted in the report.
    pub fn run(&self, input: &Path) -> Result<PipelineReport> {
        let documents = self.loader.load(input)?;
        let mut records: Vec<DatasetRecord> = Vec::new();
        let mut chunks_failed = 0;
        let mut validation_findings = 0;

        for document in &documents {
            let chunks = match self.prepare_document(&document.text) {
                Ok(chunks) => chunks,
                Err(err) => {
                    if self.config.fail_fast {
                        return Err(err);
                    }
                    warn!(document = %document.id, error = %err, "document failed; skipping");
                    chunks_failed += 1;
                    continue;
                }
            };

            for chunk in &chunks {
                match self.process_chunk(&document.id, chunk) {
                    Ok((record, findings)) => {
                        validation_findings += findings;
                        records.push(record);
                    }
                    Err(err) => {
                        if self.config.fail_fast {
                            return Err(err);
                        }
                        warn!(
                            document = %document.id,
                            chunk = chunk.chunk_id,
                            error = %err,
                            "chunk failed; skipping"
                        );
                        chunks_failed += 1;
                    }
                }
            }
        }

        if self.config.encode_labels {
            self.encode_labels(&mut records)?;
        }

        self.exporter.export(&records)?;

        Ok(PipelineReport {
            documents: documents.len(),
            records: records.len(),
            chunks_failed,
            validation_findings,
        })
    }

    /// Parses, tokenizes, and chunks one document.
    fn prepare_document(&self, body: &str) -> Result<Vec<Chunk>> {
        let (text, entities) = self.parser.parse(body)?;
        let tokens = self.tokenizer.tokenize(&text)?;
        Ok(self.chunker.chunk(&text, &tokens, &entities))
    }

    /// Aligns, labels, and validates one chunk.
    fn process_chunk(&self, document_id: &str, chunk: &Chunk) -> Result<(DatasetRecord, usize)> {
        let aligned = self.aligner.align(&chunk.tokens, &chunk.entities);
        let labels = self.labeler.label(&chunk.tokens, &aligned)?;

        let artifacts = ChunkArtifacts {
            text: &chunk.text,
            tokens: &chunk.tokens,
            entities: &chunk.entities,
            aligned: &aligned,
            labels: &labels,
        };
        let mut findings = 0;
        for validator in &self.validators {
            let collected = validator.validate(&artifacts)?;
            if !collected.is_empty() {
                debug!(
                    validator = validator.name(),
                    document = document_id,
                    chunk = chunk.chunk_id,
                    findings = collected.len(),
                    "validator reported findings"
                );
            }
            findings += collected.len();
        }

        Ok((
            DatasetRecord {
                id: document_id.to_string(),
                chunk_id: chunk.chunk_id,
                text: chunk.text.clone(),
                tokens: chunk.tokens.clone(),
                entities: chunk.entities.clone(),
                bio_labels: Some(labels),
                labels: None,
            },
            findings,
        ))
    }

    /// Fits a label encoder over all produced sequences and attaches the
    /// numeric encoding to every record.
    fn encode_labels(&self, records: &mut [DatasetRecord]) -> Result<()> {
        let sequences: Vec<Vec<String>> = records
            .iter()
            .filter_map(|record| record.bio_labels.clone())
            .collect();
        let mut encoder = LabelEncoder::new();
        encoder.fit(&sequences);

        for record in records.iter_mut() {
            if let Some(bio_labels) = &record.bio_labels {
                record.labels = Some(encoder.encode(bio_labels)?);
            }
        }
        Ok(())
    }
}
