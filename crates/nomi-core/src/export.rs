//! # Exporters
//!
//! Persist processed dataset records.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use crate::error::Result;
use crate::types::DatasetRecord;

/// Persists dataset records to their final destination.
pub trait Exporter {
    /// Exports all records.
    fn export(&self, records: &[DatasetRecord]) -> Result<()>;
}

/// Writes records as a pretty-printed JSON array.
#[derive(Debug, Clone)]
pub struct JsonExporter {
    output_path: PathBuf,
}

impl JsonExporter {
    /// Creates an exporter writing to the given path.
    #[must_use]
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }

    /// Returns the configured output path.
    #[must_use]
    pub fn output_path(&self) -> &std::path::Path {
        &self.output_path
    }
}

impl Exporter for JsonExporter {
    fn export(&self, records: &[DatasetRecord]) -> Result<()> {
        let file = File::create(&self.output_path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), records)?;
        Ok(())
    }
}
