//! # Loaders
//!
//! Read raw annotated documents from disk into the shape parsers consume.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One raw document as loaded from storage: an identifier plus the
/// annotated body handed to a
/// [`DocumentParser`](crate::parse::DocumentParser).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDocument {
    /// Source document identifier.
    pub id: String,
    /// Annotated document body (HTML markup, CoNLL lines, or a JSON
    /// payload, depending on the parser in use). The field also accepts
    /// `"html"` as a key for compatibility with HTML corpora.
    #[serde(alias = "html")]
    pub text: String,
}

/// Loads raw annotated documents from a path.
pub trait Loader {
    /// Loads all documents from the given path.
    fn load(&self, path: &Path) -> Result<Vec<RawDocument>>;
}

/// Reads a JSON array of `{"id": ..., "text"|"html": ...}` documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLoader;

impl JsonLoader {
    /// Creates a new JSON loader.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Loader for JsonLoader {
    fn load(&self, path: &Path) -> Result<Vec<RawDocument>> {
        let file = File::open(path)?;
        let documents = serde_json::from_reader(BufReader::new(file))?;
        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("nomi-loader-{name}-{}.json", std::process::id()));
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_documents_with_text_or_html_key() {
        let path = write_temp(
            "docs",
            r#"[
                {"id": "a", "text": "plain body"},
                {"id": "b", "html": "<per>Obama</per>"}
            ]"#,
        );
        let documents = JsonLoader::new().load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].id, "a");
        assert_eq!(documents[0].text, "plain body");
        assert_eq!(documents[1].text, "<per>Obama</per>");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = JsonLoader::new()
            .load(Path::new("/nonexistent/nomi.json"))
            .unwrap_err();
        assert!(matches!(err, crate::error::NomiError::Io(_)));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let path = write_temp("malformed", "{not json");
        let err = JsonLoader::new().load(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, crate::error::NomiError::Json(_)));
    }
}
