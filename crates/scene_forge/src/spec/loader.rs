//! Specification document loading

use super::document::SpecDocument;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Spec loading errors
#[derive(Error, Debug)]
pub enum SpecError {
    /// The document location could not be read
    #[error("Spec document not found at {}: {source}", path.display())]
    NotFound {
        /// Location that was read
        path: PathBuf,
        /// Underlying IO failure
        #[source]
        source: std::io::Error,
    },

    /// The document is not a valid specification
    #[error("Failed to parse spec document {}: {message}", path.display())]
    Parse {
        /// Location that was read
        path: PathBuf,
        /// Human-readable diagnostic including line and column
        message: String,
    },
}

/// Parse specification text
pub fn parse_spec(text: &str) -> Result<SpecDocument, serde_json::Error> {
    serde_json::from_str(text)
}

/// Read and parse the specification document at `path`
///
/// Parsing is all-or-nothing: no partially parsed document is ever returned.
pub fn load_spec(path: impl AsRef<Path>) -> Result<SpecDocument, SpecError> {
    let path = path.as_ref();
    log::debug!("Loading spec document from {:?}", path);

    let text = std::fs::read_to_string(path).map_err(|source| SpecError::NotFound {
        path: path.to_path_buf(),
        source,
    })?;

    let document = parse_spec(&text).map_err(|e| SpecError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    log::info!(
        "Loaded spec for game '{}'",
        document.game_name().unwrap_or("<unnamed>")
    );
    Ok(document)
}
