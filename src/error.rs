//! Error types for the matrix extractor

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractorError {
    #[error("Image not found: {0}")]
    ImageNotFound(String),

    #[error("Container runtime unavailable: {0}")]
    RuntimeUnavailable(String),

    #[error("Runtime command failed: {0}")]
    RuntimeCommand(String),

    #[error("Invalid runtime output: {0}")]
    InvalidOutput(String),

    #[error("Missing mandatory snippet: {0}")]
    MissingSnippet(String),

    #[error("Invalid snippets document: {0}")]
    InvalidSnippets(String),

    #[error("Invalid release: {0}")]
    InvalidRelease(String),

    #[error("Unknown container: {0}")]
    UnknownContainer(String),

    #[error("Data store error at {}: {reason}", .path.display())]
    Store { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

impl ExtractorError {
    /// Whether the runtime reported that the requested image does not exist
    pub fn is_image_not_found(&self) -> bool {
        matches!(self, ExtractorError::ImageNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, ExtractorError>;
