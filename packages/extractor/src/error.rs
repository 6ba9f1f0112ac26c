//! Error types for the statblock extractor.
//!
//! A single `ExtractorError` covers the library: the conversion core only
//! ever produces `MalformedInput`, `MissingField` and `MultipleMinions`;
//! the remaining variants belong to the archive and output layers.

use thiserror::Error;

/// Main error type for the extractor library.
#[derive(Debug, Error)]
pub enum ExtractorError {
    /// Input bytes are not well-formed XML.
    #[error("Malformed XML input: {0}")]
    MalformedInput(String),

    /// A minion-shaped structure lacks a required field.
    #[error("Missing required field '{field}' in {context}")]
    MissingField { field: String, context: String },

    /// More than one minion was found under a single character.
    #[error("Found {count} minions under one character; only a single minion is supported")]
    MultipleMinions { count: usize },

    /// Input file type is not recognised.
    #[error("Unsupported input '{0}'. Expected a portfolio archive (.por, .stock, .zip) or an .xml statblock")]
    UnsupportedInput(String),

    /// Archive member name does not carry a character name.
    #[error("Cannot derive a character name from archive member '{0}'")]
    InvalidMemberName(String),

    /// Input is not a readable zip archive.
    #[error("Invalid portfolio archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// An archive member could not be decompressed or failed its checksum.
    #[error("Failed to read member '{member}': {source}")]
    MemberRead {
        member: String,
        #[source]
        source: zip::result::ZipError,
    },

    /// One or more inputs of a batch failed.
    #[error("{failed} of {total} inputs failed")]
    BatchFailed { failed: usize, total: usize },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<roxmltree::Error> for ExtractorError {
    fn from(err: roxmltree::Error) -> Self {
        Self::MalformedInput(err.to_string())
    }
}

impl ExtractorError {
    /// Whether this error only affects a minion split, leaving the primary
    /// character's output intact.
    #[must_use]
    pub fn is_minion_error(&self) -> bool {
        matches!(self, Self::MissingField { .. } | Self::MultipleMinions { .. })
    }
}

/// Result type alias for extractor operations.
pub type Result<T> = std::result::Result<T, ExtractorError>;
