//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur while building citation rule tables
///
/// Extraction itself never fails: text without matches yields an empty list.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Pattern is not a valid regular expression
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// Offending pattern
        pattern: String,
        /// Compiler message
        reason: String,
    },

    /// Rule names a domain that does not exist
    #[error("Unknown domain: {0}")]
    UnknownDomain(String),

    /// Rule targets a domain that performs no citation extraction
    #[error("Citation extraction is disabled for domain: {0}")]
    ExtractionDisabled(String),

    /// Rule file could not be parsed
    #[error("Failed to parse rule file: {0}")]
    Toml(#[from] toml::de::Error),

    /// Rule file could not be read
    #[error("Failed to read rule file: {0}")]
    Io(#[from] std::io::Error),
}
