//! Error types for the documentation crate.
//!
//! Only document loading can fail. Schema resolution never errors: an
//! unknown reference or an unsupported definition type resolves to an absent
//! value instead.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or rendering a Swagger document.
#[derive(Debug, Error)]
pub enum DocsError {
    /// The document is not valid JSON (or does not match the document shape).
    #[error("Failed to parse JSON document: {0}")]
    Json(#[from] serde_json::Error),

    /// The document is not valid YAML (or does not match the document shape).
    #[error("Failed to parse YAML document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The file extension does not name a supported document format.
    #[error("Unsupported document format: {}", path.display())]
    UnsupportedFormat {
        /// Path of the rejected file.
        path: PathBuf,
    },

    /// The document declares a `swagger` version other than 2.0.
    #[error("Unsupported swagger version: {version}")]
    UnsupportedVersion {
        /// The declared version.
        version: String,
    },

    /// IO error when reading a document or writing rendered output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DocsError {
    /// Create an unsupported format error.
    pub fn unsupported_format(path: impl Into<PathBuf>) -> Self {
        Self::UnsupportedFormat { path: path.into() }
    }

    /// Create an unsupported version error.
    pub fn unsupported_version(version: impl Into<String>) -> Self {
        Self::UnsupportedVersion {
            version: version.into(),
        }
    }
}

/// Result type for documentation operations.
pub type DocsResult<T> = Result<T, DocsError>;
