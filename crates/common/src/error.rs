//! Error types shared across Maskwork crates.

use std::path::PathBuf;

/// Top-level error type for Maskwork operations.
#[derive(Debug, thiserror::Error)]
pub enum MaskworkError {
    #[error("Format error: {message}")]
    Format { message: String },

    #[error("Processing error: {message}")]
    Processing { message: String },

    #[error("Region error: {message}")]
    Region { message: String },

    #[error("Tag error: {message}")]
    Tag { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Unsupported operation: {message}")]
    Unsupported { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using MaskworkError.
pub type MaskworkResult<T> = Result<T, MaskworkError>;

impl MaskworkError {
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format {
            message: msg.into(),
        }
    }

    pub fn processing(msg: impl Into<String>) -> Self {
        Self::Processing {
            message: msg.into(),
        }
    }

    pub fn region(msg: impl Into<String>) -> Self {
        Self::Region {
            message: msg.into(),
        }
    }

    pub fn tag(msg: impl Into<String>) -> Self {
        Self::Tag {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported {
            message: msg.into(),
        }
    }
}
