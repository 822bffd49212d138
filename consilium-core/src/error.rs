//! Error types for the Consilium core.
//!
//! The dispatch pipeline itself is total: classification falls back to the
//! `general` category, selection falls back to the software engineer, and
//! synthesis recovers from malformed input locally. These variants cover the
//! few places where a caller can still get something wrong.

use std::path::PathBuf;

/// Top-level error type for the Consilium core library.
#[derive(Debug, thiserror::Error)]
pub enum ConsiliumError {
    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("Configuration file not found: {}", path.display())]
    ConfigFileNotFound { path: PathBuf },

    #[error("Malformed expert responses: {message}")]
    MalformedResponses { message: String },

    #[error("Unknown expert: {name}")]
    UnknownExpert { name: String },
}
