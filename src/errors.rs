//! Typed error definitions for gather.
//! Provides a small set of well-known failure modes for better logs and tests.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatherError {
    #[error("Unsupported digest algorithm: '{0}' (expected one of CRC32, MD2, MD4, MD5, SHA256, SHA384, SHA512)")]
    UnsupportedAlgorithm(String),

    #[error("Source directory invalid or not a directory: {0}")]
    SourceInvalid(PathBuf),

    #[error("Target directory unusable: {path}: {context}")]
    TargetInvalid { path: PathBuf, context: String },

    #[error("Operation interrupted by user")]
    Interrupted,
}

impl GatherError {
    /// Short stable code for structured logging.
    pub fn code(&self) -> &'static str {
        match self {
            GatherError::UnsupportedAlgorithm(_) => "unsupported_algorithm",
            GatherError::SourceInvalid(_) => "source_invalid",
            GatherError::TargetInvalid { .. } => "target_invalid",
            GatherError::Interrupted => "interrupted",
        }
    }
}
