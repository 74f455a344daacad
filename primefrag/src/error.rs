//! Error types for stream transcoding

use primefrag_core::{ErrorCategory, PrimefragError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a transcoding run
#[derive(Debug, Error)]
pub enum CodecError {
    /// Settings are incomplete or contradictory
    #[error("invalid settings: {0}")]
    InvalidSettings(&'static str),

    /// Input file could not be opened
    #[error("failed to open input {path}: {source}")]
    OpenInput {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Output file could not be created
    #[error("failed to create output {path}: {source}")]
    CreateOutput {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Reading or writing a stream failed
    #[error("stream I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Binary record declared more fragments than the stream holds
    #[error(
        "truncated record at offset {offset}: declared {declared} fragments, {complete} complete"
    )]
    Truncated {
        offset: u64,
        declared: u8,
        complete: usize,
    },

    /// Text stream ended partway through a line
    #[error("truncated text on line {line}: missing line terminator")]
    TruncatedLine { line: usize },

    /// Binary record could not be decoded
    #[error("corrupt record at offset {offset}: {source}")]
    Record {
        offset: u64,
        source: PrimefragError,
    },

    /// Text line could not be decoded
    #[error("corrupt text on line {line}: {source}")]
    Line { line: usize, source: PrimefragError },

    /// Byte could not be factored over the prime table
    #[error("cannot encode byte {value} at offset {offset}: {source}")]
    Encode {
        offset: u64,
        value: u8,
        source: PrimefragError,
    },
}

impl CodecError {
    /// Classification of the failure, `None` for plain I/O errors
    pub fn category(&self) -> Option<ErrorCategory> {
        match self {
            CodecError::InvalidSettings(_) => Some(ErrorCategory::Configuration),
            CodecError::Truncated { .. } | CodecError::TruncatedLine { .. } => {
                Some(ErrorCategory::Corruption)
            }
            CodecError::Record { source, .. }
            | CodecError::Line { source, .. }
            | CodecError::Encode { source, .. } => Some(source.category()),
            CodecError::OpenInput { .. } | CodecError::CreateOutput { .. } | CodecError::Io(_) => {
                None
            }
        }
    }
}

/// Result type for stream transcoding
pub type Result<T> = std::result::Result<T, CodecError>;
