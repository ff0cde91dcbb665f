//! Error types for identifier parsing, frame retrieval, and shallow-update decoding.

use thiserror::Error;

/// Identifier text could not be decoded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("expected {expected} hex characters, got {got}")]
    InvalidLength { expected: usize, got: usize },

    #[error("invalid hex character {character:?} at position {index}")]
    InvalidCharacter { character: char, index: usize },
}

/// Failure reported by a frame source
#[derive(Debug, Error)]
pub enum FrameSourceError {
    #[error("I/O error reading frame: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid pkt-line length: {0}")]
    InvalidLength(String),

    #[error("truncated pkt-line: expected {expected} payload bytes, got {got}")]
    Truncated { expected: usize, got: usize },

    #[error("transport error: {0}")]
    Transport(String),
}

/// Shallow-update decoding failure
///
/// Any of these aborts the decode call; no partial result is returned.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error(transparent)]
    FrameSource(#[from] FrameSourceError),

    #[error(
        "malformed {verb} line \"{}\": expected {expected_len} bytes, got {}",
        escape_line(.line),
        .line.len()
    )]
    MalformedLine {
        verb: &'static str,
        line: Vec<u8>,
        expected_len: usize,
    },

    #[error("malformed {verb} line \"{}\": {source}", escape_line(.line))]
    InvalidIdentifier {
        verb: &'static str,
        line: Vec<u8>,
        #[source]
        source: FormatError,
    },

    #[error("stream ended without flush after {shallows} shallow and {unshallows} unshallow lines")]
    MissingFlush { shallows: usize, unshallows: usize },
}

impl DecodeError {
    /// True for errors caused by the content of a recognized verb line
    pub fn is_malformed_line(&self) -> bool {
        matches!(
            self,
            DecodeError::MalformedLine { .. } | DecodeError::InvalidIdentifier { .. }
        )
    }

    /// Raw bytes of the offending line, when the error came from one
    pub fn line(&self) -> Option<&[u8]> {
        match self {
            DecodeError::MalformedLine { line, .. } | DecodeError::InvalidIdentifier { line, .. } => {
                Some(line)
            }
            _ => None,
        }
    }
}

/// Errors raised by configuration, logging setup, and the CLI
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to load configuration: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

fn escape_line(line: &[u8]) -> String {
    line.escape_ascii().to_string()
}
