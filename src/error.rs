//! Error types for the DXF codec and drawing assembler

use std::io;
use thiserror::Error;

/// Main error type for reading and writing DXF drawings
///
/// `offset` fields hold the 1-based line number for text streams, the
/// byte offset for binary streams and the pair count for in-memory pair
/// streams.
#[derive(Debug, Error)]
pub enum DxfError {
    /// IO error occurred while reading or writing the underlying stream
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The code line could not be parsed as an integer
    #[error("Malformed code {value:?} at {offset}")]
    MalformedCode { value: String, offset: u64 },

    /// The value could not be parsed as the type mandated by its code
    #[error("Malformed value {value:?} for code {code} at {offset}")]
    MalformedValue { code: i32, value: String, offset: u64 },

    /// The code is outside every known code range
    #[error("Unknown DXF code {code} at {offset}")]
    UnknownCode { code: i32, offset: u64 },

    /// The stream ended in the middle of a record
    #[error("Unexpected end of input at {offset}")]
    UnexpectedEndOfInput { offset: u64 },

    /// Binary sentinel missing or incorrect
    #[error("Bad binary sentinel: {0}")]
    BadSentinel(String),

    /// A required framing pair was not found
    #[error("Expected {expected}, found {found} at {offset}")]
    StructuralMismatch { expected: String, found: String, offset: u64 },

    /// A discriminated record carried a discriminant we cannot dispatch
    ///
    /// `offset` points at the start of the record.
    #[error("Unsupported {kind} discriminant {value} at {offset}")]
    UnsupportedDiscriminant { kind: &'static str, value: String, offset: u64 },

    /// A byte sequence is invalid for the active text decoder
    #[error("Encoding error: {0}")]
    Encoding(String),
}

/// Result type alias for DXF operations
pub type Result<T> = std::result::Result<T, DxfError>;

impl DxfError {
    /// Shorthand for a framing mismatch found at `offset`
    pub(crate) fn expected(expected: impl Into<String>, found: impl std::fmt::Display, offset: u64) -> Self {
        DxfError::StructuralMismatch {
            expected: expected.into(),
            found: found.to_string(),
            offset,
        }
    }

    /// Position of the offending input, when the error has one
    pub fn offset(&self) -> Option<u64> {
        match self {
            DxfError::MalformedCode { offset, .. }
            | DxfError::MalformedValue { offset, .. }
            | DxfError::UnknownCode { offset, .. }
            | DxfError::UnexpectedEndOfInput { offset }
            | DxfError::StructuralMismatch { offset, .. }
            | DxfError::UnsupportedDiscriminant { offset, .. } => Some(*offset),
            DxfError::Io(_) | DxfError::BadSentinel(_) | DxfError::Encoding(_) => None,
        }
    }
}
