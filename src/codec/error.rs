//! Error definitions for the state codec

use thiserror::Error;

/// Reasons a label code could not be produced or restored.
///
/// Decode failures are absorbed by the session: the current state stays as it was.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Nothing to decode
    #[error("code is empty")]
    EmptyToken,

    /// The code is not standard base64
    #[error("code is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The decoded bytes are not a zlib stream of UTF-8 text
    #[error("code does not inflate to text: {0}")]
    Inflate(#[source] std::io::Error),

    /// More fields than any encoder can produce
    #[error("code carries {found} fields, expected at most {expected}")]
    FieldCount { found: usize, expected: usize },

    /// Compressing the record failed
    #[error("failed to compress state: {0}")]
    Compress(#[source] std::io::Error),
}
