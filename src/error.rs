use thiserror::Error;

/// Errors returned by every fallible codec operation.
///
/// Failures are all-or-nothing: no partially decoded output is ever handed
/// back alongside an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Lz2Error {
    /// Unknown or unsupported command byte, or input exhausted before the
    /// terminator. `offset` is the position in the compressed stream.
    #[error("malformed stream at byte {offset}: {reason}")]
    MalformedStream { offset: usize, reason: String },

    /// Asset size differs from the fixed size expected for its type.
    #[error("size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// A back-reference pointed at output that has not been produced yet.
    #[error("back-reference offset {offset:#06x} out of range (output is {output_len} bytes)")]
    BackReferenceOutOfRange { offset: usize, output_len: usize },

    /// Decoding would write past the caller supplied bound.
    #[error("decompressed output exceeds limit of {limit} bytes")]
    OutputLimitExceeded { limit: usize },

    /// A piece handed to the serializer cannot be encoded.
    #[error("invalid piece: {0}")]
    InvalidPiece(String),

    /// The encoder's own round-trip check failed. This is a bug.
    #[error("compression self-check failed: {0}")]
    CompressionInternalInconsistency(String),
}

impl Lz2Error {
    pub(crate) fn malformed(offset: usize, reason: impl Into<String>) -> Self {
        Lz2Error::MalformedStream {
            offset,
            reason: reason.into(),
        }
    }
}
