//! Error types for the protocol layer.

/// Errors that can occur in the protocol layer.
///
/// Encoding failures carry the original codec error so callers can log
/// exactly which field failed. Token failures mean the caller handed us
/// something that was never issued by `join`.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust type).
    ///
    /// Common causes: a snapshot written by an incompatible version,
    /// truncated bytes, or a value of the wrong shape.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// A participant token could not be split into its two halves.
    #[error("invalid participant token: {0:?}")]
    InvalidToken(String),
}
