//! Error types for the store layer.

use liars_protocol::ProtocolError;

/// Errors a store or outbox backend can report.
///
/// The engine never retries these. They surface to the caller as-is and
/// the operation that hit them is abandoned.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A snapshot could not be encoded for writing or decoded after reading.
    #[error("snapshot codec failure: {0}")]
    Codec(#[from] ProtocolError),

    /// The backend could not be reached or refused the request.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
