//! Codec trait and implementations for serializing snapshots and events.
//!
//! The session store persists whole [`Session`](crate::Session) snapshots
//! as bytes, and any transport above the engine ships events and views as
//! bytes. Neither cares HOW the bytes are produced, only that they come
//! back identical. That contract is the [`Codec`] trait.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// A codec that can encode Rust types to bytes and decode bytes back.
///
/// `Send + Sync + 'static` because a codec is owned by long-lived,
/// shared components (the session store) and used from any Tokio worker.
///
/// `decode` requires `DeserializeOwned`: the result must not borrow from
/// the input buffer, which the store drops right after decoding.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed,
    /// incomplete, or don't match the expected type.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// Human-readable, which makes persisted snapshots easy to inspect while
/// debugging a stuck game. Behind the `json` feature (enabled by default).
///
/// ## Example
///
/// ```rust
/// use liars_protocol::{Bid, Codec, JsonCodec};
///
/// let codec = JsonCodec;
/// let bid = Bid { quantity: 3, face: 5 };
///
/// let bytes = codec.encode(&bid).unwrap();
/// let decoded: Bid = codec.decode(&bytes).unwrap();
/// assert_eq!(bid, decoded);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
