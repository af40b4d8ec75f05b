//! Unified error type for the Liar's Dice crates.

use liars_engine::EngineError;
use liars_protocol::ProtocolError;
use liars_store::StoreError;

/// Top-level error that wraps every crate-specific error.
///
/// Callers of the `liars` meta-crate match on this one type. The `#[from]`
/// attributes let `?` convert sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum LiarsError {
    /// Encoding, decoding, or token parsing failed.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The snapshot store or outbox failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A game operation was rejected.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl LiarsError {
    /// The engine's error classification, when this came from the engine.
    pub fn engine_kind(&self) -> Option<liars_engine::ErrorKind> {
        match self {
            Self::Engine(err) => Some(err.kind()),
            _ => None,
        }
    }
}
