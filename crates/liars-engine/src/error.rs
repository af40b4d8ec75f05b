//! Error types for the engine.

use liars_store::StoreError;

/// Why an engine operation was rejected.
///
/// Every variant is terminal for the operation that produced it: nothing
/// was saved and nothing was published.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The session (or whatever the token points at) does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The caller holds a valid token but may not do this: not the host,
    /// not on turn, or not seated.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The session is in a state that doesn't allow this operation.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// The bid is malformed or does not beat the active bid.
    #[error("invalid bid: {0}")]
    InvalidBid(String),

    /// A challenge was made before anyone bid this round.
    #[error("no active bid to challenge")]
    NoActiveBid,

    /// Every seat in the lobby is taken.
    #[error("session {0} is full")]
    Full(String),

    /// The engine was built with a config that cannot produce a playable
    /// game.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The session store or outbox failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Fieldless classification of an [`EngineError`].
///
/// Handy for a transport layer that maps failures onto status codes
/// without matching on messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    Forbidden,
    InvalidState,
    InvalidBid,
    NoActiveBid,
    Full,
    InvalidConfig,
    Store,
}

impl EngineError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Forbidden(_) => ErrorKind::Forbidden,
            Self::InvalidState(_) => ErrorKind::InvalidState,
            Self::InvalidBid(_) => ErrorKind::InvalidBid,
            Self::NoActiveBid => ErrorKind::NoActiveBid,
            Self::Full(_) => ErrorKind::Full,
            Self::InvalidConfig(_) => ErrorKind::InvalidConfig,
            Self::Store(_) => ErrorKind::Store,
        }
    }
}

impl ErrorKind {
    /// The HTTP-style status code a transport would usually answer with.
    pub fn status_code(self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::Forbidden => 403,
            Self::InvalidBid => 422,
            Self::InvalidState | Self::NoActiveBid | Self::Full => 409,
            Self::InvalidConfig => 500,
            Self::Store => 503,
        }
    }
}
