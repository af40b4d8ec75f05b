//! The session store: whole-snapshot persistence keyed by session code.

use std::collections::HashMap;

use liars_protocol::{Codec, JsonCodec, Session, SessionCode};
use tokio::sync::RwLock;

use crate::StoreError;

/// Loads and persists session snapshots.
///
/// The engine reads a full snapshot, transforms it, and writes the full
/// snapshot back. There are no partial updates, so `save` of the same
/// snapshot twice is harmless.
///
/// # Trait bounds
///
/// `Send + Sync + 'static` because one store is shared by every request
/// the engine handles, from any Tokio worker thread.
pub trait SessionStore: Send + Sync + 'static {
    /// Returns the snapshot saved under `code`, or `None` if there is none.
    fn get(
        &self,
        code: &SessionCode,
    ) -> impl std::future::Future<Output = Result<Option<Session>, StoreError>> + Send;

    /// Persists `session` under its own code, replacing any earlier snapshot.
    fn save(
        &self,
        session: &Session,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}

// ---------------------------------------------------------------------------
// MemorySessionStore
// ---------------------------------------------------------------------------

/// An in-process [`SessionStore`] that keeps each snapshot encoded.
///
/// Snapshots go through the codec on every save and load, the same path a
/// remote key-value store takes. A field that doesn't survive encoding
/// shows up here instead of in production.
pub struct MemorySessionStore<C: Codec = JsonCodec> {
    sessions: RwLock<HashMap<SessionCode, Vec<u8>>>,
    codec: C,
}

impl MemorySessionStore<JsonCodec> {
    /// Creates an empty store using JSON snapshots.
    pub fn new() -> Self {
        Self::with_codec(JsonCodec)
    }
}

impl<C: Codec> MemorySessionStore<C> {
    /// Creates an empty store using the given codec.
    pub fn with_codec(codec: C) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            codec,
        }
    }

    /// Number of stored sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Returns `true` if nothing has been saved yet.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

impl Default for MemorySessionStore<JsonCodec> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Codec> SessionStore for MemorySessionStore<C> {
    async fn get(&self, code: &SessionCode) -> Result<Option<Session>, StoreError> {
        let sessions = self.sessions.read().await;
        match sessions.get(code) {
            Some(bytes) => Ok(Some(self.codec.decode(bytes)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, session: &Session) -> Result<(), StoreError> {
        let bytes = self.codec.encode(session)?;
        self.sessions
            .write()
            .await
            .insert(session.code.clone(), bytes);
        tracing::trace!(session = %session.code, state = %session.state, "session saved");
        Ok(())
    }
}
