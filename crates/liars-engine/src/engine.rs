//! The session engine: the entry point for every game operation.
//!
//! Each operation is one read-modify-write over a whole snapshot:
//!
//! ```text
//! lock(session) → store.get → rules::* → store.save → outbox.publish_all
//! ```
//!
//! The lock is per session, so two calls on the same game run one after
//! the other while calls on different games never wait on each other.
//! Rule functions are pure; if they reject an action nothing is saved and
//! nothing is published. If publishing fails after the save, the loaded
//! snapshot is written back before the error is returned.

use std::collections::HashMap;
use std::sync::Arc;

use liars_protocol::{
    Bid, Event, GameView, ParticipantCode, ParticipantSummary, ParticipantToken,
    Recipient, Session, SessionCode,
};
use liars_store::{EventOutbox, SessionStore};
use rand::Rng;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::rules::{self, Transition};
use crate::{EngineError, GameConfig, Roller, view};

/// Generated codes are two base-36 triples.
const CODE_HALF_SPACE: u32 = 36 * 36 * 36;

/// Runs Liar's Dice sessions on top of a store, an outbox, and a roller.
///
/// Shared behind an `Arc` by whatever transport sits above it. The engine
/// keeps no game state of its own; the store is the source of truth.
pub struct SessionEngine<S, O, R> {
    store: S,
    outbox: O,
    roller: R,
    config: GameConfig,
    /// One mutex per stored session, created on first use.
    locks: Mutex<HashMap<SessionCode, Arc<Mutex<()>>>>,
}

impl<S, O, R> SessionEngine<S, O, R>
where
    S: SessionStore,
    O: EventOutbox,
    R: Roller,
{
    /// Creates an engine with the default three-seat, six-dice config.
    pub fn new(store: S, outbox: O, roller: R) -> Self {
        Self::build(store, outbox, roller, GameConfig::default())
    }

    /// Creates an engine with a custom config for new sessions.
    ///
    /// # Errors
    /// `InvalidConfig` if the config could never produce a playable game.
    pub fn with_config(
        store: S,
        outbox: O,
        roller: R,
        config: GameConfig,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self::build(store, outbox, roller, config))
    }

    fn build(store: S, outbox: O, roller: R, config: GameConfig) -> Self {
        Self {
            store,
            outbox,
            roller,
            config,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// The session store this engine reads and writes.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The outbox this engine publishes to.
    pub fn outbox(&self) -> &O {
        &self.outbox
    }

    /// The config applied to sessions created from now on.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    // -----------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------

    /// Creates an empty lobby and returns its code.
    pub async fn create_session(&self) -> Result<SessionCode, EngineError> {
        loop {
            let code = SessionCode::new(generate_code());
            let _guard = self.lock(&code).await;
            if self.store.get(&code).await?.is_some() {
                tracing::debug!(session = %code, "session code collision, regenerating");
                continue;
            }

            let session = Session::new(
                code.clone(),
                self.config.max_seats,
                self.config.starting_dice_count,
            );
            if let Err(err) = self.store.save(&session).await {
                self.locks.lock().await.remove(&code);
                return Err(err.into());
            }
            tracing::info!(session = %code, "session created");
            return Ok(code);
        }
    }

    /// Seats `name` in the lobby of `session_code` and returns their token.
    ///
    /// # Errors
    /// `NotFound`, `InvalidState` once the game has started, `Full`.
    pub async fn join(
        &self,
        name: &str,
        session_code: &str,
    ) -> Result<ParticipantToken, EngineError> {
        let code = SessionCode::new(session_code);
        let result: Result<ParticipantToken, EngineError> = async {
            let _guard = self.lock_existing(&code).await?;
            let session = self.load(&code).await?;

            let participant = unique_participant_code(&session);
            let next = rules::join(&session, name, participant.clone())?;
            self.store.save(&next).await?;

            tracing::info!(
                session = %code,
                %participant,
                seats = next.seats.len(),
                "participant joined"
            );
            Ok(ParticipantToken::new(code.clone(), participant))
        }
        .await;
        result.inspect_err(|err| tracing::warn!(session = %code, %err, "join rejected"))
    }

    /// Lists the participants of the token's session, in seating order.
    ///
    /// Only the session half of the token matters; the caller need not be
    /// seated.
    pub async fn list_participants(
        &self,
        token: &str,
    ) -> Result<Vec<ParticipantSummary>, EngineError> {
        let token = parse_token(token)?;
        let session = self.load(&token.session).await?;
        Ok(view::roster(&session))
    }

    /// Starts the game. Host only, full table only.
    pub async fn start(&self, token: &str) -> Result<(), EngineError> {
        self.apply(token, "start", |session, actor| {
            rules::start(session, actor, &self.roller)
        })
        .await?;
        Ok(())
    }

    /// Places a bid of `quantity` dice showing `face` for the seat on turn.
    pub async fn place_bid(&self, quantity: u32, face: u8, token: &str) -> Result<(), EngineError> {
        let bid = Bid { quantity, face };
        self.apply(token, "place_bid", |session, actor| {
            rules::place_bid(session, actor, bid)
        })
        .await?;
        Ok(())
    }

    /// Challenges the active bid for the seat on turn.
    pub async fn challenge(&self, token: &str) -> Result<(), EngineError> {
        self.apply(token, "challenge", |session, actor| {
            rules::challenge(session, actor, &self.roller)
        })
        .await?;
        Ok(())
    }

    /// Tells the rest of the table the caller is looking at their dice.
    pub async fn peek(&self, token: &str) -> Result<(), EngineError> {
        self.apply(token, "peek", rules::peek).await?;
        Ok(())
    }

    /// Returns the caller's view and drains their queued events.
    ///
    /// The drain is destructive: events returned here are gone from the
    /// outbox. The view is validated before draining, so a rejected call
    /// loses nothing.
    pub async fn view(&self, token: &str) -> Result<GameView, EngineError> {
        let result: Result<GameView, EngineError> = async {
            let parsed = parse_token(token)?;
            let _guard = self.lock_existing(&parsed.session).await?;
            let session = self.load(&parsed.session).await?;

            let mut game_view = view::project(&session, &parsed.participant, Vec::new())?;
            game_view.events = self.outbox.drain(&parsed).await?;

            tracing::debug!(
                session = %parsed.session,
                participant = %parsed.participant,
                events = game_view.events.len(),
                "view served"
            );
            Ok(game_view)
        }
        .await;
        result.inspect_err(|err| tracing::warn!(%token, %err, "view rejected"))
    }

    // -----------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------

    /// Runs one rule under the session lock, then saves and publishes.
    async fn apply<F>(
        &self,
        token: &str,
        operation: &'static str,
        rule: F,
    ) -> Result<Session, EngineError>
    where
        F: FnOnce(&Session, &ParticipantCode) -> Result<Transition, EngineError>,
    {
        let result: Result<Session, EngineError> = async {
            let parsed = parse_token(token)?;
            let _guard = self.lock_existing(&parsed.session).await?;
            let session = self.load(&parsed.session).await?;

            let Transition { session: next, events } = rule(&session, &parsed.participant)?;
            let batch = fan_out(&next, events);
            self.store.save(&next).await?;
            if let Err(err) = self.outbox.publish_all(batch).await {
                self.roll_back(&session).await;
                return Err(err.into());
            }

            log_transition(operation, &parsed, &session, &next);
            Ok(next)
        }
        .await;
        result.inspect_err(|err| tracing::warn!(operation, %token, %err, "operation rejected"))
    }

    /// Writes the pre-operation snapshot back after a failed publish.
    async fn roll_back(&self, session: &Session) {
        if let Err(err) = self.store.save(session).await {
            tracing::error!(session = %session.code, %err, "rollback after failed publish failed");
        }
    }

    async fn load(&self, code: &SessionCode) -> Result<Session, EngineError> {
        self.store
            .get(code)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("session {code}")))
    }

    /// Acquires the mutex for a session that is known to be stored.
    ///
    /// Unknown codes fail `NotFound` without touching the lock map, so
    /// requests for sessions that don't exist never grow it.
    async fn lock_existing(&self, code: &SessionCode) -> Result<OwnedMutexGuard<()>, EngineError> {
        let known = self.locks.lock().await.get(code).map(Arc::clone);
        if let Some(lock) = known {
            return Ok(lock.lock_owned().await);
        }
        if self.store.get(code).await?.is_none() {
            return Err(EngineError::NotFound(format!("session {code}")));
        }
        Ok(self.lock(code).await)
    }

    /// Acquires the mutex for one session, creating it on first use.
    async fn lock(&self, code: &SessionCode) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            Arc::clone(locks.entry(code.clone()).or_default())
        };
        lock.lock_owned().await
    }
}

fn parse_token(token: &str) -> Result<ParticipantToken, EngineError> {
    ParticipantToken::parse(token).map_err(|err| EngineError::NotFound(err.to_string()))
}

/// Expands each recipient over the session's seats, keeping event order.
fn fan_out(
    session: &Session,
    events: Vec<(Recipient, Event)>,
) -> Vec<(ParticipantToken, Event)> {
    let mut batch = Vec::new();
    for (recipient, event) in events {
        for participant in &session.seats {
            if recipient.includes(&participant.code) {
                let token = ParticipantToken::new(session.code.clone(), participant.code.clone());
                batch.push((token, event.clone()));
            }
        }
        tracing::debug!(
            session = %session.code,
            event = event.kind(),
            ?recipient,
            "event fanned out"
        );
    }
    batch
}

fn log_transition(operation: &str, actor: &ParticipantToken, before: &Session, after: &Session) {
    if before.state != after.state {
        tracing::info!(
            session = %after.code,
            participant = %actor.participant,
            from = %before.state,
            to = %after.state,
            operation,
            "session state changed"
        );
    } else if operation == "challenge" {
        tracing::info!(
            session = %after.code,
            participant = %actor.participant,
            dice_left = after.seats.iter().map(|p| p.dice_count()).sum::<usize>(),
            turn = ?after.current_turn,
            "challenge resolved"
        );
    } else {
        tracing::debug!(
            session = %after.code,
            participant = %actor.participant,
            operation,
            turn = ?after.current_turn,
            bid = ?after.active_bid,
            "operation applied"
        );
    }
}

/// Picks a participant code not yet used in `session`.
fn unique_participant_code(session: &Session) -> ParticipantCode {
    loop {
        let code = ParticipantCode::new(generate_code());
        if session.seat_of(&code).is_none() {
            return code;
        }
    }
}

/// Generates a 6-character code from `[0-9a-z]`.
///
/// Never contains the token separator, so it is safe as either half of a
/// participant token.
fn generate_code() -> String {
    let mut rng = rand::rng();
    let first = rng.random_range(0..CODE_HALF_SPACE);
    let second = rng.random_range(0..CODE_HALF_SPACE);
    format!("{}{}", base36_triple(first), base36_triple(second))
}

fn base36_triple(mut value: u32) -> String {
    let mut digits = ['0'; 3];
    for digit in digits.iter_mut().rev() {
        *digit = char::from_digit(value % 36, 36).unwrap_or('0');
        value /= 36;
    }
    digits.iter().collect()
}

#[cfg(test)]
mod tests {
    use liars_protocol::TOKEN_SEPARATOR;
    use liars_store::{MemoryOutbox, MemorySessionStore};

    use super::*;
    use crate::{ErrorKind, FixedRoller};

    // =========================================================================
    // Helpers
    // =========================================================================

    fn engine() -> SessionEngine<MemorySessionStore, MemoryOutbox, FixedRoller> {
        SessionEngine::new(
            MemorySessionStore::new(),
            MemoryOutbox::new(),
            FixedRoller::new(1, 0),
        )
    }

    async fn lock_entries<S, O, R>(engine: &SessionEngine<S, O, R>) -> usize {
        engine.locks.lock().await.len()
    }

    // =========================================================================
    // Codes and tokens
    // =========================================================================

    #[test]
    fn test_generate_code_is_six_lowercase_base36_chars() {
        for _ in 0..200 {
            let code = generate_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
            assert!(!code.contains(TOKEN_SEPARATOR));
        }
    }

    #[test]
    fn test_base36_triple_pads_and_encodes() {
        assert_eq!(base36_triple(0), "000");
        assert_eq!(base36_triple(35), "00z");
        assert_eq!(base36_triple(36), "010");
        assert_eq!(base36_triple(CODE_HALF_SPACE - 1), "zzz");
    }

    #[test]
    fn test_parse_token_malformed_maps_to_not_found() {
        let err = parse_token("garbage").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    // =========================================================================
    // Lock map
    // =========================================================================

    #[tokio::test]
    async fn test_lock_map_ignores_unknown_sessions() {
        let engine = engine();

        for i in 0..50 {
            let err = engine.view(&format!("bogus{i}-p1")).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::NotFound);
            let err = engine.join("x", &format!("nope{i}")).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::NotFound);
            let err = engine.place_bid(1, 3, &format!("gone{i}-p1")).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::NotFound);
        }

        assert_eq!(lock_entries(&engine).await, 0);
    }

    #[tokio::test]
    async fn test_lock_map_holds_one_entry_per_created_session() {
        let engine = engine();
        let code = engine.create_session().await.unwrap();
        engine.join("A", code.as_str()).await.unwrap();
        engine.join("B", code.as_str()).await.unwrap();

        assert_eq!(lock_entries(&engine).await, 1);
    }

    #[tokio::test]
    async fn test_lock_existing_finds_session_saved_elsewhere() {
        // A session written straight to the store, e.g. by another process.
        let engine = engine();
        let session = Session::new(SessionCode::new("ext001"), 3, 6);
        engine.store().save(&session).await.unwrap();

        let token = engine.join("A", "ext001").await.unwrap();

        assert_eq!(token.session.as_str(), "ext001");
        assert_eq!(lock_entries(&engine).await, 1);
    }
}
