//! # Liars
//!
//! Server-authoritative Liar's Dice for three seats.
//!
//! The engine owns every rule: it rolls the dice, keeps each hand hidden
//! from the other seats, validates bids and resolves challenges. A
//! transport layer sits on top, hands out the participant tokens returned
//! by `join`, and forwards the rest of the calls.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use liars::prelude::*;
//!
//! # async fn run() -> Result<(), LiarsError> {
//! liars::init_tracing();
//! let engine = liars::memory_engine(RandomRoller);
//!
//! let code = engine.create_session().await?;
//! let host = engine.join("ada", code.as_str()).await?;
//! engine.join("bea", code.as_str()).await?;
//! engine.join("cy", code.as_str()).await?;
//! engine.start(&host.to_string()).await?;
//!
//! let view = engine.view(&host.to_string()).await?;
//! println!("my dice: {:?}", view.my_dice());
//! # Ok(())
//! # }
//! ```

mod error;

pub use error::LiarsError;
pub use liars_engine as engine;
pub use liars_protocol as protocol;
pub use liars_store as store;

use tracing_subscriber::EnvFilter;

/// An engine backed by the in-process store and outbox.
pub type MemoryEngine<R> =
    engine::SessionEngine<store::MemorySessionStore, store::MemoryOutbox, R>;

/// Builds an engine with in-memory persistence and the default config.
pub fn memory_engine<R: engine::Roller>(roller: R) -> MemoryEngine<R> {
    engine::SessionEngine::new(
        store::MemorySessionStore::new(),
        store::MemoryOutbox::new(),
        roller,
    )
}

/// Installs a `fmt` subscriber filtered by `RUST_LOG`, defaulting to `info`.
///
/// Calling it again after a subscriber is installed does nothing.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber already installed");
    }
}

pub mod prelude {
    pub use crate::{LiarsError, MemoryEngine, memory_engine};
    pub use liars_engine::{
        ErrorKind, FixedRoller, GameConfig, RandomRoller, Roller, ScriptedRoller, SessionEngine,
    };
    pub use liars_protocol::{
        Bid, Event, GameState, GameView, ParticipantToken, SeatView, SessionCode,
    };
    pub use liars_store::{EventOutbox, MemoryOutbox, MemorySessionStore, SessionStore};
}
