//! Server-authoritative Liar's Dice engine.
//!
//! The engine advances a three-seat game through lobby, play, and
//! resolution. Clients never see another participant's dice; they get
//! their own view plus the events addressed to them.
//!
//! # Key types
//!
//! - [`SessionEngine`] — the entry point: create, join, start, bid,
//!   challenge, peek, view
//! - [`rules`] — the pure transition functions the engine runs
//! - [`Roller`] — the injectable randomness source
//! - [`GameConfig`] — seat count and starting dice
//! - [`EngineError`] — why an operation was rejected

mod config;
mod engine;
mod error;
mod roller;
pub mod rules;
pub mod view;

pub use config::{DEFAULT_MAX_SEATS, DEFAULT_STARTING_DICE, GameConfig, MIN_SEATS};
pub use engine::SessionEngine;
pub use error::{EngineError, ErrorKind};
pub use roller::{FixedRoller, RandomRoller, Roller, ScriptedRoller};
pub use rules::Transition;
