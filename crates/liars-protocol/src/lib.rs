//! Data model and wire types for the Liar's Dice server.
//!
//! This crate defines the "language" the engine, its collaborators, and
//! any transport above them all speak:
//!
//! - **Types** ([`SessionCode`], [`ParticipantToken`], [`Bid`],
//!   [`Recipient`]) — identity, credentials, and the bid ordering.
//! - **Events** ([`Event`]) — what each participant is told happened.
//! - **Snapshots** ([`Session`], [`Participant`], [`GameState`]) — the
//!   full server-side state of one game, as persisted.
//! - **Views** ([`GameView`], [`SeatView`]) — the slice of a snapshot one
//!   participant is entitled to see.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how any of the above is
//!   turned into bytes and back.
//!
//! It knows nothing about rules or storage. Those live in
//! `liars-engine` and `liars-store`.

mod codec;
mod error;
mod event;
mod snapshot;
mod types;
mod view;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use event::{DiceCount, DiceHand, Event};
pub use snapshot::{GameState, Participant, Session};
pub use types::{
    Bid, Die, MAX_FACE, MIN_FACE, ParticipantCode, ParticipantToken,
    Recipient, SessionCode, TOKEN_SEPARATOR,
};
pub use view::{GameView, ParticipantSummary, SeatView};
