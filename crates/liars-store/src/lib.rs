//! Storage contracts for the Liar's Dice engine.
//!
//! The engine never owns state between calls. It loads a session, applies
//! one operation, saves the result, and hands the resulting events to an
//! outbox. This crate defines those two collaborators:
//!
//! 1. **Session store** ([`SessionStore`]) — get/save whole snapshots by
//!    session code.
//! 2. **Event outbox** ([`EventOutbox`]) — a FIFO queue of events per
//!    participant, drained destructively.
//!
//! Both come with an in-process implementation ([`MemorySessionStore`],
//! [`MemoryOutbox`]). A deployment backed by a managed key-value store
//! implements the same traits.
//!
//! ```text
//! Engine (above)  ← load → transition → save → publish
//!     ↕
//! Store layer (this crate)
//!     ↕
//! Protocol (below)  ← Session, Event, Codec
//! ```

#![allow(async_fn_in_trait)]

mod error;
mod outbox;
mod store;

pub use error::StoreError;
pub use outbox::{EventOutbox, MemoryOutbox};
pub use store::{MemorySessionStore, SessionStore};
