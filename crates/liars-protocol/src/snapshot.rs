//! Session snapshots: the full server-side state of one game.
//!
//! A [`Session`] is what the store persists and what the rules transform.
//! It holds hidden information (every participant's dice), so it never
//! leaves the server as-is. Clients get a [`GameView`](crate::GameView).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Bid, Die, ParticipantCode, SessionCode};

// ---------------------------------------------------------------------------
// GameState
// ---------------------------------------------------------------------------

/// The lifecycle state of a session.
///
/// Transitions are strictly ordered and never go backwards:
///
/// ```text
/// Lobby → InProgress → Finished
/// ```
///
/// - **Lobby**: accepting joins, dice not rolled yet.
/// - **InProgress**: bids and challenges, exactly one seat on turn.
/// - **Finished**: one participant holds all the remaining dice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    Lobby,
    InProgress,
    Finished,
}

impl GameState {
    /// Returns `true` if participants may still join.
    pub fn is_joinable(&self) -> bool {
        matches!(self, Self::Lobby)
    }

    /// Returns the state that follows this one, if any.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Lobby => Some(Self::InProgress),
            Self::InProgress => Some(Self::Finished),
            Self::Finished => None,
        }
    }

    /// Returns `true` if transitioning to `target` is valid.
    pub fn can_transition_to(self, target: Self) -> bool {
        self.next() == Some(target)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lobby => write!(f, "Lobby"),
            Self::InProgress => write!(f, "InProgress"),
            Self::Finished => write!(f, "Finished"),
        }
    }
}

// ---------------------------------------------------------------------------
// Participant
// ---------------------------------------------------------------------------

/// One seated participant.
///
/// A participant with no dice is eliminated but keeps their seat: they
/// still show up in rosters and views, turn order just skips them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    /// Display name chosen at join time. Not unique.
    pub name: String,
    /// Code assigned at join time. Unique within the session.
    pub code: ParticipantCode,
    /// Face values held. In the lobby this is an all-zero placeholder of
    /// the starting length.
    pub dice: Vec<Die>,
    /// Set when the participant peeks during the current round.
    #[serde(default)]
    pub peeking: bool,
}

impl Participant {
    /// Seats a new participant with an unrolled hand of `dice_count` dice.
    pub fn new(name: impl Into<String>, code: ParticipantCode, dice_count: usize) -> Self {
        Self {
            name: name.into(),
            code,
            dice: vec![0; dice_count],
            peeking: false,
        }
    }

    /// Returns `true` while the participant is still in the game.
    pub fn has_dice(&self) -> bool {
        !self.dice.is_empty()
    }

    /// Number of dice remaining.
    pub fn dice_count(&self) -> usize {
        self.dice.len()
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// The authoritative state of one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Assigned at creation, never changes.
    pub code: SessionCode,
    /// Lifecycle state. Only ever moves forward.
    pub state: GameState,
    /// Seating order, which is also turn order. Grows only in the lobby.
    pub seats: Vec<Participant>,
    /// Seat capacity.
    pub max_seats: usize,
    /// Dice each participant starts the game with.
    pub starting_dice_count: usize,
    /// Seat on turn. `Some` exactly while `InProgress`.
    pub current_turn: Option<usize>,
    /// Bid to beat this round. `None` until the first bid of a round.
    pub active_bid: Option<Bid>,
}

impl Session {
    /// Creates an empty lobby.
    pub fn new(code: SessionCode, max_seats: usize, starting_dice_count: usize) -> Self {
        Self {
            code,
            state: GameState::Lobby,
            seats: Vec::with_capacity(max_seats),
            max_seats,
            starting_dice_count,
            current_turn: None,
            active_bid: None,
        }
    }

    /// Returns `true` when no more participants can be seated.
    pub fn is_full(&self) -> bool {
        self.seats.len() >= self.max_seats
    }

    /// Finds the seat index of a participant.
    pub fn seat_of(&self, code: &ParticipantCode) -> Option<usize> {
        self.seats.iter().position(|p| &p.code == code)
    }

    /// Number of participants still holding dice.
    pub fn seats_with_dice(&self) -> usize {
        self.seats.iter().filter(|p| p.has_dice()).count()
    }

    /// Total dice on the table showing `face`.
    pub fn count_face(&self, face: Die) -> usize {
        self.seats
            .iter()
            .flat_map(|p| p.dice.iter())
            .filter(|d| **d == face)
            .count()
    }

    /// The first seat after `from` (cyclically) that still holds dice.
    ///
    /// `from` itself is considered last, so with a single survivor this
    /// returns that survivor. Returns `None` only if nobody has dice.
    pub fn next_seat_with_dice(&self, from: usize) -> Option<usize> {
        let n = self.seats.len();
        (1..=n)
            .map(|offset| (from + offset) % n)
            .find(|&seat| self.seats[seat].has_dice())
    }

    /// The first seat before `from` (cyclically) that still holds dice.
    ///
    /// While a bid is active this is the participant who placed it.
    pub fn previous_seat_with_dice(&self, from: usize) -> Option<usize> {
        let n = self.seats.len();
        (1..=n)
            .map(|offset| (from + n - offset % n) % n)
            .find(|&seat| self.seats[seat].has_dice())
    }
}
