//! Identity, credential, and bid types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ProtocolError;

/// A single die face. Rolled dice are always in `MIN_FACE..=MAX_FACE`;
/// `0` only appears in the lobby placeholder hand.
pub type Die = u8;

/// Lowest face a die or a bid can show.
pub const MIN_FACE: Die = 1;

/// Highest face a die or a bid can show.
pub const MAX_FACE: Die = 6;

/// Separates the session half from the participant half of a token.
pub const TOKEN_SEPARATOR: char = '-';

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// The code that identifies one game session.
///
/// Newtype over `String` so a session code can't be passed where a
/// participant code is expected. Serialized as a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionCode(String);

impl SessionCode {
    /// Wraps an existing code. The code must not contain
    /// [`TOKEN_SEPARATOR`]; generated codes never do.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The code that identifies one participant within a session.
///
/// Unique only within its session. Use [`ParticipantToken`] when a
/// globally unique address is needed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantCode(String);

impl ParticipantCode {
    /// Wraps an existing code. The code must not contain
    /// [`TOKEN_SEPARATOR`]; generated codes never do.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// ParticipantToken
// ---------------------------------------------------------------------------

/// The sole credential a participant holds: `{session}-{participant}`.
///
/// Handed out by `join` and presented on every later call. Possession is
/// authorization; there is nothing else to check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ParticipantToken {
    /// The session this participant is seated in.
    pub session: SessionCode,
    /// The participant's code within that session.
    pub participant: ParticipantCode,
}

impl ParticipantToken {
    /// Builds the token for a freshly seated participant.
    pub fn new(session: SessionCode, participant: ParticipantCode) -> Self {
        Self {
            session,
            participant,
        }
    }

    /// Parses a token by splitting on the first [`TOKEN_SEPARATOR`].
    ///
    /// # Errors
    /// Returns `ProtocolError::InvalidToken` if there is no separator or
    /// either half is empty.
    pub fn parse(token: &str) -> Result<Self, ProtocolError> {
        match token.split_once(TOKEN_SEPARATOR) {
            Some((session, participant)) if !session.is_empty() && !participant.is_empty() => {
                Ok(Self::new(
                    SessionCode::new(session),
                    ParticipantCode::new(participant),
                ))
            }
            _ => Err(ProtocolError::InvalidToken(token.to_string())),
        }
    }
}

impl fmt::Display for ParticipantToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.session, TOKEN_SEPARATOR, self.participant)
    }
}

impl std::str::FromStr for ParticipantToken {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ParticipantToken {
    type Error = ProtocolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ParticipantToken> for String {
    fn from(token: ParticipantToken) -> Self {
        token.to_string()
    }
}

// ---------------------------------------------------------------------------
// Bid
// ---------------------------------------------------------------------------

/// A claim that at least `quantity` dice across the table show `face`.
///
/// Field order matters: the derived `Ord` compares `quantity` first and
/// `face` second, which is exactly the "must strictly increase" order.
/// There are no wild faces; a bid counts exact matches only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Bid {
    /// How many dice are claimed. At least 1.
    pub quantity: u32,
    /// Which face is claimed, in `MIN_FACE..=MAX_FACE`.
    pub face: Die,
}

impl Bid {
    /// Returns `true` if the quantity is at least one and the face is a
    /// real die face.
    pub fn is_well_formed(&self) -> bool {
        self.quantity >= 1 && (MIN_FACE..=MAX_FACE).contains(&self.face)
    }

    /// Returns `true` if this bid may replace `previous`: a higher
    /// quantity, or the same quantity on a higher face.
    pub fn outbids(&self, previous: &Bid) -> bool {
        self > previous
    }
}

impl fmt::Display for Bid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.quantity, self.face)
    }
}

// ---------------------------------------------------------------------------
// Recipient
// ---------------------------------------------------------------------------

/// Who an event is addressed to, relative to the seats of one session.
///
/// Rule transitions return `(Recipient, Event)` pairs; the engine expands
/// each recipient into concrete participant tokens when publishing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recipient {
    /// Every seated participant.
    All,

    /// One specific participant.
    Participant(ParticipantCode),

    /// Everyone except the given participant.
    AllExcept(ParticipantCode),
}

impl Recipient {
    /// Returns `true` if a participant with `code` receives the event.
    pub fn includes(&self, code: &ParticipantCode) -> bool {
        match self {
            Self::All => true,
            Self::Participant(target) => target == code,
            Self::AllExcept(excluded) => excluded != code,
        }
    }
}
