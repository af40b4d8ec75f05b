//! Participant-facing projections of a session.
//!
//! These are the only shapes that carry session state out of the server.
//! Other participants' dice never appear in them.

use serde::{Deserialize, Serialize};

use crate::{Bid, Die, Event, GameState};

/// A roster entry, as returned by the participant listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantSummary {
    pub name: String,
}

/// One seat as seen by a particular participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatView {
    pub name: String,
    /// The bid to beat, shown on the seat that placed it.
    pub last_bid: Option<Bid>,
    /// Face values, present only on the viewer's own seat.
    pub dice: Option<Vec<Die>>,
    /// Number of dice held. Public: every round start announces it.
    pub dice_count: usize,
    pub current_turn: bool,
    pub peeking: bool,
}

/// Everything one participant is entitled to see, plus the events queued
/// for them since their last view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    pub state: GameState,
    /// Every seat, in seating order.
    pub seats: Vec<SeatView>,
    /// Index of the viewer's own seat within `seats`.
    pub own_seat: usize,
    /// Drained events, oldest first.
    pub events: Vec<Event>,
}

impl GameView {
    /// Returns `true` if it is the viewer's turn.
    pub fn is_my_turn(&self) -> bool {
        self.seats
            .get(self.own_seat)
            .is_some_and(|seat| seat.current_turn)
    }

    /// The viewer's own dice, if the game has dealt any.
    pub fn my_dice(&self) -> &[Die] {
        self.seats
            .get(self.own_seat)
            .and_then(|seat| seat.dice.as_deref())
            .unwrap_or_default()
    }

    /// The bid currently on the table, wherever it is shown.
    pub fn active_bid(&self) -> Option<Bid> {
        self.seats.iter().find_map(|seat| seat.last_bid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seat(name: &str, dice: Option<Vec<Die>>, turn: bool, bid: Option<Bid>) -> SeatView {
        SeatView {
            name: name.into(),
            last_bid: bid,
            dice_count: dice.as_ref().map_or(3, Vec::len),
            dice,
            current_turn: turn,
            peeking: false,
        }
    }

    #[test]
    fn test_game_view_helpers_read_own_seat() {
        let bid = Bid {
            quantity: 3,
            face: 4,
        };
        let view = GameView {
            state: GameState::InProgress,
            seats: vec![
                seat("Ann", None, false, Some(bid)),
                seat("Bob", Some(vec![2, 5]), true, None),
                seat("Cy", None, false, None),
            ],
            own_seat: 1,
            events: vec![],
        };

        assert!(view.is_my_turn());
        assert_eq!(view.my_dice(), &[2, 5]);
        assert_eq!(view.active_bid(), Some(bid));
    }

    #[test]
    fn test_seat_view_hides_absent_dice_as_null() {
        let json = serde_json::to_value(seat("Ann", None, false, None)).unwrap();
        assert!(json["dice"].is_null());
        assert!(json["lastBid"].is_null());
        assert_eq!(json["currentTurn"], false);
    }
}
