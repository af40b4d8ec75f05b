//! Projects a session onto what one participant may see.

use liars_protocol::{
    Event, GameState, GameView, ParticipantCode, ParticipantSummary, SeatView,
    Session,
};

use crate::EngineError;

/// The roster in seating order. Names only.
pub fn roster(session: &Session) -> Vec<ParticipantSummary> {
    session
        .seats
        .iter()
        .map(|p| ParticipantSummary {
            name: p.name.clone(),
        })
        .collect()
}

/// Builds `viewer`'s view of `session`, carrying `events` along.
///
/// Only the viewer's own dice are included. The active bid is shown on the
/// seat that placed it: the nearest seat before the one on turn that
/// still holds dice.
///
/// # Errors
/// - `InvalidState` in the lobby, or if an in-progress session has no
///   seat on turn.
/// - `Forbidden` if `viewer` is not seated.
pub fn project(
    session: &Session,
    viewer: &ParticipantCode,
    events: Vec<Event>,
) -> Result<GameView, EngineError> {
    let current_turn = match session.state {
        GameState::Lobby => {
            return Err(EngineError::InvalidState(
                "the game has not started".into(),
            ));
        }
        GameState::InProgress => Some(session.current_turn.ok_or_else(|| {
            EngineError::InvalidState("no seat is on turn".into())
        })?),
        GameState::Finished => None,
    };
    let own_seat = session
        .seat_of(viewer)
        .ok_or_else(|| EngineError::Forbidden("not seated in this session".into()))?;

    let bidder = match (session.active_bid, current_turn) {
        (Some(_), Some(turn)) => session.previous_seat_with_dice(turn),
        _ => None,
    };

    let seats = session
        .seats
        .iter()
        .enumerate()
        .map(|(seat, p)| SeatView {
            name: p.name.clone(),
            last_bid: if bidder == Some(seat) {
                session.active_bid
            } else {
                None
            },
            dice: (seat == own_seat).then(|| p.dice.clone()),
            dice_count: p.dice_count(),
            current_turn: current_turn == Some(seat),
            peeking: p.peeking,
        })
        .collect();

    Ok(GameView {
        state: session.state,
        seats,
        own_seat,
        events,
    })
}
