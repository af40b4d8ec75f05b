//! The rules of Liar's Dice as pure transitions over a session snapshot.
//!
//! Each function takes the current [`Session`] by reference and either
//! rejects the action or returns a [`Transition`]: the next snapshot plus
//! the events it produced, each addressed with a [`Recipient`]. Nothing
//! here touches storage or the outbox; the engine persists and publishes
//! a transition only after it has been computed in full.
//!
//! Checks always run in the same order: state, then who is acting, then
//! the action's own arguments.

use liars_protocol::{
    Bid, DiceCount, DiceHand, Event, GameState, Participant, ParticipantCode,
    Recipient, Session,
};

use crate::{EngineError, Roller};

/// The outcome of a successful action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// The snapshot to persist.
    pub session: Session,
    /// Events to publish, in order.
    pub events: Vec<(Recipient, Event)>,
}

impl Transition {
    fn new(session: Session) -> Self {
        Self {
            session,
            events: Vec::new(),
        }
    }

    fn emit(&mut self, recipient: Recipient, event: Event) {
        self.events.push((recipient, event));
    }
}

/// Seats a new participant in the lobby.
///
/// The caller supplies a participant code that is not yet used in this
/// session.
pub fn join(session: &Session, name: &str, code: ParticipantCode) -> Result<Session, EngineError> {
    if !session.state.is_joinable() {
        return Err(EngineError::InvalidState(format!(
            "cannot join session in state {}",
            session.state
        )));
    }
    if session.is_full() {
        return Err(EngineError::Full(session.code.to_string()));
    }

    let mut next = session.clone();
    next.seats
        .push(Participant::new(name, code, session.starting_dice_count));
    Ok(next)
}

/// Starts the game: deals every seat, picks who opens, announces the round.
///
/// Only the host (the first participant to join) may start, and only with
/// every seat taken.
pub fn start<R: Roller + ?Sized>(
    session: &Session,
    actor: &ParticipantCode,
    roller: &R,
) -> Result<Transition, EngineError> {
    let is_host = session.seats.first().is_some_and(|host| &host.code == actor);
    if !is_host {
        return Err(EngineError::Forbidden(
            "only the host can start the game".into(),
        ));
    }
    if !session.state.can_transition_to(GameState::InProgress) {
        return Err(EngineError::InvalidState(format!(
            "cannot start session in state {}",
            session.state
        )));
    }
    if session.seats.len() != session.max_seats {
        return Err(EngineError::InvalidState(format!(
            "need {} participants to start, have {}",
            session.max_seats,
            session.seats.len()
        )));
    }

    let mut next = session.clone();
    for participant in &mut next.seats {
        participant.dice = roller.roll_dice(session.starting_dice_count);
        participant.peeking = false;
    }
    let first = roller.pick_index(next.seats.len());
    next.state = GameState::InProgress;
    next.current_turn = Some(first);
    next.active_bid = None;

    let mut transition = Transition::new(next);
    announce_round(&mut transition, first);
    Ok(transition)
}

/// Places a bid for the seat on turn and passes the turn on.
pub fn place_bid(
    session: &Session,
    actor: &ParticipantCode,
    bid: Bid,
) -> Result<Transition, EngineError> {
    let seat = acting_seat(session, actor)?;

    if !bid.is_well_formed() {
        return Err(EngineError::InvalidBid(format!(
            "bid {bid} is malformed: quantity must be at least 1 and face between 1 and 6"
        )));
    }
    if let Some(active) = session.active_bid {
        if !bid.outbids(&active) {
            return Err(EngineError::InvalidBid(format!(
                "bid {bid} does not beat {active}"
            )));
        }
    }

    let mut next = session.clone();
    let following = next_turn(&next, seat)?;
    next.active_bid = Some(bid);
    next.current_turn = Some(following);

    let bidder_name = next.seats[seat].name.clone();
    let following_code = next.seats[following].code.clone();
    let mut transition = Transition::new(next);
    transition.emit(Recipient::All, Event::Bid { bidder_name, bid });
    transition.emit(Recipient::Participant(following_code), Event::TurnStart);
    Ok(transition)
}

/// Challenges the active bid.
///
/// Every die on the table is counted against the bid's face. If there are
/// at least as many as claimed, the challenger loses a die; otherwise the
/// defender (the most recent bidder) does. The game then either ends or
/// starts a fresh round with new dice.
pub fn challenge<R: Roller + ?Sized>(
    session: &Session,
    actor: &ParticipantCode,
    roller: &R,
) -> Result<Transition, EngineError> {
    let seat = acting_seat(session, actor)?;
    let bid = session.active_bid.ok_or(EngineError::NoActiveBid)?;
    let defender = session
        .previous_seat_with_dice(seat)
        .filter(|&d| d != seat)
        .ok_or_else(|| EngineError::InvalidState("no defender holds dice".into()))?;

    let truthful = session.count_face(bid.face) >= bid.quantity as usize;
    let loser = if truthful { seat } else { defender };

    let dice_pool = session
        .seats
        .iter()
        .map(|p| DiceHand {
            name: p.name.clone(),
            dice: p.dice.clone(),
        })
        .collect();
    let challenge_event = Event::Challenge {
        challenger_name: session.seats[seat].name.clone(),
        defender_name: session.seats[defender].name.clone(),
        dice_pool,
        bid,
        challenge_success: loser == defender,
    };

    let mut next = session.clone();
    // Any die will do: survivors re-roll before anyone sees their hand again.
    next.seats[loser].dice.pop();
    next.active_bid = None;

    if next.seats_with_dice() < 2 {
        if !next.state.can_transition_to(GameState::Finished) {
            return Err(EngineError::InvalidState(format!(
                "cannot finish session in state {}",
                next.state
            )));
        }
        let winner_name = next
            .seats
            .iter()
            .find(|p| p.has_dice())
            .map(|p| p.name.clone())
            .ok_or_else(|| EngineError::InvalidState("no participant holds dice".into()))?;
        next.state = GameState::Finished;
        next.current_turn = None;

        let mut transition = Transition::new(next);
        transition.emit(Recipient::All, challenge_event);
        transition.emit(Recipient::All, Event::GameEnd { winner_name });
        return Ok(transition);
    }

    let following = next_turn(&next, seat)?;
    for participant in &mut next.seats {
        participant.dice = roller.roll_dice(participant.dice.len());
        participant.peeking = false;
    }
    next.current_turn = Some(following);

    let mut transition = Transition::new(next);
    transition.emit(Recipient::All, challenge_event);
    announce_round(&mut transition, following);
    Ok(transition)
}

/// Marks a participant as looking at their dice and tells everyone else.
///
/// Peeking again in the same round changes nothing and emits nothing.
pub fn peek(session: &Session, actor: &ParticipantCode) -> Result<Transition, EngineError> {
    require_in_progress(session)?;
    let seat = session
        .seat_of(actor)
        .ok_or_else(|| EngineError::Forbidden("not seated in this session".into()))?;
    if !session.seats[seat].has_dice() {
        return Err(EngineError::Forbidden(
            "eliminated participants have no dice to peek at".into(),
        ));
    }

    let mut next = session.clone();
    if next.seats[seat].peeking {
        return Ok(Transition::new(next));
    }
    next.seats[seat].peeking = true;

    let peeker_name = next.seats[seat].name.clone();
    let mut transition = Transition::new(next);
    transition.emit(
        Recipient::AllExcept(actor.clone()),
        Event::Peek { peeker_name },
    );
    Ok(transition)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn require_in_progress(session: &Session) -> Result<(), EngineError> {
    if session.state != GameState::InProgress {
        return Err(EngineError::InvalidState(format!(
            "game is not in progress (state {})",
            session.state
        )));
    }
    Ok(())
}

/// Resolves the actor's seat and checks that it is on turn.
fn acting_seat(session: &Session, actor: &ParticipantCode) -> Result<usize, EngineError> {
    require_in_progress(session)?;
    let current = session
        .current_turn
        .ok_or_else(|| EngineError::InvalidState("no seat is on turn".into()))?;
    match session.seat_of(actor) {
        Some(seat) if seat == current => Ok(seat),
        Some(_) => Err(EngineError::Forbidden("it is not your turn".into())),
        None => Err(EngineError::Forbidden("not seated in this session".into())),
    }
}

fn next_turn(session: &Session, from: usize) -> Result<usize, EngineError> {
    session
        .next_seat_with_dice(from)
        .ok_or_else(|| EngineError::InvalidState("no participant holds dice".into()))
}

/// Emits the round-start broadcast followed by the opener's turn notice.
fn announce_round(transition: &mut Transition, opener: usize) {
    let dice_counts = transition
        .session
        .seats
        .iter()
        .map(|p| DiceCount {
            name: p.name.clone(),
            dice_count: p.dice_count(),
        })
        .collect();
    let opener_code = transition.session.seats[opener].code.clone();
    transition.emit(Recipient::All, Event::RoundStart { dice_counts });
    transition.emit(Recipient::Participant(opener_code), Event::TurnStart);
}
