//! Three bots play one game of Liar's Dice against the in-memory engine.
//!
//! Run with `RUST_LOG=debug` to see every rule decision the engine logs.

use liars::prelude::*;
use liars::protocol::{Die, MAX_FACE, MIN_FACE};
use rand::Rng;

/// Upper bound on turns, in case a bot strategy ever stalls.
const MAX_TURNS: usize = 500;

// ---------------------------------------------------------------------------
// Bot strategy
// ---------------------------------------------------------------------------

enum Action {
    Bid(Bid),
    Challenge,
}

/// How many dice the bot expects to show `face` across the whole table.
fn expected(face: Die, own: &[Die], hidden: usize) -> f64 {
    let mine = own.iter().filter(|&&d| d == face).count();
    mine as f64 + hidden as f64 / 6.0
}

fn best_face(own: &[Die]) -> Die {
    (MIN_FACE..=MAX_FACE)
        .max_by_key(|face| own.iter().filter(|&&d| d == *face).count())
        .unwrap_or(MIN_FACE)
}

fn decide(view: &GameView, rng: &mut impl Rng) -> Action {
    let own = view.my_dice();
    let hidden: usize = view
        .seats
        .iter()
        .enumerate()
        .filter(|(seat, _)| *seat != view.own_seat)
        .map(|(_, s)| s.dice_count)
        .sum();

    let Some(current) = view.active_bid() else {
        let face = best_face(own);
        let quantity = expected(face, own, hidden).floor().max(1.0) as u32;
        return Action::Bid(Bid { quantity, face });
    };

    let doubt = current.quantity as f64 - expected(current.face, own, hidden);
    if doubt > 1.0 || (doubt > 0.0 && rng.random_bool(0.5)) {
        return Action::Challenge;
    }

    let face = best_face(own);
    let raise = if face > current.face {
        Bid {
            quantity: current.quantity,
            face,
        }
    } else {
        Bid {
            quantity: current.quantity + 1,
            face,
        }
    };
    Action::Bid(raise)
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), LiarsError> {
    liars::init_tracing();

    let engine = liars::memory_engine(RandomRoller);
    let code = engine.create_session().await?;

    let mut tokens = Vec::new();
    for name in ["ada", "bea", "cy"] {
        tokens.push(engine.join(name, code.as_str()).await?.to_string());
    }
    let roster = engine.list_participants(&tokens[0]).await?;
    tracing::info!(session = %code, seats = roster.len(), "table is full");

    engine.start(&tokens[0]).await?;

    let mut rng = rand::rng();
    for _ in 0..MAX_TURNS {
        let mut on_turn = None;
        let mut finished = false;
        // Every seat is drained each pass, so no queued event goes unlogged.
        for token in &tokens {
            let view = engine.view(token).await?;
            for event in &view.events {
                let json = serde_json::to_string(event).unwrap_or_default();
                tracing::info!(%token, event = %json, "event");
            }
            finished |= view.state == GameState::Finished;
            if view.is_my_turn() {
                on_turn = Some((token.clone(), view));
            }
        }
        if finished {
            tracing::info!(session = %code, "game over");
            return Ok(());
        }

        let Some((token, view)) = on_turn else {
            tracing::warn!(session = %code, "no seat on turn");
            break;
        };
        match decide(&view, &mut rng) {
            Action::Bid(bid) => {
                tracing::info!(%token, %bid, "bidding");
                engine.place_bid(bid.quantity, bid.face, &token).await?;
            }
            Action::Challenge => {
                tracing::info!(%token, "challenging");
                engine.challenge(&token).await?;
            }
        }
    }

    tracing::warn!(session = %code, "turn limit reached");
    Ok(())
}
