//! Events: the per-participant record of what happened in a session.
//!
//! Events are created by the rules, addressed with a
//! [`Recipient`](crate::Recipient), and queued per participant until that
//! participant drains them with a view request. They never change after
//! creation.

use serde::{Deserialize, Serialize};

use crate::{Bid, Die};

/// How many dice one participant holds. Broadcast at every round start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiceCount {
    pub name: String,
    pub dice_count: usize,
}

/// The actual dice one participant held, revealed when a bid is challenged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiceHand {
    pub name: String,
    pub dice: Vec<Die>,
}

/// Something a participant is told about.
///
/// Internally tagged, so JSON looks like
/// `{ "type": "Bid", "bidderName": "Ann", "bid": { ... } }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum Event {
    /// Fresh dice were rolled. Carries counts only, never values.
    RoundStart { dice_counts: Vec<DiceCount> },

    /// A bid was placed and is now the one to beat.
    Bid { bidder_name: String, bid: Bid },

    /// A bid was challenged and every hand revealed.
    ///
    /// `dice_pool` is the table as it stood before the loser gave up a
    /// die. `challenge_success` is `true` when the defender lost.
    Challenge {
        challenger_name: String,
        defender_name: String,
        dice_pool: Vec<DiceHand>,
        bid: Bid,
        challenge_success: bool,
    },

    /// Only one participant has dice left.
    GameEnd { winner_name: String },

    /// It is now the recipient's turn.
    TurnStart,

    /// Someone is looking at their dice. Never sent to the peeker.
    Peek { peeker_name: String },
}

impl Event {
    /// Short name of the variant, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RoundStart { .. } => "RoundStart",
            Self::Bid { .. } => "Bid",
            Self::Challenge { .. } => "Challenge",
            Self::GameEnd { .. } => "GameEnd",
            Self::TurnStart => "TurnStart",
            Self::Peek { .. } => "Peek",
        }
    }
}

#[cfg(test)]
mod tests {
    //! The JSON shape is what a browser client parses, so these tests pin
    //! field names rather than round-tripping every variant.

    use super::*;

    #[test]
    fn test_round_start_json_format() {
        let event = Event::RoundStart {
            dice_counts: vec![DiceCount {
                name: "Ann".into(),
                dice_count: 6,
            }],
        };
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "RoundStart");
        assert_eq!(json["diceCounts"][0]["name"], "Ann");
        assert_eq!(json["diceCounts"][0]["diceCount"], 6);
    }

    #[test]
    fn test_challenge_json_format() {
        let event = Event::Challenge {
            challenger_name: "Bob".into(),
            defender_name: "Ann".into(),
            dice_pool: vec![DiceHand {
                name: "Ann".into(),
                dice: vec![2, 2],
            }],
            bid: Bid {
                quantity: 2,
                face: 2,
            },
            challenge_success: false,
        };
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "Challenge");
        assert_eq!(json["challengerName"], "Bob");
        assert_eq!(json["defenderName"], "Ann");
        assert_eq!(json["dicePool"][0]["dice"], serde_json::json!([2, 2]));
        assert_eq!(json["bid"]["quantity"], 2);
        assert_eq!(json["challengeSuccess"], false);
    }

    #[test]
    fn test_turn_start_json_is_bare_tag() {
        let json = serde_json::to_value(&Event::TurnStart).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "TurnStart" }));
    }

    #[test]
    fn test_peek_decodes_from_client_json() {
        let event: Event =
            serde_json::from_str(r#"{"type": "Peek", "peekerName": "Cy"}"#).unwrap();
        assert_eq!(
            event,
            Event::Peek {
                peeker_name: "Cy".into()
            }
        );
    }

    #[test]
    fn test_unknown_event_type_returns_error() {
        let result: Result<Event, _> = serde_json::from_str(r#"{"type": "Wildcard"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_event_kind_names_variant() {
        assert_eq!(Event::TurnStart.kind(), "TurnStart");
        assert_eq!(
            Event::GameEnd {
                winner_name: "Ann".into()
            }
            .kind(),
            "GameEnd"
        );
    }
}
