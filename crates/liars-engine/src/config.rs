//! Game configuration.

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Seats at every table.
pub const DEFAULT_MAX_SEATS: usize = 3;

/// Dice each participant starts with.
pub const DEFAULT_STARTING_DICE: usize = 6;

/// A challenge needs a bidder and a challenger.
pub const MIN_SEATS: usize = 2;

/// Settings copied into each session when it is created.
///
/// Copying rather than referencing means a persisted session describes
/// itself: changing the engine's config never changes a game in flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Participants required to start, and the most that may join.
    pub max_seats: usize,

    /// Dice dealt to every participant at the start of a game.
    pub starting_dice_count: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_seats: DEFAULT_MAX_SEATS,
            starting_dice_count: DEFAULT_STARTING_DICE,
        }
    }
}

impl GameConfig {
    /// Rejects configs that could never produce a playable game.
    ///
    /// # Errors
    /// `InvalidConfig` if there are fewer than [`MIN_SEATS`] seats or
    /// participants would start without dice.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.max_seats < MIN_SEATS {
            return Err(EngineError::InvalidConfig(format!(
                "max_seats must be at least {MIN_SEATS}, got {}",
                self.max_seats
            )));
        }
        if self.starting_dice_count == 0 {
            return Err(EngineError::InvalidConfig(
                "starting_dice_count must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
