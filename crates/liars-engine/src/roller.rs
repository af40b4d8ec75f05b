//! The randomness source: dice rolls and a uniform seat pick.
//!
//! Every random decision the rules make goes through [`Roller`], so tests
//! can swap in [`FixedRoller`] or [`ScriptedRoller`] and replay a game
//! exactly.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use liars_protocol::{Die, MAX_FACE, MIN_FACE};
use rand::Rng;

/// Produces dice values and uniformly chosen indices.
///
/// Methods take `&self` because one roller is shared by every request
/// the engine handles. Implementations with state use interior
/// mutability.
pub trait Roller: Send + Sync + 'static {
    /// Rolls `count` independent dice, each in `MIN_FACE..=MAX_FACE`.
    fn roll_dice(&self, count: usize) -> Vec<Die>;

    /// Returns an index in `0..bound`. `bound` is always at least 1.
    fn pick_index(&self, bound: usize) -> usize;
}

// ---------------------------------------------------------------------------
// RandomRoller
// ---------------------------------------------------------------------------

/// The production roller, backed by the thread-local `rand` generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomRoller;

impl Roller for RandomRoller {
    fn roll_dice(&self, count: usize) -> Vec<Die> {
        let mut rng = rand::rng();
        (0..count)
            .map(|_| rng.random_range(MIN_FACE..=MAX_FACE))
            .collect()
    }

    fn pick_index(&self, bound: usize) -> usize {
        if bound <= 1 {
            return 0;
        }
        rand::rng().random_range(0..bound)
    }
}

// ---------------------------------------------------------------------------
// FixedRoller
// ---------------------------------------------------------------------------

/// Every die shows `face`; every pick lands on `index` (wrapped to the
/// bound).
#[derive(Debug, Clone, Copy)]
pub struct FixedRoller {
    pub face: Die,
    pub index: usize,
}

impl FixedRoller {
    pub fn new(face: Die, index: usize) -> Self {
        Self { face, index }
    }
}

impl Roller for FixedRoller {
    fn roll_dice(&self, count: usize) -> Vec<Die> {
        vec![self.face; count]
    }

    fn pick_index(&self, bound: usize) -> usize {
        if bound == 0 { 0 } else { self.index % bound }
    }
}

// ---------------------------------------------------------------------------
// ScriptedRoller
// ---------------------------------------------------------------------------

/// Replays queued faces and indices in order.
///
/// Once a queue runs dry it falls back to `MIN_FACE` and index `0`, so a
/// script only needs to cover the rolls a test cares about.
#[derive(Debug, Default)]
pub struct ScriptedRoller {
    faces: Mutex<VecDeque<Die>>,
    indices: Mutex<VecDeque<usize>>,
}

impl ScriptedRoller {
    /// Creates a roller that will hand out `faces` one die at a time and
    /// `indices` one pick at a time.
    pub fn new(
        faces: impl IntoIterator<Item = Die>,
        indices: impl IntoIterator<Item = usize>,
    ) -> Self {
        Self {
            faces: Mutex::new(faces.into_iter().collect()),
            indices: Mutex::new(indices.into_iter().collect()),
        }
    }

    /// Queues more faces behind the ones already scripted.
    pub fn push_faces(&self, faces: impl IntoIterator<Item = Die>) {
        self.faces
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(faces);
    }
}

impl Roller for ScriptedRoller {
    fn roll_dice(&self, count: usize) -> Vec<Die> {
        let mut faces = self.faces.lock().unwrap_or_else(PoisonError::into_inner);
        (0..count)
            .map(|_| faces.pop_front().unwrap_or(MIN_FACE))
            .collect()
    }

    fn pick_index(&self, bound: usize) -> usize {
        let next = self
            .indices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or(0);
        if bound == 0 { 0 } else { next % bound }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_roller_stays_in_face_range() {
        let dice = RandomRoller.roll_dice(600);
        assert_eq!(dice.len(), 600);
        assert!(dice.iter().all(|d| (MIN_FACE..=MAX_FACE).contains(d)));
    }

    #[test]
    fn test_random_roller_pick_index_below_bound() {
        for _ in 0..100 {
            assert!(RandomRoller.pick_index(3) < 3);
        }
        assert_eq!(RandomRoller.pick_index(1), 0);
    }

    #[test]
    fn test_random_roller_zero_dice_is_empty() {
        assert!(RandomRoller.roll_dice(0).is_empty());
    }

    #[test]
    fn test_fixed_roller_repeats_face_and_wraps_index() {
        let roller = FixedRoller::new(4, 5);
        assert_eq!(roller.roll_dice(3), vec![4, 4, 4]);
        assert_eq!(roller.pick_index(3), 2);
    }

    #[test]
    fn test_scripted_roller_replays_then_falls_back() {
        let roller = ScriptedRoller::new([6, 5, 4], [2]);
        assert_eq!(roller.roll_dice(2), vec![6, 5]);
        assert_eq!(roller.roll_dice(2), vec![4, MIN_FACE]);
        assert_eq!(roller.pick_index(3), 2);
        assert_eq!(roller.pick_index(3), 0);
    }

    #[test]
    fn test_scripted_roller_push_faces_appends() {
        let roller = ScriptedRoller::new([], []);
        roller.push_faces([3, 3]);
        assert_eq!(roller.roll_dice(2), vec![3, 3]);
    }
}
