//! Deterministic dice for goods growth, production and action disablement.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces the identical roll sequence
//! - **Serializable**: O(1) state capture and restore for undo and replays
//! - **Scriptable**: [`ScriptedDice`] replays a fixed roll sequence in tests
//!
//! All rule code draws randomness through the [`RandomSource`] trait, so a
//! game can be driven by real dice, a seeded generator or a script.
//!
//! ```
//! use rail_rules::core::{GameRng, RandomSource};
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//! assert_eq!(a.roll_die(), b.roll_die());
//! ```

use std::fmt::Debug;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Number of faces on the game's dice.
pub const DIE_FACES: u8 = 6;

/// Per-game source of randomness.
pub trait RandomSource: Debug {
    /// Roll one six-sided die, returning 1..=6.
    fn roll_die(&mut self) -> u8;

    /// Pick an index in `0..len`. `len` must be non-zero.
    fn pick_index(&mut self, len: usize) -> usize;

    /// Capture the position in the roll sequence.
    fn checkpoint(&self) -> DiceCheckpoint;

    /// Return to a captured position. Fails if the checkpoint was taken from
    /// a different kind of source.
    fn rewind(&mut self, checkpoint: &DiceCheckpoint) -> Result<(), ConfigError>;
}

/// Position of a [`RandomSource`] in its roll sequence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiceCheckpoint {
    Seeded(GameRngState),
    /// Index of the next scripted face.
    Scripted(usize),
}

/// Seeded ChaCha8 generator.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this generator was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl RandomSource for GameRng {
    fn roll_die(&mut self) -> u8 {
        self.inner.gen_range(1..=DIE_FACES)
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }

    fn checkpoint(&self) -> DiceCheckpoint {
        DiceCheckpoint::Seeded(self.state())
    }

    fn rewind(&mut self, checkpoint: &DiceCheckpoint) -> Result<(), ConfigError> {
        match checkpoint {
            DiceCheckpoint::Seeded(state) => {
                *self = Self::from_state(state);
                Ok(())
            }
            DiceCheckpoint::Scripted(_) => Err(ConfigError::CheckpointMismatch),
        }
    }
}

/// Serializable RNG state for checkpointing.
///
/// Uses the ChaCha8 word position so capture is O(1) regardless of how many
/// dice have been rolled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

/// Replays a fixed sequence of die faces, cycling when exhausted.
///
/// `pick_index` consumes one face as well and maps it onto the range.
#[derive(Clone, Debug)]
pub struct ScriptedDice {
    script: Vec<u8>,
    next: usize,
}

impl ScriptedDice {
    /// Create dice that roll `faces` in order, then start over.
    ///
    /// Panics if `faces` is empty or contains a value outside 1..=6.
    #[must_use]
    pub fn new(faces: impl Into<Vec<u8>>) -> Self {
        let script = faces.into();
        assert!(!script.is_empty(), "Scripted dice need at least one face");
        assert!(
            script.iter().all(|f| (1..=DIE_FACES).contains(f)),
            "Die faces must be within 1..=6"
        );
        Self { script, next: 0 }
    }

    fn next_face(&mut self) -> u8 {
        let face = self.script[self.next];
        self.next = (self.next + 1) % self.script.len();
        face
    }
}

impl RandomSource for ScriptedDice {
    fn roll_die(&mut self) -> u8 {
        self.next_face()
    }

    fn pick_index(&mut self, len: usize) -> usize {
        usize::from(self.next_face() - 1) % len
    }

    fn checkpoint(&self) -> DiceCheckpoint {
        DiceCheckpoint::Scripted(self.next)
    }

    fn rewind(&mut self, checkpoint: &DiceCheckpoint) -> Result<(), ConfigError> {
        match *checkpoint {
            DiceCheckpoint::Scripted(next) if next < self.script.len() => {
                self.next = next;
                Ok(())
            }
            _ => Err(ConfigError::CheckpointMismatch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.roll_die(), rng2.roll_die());
        }
    }

    #[test]
    fn test_rolls_stay_on_the_die() {
        let mut rng = GameRng::new(9);
        for _ in 0..500 {
            let face = rng.roll_die();
            assert!((1..=6).contains(&face));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..20).map(|_| rng1.pick_index(1000)).collect();
        let seq2: Vec<_> = (0..20).map(|_| rng2.pick_index(1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_state_round_trip_continues_sequence() {
        let mut rng = GameRng::new(42);
        for _ in 0..37 {
            rng.roll_die();
        }

        let state = rng.state();
        let expected: Vec<_> = (0..10).map(|_| rng.roll_die()).collect();

        let mut restored = GameRng::from_state(&state);
        let actual: Vec<_> = (0..10).map(|_| restored.roll_die()).collect();

        assert_eq!(expected, actual);
    }

    #[test]
    fn test_scripted_dice_cycle() {
        let mut dice = ScriptedDice::new(vec![3, 5]);
        let rolls: Vec<_> = (0..5).map(|_| dice.roll_die()).collect();
        assert_eq!(rolls, vec![3, 5, 3, 5, 3]);
    }

    #[test]
    fn test_scripted_pick_index_wraps() {
        let mut dice = ScriptedDice::new(vec![6, 1]);
        assert_eq!(dice.pick_index(4), 1);
        assert_eq!(dice.pick_index(4), 0);
    }

    #[test]
    fn test_rewind_replays_rolls() {
        let mut rng = GameRng::new(5);
        rng.roll_die();
        let mark = rng.checkpoint();
        let first: Vec<_> = (0..8).map(|_| rng.roll_die()).collect();
        rng.rewind(&mark).unwrap();
        let again: Vec<_> = (0..8).map(|_| rng.roll_die()).collect();
        assert_eq!(first, again);

        let mut dice = ScriptedDice::new(vec![2, 4, 6]);
        dice.roll_die();
        let mark = dice.checkpoint();
        assert_eq!(dice.roll_die(), 4);
        dice.rewind(&mark).unwrap();
        assert_eq!(dice.roll_die(), 4);
    }

    #[test]
    fn test_rewind_rejects_foreign_checkpoint() {
        let mut rng = GameRng::new(5);
        let scripted = ScriptedDice::new(vec![1]).checkpoint();
        assert_eq!(rng.rewind(&scripted), Err(ConfigError::CheckpointMismatch));
    }

    #[test]
    #[should_panic(expected = "within 1..=6")]
    fn test_scripted_dice_rejects_bad_face() {
        let _ = ScriptedDice::new(vec![7]);
    }
}
