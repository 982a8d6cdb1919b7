//! Core engine types: players, dice, errors, phases, actions.
//!
//! These building blocks are shared by every variant. Variant behaviour lives
//! behind capabilities in `rules` and `phases`, never in these types.

pub mod action;
pub mod error;
pub mod phase;
pub mod player;
pub mod rng;

pub use action::{Action, ActionRecord, BuildData, MoveData, PlayerInput, UrbanizeData};
pub use error::{ConfigError, EngineError, EngineResult, ValidationError, ValidationKind};
pub use phase::Phase;
pub use player::{PlayerId, PlayerMap};
pub use rng::{DiceCheckpoint, GameRng, GameRngState, RandomSource, ScriptedDice, DIE_FACES};
