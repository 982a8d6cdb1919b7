//! # rail-rules
//!
//! A variant-open rules engine for turn-based rail network-building games.
//!
//! ## Design Principles
//!
//! 1. **Generic core, open variants**: every rule component (build cost,
//!    move validation, the action list, each phase) is a capability resolved
//!    through a per-game [`Injector`]. A variant swaps behaviour by listing an
//!    [`Override`] in its settings bundle; nothing else in the engine changes.
//!
//! 2. **Validate, then process**: action handlers check inputs against a
//!    read-only [`GameState`] before any mutation starts, so a rejected input
//!    never leaves state half-changed.
//!
//! 3. **Typed slots**: all mutable game data lives in a [`StateStore`] under
//!    typed [`Key`]s. Reads of uninitialized slots are configuration errors,
//!    never silent defaults.
//!
//! 4. **Deterministic**: one seeded random source per game, so replays and
//!    tests reproduce exactly.
//!
//! ## Modules
//!
//! - `core`: players, dice, errors, phases, actions and player input
//! - `map`: hex coordinates, terrain, track tiles
//! - `state`: the State Store and the engine's slots
//! - `context`: roles, overrides and the per-game injector
//! - `modules`: declarative patches to default lists
//! - `variants`: settings bundles, the variant registry, built-in overrides
//! - `rules`: action handlers, validators and calculators
//! - `phases`: phase handlers and the round engine
//! - `game`: the `Game` facade

pub mod context;
pub mod core;
pub mod game;
pub mod map;
pub mod modules;
pub mod phases;
pub mod rules;
pub mod state;
pub mod variants;

pub use crate::context::{Injector, Override, Role};
pub use crate::core::{
    Action, ActionRecord, BuildData, ConfigError, EngineError, EngineResult, GameRng, GameRngState, MoveData,
    Phase, PlayerId, PlayerInput, PlayerMap, RandomSource, ScriptedDice, UrbanizeData, ValidationError,
    ValidationKind,
};
pub use crate::game::{Game, GameSetup, GameState, NarrativeLog};
pub use crate::map::{CityColor, Coordinates, Direction, Grid, Orientation, SpaceType, TileType};
pub use crate::modules::Module;
pub use crate::rules::GameResult;
pub use crate::state::{Key, StateStore};
pub use crate::variants::{standard_registry, GameSettings, ReleaseStage, VariantRegistry};
