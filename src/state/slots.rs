//! Slots shared by the generic engine.
//!
//! Each slot has exactly one starter (see `game::starter`) and a small set of
//! owners allowed to write it. Variant-only slots are declared next to the
//! variant code that owns them.

use serde::{Deserialize, Serialize};

use super::key::Key;
use crate::core::{Action, Phase, PlayerId, PlayerMap};
use crate::map::{CityColor, CoordMap, TrackMap};
use crate::rules::GameResult;

/// Per-player record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerData {
    pub money: i32,
    pub income: i32,
    pub shares: u8,
    /// Locomotive level: maximum links per delivery.
    pub loco: u8,
    pub selected_action: Option<Action>,
    /// Set once per round when a move is spent on a locomotive upgrade.
    pub loco_upgraded: bool,
    pub eliminated: bool,
}

impl PlayerData {
    /// A fresh player at game start: two shares already issued.
    #[must_use]
    pub fn starting() -> Self {
        Self {
            money: 10,
            income: 0,
            shares: 2,
            loco: 1,
            selected_action: None,
            loco_upgraded: false,
            eliminated: false,
        }
    }

    /// Whether the player holds `action` this round.
    #[must_use]
    pub fn has_selected(&self, action: Action) -> bool {
        self.selected_action == Some(action)
    }
}

/// Bookkeeping for the turn in progress.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    /// Tiles laid this turn.
    pub builds: u8,
    /// Money spent on track this turn.
    pub spent: u32,
    /// Whether a city was placed this turn.
    pub urbanized: bool,
}

/// Current round, starting at 1.
pub const ROUND: Key<u32> = Key::new("round");

/// Current phase.
pub const PHASE: Key<Phase> = Key::new("phase");

/// Set by the ender when the game is over.
pub const GAME_ENDED: Key<bool> = Key::new("gameEnded");

/// Final standings, once the game has ended.
pub const RESULT: Key<Option<GameResult>> = Key::new("result");

/// Player order for the round.
pub const TURN_ORDER: Key<Vec<PlayerId>> = Key::new("turnOrder");

/// Player to act, `None` while no input is expected.
pub const CURRENT_PLAYER: Key<Option<PlayerId>> = Key::new("currentPlayer");

/// Players due a turn in the current phase, in order.
pub const TURN_QUEUE: Key<Vec<PlayerId>> = Key::new("turnQueue");

/// Position in [`TURN_QUEUE`].
pub const PHASE_TURN: Key<usize> = Key::new("phaseTurn");

/// Per-turn counters, reset whenever a new player starts a turn.
pub const TURN_STATE: Key<TurnState> = Key::new("turnState");

/// Every player's record.
pub const PLAYER_DATA: Key<PlayerMap<PlayerData>> = Key::new("playerData");

/// Built track.
pub const TRACK: Key<TrackMap> = Key::new("track");

/// Goods cubes waiting in cities.
pub const GOODS: Key<CoordMap<Vec<CityColor>>> = Key::new("goods");

/// Goods not yet on the board.
pub const GOODS_BAG: Key<Vec<CityColor>> = Key::new("goodsBag");

/// Cities placed by urbanization.
pub const URBANIZED: Key<CoordMap<CityColor>> = Key::new("urbanized");

/// Colours still available for urbanization.
pub const NEW_CITIES: Key<Vec<CityColor>> = Key::new("newCities");

/// Actions unavailable this round.
pub const DISABLED_ACTIONS: Key<Vec<Action>> = Key::new("disabledActions");
