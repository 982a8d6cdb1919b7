//! Special actions and player input.
//!
//! [`Action`] is the closed set of special actions a player may pick during
//! action selection. [`PlayerInput`] is everything a player can submit; each
//! variant is handled by its own action-handler capability.

use serde::{Deserialize, Serialize};

use super::phase::Phase;
use super::player::PlayerId;
use crate::map::{CityColor, Coordinates, Orientation, TileType};

/// A selectable special action.
///
/// "No action selected" is `Option::<Action>::None` in player data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Action {
    /// Move goods first in the moving phase.
    FirstMove,
    /// Build first in the building phase.
    FirstBuild,
    /// Build one extra tile this round.
    Engineer,
    /// Upgrade the locomotive by one link.
    Locomotive,
    /// Place a new city on a town.
    Urbanization,
    /// Draw two goods onto cities.
    Production,
    /// Keep turn order position without bidding.
    TurnOrderPass,
    /// Build one tile fewer this round.
    SlowEngineer,
}

impl Action {
    /// Every action, in display order.
    pub const ALL: [Action; 8] = [
        Action::FirstMove,
        Action::FirstBuild,
        Action::Engineer,
        Action::Locomotive,
        Action::Urbanization,
        Action::Production,
        Action::TurnOrderPass,
        Action::SlowEngineer,
    ];

    /// Default action list before variant lists and modules.
    pub const DEFAULTS: [Action; 7] = [
        Action::FirstMove,
        Action::FirstBuild,
        Action::Engineer,
        Action::Locomotive,
        Action::Urbanization,
        Action::Production,
        Action::TurnOrderPass,
    ];

    /// Position on the action display.
    #[must_use]
    pub const fn display_order(self) -> u8 {
        self as u8
    }

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Action::FirstMove => "First Move",
            Action::FirstBuild => "First Build",
            Action::Engineer => "Engineer",
            Action::Locomotive => "Locomotive",
            Action::Urbanization => "Urbanization",
            Action::Production => "Production",
            Action::TurnOrderPass => "Turn Order Pass",
            Action::SlowEngineer => "Slow Engineer",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Data for a track build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuildData {
    /// Target space.
    pub coordinates: Coordinates,
    /// Tile to place.
    pub tile: TileType,
    /// Rotation of the tile.
    pub orientation: Orientation,
}

/// Data for a new city.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UrbanizeData {
    /// Target space.
    pub coordinates: Coordinates,
    /// Colour of the new city.
    pub color: CityColor,
}

/// Data for a goods delivery.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveData {
    /// Every space visited, starting at the good's city.
    pub path: Vec<Coordinates>,
    /// Colour of the good moved.
    pub good: CityColor,
}

/// Everything a player can submit.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerInput {
    /// Issue `count` shares (0 to decline).
    TakeShares { count: u8 },
    /// Pick a special action.
    SelectAction { action: Action },
    /// Lay a track tile.
    Build(BuildData),
    /// Place a new city.
    Urbanize(UrbanizeData),
    /// Deliver a good.
    MoveGoods(MoveData),
    /// Spend a move on a locomotive upgrade.
    UpgradeLocomotive,
    /// End the current turn.
    Pass,
}

impl PlayerInput {
    /// Short name for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            PlayerInput::TakeShares { .. } => "take-shares",
            PlayerInput::SelectAction { .. } => "select-action",
            PlayerInput::Build(_) => "build",
            PlayerInput::Urbanize(_) => "urbanize",
            PlayerInput::MoveGoods(_) => "move-goods",
            PlayerInput::UpgradeLocomotive => "upgrade-locomotive",
            PlayerInput::Pass => "pass",
        }
    }
}

/// An accepted action with metadata for history tracking.
///
/// Used for replay, undo and debugging.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who acted.
    pub player: PlayerId,
    /// What was submitted.
    pub input: PlayerInput,
    /// Round number when the action was taken.
    pub round: u32,
    /// Phase when the action was taken.
    pub phase: Phase,
    /// Sequence number across the whole game.
    pub sequence: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_exclude_slow_engineer() {
        assert!(!Action::DEFAULTS.contains(&Action::SlowEngineer));
        assert!(Action::ALL.contains(&Action::SlowEngineer));
    }

    #[test]
    fn test_display_order_follows_declaration() {
        let orders: Vec<_> = Action::ALL.iter().map(|a| a.display_order()).collect();
        let mut sorted = orders.clone();
        sorted.sort_unstable();
        assert_eq!(orders, sorted);
    }

    #[test]
    fn test_input_serialization() {
        let input = PlayerInput::SelectAction {
            action: Action::Engineer,
        };
        let json = serde_json::to_string(&input).unwrap();
        let back: PlayerInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input, back);
        assert_eq!(input.kind(), "select-action");
    }
}
