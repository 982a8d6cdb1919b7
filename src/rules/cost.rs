//! Build cost calculation.

use std::rc::Rc;

use crate::context::{Injector, Role};
use crate::core::{BuildData, ConfigError, EngineResult, PlayerId, ValidationError};
use crate::game::GameState;
use crate::map::{BuiltTrack, TileType};

/// Fixed price of a town tile before its exits.
pub const TOWN_BASE_COST: u32 = 1;

/// Replacing a simple tile with a complex one, or any town upgrade.
pub const UPGRADE_COST: u32 = 3;

/// Re-laying a tile without adding a line.
pub const REDIRECT_COST: u32 = 2;

/// Prices a track build.
pub trait CostCalculator {
    fn cost_of(&self, state: &GameState, player: PlayerId, build: &BuildData) -> EngineResult<u32>;
}

/// Terrain base cost plus tile surcharges.
///
/// - Town tiles cost $1 plus $1 per exit
/// - Complex tiles add $1 (crossing) or $2 (coexisting) to the terrain cost
/// - Building over existing track is a flat upgrade or redirect price
#[derive(Clone, Copy, Debug, Default)]
pub struct GenericCost;

impl GenericCost {
    /// Extra charge for complex tiles.
    #[must_use]
    pub const fn surcharge(tile: TileType) -> u32 {
        match tile {
            TileType::Crossing => 1,
            TileType::Coexisting => 2,
            _ => 0,
        }
    }

    #[must_use]
    pub fn upgrade_cost(existing: &BuiltTrack, tile: TileType) -> u32 {
        if existing.tile.is_town_tile() || (tile.is_complex() && !existing.tile.is_complex()) {
            UPGRADE_COST
        } else {
            REDIRECT_COST
        }
    }
}

impl CostCalculator for GenericCost {
    fn cost_of(&self, state: &GameState, _player: PlayerId, build: &BuildData) -> EngineResult<u32> {
        let at = build.coordinates;
        let space = state
            .space(at)?
            .ok_or_else(|| ValidationError::illegal_target(format!("{at} is not on the board")))?;

        if let Some(existing) = state.track()?.get(at) {
            return Ok(Self::upgrade_cost(existing, build.tile));
        }
        if build.tile.is_town_tile() {
            return Ok(TOWN_BASE_COST + build.tile.exits(build.orientation).len() as u32);
        }
        let base = space
            .base_cost()
            .ok_or_else(|| ValidationError::illegal_target(format!("track cannot be laid at {at}")))?;
        Ok(base + Self::surcharge(build.tile))
    }
}

pub struct CostCalculatorRole;

impl Role for CostCalculatorRole {
    type Service = dyn CostCalculator;
    const NAME: &'static str = "CostCalculator";

    fn generic(_: &mut Injector) -> Result<Rc<dyn CostCalculator>, ConfigError> {
        Ok(Rc::new(GenericCost))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::Orientation;

    #[test]
    fn test_upgrade_prices() {
        let simple = BuiltTrack {
            tile: TileType::Straight,
            orientation: Orientation::new(0),
            owner: None,
        };
        assert_eq!(GenericCost::upgrade_cost(&simple, TileType::Crossing), UPGRADE_COST);
        assert_eq!(GenericCost::upgrade_cost(&simple, TileType::GentleCurve), REDIRECT_COST);

        let town = BuiltTrack {
            tile: TileType::TownStub,
            ..simple
        };
        assert_eq!(GenericCost::upgrade_cost(&town, TileType::TownStraight), UPGRADE_COST);
    }
}
