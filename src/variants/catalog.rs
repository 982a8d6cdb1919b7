//! Built-in variants.

use crate::core::{Action, ConfigError, Phase};
use crate::map::{CityColor, Coordinates, Grid, SpaceType};
use crate::modules::Module;

use super::overrides::{
    loco_bonus_override, parity_cost_override, random_disable_override, running_cost_override,
    track_urbanize_override,
};
use super::registry::VariantRegistry;
use super::settings::{GameSettings, InterCityConnection, ReleaseStage};

/// An 8 × 6 board with six printed cities, two towns and some rough terrain.
#[must_use]
pub fn demo_grid() -> Grid {
    let at = Coordinates::new;
    Grid::builder()
        .city(at(0, 2), CityColor::Red, 1)
        .city(at(7, 1), CityColor::Blue, 2)
        .city(at(3, 0), CityColor::Yellow, 3)
        .city(at(4, 5), CityColor::Purple, 4)
        .city(at(1, 5), CityColor::Black, 5)
        .city(at(6, 4), CityColor::Red, 6)
        .town(at(2, 3))
        .town(at(5, 2))
        .space(at(3, 2), SpaceType::Hill)
        .space(at(4, 3), SpaceType::Hill)
        .space(at(5, 3), SpaceType::Mountain)
        .space(at(2, 1), SpaceType::River)
        .space(at(6, 2), SpaceType::Swamp)
        .space(at(0, 0), SpaceType::Water)
        .space(at(1, 0), SpaceType::Water)
        .fill(8, 6, SpaceType::Plain)
        .build()
}

fn base() -> Result<GameSettings, ConfigError> {
    GameSettings::builder("base", "Rails")
        .with_designer("Rail Rules")
        .with_implementer("Rail Rules")
        .with_grid(demo_grid())
        .with_connection(InterCityConnection {
            from: "Red".into(),
            to: "Blue".into(),
            cost: 6,
            position: None,
        })
        .with_stage(ReleaseStage::Production)
        .build()
}

/// Engineer halves costs with parity rounding, cities may be founded on any
/// track, and Slow Engineer joins the action list.
fn guild() -> Result<GameSettings, ConfigError> {
    GameSettings::builder("guild", "Engineers' Guild")
        .with_grid(demo_grid())
        .with_players(2, 5)
        .with_overrides([
            parity_cost_override(),
            running_cost_override(),
            track_urbanize_override(),
        ])
        .with_module(Module::add_actions("slow-engineer", [Action::SlowEngineer]))
        .with_stage(ReleaseStage::Beta)
        .build()
}

/// Actions close at random each round, Locomotive holders run one link
/// further, and the game is a round shorter without goods growth.
fn blackout() -> Result<GameSettings, ConfigError> {
    GameSettings::builder("blackout", "Blackout")
        .with_grid(demo_grid())
        .with_rotation(180)
        .with_overrides([random_disable_override(), loco_bonus_override()])
        .with_module(Module::adjust_turn_length("short", -1))
        .with_module(Module::remove_phases("no-growth", [Phase::GoodsGrowth]))
        .with_stage(ReleaseStage::Alpha)
        .build()
}

/// Registry holding every built-in variant.
pub fn standard_registry() -> Result<VariantRegistry, ConfigError> {
    let mut registry = VariantRegistry::new();
    registry.register(base()?)?;
    registry.register(guild()?)?;
    registry.register(blackout()?)?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry() {
        let registry = standard_registry().unwrap();
        assert_eq!(registry.len(), 3);
        let ids: Vec<_> = registry.values().map(|s| s.id().to_string()).collect();
        assert_eq!(ids, ["base", "guild", "blackout"]);
        assert_eq!(registry.released(ReleaseStage::Beta).count(), 2);
    }

    #[test]
    fn test_demo_grid_cities() {
        let grid = demo_grid();
        assert_eq!(grid.len(), 48);
        assert_eq!(grid.cities().len(), 6);
        assert_eq!(grid.space(Coordinates::new(0, 0)), Some(SpaceType::Water));
    }
}
