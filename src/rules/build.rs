//! Track building: legality and the build action.

use std::rc::Rc;

use crate::context::{Injector, Role};
use crate::core::{Action, BuildData, ConfigError, EngineResult, PlayerId, ValidationError};
use crate::game::GameState;
use crate::map::{BuiltTrack, Coordinates, Direction, SpaceType, TrackMap};
use crate::state::slots::{TRACK, TURN_STATE};
use crate::state::PlayerData;

use super::cost::{CostCalculator, CostCalculatorRole};
use super::handler::ActionHandler;

/// Tiles a player may lay per building turn.
pub const BUILD_LIMIT: u8 = 3;

/// Build limit after the player's selected action.
#[must_use]
pub fn build_limit(player: &PlayerData) -> u8 {
    match player.selected_action {
        Some(Action::Engineer) => BUILD_LIMIT + 1,
        Some(Action::SlowEngineer) => BUILD_LIMIT - 1,
        _ => BUILD_LIMIT,
    }
}

/// Geometry and placement legality of a build, ignoring money and limits.
pub trait BuildValidator {
    fn validate(&self, state: &GameState, player: PlayerId, build: &BuildData) -> EngineResult<()>;
}

/// Generic placement rules.
///
/// - Target is a land space on the board and not a city
/// - Town tiles go on towns and nowhere else
/// - Existing track may only be replaced by its owner, keeping its exits
/// - Every exit leads to an on-board land space
/// - New track joins a city, a town tile or the player's own track
#[derive(Clone, Copy, Debug, Default)]
pub struct GenericBuildValidator;

impl GenericBuildValidator {
    /// Whether leaving `from` through `direction` reaches something new
    /// track may attach to.
    fn joins_network(
        state: &GameState,
        track: &TrackMap,
        player: PlayerId,
        from: Coordinates,
        direction: Direction,
    ) -> Result<bool, ConfigError> {
        let Some(next) = state.neighbor(from, direction) else {
            return Ok(false);
        };
        if state.space(next)?.is_some_and(SpaceType::is_city) {
            return Ok(true);
        }
        let back = direction.opposite();
        Ok(track.get(next).is_some_and(|t| {
            t.exits().contains(&back) && (t.owner == Some(player) || t.tile.is_town_tile())
        }))
    }
}

impl BuildValidator for GenericBuildValidator {
    fn validate(&self, state: &GameState, player: PlayerId, build: &BuildData) -> EngineResult<()> {
        let at = build.coordinates;
        let space = state
            .space(at)?
            .ok_or_else(|| ValidationError::illegal_target(format!("{at} is not on the board")))?;
        if space.is_city() {
            return Err(ValidationError::illegal_target(format!("cannot lay track on the city at {at}")).into());
        }
        if !space.is_land() {
            return Err(ValidationError::illegal_target(format!("{at} is water")).into());
        }

        let on_town = space == SpaceType::Town;
        if build.tile.is_town_tile() != on_town {
            let message = if on_town {
                format!("the town at {at} needs a town tile")
            } else {
                format!("town tiles only go on towns, not {at}")
            };
            return Err(ValidationError::illegal_target(message).into());
        }

        let track = state.track()?;
        let exits = build.tile.exits(build.orientation);
        let existing = track.get(at);
        if let Some(existing) = existing {
            if existing.owner != Some(player) {
                return Err(ValidationError::illegal_target(format!("the track at {at} is not {player}'s")).into());
            }
            let kept = existing.exits();
            let same_exits = kept.len() == exits.len() && kept.iter().all(|e| exits.contains(e));
            if existing.tile == build.tile && same_exits {
                return Err(ValidationError::invalid_input(format!("that tile is already at {at}")).into());
            }
            if !kept.iter().all(|e| exits.contains(e)) {
                return Err(ValidationError::illegal_target(format!("an upgrade at {at} must keep the existing exits")).into());
            }
        }

        for &direction in &exits {
            match state.neighbor(at, direction) {
                None => {
                    return Err(ValidationError::illegal_target(format!("track at {at} runs off the board")).into())
                }
                Some(next) if state.space(next)? == Some(SpaceType::Water) => {
                    return Err(ValidationError::illegal_target(format!("track at {at} runs into water")).into())
                }
                Some(_) => {}
            }
        }

        if existing.is_none() {
            let mut joined = false;
            for &direction in &exits {
                if Self::joins_network(state, &track, player, at, direction)? {
                    joined = true;
                    break;
                }
            }
            if !joined {
                return Err(ValidationError::illegal_target(format!(
                    "track at {at} does not connect to a city, a town or {player}'s track"
                ))
                .into());
            }
        }
        Ok(())
    }
}

pub struct BuildValidatorRole;

impl Role for BuildValidatorRole {
    type Service = dyn BuildValidator;
    const NAME: &'static str = "BuildValidator";

    fn generic(_: &mut Injector) -> Result<Rc<dyn BuildValidator>, ConfigError> {
        Ok(Rc::new(GenericBuildValidator))
    }
}

/// Generic build action: limit and money checks around the validator, then
/// payment and placement.
pub struct BuildAction {
    validator: Rc<dyn BuildValidator>,
    cost: Rc<dyn CostCalculator>,
}

impl BuildAction {
    #[must_use]
    pub fn new(validator: Rc<dyn BuildValidator>, cost: Rc<dyn CostCalculator>) -> Self {
        Self { validator, cost }
    }
}

impl ActionHandler<BuildData> for BuildAction {
    fn validate(&self, state: &GameState, player: PlayerId, build: &BuildData) -> EngineResult<()> {
        let data = state.player(player)?;
        let limit = build_limit(&data);
        if state.get(TURN_STATE)?.builds >= limit {
            return Err(ValidationError::insufficient(format!("{player} has already laid {limit} tiles")).into());
        }

        self.validator.validate(state, player, build)?;

        let cost = self.cost.cost_of(state, player, build)?;
        if i64::from(data.money) < i64::from(cost) {
            return Err(ValidationError::insufficient(format!(
                "the tile costs ${cost}, {player} has ${}",
                data.money
            ))
            .into());
        }
        Ok(())
    }

    fn process(&self, state: &mut GameState, player: PlayerId, build: &BuildData) -> EngineResult<bool> {
        let cost = self.cost.cost_of(state, player, build)?;
        state.update_player(player, |d| d.money -= cost as i32)?;
        state.update(TRACK, |track| {
            track.insert(
                build.coordinates,
                BuiltTrack {
                    tile: build.tile,
                    orientation: build.orientation,
                    owner: Some(player),
                },
            );
        })?;
        state.update(TURN_STATE, |turn| {
            turn.builds += 1;
            turn.spent += cost;
        })?;
        state.narrate(format!(
            "{player} built {:?} track at {} for ${cost}",
            build.tile, build.coordinates
        ));
        Ok(false)
    }
}

pub struct BuildActionRole;

impl Role for BuildActionRole {
    type Service = dyn ActionHandler<BuildData>;
    const NAME: &'static str = "BuildAction";

    fn generic(injector: &mut Injector) -> Result<Rc<dyn ActionHandler<BuildData>>, ConfigError> {
        let validator = injector.resolve::<BuildValidatorRole>()?;
        let cost = injector.resolve::<CostCalculatorRole>()?;
        Ok(Rc::new(BuildAction::new(validator, cost)))
    }
}
