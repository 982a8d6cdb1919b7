//! Goods delivery and locomotives.

use std::rc::Rc;

use crate::context::{Injector, Role};
use crate::core::{ConfigError, EngineResult, MoveData, PlayerId, ValidationError};
use crate::game::GameState;
use crate::map::{Coordinates, Direction, SpaceType};
use crate::state::slots::GOODS;

use super::handler::ActionHandler;

/// Highest locomotive level.
pub const MAX_LOCOMOTIVE: u8 = 6;

/// Effective locomotive strength, as used by move validation and shown to
/// players.
pub trait Locomotive {
    fn level(&self, state: &GameState, player: PlayerId) -> EngineResult<u8>;

    fn display(&self, state: &GameState, player: PlayerId) -> EngineResult<String> {
        Ok(self.level(state, player)?.to_string())
    }
}

/// The level stored in player data.
#[derive(Clone, Copy, Debug, Default)]
pub struct GenericLocomotive;

impl Locomotive for GenericLocomotive {
    fn level(&self, state: &GameState, player: PlayerId) -> EngineResult<u8> {
        Ok(state.player(player)?.loco)
    }
}

pub struct LocomotiveRole;

impl Role for LocomotiveRole {
    type Service = dyn Locomotive;
    const NAME: &'static str = "Locomotive";

    fn generic(_: &mut Injector) -> Result<Rc<dyn Locomotive>, ConfigError> {
        Ok(Rc::new(GenericLocomotive))
    }
}

/// One link of a delivery: track between two stops.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Link {
    /// Whose track carried the good; `None` for unowned track.
    pub owner: Option<PlayerId>,
    /// Stop the link ends at.
    pub end: Coordinates,
}

/// Checks a delivery path and splits it into links.
pub trait MoveValidator {
    fn route(&self, state: &GameState, player: PlayerId, input: &MoveData) -> EngineResult<Vec<Link>>;
}

/// Generic delivery rules.
///
/// The path starts at a city holding the good, follows connected track
/// through each space, never visits a stop twice, never passes a city of
/// the good's colour before the end, and ends at such a city. The number of
/// links may not exceed the effective locomotive level.
pub struct GenericMoveValidator {
    locomotive: Rc<dyn Locomotive>,
}

impl GenericMoveValidator {
    #[must_use]
    pub fn new(locomotive: Rc<dyn Locomotive>) -> Self {
        Self { locomotive }
    }

    fn step(state: &GameState, from: Coordinates, to: Coordinates) -> Result<Direction, ValidationError> {
        Direction::ALL
            .into_iter()
            .find(|&d| state.neighbor(from, d) == Some(to))
            .ok_or_else(|| ValidationError::invalid_input(format!("{from} and {to} are not adjacent")))
    }
}

impl MoveValidator for GenericMoveValidator {
    fn route(&self, state: &GameState, player: PlayerId, input: &MoveData) -> EngineResult<Vec<Link>> {
        let path = &input.path;
        let (Some(&start), Some(&end)) = (path.first(), path.last()) else {
            return Err(ValidationError::invalid_input("a delivery needs a path").into());
        };
        if path.len() < 2 {
            return Err(ValidationError::invalid_input("a delivery needs at least two spaces").into());
        }
        let goods = state.get(GOODS)?;
        if !goods.get(start).is_some_and(|cubes| cubes.contains(&input.good)) {
            return Err(ValidationError::illegal_target(format!("there is no {:?} good at {start}", input.good)).into());
        }

        let track = state.track()?;
        let off_board = |at: Coordinates| ValidationError::invalid_input(format!("{at} is not on the board"));
        let mut links = Vec::new();
        let mut stops = vec![start];
        // owner of the first tile of the link in progress
        let mut carrier: Option<Option<PlayerId>> = None;
        let mut entered: Option<Direction> = None;

        for (i, pair) in path.windows(2).enumerate() {
            let (from, to) = (pair[0], pair[1]);
            let direction = Self::step(state, from, to)?;

            match state.space(from)?.ok_or_else(|| off_board(from))? {
                SpaceType::City { .. } => {}
                SpaceType::Town => {
                    let tile = track
                        .get(from)
                        .filter(|t| t.exits().contains(&direction))
                        .ok_or_else(|| ValidationError::illegal_target(format!("the town at {from} has no exit toward {to}")))?;
                    carrier.get_or_insert(tile.owner);
                }
                _ => {
                    let tile = track
                        .get(from)
                        .ok_or_else(|| ValidationError::illegal_target(format!("there is no track at {from}")))?;
                    let joined = entered.is_some_and(|side| tile.connects(side, direction));
                    if !joined {
                        return Err(ValidationError::illegal_target(format!("the track at {from} does not lead to {to}")).into());
                    }
                }
            }

            let side = direction.opposite();
            let arrival = state.space(to)?.ok_or_else(|| off_board(to))?;
            if !arrival.is_city() {
                let tile = track
                    .get(to)
                    .filter(|t| t.exits().contains(&side))
                    .ok_or_else(|| ValidationError::illegal_target(format!("no track enters {to} from {from}")))?;
                carrier.get_or_insert(tile.owner);
            }
            entered = Some(side);

            if arrival.is_stop() {
                if stops.contains(&to) {
                    return Err(ValidationError::illegal_target(format!("the path visits {to} twice")).into());
                }
                stops.push(to);
                let owner = carrier
                    .take()
                    .ok_or_else(|| ValidationError::illegal_target(format!("no track joins {from} and {to}")))?;
                let last = i + 2 == path.len();
                if let SpaceType::City { color, .. } = arrival {
                    if color == input.good && !last {
                        return Err(ValidationError::illegal_target(format!(
                            "the good would pass the {color:?} city at {to} before the end"
                        ))
                        .into());
                    }
                }
                links.push(Link { owner, end: to });
            }
        }

        match state.space(end)? {
            Some(SpaceType::City { color, .. }) if color == input.good => {}
            _ => {
                return Err(ValidationError::illegal_target(format!("a {:?} good must end at a {:?} city", input.good, input.good)).into())
            }
        }

        let level = self.locomotive.level(state, player)?;
        if links.len() > usize::from(level) {
            return Err(ValidationError::insufficient(format!(
                "{} links exceed {player}'s locomotive of {level}",
                links.len()
            ))
            .into());
        }
        Ok(links)
    }
}

pub struct MoveValidatorRole;

impl Role for MoveValidatorRole {
    type Service = dyn MoveValidator;
    const NAME: &'static str = "MoveValidator";

    fn generic(injector: &mut Injector) -> Result<Rc<dyn MoveValidator>, ConfigError> {
        Ok(Rc::new(GenericMoveValidator::new(injector.resolve::<LocomotiveRole>()?)))
    }
}

/// Delivers one good and pays each link's owner one income.
pub struct MoveAction {
    validator: Rc<dyn MoveValidator>,
}

impl MoveAction {
    #[must_use]
    pub fn new(validator: Rc<dyn MoveValidator>) -> Self {
        Self { validator }
    }
}

impl ActionHandler<MoveData> for MoveAction {
    fn validate(&self, state: &GameState, player: PlayerId, input: &MoveData) -> EngineResult<()> {
        self.validator.route(state, player, input).map(drop)
    }

    fn process(&self, state: &mut GameState, player: PlayerId, input: &MoveData) -> EngineResult<bool> {
        let links = self.validator.route(state, player, input)?;
        let start = input.path[0];
        state.update(GOODS, |goods| {
            if let Some(cubes) = goods.get_mut(start) {
                if let Some(i) = cubes.iter().position(|c| *c == input.good) {
                    cubes.remove(i);
                }
            }
        })?;
        for owner in links.iter().filter_map(|l| l.owner) {
            state.update_player(owner, |d| {
                if !d.eliminated {
                    d.income += 1;
                }
            })?;
        }
        state.narrate(format!(
            "{player} delivered a {:?} good over {} links",
            input.good,
            links.len()
        ));
        Ok(true)
    }
}

pub struct MoveActionRole;

impl Role for MoveActionRole {
    type Service = dyn ActionHandler<MoveData>;
    const NAME: &'static str = "MoveAction";

    fn generic(injector: &mut Injector) -> Result<Rc<dyn ActionHandler<MoveData>>, ConfigError> {
        Ok(Rc::new(MoveAction::new(injector.resolve::<MoveValidatorRole>()?)))
    }
}

/// Spends a move on one locomotive level, once per round.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocomotiveUpgrade;

impl ActionHandler<()> for LocomotiveUpgrade {
    fn validate(&self, state: &GameState, player: PlayerId, _: &()) -> EngineResult<()> {
        let data = state.player(player)?;
        if data.loco_upgraded {
            return Err(ValidationError::not_allowed(format!("{player} already upgraded this round")).into());
        }
        if data.loco >= MAX_LOCOMOTIVE {
            return Err(ValidationError::not_allowed(format!("{player}'s locomotive is at its maximum")).into());
        }
        Ok(())
    }

    fn process(&self, state: &mut GameState, player: PlayerId, _: &()) -> EngineResult<bool> {
        let level = state.update_player(player, |d| {
            d.loco += 1;
            d.loco_upgraded = true;
            d.loco
        })?;
        state.narrate(format!("{player} upgraded to a {level}-link locomotive"));
        Ok(true)
    }
}

pub struct LocomotiveUpgradeRole;

impl Role for LocomotiveUpgradeRole {
    type Service = dyn ActionHandler<()>;
    const NAME: &'static str = "LocomotiveUpgrade";

    fn generic(_: &mut Injector) -> Result<Rc<dyn ActionHandler<()>>, ConfigError> {
        Ok(Rc::new(LocomotiveUpgrade))
    }
}
