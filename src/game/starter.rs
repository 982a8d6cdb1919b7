//! Slot initialization when a game begins.

use std::rc::Rc;

use crate::context::{Injector, Role};
use crate::core::{ConfigError, EngineResult, Phase, PlayerId, PlayerMap};
use crate::map::{CityColor, CoordMap, TrackMap};
use crate::modules::apply_phases;
use crate::rules::goods::supply_city;
use crate::state::slots::{
    CURRENT_PLAYER, DISABLED_ACTIONS, GAME_ENDED, GOODS, GOODS_BAG, NEW_CITIES, PHASE, PHASE_TURN, PLAYER_DATA,
    RESULT, ROUND, TRACK, TURN_ORDER, TURN_QUEUE, TURN_STATE, URBANIZED,
};
use crate::state::{PlayerData, TurnState};

use super::state::GameState;

/// Goods of each colour in the bag at the start.
pub const GOODS_PER_COLOR: usize = 16;

/// Goods drawn onto every printed city at the start.
pub const STARTING_GOODS: usize = 2;

/// Initializes every engine slot. Runs exactly once per game.
pub trait GameStarter {
    fn start(&self, state: &mut GameState) -> EngineResult<()>;
}

#[derive(Clone, Copy, Debug)]
pub struct GenericStarter {
    first_phase: Phase,
}

impl GenericStarter {
    #[must_use]
    pub fn new(first_phase: Phase) -> Self {
        Self { first_phase }
    }
}

impl GameStarter for GenericStarter {
    fn start(&self, state: &mut GameState) -> EngineResult<()> {
        let players = state.player_count();
        let bag: Vec<_> = CityColor::ALL
            .iter()
            .flat_map(|&c| std::iter::repeat(c).take(GOODS_PER_COLOR))
            .collect();

        let store = state.store_mut();
        store.init_state(ROUND, 1)?;
        store.init_state(PHASE, self.first_phase)?;
        store.init_state(GAME_ENDED, false)?;
        store.init_state(RESULT, None)?;
        store.init_state(TURN_ORDER, PlayerId::all(players).collect())?;
        store.init_state(CURRENT_PLAYER, None)?;
        store.init_state(TURN_QUEUE, Vec::new())?;
        store.init_state(PHASE_TURN, 0)?;
        store.init_state(TURN_STATE, TurnState::default())?;
        store.init_state(PLAYER_DATA, PlayerMap::new(players, |_| PlayerData::starting()))?;
        store.init_state(TRACK, TrackMap::new())?;
        store.init_state(GOODS, CoordMap::new())?;
        store.init_state(GOODS_BAG, bag)?;
        store.init_state(URBANIZED, CoordMap::new())?;
        store.init_state(NEW_CITIES, CityColor::ALL.to_vec())?;
        store.init_state(DISABLED_ACTIONS, Vec::new())?;

        for (city, _, _) in state.settings().grid().cities() {
            for _ in 0..STARTING_GOODS {
                supply_city(state, city)?;
            }
        }
        let message = format!("{players} players sit down to {}", state.settings().name());
        state.narrate(message);
        Ok(())
    }
}

pub struct GameStarterRole;

impl Role for GameStarterRole {
    type Service = dyn GameStarter;
    const NAME: &'static str = "GameStarter";

    fn generic(injector: &mut Injector) -> Result<Rc<dyn GameStarter>, ConfigError> {
        let phases = apply_phases(injector.settings().modules(), Phase::DEFAULT_ORDER.to_vec())?;
        let first = phases.first().copied().ok_or(ConfigError::EmptyPhaseList)?;
        Ok(Rc::new(GenericStarter::new(first)))
    }
}
