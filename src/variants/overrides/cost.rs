//! Engineer discount with alternating rounding.
//!
//! Halving an odd cost always rounding the same way would favour one side
//! over a game. The rounding direction instead follows the parity of the
//! player's running cost: even rounds up, odd rounds down.

use std::rc::Rc;

use crate::context::{Injector, Override};
use crate::core::{Action, BuildData, ConfigError, EngineResult, PlayerId, PlayerMap};
use crate::game::GameState;
use crate::rules::{ActionHandler, BuildActionRole, CostCalculator, CostCalculatorRole};
use crate::state::slots::TURN_STATE;
use crate::state::Key;

/// Post-discount build spending per player, across the whole game.
///
/// Initialized by the first build that goes through [`RunningCostBuild`].
pub const RUNNING_COST: Key<PlayerMap<u32>> = Key::new("runningCost");

/// Half of `base`, rounded up when `running` is even and down when odd,
/// never below 1.
#[must_use]
pub const fn parity_halve(base: u32, running: u32) -> u32 {
    let half = if running % 2 == 0 { (base + 1) / 2 } else { base / 2 };
    if half < 1 {
        1
    } else {
        half
    }
}

/// Running cost of `player`; zero before the accumulator exists.
pub fn running_cost(state: &GameState, player: PlayerId) -> Result<u32, ConfigError> {
    Ok(state
        .store()
        .try_get(RUNNING_COST)?
        .and_then(|costs| costs.get(player).copied())
        .unwrap_or(0))
}

/// Halves generic costs for the Engineer holder.
pub struct ParityDiscountCost {
    inner: Rc<dyn CostCalculator>,
}

impl ParityDiscountCost {
    #[must_use]
    pub fn new(inner: Rc<dyn CostCalculator>) -> Self {
        Self { inner }
    }
}

impl CostCalculator for ParityDiscountCost {
    fn cost_of(&self, state: &GameState, player: PlayerId, build: &BuildData) -> EngineResult<u32> {
        let base = self.inner.cost_of(state, player, build)?;
        if !state.player(player)?.has_selected(Action::Engineer) {
            return Ok(base);
        }
        Ok(parity_halve(base, running_cost(state, player)?))
    }
}

fn parity_cost(injector: &mut Injector) -> Result<Rc<dyn CostCalculator>, ConfigError> {
    Ok(Rc::new(ParityDiscountCost::new(injector.generic::<CostCalculatorRole>()?)))
}

#[must_use]
pub fn parity_cost_override() -> Override {
    Override::of::<CostCalculatorRole>("ParityDiscountCost", parity_cost)
}

/// Generic build that also adds what it charged to [`RUNNING_COST`].
pub struct RunningCostBuild {
    inner: Rc<dyn ActionHandler<BuildData>>,
}

impl RunningCostBuild {
    #[must_use]
    pub fn new(inner: Rc<dyn ActionHandler<BuildData>>) -> Self {
        Self { inner }
    }
}

impl ActionHandler<BuildData> for RunningCostBuild {
    fn validate(&self, state: &GameState, player: PlayerId, build: &BuildData) -> EngineResult<()> {
        self.inner.validate(state, player, build)
    }

    fn process(&self, state: &mut GameState, player: PlayerId, build: &BuildData) -> EngineResult<bool> {
        let before = state.get(TURN_STATE)?.spent;
        let ends_turn = self.inner.process(state, player, build)?;
        let charged = state.get(TURN_STATE)?.spent.saturating_sub(before);

        if !state.store().is_initialized(RUNNING_COST) {
            let players = state.player_count();
            state.store_mut().init_state(RUNNING_COST, PlayerMap::with_value(players, 0))?;
        }
        state.update(RUNNING_COST, |costs| {
            if let Some(total) = costs.get_mut(player) {
                *total += charged;
            }
        })?;
        Ok(ends_turn)
    }
}

fn running_build(injector: &mut Injector) -> Result<Rc<dyn ActionHandler<BuildData>>, ConfigError> {
    Ok(Rc::new(RunningCostBuild::new(injector.generic::<BuildActionRole>()?)))
}

#[must_use]
pub fn running_cost_override() -> Override {
    Override::of::<BuildActionRole>("RunningCostBuild", running_build)
}
