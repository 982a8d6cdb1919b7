//! Phase/Round Engine.
//!
//! ## State machine
//!
//! - States: the variant's effective phase list, after module transforms
//! - Initial: round 1, first phase in the list
//! - A phase with players due a turn waits for input; one without ends at
//!   once and the engine moves on
//! - After the last phase the Ender is consulted; the round wraps to the
//!   next one unless the game is over
//! - Terminal: `GAME_ENDED` set, nobody to act, no further advancement

use std::rc::Rc;

use tracing::{debug, info};

use crate::context::Injector;
use crate::core::{ConfigError, EngineResult, Phase};
use crate::game::GameState;
use crate::modules::{apply_phases, Module};
use crate::rules::{AllowedActionsRole, EnderRole, GameResult};
use crate::state::slots::{
    CURRENT_PLAYER, GAME_ENDED, PHASE, PHASE_TURN, RESULT, ROUND, TURN_QUEUE, TURN_STATE,
};
use crate::state::TurnState;

use super::handler::{handler_for, PhaseHandler};

/// Drives a game through its rounds.
#[derive(Clone, Debug)]
pub struct RoundEngine {
    phases: Vec<Phase>,
}

impl RoundEngine {
    /// Engine over the default phase list patched by `modules`.
    pub fn new(modules: &[Module]) -> Result<Self, ConfigError> {
        Ok(Self {
            phases: apply_phases(modules, Phase::DEFAULT_ORDER.to_vec())?,
        })
    }

    /// Effective phase list.
    #[must_use]
    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    /// Handler for `phase`.
    pub fn handler(&self, injector: &mut Injector, phase: Phase) -> Result<Rc<dyn PhaseHandler>, ConfigError> {
        handler_for(injector, phase)
    }

    /// Enter round 1 and run until the first player input is needed.
    pub fn begin(&self, injector: &mut Injector, state: &mut GameState) -> EngineResult<()> {
        self.start(injector, state, 1)?;
        self.enter(injector, state, 0)
    }

    /// Round-entry hook.
    pub fn start(&self, injector: &mut Injector, state: &mut GameState, round: u32) -> EngineResult<()> {
        state.set(ROUND, round)?;
        injector.resolve::<AllowedActionsRole>()?.on_round_start(state)?;
        info!(round, "round started");
        Ok(())
    }

    /// The current player finished their turn.
    pub fn end_turn(&self, injector: &mut Injector, state: &mut GameState) -> EngineResult<()> {
        if state.get(GAME_ENDED)? {
            return Ok(());
        }
        let queue = state.get(TURN_QUEUE)?;
        let next = state.update(PHASE_TURN, |turn| {
            *turn += 1;
            *turn
        })?;
        if let Some(&player) = queue.get(next) {
            state.set(CURRENT_PLAYER, Some(player))?;
            state.set(TURN_STATE, TurnState::default())?;
            debug!(%player, "next turn");
            return Ok(());
        }

        let phase = state.phase()?;
        self.handler(injector, phase)?.on_end(state)?;
        let index = self.position(phase)?;
        self.enter(injector, state, index + 1)
    }

    fn position(&self, phase: Phase) -> Result<usize, ConfigError> {
        self.phases
            .iter()
            .position(|p| *p == phase)
            .ok_or_else(|| ConfigError::InvalidSettings(format!("phase {phase} is not in this game")))
    }

    /// Enter the phase at `index`, skipping phases that need no input and
    /// wrapping into new rounds, until a player must act or the game ends.
    fn enter(&self, injector: &mut Injector, state: &mut GameState, mut index: usize) -> EngineResult<()> {
        loop {
            if index >= self.phases.len() {
                if let Some(result) = injector.resolve::<EnderRole>()?.check(state)? {
                    return Self::finish(state, result);
                }
                let round = state.round()? + 1;
                self.start(injector, state, round)?;
                index = 0;
            }

            let phase = self.phases[index];
            state.set(PHASE, phase)?;
            debug!(%phase, "phase started");
            let handler = self.handler(injector, phase)?;
            let queue = handler.on_start(state)?;

            if let Some(&first) = queue.first() {
                state.set(TURN_QUEUE, queue)?;
                state.set(PHASE_TURN, 0)?;
                state.set(CURRENT_PLAYER, Some(first))?;
                state.set(TURN_STATE, TurnState::default())?;
                return Ok(());
            }
            handler.on_end(state)?;
            index += 1;
        }
    }

    fn finish(state: &mut GameState, result: GameResult) -> EngineResult<()> {
        info!(?result, "game over");
        state.narrate(match &result {
            GameResult::Winner(p) => format!("{p} wins"),
            GameResult::Winners(ps) => {
                let names: Vec<_> = ps.iter().map(ToString::to_string).collect();
                format!("{} share the win", names.join(" and "))
            }
            GameResult::Draw => "The game ends without a winner".to_string(),
        });
        state.set(GAME_ENDED, true)?;
        state.set(RESULT, Some(result))?;
        state.set(CURRENT_PLAYER, None)?;
        state.set(TURN_QUEUE, Vec::new())?;
        Ok(())
    }
}
