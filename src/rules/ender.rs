//! Game end detection and final scoring.

use std::rc::Rc;

use crate::context::{Injector, Role};
use crate::core::{ConfigError, EngineResult, PlayerId};
use crate::game::GameState;
use crate::modules::{apply_turn_length, Module};

use super::result::GameResult;

/// Rounds played before module adjustments.
#[must_use]
pub const fn default_turn_length(player_count: usize) -> u32 {
    match player_count {
        0..=3 => 10,
        4 => 8,
        5 => 7,
        _ => 6,
    }
}

/// Decides when the game is over and who won.
pub trait Ender {
    /// Number of rounds in this game.
    fn turn_length(&self) -> u32;

    /// Final score of one player.
    fn score(&self, state: &GameState, player: PlayerId) -> EngineResult<i32>;

    /// Called after every round. `Some` ends the game.
    fn check(&self, state: &GameState) -> EngineResult<Option<GameResult>>;
}

/// Ends after the last round, or once at most one player survives.
///
/// Score is three per income, one per owned track tile, minus three per
/// share issued.
#[derive(Clone, Copy, Debug)]
pub struct GenericEnder {
    turn_length: u32,
}

impl GenericEnder {
    #[must_use]
    pub fn new(modules: &[Module], player_count: usize) -> Self {
        Self {
            turn_length: apply_turn_length(modules, default_turn_length(player_count), player_count),
        }
    }
}

impl Ender for GenericEnder {
    fn turn_length(&self) -> u32 {
        self.turn_length
    }

    fn score(&self, state: &GameState, player: PlayerId) -> EngineResult<i32> {
        let data = state.player(player)?;
        let tiles = state
            .track()?
            .iter()
            .filter(|(_, t)| t.owner == Some(player))
            .count() as i32;
        Ok(3 * data.income + tiles - 3 * i32::from(data.shares))
    }

    fn check(&self, state: &GameState) -> EngineResult<Option<GameResult>> {
        let survivors = state.active_players()?;
        let last_standing = survivors.is_empty() || (state.player_count() > 1 && survivors.len() == 1);
        if state.round()? < self.turn_length && !last_standing {
            return Ok(None);
        }
        let mut scores = Vec::with_capacity(survivors.len());
        for player in survivors {
            scores.push((player, self.score(state, player)?));
        }
        Ok(Some(GameResult::from_scores(&scores)))
    }
}

pub struct EnderRole;

impl Role for EnderRole {
    type Service = dyn Ender;
    const NAME: &'static str = "Ender";

    fn generic(injector: &mut Injector) -> Result<Rc<dyn Ender>, ConfigError> {
        Ok(Rc::new(GenericEnder::new(
            injector.settings().modules(),
            injector.player_count(),
        )))
    }
}
