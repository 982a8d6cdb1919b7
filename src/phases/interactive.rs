//! Generic phases that wait on players.

use crate::core::{Action, EngineResult, Phase, PlayerId, PlayerInput};
use crate::game::GameState;
use crate::state::slots::PLAYER_DATA;

use super::handler::PhaseHandler;

/// Passes over the turn order in the moving phase.
pub const MOVE_PASSES: usize = 2;

/// Turn order with the holder of `action`, if any, moved to the front.
fn holder_first(state: &GameState, action: Action) -> EngineResult<Vec<PlayerId>> {
    let mut order = state.active_players()?;
    let players = state.get(PLAYER_DATA)?;
    if let Some(at) = order.iter().position(|p| players.get(*p).is_some_and(|d| d.has_selected(action))) {
        let holder = order.remove(at);
        order.insert(0, holder);
    }
    Ok(order)
}

#[derive(Clone, Copy, Debug, Default)]
pub struct IssueSharesPhase;

impl PhaseHandler for IssueSharesPhase {
    fn phase(&self) -> Phase {
        Phase::IssueShares
    }

    fn on_start(&self, state: &mut GameState) -> EngineResult<Vec<PlayerId>> {
        Ok(state.active_players()?)
    }

    fn accepts(&self, input: &PlayerInput) -> bool {
        matches!(input, PlayerInput::TakeShares { .. } | PlayerInput::Pass)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SelectActionPhase;

impl PhaseHandler for SelectActionPhase {
    fn phase(&self) -> Phase {
        Phase::SelectAction
    }

    fn on_start(&self, state: &mut GameState) -> EngineResult<Vec<PlayerId>> {
        Ok(state.active_players()?)
    }

    fn accepts(&self, input: &PlayerInput) -> bool {
        matches!(input, PlayerInput::SelectAction { .. } | PlayerInput::Pass)
    }
}

/// First Build goes first.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuildingPhase;

impl PhaseHandler for BuildingPhase {
    fn phase(&self) -> Phase {
        Phase::Building
    }

    fn on_start(&self, state: &mut GameState) -> EngineResult<Vec<PlayerId>> {
        holder_first(state, Action::FirstBuild)
    }

    fn accepts(&self, input: &PlayerInput) -> bool {
        matches!(
            input,
            PlayerInput::Build(_) | PlayerInput::Urbanize(_) | PlayerInput::Pass
        )
    }
}

/// First Move goes first; the order is walked [`MOVE_PASSES`] times.
#[derive(Clone, Copy, Debug, Default)]
pub struct MovingPhase;

impl PhaseHandler for MovingPhase {
    fn phase(&self) -> Phase {
        Phase::Moving
    }

    fn on_start(&self, state: &mut GameState) -> EngineResult<Vec<PlayerId>> {
        let order = holder_first(state, Action::FirstMove)?;
        Ok(order.repeat(MOVE_PASSES))
    }

    fn accepts(&self, input: &PlayerInput) -> bool {
        matches!(
            input,
            PlayerInput::MoveGoods(_) | PlayerInput::UpgradeLocomotive | PlayerInput::Pass
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::{select, strip_state};

    #[test]
    fn test_first_move_holder_leads_both_passes() {
        let mut state = strip_state(3);
        let p2 = PlayerId::new(2);
        select(&mut state, p2, Action::FirstMove);

        let queue = MovingPhase.on_start(&mut state).unwrap();
        let p = PlayerId::new;
        assert_eq!(queue, vec![p(2), p(0), p(1), p(2), p(0), p(1)]);
    }

    #[test]
    fn test_inputs_by_phase() {
        assert!(BuildingPhase.accepts(&PlayerInput::Pass));
        assert!(!BuildingPhase.accepts(&PlayerInput::UpgradeLocomotive));
        assert!(MovingPhase.accepts(&PlayerInput::UpgradeLocomotive));
        assert!(!IssueSharesPhase.accepts(&PlayerInput::SelectAction {
            action: Action::Engineer
        }));
    }
}
