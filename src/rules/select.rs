//! Action selection, share issuing and passing.

use std::rc::Rc;

use crate::context::{Injector, Role};
use crate::core::{Action, ConfigError, EngineResult, Phase, PlayerId, ValidationError};
use crate::game::GameState;
use crate::state::slots::PLAYER_DATA;

use super::allowed::{AllowedActions, AllowedActionsRole};
use super::goods::supply_city;
use super::handler::ActionHandler;
use super::moving::MAX_LOCOMOTIVE;

/// Most shares a player may hold.
pub const MAX_SHARES: u8 = 15;

/// Cash raised per share issued.
pub const SHARE_VALUE: i32 = 5;

/// Goods drawn by the Production action.
pub const PRODUCTION_GOODS: usize = 2;

/// Picks a special action for the round and applies its immediate effect.
pub struct SelectActionHandler {
    allowed: Rc<dyn AllowedActions>,
}

impl SelectActionHandler {
    #[must_use]
    pub fn new(allowed: Rc<dyn AllowedActions>) -> Self {
        Self { allowed }
    }

    /// Two goods from the bag onto randomly chosen printed cities.
    fn production(state: &mut GameState) -> EngineResult<()> {
        let cities: Vec<_> = state.settings().grid().cities().into_iter().map(|(c, _, _)| c).collect();
        if cities.is_empty() {
            return Ok(());
        }
        for _ in 0..PRODUCTION_GOODS {
            let city = cities[state.rng().pick_index(cities.len())];
            if supply_city(state, city)?.is_none() {
                break;
            }
        }
        Ok(())
    }
}

impl ActionHandler<Action> for SelectActionHandler {
    fn validate(&self, state: &GameState, player: PlayerId, action: &Action) -> EngineResult<()> {
        let action = *action;
        let players = state.get(PLAYER_DATA)?;
        if players
            .get(player)
            .ok_or(ConfigError::UnknownPlayer(player))?
            .selected_action
            .is_some()
        {
            return Err(ValidationError::not_allowed(format!("{player} already selected an action")).into());
        }
        if !self.allowed.actions().contains(&action) {
            return Err(ValidationError::illegal_target(format!("{action} is not part of this game")).into());
        }
        if let Some(reason) = self.allowed.disabled_reason(state, action)? {
            return Err(ValidationError::not_allowed(format!("{action} is unavailable: {reason}")).into());
        }
        if let Some((holder, _)) = players.iter().find(|(_, d)| d.has_selected(action)) {
            return Err(ValidationError::not_allowed(format!("{action} was taken by {holder}")).into());
        }
        Ok(())
    }

    fn process(&self, state: &mut GameState, player: PlayerId, action: &Action) -> EngineResult<bool> {
        let action = *action;
        state.update_player(player, |d| {
            d.selected_action = Some(action);
            if action == Action::Locomotive {
                d.loco = (d.loco + 1).min(MAX_LOCOMOTIVE);
            }
        })?;
        if action == Action::Production {
            Self::production(state)?;
        }
        state.narrate(format!("{player} selected {action}"));
        Ok(true)
    }
}

pub struct SelectActionRole;

impl Role for SelectActionRole {
    type Service = dyn ActionHandler<Action>;
    const NAME: &'static str = "SelectAction";

    fn generic(injector: &mut Injector) -> Result<Rc<dyn ActionHandler<Action>>, ConfigError> {
        Ok(Rc::new(SelectActionHandler::new(injector.resolve::<AllowedActionsRole>()?)))
    }
}

/// Issues shares for cash. Zero declines.
#[derive(Clone, Copy, Debug, Default)]
pub struct TakeShares;

impl ActionHandler<u8> for TakeShares {
    fn validate(&self, state: &GameState, player: PlayerId, count: &u8) -> EngineResult<()> {
        let held = state.player(player)?.shares;
        if u16::from(held) + u16::from(*count) > u16::from(MAX_SHARES) {
            return Err(ValidationError::insufficient(format!(
                "{player} holds {held} shares and may not exceed {MAX_SHARES}"
            ))
            .into());
        }
        Ok(())
    }

    fn process(&self, state: &mut GameState, player: PlayerId, count: &u8) -> EngineResult<bool> {
        let count = *count;
        state.update_player(player, |d| {
            d.shares += count;
            d.money += SHARE_VALUE * i32::from(count);
        })?;
        if count > 0 {
            state.narrate(format!("{player} issued {count} shares"));
        }
        Ok(true)
    }
}

pub struct SharesActionRole;

impl Role for SharesActionRole {
    type Service = dyn ActionHandler<u8>;
    const NAME: &'static str = "SharesAction";

    fn generic(_: &mut Injector) -> Result<Rc<dyn ActionHandler<u8>>, ConfigError> {
        Ok(Rc::new(TakeShares))
    }
}

/// Ends the player's turn.
///
/// During action selection a player may only pass once nothing is left.
pub struct PassHandler {
    allowed: Rc<dyn AllowedActions>,
}

impl PassHandler {
    #[must_use]
    pub fn new(allowed: Rc<dyn AllowedActions>) -> Self {
        Self { allowed }
    }
}

impl ActionHandler<()> for PassHandler {
    fn validate(&self, state: &GameState, player: PlayerId, _: &()) -> EngineResult<()> {
        if state.phase()? == Phase::SelectAction && !self.allowed.available(state)?.is_empty() {
            return Err(ValidationError::not_allowed(format!("{player} must select an action")).into());
        }
        Ok(())
    }

    fn process(&self, state: &mut GameState, player: PlayerId, _: &()) -> EngineResult<bool> {
        state.narrate(format!("{player} passed"));
        Ok(true)
    }
}

pub struct PassActionRole;

impl Role for PassActionRole {
    type Service = dyn ActionHandler<()>;
    const NAME: &'static str = "PassAction";

    fn generic(injector: &mut Injector) -> Result<Rc<dyn ActionHandler<()>>, ConfigError> {
        Ok(Rc::new(PassHandler::new(injector.resolve::<AllowedActionsRole>()?)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ValidationKind;
    use crate::game::test_support::strip_state;
    use crate::rules::allowed::GenericAllowedActions;

    fn handler() -> SelectActionHandler {
        SelectActionHandler::new(Rc::new(GenericAllowedActions::new(Action::DEFAULTS.to_vec(), &[])))
    }

    #[test]
    fn test_action_taken_once() {
        let mut state = strip_state(3);
        let (p0, p1) = (PlayerId::new(0), PlayerId::new(1));
        let select = handler();

        select.validate(&state, p0, &Action::Engineer).unwrap();
        assert!(select.process(&mut state, p0, &Action::Engineer).unwrap());

        let err = select.validate(&state, p1, &Action::Engineer).unwrap_err();
        assert_eq!(err.validation_kind(), Some(ValidationKind::NotAllowed));
        assert!(select.validate(&state, p0, &Action::Locomotive).is_err());
        assert!(select.validate(&state, p1, &Action::SlowEngineer).is_err());
    }

    #[test]
    fn test_locomotive_selection_upgrades() {
        let mut state = strip_state(3);
        let p0 = PlayerId::new(0);
        handler().process(&mut state, p0, &Action::Locomotive).unwrap();
        assert_eq!(state.player(p0).unwrap().loco, 2);
    }

    #[test]
    fn test_share_cap() {
        let mut state = strip_state(3);
        let p0 = PlayerId::new(0);
        TakeShares.validate(&state, p0, &13).unwrap();
        assert!(TakeShares.validate(&state, p0, &14).is_err());

        TakeShares.process(&mut state, p0, &3).unwrap();
        let data = state.player(p0).unwrap();
        assert_eq!(data.shares, 5);
        assert_eq!(data.money, 25);
    }
}
