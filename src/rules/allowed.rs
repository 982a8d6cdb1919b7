//! Allowed-Actions Engine: which special actions exist this round.

use std::rc::Rc;

use crate::context::{Injector, Role};
use crate::core::{Action, ConfigError, EngineResult};
use crate::game::GameState;
use crate::modules::{apply_actions, Module};
use crate::state::slots::PLAYER_DATA;

/// Computes the legal action set and per-action disablement.
pub trait AllowedActions {
    /// The game's canonical action list, in display order, without
    /// duplicates.
    fn actions(&self) -> &[Action];

    /// Why `action` cannot be picked this round, if it cannot.
    fn disabled_reason(&self, state: &GameState, action: Action) -> EngineResult<Option<String>>;

    /// Round-entry hook, called before the first phase of every round.
    fn on_round_start(&self, _state: &mut GameState) -> EngineResult<()> {
        Ok(())
    }

    /// Actions still open: neither disabled nor taken by anyone this round.
    fn available(&self, state: &GameState) -> EngineResult<Vec<Action>> {
        let players = state.get(PLAYER_DATA)?;
        let mut open = Vec::new();
        for &action in self.actions() {
            let taken = players.iter().any(|(_, data)| data.has_selected(action));
            if !taken && self.disabled_reason(state, action)?.is_none() {
                open.push(action);
            }
        }
        Ok(open)
    }
}

/// Generic engine: a fixed list, nothing ever disabled.
#[derive(Clone, Debug)]
pub struct GenericAllowedActions {
    actions: Vec<Action>,
}

impl GenericAllowedActions {
    /// `base` patched by the variant's modules.
    #[must_use]
    pub fn new(base: Vec<Action>, modules: &[Module]) -> Self {
        Self {
            actions: apply_actions(modules, base),
        }
    }
}

impl AllowedActions for GenericAllowedActions {
    fn actions(&self) -> &[Action] {
        &self.actions
    }

    fn disabled_reason(&self, _state: &GameState, _action: Action) -> EngineResult<Option<String>> {
        Ok(None)
    }
}

pub struct AllowedActionsRole;

impl Role for AllowedActionsRole {
    type Service = dyn AllowedActions;
    const NAME: &'static str = "AllowedActions";

    fn generic(injector: &mut Injector) -> Result<Rc<dyn AllowedActions>, ConfigError> {
        Ok(Rc::new(GenericAllowedActions::new(
            Action::DEFAULTS.to_vec(),
            injector.settings().modules(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modules_shape_the_list() {
        let modules = [
            Module::remove_actions("no-production", [Action::Production]),
            Module::add_actions("slow", [Action::SlowEngineer]),
        ];
        let allowed = GenericAllowedActions::new(Action::DEFAULTS.to_vec(), &modules);
        assert!(!allowed.actions().contains(&Action::Production));
        assert_eq!(allowed.actions().last(), Some(&Action::SlowEngineer));
    }
}
