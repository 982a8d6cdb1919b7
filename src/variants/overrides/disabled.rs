//! Per-round random disablement of special actions.

use std::rc::Rc;

use crate::context::{Injector, Override};
use crate::core::{Action, ConfigError, EngineResult};
use crate::game::GameState;
use crate::rules::{AllowedActions, AllowedActionsRole};
use crate::state::slots::DISABLED_ACTIONS;

pub const DISABLED_REASON: &str = "Closed by the die this round";

/// Wraps the generic action list and closes some actions every round.
///
/// At round start the die drives a walk over the action list. Each roll of
/// `r` takes `r` steps forward, wrapping, never stopping on an action
/// already closed this round; the action landed on is closed and the next
/// walk starts from it. The first walk of a round starts before index 0.
///
/// By default the walk leaves one action per player plus one open.
pub struct RandomDisabledActions {
    inner: Rc<dyn AllowedActions>,
    count: usize,
}

impl RandomDisabledActions {
    #[must_use]
    pub fn new(inner: Rc<dyn AllowedActions>, player_count: usize) -> Self {
        let count = inner.actions().len().saturating_sub(player_count + 1);
        Self { inner, count }
    }

    /// Close exactly `count` actions per round, capped so one stays open.
    #[must_use]
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Actions closed per round.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count.min(self.inner.actions().len().saturating_sub(1))
    }

    fn walk(&self, state: &mut GameState) -> Vec<Action> {
        let actions = self.inner.actions();
        let n = actions.len();
        let mut closed: Vec<usize> = Vec::with_capacity(self.count());
        let mut cursor: Option<usize> = None;

        for _ in 0..self.count() {
            let roll = state.rng().roll_die();
            for _ in 0..roll {
                let mut next = cursor.map_or(0, |at| (at + 1) % n);
                while closed.contains(&next) {
                    next = (next + 1) % n;
                }
                cursor = Some(next);
            }
            if let Some(at) = cursor {
                closed.push(at);
            }
        }
        closed.into_iter().map(|at| actions[at]).collect()
    }
}

impl AllowedActions for RandomDisabledActions {
    fn actions(&self) -> &[Action] {
        self.inner.actions()
    }

    fn disabled_reason(&self, state: &GameState, action: Action) -> EngineResult<Option<String>> {
        if let Some(reason) = self.inner.disabled_reason(state, action)? {
            return Ok(Some(reason));
        }
        let closed = state.get(DISABLED_ACTIONS)?;
        Ok(closed.contains(&action).then(|| DISABLED_REASON.to_string()))
    }

    fn on_round_start(&self, state: &mut GameState) -> EngineResult<()> {
        self.inner.on_round_start(state)?;
        let closed = self.walk(state);
        if !closed.is_empty() {
            let names: Vec<_> = closed.iter().map(|a| a.name()).collect();
            state.narrate(format!("Closed this round: {}", names.join(", ")));
        }
        state.set(DISABLED_ACTIONS, closed)?;
        Ok(())
    }
}

fn random_disable(injector: &mut Injector) -> Result<Rc<dyn AllowedActions>, ConfigError> {
    let inner = injector.generic::<AllowedActionsRole>()?;
    Ok(Rc::new(RandomDisabledActions::new(inner, injector.player_count())))
}

#[must_use]
pub fn random_disable_override() -> Override {
    Override::of::<AllowedActionsRole>("RandomDisabledActions", random_disable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::strip_state;
    use crate::rules::GenericAllowedActions;

    fn engine(players: usize) -> RandomDisabledActions {
        RandomDisabledActions::new(
            Rc::new(GenericAllowedActions::new(Action::DEFAULTS.to_vec(), &[])),
            players,
        )
    }

    #[test]
    fn test_count_leaves_one_per_player() {
        assert_eq!(engine(3).count(), 3);
        assert_eq!(engine(6).count(), 0);
        assert_eq!(engine(3).with_count(20).count(), 6);
    }

    #[test]
    fn test_walk_skips_closed_actions() {
        // the starter's four goods draws use faces 1 to 4, so the walk rolls 5, 6, 1
        let mut state = strip_state(3);
        let engine = engine(3);
        engine.on_round_start(&mut state).unwrap();

        // 5 from the start lands on index 4; 6 from 4 lands on 3;
        // 1 from 3 skips the closed 4 and lands on 5
        assert_eq!(
            state.get(DISABLED_ACTIONS).unwrap(),
            vec![Action::Urbanization, Action::Locomotive, Action::Production]
        );
        assert_eq!(
            engine.disabled_reason(&state, Action::Locomotive).unwrap().as_deref(),
            Some(DISABLED_REASON)
        );
        assert_eq!(engine.disabled_reason(&state, Action::Engineer).unwrap(), None);
        assert_eq!(engine.available(&state).unwrap().len(), 4);
    }

    #[test]
    fn test_walk_wraps_past_closed() {
        let mut state = strip_state(3);
        let engine = engine(3).with_count(6);
        engine.on_round_start(&mut state).unwrap();

        let closed = state.get(DISABLED_ACTIONS).unwrap();
        assert_eq!(closed.len(), 6);
        let mut unique = closed.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 6);
    }
}
