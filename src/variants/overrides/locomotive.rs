//! Locomotive bonus for the Locomotive action holder.

use std::rc::Rc;

use crate::context::{Injector, Override};
use crate::core::{Action, ConfigError, EngineResult, Phase, PlayerId};
use crate::game::GameState;
use crate::rules::{Locomotive, LocomotiveRole};

/// Bonus links granted by the catalog override.
pub const LOCO_BONUS: u8 = 1;

/// Adds `bonus` links while the player holds the Locomotive action, but only
/// in the phases where the locomotive matters: action selection, building
/// and moving. Elsewhere the wrapped value is returned untouched.
pub struct SelectedActionLocoBonus {
    inner: Rc<dyn Locomotive>,
    bonus: u8,
}

impl SelectedActionLocoBonus {
    #[must_use]
    pub fn new(inner: Rc<dyn Locomotive>, bonus: u8) -> Self {
        Self { inner, bonus }
    }

    fn eligible(state: &GameState, player: PlayerId) -> EngineResult<bool> {
        let phase = state.phase()?;
        let in_phase = matches!(phase, Phase::Moving | Phase::SelectAction | Phase::Building);
        Ok(in_phase && state.player(player)?.has_selected(Action::Locomotive))
    }
}

impl Locomotive for SelectedActionLocoBonus {
    fn level(&self, state: &GameState, player: PlayerId) -> EngineResult<u8> {
        let base = self.inner.level(state, player)?;
        if Self::eligible(state, player)? {
            return Ok(base.saturating_add(self.bonus));
        }
        Ok(base)
    }

    fn display(&self, state: &GameState, player: PlayerId) -> EngineResult<String> {
        if Self::eligible(state, player)? {
            return Ok(format!("{}+{}", self.inner.level(state, player)?, self.bonus));
        }
        self.inner.display(state, player)
    }
}

fn loco_bonus(injector: &mut Injector) -> Result<Rc<dyn Locomotive>, ConfigError> {
    Ok(Rc::new(SelectedActionLocoBonus::new(
        injector.generic::<LocomotiveRole>()?,
        LOCO_BONUS,
    )))
}

#[must_use]
pub fn loco_bonus_override() -> Override {
    Override::of::<LocomotiveRole>("SelectedActionLocoBonus", loco_bonus)
}
