//! Module system: composable patches to the engine's default lists.
//!
//! A variant's settings bundle declares an ordered list of [`Module`]s. At
//! engine construction each module is applied in order to one default list
//! (available actions, phase sequence or turn length), consuming the previous
//! module's output. Modules are plain data and never look at game state, so
//! the same modules over the same defaults always give the same list.
//!
//! ```
//! use rail_rules::core::Action;
//! use rail_rules::modules::{apply_actions, Module};
//!
//! let modules = [Module::remove_actions("no-production", [Action::Production])];
//! let actions = apply_actions(&modules, Action::DEFAULTS.to_vec());
//! assert!(!actions.contains(&Action::Production));
//! ```

mod patch;

pub use patch::{ListPatch, TurnLengthPatch};

use crate::core::{Action, ConfigError, Phase};

/// What a module edits.
#[derive(Clone, Debug)]
pub enum ModuleTarget {
    Actions(ListPatch<Action>),
    Phases(ListPatch<Phase>),
    TurnLength(TurnLengthPatch),
}

/// A named patch to one default list.
#[derive(Clone, Debug)]
pub struct Module {
    pub name: &'static str,
    pub target: ModuleTarget,
}

impl Module {
    #[must_use]
    pub fn new(name: &'static str, target: ModuleTarget) -> Self {
        Self { name, target }
    }

    /// Make extra actions available.
    #[must_use]
    pub fn add_actions(name: &'static str, actions: impl IntoIterator<Item = Action>) -> Self {
        Self::new(
            name,
            ModuleTarget::Actions(ListPatch::Add(actions.into_iter().collect())),
        )
    }

    /// Take actions out of the game.
    #[must_use]
    pub fn remove_actions(name: &'static str, actions: impl IntoIterator<Item = Action>) -> Self {
        Self::new(
            name,
            ModuleTarget::Actions(ListPatch::Remove(actions.into_iter().collect())),
        )
    }

    /// Drop phases from every round.
    #[must_use]
    pub fn remove_phases(name: &'static str, phases: impl IntoIterator<Item = Phase>) -> Self {
        Self::new(
            name,
            ModuleTarget::Phases(ListPatch::Remove(phases.into_iter().collect())),
        )
    }

    /// Lengthen (positive) or shorten (negative) the game.
    #[must_use]
    pub fn adjust_turn_length(name: &'static str, delta: i32) -> Self {
        Self::new(name, ModuleTarget::TurnLength(TurnLengthPatch::Adjust(delta)))
    }
}

/// Apply every action module in order, then normalize: duplicates are
/// dropped and the result is sorted by display order.
#[must_use]
pub fn apply_actions(modules: &[Module], defaults: Vec<Action>) -> Vec<Action> {
    let mut actions = modules.iter().fold(defaults, |list, m| match &m.target {
        ModuleTarget::Actions(patch) => patch.apply(list),
        _ => list,
    });
    actions.sort_by_key(|a| a.display_order());
    actions.dedup();
    actions
}

/// Apply every phase module in order, keeping the first occurrence of each
/// phase. An empty result is a configuration error.
pub fn apply_phases(modules: &[Module], defaults: Vec<Phase>) -> Result<Vec<Phase>, ConfigError> {
    let patched = modules.iter().fold(defaults, |list, m| match &m.target {
        ModuleTarget::Phases(patch) => patch.apply(list),
        _ => list,
    });
    let mut phases = Vec::with_capacity(patched.len());
    for phase in patched {
        if !phases.contains(&phase) {
            phases.push(phase);
        }
    }
    if phases.is_empty() {
        return Err(ConfigError::EmptyPhaseList);
    }
    Ok(phases)
}

/// Apply every turn-length module in order.
#[must_use]
pub fn apply_turn_length(modules: &[Module], default: u32, player_count: usize) -> u32 {
    modules.iter().fold(default, |len, m| match &m.target {
        ModuleTarget::TurnLength(patch) => patch.apply(len, player_count),
        _ => len,
    })
}
