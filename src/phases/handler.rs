//! Phase handlers and their roles.

use std::rc::Rc;

use crate::context::{Injector, Role};
use crate::core::{ConfigError, EngineResult, Phase, PlayerId, PlayerInput};
use crate::game::GameState;

use super::automatic::{
    EndOfRoundPhase, ExpensesPhase, GoodsGrowthPhase, IncomePhase, IncomeReductionPhase, TurnOrderPhase,
};
use super::interactive::{BuildingPhase, IssueSharesPhase, MovingPhase, SelectActionPhase};

/// Behaviour of one phase.
pub trait PhaseHandler {
    fn phase(&self) -> Phase;

    /// Phase-entry hook. Returns the players due a turn, in order; an empty
    /// list means the phase needs no input and ends right away.
    fn on_start(&self, state: &mut GameState) -> EngineResult<Vec<PlayerId>>;

    /// Whether players may submit `input` during this phase.
    fn accepts(&self, _input: &PlayerInput) -> bool {
        false
    }

    /// Phase-exit hook, called once every turn has been taken.
    fn on_end(&self, _state: &mut GameState) -> EngineResult<()> {
        Ok(())
    }
}

macro_rules! phase_roles {
    ($($role:ident => $handler:ident),* $(,)?) => {
        $(
            pub struct $role;

            impl Role for $role {
                type Service = dyn PhaseHandler;
                const NAME: &'static str = stringify!($role);

                fn generic(_: &mut Injector) -> Result<Rc<dyn PhaseHandler>, ConfigError> {
                    Ok(Rc::new($handler))
                }
            }
        )*
    };
}

phase_roles! {
    IssueSharesRole => IssueSharesPhase,
    TurnOrderRole => TurnOrderPhase,
    SelectActionPhaseRole => SelectActionPhase,
    BuildingRole => BuildingPhase,
    MovingRole => MovingPhase,
    IncomeRole => IncomePhase,
    ExpensesRole => ExpensesPhase,
    IncomeReductionRole => IncomeReductionPhase,
    GoodsGrowthRole => GoodsGrowthPhase,
    EndOfRoundRole => EndOfRoundPhase,
}

/// Resolve the handler capability for `phase`.
pub fn handler_for(injector: &mut Injector, phase: Phase) -> Result<Rc<dyn PhaseHandler>, ConfigError> {
    match phase {
        Phase::IssueShares => injector.resolve::<IssueSharesRole>(),
        Phase::TurnOrder => injector.resolve::<TurnOrderRole>(),
        Phase::SelectAction => injector.resolve::<SelectActionPhaseRole>(),
        Phase::Building => injector.resolve::<BuildingRole>(),
        Phase::Moving => injector.resolve::<MovingRole>(),
        Phase::Income => injector.resolve::<IncomeRole>(),
        Phase::Expenses => injector.resolve::<ExpensesRole>(),
        Phase::IncomeReduction => injector.resolve::<IncomeReductionRole>(),
        Phase::GoodsGrowth => injector.resolve::<GoodsGrowthRole>(),
        Phase::EndOfRound => injector.resolve::<EndOfRoundRole>(),
    }
}
