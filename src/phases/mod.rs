//! Phase/Round Engine and the generic phase handlers.
//!
//! Each phase's behaviour is a [`PhaseHandler`] capability with its own role,
//! so a variant changes a phase by overriding that role. The
//! [`RoundEngine`] only knows the phase order.

pub mod automatic;
pub mod engine;
pub mod handler;
pub mod interactive;

pub use automatic::{income_reduction, ELIMINATION_INCOME};
pub use engine::RoundEngine;
pub use handler::{
    handler_for, BuildingRole, EndOfRoundRole, ExpensesRole, GoodsGrowthRole, IncomeReductionRole, IncomeRole,
    IssueSharesRole, MovingRole, PhaseHandler, SelectActionPhaseRole, TurnOrderRole,
};
pub use interactive::MOVE_PASSES;
