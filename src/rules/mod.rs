//! Rule capabilities: action handlers, validators and calculators.
//!
//! Every capability is a trait plus a [`Role`](crate::context::Role) marker
//! whose generic default lives next to it. The engine only ever asks the
//! [`Injector`](crate::context::Injector) for a role, so a variant can swap
//! any of these without the rest of the engine noticing.
//!
//! | Role | Service |
//! |------|---------|
//! | [`AllowedActionsRole`] | [`AllowedActions`] |
//! | [`CostCalculatorRole`] | [`CostCalculator`] |
//! | [`BuildValidatorRole`] | [`BuildValidator`] |
//! | [`BuildActionRole`] | `ActionHandler<BuildData>` |
//! | [`UrbanizeActionRole`] | `ActionHandler<UrbanizeData>` |
//! | [`LocomotiveRole`] | [`Locomotive`] |
//! | [`MoveValidatorRole`] | [`MoveValidator`] |
//! | [`MoveActionRole`] | `ActionHandler<MoveData>` |
//! | [`LocomotiveUpgradeRole`] | `ActionHandler<()>` |
//! | [`SelectActionRole`] | `ActionHandler<Action>` |
//! | [`SharesActionRole`] | `ActionHandler<u8>` |
//! | [`PassActionRole`] | `ActionHandler<()>` |
//! | [`EnderRole`] | [`Ender`] |

pub mod allowed;
pub mod build;
pub mod cost;
pub mod ender;
pub mod goods;
pub mod handler;
pub mod moving;
pub mod result;
pub mod select;
pub mod urbanize;

pub use allowed::{AllowedActions, AllowedActionsRole, GenericAllowedActions};
pub use build::{build_limit, BuildAction, BuildActionRole, BuildValidator, BuildValidatorRole, GenericBuildValidator};
pub use cost::{CostCalculator, CostCalculatorRole, GenericCost};
pub use ender::{default_turn_length, Ender, EnderRole, GenericEnder};
pub use handler::{execute, ActionHandler};
pub use moving::{
    GenericLocomotive, GenericMoveValidator, Link, Locomotive, LocomotiveRole, LocomotiveUpgrade,
    LocomotiveUpgradeRole, MoveAction, MoveActionRole, MoveValidator, MoveValidatorRole, MAX_LOCOMOTIVE,
};
pub use result::GameResult;
pub use select::{PassActionRole, PassHandler, SelectActionHandler, SelectActionRole, SharesActionRole, TakeShares};
pub use urbanize::{UrbanizeAction, UrbanizeActionRole};
