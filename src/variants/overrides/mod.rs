//! Decorating overrides shared by the built-in variants.
//!
//! Each override wraps the generic implementation of one role (obtained
//! through [`Injector::generic`](crate::context::Injector::generic)), lets it
//! run first, then applies its own delta. The `*_override()` functions return
//! the [`Override`](crate::context::Override) entries a settings bundle lists.

pub mod cost;
pub mod disabled;
pub mod locomotive;
pub mod urbanize;

pub use cost::{
    parity_cost_override, parity_halve, running_cost, running_cost_override, ParityDiscountCost, RunningCostBuild,
    RUNNING_COST,
};
pub use disabled::{random_disable_override, RandomDisabledActions, DISABLED_REASON};
pub use locomotive::{loco_bonus_override, SelectedActionLocoBonus, LOCO_BONUS};
pub use urbanize::{track_urbanize_override, TrackUrbanize};
