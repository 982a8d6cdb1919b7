//! Variant settings, the variant registry and the built-in overrides.
//!
//! A variant is a [`GameSettings`] bundle: metadata, the starting grid, and
//! the overrides and modules that specialize the generic engine.
//! [`VariantRegistry`] maps variant ids to bundles and is filled once at
//! startup.

pub mod catalog;
pub mod overrides;
pub mod registry;
pub mod settings;

pub use catalog::{demo_grid, standard_registry};
pub use registry::VariantRegistry;
pub use settings::{GameSettings, GameSettingsBuilder, InterCityConnection, NeighborFn, ReleaseStage};
