//! Game settings bundles.
//!
//! A [`GameSettings`] describes one variant: identity, player bounds, the
//! starting grid, capability overrides, modules and an optional neighbour
//! rule. Bundles are immutable once built and shared through `Arc`.

use std::any::TypeId;

use serde::{Deserialize, Serialize};

use crate::context::Override;
use crate::core::ConfigError;
use crate::map::{Coordinates, Direction, Grid};
use crate::modules::Module;

/// Release maturity, ordered from least to most mature. Informational only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReleaseStage {
    #[default]
    Development,
    Alpha,
    Beta,
    Production,
    Deprecated,
}

/// A track connection printed between two named locations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterCityConnection {
    pub from: String,
    pub to: String,
    /// Cost to claim the connection.
    pub cost: u32,
    /// Where the connection is drawn, if anywhere.
    pub position: Option<Coordinates>,
}

/// Neighbour rule for boards that are not plain hex grids.
pub type NeighborFn = fn(&Grid, Coordinates, Direction) -> Option<Coordinates>;

/// Immutable per-variant descriptor.
#[derive(Debug)]
pub struct GameSettings {
    id: String,
    name: String,
    designer: Option<String>,
    implementer: Option<String>,
    min_players: usize,
    max_players: usize,
    grid: Grid,
    connections: Vec<InterCityConnection>,
    stage: ReleaseStage,
    rotation: Option<u16>,
    overrides: Vec<Override>,
    modules: Vec<Module>,
    neighbor: Option<NeighborFn>,
}

impl GameSettings {
    /// Start describing a variant.
    #[must_use]
    pub fn builder(id: impl Into<String>, name: impl Into<String>) -> GameSettingsBuilder {
        GameSettingsBuilder::new(id, name)
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn designer(&self) -> Option<&str> {
        self.designer.as_deref()
    }

    #[must_use]
    pub fn implementer(&self) -> Option<&str> {
        self.implementer.as_deref()
    }

    #[must_use]
    pub fn min_players(&self) -> usize {
        self.min_players
    }

    #[must_use]
    pub fn max_players(&self) -> usize {
        self.max_players
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn connections(&self) -> &[InterCityConnection] {
        &self.connections
    }

    #[must_use]
    pub fn stage(&self) -> ReleaseStage {
        self.stage
    }

    /// Board rotation in degrees, for rendering.
    #[must_use]
    pub fn rotation(&self) -> Option<u16> {
        self.rotation
    }

    #[must_use]
    pub fn overrides(&self) -> &[Override] {
        &self.overrides
    }

    #[must_use]
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// Check a requested player count against the variant's bounds.
    pub fn check_player_count(&self, count: usize) -> Result<(), ConfigError> {
        if (self.min_players..=self.max_players).contains(&count) {
            Ok(())
        } else {
            Err(ConfigError::PlayerCountOutOfRange {
                count,
                min: self.min_players,
                max: self.max_players,
            })
        }
    }

    /// Space adjacent to `from` through `direction`, if it is on the board.
    #[must_use]
    pub fn neighbor(&self, from: Coordinates, direction: Direction) -> Option<Coordinates> {
        let next = match self.neighbor {
            Some(rule) => rule(&self.grid, from, direction)?,
            None => from.offset(direction),
        };
        self.grid.contains(next).then_some(next)
    }

    /// Last override targeting the role with `role` type id.
    pub(crate) fn override_for(&self, role: TypeId) -> Option<&Override> {
        self.overrides.iter().rev().find(|o| o.role_id() == role)
    }
}

/// Builder for [`GameSettings`].
#[derive(Debug)]
pub struct GameSettingsBuilder {
    settings: GameSettings,
}

impl GameSettingsBuilder {
    fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            settings: GameSettings {
                id: id.into(),
                name: name.into(),
                designer: None,
                implementer: None,
                min_players: 3,
                max_players: 6,
                grid: Grid::default(),
                connections: Vec::new(),
                stage: ReleaseStage::default(),
                rotation: None,
                overrides: Vec::new(),
                modules: Vec::new(),
                neighbor: None,
            },
        }
    }

    #[must_use]
    pub fn with_designer(mut self, designer: impl Into<String>) -> Self {
        self.settings.designer = Some(designer.into());
        self
    }

    #[must_use]
    pub fn with_implementer(mut self, implementer: impl Into<String>) -> Self {
        self.settings.implementer = Some(implementer.into());
        self
    }

    #[must_use]
    pub fn with_players(mut self, min: usize, max: usize) -> Self {
        self.settings.min_players = min;
        self.settings.max_players = max;
        self
    }

    #[must_use]
    pub fn with_grid(mut self, grid: Grid) -> Self {
        self.settings.grid = grid;
        self
    }

    #[must_use]
    pub fn with_connection(mut self, connection: InterCityConnection) -> Self {
        self.settings.connections.push(connection);
        self
    }

    #[must_use]
    pub fn with_stage(mut self, stage: ReleaseStage) -> Self {
        self.settings.stage = stage;
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, degrees: u16) -> Self {
        self.settings.rotation = Some(degrees);
        self
    }

    /// Append one override. Later overrides win over earlier ones.
    #[must_use]
    pub fn with_override(mut self, entry: Override) -> Self {
        self.settings.overrides.push(entry);
        self
    }

    #[must_use]
    pub fn with_overrides(mut self, entries: impl IntoIterator<Item = Override>) -> Self {
        self.settings.overrides.extend(entries);
        self
    }

    /// Append one module. Modules apply in the order added.
    #[must_use]
    pub fn with_module(mut self, module: Module) -> Self {
        self.settings.modules.push(module);
        self
    }

    #[must_use]
    pub fn with_neighbor_rule(mut self, rule: NeighborFn) -> Self {
        self.settings.neighbor = Some(rule);
        self
    }

    /// Finish, checking the bundle is internally consistent.
    pub fn build(self) -> Result<GameSettings, ConfigError> {
        let s = &self.settings;
        if s.id.trim().is_empty() {
            return Err(ConfigError::InvalidSettings("variant id is empty".into()));
        }
        if s.min_players == 0 || s.min_players > s.max_players || s.max_players > 255 {
            return Err(ConfigError::InvalidSettings(format!(
                "player bounds {}..={} are not valid",
                s.min_players, s.max_players
            )));
        }
        Ok(self.settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::SpaceType;

    fn strip() -> Grid {
        Grid::builder().fill(3, 1, SpaceType::Plain).build()
    }

    #[test]
    fn test_builder_defaults() {
        let s = GameSettings::builder("base", "Base").build().unwrap();
        assert_eq!(s.min_players(), 3);
        assert_eq!(s.max_players(), 6);
        assert_eq!(s.stage(), ReleaseStage::Development);
        assert!(s.overrides().is_empty());
    }

    #[test]
    fn test_invalid_bounds() {
        let err = GameSettings::builder("x", "X").with_players(5, 2).build().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSettings(_)));
        assert!(GameSettings::builder(" ", "X").build().is_err());
    }

    #[test]
    fn test_player_count_check() {
        let s = GameSettings::builder("x", "X").with_players(2, 4).build().unwrap();
        assert!(s.check_player_count(3).is_ok());
        assert_eq!(
            s.check_player_count(5),
            Err(ConfigError::PlayerCountOutOfRange { count: 5, min: 2, max: 4 })
        );
    }

    #[test]
    fn test_release_stage_ordering() {
        assert!(ReleaseStage::Development < ReleaseStage::Alpha);
        assert!(ReleaseStage::Production < ReleaseStage::Deprecated);
    }

    #[test]
    fn test_default_neighbor_stays_on_board() {
        let s = GameSettings::builder("x", "X").with_grid(strip()).build().unwrap();
        let origin = Coordinates::new(0, 0);
        assert_eq!(s.neighbor(origin, Direction::SouthEast), Some(Coordinates::new(1, 0)));
        assert_eq!(s.neighbor(origin, Direction::NorthWest), None);
    }

    #[test]
    fn test_wrap_around_neighbor_rule() {
        fn wrap(_: &Grid, from: Coordinates, d: Direction) -> Option<Coordinates> {
            let next = from.offset(d);
            Some(Coordinates::new(next.q.rem_euclid(3), next.r))
        }
        let s = GameSettings::builder("ring", "Ring")
            .with_grid(strip())
            .with_neighbor_rule(wrap)
            .build()
            .unwrap();
        assert_eq!(
            s.neighbor(Coordinates::new(0, 0), Direction::NorthWest),
            Some(Coordinates::new(2, 0))
        );
    }
}
