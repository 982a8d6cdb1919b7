//! Board spaces and the static starting grid.
//!
//! The grid is the immutable part of the map: terrain, towns and printed
//! cities. Built track, urbanized cities and goods cubes change during play
//! and live in the State Store instead.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::coordinates::Coordinates;

/// City and goods colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CityColor {
    Red,
    Blue,
    Yellow,
    Purple,
    Black,
}

impl CityColor {
    /// Every colour.
    pub const ALL: [CityColor; 5] = [
        CityColor::Red,
        CityColor::Blue,
        CityColor::Yellow,
        CityColor::Purple,
        CityColor::Black,
    ];
}

/// What occupies a board space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpaceType {
    Plain,
    River,
    Hill,
    Mountain,
    Swamp,
    Water,
    Town,
    /// A printed city. `growth` is the goods-growth die face, if any.
    City { color: CityColor, growth: Option<u8> },
}

impl SpaceType {
    /// Anything but water.
    #[must_use]
    pub const fn is_land(self) -> bool {
        !matches!(self, SpaceType::Water)
    }

    /// Cities and towns end links.
    #[must_use]
    pub const fn is_stop(self) -> bool {
        matches!(self, SpaceType::Town | SpaceType::City { .. })
    }

    #[must_use]
    pub const fn is_city(self) -> bool {
        matches!(self, SpaceType::City { .. })
    }

    /// Generic terrain cost of laying a simple tile here.
    ///
    /// `None` where track can never be laid.
    #[must_use]
    pub const fn base_cost(self) -> Option<u32> {
        match self {
            SpaceType::Plain => Some(2),
            SpaceType::River | SpaceType::Hill => Some(3),
            SpaceType::Mountain | SpaceType::Swamp => Some(4),
            SpaceType::Town => Some(1),
            SpaceType::Water | SpaceType::City { .. } => None,
        }
    }
}

/// Static map topology.
#[derive(Clone, Debug, Default)]
pub struct Grid {
    spaces: FxHashMap<Coordinates, SpaceType>,
}

impl Grid {
    /// Start building a grid.
    #[must_use]
    pub fn builder() -> GridBuilder {
        GridBuilder::default()
    }

    /// Space at `coordinates`, if on the board.
    #[must_use]
    pub fn space(&self, coordinates: Coordinates) -> Option<SpaceType> {
        self.spaces.get(&coordinates).copied()
    }

    #[must_use]
    pub fn contains(&self, coordinates: Coordinates) -> bool {
        self.spaces.contains_key(&coordinates)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.spaces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spaces.is_empty()
    }

    /// Iterate over all spaces in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (Coordinates, SpaceType)> + '_ {
        self.spaces.iter().map(|(c, s)| (*c, *s))
    }

    /// Printed cities with their growth numbers, sorted by coordinates.
    #[must_use]
    pub fn cities(&self) -> Vec<(Coordinates, CityColor, Option<u8>)> {
        let mut cities: Vec<_> = self
            .iter()
            .filter_map(|(c, s)| match s {
                SpaceType::City { color, growth } => Some((c, color, growth)),
                _ => None,
            })
            .collect();
        cities.sort_by_key(|(c, _, _)| *c);
        cities
    }
}

/// Builder for [`Grid`].
#[derive(Clone, Debug, Default)]
pub struct GridBuilder {
    spaces: FxHashMap<Coordinates, SpaceType>,
}

impl GridBuilder {
    /// Set one space.
    #[must_use]
    pub fn space(mut self, coordinates: Coordinates, space: SpaceType) -> Self {
        self.spaces.insert(coordinates, space);
        self
    }

    /// Fill a `width` × `height` parallelogram with `space`, keeping spaces
    /// already set.
    #[must_use]
    pub fn fill(mut self, width: i32, height: i32, space: SpaceType) -> Self {
        for q in 0..width {
            for r in 0..height {
                self.spaces.entry(Coordinates::new(q, r)).or_insert(space);
            }
        }
        self
    }

    #[must_use]
    pub fn city(self, coordinates: Coordinates, color: CityColor, growth: u8) -> Self {
        self.space(
            coordinates,
            SpaceType::City {
                color,
                growth: Some(growth),
            },
        )
    }

    #[must_use]
    pub fn town(self, coordinates: Coordinates) -> Self {
        self.space(coordinates, SpaceType::Town)
    }

    #[must_use]
    pub fn build(self) -> Grid {
        Grid {
            spaces: self.spaces,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_land_and_costs() {
        assert!(SpaceType::Plain.is_land());
        assert!(!SpaceType::Water.is_land());
        assert_eq!(SpaceType::Water.base_cost(), None);
        assert_eq!(SpaceType::Mountain.base_cost(), Some(4));
    }

    #[test]
    fn test_builder_keeps_explicit_spaces() {
        let grid = Grid::builder()
            .city(Coordinates::new(0, 0), CityColor::Red, 1)
            .fill(3, 3, SpaceType::Plain)
            .build();

        assert_eq!(grid.len(), 9);
        assert!(grid.space(Coordinates::new(0, 0)).is_some_and(SpaceType::is_city));
        assert_eq!(grid.space(Coordinates::new(2, 2)), Some(SpaceType::Plain));
        assert_eq!(grid.space(Coordinates::new(5, 5)), None);
    }

    #[test]
    fn test_cities_listing() {
        let grid = Grid::builder()
            .city(Coordinates::new(2, 0), CityColor::Blue, 2)
            .city(Coordinates::new(0, 0), CityColor::Red, 1)
            .town(Coordinates::new(1, 0))
            .build();

        let cities = grid.cities();
        assert_eq!(cities.len(), 2);
        assert_eq!(cities[0].1, CityColor::Red);
    }
}
