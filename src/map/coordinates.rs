//! Hex coordinates and directions.
//!
//! Boards use axial coordinates on flat-topped hexes. `Direction` names the
//! six edges clockwise from north.

use std::collections::BTreeMap;

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Axial hex coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinates {
    /// Column.
    pub q: i32,
    /// Diagonal row.
    pub r: i32,
}

impl Coordinates {
    /// Create coordinates.
    #[must_use]
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// The space one step away in `direction` on an unbounded Euclidean board.
    #[must_use]
    pub const fn offset(self, direction: Direction) -> Self {
        let (dq, dr) = direction.delta();
        Self::new(self.q + dq, self.r + dr)
    }

    /// Hex distance between two spaces.
    #[must_use]
    pub fn distance(self, other: Coordinates) -> u32 {
        let dq = self.q - other.q;
        let dr = self.r - other.r;
        ((dq.abs() + dr.abs() + (dq + dr).abs()) / 2) as u32
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

/// One of the six hex edges, clockwise from north.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    North,
    NorthEast,
    SouthEast,
    South,
    SouthWest,
    NorthWest,
}

impl Direction {
    /// All directions, clockwise from north.
    pub const ALL: [Direction; 6] = [
        Direction::North,
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    /// Clockwise index, 0 for north.
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Direction at clockwise index `i` (taken modulo 6).
    #[must_use]
    pub const fn from_index(i: u8) -> Self {
        Self::ALL[(i % 6) as usize]
    }

    /// Rotate clockwise by `steps` edges.
    #[must_use]
    pub const fn rotate(self, steps: u8) -> Self {
        Self::from_index(self.index() + steps % 6)
    }

    /// The facing edge.
    #[must_use]
    pub const fn opposite(self) -> Self {
        self.rotate(3)
    }

    const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::SouthEast => (1, 0),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::NorthWest => (-1, 0),
        }
    }
}

/// Ordered map keyed by coordinates.
///
/// Serializes as a sequence of `[coordinates, value]` pairs because JSON
/// object keys must be strings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoordMap<V>(BTreeMap<Coordinates, V>);

impl<V> CoordMap<V> {
    /// Empty map.
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Value at `coordinates`.
    #[must_use]
    pub fn get(&self, coordinates: Coordinates) -> Option<&V> {
        self.0.get(&coordinates)
    }

    /// Mutable value at `coordinates`.
    pub fn get_mut(&mut self, coordinates: Coordinates) -> Option<&mut V> {
        self.0.get_mut(&coordinates)
    }

    /// Mutable value at `coordinates`, inserting a default first.
    pub fn entry_or_default(&mut self, coordinates: Coordinates) -> &mut V
    where
        V: Default,
    {
        self.0.entry(coordinates).or_default()
    }

    /// Insert, returning the previous value.
    pub fn insert(&mut self, coordinates: Coordinates, value: V) -> Option<V> {
        self.0.insert(coordinates, value)
    }

    /// Whether `coordinates` has a value.
    #[must_use]
    pub fn contains(&self, coordinates: Coordinates) -> bool {
        self.0.contains_key(&coordinates)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in coordinate order.
    pub fn iter(&self) -> impl Iterator<Item = (Coordinates, &V)> {
        self.0.iter().map(|(c, v)| (*c, v))
    }
}

impl<V> Default for CoordMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> FromIterator<(Coordinates, V)> for CoordMap<V> {
    fn from_iter<I: IntoIterator<Item = (Coordinates, V)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<V: Serialize> Serialize for CoordMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for CoordMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pairs = Vec::<(Coordinates, V)>::deserialize(deserializer)?;
        Ok(pairs.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposites() {
        for d in Direction::ALL {
            assert_eq!(d.opposite().opposite(), d);
            let there = Coordinates::new(2, 2).offset(d);
            assert_eq!(there.offset(d.opposite()), Coordinates::new(2, 2));
        }
    }

    #[test]
    fn test_rotation_wraps() {
        assert_eq!(Direction::NorthWest.rotate(1), Direction::North);
        assert_eq!(Direction::North.rotate(9), Direction::South);
    }

    #[test]
    fn test_distance() {
        let origin = Coordinates::new(0, 0);
        for d in Direction::ALL {
            assert_eq!(origin.distance(origin.offset(d)), 1);
        }
        assert_eq!(origin.distance(Coordinates::new(2, -1)), 2);
    }

    #[test]
    fn test_coord_map_serializes_as_pairs() {
        let mut map = CoordMap::new();
        map.insert(Coordinates::new(1, 2), 7u8);

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"[[{"q":1,"r":2},7]]"#);

        let back: CoordMap<u8> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }
}
