//! Track tiles and the built-track layer.
//!
//! A tile type plus an orientation yields exits (edges track leaves through)
//! and segments (pairs of exits joined by one rail line). Town tiles join all
//! of their exits through the town instead of through segments.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::coordinates::{CoordMap, Direction};
use crate::core::PlayerId;

/// Clockwise rotation of a tile, 0..6.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct Orientation(u8);

impl Orientation {
    /// Rotation by `steps` edges, taken modulo 6.
    #[must_use]
    pub const fn new(steps: u8) -> Self {
        Self(steps % 6)
    }

    #[must_use]
    pub const fn steps(self) -> u8 {
        self.0
    }
}

impl From<u8> for Orientation {
    fn from(steps: u8) -> Self {
        Self::new(steps)
    }
}

impl From<Orientation> for u8 {
    fn from(o: Orientation) -> Self {
        o.0
    }
}

/// Pair of exits joined by one rail line.
pub type Segment = (Direction, Direction);

/// Printed track tile kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileType {
    Straight,
    GentleCurve,
    TightCurve,
    /// Two straights crossing.
    Crossing,
    /// A straight and a tight curve sharing the space without meeting.
    Coexisting,
    TownStub,
    TownStraight,
    TownCurve,
    TownJunction,
}

impl TileType {
    pub const ALL: [TileType; 9] = [
        TileType::Straight,
        TileType::GentleCurve,
        TileType::TightCurve,
        TileType::Crossing,
        TileType::Coexisting,
        TileType::TownStub,
        TileType::TownStraight,
        TileType::TownCurve,
        TileType::TownJunction,
    ];

    /// Whether this tile goes on a town space.
    #[must_use]
    pub const fn is_town_tile(self) -> bool {
        matches!(
            self,
            TileType::TownStub | TileType::TownStraight | TileType::TownCurve | TileType::TownJunction
        )
    }

    /// Tiles carrying two independent lines.
    #[must_use]
    pub const fn is_complex(self) -> bool {
        matches!(self, TileType::Crossing | TileType::Coexisting)
    }

    /// Segments as clockwise offsets before rotation.
    const fn base_segments(self) -> &'static [(u8, u8)] {
        match self {
            TileType::Straight => &[(0, 3)],
            TileType::GentleCurve => &[(0, 2)],
            TileType::TightCurve => &[(0, 1)],
            TileType::Crossing => &[(0, 3), (1, 4)],
            TileType::Coexisting => &[(0, 3), (1, 2)],
            _ => &[],
        }
    }

    /// Town exits as clockwise offsets before rotation.
    const fn base_town_exits(self) -> &'static [u8] {
        match self {
            TileType::TownStub => &[0],
            TileType::TownStraight => &[0, 3],
            TileType::TownCurve => &[0, 2],
            TileType::TownJunction => &[0, 2, 4],
            _ => &[],
        }
    }

    /// Rail segments for this tile at `orientation`. Empty for town tiles.
    #[must_use]
    pub fn segments(self, orientation: Orientation) -> SmallVec<[Segment; 2]> {
        let rot = orientation.steps();
        self.base_segments()
            .iter()
            .map(|&(a, b)| (Direction::from_index(a + rot), Direction::from_index(b + rot)))
            .collect()
    }

    /// Every edge track leaves through at `orientation`.
    #[must_use]
    pub fn exits(self, orientation: Orientation) -> SmallVec<[Direction; 6]> {
        let rot = orientation.steps();
        if self.is_town_tile() {
            return self
                .base_town_exits()
                .iter()
                .map(|&e| Direction::from_index(e + rot))
                .collect();
        }
        let mut exits: SmallVec<[Direction; 6]> = SmallVec::new();
        for (a, b) in self.segments(orientation) {
            exits.push(a);
            exits.push(b);
        }
        exits
    }

    /// Whether a train entering through `from` can leave through `to`.
    #[must_use]
    pub fn connects(self, orientation: Orientation, from: Direction, to: Direction) -> bool {
        if from == to {
            return false;
        }
        if self.is_town_tile() {
            let exits = self.exits(orientation);
            return exits.contains(&from) && exits.contains(&to);
        }
        self.segments(orientation)
            .iter()
            .any(|&(a, b)| (a == from && b == to) || (a == to && b == from))
    }
}

/// A placed tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuiltTrack {
    pub tile: TileType,
    pub orientation: Orientation,
    /// Who built it; `None` for track printed on the board.
    pub owner: Option<PlayerId>,
}

impl BuiltTrack {
    #[must_use]
    pub fn exits(&self) -> SmallVec<[Direction; 6]> {
        self.tile.exits(self.orientation)
    }

    #[must_use]
    pub fn connects(&self, from: Direction, to: Direction) -> bool {
        self.tile.connects(self.orientation, from, to)
    }
}

/// Built track by space.
pub type TrackMap = CoordMap<BuiltTrack>;
