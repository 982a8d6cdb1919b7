//! Map model consumed by the build and move validators.
//!
//! ## Key Types
//!
//! - [`Coordinates`] / [`Direction`]: hex addressing
//! - [`SpaceType`] / [`Grid`]: static terrain, towns and printed cities
//! - [`TileType`] / [`Orientation`]: track geometry
//! - [`TrackMap`]: built track, kept in the State Store
//!
//! Literal per-variant board layouts are supplied by the embedding
//! application; the engine only queries them.

pub mod coordinates;
pub mod space;
pub mod track;

pub use coordinates::{CoordMap, Coordinates, Direction};
pub use space::{CityColor, Grid, GridBuilder, SpaceType};
pub use track::{BuiltTrack, Orientation, Segment, TileType, TrackMap};
