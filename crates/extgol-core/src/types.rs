//! Core type definitions for the simulation.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameId(pub Uuid);

impl GameId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GameId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardId(pub Uuid);

impl BoardId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BoardId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Offsets of the 8-neighborhood, row by row.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// 2D position on the board
///
/// Ordering is row-major (`y` first, then `x`), which is also the order the
/// engine visits tiles in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn add(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Whether the coordinate lies in `[0, width) x [0, height)`
    pub fn in_bounds(&self, width: i32, height: i32) -> bool {
        self.x >= 0 && self.y >= 0 && self.x < width && self.y < height
    }

    /// In-bounds neighbors, in `NEIGHBOR_OFFSETS` order. No wraparound.
    pub fn neighbors(self, width: i32, height: i32) -> impl Iterator<Item = Coord> {
        NEIGHBOR_OFFSETS
            .iter()
            .map(move |&(dx, dy)| self.add(dx, dy))
            .filter(move |c| c.in_bounds(width, height))
    }
}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coord {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Behavioral role governing pairwise energy exchange
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    #[default]
    Naive,
    Healer,
    Vampire,
}

impl Mood {
    pub fn all() -> [Mood; 3] {
        [Mood::Naive, Mood::Healer, Mood::Vampire]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mood::Naive => "NAIVE",
            Mood::Healer => "HEALER",
            Mood::Vampire => "VAMPIRE",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mood {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NAIVE" => Ok(Mood::Naive),
            "HEALER" => Ok(Mood::Healer),
            "VAMPIRE" => Ok(Mood::Vampire),
            _ => Err(Error::InvalidMoodOrType(format!("unknown mood '{}'", s))),
        }
    }
}

impl TryFrom<u8> for Mood {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Mood::all()
            .get(value as usize)
            .copied()
            .ok_or_else(|| Error::InvalidMoodOrType(format!("mood ordinal {}", value)))
    }
}

/// Default survival bounds under the classic rules
pub const DEFAULT_MIN_THRESHOLD: i32 = 2;
pub const DEFAULT_MAX_THRESHOLD: i32 = 3;

/// Structural rule modifier for a cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellType {
    #[default]
    Basic,
    /// Survives up to three out-of-range generations before losing immunity
    Highlander,
    /// Survives with a single neighbor
    Loner,
    /// Survives crowding up to eight neighbors
    Social,
}

impl CellType {
    pub fn all() -> [CellType; 4] {
        [
            CellType::Basic,
            CellType::Highlander,
            CellType::Loner,
            CellType::Social,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            CellType::Basic => "BASIC",
            CellType::Highlander => "HIGHLANDER",
            CellType::Loner => "LONER",
            CellType::Social => "SOCIAL",
        }
    }

    /// `(min, max)` survival thresholds this type imposes
    pub fn thresholds(&self) -> (i32, i32) {
        match self {
            CellType::Basic | CellType::Highlander => (DEFAULT_MIN_THRESHOLD, DEFAULT_MAX_THRESHOLD),
            CellType::Loner => (1, DEFAULT_MAX_THRESHOLD),
            CellType::Social => (DEFAULT_MIN_THRESHOLD, 8),
        }
    }
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CellType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BASIC" => Ok(CellType::Basic),
            "HIGHLANDER" => Ok(CellType::Highlander),
            "LONER" => Ok(CellType::Loner),
            "SOCIAL" => Ok(CellType::Social),
            _ => Err(Error::InvalidMoodOrType(format!("unknown cell type '{}'", s))),
        }
    }
}

impl TryFrom<u8> for CellType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        CellType::all()
            .get(value as usize)
            .copied()
            .ok_or_else(|| Error::InvalidMoodOrType(format!("cell type ordinal {}", value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_equality_and_order() {
        assert_eq!(Coord::new(1, 2), Coord::new(1, 2));
        assert_ne!(Coord::new(1, 2), Coord::new(2, 1));

        // Row-major: (5, 0) comes before (0, 1)
        assert!(Coord::new(5, 0) < Coord::new(0, 1));
        assert!(Coord::new(0, 1) < Coord::new(1, 1));
    }

    #[test]
    fn test_neighbors_interior_and_corner() {
        let center = Coord::new(1, 1);
        assert_eq!(center.neighbors(3, 3).count(), 8);

        let corner = Coord::new(0, 0);
        let around: Vec<Coord> = corner.neighbors(3, 3).collect();
        assert_eq!(
            around,
            vec![Coord::new(1, 0), Coord::new(0, 1), Coord::new(1, 1)]
        );

        let edge = Coord::new(1, 0);
        assert_eq!(edge.neighbors(3, 3).count(), 5);
    }

    #[test]
    fn test_neighbors_on_single_tile_board() {
        assert_eq!(Coord::new(0, 0).neighbors(1, 1).count(), 0);
    }

    #[test]
    fn test_mood_parsing() {
        assert_eq!("vampire".parse::<Mood>().unwrap(), Mood::Vampire);
        assert_eq!(" HEALER ".parse::<Mood>().unwrap(), Mood::Healer);
        assert!(matches!(
            "zombie".parse::<Mood>(),
            Err(Error::InvalidMoodOrType(_))
        ));
        assert_eq!(Mood::try_from(0u8).unwrap(), Mood::Naive);
        assert!(Mood::try_from(3u8).is_err());
    }

    #[test]
    fn test_cell_type_parsing_and_thresholds() {
        assert_eq!("Loner".parse::<CellType>().unwrap(), CellType::Loner);
        assert!(matches!(
            "WIZARD".parse::<CellType>(),
            Err(Error::InvalidMoodOrType(_))
        ));
        assert!(CellType::try_from(4u8).is_err());

        assert_eq!(CellType::Basic.thresholds(), (2, 3));
        assert_eq!(CellType::Highlander.thresholds(), (2, 3));
        assert_eq!(CellType::Loner.thresholds(), (1, 3));
        assert_eq!(CellType::Social.thresholds(), (2, 8));

        for t in CellType::all() {
            let (min, max) = t.thresholds();
            assert!(min <= max);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Coord::new(3, 4).to_string(), "3,4");
        assert_eq!(Mood::Vampire.to_string(), "VAMPIRE");
        assert_eq!(CellType::Highlander.to_string(), "HIGHLANDER");
    }
}
