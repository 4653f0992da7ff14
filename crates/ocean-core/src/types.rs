//! Core type definitions for the ocean.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell coordinate on the board, row first.
///
/// Coordinates are signed so that neighbourhood arithmetic can step off the
/// edge of the board; the board rejects anything out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn add(&self, dr: i32, dc: i32) -> Self {
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }

    /// Position one unit step away in the given direction
    pub fn step(&self, offset: Offset) -> Self {
        self.add(offset.dr, offset.dc)
    }

    /// Squared Euclidean distance to another position
    pub fn distance_squared(&self, other: &Position) -> i32 {
        let dr = self.row - other.row;
        let dc = self.col - other.col;
        dr * dr + dc * dc
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// A unit step in each axis, each component in {-1, 0, 1}.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Offset {
    pub dr: i32,
    pub dc: i32,
}

impl Offset {
    pub const ZERO: Offset = Offset { dr: 0, dc: 0 };

    /// Unit step from `from` toward `to` (sign of each delta)
    pub fn toward(from: Position, to: Position) -> Self {
        Self {
            dr: (to.row - from.row).signum(),
            dc: (to.col - from.col).signum(),
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

/// Moore-neighbourhood directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    NorthWest,
    North,
    NorthEast,
    West,
    East,
    SouthWest,
    South,
    SouthEast,
}

impl Direction {
    /// All eight directions in the fixed row-major scan order used by
    /// neighbourhood queries.
    pub const ALL: [Direction; 8] = [
        Direction::NorthWest,
        Direction::North,
        Direction::NorthEast,
        Direction::West,
        Direction::East,
        Direction::SouthWest,
        Direction::South,
        Direction::SouthEast,
    ];

    pub fn to_offset(&self) -> Offset {
        let (dr, dc) = match self {
            Direction::NorthWest => (-1, -1),
            Direction::North => (-1, 0),
            Direction::NorthEast => (-1, 1),
            Direction::West => (0, -1),
            Direction::East => (0, 1),
            Direction::SouthWest => (1, -1),
            Direction::South => (1, 0),
            Direction::SouthEast => (1, 1),
        };
        Offset { dr, dc }
    }
}

/// Behavioural category of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Algae: spreads into empty cells, never starves.
    Producer,
    Herbivore,
    Predator,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [
        EntityKind::Producer,
        EntityKind::Herbivore,
        EntityKind::Predator,
    ];
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Producer => "algae",
            EntityKind::Herbivore => "herbivore",
            EntityKind::Predator => "predator",
        };
        f.write_str(name)
    }
}
