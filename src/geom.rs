//! Grid primitives shared by every engine
//!
//! Coordinates are integer cells: `x` grows to the right, `y` grows downward,
//! and `(0, 0)` is the top-left cell.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Integer grid coordinate
pub type Point = IVec2;

/// One of the four unit moves on a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit vector for this direction
    #[inline]
    pub fn vector(self) -> Point {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// True when both directions move along the same axis (equal or opposite)
    #[inline]
    pub fn shares_axis(self, other: Direction) -> bool {
        self.is_horizontal() == other.is_horizontal()
    }

    /// Map a DOM `KeyboardEvent.key` value to a direction.
    ///
    /// Arrow keys and WASD (either case) are recognized.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "w" | "W" => Some(Direction::Up),
            "ArrowDown" | "s" | "S" => Some(Direction::Down),
            "ArrowLeft" | "a" | "A" => Some(Direction::Left),
            "ArrowRight" | "d" | "D" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// True if `p` lies inside a `width × height` grid anchored at the origin
#[inline]
pub fn in_bounds(p: Point, width: i32, height: i32) -> bool {
    p.x >= 0 && p.x < width && p.y >= 0 && p.y < height
}
