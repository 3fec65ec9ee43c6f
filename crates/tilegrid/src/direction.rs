//! Cardinal directions.
//!
//! Direction codes are the integers agents store in their movement queues:
//! `Down = 0` (+y), `Right = 1` (+x), `Up = 2` (-y), `Left = 3` (-x).

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// One of the four cardinal movement directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    /// Toward increasing y.
    #[default]
    Down = 0,
    /// Toward increasing x.
    Right = 1,
    /// Toward decreasing y.
    Up = 2,
    /// Toward decreasing x.
    Left = 3,
}

impl Direction {
    /// All four directions in code order.
    pub const ALL: [Direction; 4] = [
        Direction::Down,
        Direction::Right,
        Direction::Up,
        Direction::Left,
    ];

    /// Returns the integer direction code.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Returns the unit tile offset of a step in this direction.
    #[must_use]
    pub const fn offset(self) -> IVec2 {
        match self {
            Direction::Down => IVec2::new(0, 1),
            Direction::Right => IVec2::new(1, 0),
            Direction::Up => IVec2::new(0, -1),
            Direction::Left => IVec2::new(-1, 0),
        }
    }

    /// Recovers the direction of a unit step, if `delta` is one.
    #[must_use]
    pub fn from_offset(delta: IVec2) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.offset() == delta)
    }

    /// Returns true for `Left` and `Right`.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Direction::Right | Direction::Left)
    }
}
