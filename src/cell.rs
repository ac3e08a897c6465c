use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::genome::BridgeCount;

/// Largest value an island may carry: two bridges in each of four directions.
pub const MAX_ISLAND_VALUE: u8 = 8;

/// One cell of a puzzle grid, decoded from its integer code.
///
/// | code | cell |
/// |------|------|
/// | `0` | empty |
/// | `1..=8` | island of that value |
/// | `-1` / `-2` | one / two vertical bridges |
/// | `-3` / `-4` | one / two horizontal bridges |
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    /// Open water.
    #[default]
    Empty,
    /// An island demanding `value` bridges in total.
    Island {
        /// Bridges the island needs, `1..=8`.
        value: u8,
    },
    /// A bridge passing through this cell; `direction` is always forward, so [`Right`](Direction::Right) or [`Down`](Direction::Down).
    Bridge {
        /// One or two bridges.
        count: BridgeCount,
        /// Axis of the bridge.
        direction: Direction,
    },
}

impl Cell {
    /// Decode a grid integer, returning `None` for codes outside the table above.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Empty),
            1..=8 => Some(Self::Island { value: code as u8 }),
            -1 => Some(Self::Bridge { count: BridgeCount::Single, direction: Direction::Down }),
            -2 => Some(Self::Bridge { count: BridgeCount::Double, direction: Direction::Down }),
            -3 => Some(Self::Bridge { count: BridgeCount::Single, direction: Direction::Right }),
            -4 => Some(Self::Bridge { count: BridgeCount::Double, direction: Direction::Right }),
            _ => None,
        }
    }

    /// Encode this cell back to its grid integer.
    pub fn code(&self) -> i32 {
        match self {
            Self::Empty => 0,
            Self::Island { value } => i32::from(*value),
            Self::Bridge { count, direction } => match (count, direction.is_horizontal()) {
                (BridgeCount::None, _) => 0,
                (BridgeCount::Single, false) => -1,
                (BridgeCount::Double, false) => -2,
                (BridgeCount::Single, true) => -3,
                (BridgeCount::Double, true) => -4,
            },
        }
    }

    /// Whether nothing occupies this cell.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The island's value, if this cell is an island.
    pub fn island_value(&self) -> Option<u8> {
        match self {
            Self::Island { value } => Some(*value),
            _ => None,
        }
    }
}
