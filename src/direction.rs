use serde::{Deserialize, Serialize};
use strum::VariantArray;

use crate::location::Location;

/// The four cardinal directions a bridge may leave an island in.
///
/// The discriminant of each variant is its bit position inside one nibble of a packed
/// [`Gene`](crate::genome::Gene), so reading a nibble from its high bit to its low bit gives `UDRL`.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Direction {
    /// Towards column 0.
    Left = 0,
    /// Towards higher columns.
    Right = 1,
    /// Towards higher rows.
    Down = 2,
    /// Towards row 0.
    Up = 3,
}

impl Direction {
    /// The directions which, stepping from one location to another, lead to a location indexed higher in row-major order.
    ///
    /// Every [`Link`](crate::graph::Link) is named by the forward direction from its lower endpoint.
    pub const FORWARD_VARIANTS: &'static [Self] = &[Self::Right, Self::Down];

    /// Take one step from `location` in this direction.
    ///
    /// Stepping off the top or left edge wraps around to a huge coordinate, which no grid contains.
    pub fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::Up => location.offset_by((0, -1)),
            Self::Down => location.offset_by((0, 1)),
            Self::Left => location.offset_by((-1, 0)),
            Self::Right => location.offset_by((1, 0)),
        }
    }

    /// The opposite direction.
    pub fn invert(&self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Convert `self` to a forward direction, if it is not already one.
    pub fn ensure_forward(&self) -> Self {
        match Self::FORWARD_VARIANTS.contains(self) {
            true => *self,
            false => self.invert(),
        }
    }

    /// Whether a bridge in this direction is drawn horizontally.
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub(crate) fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

#[cfg(test)]
mod tests {
    use strum::VariantArray;

    use super::Direction;
    use crate::location::Location;

    #[test]
    fn invert_is_an_involution() {
        for direction in Direction::VARIANTS {
            assert_ne!(direction.invert(), *direction);
            assert_eq!(direction.invert().invert(), *direction);
        }
    }

    #[test]
    fn step_and_back() {
        let origin = Location(3, 4);
        assert_eq!(Direction::Up.attempt_from(origin), Location(3, 3));
        assert_eq!(Direction::Right.attempt_from(origin), Location(4, 4));
        for direction in Direction::VARIANTS {
            assert_eq!(direction.invert().attempt_from(direction.attempt_from(origin)), origin);
        }
    }

    #[test]
    fn forward_directions() {
        assert_eq!(Direction::Left.ensure_forward(), Direction::Right);
        assert_eq!(Direction::Up.ensure_forward(), Direction::Down);
        assert_eq!(Direction::Down.ensure_forward(), Direction::Down);
    }

    #[test]
    fn bits_are_udrl() {
        let packed = Direction::VARIANTS.iter().fold(0u8, |acc, d| acc | d.bit());
        assert_eq!(packed, 0b1111);
        assert_eq!(Direction::Up.bit(), 0b1000);
        assert_eq!(Direction::Left.bit(), 0b0001);
    }
}
