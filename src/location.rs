use std::fmt::{Display, Formatter};
use std::num::NonZero;

use ndarray::Ix;
use serde::{Deserialize, Serialize};

/// A single coordinate along one axis of a grid.
pub type Coord = usize;
/// A nonzero grid extent.
pub type Dimension = NonZero<Coord>;

#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug, Serialize, Deserialize)]
/// A location `(x, y)` on a board. The top left corner is `Location(0, 0)`.
pub struct Location(
    /// Column.
    pub Coord,
    /// Row.
    pub Coord,
);

impl Location {
    /// The row of this location, i.e. its `y` component.
    pub fn row(&self) -> Coord {
        self.1
    }

    /// The column of this location, i.e. its `x` component.
    pub fn col(&self) -> Coord {
        self.0
    }

    pub(crate) fn as_index(&self) -> (Coord, Coord) {
        (self.1, self.0)
    }

    // wraps on underflow, which lands far outside any array and fails the bounds check there
    pub(crate) fn offset_by(self, rhs: (isize, isize)) -> Self {
        Self(self.0.wrapping_add_signed(rhs.0), self.1.wrapping_add_signed(rhs.1))
    }
}

impl From<(Ix, Ix)> for Location {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.1, value.0)
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}
