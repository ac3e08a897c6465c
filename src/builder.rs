//! Assembling an [`IslandGraph`](crate::graph::IslandGraph) from a grid.

use std::num::NonZero;

use ndarray::Array2;

use crate::cell::{Cell, MAX_ISLAND_VALUE};
use crate::direction::Direction;
use crate::error::GraphError;
use crate::genome::BridgeCount;
use crate::graph::IslandGraph;
use crate::location::{Dimension, Location};

/// A builder for rectangular Hashiwokakero grids.
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
/// Any call which would make the grid invalid instead records a [`GraphError`] and turns every later call into a no-op;
/// [`build`](Self::build) then reports the first recorded reason.
#[derive(Clone, Debug)]
pub struct GridBuilder {
    // width, height
    dims: (Dimension, Dimension),
    cells: Array2<Cell>,
    invalid_reasons: Vec<GraphError>,
}

impl Default for GridBuilder {
    fn default() -> Self {
        Self::with_dims((NonZero::<usize>::MIN, NonZero::<usize>::MIN))
    }
}

impl GridBuilder {
    /// Construct an empty grid with the specified dimensions, specified in `(x, y)` order.
    pub fn with_dims(dims: (Dimension, Dimension)) -> Self {
        Self {
            dims,
            cells: Array2::from_shape_simple_fn((dims.1.get(), dims.0.get()), Cell::default),
            invalid_reasons: Vec::new(),
        }
    }

    /// Construct a builder from rows of cell codes, see [`Cell`] for the encoding.
    ///
    /// Every row must be as long as the first.
    pub fn from_rows(rows: &[Vec<i32>]) -> Self {
        let width = rows.first().map_or(0, Vec::len);
        let (Some(width), Some(height)) = (NonZero::new(width), NonZero::new(rows.len())) else {
            return Self::invalid(GraphError::EmptyGrid);
        };

        let mut builder = Self::with_dims((width, height));
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width.get() {
                builder.invalidate(GraphError::RaggedRow { row: y, expected: width.get(), found: row.len() });
                return builder;
            }

            for (x, code) in row.iter().enumerate() {
                builder.set_code(Location(x, y), *code);
            }
        }

        builder
    }

    /// Construct a builder from a grid of cell codes indexed `[y, x]`.
    pub fn from_array(codes: &Array2<i32>) -> Self {
        let (height, width) = codes.dim();
        let (Some(width), Some(height)) = (NonZero::new(width), NonZero::new(height)) else {
            return Self::invalid(GraphError::EmptyGrid);
        };

        let mut builder = Self::with_dims((width, height));
        for (ind, code) in codes.indexed_iter() {
            builder.set_code(Location::from(ind), *code);
        }

        builder
    }

    fn invalid(reason: GraphError) -> Self {
        let mut builder = Self::default();
        builder.invalid_reasons.push(reason);
        builder
    }

    fn set_code(&mut self, location: Location, code: i32) {
        match Cell::from_code(code) {
            Some(Cell::Empty) => {}
            Some(Cell::Island { value }) => { self.add_island(location, value); }
            Some(Cell::Bridge { count, direction }) => { self.add_bridge_marker(location, count, direction); }
            None => self.invalidate(GraphError::InvalidCell { location, code }),
        }
    }

    fn invalidate(&mut self, reason: GraphError) {
        if self.invalid_reasons.is_empty() {
            self.invalid_reasons.push(reason);
        }
    }

    fn in_bounds(&self, location: Location) -> bool {
        location.0 < self.dims.0.get() && location.1 < self.dims.1.get()
    }

    /// Place an island of `value` at `location`, replacing whatever was there.
    ///
    /// May cause the builder to enter a [`FeatureOutOfBounds`](GraphError::FeatureOutOfBounds) invalid state if `location` is out of bounds,
    /// or an [`IslandValueOutOfRange`](GraphError::IslandValueOutOfRange) state if `value` is not in `1..=8`.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn add_island(&mut self, location: Location, value: u8) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if !self.in_bounds(location) {
            self.invalidate(GraphError::FeatureOutOfBounds { location });
            return self;
        }

        if !(1..=MAX_ISLAND_VALUE).contains(&value) {
            self.invalidate(GraphError::IslandValueOutOfRange { location, value });
            return self;
        }

        self.cells[location.as_index()] = Cell::Island { value };
        self
    }

    /// Mark a cell as already crossed by a bridge, blocking sight through it.
    ///
    /// Solved boards fed back in keep their markers; the search itself ignores them except as obstacles.
    /// May cause the builder to enter a [`FeatureOutOfBounds`](GraphError::FeatureOutOfBounds) invalid state if `location` is out of bounds.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn add_bridge_marker(&mut self, location: Location, count: BridgeCount, direction: Direction) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if !self.in_bounds(location) {
            self.invalidate(GraphError::FeatureOutOfBounds { location });
            return self;
        }

        if count.is_active() {
            self.cells[location.as_index()] = Cell::Bridge { count, direction: direction.ensure_forward() };
        }
        self
    }

    /// Clear whatever is at `location`.
    ///
    /// If the builder is in an invalid state or `location` is out of bounds, this function does nothing.
    pub fn clear(&mut self, location: Location) -> &mut Self {
        if self.invalid_reasons.is_empty() && self.in_bounds(location) {
            self.cells[location.as_index()] = Cell::Empty;
        }
        self
    }

    /// Check the validity of this builder.
    ///
    /// Returns `None` if the builder is valid, the recorded reasons otherwise.
    pub fn is_valid(&self) -> Option<&[GraphError]> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the state of this builder into an [`IslandGraph`].
    ///
    /// Fails with the first invalid reason recorded, or with a structural error found while linking islands.
    pub fn build(&self) -> Result<IslandGraph, GraphError> {
        if let Some(reason) = self.invalid_reasons.first() {
            return Err(reason.clone());
        }

        IslandGraph::from_cells(self.cells.clone())
    }
}
