//! Error types for loading puzzles, configuring the search, and scoring chromosomes.

use thiserror::Error;

use crate::direction::Direction;
use crate::graph::IslandId;
use crate::location::Location;

/// Reasons a grid cannot be turned into an island graph.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    /// The grid has no rows or no columns.
    #[error("the grid is empty")]
    EmptyGrid,
    /// A row is shorter or longer than the first row.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        /// Index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
    /// A cell code is neither empty, an island value, nor a bridge marker.
    #[error("cell code {code} at {location} is not recognised")]
    InvalidCell {
        /// Where the code was found.
        location: Location,
        /// The code itself.
        code: i32,
    },
    /// An island was placed with a value outside `1..=8`.
    #[error("island value {value} at {location} is outside 1..=8")]
    IslandValueOutOfRange {
        /// Where the island was placed.
        location: Location,
        /// The rejected value.
        value: u8,
    },
    /// A feature was placed outside the grid.
    #[error("{location} lies outside the grid")]
    FeatureOutOfBounds {
        /// The rejected location.
        location: Location,
    },
    /// Nothing to solve.
    #[error("the grid contains no islands")]
    NoIslands,
    /// An island has no line of sight to any other island, so it can never be satisfied.
    #[error("island {id} at {location} has no neighbor in any direction")]
    IsolatedIsland {
        /// Id of the island.
        id: IslandId,
        /// Location of the island.
        location: Location,
    },
    /// A neighbor link has no matching reciprocal link.
    #[error("link from island {from} towards {direction:?} is not mirrored by island {to}")]
    InconsistentLink {
        /// Island holding the unmatched link.
        from: IslandId,
        /// Island the link points to.
        to: IslandId,
        /// Direction of the unmatched link.
        direction: Direction,
    },
}

/// Out-of-range [`Parameters`](crate::Parameters).
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigurationError {
    /// `population_size` is zero.
    #[error("population size must be at least 1")]
    EmptyPopulation,
    /// A probability or fraction is outside `[0, 1]` or not a number.
    #[error("{name} must lie in [0, 1], got {value}")]
    ProbabilityOutOfRange {
        /// Name of the parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// Wisdom is on with `gens_per_wisdom` of zero.
    #[error("wisdom must be injected at least every generation, got a cadence of 0")]
    ZeroWisdomCadence,
}

/// An internal invariant broken while scoring a chromosome.
///
/// Seeing one means a genetic operator is wrong, not that the puzzle is unsolvable.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EvaluationError {
    /// The chromosome was built for another graph.
    #[error("chromosome carries {found} genes for {expected} islands")]
    GeneCountMismatch {
        /// Number of islands in the graph.
        expected: usize,
        /// Number of genes in the chromosome.
        found: usize,
    },
    /// A gene claims a bridge in a direction without a neighbor.
    #[error("island {island} claims a bridge towards {direction:?} where it has no neighbor")]
    DanglingBridge {
        /// Island whose gene is wrong.
        island: IslandId,
        /// Direction without a neighbor.
        direction: Direction,
    },
}

/// Any failure surfaced by the [`HashiSolver`](crate::HashiSolver) control surface.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SolveError {
    /// The call needs a loaded puzzle.
    #[error("no puzzle has been loaded")]
    NotInitialized,
    /// The grid does not describe a usable puzzle.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// The parameters are out of range.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    /// A chromosome could not be scored.
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}
