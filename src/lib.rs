#![warn(missing_docs)]

//! # `hashigene`
//!
//! A genetic-algorithm solver for [Hashiwokakero](https://en.wikipedia.org/wiki/Hashiwokakero), also sold as "Bridges".
//! Begin by building an [`IslandGraph`] with a [`GridBuilder`], or hand the grid straight to a [`HashiSolver`] through
//! [`initialize`](HashiSolver::initialize). Then call [`update`](HashiSolver::update) once per generation until it
//! returns `false`, and read the result back through [`view`](HashiSolver::view).
//!
//! # Internals
//! The grid is first reduced to a graph. Every island scans outward in the four cardinal directions and links to the
//! first island it sees; empty cells are transparent, pre-existing bridge markers and the edge of the grid are not.
//! Links come in mirrored pairs and each carries a capacity of at most two bridges.
//!
//! A candidate solution, or [`Chromosome`], holds one [`Gene`] per island, recording the bridge count in each
//! direction. Genes pack into one byte: a low nibble of single-bridge flags and a high nibble of double-bridge flags.
//! Every operator writes through the links, so both ends of a link always agree.
//!
//! A chromosome is penalised for:
//! 1. the distance between each island's bridge-ends and its value,
//! 2. directions whose count its neighbor does not mirror,
//! 3. islands not reachable from the first island,
//! 4. pairs of crossing links that both carry bridges.
//!
//! Its fitness is `1 / (1 + penalty)`, reaching `1.0` exactly for a valid solution.
//!
//! Each generation keeps an elite fraction unchanged and fills the rest with the offspring of fitness-proportional
//! parents, recombined gene by gene and mutated bit by bit. Optionally, every few generations the weakest
//! chromosomes are repaired with forced moves ("wisdom"): islands whose value pins down every one of their bridges.

pub use builder::GridBuilder;
pub use cell::Cell;
pub use direction::Direction;
pub use error::{ConfigurationError, EvaluationError, GraphError, SolveError};
pub use fitness::FitnessReport;
pub use genome::{BridgeCount, Chromosome, Gene, Population, ScoredChromosome};
pub use graph::{Island, IslandGraph, IslandId, Link, LinkId, NeighborLink};
pub use location::Location;
pub use parameters::Parameters;
pub use solver::{HashiSolver, SolverState};
pub use view::{BoardView, IslandView};

pub mod builder;
pub(crate) mod cell;
pub mod crossover;
pub(crate) mod direction;
pub mod error;
pub mod fitness;
pub mod genome;
pub mod graph;
pub(crate) mod location;
pub mod mutation;
pub(crate) mod parameters;
pub mod selection;
pub(crate) mod solver;
mod tests;
pub(crate) mod view;
#[cfg(feature = "wasm")]
pub mod wasm;
pub mod wisdom;
