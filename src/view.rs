use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::genome::{Chromosome, Gene};
use crate::graph::{IslandGraph, IslandId};
use crate::location::Location;

/// What a renderer needs to know about one island.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IslandView {
    /// The island's id.
    pub id: IslandId,
    /// Where it sits.
    pub location: Location,
    /// Bridges it needs.
    pub value: u8,
    /// Whether the best chromosome satisfies it.
    pub complete: bool,
}

/// A read-only snapshot of the search, detached from the solver.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardView {
    /// Every island, in id order.
    pub islands: Vec<IslandView>,
    /// Gene of each island in the best chromosome, indexed by [`IslandId`].
    pub layout: Vec<Gene>,
    /// The grid with the best chromosome's bridges drawn in.
    pub cells: Array2<Cell>,
    /// Fitness of the best chromosome, or zero without one.
    pub fitness: f64,
    /// Generations completed when the snapshot was taken.
    pub generation: usize,
}

impl BoardView {
    pub(crate) fn capture(graph: &IslandGraph, best: Option<(&Chromosome, f64)>, generation: usize) -> Self {
        let islands = graph.islands().iter()
            .map(|island| IslandView {
                id: island.id(),
                location: island.location(),
                value: island.value(),
                complete: island.is_complete(),
            })
            .collect();

        let (layout, cells, fitness) = match best {
            Some((chromosome, fitness)) => (chromosome.genes().to_vec(), graph.resolve_cells(chromosome), fitness),
            None => (vec![Gene::default(); graph.islands().len()], graph.cells().clone(), 0.0),
        };

        Self { islands, layout, cells, fitness, generation }
    }

    /// Whether every island has reached its value.
    pub fn all_complete(&self) -> bool {
        self.islands.iter().all(|island| island.complete)
    }
}
