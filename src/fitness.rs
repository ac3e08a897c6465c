//! Scoring of candidate bridge layouts.
//!
//! A layout is penalised once per unit of value mismatch, once per island cut off from island 0,
//! and twice per unmirrored direction and per pair of active crossing links. Fitness is
//! `1 / (1 + penalty)`, so it is exactly [`OPTIMAL_FITNESS`] for a solution and strictly less otherwise.

#![allow(clippy::cast_precision_loss)]

use petgraph::graphmap::UnGraphMap;
use petgraph::visit::Bfs;
use serde::{Deserialize, Serialize};

use crate::error::EvaluationError;
use crate::genome::{Chromosome, ScoredChromosome};
use crate::graph::{IslandGraph, IslandId};

/// Fitness of a valid solution.
pub const OPTIMAL_FITNESS: f64 = 1.0;

const INCONSISTENCY_WEIGHT: usize = 2;
const CROSSING_WEIGHT: usize = 2;

/// Per-term breakdown of how far a layout is from a solution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitnessReport {
    /// Sum over islands of the distance between bridge-ends and value.
    pub value_mismatch: usize,
    /// Directions whose count is not mirrored by the neighbor.
    pub inconsistent: usize,
    /// Islands not reachable from island 0 over links carrying bridges.
    pub unreachable: usize,
    /// Pairs of crossing links which both carry bridges.
    pub crossings: usize,
}

impl FitnessReport {
    /// The weighted sum of every term; zero only for a solution.
    pub fn penalty(&self) -> usize {
        self.value_mismatch
            + INCONSISTENCY_WEIGHT * self.inconsistent
            + self.unreachable
            + CROSSING_WEIGHT * self.crossings
    }

    /// `1 / (1 + penalty)`, in `(0, 1]`.
    pub fn fitness(&self) -> f64 {
        OPTIMAL_FITNESS / (1.0 + self.penalty() as f64)
    }

    /// Whether every constraint of the puzzle holds.
    pub fn is_solution(&self) -> bool {
        self.penalty() == 0
    }
}

/// Score `chromosome` against `graph`.
///
/// # Errors
///
/// Fails if the chromosome does not have one gene per island, or if a gene carries a bridge in a direction without a neighbor.
pub fn evaluate(graph: &IslandGraph, chromosome: &Chromosome) -> Result<FitnessReport, EvaluationError> {
    if chromosome.len() != graph.islands().len() {
        return Err(EvaluationError::GeneCountMismatch { expected: graph.islands().len(), found: chromosome.len() });
    }

    let mut value_mismatch = 0;
    for (island, gene) in graph.islands().iter().zip(chromosome.genes()) {
        if let Some((direction, _)) = gene.active().find(|(d, _)| island.neighbor_towards(*d).is_none()) {
            return Err(EvaluationError::DanglingBridge { island: island.id(), direction });
        }
        value_mismatch += gene.connections().abs_diff(u32::from(island.value())) as usize;
    }

    let crossings = graph.crossings().iter()
        .filter(|pair| {
            let links = graph.links();
            chromosome.link_count(&links[pair.0]).is_active() && chromosome.link_count(&links[pair.1]).is_active()
        })
        .count();

    Ok(FitnessReport {
        value_mismatch,
        inconsistent: chromosome.inconsistencies(graph),
        unreachable: graph.islands().len() - reachable_from_first(graph, chromosome),
        crossings,
    })
}

/// Number of islands reachable from island 0, counting island 0 itself.
fn reachable_from_first(graph: &IslandGraph, chromosome: &Chromosome) -> usize {
    let mut connected: UnGraphMap<IslandId, ()> = UnGraphMap::with_capacity(graph.islands().len(), graph.links().len());
    for island in graph.islands() {
        connected.add_node(island.id());
    }
    for link in graph.links().iter().filter(|link| chromosome.link_count(link).is_active()) {
        connected.add_edge(link.origin(), link.target(), ());
    }

    let mut count = 0;
    let mut bfs = Bfs::new(&connected, 0);
    while bfs.next(&connected).is_some() {
        count += 1;
    }

    count
}

/// Evaluate `chromosome` and pair it with its fitness.
pub fn score(graph: &IslandGraph, chromosome: Chromosome) -> Result<ScoredChromosome, EvaluationError> {
    let report = evaluate(graph, &chromosome)?;
    Ok(ScoredChromosome { fitness: report.fitness(), chromosome })
}
