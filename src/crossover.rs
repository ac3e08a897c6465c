//! Uniform gene-level crossover.

use rand::Rng;

use crate::genome::Chromosome;
use crate::graph::IslandGraph;

/// Recombine two parents into two children.
///
/// With probability `probability` each island independently swaps its gene between the children with odds of one half.
/// A swapped gene is spliced in, so its links are mirrored onto the neighbors and both children stay consistent.
/// Otherwise the children are copies of their parents.
#[must_use]
pub fn crossover<R: Rng>(
    graph: &IslandGraph,
    parent1: &Chromosome,
    parent2: &Chromosome,
    probability: f64,
    rng: &mut R,
) -> (Chromosome, Chromosome) {
    let mut first = parent1.clone();
    let mut second = parent2.clone();

    if !rng.gen_bool(probability) {
        return (first, second);
    }

    for island in graph.islands() {
        if !rng.gen_bool(0.5) {
            continue;
        }

        let id = island.id();
        if let (Some(gene1), Some(gene2)) = (parent1.gene(id), parent2.gene(id)) {
            first.splice(graph, id, *gene2);
            second.splice(graph, id, *gene1);
        }
    }

    (first, second)
}
