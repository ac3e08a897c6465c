//! Forced-move repair ("wisdom") of weak chromosomes.
//!
//! Some bridges follow from a single island alone. An island whose value equals its number of links needs a single
//! bridge on each of them, and one whose value is twice its number of links needs a double bridge on each. Writing
//! these into the weakest chromosomes every few generations removes them from the search.

use std::collections::BTreeMap;

use crate::error::EvaluationError;
use crate::fitness::score;
use crate::genome::{BridgeCount, Chromosome, Population};
use crate::graph::{IslandGraph, LinkId};

/// One bridge count implied by an island's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForcedMove {
    /// The link forced.
    pub link: LinkId,
    /// Bridges it must carry.
    pub bridges: BridgeCount,
}

/// Every forced move of `graph`, at most one per link, in link order.
///
/// Counts are capped at the capacity of their link. When two islands force the same link, the larger count wins.
#[must_use]
pub fn forced_moves(graph: &IslandGraph) -> Vec<ForcedMove> {
    let mut forced: BTreeMap<LinkId, BridgeCount> = BTreeMap::new();

    for island in graph.islands() {
        let links = island.neighbors().len();
        let value = usize::from(island.value());
        let bridges = if value == links {
            BridgeCount::Single
        } else if value == 2 * links {
            BridgeCount::Double
        } else {
            continue;
        };

        for neighbor in island.neighbors() {
            let capped = bridges.min(graph.links()[neighbor.link].capacity());
            forced.entry(neighbor.link)
                .and_modify(|count| *count = (*count).max(capped))
                .or_insert(capped);
        }
    }

    forced.into_iter().map(|(link, bridges)| ForcedMove { link, bridges }).collect()
}

/// Write every forced move of `graph` into `chromosome`, returning how many links changed.
pub fn apply_wisdom(graph: &IslandGraph, chromosome: &mut Chromosome) -> usize {
    let mut changed = 0;
    for forced in forced_moves(graph) {
        let link = &graph.links()[forced.link];
        if chromosome.link_count(link) != forced.bridges {
            chromosome.set_link(link, forced.bridges);
            changed += 1;
        }
    }

    changed
}

/// Repair the weakest chromosomes of a population sorted best first, leaving the first `elites` alone.
///
/// Up to a tenth of the population, and at least one chromosome, is repaired and re-scored in place.
/// Returns the number of chromosomes repaired. The population is left unsorted.
pub fn inject(graph: &IslandGraph, population: &mut Population, elites: usize) -> Result<usize, EvaluationError> {
    let count = (population.len() / 10).max(1).min(population.len().saturating_sub(elites));
    let start = population.len() - count;

    for scored in &mut population[start..] {
        let mut repaired = std::mem::take(&mut scored.chromosome);
        apply_wisdom(graph, &mut repaired);
        *scored = score(graph, repaired)?;
    }

    Ok(count)
}
