//! Genome representation for the bridge search.
//!
//! A [`Chromosome`] holds one [`Gene`] per island, index-aligned with [`IslandGraph::islands`].
//! Each gene records how many bridges leave its island in each of the four directions.
//! Both islands of a [`Link`] always record the same count for it; every operator that
//! writes a gene goes through [`Chromosome::set_link`] so that the pairing can never drift.

use rand::Rng;
use serde::{Deserialize, Serialize};
use strum::VariantArray;

use crate::direction::Direction;
use crate::fitness::OPTIMAL_FITNESS;
use crate::graph::{IslandGraph, IslandId, Link};

/// Number of bridges on one link.
#[derive(Copy, Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, VariantArray, Serialize, Deserialize)]
pub enum BridgeCount {
    /// No bridge.
    #[default]
    None = 0,
    /// One bridge.
    Single = 1,
    /// Two parallel bridges.
    Double = 2,
}

impl BridgeCount {
    /// The number of bridges as an integer.
    #[inline]
    pub fn get(self) -> u8 {
        self as u8
    }

    /// The variant for `count`, or `None` above two.
    pub fn from_count(count: u8) -> Option<Self> {
        Self::VARIANTS.get(usize::from(count)).copied()
    }

    /// Whether at least one bridge is present.
    #[inline]
    pub fn is_active(self) -> bool {
        self != Self::None
    }

    /// Draw uniformly from `None..=capacity`.
    pub fn random_up_to<R: Rng>(capacity: Self, rng: &mut R) -> Self {
        Self::VARIANTS[rng.gen_range(0..=usize::from(capacity.get()))]
    }
}

/// The bridges leaving one island, one [`BridgeCount`] per [`Direction`].
///
/// Packs into a single byte: the lower nibble flags a single bridge per direction, the upper
/// nibble flags a double bridge, both in `UDRL` bit order. For example `0100_1011` is a double
/// bridge down and single bridges up, right, and left.
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Gene {
    bridges: [BridgeCount; 4],
}

impl Gene {
    const DOUBLE_SHIFT: u8 = 4;

    /// Bridges leaving towards `direction`.
    #[inline]
    pub fn get(&self, direction: Direction) -> BridgeCount {
        self.bridges[direction.index()]
    }

    #[inline]
    pub(crate) fn set(&mut self, direction: Direction, count: BridgeCount) {
        self.bridges[direction.index()] = count;
    }

    /// The packed byte form of this gene.
    pub fn to_bits(&self) -> u8 {
        Direction::VARIANTS.iter().fold(0, |bits, direction| match self.get(*direction) {
            BridgeCount::None => bits,
            BridgeCount::Single => bits | direction.bit(),
            BridgeCount::Double => bits | (direction.bit() << Self::DOUBLE_SHIFT),
        })
    }

    /// Unpack a byte, or `None` if some direction has both its single and its double bit set.
    pub fn from_bits(bits: u8) -> Option<Self> {
        let mut gene = Self::default();
        for direction in Direction::VARIANTS {
            let single = bits & direction.bit() != 0;
            let double = bits & (direction.bit() << Self::DOUBLE_SHIFT) != 0;
            gene.set(*direction, match (single, double) {
                (false, false) => BridgeCount::None,
                (true, false) => BridgeCount::Single,
                (false, true) => BridgeCount::Double,
                (true, true) => return None,
            });
        }

        Some(gene)
    }

    /// Total bridge-ends on this island.
    ///
    /// Tallied per direction from the packed form: a single bit weighs one, a double bit weighs two.
    pub fn connections(&self) -> u32 {
        let bits = self.to_bits();
        Direction::VARIANTS.iter()
            .map(|direction| {
                let single = u32::from(bits & direction.bit() != 0);
                let double = u32::from(bits & (direction.bit() << Self::DOUBLE_SHIFT) != 0);
                single + 2 * double
            })
            .sum()
    }

    /// Directions carrying at least one bridge.
    pub fn active(&self) -> impl Iterator<Item=(Direction, BridgeCount)> + '_ {
        Direction::VARIANTS.iter()
            .map(|direction| (*direction, self.get(*direction)))
            .filter(|(_, count)| count.is_active())
    }
}

/// One candidate bridge layout for a whole puzzle.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Chromosome {
    genes: Vec<Gene>,
}

impl Chromosome {
    /// A layout without any bridge.
    pub fn empty(island_count: usize) -> Self {
        Self { genes: vec![Gene::default(); island_count] }
    }

    /// Wrap raw genes without checking them against any graph.
    pub fn from_genes(genes: Vec<Gene>) -> Self {
        Self { genes }
    }

    /// A random layout for `graph`.
    ///
    /// Islands are visited in id order; every link not yet resolved draws a count up to its
    /// capacity, which is written to both of its islands at once.
    pub fn random<R: Rng>(graph: &IslandGraph, rng: &mut R) -> Self {
        let mut chromosome = Self::empty(graph.islands().len());
        let mut resolved = vec![false; graph.links().len()];

        for island in graph.islands() {
            for neighbor in island.neighbors() {
                if resolved[neighbor.link] {
                    continue;
                }
                resolved[neighbor.link] = true;

                let link = &graph.links()[neighbor.link];
                chromosome.set_link(link, BridgeCount::random_up_to(link.capacity(), rng));
            }
        }

        chromosome
    }

    /// Every gene, indexed by [`IslandId`].
    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    /// The gene of `island`.
    pub fn gene(&self, island: IslandId) -> Option<&Gene> {
        self.genes.get(island)
    }

    /// Number of genes, equal to the island count of its graph.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Whether there are no genes.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Write `count` bridges onto `link`, on both of its islands.
    pub fn set_link(&mut self, link: &Link, count: BridgeCount) {
        self.genes[link.origin()].set(link.direction(), count);
        self.genes[link.target()].set(link.direction().invert(), count);
    }

    /// The bridge count of `link`, as seen from its origin island.
    pub fn link_count(&self, link: &Link) -> BridgeCount {
        self.genes[link.origin()].get(link.direction())
    }

    /// Replace the gene of `island` with `gene` and mirror every linked direction onto the neighbors.
    ///
    /// Directions of `gene` without a neighbor are dropped.
    pub(crate) fn splice(&mut self, graph: &IslandGraph, island: IslandId, gene: Gene) {
        self.genes[island] = Gene::default();
        for neighbor in graph.islands()[island].neighbors() {
            self.set_link(&graph.links()[neighbor.link], gene.get(neighbor.direction));
        }
    }

    /// Number of `(island, direction)` pairs whose count the neighbor does not mirror.
    pub fn inconsistencies(&self, graph: &IslandGraph) -> usize {
        graph.islands().iter()
            .flat_map(|island| island.neighbors().iter().map(move |n| (island.id(), n)))
            .filter(|(id, neighbor)| {
                let ours = self.genes.get(*id).map(|g| g.get(neighbor.direction));
                let theirs = self.genes.get(neighbor.neighbor).map(|g| g.get(neighbor.direction.invert()));
                ours != theirs
            })
            .count()
    }

    /// The packed byte form of every gene.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.genes.iter().map(Gene::to_bits).collect()
    }
}

/// A chromosome together with its fitness.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoredChromosome {
    /// The score from [`fitness::score`](crate::fitness::score).
    pub fitness: f64,
    /// The layout scored.
    pub chromosome: Chromosome,
}

impl ScoredChromosome {
    /// Whether this chromosome is a valid solution.
    pub fn is_optimal(&self) -> bool {
        self.fitness >= OPTIMAL_FITNESS
    }
}

/// Candidates of one generation, best first once sorted.
pub type Population = Vec<ScoredChromosome>;
